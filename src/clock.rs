use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source driving the hold timer and animations.
pub trait FrameClock {
    fn now_millis(&self) -> u64;
}

impl<T: FrameClock + ?Sized> FrameClock for Rc<T> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<T: FrameClock + ?Sized> FrameClock for &T {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemFrameClock {
    origin: Instant,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemFrameClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to. Share it through `Rc` with the view under test.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }

    pub fn advance_by(&self, millis: u64) -> u64 {
        let next = self.now.get().saturating_add(millis);
        self.now.set(next);
        next
    }
}

impl FrameClock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}
