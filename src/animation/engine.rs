//! Linear tweens for the progress sweep and the tick reveal.
//!
//! Each kind owns one slot. Every `start` mints a new generation, so a handle
//! captured before a restart or a cancel can never match the slot again and
//! its frames are simply never produced.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    ProgressSweep,
    TickReveal,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 2] = [AnimationKind::ProgressSweep, AnimationKind::TickReveal];

    const fn slot(self) -> usize {
        match self {
            Self::ProgressSweep => 0,
            Self::TickReveal => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    kind: AnimationKind,
    generation: u64,
}

impl AnimationHandle {
    pub const fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// One value produced by [`AnimationEngine::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub handle: AnimationHandle,
    pub value: f32,
    pub terminal: bool,
}

pub fn lerp(start: f32, end: f32, fraction: f32) -> f32 {
    start + (end - start) * fraction
}

#[derive(Debug, Clone, PartialEq)]
struct Tween {
    handle: AnimationHandle,
    start_value: f32,
    end_value: f32,
    duration_ms: u64,
    started_at_ms: u64,
    elapsed_ms: u64,
    current_value: f32,
}

impl Tween {
    fn step(&mut self, now_ms: u64) -> AnimationFrame {
        // Never run backwards, even if the host clock does.
        self.elapsed_ms = self
            .elapsed_ms
            .max(now_ms.saturating_sub(self.started_at_ms));

        if self.duration_ms == 0 || self.elapsed_ms >= self.duration_ms {
            self.current_value = self.end_value;
            return AnimationFrame {
                handle: self.handle,
                value: self.end_value,
                terminal: true,
            };
        }

        let fraction = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.current_value = lerp(self.start_value, self.end_value, fraction);
        AnimationFrame {
            handle: self.handle,
            value: self.current_value,
            terminal: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationEngine {
    slots: [Option<Tween>; AnimationKind::ALL.len()],
    next_generation: u64,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a tween for `kind`, discarding whatever was running there.
    pub fn start(
        &mut self,
        kind: AnimationKind,
        from: f32,
        to: f32,
        duration_ms: u64,
        now_ms: u64,
    ) -> AnimationHandle {
        self.next_generation += 1;
        let handle = AnimationHandle {
            kind,
            generation: self.next_generation,
        };

        if let Some(previous) = self.slots[kind.slot()].take() {
            tracing::trace!(
                ?kind,
                replaced = previous.handle.generation,
                generation = handle.generation,
                "replacing in-flight animation"
            );
        }

        self.slots[kind.slot()] = Some(Tween {
            handle,
            start_value: from,
            end_value: to,
            duration_ms,
            started_at_ms: now_ms,
            elapsed_ms: 0,
            current_value: from,
        });
        handle
    }

    /// Stops `handle` without a terminal frame. Returns `false` for stale handles.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        let slot = &mut self.slots[handle.kind.slot()];
        if slot.as_ref().is_some_and(|tween| tween.handle == handle) {
            *slot = None;
            tracing::trace!(kind = ?handle.kind, generation = handle.generation, "animation canceled");
            return true;
        }
        false
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None, None];
    }

    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.slots[handle.kind.slot()]
            .as_ref()
            .is_some_and(|tween| tween.handle == handle)
    }

    pub fn active_handle(&self, kind: AnimationKind) -> Option<AnimationHandle> {
        self.slots[kind.slot()].as_ref().map(|tween| tween.handle)
    }

    pub fn current_value(&self, kind: AnimationKind) -> Option<f32> {
        self.slots[kind.slot()]
            .as_ref()
            .map(|tween| tween.current_value)
    }

    pub fn has_active(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Steps every active tween to `now_ms`, sweep first.
    ///
    /// A tween that reaches its duration yields its terminal frame here and
    /// leaves its slot.
    pub fn advance(&mut self, now_ms: u64) -> Vec<AnimationFrame> {
        let mut frames = Vec::new();
        for slot in &mut self.slots {
            let Some(tween) = slot.as_mut() else {
                continue;
            };
            let frame = tween.step(now_ms);
            if frame.terminal {
                *slot = None;
            }
            frames.push(frame);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_interpolates_linearly_then_finishes_once() {
        let mut engine = AnimationEngine::new();
        let handle = engine.start(AnimationKind::ProgressSweep, 0.0, 360.0, 1000, 0);

        let frames = engine.advance(250);
        assert_eq!(
            frames,
            vec![AnimationFrame {
                handle,
                value: 90.0,
                terminal: false
            }]
        );

        let frames = engine.advance(1000);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, 360.0);
        assert!(frames[0].terminal);
        assert!(!engine.is_active(handle));

        assert!(engine.advance(2000).is_empty());
    }

    #[test]
    fn late_frame_past_duration_delivers_exact_end_value() {
        let mut engine = AnimationEngine::new();
        engine.start(AnimationKind::TickReveal, 1.0, 0.0, 200, 100);

        let frames = engine.advance(5_000);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, 0.0);
        assert!(frames[0].terminal);
    }

    #[test]
    fn zero_duration_completes_with_single_terminal_frame() {
        let mut engine = AnimationEngine::new();
        let handle = engine.start(AnimationKind::TickReveal, 0.0, -1.0, 0, 50);

        let frames = engine.advance(50);
        assert_eq!(
            frames,
            vec![AnimationFrame {
                handle,
                value: -1.0,
                terminal: true
            }]
        );
        assert!(engine.advance(51).is_empty());
    }

    #[test]
    fn restart_of_same_kind_leaves_one_active_handle() {
        let mut engine = AnimationEngine::new();
        let first = engine.start(AnimationKind::ProgressSweep, 0.0, 360.0, 1000, 0);
        let second = engine.start(AnimationKind::ProgressSweep, 0.0, 360.0, 1000, 500);

        assert_ne!(first, second);
        assert!(!engine.is_active(first));
        assert!(engine.is_active(second));
        assert_eq!(engine.active_handle(AnimationKind::ProgressSweep), Some(second));

        // Past the first tween's original end, only the replacement ticks.
        let frames = engine.advance(1000);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].handle, second);
        assert_eq!(frames[0].value, 180.0);
        assert!(!frames[0].terminal);
    }

    #[test]
    fn cancel_stops_without_terminal_frame() {
        let mut engine = AnimationEngine::new();
        let handle = engine.start(AnimationKind::ProgressSweep, 0.0, 360.0, 1000, 0);

        assert!(engine.cancel(handle));
        assert!(engine.advance(1000).is_empty());
        assert!(!engine.has_active());
    }

    #[test]
    fn cancel_through_stale_handle_does_not_touch_replacement() {
        let mut engine = AnimationEngine::new();
        let stale = engine.start(AnimationKind::TickReveal, 1.0, 0.0, 200, 0);
        let current = engine.start(AnimationKind::TickReveal, 0.0, -1.0, 200, 10);

        assert!(!engine.cancel(stale));
        assert!(engine.is_active(current));
    }

    #[test]
    fn kinds_run_independently() {
        let mut engine = AnimationEngine::new();
        let sweep = engine.start(AnimationKind::ProgressSweep, 0.0, 360.0, 1000, 0);
        let reveal = engine.start(AnimationKind::TickReveal, 1.0, 0.0, 200, 0);

        let frames = engine.advance(100);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].handle, sweep);
        assert_eq!(frames[1].handle, reveal);
        assert_eq!(frames[1].value, 0.5);

        assert!(engine.cancel(sweep));
        assert_eq!(engine.current_value(AnimationKind::TickReveal), Some(0.5));
    }

    #[test]
    fn elapsed_time_never_moves_backwards() {
        let mut engine = AnimationEngine::new();
        engine.start(AnimationKind::ProgressSweep, 0.0, 100.0, 200, 0);

        let ahead = engine.advance(100);
        let behind = engine.advance(50);
        assert_eq!(ahead[0].value, 50.0);
        assert_eq!(behind[0].value, 50.0);
    }
}
