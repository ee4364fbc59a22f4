/// Identity of one scheduled deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub token: TimerToken,
    pub deadline_ms: u64,
}

/// Single-slot revocable timer, polled from the frame loop.
///
/// Canceling retires the token, so a fire can only ever be observed for the
/// token that is currently scheduled.
#[derive(Debug, Default)]
pub struct DeferredTimer {
    next_token: u64,
    pending: Option<FiredTimer>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        if let Some(previous) = self.pending.replace(FiredTimer {
            token,
            deadline_ms: now_ms.saturating_add(delay_ms),
        }) {
            tracing::trace!(replaced = previous.token.0, "deferred action rescheduled");
        }
        token
    }

    pub fn cancel(&mut self, token: TimerToken) -> bool {
        if self.is_pending(token) {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn cancel_all(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.is_some_and(|pending| pending.token == token)
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|pending| pending.deadline_ms)
    }

    /// Fires the pending action once `now_ms` reaches its deadline.
    pub fn poll(&mut self, now_ms: u64) -> Option<FiredTimer> {
        match self.pending {
            Some(pending) if now_ms >= pending.deadline_ms => self.pending.take(),
            _ => None,
        }
    }
}
