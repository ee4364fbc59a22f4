use crate::animation::{AnimationKind, TimerToken};
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

/// Callbacks that reached the machine through an identity it already retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("stale {kind:?} frame from generation {generation}")]
    StaleAnimationFrame { kind: AnimationKind, generation: u64 },
    #[error("deferred flip {token:?} fired after it was revoked")]
    LateDeferredFlip { token: TimerToken },
}
