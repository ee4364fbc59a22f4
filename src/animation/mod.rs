mod engine;
mod timer;

pub use engine::{lerp, AnimationEngine, AnimationFrame, AnimationHandle, AnimationKind};
pub use timer::{DeferredTimer, FiredTimer, TimerToken};
