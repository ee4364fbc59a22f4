pub mod error;
pub mod event;
pub mod listeners;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{GestureEvent, GestureTransition, InputEvent, InputOutcome};
pub use listeners::{ListenerId, Listeners};
pub use machine::GestureMachine;
pub use model::{GesturePhase, TICK_PHASE_HIDDEN, TICK_PHASE_VISIBLE};
