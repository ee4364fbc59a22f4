use super::model::GesturePhase;

/// Pointer input delivered by the host. Coordinates are irrelevant: the whole
/// control is the hit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PressBegin,
    PressEnd,
    PressCancel,
}

/// What the machine did with an input event. Every event is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    HoldStarted,
    HoldAborted,
    /// The hold was short-circuited (`hold_duration_ms == 0`) and the state flipped.
    Toggled,
    Ignored,
    Disabled,
}

impl InputOutcome {
    pub const fn is_handled(self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Press,
    Release,
    Cancel,
    HoldElapsed,
    RevealFinished,
    SetChecked,
    Disable,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTransition {
    pub from: Option<GesturePhase>,
    pub event: GestureEvent,
    pub to: GesturePhase,
}

impl GestureTransition {
    pub const fn new(from: Option<GesturePhase>, event: GestureEvent, to: GesturePhase) -> Self {
        Self { from, event, to }
    }
}
