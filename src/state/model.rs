/// Dash phase at which the whole tick is drawn.
pub const TICK_PHASE_VISIBLE: f32 = 0.0;
/// Dash phase at which the tick is fully hidden.
pub const TICK_PHASE_HIDDEN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Holding,
    Settling,
}

impl GesturePhase {
    pub const fn is_holding(self) -> bool {
        matches!(self, Self::Holding)
    }
}

pub(crate) const fn rest_tick_phase(checked: bool) -> f32 {
    if checked {
        TICK_PHASE_VISIBLE
    } else {
        TICK_PHASE_HIDDEN
    }
}
