use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::event::{GestureEvent, GestureTransition, InputEvent, InputOutcome};
use super::listeners::{ListenerId, Listeners};
use super::model::{rest_tick_phase, GesturePhase, TICK_PHASE_HIDDEN, TICK_PHASE_VISIBLE};
use crate::animation::{
    AnimationEngine, AnimationFrame, AnimationHandle, AnimationKind, DeferredTimer, FiredTimer,
    TimerToken,
};

pub const FULL_SWEEP_DEGREES: f32 = 360.0;
const TRANSITION_HISTORY_LIMIT: usize = 32;

/// Owns the checked state, the hold timer and both animation handles.
///
/// All methods take the current frame time explicitly; the machine never
/// reads a clock on its own.
#[derive(Debug)]
pub struct GestureMachine {
    phase: GesturePhase,
    checked: bool,
    enabled: bool,
    hold_duration_ms: u64,
    tick_animation_ms: u64,
    animations: AnimationEngine,
    flip_timer: DeferredTimer,
    pending_flip: Option<TimerToken>,
    sweep: Option<AnimationHandle>,
    reveal: Option<AnimationHandle>,
    sweep_angle: f32,
    tick_phase: f32,
    redraw_requested: bool,
    checked_listeners: Listeners<bool>,
    transition_history: VecDeque<GestureTransition>,
}

impl GestureMachine {
    pub fn new(checked: bool, enabled: bool, hold_duration_ms: u64, tick_animation_ms: u64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            checked,
            enabled,
            hold_duration_ms,
            tick_animation_ms,
            animations: AnimationEngine::new(),
            flip_timer: DeferredTimer::new(),
            pending_flip: None,
            sweep: None,
            reveal: None,
            sweep_angle: 0.0,
            tick_phase: rest_tick_phase(checked),
            redraw_requested: false,
            checked_listeners: Listeners::new(),
            transition_history: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hold_duration_ms(&self) -> u64 {
        self.hold_duration_ms
    }

    pub fn tick_animation_ms(&self) -> u64 {
        self.tick_animation_ms
    }

    /// Current progress arc sweep in degrees, `0..=360`.
    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    /// Current dash phase of the tick, `-1..=1`. `0` draws the whole tick.
    pub fn tick_phase(&self) -> f32 {
        self.tick_phase
    }

    /// Visible share of the tick stroke, `0..=1`.
    pub fn reveal_fraction(&self) -> f32 {
        (1.0 - self.tick_phase.abs()).clamp(0.0, 1.0)
    }

    /// True while a hold timer or any animation still needs frames.
    pub fn needs_frames(&self) -> bool {
        self.pending_flip.is_some() || self.animations.has_active()
    }

    pub fn has_active_animation(&self) -> bool {
        self.animations.has_active()
    }

    /// Applies to the next hold; an in-flight hold keeps its original deadline.
    pub fn set_hold_duration_ms(&mut self, hold_duration_ms: u64) {
        self.hold_duration_ms = hold_duration_ms;
    }

    pub fn set_tick_animation_ms(&mut self, tick_animation_ms: u64) {
        self.tick_animation_ms = tick_animation_ms;
    }

    pub fn add_checked_listener(&mut self, listener: impl FnMut(bool) + 'static) -> ListenerId {
        self.checked_listeners.add(listener)
    }

    pub fn remove_checked_listener(&mut self, id: ListenerId) -> bool {
        self.checked_listeners.remove(id)
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> InputOutcome {
        if !self.enabled {
            tracing::trace!(?event, "input consumed while disabled");
            return InputOutcome::Disabled;
        }

        match (self.phase, event) {
            (GesturePhase::Idle, InputEvent::PressBegin) => self.begin_hold(now_ms),
            (GesturePhase::Holding, InputEvent::PressEnd) => {
                self.abort_hold(GestureEvent::Release);
                InputOutcome::HoldAborted
            }
            (GesturePhase::Holding, InputEvent::PressCancel) => {
                self.abort_hold(GestureEvent::Cancel);
                InputOutcome::HoldAborted
            }
            (phase, event) => {
                tracing::trace!(?phase, ?event, "input ignored");
                InputOutcome::Ignored
            }
        }
    }

    /// Fires a due hold timer, then steps both animations to `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> StateResult<()> {
        if let Some(fired) = self.flip_timer.poll(now_ms) {
            self.on_flip_timer(fired)?;
        }
        for frame in self.animations.advance(now_ms) {
            self.apply_frame(frame)?;
        }
        Ok(())
    }

    /// Programmatic toggle. Returns `false` (and does nothing) when unchanged.
    pub fn set_checked(&mut self, checked: bool, animate: bool, now_ms: u64) -> bool {
        if checked == self.checked {
            return false;
        }
        if self.phase.is_holding() {
            self.revoke_flip();
            self.stop_sweep();
        }

        self.checked = checked;
        if animate {
            self.start_reveal(now_ms);
            self.transition(GestureEvent::SetChecked, GesturePhase::Settling);
        } else {
            self.cancel_reveal();
            self.tick_phase = rest_tick_phase(checked);
            self.redraw_requested = true;
            self.transition(GestureEvent::SetChecked, GesturePhase::Idle);
        }
        self.checked_listeners.notify(checked);
        true
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.phase.is_holding() {
            self.abort_hold(GestureEvent::Disable);
        }
        self.enabled = enabled;
    }

    /// Drops the timer and both animations and snaps visuals to the resting
    /// state for the current `checked` value.
    pub fn reset_to_rest(&mut self) {
        self.pending_flip = None;
        self.flip_timer.cancel_all();
        self.sweep = None;
        self.reveal = None;
        self.animations.cancel_all();
        self.sweep_angle = 0.0;
        self.tick_phase = rest_tick_phase(self.checked);
        self.redraw_requested = true;
        if self.phase != GesturePhase::Idle {
            self.transition(GestureEvent::Reset, GesturePhase::Idle);
        }
    }

    /// Replaces checked/enabled without notifying listeners.
    pub fn restore(&mut self, checked: bool, enabled: bool) {
        self.checked = checked;
        self.enabled = enabled;
        self.reset_to_rest();
    }

    fn begin_hold(&mut self, now_ms: u64) -> InputOutcome {
        if self.hold_duration_ms == 0 {
            self.flip(now_ms, GestureEvent::Press);
            return InputOutcome::Toggled;
        }

        self.sweep_angle = 0.0;
        self.sweep = Some(self.animations.start(
            AnimationKind::ProgressSweep,
            0.0,
            FULL_SWEEP_DEGREES,
            self.hold_duration_ms,
            now_ms,
        ));
        self.pending_flip = Some(self.flip_timer.schedule(now_ms, self.hold_duration_ms));
        self.redraw_requested = true;
        self.transition(GestureEvent::Press, GesturePhase::Holding);
        InputOutcome::HoldStarted
    }

    fn abort_hold(&mut self, event: GestureEvent) {
        self.revoke_flip();
        self.stop_sweep();
        self.transition(event, GesturePhase::Idle);
    }

    fn revoke_flip(&mut self) {
        if let Some(token) = self.pending_flip.take() {
            self.flip_timer.cancel(token);
        }
    }

    fn stop_sweep(&mut self) {
        if let Some(handle) = self.sweep.take() {
            self.animations.cancel(handle);
        }
        self.sweep_angle = 0.0;
        self.redraw_requested = true;
    }

    fn cancel_reveal(&mut self) {
        if let Some(handle) = self.reveal.take() {
            self.animations.cancel(handle);
        }
    }

    fn start_reveal(&mut self, now_ms: u64) {
        let (from, to) = if self.checked {
            (TICK_PHASE_HIDDEN, TICK_PHASE_VISIBLE)
        } else {
            (TICK_PHASE_VISIBLE, -TICK_PHASE_HIDDEN)
        };
        self.tick_phase = from;
        self.reveal = Some(self.animations.start(
            AnimationKind::TickReveal,
            from,
            to,
            self.tick_animation_ms,
            now_ms,
        ));
        self.redraw_requested = true;
    }

    fn flip(&mut self, at_ms: u64, event: GestureEvent) {
        self.checked = !self.checked;
        self.stop_sweep();
        self.start_reveal(at_ms);
        self.transition(event, GesturePhase::Settling);
        tracing::debug!(checked = self.checked, "checked state flipped");
        self.checked_listeners.notify(self.checked);
    }

    fn on_flip_timer(&mut self, fired: FiredTimer) -> StateResult<()> {
        if self.pending_flip != Some(fired.token) {
            tracing::error!(token = fired.token.id(), "deferred flip fired after revocation");
            return Err(StateError::LateDeferredFlip { token: fired.token });
        }
        self.pending_flip = None;
        self.flip(fired.deadline_ms, GestureEvent::HoldElapsed);
        Ok(())
    }

    fn apply_frame(&mut self, frame: AnimationFrame) -> StateResult<()> {
        let handle = frame.handle;
        let expected = match handle.kind() {
            AnimationKind::ProgressSweep => self.sweep,
            AnimationKind::TickReveal => self.reveal,
        };
        if expected != Some(handle) {
            tracing::error!(
                kind = ?handle.kind(),
                generation = handle.generation(),
                "animation frame delivered through a retired handle"
            );
            return Err(StateError::StaleAnimationFrame {
                kind: handle.kind(),
                generation: handle.generation(),
            });
        }

        tracing::trace!(kind = ?handle.kind(), value = frame.value, terminal = frame.terminal, "animation frame");
        match handle.kind() {
            AnimationKind::ProgressSweep => {
                self.sweep_angle = frame.value;
                if frame.terminal {
                    self.sweep = None;
                }
            }
            AnimationKind::TickReveal => {
                self.tick_phase = frame.value;
                if frame.terminal {
                    self.reveal = None;
                    if self.phase == GesturePhase::Settling {
                        self.transition(GestureEvent::RevealFinished, GesturePhase::Idle);
                    }
                }
            }
        }
        self.redraw_requested = true;
        Ok(())
    }

    fn transition(&mut self, event: GestureEvent, next: GesturePhase) {
        tracing::debug!(from = ?self.phase, event = ?event, to = ?next, "gesture transition");
        let record = GestureTransition::new(Some(self.phase), event, next);
        self.phase = next;
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history.push_back(record);
    }
}

#[cfg(test)]
impl GestureMachine {
    fn history(&self) -> Vec<GestureTransition> {
        self.transition_history.iter().copied().collect()
    }
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(false, true, 1000, 200)
    }
}

impl std::fmt::Display for GestureMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GesturePhase::{:?} (checked={})",
            self.phase, self.checked
        )
    }
}
