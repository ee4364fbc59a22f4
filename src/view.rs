//! Host-facing facade tying configuration, geometry, gestures and rendering together.

use crate::clock::{FrameClock, SystemFrameClock};
use crate::config::HoldTickConfig;
use crate::error::HoldTickResult;
use crate::geometry::{recompute, GeometryRatios, GeometrySnapshot};
use crate::persistence::{PersistedState, PersistenceResult};
use crate::render::{build_scene, AnimatedValues, RenderScene};
use crate::state::{GestureMachine, GesturePhase, InputEvent, InputOutcome, ListenerId, Listeners};

pub struct HoldTickView<C: FrameClock = SystemFrameClock> {
    clock: C,
    config: HoldTickConfig,
    machine: GestureMachine,
    ratios: GeometryRatios,
    size: f32,
    geometry: GeometrySnapshot,
    repaint_listeners: Listeners<()>,
}

impl HoldTickView<SystemFrameClock> {
    pub fn new(config: HoldTickConfig) -> Self {
        Self::with_clock(config, SystemFrameClock::new())
    }
}

impl<C: FrameClock> HoldTickView<C> {
    pub fn with_clock(config: HoldTickConfig, clock: C) -> Self {
        let machine = GestureMachine::new(
            config.checked,
            config.enabled,
            config.hold_duration_ms,
            config.tick_animation_ms,
        );
        let ratios = GeometryRatios::default();
        Self {
            clock,
            geometry: recompute(0.0, config.shadow_radius(), &ratios),
            config,
            machine,
            ratios,
            size: 0.0,
            repaint_listeners: Listeners::new(),
        }
    }

    pub fn config(&self) -> &HoldTickConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.geometry
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_checked(&self) -> bool {
        self.machine.is_checked()
    }

    pub fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    pub fn phase(&self) -> GesturePhase {
        self.machine.phase()
    }

    pub fn sweep_angle(&self) -> f32 {
        self.machine.sweep_angle()
    }

    pub fn tick_phase(&self) -> f32 {
        self.machine.tick_phase()
    }

    pub fn reveal_fraction(&self) -> f32 {
        self.machine.reveal_fraction()
    }

    pub fn has_active_animation(&self) -> bool {
        self.machine.has_active_animation()
    }

    /// Hosts keep delivering frames while this is true.
    pub fn needs_frames(&self) -> bool {
        self.machine.needs_frames()
    }

    pub fn add_checked_change_listener(
        &mut self,
        listener: impl FnMut(bool) + 'static,
    ) -> ListenerId {
        self.machine.add_checked_listener(listener)
    }

    pub fn remove_checked_change_listener(&mut self, id: ListenerId) -> bool {
        self.machine.remove_checked_listener(id)
    }

    pub fn add_repaint_listener(&mut self, mut listener: impl FnMut() + 'static) -> ListenerId {
        self.repaint_listeners.add(move |()| listener())
    }

    pub fn remove_repaint_listener(&mut self, id: ListenerId) -> bool {
        self.repaint_listeners.remove(id)
    }

    /// The control is square; the smaller side wins.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        self.size = width.min(height).max(0.0);
        self.recompute_geometry();
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let outcome = self.machine.handle_input(event, self.clock.now_millis());
        self.sync_from_machine();
        outcome
    }

    /// Frame tick from the host: fires the hold timer and steps animations.
    pub fn on_frame(&mut self) -> HoldTickResult<()> {
        let result = self.machine.advance(self.clock.now_millis());
        self.sync_from_machine();
        Ok(result?)
    }

    pub fn set_checked(&mut self, checked: bool, animate: bool) -> bool {
        let changed = self
            .machine
            .set_checked(checked, animate, self.clock.now_millis());
        self.sync_from_machine();
        changed
    }

    pub fn toggle(&mut self, animate: bool) {
        let next = !self.machine.is_checked();
        self.set_checked(next, animate);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.machine.set_enabled(enabled);
        self.sync_from_machine();
    }

    /// Replaces style and durations, keeping the checked value. Any in-flight
    /// gesture or animation is abandoned.
    pub fn reconfigure(&mut self, mut config: HoldTickConfig) {
        config.checked = self.machine.is_checked();
        let shadow_changed = config.shadow_radius() != self.config.shadow_radius();
        self.machine.set_hold_duration_ms(config.hold_duration_ms);
        self.machine.set_tick_animation_ms(config.tick_animation_ms);
        self.machine.set_enabled(config.enabled);
        self.machine.reset_to_rest();
        self.config = config;
        if shadow_changed {
            self.recompute_geometry();
        }
        self.sync_from_machine();
    }

    pub fn render(&self) -> RenderScene {
        build_scene(
            self.size,
            &self.geometry,
            &self.config,
            AnimatedValues {
                checked: self.machine.is_checked(),
                sweep_angle: self.machine.sweep_angle(),
                tick_phase: self.machine.tick_phase(),
            },
        )
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState::capture(
            &self.config,
            self.machine.is_checked(),
            self.machine.is_enabled(),
        )
    }

    /// Applies a snapshot without notifying checked-change listeners and
    /// without leaving any animation running.
    pub fn restore(&mut self, state: &PersistedState) {
        let previous_shadow = self.config.shadow_radius();
        state.apply_to(&mut self.config);
        self.machine.set_hold_duration_ms(self.config.hold_duration_ms);
        self.machine.set_tick_animation_ms(self.config.tick_animation_ms);
        self.machine.restore(state.checked, state.enabled);
        tracing::debug!(checked = state.checked, enabled = state.enabled, "view state restored");
        if self.config.shadow_radius() != previous_shadow {
            self.recompute_geometry();
        }
        self.sync_from_machine();
    }

    pub fn save_state_bytes(&self) -> PersistenceResult<Vec<u8>> {
        self.snapshot().to_bytes()
    }

    /// Restores from bytes; fields that are missing or malformed keep their current values.
    pub fn restore_state_bytes(&mut self, bytes: &[u8]) -> PersistenceResult<()> {
        let state = PersistedState::decode_over(bytes, &self.snapshot())?;
        self.restore(&state);
        Ok(())
    }

    fn recompute_geometry(&mut self) {
        self.geometry = recompute(self.size, self.config.shadow_radius(), &self.ratios);
        tracing::trace!(size = self.size, tick_length = self.geometry.tick_length, "geometry recomputed");
        self.repaint_listeners.notify(());
    }

    /// Mirrors the live toggle state into `config` and forwards a pending redraw.
    fn sync_from_machine(&mut self) {
        self.config.checked = self.machine.is_checked();
        self.config.enabled = self.machine.is_enabled();
        if self.machine.take_redraw_request() {
            self.repaint_listeners.notify(());
        }
    }
}

impl<C: FrameClock> std::fmt::Debug for HoldTickView<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldTickView")
            .field("config", &self.config)
            .field("machine", &self.machine)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
