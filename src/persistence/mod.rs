//! Save/restore of the control across a destroy/recreate cycle.
//!
//! Only configuration and the checked/enabled flags travel; geometry and
//! animation state are rebuilt on the other side.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::HoldTickConfig;
use crate::geometry::ArgbColor;

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode persisted state")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode persisted state")]
    Decode(#[from] serde_json::Error),
    #[error("persisted state is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub checked: bool,
    pub enabled: bool,
    pub checked_color: ArgbColor,
    pub unchecked_color: ArgbColor,
    pub shadow_color: ArgbColor,
    pub shadow_radius: f32,
    pub tick_color: Option<ArgbColor>,
    pub tick_animation_ms: u64,
    pub hold_duration_ms: u64,
}

impl PersistedState {
    pub fn capture(config: &HoldTickConfig, checked: bool, enabled: bool) -> Self {
        Self {
            checked,
            enabled,
            checked_color: config.checked_color,
            unchecked_color: config.unchecked_color,
            shadow_color: config.shadow_color,
            shadow_radius: config.shadow_radius(),
            tick_color: config.tick_color,
            tick_animation_ms: config.tick_animation_ms,
            hold_duration_ms: config.hold_duration_ms,
        }
    }

    /// Writes every field into `config`; the caller still owns pushing
    /// `checked` and `enabled` into the live state machine.
    pub fn apply_to(&self, config: &mut HoldTickConfig) {
        config.checked_color = self.checked_color;
        config.unchecked_color = self.unchecked_color;
        config.shadow_color = self.shadow_color;
        if is_valid_shadow_radius(self.shadow_radius) {
            config.set_shadow_radius(self.shadow_radius);
        } else {
            tracing::warn!(
                shadow_radius = self.shadow_radius,
                "persisted shadow radius out of range; keeping current value"
            );
        }
        config.tick_color = self.tick_color;
        config.tick_animation_ms = self.tick_animation_ms;
        config.hold_duration_ms = self.hold_duration_ms;
        config.checked = self.checked;
        config.enabled = self.enabled;
    }

    pub fn to_bytes(&self) -> PersistenceResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(PersistenceError::Encode)
    }

    /// Strict decode: every field must be present and well-formed.
    pub fn from_bytes(bytes: &[u8]) -> PersistenceResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Lenient decode: a missing or malformed field keeps its value from `fallback`.
    pub fn decode_over(bytes: &[u8], fallback: &PersistedState) -> PersistenceResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(fields) = value else {
            return Err(PersistenceError::NotAnObject);
        };

        let shadow_radius = field_or(&fields, "shadow_radius", fallback.shadow_radius);
        let shadow_radius = if is_valid_shadow_radius(shadow_radius) {
            shadow_radius
        } else {
            tracing::warn!(shadow_radius, "persisted shadow radius out of range; keeping current value");
            fallback.shadow_radius
        };

        Ok(Self {
            checked: field_or(&fields, "checked", fallback.checked),
            enabled: field_or(&fields, "enabled", fallback.enabled),
            checked_color: field_or(&fields, "checked_color", fallback.checked_color),
            unchecked_color: field_or(&fields, "unchecked_color", fallback.unchecked_color),
            shadow_color: field_or(&fields, "shadow_color", fallback.shadow_color),
            shadow_radius,
            tick_color: field_or(&fields, "tick_color", fallback.tick_color),
            tick_animation_ms: field_or(&fields, "tick_animation_ms", fallback.tick_animation_ms),
            hold_duration_ms: field_or(&fields, "hold_duration_ms", fallback.hold_duration_ms),
        })
    }
}

fn is_valid_shadow_radius(radius: f32) -> bool {
    radius.is_finite() && radius >= 0.0
}

fn field_or<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str, fallback: T) -> T {
    let Some(value) = fields.get(key) else {
        tracing::warn!(field = key, "persisted field missing; keeping current value");
        return fallback;
    };
    T::deserialize(value).unwrap_or_else(|err| {
        tracing::warn!(field = key, %err, "persisted field malformed; keeping current value");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> PersistedState {
        PersistedState {
            checked: true,
            enabled: false,
            checked_color: ArgbColor(0xFF00_FF00),
            unchecked_color: ArgbColor(0xFF11_1111),
            shadow_color: ArgbColor(0x4400_0000),
            shadow_radius: 6.0,
            tick_color: Some(ArgbColor(0xFFFF_FFFF)),
            tick_animation_ms: 350,
            hold_duration_ms: 1500,
        }
    }

    #[test]
    fn bytes_restore_verbatim() {
        let state = sample_state();
        let bytes = state.to_bytes().expect("state should encode");

        let restored = PersistedState::from_bytes(&bytes).expect("state should decode");
        assert_eq!(restored, state);
    }

    #[test]
    fn capture_and_apply_carry_every_style_field() {
        let mut source = HoldTickConfig::default();
        source.tick_color = Some(ArgbColor(0xFF12_3456));
        source.hold_duration_ms = 2500;
        source.set_shadow_radius(9.0);
        let state = PersistedState::capture(&source, true, false);

        let mut target = HoldTickConfig::default();
        state.apply_to(&mut target);
        assert_eq!(target.tick_color, Some(ArgbColor(0xFF12_3456)));
        assert_eq!(target.hold_duration_ms, 2500);
        assert_eq!(target.shadow_radius(), 9.0);
        assert!(target.checked);
        assert!(!target.enabled);
    }

    #[test]
    fn apply_keeps_current_shadow_radius_when_persisted_one_is_invalid() {
        for invalid in [-3.0, f32::NAN, f32::INFINITY] {
            let mut state = sample_state();
            state.shadow_radius = invalid;
            let mut target = HoldTickConfig::default();
            target.set_shadow_radius(7.0);

            state.apply_to(&mut target);
            assert_eq!(target.shadow_radius(), 7.0);
            assert_eq!(target.hold_duration_ms, 1500);
        }
    }

    #[test]
    fn strict_decode_rejects_missing_fields() {
        let err = PersistedState::from_bytes(br#"{ "checked": true }"#)
            .expect_err("partial state must fail strict decode");
        assert!(matches!(err, PersistenceError::Decode(_)));
    }

    #[test]
    fn lenient_decode_keeps_fallback_for_missing_and_malformed_fields() {
        let fallback = sample_state();
        let bytes = br##"{
            "checked": false,
            "checked_color": "not-a-color",
            "shadow_radius": -2.0,
            "hold_duration_ms": "soon",
            "tick_animation_ms": 90
        }"##;

        let restored = PersistedState::decode_over(bytes, &fallback).expect("object should decode");
        assert!(!restored.checked);
        assert_eq!(restored.tick_animation_ms, 90);
        assert_eq!(restored.checked_color, fallback.checked_color);
        assert_eq!(restored.shadow_radius, fallback.shadow_radius);
        assert_eq!(restored.hold_duration_ms, fallback.hold_duration_ms);
        assert_eq!(restored.enabled, fallback.enabled);
        assert_eq!(restored.tick_color, fallback.tick_color);
    }

    #[test]
    fn lenient_decode_accepts_explicit_null_tick_color() {
        let fallback = sample_state();
        let restored = PersistedState::decode_over(br#"{ "tick_color": null }"#, &fallback)
            .expect("object should decode");
        assert_eq!(restored.tick_color, None);
    }

    #[test]
    fn lenient_decode_rejects_non_objects() {
        let fallback = sample_state();
        assert!(matches!(
            PersistedState::decode_over(b"[1, 2]", &fallback),
            Err(PersistenceError::NotAnObject)
        ));
        assert!(matches!(
            PersistedState::decode_over(b"{ truncated", &fallback),
            Err(PersistenceError::Decode(_))
        ));
    }
}
