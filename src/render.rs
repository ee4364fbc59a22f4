//! Per-frame description handed to the rasterizer.

use crate::config::HoldTickConfig;
use crate::geometry::{ArgbColor, Bounds, GeometrySnapshot, Point};

/// Arc start, in degrees clockwise from the positive x axis (y pointing down).
pub const PROGRESS_START_ANGLE: f32 = 315.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: ArgbColor,
    pub radius: f32,
}

/// Two-interval dash (`period` on, `period` off) shifted by `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub period: f32,
    pub offset: f32,
}

impl DashPattern {
    /// `offset` folded into `0..2*period`, for rasterizers that reject negative offsets.
    pub fn normalized_offset(&self) -> f32 {
        let cycle = self.period * 2.0;
        if cycle <= 0.0 {
            return 0.0;
        }
        self.offset.rem_euclid(cycle)
    }

    /// Length of the path drawn under this pattern, for a path as long as `period`.
    pub fn visible_length(&self) -> f32 {
        let offset = self.normalized_offset();
        if offset <= self.period {
            self.period - offset
        } else {
            offset - self.period
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStroke {
    pub center: Point,
    pub radius: f32,
    pub stroke_width: f32,
    pub color: ArgbColor,
    pub shadow: Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f32,
    pub bounds: Bounds,
    pub stroke_width: f32,
    pub start_angle: f32,
    /// Negative: the arc grows counter-clockwise from `start_angle`.
    pub sweep_angle: f32,
    pub color: ArgbColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickStroke {
    pub points: Vec<Point>,
    pub stroke_width: f32,
    pub color: ArgbColor,
    pub dash: DashPattern,
    pub shadow: Shadow,
}

/// Draw order: base circle, progress arc, tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub size: f32,
    pub base_circle: CircleStroke,
    pub progress_arc: Option<ArcStroke>,
    pub tick: TickStroke,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValues {
    pub checked: bool,
    pub sweep_angle: f32,
    pub tick_phase: f32,
}

pub fn build_scene(
    size: f32,
    geometry: &GeometrySnapshot,
    config: &HoldTickConfig,
    values: AnimatedValues,
) -> RenderScene {
    let shadow = Shadow {
        color: config.shadow_color,
        radius: config.shadow_radius(),
    };
    let (base_color, progress_color) = if values.checked {
        (config.checked_color, config.unchecked_color)
    } else {
        (config.unchecked_color, config.checked_color)
    };

    let progress_arc = (values.sweep_angle != 0.0).then(|| ArcStroke {
        center: geometry.circle_center,
        radius: geometry.circle_radius,
        bounds: geometry.circle_bounds(),
        stroke_width: geometry.circle_stroke_width,
        start_angle: PROGRESS_START_ANGLE,
        sweep_angle: -values.sweep_angle,
        color: progress_color,
    });

    RenderScene {
        size,
        base_circle: CircleStroke {
            center: geometry.circle_center,
            radius: geometry.circle_radius,
            stroke_width: geometry.circle_stroke_width,
            color: base_color,
            shadow,
        },
        progress_arc,
        tick: TickStroke {
            points: geometry.tick_path.clone(),
            stroke_width: geometry.tick_stroke_width,
            color: config.tick_color(),
            dash: DashPattern {
                period: geometry.tick_length,
                offset: values.tick_phase * geometry.tick_length,
            },
            shadow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{recompute, GeometryRatios};

    fn scene(checked: bool, sweep_angle: f32, tick_phase: f32) -> RenderScene {
        let geometry = recompute(100.0, 4.0, &GeometryRatios::default());
        build_scene(
            100.0,
            &geometry,
            &HoldTickConfig::default(),
            AnimatedValues {
                checked,
                sweep_angle,
                tick_phase,
            },
        )
    }

    #[test]
    fn resting_unchecked_scene_has_no_arc_and_hidden_tick() {
        let scene = scene(false, 0.0, 1.0);

        assert!(scene.progress_arc.is_none());
        assert_eq!(scene.base_circle.color, ArgbColor(0xFF75_7575));
        assert_eq!(scene.tick.dash.offset, scene.tick.dash.period);
        assert_eq!(scene.tick.dash.visible_length(), 0.0);
    }

    #[test]
    fn progress_arc_uses_opposite_state_color_and_negated_sweep() {
        let scene = scene(false, 90.0, 1.0);
        let arc = scene.progress_arc.expect("sweep should draw an arc");

        assert_eq!(arc.start_angle, 315.0);
        assert_eq!(arc.sweep_angle, -90.0);
        assert_eq!(arc.color, ArgbColor(0xFF43_A047));
        assert_eq!(arc.radius, scene.base_circle.radius);

        let checked_arc = self::scene(true, 90.0, 0.0)
            .progress_arc
            .expect("sweep should draw an arc");
        assert_eq!(checked_arc.color, ArgbColor(0xFF75_7575));
    }

    #[test]
    fn checked_scene_draws_full_tick_with_shadow() {
        let scene = scene(true, 0.0, 0.0);

        assert_eq!(scene.base_circle.color, ArgbColor(0xFF43_A047));
        assert_eq!(scene.tick.dash.offset, 0.0);
        assert_eq!(scene.tick.dash.visible_length(), scene.tick.dash.period);
        assert_eq!(scene.tick.shadow.radius, 4.0);
        assert_eq!(scene.tick.color, ArgbColor(0xFF43_A047));
    }

    #[test]
    fn negative_phase_mirrors_into_second_interval() {
        let dash = DashPattern {
            period: 10.0,
            offset: -2.5,
        };
        assert_eq!(dash.normalized_offset(), 17.5);
        assert_eq!(dash.visible_length(), 7.5);

        let erased = DashPattern {
            period: 10.0,
            offset: -10.0,
        };
        assert_eq!(erased.visible_length(), 0.0);
    }

    #[test]
    fn zero_period_dash_is_inert() {
        let dash = DashPattern {
            period: 0.0,
            offset: 0.0,
        };
        assert_eq!(dash.normalized_offset(), 0.0);
        assert_eq!(dash.visible_length(), 0.0);
    }
}
