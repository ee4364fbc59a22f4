use gtk4::cairo;

use crate::geometry::{ArgbColor, Point};
use crate::render::{ArcStroke, CircleStroke, RenderScene, Shadow, TickStroke};

fn set_source_argb(context: &cairo::Context, color: ArgbColor) {
    let (red, green, blue, alpha) = color.to_rgba_f64();
    context.set_source_rgba(red, green, blue, alpha);
}

pub(super) fn draw_scene(context: &cairo::Context, scene: &RenderScene) {
    if scene.size <= 0.0 {
        return;
    }
    context.save().ok();
    context.set_line_cap(cairo::LineCap::Round);
    context.set_line_join(cairo::LineJoin::Round);
    draw_base_circle(context, &scene.base_circle);
    if let Some(arc) = &scene.progress_arc {
        draw_progress_arc(context, arc);
    }
    draw_tick(context, &scene.tick);
    context.restore().ok();
}

/// Cairo has no blur; the shadow is a wider translucent under-stroke.
fn stroke_with_shadow(context: &cairo::Context, shadow: Shadow, color: ArgbColor, width: f32) {
    if shadow.radius > 0.0 && shadow.color.alpha() > 0 {
        set_source_argb(context, shadow.color);
        context.set_line_width(f64::from(width + shadow.radius));
        let _ = context.stroke_preserve();
    }
    set_source_argb(context, color);
    context.set_line_width(f64::from(width));
    let _ = context.stroke();
}

fn draw_base_circle(context: &cairo::Context, circle: &CircleStroke) {
    if circle.radius <= 0.0 {
        return;
    }
    context.new_path();
    context.arc(
        f64::from(circle.center.x),
        f64::from(circle.center.y),
        f64::from(circle.radius),
        0.0,
        std::f64::consts::TAU,
    );
    stroke_with_shadow(context, circle.shadow, circle.color, circle.stroke_width);
}

fn draw_progress_arc(context: &cairo::Context, arc: &ArcStroke) {
    if arc.radius <= 0.0 {
        return;
    }
    let start = f64::from(arc.start_angle).to_radians();
    let end = f64::from(arc.start_angle + arc.sweep_angle).to_radians();
    context.new_path();
    let (x, y, radius) = (
        f64::from(arc.center.x),
        f64::from(arc.center.y),
        f64::from(arc.radius),
    );
    if arc.sweep_angle < 0.0 {
        context.arc_negative(x, y, radius, start, end);
    } else {
        context.arc(x, y, radius, start, end);
    }
    set_source_argb(context, arc.color);
    context.set_line_width(f64::from(arc.stroke_width));
    let _ = context.stroke();
}

fn draw_tick(context: &cairo::Context, tick: &TickStroke) {
    if tick.dash.period <= 0.0 || tick.dash.visible_length() <= 0.0 {
        return;
    }
    let period = f64::from(tick.dash.period);
    context.save().ok();
    context.set_dash(&[period, period], f64::from(tick.dash.normalized_offset()));
    trace_polyline(context, &tick.points);
    stroke_with_shadow(context, tick.shadow, tick.color, tick.stroke_width);
    context.restore().ok();
}

fn trace_polyline(context: &cairo::Context, points: &[Point]) {
    context.new_path();
    let mut points = points.iter();
    if let Some(first) = points.next() {
        context.move_to(f64::from(first.x), f64::from(first.y));
    }
    for point in points {
        context.line_to(f64::from(point.x), f64::from(point.y));
    }
}
