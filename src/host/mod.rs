//! GTK demo host: one `HoldTickView` inside a `DrawingArea`.

mod draw;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, Box as GtkBox, Button, DrawingArea, Label, Orientation,
};

use crate::config::load_config;
use crate::error::HoldTickResult;
use crate::state::InputEvent;
use crate::view::HoldTickView;

const APPLICATION_ID: &str = "io.github.holdtick.demo";
const CONTROL_SIZE: i32 = 160;

type SharedView = Rc<RefCell<HoldTickView>>;

pub fn run() -> HoldTickResult<()> {
    let config = load_config();
    tracing::info!(
        hold_duration_ms = config.hold_duration_ms,
        tick_animation_ms = config.tick_animation_ms,
        "starting gtk demo host"
    );

    let application = Application::new(
        Some(APPLICATION_ID),
        gtk4::gio::ApplicationFlags::NON_UNIQUE,
    );
    application.connect_activate(move |app| {
        let view = Rc::new(RefCell::new(HoldTickView::new(config.clone())));
        build_window(app, &view).present();
    });

    // GTK only sees argv[0].
    let gtk_args = std::env::args().take(1).collect::<Vec<_>>();
    application.run_with_args(&gtk_args);
    Ok(())
}

fn checked_label_text(checked: bool) -> &'static str {
    if checked {
        "Checked"
    } else {
        "Unchecked"
    }
}

fn build_window(app: &Application, view: &SharedView) -> ApplicationWindow {
    let window = ApplicationWindow::new(app);
    window.set_title(Some("HoldTick"));
    window.set_default_size(320, 260);

    let area = DrawingArea::new();
    area.set_content_width(CONTROL_SIZE);
    area.set_content_height(CONTROL_SIZE);
    area.set_hexpand(true);
    area.set_vexpand(true);

    let label = Label::new(Some(checked_label_text(view.borrow().is_checked())));

    {
        let mut view = view.borrow_mut();
        let weak_area = area.downgrade();
        view.add_repaint_listener(move || {
            if let Some(area) = weak_area.upgrade() {
                area.queue_draw();
            }
        });
        let weak_label = label.downgrade();
        view.add_checked_change_listener(move |checked| {
            tracing::info!(checked, "checked state changed");
            if let Some(label) = weak_label.upgrade() {
                label.set_text(checked_label_text(checked));
            }
        });
    }

    connect_drawing(&area, view);
    connect_press_gesture(&area, view);
    connect_frame_ticks(&area, view);

    let toggle_button = Button::with_label("Toggle");
    let view_for_toggle = view.clone();
    toggle_button.connect_clicked(move |_| {
        view_for_toggle.borrow_mut().toggle(true);
    });

    let root = GtkBox::new(Orientation::Vertical, 8);
    root.set_margin_top(16);
    root.set_margin_bottom(16);
    root.append(&area);
    root.append(&label);
    root.append(&toggle_button);
    window.set_child(Some(&root));
    window
}

fn connect_drawing(area: &DrawingArea, view: &SharedView) {
    let view_for_draw = view.clone();
    area.set_draw_func(move |_, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        // Centre the square control in whatever the area was given.
        let side = width.min(height);
        context.save().ok();
        context.translate(
            f64::from(width - side) / 2.0,
            f64::from(height - side) / 2.0,
        );
        draw::draw_scene(context, &view_for_draw.borrow().render());
        context.restore().ok();
    });

    let view_for_resize = view.clone();
    area.connect_resize(move |_, width, height| {
        tracing::debug!(width, height, "control resized");
        view_for_resize
            .borrow_mut()
            .on_size_changed(width as f32, height as f32);
    });
}

fn connect_press_gesture(area: &DrawingArea, view: &SharedView) {
    let press = gtk4::GestureClick::new();
    press.set_button(gtk4::gdk::BUTTON_PRIMARY);

    let view_for_press = view.clone();
    press.connect_pressed(move |_, _, _, _| {
        let outcome = view_for_press
            .borrow_mut()
            .handle_input(InputEvent::PressBegin);
        tracing::debug!(?outcome, "press began");
    });
    let view_for_release = view.clone();
    press.connect_released(move |_, _, _, _| {
        let outcome = view_for_release
            .borrow_mut()
            .handle_input(InputEvent::PressEnd);
        tracing::debug!(?outcome, "press ended");
    });
    let view_for_cancel = view.clone();
    press.connect_cancel(move |_, _| {
        view_for_cancel
            .borrow_mut()
            .handle_input(InputEvent::PressCancel);
    });

    area.add_controller(press);
}

fn connect_frame_ticks(area: &DrawingArea, view: &SharedView) {
    let view = view.clone();
    area.add_tick_callback(move |_, _| {
        let mut view = view.borrow_mut();
        if view.needs_frames() {
            if let Err(err) = view.on_frame() {
                tracing::warn!(%err, "dropped inconsistent animation frame");
            }
        }
        gtk4::glib::ControlFlow::Continue
    });
}
