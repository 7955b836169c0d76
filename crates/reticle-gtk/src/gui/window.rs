use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use reticle::{DeviceIdentifier, DeviceProfile};

pub const DEFAULT_SIZE: (i32, i32) = (960, 720);

/// Session variables naming the running desktop, most specific first.
const DESKTOP_VARS: [&str; 2] = ["XDG_CURRENT_DESKTOP", "XDG_SESSION_DESKTOP"];

fn primary_monitor(display: &gdk::Display) -> Option<gdk::Monitor> {
    display
        .monitors()
        .item(0)
        .and_then(|item| item.downcast::<gdk::Monitor>().ok())
}

fn desktop_identifier() -> DeviceIdentifier {
    DESKTOP_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .map(DeviceIdentifier::from)
        .unwrap_or_default()
}

/// Probe the display once for the inputs mobile detection needs.
pub fn device_profile() -> DeviceProfile {
    let display = gdk::Display::default();

    let has_touch = display
        .as_ref()
        .and_then(|d| d.default_seat())
        .is_some_and(|seat| seat.capabilities().contains(gdk::SeatCapabilities::TOUCH));

    let viewport_width = display
        .as_ref()
        .and_then(primary_monitor)
        .map(|m| m.geometry().width() as f64)
        .unwrap_or(DEFAULT_SIZE.0 as f64);

    let profile = DeviceProfile {
        has_touch,
        viewport_width,
        identifier: desktop_identifier(),
    };
    log::debug!("Device profile: {:?}", profile);
    profile
}

pub fn set_platform_pointer_hidden(widget: &impl IsA<gtk::Widget>, hidden: bool) {
    widget.set_cursor_from_name(hidden.then_some("none"));
}
