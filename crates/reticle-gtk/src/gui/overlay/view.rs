use super::{DOT_RADIUS, RING_RADIUS, RING_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use reticle::{BracketMetrics, Corner, CursorFrame, Phase, Point};
use std::f64::consts::PI;
use strum::IntoEnumIterator;

/// Axis-aligned rectangle as `(x, y, width, height)`.
pub type Bar = (f64, f64, f64, f64);

/// The two strokes forming the L of one bracket whose box starts at `origin`.
pub fn bracket_bars(corner: Corner, origin: Point, metrics: &BracketMetrics) -> [Bar; 2] {
    let (b, c) = (metrics.border_width, metrics.corner_size);
    let (x, y) = (origin.x, origin.y);
    let (top, bottom) = ((x, y, c, b), (x, y + c - b, c, b));
    let (left, right) = ((x, y, b, c), (x + c - b, y, b, c));

    match corner {
        Corner::TopLeft => [top, left],
        Corner::TopRight => [top, right],
        Corner::BottomRight => [bottom, right],
        Corner::BottomLeft => [bottom, left],
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    frame: &CursorFrame,
    metrics: &BracketMetrics,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(frame.position.x, frame.position.y);
    cr.rotate(frame.rotation.to_radians());
    cr.scale(frame.scale, frame.scale);

    set_source(cr, colors.brackets);
    for corner in Corner::iter() {
        let origin = frame.corners[corner.as_index()];
        for (x, y, w, h) in bracket_bars(corner, origin, metrics) {
            cr.rectangle(x, y, w, h);
        }
    }
    cr.fill()?;

    if frame.phase == Phase::Idle {
        set_source(cr, colors.ring);
        cr.set_line_width(RING_WIDTH);
        cr.arc(0.0, 0.0, RING_RADIUS, 0.0, 2.0 * PI);
        cr.stroke()?;
    }

    set_source(cr, colors.dot);
    cr.arc(0.0, 0.0, DOT_RADIUS * frame.dot_scale, 0.0, 2.0 * PI);
    cr.fill()?;

    cr.restore()
}
