pub mod view;

pub use view::draw;

pub const DOT_RADIUS: f64 = 2.0;
/// Ring drawn around the dot while the cursor is idle.
pub const RING_RADIUS: f64 = 9.0;
pub const RING_WIDTH: f64 = 1.5;
