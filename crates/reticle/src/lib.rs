//! A headless target-lock cursor.
//!
//! The cursor follows the pointer with a spinning body and four corner
//! brackets. Hovering or pressing an element marked as lockable makes the
//! brackets frame it until the pointer leaves, the content scrolls away or the
//! element disappears. Hosts supply the element tree and the frame clock and
//! draw the [`CursorFrame`] the engine hands back.

pub mod macros;

pub mod engine;
pub mod environment;
pub mod geometry;
pub mod options;
pub mod spin;
pub mod tree;
pub mod tween;

pub use engine::{CursorEngine, CursorFrame, EngageMode, EngagementSession, Phase};
pub use environment::{DeviceIdentifier, DeviceProfile, MobileSignature};
pub use geometry::{BracketMetrics, Corner, Corners, Point, Rect};
pub use options::{CursorOptions, OptionsError, TargetSelector};
pub use tree::ElementTree;
