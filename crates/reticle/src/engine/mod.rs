//! The target-lock cursor engine.
//!
//! [`CursorEngine`] owns every piece of cursor state: the eased pointer
//! position, press feedback, the idle spin, the four bracket offsets and the
//! optional engagement session. The host feeds it pointer, scroll and frame
//! events together with a read-only [`ElementTree`](crate::tree::ElementTree)
//! and draws whatever [`CursorEngine::frame`] returns.
//!
//! Everything runs on one thread. Every handler finishes its state changes
//! before returning, so a frame tick that follows immediately always observes a
//! consistent engine.

mod engagement;
mod router;
mod tracking;

#[cfg(test)]
mod tests;

use crate::environment::DeviceProfile;
use crate::geometry::{BracketMetrics, Corner, Corners, Point};
use crate::options::{CursorOptions, OptionsError};
use crate::spin::SpinSession;
use crate::tween::Animated;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumCount};

pub const SUPPRESSION_WINDOW: Duration = Duration::from_millis(150);
pub const RELEASE_DURATION: Duration = Duration::from_millis(300);
pub const POINTER_EASE: Duration = Duration::from_millis(100);
pub const HOVER_CORNER_DURATION: Duration = Duration::from_millis(200);
pub const TRACKING_EASE: Duration = Duration::from_millis(50);
pub const DOT_PRESS_DURATION: Duration = Duration::from_millis(200);
pub const BODY_PRESS_DURATION: Duration = Duration::from_millis(150);
pub const DOT_PRESS_SCALE: f64 = 0.7;
pub const BODY_PRESS_SCALE: f64 = 0.95;
/// Strength at or above which corners snap instead of easing.
pub const SNAP_STRENGTH: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Phase {
    Idle,
    Engaging,
    Locked,
    Releasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum EngageMode {
    Immediate,
    Smooth,
}

#[derive(Debug, Clone)]
pub struct EngagementSession<N> {
    target: N,
    corners: Corners,
    strength: Animated<f64>,
    mode: EngageMode,
}

impl<N> EngagementSession<N> {
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Last resolved absolute bracket positions.
    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    pub fn strength(&self, now: Instant) -> f64 {
        self.strength.get(now)
    }

    pub fn mode(&self) -> EngageMode {
        self.mode
    }
}

#[derive(Debug, Clone, Copy)]
struct CursorState {
    position: Animated<Point>,
    scale: Animated<f64>,
    dot_scale: Animated<f64>,
    /// Body rotation while a session holds the spin paused.
    lock_rotation: Animated<f64>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFrame {
    pub position: Point,
    /// Degrees, not normalized.
    pub rotation: f64,
    pub scale: f64,
    pub dot_scale: f64,
    /// Top-left of each bracket relative to `position`, in [`Corner`] order.
    pub corners: Corners,
    pub phase: Phase,
}

pub struct CursorEngine<N> {
    options: CursorOptions,
    metrics: BracketMetrics,
    running: bool,
    cursor: CursorState,
    corners: [Animated<Point>; Corner::COUNT],
    spin: SpinSession,
    session: Option<EngagementSession<N>>,
    suppress_until: Option<Instant>,
    release_until: Option<Instant>,
    last_pointer: Point,
    /// Deepest node under the pointer, for hosts that only report raw motion.
    hovered: Option<N>,
    /// A scroll happened; re-sample on the next tick, once layout caught up.
    scroll_pending: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> CursorEngine<N> {
    pub fn new(options: CursorOptions, now: Instant) -> Result<Self, OptionsError> {
        options.validate()?;
        let metrics = BracketMetrics::default();
        let spin = SpinSession::start(options.spin_period(), 0.0, now);

        Ok(Self {
            options,
            metrics,
            running: false,
            cursor: CursorState {
                position: Animated::new(Point::default()),
                scale: Animated::new(1.0),
                dot_scale: Animated::new(1.0),
                lock_rotation: Animated::new(0.0),
            },
            corners: metrics.rest_offsets().map(Animated::new),
            spin,
            session: None,
            suppress_until: None,
            release_until: None,
            last_pointer: Point::default(),
            hovered: None,
            scroll_pending: false,
        })
    }

    /// Bring the cursor up at `center`, unless `profile` describes a mobile
    /// device. Returns whether the engine is now running.
    ///
    /// The environment is judged once here; nothing re-evaluates it later.
    pub fn start(&mut self, profile: &DeviceProfile, center: Point, now: Instant) -> bool {
        if self.running {
            return true;
        }
        if profile.is_mobile() {
            log::info!(
                "Mobile device detected ({:?}); keeping the platform pointer",
                profile.matched_signature()
            );
            return false;
        }

        self.cursor.position.set(center);
        self.last_pointer = center;
        self.spin = SpinSession::start(self.options.spin_period(), 0.0, now);
        self.running = true;
        log::info!("Cursor engine started");
        true
    }

    /// Tear everything down. The engine can be started again afterwards.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.session = None;
        self.suppress_until = None;
        self.release_until = None;
        self.hovered = None;
        self.scroll_pending = false;
        self.corners = self.metrics.rest_offsets().map(Animated::new);
        self.cursor.scale.set(1.0);
        self.cursor.dot_scale.set(1.0);
        self.running = false;
        log::info!("Cursor engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn options(&self) -> &CursorOptions {
        &self.options
    }

    pub fn metrics(&self) -> &BracketMetrics {
        &self.metrics
    }

    /// Whether the host should hide its own pointer right now.
    pub fn hides_platform_pointer(&self) -> bool {
        self.running && self.options.hide_default_cursor
    }

    /// Apply new options at runtime.
    ///
    /// The spin keeps its current angle. A lock taken under a different
    /// selector is released since the target may no longer qualify.
    pub fn reconfigure(
        &mut self,
        options: CursorOptions,
        now: Instant,
    ) -> Result<(), OptionsError> {
        options.validate()?;

        if options.target_selector != self.options.target_selector && self.session.is_some() {
            log::debug!("Target selector changed; releasing current lock");
            self.release(now);
        }
        if options.spin_duration != self.options.spin_duration {
            self.spin.set_period(options.spin_period(), now);
        }
        self.options = options;
        Ok(())
    }

    pub fn set_spin_duration(&mut self, seconds: f64, now: Instant) -> Result<(), OptionsError> {
        let options = CursorOptions {
            spin_duration: seconds,
            ..self.options.clone()
        };
        self.reconfigure(options, now)
    }

    pub fn session(&self) -> Option<&EngagementSession<N>> {
        self.session.as_ref()
    }

    pub fn active_target(&self) -> Option<&N> {
        self.session.as_ref().map(|s| &s.target)
    }

    /// Whether the tracking tick is currently attached to the frame clock.
    pub fn tracking_attached(&self) -> bool {
        self.running && self.session.is_some()
    }

    pub fn is_spinning(&self) -> bool {
        self.running && !self.spin.is_paused()
    }

    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    pub fn phase(&self, now: Instant) -> Phase {
        match &self.session {
            Some(s) if s.strength.get(now) >= 1.0 => Phase::Locked,
            Some(_) => Phase::Engaging,
            None if self.release_until.is_some_and(|t| now < t) => Phase::Releasing,
            None => Phase::Idle,
        }
    }

    pub fn rotation(&self, now: Instant) -> f64 {
        if self.spin.is_paused() {
            self.cursor.lock_rotation.get(now)
        } else {
            self.spin.angle(now)
        }
    }

    pub fn frame(&self, now: Instant) -> Option<CursorFrame> {
        if !self.running {
            return None;
        }

        Some(CursorFrame {
            position: self.cursor.position.get(now),
            rotation: self.rotation(now),
            scale: self.cursor.scale.get(now),
            dot_scale: self.cursor.dot_scale.get(now),
            corners: self.corners.map(|c| c.get(now)),
            phase: self.phase(now),
        })
    }
}
