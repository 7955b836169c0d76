use std::time::{Duration, Instant};

pub const FULL_TURN: f64 = 360.0;

pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= FULL_TURN { 0.0 } else { a }
}

/// Endless linear rotation of the cursor body.
///
/// The angle is an accumulator: it grows without wrapping while running.
/// Pausing freezes it (normalized) so a later resume starts where it stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSession {
    period: Duration,
    origin: f64,
    started: Instant,
    paused: Option<f64>,
}

impl SpinSession {
    pub fn start(period: Duration, angle: f64, now: Instant) -> Self {
        Self {
            period,
            origin: normalize_degrees(angle),
            started: now,
            paused: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    pub fn angle(&self, now: Instant) -> f64 {
        if let Some(angle) = self.paused {
            return angle;
        }
        if self.period.is_zero() {
            return self.origin;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        self.origin + FULL_TURN * elapsed / self.period.as_secs_f64()
    }

    /// Freeze the rotation and return the normalized angle it stopped at.
    pub fn pause(&mut self, now: Instant) -> f64 {
        let angle = normalize_degrees(self.angle(now));
        self.paused = Some(angle);
        angle
    }

    pub fn resume_from(&mut self, angle: f64, now: Instant) {
        *self = Self::start(self.period, angle, now);
    }

    /// Change the period without a visible jump.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        if let Some(angle) = self.paused {
            self.period = period;
            self.origin = angle;
            return;
        }
        let angle = self.angle(now);
        *self = Self::start(period, angle, now);
    }
}
