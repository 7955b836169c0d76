use super::{
    CursorEngine, EngageMode, EngagementSession, HOVER_CORNER_DURATION, RELEASE_DURATION,
};
use crate::tree::ElementTree;
use crate::tween::{Animated, Easing};
use std::fmt::Debug;
use std::time::Instant;

impl<N: Clone + PartialEq + Debug> CursorEngine<N> {
    pub(super) fn is_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Lock onto `target`, dropping any previous session without a release
    /// animation.
    pub(super) fn activate<T: ElementTree<Node = N>>(
        &mut self,
        target: N,
        mode: EngageMode,
        tree: &T,
        now: Instant,
    ) {
        if let Some(previous) = self.session.take()
            && previous.target != target
        {
            log::debug!("Switching lock from {:?} to {:?}", previous.target, target);
        }

        for corner in &mut self.corners {
            corner.cancel(now);
        }
        self.release_until = None;

        // brackets are laid out axis-aligned, so the body turns upright while locked
        if !self.spin.is_paused() {
            let angle = self.spin.pause(now);
            self.cursor.lock_rotation.set(angle);
        }
        let upright = if self.cursor.lock_rotation.get(now) > 180.0 {
            360.0
        } else {
            0.0
        };

        let corners = self.metrics.resolve(tree.bounds(&target));
        let ramp = self.options.hover_ramp();
        let strength = match mode {
            EngageMode::Immediate => {
                self.cursor.lock_rotation.set(upright);
                Animated::new(1.0)
            }
            EngageMode::Smooth => {
                self.cursor
                    .lock_rotation
                    .animate_to(upright, ramp, Easing::Power2Out, now);
                let mut strength = Animated::new(0.0);
                strength.animate_to(1.0, ramp, Easing::Power2Out, now);
                strength
            }
        };

        log::debug!("Engaging {:?} ({})", target, mode);
        self.session = Some(EngagementSession {
            target,
            corners,
            strength,
            mode,
        });

        match mode {
            EngageMode::Immediate => self.track(now),
            EngageMode::Smooth => {
                let cursor = self.cursor.position.get(now);
                for (corner, abs) in self.corners.iter_mut().zip(corners) {
                    corner.animate_to(abs - cursor, HOVER_CORNER_DURATION, Easing::Power2Out, now);
                }
            }
        }
    }

    /// End the session: brackets fold back to rest and the spin picks up from
    /// the body's current angle.
    pub(super) fn release(&mut self, now: Instant) {
        let Some(session) = self.session.take() else {
            return;
        };
        log::debug!("Releasing {:?}", session.target);

        let rest = self.metrics.rest_offsets();
        for (corner, home) in self.corners.iter_mut().zip(rest) {
            corner.animate_to(home, RELEASE_DURATION, Easing::Power3Out, now);
        }
        self.release_until = Some(now + RELEASE_DURATION);

        let angle = self.cursor.lock_rotation.get(now);
        self.spin.resume_from(angle, now);
    }

    pub(super) fn settle_release(&mut self, now: Instant) {
        if self.release_until.is_some_and(|until| now >= until) {
            self.release_until = None;
        }
    }
}
