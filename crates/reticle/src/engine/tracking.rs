use super::{CursorEngine, SNAP_STRENGTH, TRACKING_EASE};
use crate::tree::ElementTree;
use crate::tween::{Easing, Lerp};
use std::fmt::Debug;
use std::time::Instant;

impl<N: Clone + PartialEq + Debug> CursorEngine<N> {
    /// One frame of bracket tracking.
    ///
    /// Does nothing unless a session is attached. A target that has left the
    /// tree is released here instead of being chased. A scroll reported through
    /// [`scroll_later`](Self::scroll_later) is checked first.
    pub fn tick<T: ElementTree<Node = N>>(&mut self, tree: &T, now: Instant) {
        if !self.running {
            return;
        }
        self.settle_release(now);

        if std::mem::take(&mut self.scroll_pending) {
            self.scroll(tree, now);
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !tree.contains(&session.target) {
            log::debug!("Locked target {:?} left the tree", session.target);
            self.release(now);
            return;
        }
        session.corners = self.metrics.resolve(tree.bounds(&session.target));

        self.track(now);
    }

    /// Move the brackets toward the session's corners, relative to where the
    /// cursor is right now.
    pub(super) fn track(&mut self, now: Instant) {
        let Some(session) = &self.session else {
            return;
        };
        let strength = session.strength.get(now);
        if strength <= 0.0 {
            return;
        }

        let cursor = self.cursor.position.get(now);
        for (corner, abs) in self.corners.iter_mut().zip(session.corners) {
            let delta = abs - cursor;
            if strength >= SNAP_STRENGTH {
                corner.set(delta);
            } else {
                // strength-weighted blend, then a short positional ease on top
                let blended = corner.get(now).lerp(delta, strength);
                corner.animate_to(blended, TRACKING_EASE, Easing::Power1Out, now);
            }
        }
    }
}
