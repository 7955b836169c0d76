use super::{
    BODY_PRESS_DURATION, BODY_PRESS_SCALE, CursorEngine, DOT_PRESS_DURATION, DOT_PRESS_SCALE,
    EngageMode, POINTER_EASE, SUPPRESSION_WINDOW,
};
use crate::geometry::Point;
use crate::tree::{ElementTree, closest_target, is_within};
use crate::tween::Easing;
use std::fmt::Debug;
use std::time::Instant;

impl<N: Clone + PartialEq + Debug> CursorEngine<N> {
    pub fn pointer_move(&mut self, point: Point, now: Instant) {
        if !self.running {
            return;
        }
        self.last_pointer = point;
        self.cursor
            .position
            .animate_to(point, POINTER_EASE, Easing::Power3Out, now);
    }

    /// The pointer moved onto `node` (or one of its descendants).
    pub fn pointer_over<T: ElementTree<Node = N>>(&mut self, node: &N, tree: &T, now: Instant) {
        if !self.running {
            return;
        }
        if self.is_suppressed(now) {
            log::trace!("Activation suppressed for {:?}", node);
            return;
        }
        let Some(target) = closest_target(tree, node, &self.options.target_selector) else {
            return;
        };
        if self.active_target() == Some(&target) {
            return;
        }
        self.activate(target, EngageMode::Smooth, tree, now);
    }

    /// Raw pointer motion, for hosts without their own enter/leave events.
    ///
    /// Hit-tests `point` and turns a change of the node under the pointer into
    /// a leave of the locked target (once the pointer is outside it) followed
    /// by an over of the new node.
    pub fn pointer_at<T: ElementTree<Node = N>>(
        &mut self,
        point: Point,
        tree: &T,
        now: Instant,
    ) {
        if !self.running {
            return;
        }
        self.pointer_move(point, now);

        let under = tree.node_at(point);
        if under == self.hovered {
            return;
        }

        if let Some(active) = self.active_target().cloned() {
            let inside = under.as_ref().is_some_and(|n| is_within(tree, n, &active));
            if !inside {
                self.pointer_leave(&active, now);
            }
        }
        if let Some(node) = &under {
            self.pointer_over(node, tree, now);
        }
        self.hovered = under;
    }

    /// The pointer left the host surface altogether.
    pub fn pointer_exit(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        if let Some(active) = self.active_target().cloned() {
            self.pointer_leave(&active, now);
        }
        self.hovered = None;
    }

    /// The pointer left `node`'s area. Only the locked target cares.
    pub fn pointer_leave(&mut self, node: &N, now: Instant) {
        if !self.running {
            return;
        }
        if self.active_target() == Some(node) {
            self.release(now);
        }
    }

    pub fn pointer_down<T: ElementTree<Node = N>>(
        &mut self,
        node: Option<&N>,
        tree: &T,
        now: Instant,
    ) {
        if !self.running {
            return;
        }
        self.cursor
            .dot_scale
            .animate_to(DOT_PRESS_SCALE, DOT_PRESS_DURATION, Easing::Power2Out, now);
        self.cursor
            .scale
            .animate_to(BODY_PRESS_SCALE, BODY_PRESS_DURATION, Easing::Power2Out, now);

        let target = node.and_then(|n| closest_target(tree, n, &self.options.target_selector));
        if let Some(target) = target {
            self.suppress_until = None;
            self.activate(target, EngageMode::Immediate, tree, now);
        }
    }

    pub fn pointer_up<T: ElementTree<Node = N>>(
        &mut self,
        node: Option<&N>,
        tree: &T,
        now: Instant,
    ) {
        if !self.running {
            return;
        }
        self.cursor
            .dot_scale
            .animate_to(1.0, DOT_PRESS_DURATION, Easing::Power2Out, now);
        self.cursor
            .scale
            .animate_to(1.0, BODY_PRESS_DURATION, Easing::Power2Out, now);

        let on_target = node
            .is_some_and(|n| closest_target(tree, n, &self.options.target_selector).is_some());
        if !on_target {
            self.suppress_until = Some(now + SUPPRESSION_WINDOW);
        }
    }

    /// Record a scroll whose layout is not settled yet. The check runs at the
    /// start of the next [`tick`](Self::tick).
    pub fn scroll_later(&mut self) {
        if self.running && self.session.is_some() {
            self.scroll_pending = true;
        }
    }

    /// Content scrolled under a still pointer; drop the lock if the target
    /// slid away.
    pub fn scroll<T: ElementTree<Node = N>>(&mut self, tree: &T, now: Instant) {
        if !self.running {
            return;
        }
        let Some(target) = self.active_target() else {
            return;
        };
        let still_over = tree
            .node_at(self.last_pointer)
            .is_some_and(|under| is_within(tree, &under, target));

        if !still_over {
            log::debug!("Scrolled off {:?}", target);
            self.release(now);
        }
    }
}
