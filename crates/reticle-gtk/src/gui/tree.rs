use gtk::prelude::*;
use gtk4 as gtk;
use reticle::{ElementTree, Point, Rect, TargetSelector};

/// The widget hierarchy below `root`, seen through the engine's tree trait.
///
/// All geometry is expressed in `root`'s coordinate space, which is also where
/// the pointer controllers report positions.
#[derive(Debug, Clone)]
pub struct WidgetTree {
    root: gtk::Widget,
}

impl WidgetTree {
    pub fn new(root: &impl IsA<gtk::Widget>) -> Self {
        Self {
            root: root.clone().upcast(),
        }
    }

    pub fn root(&self) -> &gtk::Widget {
        &self.root
    }
}

impl ElementTree for WidgetTree {
    type Node = gtk::Widget;

    fn parent(&self, node: &gtk::Widget) -> Option<gtk::Widget> {
        if node == &self.root {
            return None;
        }
        node.parent()
    }

    fn matches(&self, node: &gtk::Widget, selector: &TargetSelector) -> bool {
        node.has_css_class(selector.class_name())
    }

    fn bounds(&self, node: &gtk::Widget) -> Rect {
        node.compute_bounds(&self.root)
            .map(|b| {
                Rect::new(
                    b.x() as f64,
                    b.y() as f64,
                    b.width() as f64,
                    b.height() as f64,
                )
            })
            .unwrap_or_default()
    }

    fn contains(&self, node: &gtk::Widget) -> bool {
        node.is_mapped() && (node == &self.root || node.is_ancestor(&self.root))
    }

    fn node_at(&self, point: Point) -> Option<gtk::Widget> {
        self.root.pick(point.x, point.y, gtk::PickFlags::DEFAULT)
    }
}
