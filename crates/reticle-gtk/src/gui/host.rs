//! Glue between GTK input and the cursor engine.

use super::overlay;
use super::theme::ThemeColors;
use super::tree::WidgetTree;
use super::window;
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use reticle::{
    BracketMetrics, CursorEngine, CursorFrame, CursorOptions, DeviceProfile, ElementTree,
    OptionsError, Point,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct CursorHost {
    engine: CursorEngine<gtk::Widget>,
    tree: WidgetTree,
}

impl CursorHost {
    pub fn new(options: CursorOptions, tree: WidgetTree) -> Result<Self, OptionsError> {
        Ok(Self {
            engine: CursorEngine::new(options, Instant::now())?,
            tree,
        })
    }

    pub fn start(&mut self, profile: &DeviceProfile, center: Point) -> bool {
        let running = self.engine.start(profile, center, Instant::now());
        self.sync_platform_pointer();
        running
    }

    pub fn reconfigure(&mut self, options: CursorOptions) -> Result<(), OptionsError> {
        self.engine.reconfigure(options, Instant::now())?;
        self.sync_platform_pointer();
        Ok(())
    }

    /// Tear the cursor down and give the platform pointer back.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.sync_platform_pointer();
    }

    fn sync_platform_pointer(&self) {
        window::set_platform_pointer_hidden(self.tree.root(), self.engine.hides_platform_pointer());
    }

    pub fn frame(&self) -> Option<CursorFrame> {
        self.engine.frame(Instant::now())
    }

    pub fn metrics(&self) -> BracketMetrics {
        *self.engine.metrics()
    }

    pub fn pointer_motion(&mut self, point: Point) {
        self.engine.pointer_at(point, &self.tree, Instant::now());
    }

    /// The pointer left the window entirely.
    pub fn pointer_left(&mut self) {
        self.engine.pointer_exit(Instant::now());
    }

    pub fn pointer_pressed(&mut self) {
        let under = self.tree.node_at(self.engine.last_pointer());
        self.engine
            .pointer_down(under.as_ref(), &self.tree, Instant::now());
    }

    pub fn pointer_released(&mut self) {
        let under = self.tree.node_at(self.engine.last_pointer());
        self.engine
            .pointer_up(under.as_ref(), &self.tree, Instant::now());
    }

    /// The viewport only queues a relayout on `value-changed`, so the hit test
    /// waits for the next frame.
    pub fn scrolled(&mut self) {
        self.engine.scroll_later();
    }

    pub fn tick(&mut self) {
        self.engine.tick(&self.tree, Instant::now());
    }
}

/// Wire `host` to the input controllers, scroll adjustment and frame clock.
///
/// Controllers sit on `overlay` in the capture phase so they observe events
/// before the page's own buttons claim them.
pub fn connect(
    host: &Rc<RefCell<CursorHost>>,
    overlay: &gtk::Overlay,
    scroller: &gtk::ScrolledWindow,
    canvas: &gtk::DrawingArea,
) {
    let motion = gtk::EventControllerMotion::new();
    motion.set_propagation_phase(gtk::PropagationPhase::Capture);
    {
        let host = host.clone();
        motion.connect_motion(move |_, x, y| {
            host.borrow_mut().pointer_motion(Point::new(x, y));
        });
    }
    {
        let host = host.clone();
        motion.connect_leave(move |_| host.borrow_mut().pointer_left());
    }
    overlay.add_controller(motion);

    let buttons = gtk::EventControllerLegacy::new();
    buttons.set_propagation_phase(gtk::PropagationPhase::Capture);
    {
        let host = host.clone();
        buttons.connect_event(move |_, event| {
            match event.event_type() {
                gdk::EventType::ButtonPress => host.borrow_mut().pointer_pressed(),
                gdk::EventType::ButtonRelease => host.borrow_mut().pointer_released(),
                _ => {}
            }
            glib::Propagation::Proceed
        });
    }
    overlay.add_controller(buttons);

    {
        let host = host.clone();
        scroller
            .vadjustment()
            .connect_value_changed(move |_| host.borrow_mut().scrolled());
    }

    {
        let host = host.clone();
        canvas.add_tick_callback(move |canvas, _clock| {
            host.borrow_mut().tick();
            canvas.queue_draw();
            glib::ControlFlow::Continue
        });
    }

    let host = host.clone();
    canvas.set_draw_func(move |canvas, cr, _, _| {
        let (frame, metrics) = {
            let host = host.borrow();
            (host.frame(), host.metrics())
        };
        let Some(frame) = frame else {
            return;
        };
        let colors = ThemeColors::from_context(&canvas.style_context());
        if let Err(e) = overlay::draw(cr, &frame, &metrics, &colors) {
            log::error!("Drawing error: {}", e);
        }
    });
}
