use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::host::{self, CursorHost};
use crate::gui::page::Page;
use crate::gui::theme;
use crate::gui::tree::WidgetTree;
use crate::gui::window::{self, DEFAULT_SIZE};
use gtk::prelude::*;
use gtk4 as gtk;
use reticle::{DeviceProfile, Point};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    /// Run the cursor even where mobile detection would refuse.
    pub force: bool,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub host: Option<Rc<RefCell<CursorHost>>>,
    pub page: Page,
    pub config_path: PathBuf,
}

#[derive(Debug)]
pub enum AppMsg {
    ConfigReload,
    AddCard,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn start_cursor(host: &Rc<RefCell<CursorHost>>, force: bool) {
    let profile = if force {
        DeviceProfile::default()
    } else {
        window::device_profile()
    };
    let center = Point::new(DEFAULT_SIZE.0 as f64 / 2.0, DEFAULT_SIZE.1 as f64 / 2.0);
    if !host.borrow_mut().start(&profile, center) {
        log::info!("Custom cursor disabled on this device; run with --force to override");
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Reticle"),
            set_default_size: (DEFAULT_SIZE.0, DEFAULT_SIZE.1),
            add_css_class: "reticle-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::n {
                        sender.input(AppMsg::AddCard);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "scroller"]
                gtk::ScrolledWindow {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_hscrollbar_policy: gtk::PolicyType::Never,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            force,
            rx,
        } = init;

        theme::load_css();

        let widgets = view_output!();

        let add_sender = sender.clone();
        let page = Page::new(&config.cursor.target_selector, config.demo.cards, move || {
            add_sender.input(AppMsg::AddCard)
        });
        widgets.scroller.set_child(Some(&page.root));

        let canvas = gtk::DrawingArea::new();
        canvas.add_css_class("reticle-canvas");
        canvas.set_can_target(false);
        widgets.overlay.add_overlay(&canvas);

        let tree = WidgetTree::new(&widgets.overlay);
        let host = match CursorHost::new(config.cursor.clone(), tree) {
            Ok(host) => {
                let host = Rc::new(RefCell::new(host));
                start_cursor(&host, force);
                host::connect(&host, &widgets.overlay, &widgets.scroller, &canvas);
                {
                    let host = host.clone();
                    root.connect_close_request(move |_| {
                        host.borrow_mut().stop();
                        glib::Propagation::Proceed
                    });
                }
                Some(host)
            }
            Err(e) => {
                log::error!("Cursor disabled, invalid options: {}", e);
                None
            }
        };

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let model = AppModel {
            host,
            page,
            config_path,
        };

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::AddCard => self.page.add_card(),
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    let selector = new_config.cursor.target_selector.clone();
                    if let Some(host) = &self.host
                        && let Err(e) = host.borrow_mut().reconfigure(new_config.cursor)
                    {
                        log::error!("Failed to apply cursor options: {}", e);
                        return;
                    }
                    self.page.retarget(&selector);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
