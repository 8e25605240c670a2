use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, MenuSession};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use guren_tree::{CloseMenu, KeyboardHub, MenuKey, MenuStyle, Point};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Which demo the window runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Story {
    /// Open once at `--origin`; closing the menu quits.
    Basic,
    /// Every click on empty space opens the menu from that point.
    OriginPositions,
}

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub story: Story,
    pub origin: Point,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    config: Config,
    config_path: PathBuf,
    story: Story,
    origin: Point,
    started: bool,
    hub: KeyboardHub,
    session: Rc<RefCell<Option<MenuSession>>>,
    style: Rc<RefCell<MenuStyle>>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    Key(MenuKey),
    Click { button: u32, point: Point },
    CursorMove(Point),
    Close,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

pub fn menu_key(key: gdk::Key) -> Option<MenuKey> {
    match key {
        gdk::Key::Escape => Some(MenuKey::Escape),
        gdk::Key::Return | gdk::Key::KP_Enter => Some(MenuKey::Enter),
        _ => key
            .to_unicode()
            .filter(|c| !c.is_control())
            .map(|c| MenuKey::Char(c.to_ascii_lowercase())),
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
            set_title: Some("Guren"),
            add_css_class: "guren-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match menu_key(key) {
                        Some(key) => {
                            sender.input(AppMsg::Key(key));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "guren-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0,
                    connect_released[sender] => move |gesture, _, x, y| {
                        sender.input(AppMsg::Click {
                            button: gesture.current_button(),
                            point: Point::new(x, y),
                        });
                    }
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
            story,
            origin,
            events,
        } = init;

        theme::load_css();
        window::init_overlay(&root);

        let model = AppModel {
            style: Rc::new(RefCell::new(config.style.clone())),
            config,
            config_path,
            story,
            origin,
            started: false,
            hub: KeyboardHub::new(),
            session: Rc::new(RefCell::new(None)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let session = model.session.clone();
        let style = model.style.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = ThemeColors::new(&style.borrow(), &drawing_area.style_context());
                if let Err(e) = paint(cr, &session, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        log::info!("running story '{}'", story);
        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                if self.story == Story::Basic && !self.started && width > 0 && height > 0 {
                    self.started = true;
                    self.open_menu(self.origin, &sender);
                }
            }
            AppMsg::Key(key) => {
                if self.hub.dispatch(key) == 0 && key == MenuKey::Escape {
                    relm4::main_application().quit();
                }
            }
            AppMsg::Click { button, point } => {
                let outcome = self
                    .session
                    .borrow()
                    .as_ref()
                    .map(|s| s.menu().borrow().click(point, button));
                match outcome {
                    Some(outcome) => log::debug!("click at {:?} -> {:?}", point, outcome),
                    None if self.story == Story::OriginPositions => {
                        self.open_menu(point, &sender)
                    }
                    None => {}
                }
            }
            AppMsg::CursorMove(point) => {
                let changed = self
                    .session
                    .borrow()
                    .as_ref()
                    .is_some_and(|s| s.menu().borrow_mut().hover(point));
                if changed {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Close => {
                if self.session.borrow_mut().take().is_some() {
                    log::info!("menu closed");
                }
                self.drawing_area.queue_draw();
                if self.story == Story::Basic {
                    relm4::main_application().quit();
                }
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    *self.style.borrow_mut() = new_config.style.clone();
                    self.config = new_config;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn open_menu(&self, click_origin: Point, sender: &ComponentSender<Self>) {
        self.session.borrow_mut().take();

        let close_sender = sender.clone();
        let close = CloseMenu::new(move || close_sender.input(AppMsg::Close));
        let center = window::container_center(&self.drawing_area);

        match MenuSession::open(
            &self.config,
            &self.hub,
            &self.drawing_area,
            center,
            click_origin,
            close,
        ) {
            Ok(session) => {
                log::info!("menu opened from {:?}", click_origin);
                *self.session.borrow_mut() = Some(session);
                self.drawing_area.queue_draw();
            }
            Err(e) => log::error!("Failed to open menu: {}", e),
        }
    }
}

fn paint(
    cr: &cairo::Context,
    session: &RefCell<Option<MenuSession>>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    menu::draw_backdrop(cr, colors)?;

    let session = session.borrow();
    let Some(session) = session.as_ref() else {
        return Ok(());
    };
    let Ok(mut menu) = session.menu().try_borrow_mut() else {
        log::warn!("menu busy, frame skipped");
        return Ok(());
    };

    menu::measure(cr, &mut menu)?;
    menu::draw(cr, &menu, colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_key_mapping() {
        assert_eq!(menu_key(gdk::Key::Escape), Some(MenuKey::Escape));
        assert_eq!(menu_key(gdk::Key::Return), Some(MenuKey::Enter));
        assert_eq!(menu_key(gdk::Key::q), Some(MenuKey::Char('q')));
        assert_eq!(menu_key(gdk::Key::Q), Some(MenuKey::Char('q')));
        assert_eq!(menu_key(gdk::Key::_5), Some(MenuKey::Char('5')));
        assert_eq!(menu_key(gdk::Key::Shift_L), None);
    }

    #[test]
    fn test_story_names() {
        assert_eq!(Story::Basic.to_string(), "basic");
        assert_eq!(Story::OriginPositions.to_string(), "origin-positions");
    }
}
