use super::{
    ICON_GAP, ICON_SIZE, LINE_SPACING, MIN_ITEM_HEIGHT, MIN_ITEM_WIDTH, PADDING_X, PADDING_Y,
};
use crate::config::{ActionConfig, Config, Label};
use crate::sys::{icon, launch};
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use guren_tree::{
    CloseMenu, KeyboardHub, MenuAction, MenuOptions, MountedMenu, Point, RadialMenu, TreeError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// What a node paints: one or more label lines and an optional icon.
#[derive(Debug, Clone)]
pub struct ItemContent {
    pub label: Label,
    pub pixbuf: Option<Pixbuf>,
}

impl ItemContent {
    pub fn from_config(cfg: &ActionConfig) -> Self {
        let pixbuf = cfg.icon.as_ref().and_then(|name| {
            let path = icon::find_icon_path(name, ICON_SIZE as u16)?;
            Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
                .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
                .ok()
        });
        Self {
            label: cfg.label.clone(),
            pixbuf,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.label.lines()
    }
}

/// Actions with a command spawn it and then dismiss the menu; the others
/// have no callback at all.
pub fn build_action(cfg: &ActionConfig) -> MenuAction<ItemContent> {
    let action = MenuAction::new(ItemContent::from_config(cfg));
    let Some(command) = cfg.command.clone() else {
        return action;
    };

    let label = cfg.label.clone();
    action.on_select(move |event, close| {
        log::debug!("'{}' selected by {:?}", label, event);
        if let Err(e) = launch::spawn_shell(&command) {
            log::error!("{:#}", e);
        }
        close.close();
    })
}

/// Size of an item box holding `line_widths` worth of text and maybe an icon.
pub fn content_size(line_widths: &[f64], line_height: f64, has_icon: bool) -> (f64, f64) {
    let text_width = line_widths.iter().copied().fold(0.0, f64::max);
    let lines = line_widths.len() as f64;
    let text_height = if lines > 0.0 {
        lines * line_height + (lines - 1.0) * LINE_SPACING
    } else {
        0.0
    };

    let icon = if has_icon { ICON_SIZE as f64 } else { 0.0 };
    let gap = if has_icon && text_width > 0.0 {
        ICON_GAP
    } else {
        0.0
    };

    let width = (icon + gap + text_width + 2.0 * PADDING_X).max(MIN_ITEM_WIDTH);
    let height = (text_height.max(icon) + 2.0 * PADDING_Y).max(MIN_ITEM_HEIGHT);
    (width.ceil(), height.ceil())
}

/// Drives [`RadialMenu::tick`] from the GLib main loop.
///
/// The source stops by itself once every node is revealed; dropping the timer
/// earlier cancels it.
pub struct RevealTimer {
    source: Option<glib::SourceId>,
    finished: Rc<Cell<bool>>,
}

impl RevealTimer {
    pub fn start(
        menu: &Rc<RefCell<RadialMenu<ItemContent>>>,
        area: &gtk::DrawingArea,
        delay: Duration,
    ) -> Self {
        let finished = Rc::new(Cell::new(false));
        let done = finished.clone();
        let menu = Rc::downgrade(menu);
        let area = area.clone();

        let source = glib::timeout_add_local(delay, move || {
            let Some(menu) = menu.upgrade() else {
                done.set(true);
                return glib::ControlFlow::Break;
            };
            let mut menu = menu.borrow_mut();
            if let Some(node) = menu.tick() {
                log::trace!("revealed {:?}", node);
                area.queue_draw();
            }
            if menu.is_revealing() {
                glib::ControlFlow::Continue
            } else {
                done.set(true);
                glib::ControlFlow::Break
            }
        });

        Self {
            source: Some(source),
            finished,
        }
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        if let Some(source) = self.source.take()
            && !self.finished.get()
        {
            source.remove();
        }
    }
}

/// An open menu together with the resources it holds on the GTK side.
pub struct MenuSession {
    mounted: MountedMenu<ItemContent>,
    _timer: RevealTimer,
}

impl MenuSession {
    pub fn open(
        config: &Config,
        hub: &KeyboardHub,
        area: &gtk::DrawingArea,
        container_center: Point,
        click_origin: Point,
        close: CloseMenu,
    ) -> Result<Self, TreeError> {
        let options = MenuOptions {
            anchor_set: config.anchor_set,
            keys: config.key_map(),
        };
        let menu = RadialMenu::open(
            container_center,
            click_origin,
            build_action(&config.center),
            config.actions.iter().map(build_action),
            close,
            options,
        )?;

        let mounted = menu.mount(hub);
        let timer = RevealTimer::start(mounted.menu(), area, config.reveal_delay());
        Ok(Self {
            mounted,
            _timer: timer,
        })
    }

    pub fn menu(&self) -> &Rc<RefCell<RadialMenu<ItemContent>>> {
        self.mounted.menu()
    }
}
