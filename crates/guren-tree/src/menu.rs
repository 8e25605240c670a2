use crate::anchor::{Anchor, AnchorSet};
use crate::connector::{self, Connectors};
use crate::error::TreeError;
use crate::geometry::{Dimensions, Point};
use crate::input::{Hit, KeyCommand, KeyMap, MenuKey, SelectEvent, SelectOutcome};
use crate::item::{CenterItemNodes, CloseMenu, MenuAction, Occupant, TreeItem};
use crate::keyboard::{KeySubscription, KeyboardHub};
use crate::layout;
use crate::reveal::RevealCounter;
use std::cell::RefCell;
use std::rc::Rc;

/// Radius around the click origin that counts as hitting its dot.
pub const ORIGIN_DOT_HIT_RADIUS: f64 = 15.0;

#[derive(Debug, Clone, Default)]
pub struct MenuOptions {
    pub anchor_set: AnchorSet,
    pub keys: KeyMap,
}

/// Identifies a painted node of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Center,
    Anchor(Anchor),
}

/// One open radial menu: the center item, its anchor map and reveal state.
pub struct RadialMenu<C> {
    center: TreeItem<C>,
    nodes: CenterItemNodes<C>,
    reveal_order: Vec<Anchor>,
    reveal: RevealCounter,
    anchor_set: AnchorSet,
    keys: KeyMap,
    close: CloseMenu,
    hovered: Hit,
}

impl<C> RadialMenu<C> {
    /// Lays the menu out around `container_center`. The anchor map is fixed
    /// from here on; only measurements and visibility change.
    pub fn open(
        container_center: Point,
        click_origin: Point,
        center_action: MenuAction<C>,
        actions: impl IntoIterator<Item = MenuAction<C>>,
        close: CloseMenu,
        options: MenuOptions,
    ) -> Result<Self, TreeError> {
        let layout = layout::layout(container_center, click_origin, actions, options.anchor_set)?;
        let reveal_order = layout::reveal_order(&layout.nodes, layout.reference_anchor());

        log::debug!(
            "menu opened at {:?}: click origin {:?}, {} action(s) placed",
            container_center,
            layout.click_origin,
            layout.placed
        );

        Ok(Self {
            center: TreeItem::placeholder(center_action, container_center),
            nodes: layout.nodes,
            reveal: RevealCounter::new(layout.placed + 1),
            reveal_order,
            anchor_set: options.anchor_set,
            keys: options.keys,
            close,
            hovered: Hit::Background,
        })
    }

    pub fn center(&self) -> &TreeItem<C> {
        &self.center
    }

    pub fn nodes(&self) -> &CenterItemNodes<C> {
        &self.nodes
    }

    pub fn reveal_order(&self) -> &[Anchor] {
        &self.reveal_order
    }

    pub fn reveal(&self) -> &RevealCounter {
        &self.reveal
    }

    pub fn hovered(&self) -> Hit {
        self.hovered
    }

    /// Every node that will be painted, center first.
    pub fn node_refs(&self) -> Vec<NodeRef> {
        std::iter::once(NodeRef::Center)
            .chain(self.reveal_order.iter().copied().map(NodeRef::Anchor))
            .collect()
    }

    pub fn item(&self, node: NodeRef) -> Option<&TreeItem<C>> {
        match node {
            NodeRef::Center => Some(&self.center),
            NodeRef::Anchor(anchor) => self.nodes.item(anchor),
        }
    }

    fn item_mut(&mut self, node: NodeRef) -> Option<&mut TreeItem<C>> {
        match node {
            NodeRef::Center => Some(&mut self.center),
            NodeRef::Anchor(anchor) => self.nodes.item_mut(anchor),
        }
    }

    /// One step of the staggered reveal. Returns the node that became visible.
    pub fn tick(&mut self) -> Option<NodeRef> {
        let position = self.reveal.tick()?;
        let node = match position {
            0 => NodeRef::Center,
            n => NodeRef::Anchor(*self.reveal_order.get(n - 1)?),
        };
        if let Some(item) = self.item_mut(node) {
            item.visible = true;
        }
        Some(node)
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_running()
    }

    /// Feeds a measurement back from the host. Returns whether anything changed.
    pub fn update_dimensions(&mut self, node: NodeRef, rect: Dimensions) -> bool {
        match self.item_mut(node) {
            Some(item) => item.measure(rect.width, rect.height),
            None => {
                log::warn!("dimensions reported for empty node {:?}", node);
                false
            }
        }
    }

    pub fn connectors(&self) -> Result<Connectors, TreeError> {
        connector::connectors(&self.center, &self.nodes, self.anchor_set)
    }

    pub fn hit_test(&self, p: Point) -> Hit {
        if self.center.hit_rect().is_some_and(|rect| rect.contains(p)) {
            return Hit::Center;
        }

        if let Some((anchor, _)) = self
            .nodes
            .items()
            .find(|(_, item)| item.hit_rect().is_some_and(|rect| rect.contains(p)))
        {
            return Hit::Item(anchor);
        }

        match self.nodes.click_origin() {
            Some((_, origin))
                if self.center.visible && origin.pos.distance(p) <= ORIGIN_DOT_HIT_RADIUS =>
            {
                Hit::ClickOrigin
            }
            _ => Hit::Background,
        }
    }

    /// Tracks the node under the pointer. Returns whether it changed.
    pub fn hover(&mut self, p: Point) -> bool {
        let hit = self.hit_test(p);
        let changed = hit != self.hovered;
        self.hovered = hit;
        changed
    }

    pub fn close(&self) {
        self.close.close();
    }

    /// Activates whatever sits at `anchor` around the center.
    pub fn select(&self, anchor: Anchor, event: &SelectEvent) -> SelectOutcome {
        match self.nodes.get(anchor) {
            Occupant::Vacant => {
                log::warn!("non-existing item of anchor {} selected", anchor);
                SelectOutcome::Vacant
            }
            Occupant::ClickOrigin(_) => {
                self.close();
                SelectOutcome::Closed
            }
            Occupant::Item(item) => self.invoke(&item.action, event),
        }
    }

    /// Runs the center action. With `close_fallback`, a center without a
    /// callback closes the menu instead.
    pub fn activate_center(&self, event: &SelectEvent, close_fallback: bool) -> SelectOutcome {
        match self.invoke(&self.center.action, event) {
            SelectOutcome::NoCallback if close_fallback => {
                self.close();
                SelectOutcome::Closed
            }
            outcome => outcome,
        }
    }

    pub fn handle_key(&self, key: MenuKey) -> SelectOutcome {
        let event = SelectEvent::Key(key);
        match self.keys.command(key) {
            Some(KeyCommand::Close) => {
                self.close();
                SelectOutcome::Closed
            }
            Some(KeyCommand::ActivateCenter) => self.activate_center(&event, true),
            Some(KeyCommand::Select(anchor)) => self.select(anchor, &event),
            None => SelectOutcome::Unbound,
        }
    }

    pub fn click(&self, p: Point, button: u32) -> SelectOutcome {
        let event = SelectEvent::Pointer {
            button,
            position: p,
        };
        match self.hit_test(p) {
            Hit::Center => self.activate_center(&event, false),
            Hit::Item(anchor) => self.select(anchor, &event),
            Hit::ClickOrigin | Hit::Background => {
                self.close();
                SelectOutcome::Closed
            }
        }
    }

    fn invoke(&self, action: &MenuAction<C>, event: &SelectEvent) -> SelectOutcome {
        if action.select(event, &self.close) {
            SelectOutcome::Invoked
        } else {
            SelectOutcome::NoCallback
        }
    }
}

impl<C: 'static> RadialMenu<C> {
    /// Starts listening for keys on `hub`. Dropping the returned handle
    /// unmounts the menu and releases the listener.
    pub fn mount(self, hub: &KeyboardHub) -> MountedMenu<C> {
        let menu = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&menu);
        let keys = hub.subscribe(move |key| {
            let Some(menu) = weak.upgrade() else {
                return;
            };
            match menu.try_borrow() {
                Ok(menu) => {
                    let outcome = menu.handle_key(key);
                    log::debug!("key {} -> {:?}", key, outcome);
                }
                Err(_) => log::warn!("menu busy, key {} ignored", key),
            }
        });
        MountedMenu { menu, _keys: keys }
    }
}

pub struct MountedMenu<C> {
    menu: Rc<RefCell<RadialMenu<C>>>,
    _keys: KeySubscription,
}

impl<C> MountedMenu<C> {
    pub fn menu(&self) -> &Rc<RefCell<RadialMenu<C>>> {
        &self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const CENTER: Point = Point { x: 960.0, y: 540.0 };
    const BOTTOM_RIGHT_CLICK: Point = Point { x: 1500.0, y: 900.0 };

    struct Recorder {
        closed: Rc<Cell<usize>>,
        selected: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                closed: Rc::new(Cell::new(0)),
                selected: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn close(&self) -> CloseMenu {
            let closed = self.closed.clone();
            CloseMenu::new(move || closed.set(closed.get() + 1))
        }

        fn action(&self, name: &'static str) -> MenuAction<&'static str> {
            let selected = self.selected.clone();
            MenuAction::new(name).on_select(move |_, _| selected.borrow_mut().push(name))
        }
    }

    fn open_menu(
        recorder: &Recorder,
        names: &[&'static str],
        center_callback: bool,
    ) -> RadialMenu<&'static str> {
        let center = if center_callback {
            recorder.action("center")
        } else {
            MenuAction::new("center")
        };
        RadialMenu::open(
            CENTER,
            BOTTOM_RIGHT_CLICK,
            center,
            names.iter().map(|&n| recorder.action(n)),
            recorder.close(),
            MenuOptions::default(),
        )
        .unwrap()
    }

    fn reveal_all(menu: &mut RadialMenu<&'static str>) {
        for node in menu.node_refs() {
            menu.update_dimensions(node, Dimensions::centered(Point::default(), 200.0, 60.0));
        }
        while menu.is_revealing() {
            menu.tick();
        }
    }

    #[test]
    fn test_keys_route_to_anchors() {
        let recorder = Recorder::new();
        let menu = open_menu(&recorder, &["enter", "sniff", "party"], true);

        // actions fan out from bottom: enter=bottom, sniff=bottomLeft, party=topLeft
        assert_eq!(menu.handle_key(MenuKey::Char('s')), SelectOutcome::Invoked);
        assert_eq!(menu.handle_key(MenuKey::Char('a')), SelectOutcome::Invoked);
        assert_eq!(menu.handle_key(MenuKey::Char('q')), SelectOutcome::Invoked);
        assert_eq!(*recorder.selected.borrow(), vec!["enter", "sniff", "party"]);
        assert_eq!(recorder.closed.get(), 0);
    }

    #[test]
    fn test_vacant_anchor_is_a_no_op() {
        let recorder = Recorder::new();
        let menu = open_menu(&recorder, &["only"], true);

        assert_eq!(menu.handle_key(MenuKey::Char('w')), SelectOutcome::Vacant);
        assert_eq!(menu.handle_key(MenuKey::Char('z')), SelectOutcome::Unbound);
        assert!(recorder.selected.borrow().is_empty());
        assert_eq!(recorder.closed.get(), 0);
    }

    #[test]
    fn test_click_origin_anchor_closes() {
        let recorder = Recorder::new();
        let menu = open_menu(&recorder, &["a"], true);

        assert_eq!(menu.handle_key(MenuKey::Char('d')), SelectOutcome::Closed);
        assert_eq!(recorder.closed.get(), 1);
        assert!(recorder.selected.borrow().is_empty());
    }

    #[test]
    fn test_reserved_keys() {
        let recorder = Recorder::new();
        let with_center = open_menu(&recorder, &[], true);
        assert_eq!(with_center.handle_key(MenuKey::Enter), SelectOutcome::Invoked);
        assert_eq!(*recorder.selected.borrow(), vec!["center"]);
        assert_eq!(with_center.handle_key(MenuKey::Char('x')), SelectOutcome::Closed);
        assert_eq!(recorder.closed.get(), 1);

        let recorder = Recorder::new();
        let bare_center = open_menu(&recorder, &[], false);
        assert_eq!(bare_center.handle_key(MenuKey::Enter), SelectOutcome::Closed);
        assert_eq!(recorder.closed.get(), 1);
    }

    #[test]
    fn test_callback_receives_close_capability() {
        let recorder = Recorder::new();
        let closing = MenuAction::new("bye").on_select(|event, close| {
            assert_eq!(*event, SelectEvent::Key(MenuKey::Char('s')));
            close.close();
        });
        let menu = RadialMenu::open(
            CENTER,
            BOTTOM_RIGHT_CLICK,
            MenuAction::new("center"),
            [closing],
            recorder.close(),
            MenuOptions::default(),
        )
        .unwrap();

        assert_eq!(menu.handle_key(MenuKey::Char('s')), SelectOutcome::Invoked);
        assert_eq!(recorder.closed.get(), 1);
    }

    #[test]
    fn test_reveal_sequence() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a", "b", "c"], true);

        assert_eq!(menu.reveal().max(), 4);
        assert!(!menu.center().visible);
        assert_eq!(menu.tick(), Some(NodeRef::Center));
        assert!(menu.center().visible);
        assert_eq!(menu.tick(), Some(NodeRef::Anchor(Anchor::Bottom)));
        assert_eq!(menu.tick(), Some(NodeRef::Anchor(Anchor::BottomLeft)));
        assert!(!menu.nodes().item(Anchor::TopLeft).unwrap().visible);
        assert_eq!(menu.tick(), Some(NodeRef::Anchor(Anchor::TopLeft)));
        assert!(!menu.is_revealing());
        assert_eq!(menu.tick(), None);
        assert!(menu.nodes().items().all(|(_, item)| item.visible));
    }

    #[test]
    fn test_measurement_does_not_move_anchors() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a", "b"], true);
        let before: Vec<_> = menu.nodes().items().map(|(a, i)| (a, i.origin)).collect();

        let rect = Dimensions::centered(Point::default(), 320.0, 90.0);
        assert!(menu.update_dimensions(NodeRef::Anchor(Anchor::Bottom), rect));
        assert!(!menu.update_dimensions(NodeRef::Anchor(Anchor::Bottom), rect));
        assert!(!menu.update_dimensions(NodeRef::Anchor(Anchor::Top), rect));

        let after: Vec<_> = menu.nodes().items().map(|(a, i)| (a, i.origin)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_pointer_routing() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a", "b"], true);
        reveal_all(&mut menu);

        // bottom item sits at (960, 740)
        assert_eq!(menu.hit_test(Point::new(960.0, 740.0)), Hit::Item(Anchor::Bottom));
        assert_eq!(menu.click(Point::new(1000.0, 750.0), 1), SelectOutcome::Invoked);
        assert_eq!(menu.click(CENTER, 1), SelectOutcome::Invoked);
        assert_eq!(*recorder.selected.borrow(), vec!["a", "center"]);

        assert_eq!(menu.hit_test(BOTTOM_RIGHT_CLICK), Hit::ClickOrigin);
        assert_eq!(menu.click(Point::new(10.0, 10.0), 1), SelectOutcome::Closed);
        assert_eq!(recorder.closed.get(), 1);
    }

    #[test]
    fn test_pointer_on_center_without_callback_does_not_close() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &[], false);
        reveal_all(&mut menu);

        assert_eq!(menu.click(CENTER, 1), SelectOutcome::NoCallback);
        assert_eq!(recorder.closed.get(), 0);
    }

    #[test]
    fn test_hidden_items_are_not_hit() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a"], true);
        menu.update_dimensions(
            NodeRef::Anchor(Anchor::Bottom),
            Dimensions::centered(Point::default(), 200.0, 60.0),
        );
        assert_eq!(menu.hit_test(Point::new(960.0, 740.0)), Hit::Background);
    }

    #[test]
    fn test_hover_reports_changes() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a"], true);
        reveal_all(&mut menu);

        assert!(menu.hover(Point::new(960.0, 740.0)));
        assert!(!menu.hover(Point::new(970.0, 745.0)));
        assert_eq!(menu.hovered(), Hit::Item(Anchor::Bottom));
        assert!(menu.hover(Point::new(0.0, 0.0)));
        assert_eq!(menu.hovered(), Hit::Background);
    }

    #[test]
    fn test_connectors_follow_reveal() {
        let recorder = Recorder::new();
        let mut menu = open_menu(&recorder, &["a", "b"], true);
        for node in menu.node_refs() {
            menu.update_dimensions(node, Dimensions::centered(Point::default(), 200.0, 60.0));
        }

        assert!(menu.connectors().unwrap().lines.is_empty());
        menu.tick();
        assert_eq!(menu.connectors().unwrap().lines.len(), 1);
        menu.tick();
        menu.tick();
        let all = menu.connectors().unwrap();
        assert_eq!(all.lines.len(), 3);
        assert_eq!(all.origin_dot, Some(BOTTOM_RIGHT_CLICK));
    }

    #[test]
    fn test_unmount_removes_key_listener() {
        let recorder = Recorder::new();
        let hub = KeyboardHub::new();
        let mounted = open_menu(&recorder, &["a"], true).mount(&hub);

        hub.dispatch(MenuKey::Char('s'));
        assert_eq!(*recorder.selected.borrow(), vec!["a"]);
        assert_eq!(mounted.menu().borrow().nodes().items().count(), 1);

        drop(mounted);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(MenuKey::Char('s')), 0);
        assert_eq!(hub.dispatch(MenuKey::Char('x')), 0);
        assert_eq!(*recorder.selected.borrow(), vec!["a"]);
        assert_eq!(recorder.closed.get(), 0);
    }
}
