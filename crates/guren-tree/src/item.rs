use crate::anchor::{ANCHORS, Anchor, AnchorRing, CORNER_SIZE, STROKE_WIDTH};
use crate::geometry::{Dimensions, Point};
use crate::input::SelectEvent;
use std::fmt;
use std::rc::Rc;

/// Dismisses the menu instance it was handed out by.
#[derive(Clone)]
pub struct CloseMenu(Rc<dyn Fn()>);

impl CloseMenu {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn close(&self) {
        (self.0)()
    }
}

impl fmt::Debug for CloseMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CloseMenu")
    }
}

pub type SelectCallback = Rc<dyn Fn(&SelectEvent, &CloseMenu)>;

/// An entry of the menu. `content` is whatever the host knows how to paint.
#[derive(Clone)]
pub struct MenuAction<C> {
    pub content: C,
    on_select: Option<SelectCallback>,
}

impl<C> MenuAction<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            on_select: None,
        }
    }

    pub fn on_select(mut self, f: impl Fn(&SelectEvent, &CloseMenu) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    pub fn has_callback(&self) -> bool {
        self.on_select.is_some()
    }

    /// Runs the callback, returning whether there was one.
    pub fn select(&self, event: &SelectEvent, close: &CloseMenu) -> bool {
        match &self.on_select {
            Some(f) => {
                f(event, close);
                true
            }
            None => false,
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for MenuAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("content", &self.content)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// Back-reference to the point the menu was opened from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOrigin {
    pub pos: Point,
    pub center_anchor: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub rect: Dimensions,
    pub anchors: AnchorRing,
}

impl Measurement {
    pub fn new(rect: Dimensions) -> Self {
        Self {
            rect,
            anchors: AnchorRing::from_size(rect.width, rect.height),
        }
    }
}

/// An item only learns its size after the host has rendered it once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemPhase {
    Placeholder,
    Measured(Measurement),
}

#[derive(Debug, Clone)]
pub struct TreeItem<C> {
    pub action: MenuAction<C>,
    pub origin: Point,
    pub visible: bool,
    pub phase: ItemPhase,
}

impl<C> TreeItem<C> {
    pub fn placeholder(action: MenuAction<C>, origin: Point) -> Self {
        Self {
            action,
            origin,
            visible: false,
            phase: ItemPhase::Placeholder,
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match &self.phase {
            ItemPhase::Placeholder => None,
            ItemPhase::Measured(m) => Some(m),
        }
    }

    /// Absolute position of one of the item's connector anchors.
    pub fn anchor_pos(&self, anchor: Anchor) -> Option<Point> {
        self.measurement()
            .map(|m| self.origin + m.anchors.get(anchor).pos)
    }

    /// Moves the item into the measured phase. Returns `false` when the size
    /// is unchanged, so hosts can stop their measure/redraw loop.
    pub fn measure(&mut self, width: f64, height: f64) -> bool {
        if let ItemPhase::Measured(m) = &self.phase
            && m.rect.width == width
            && m.rect.height == height
        {
            return false;
        }
        let rect = Dimensions::centered(self.origin, width, height);
        self.phase = ItemPhase::Measured(Measurement::new(rect));
        true
    }

    /// Hit area of the item, once it has been measured and revealed.
    pub fn hit_rect(&self) -> Option<Dimensions> {
        self.measurement().filter(|_| self.visible).map(|m| m.rect)
    }

    /// Border polygon in item-local coordinates (top left of the box at 0,0),
    /// every corner cut at [`CORNER_SIZE`]. The stroke is kept inside.
    pub fn outline(&self) -> Option<[Point; 8]> {
        let m = self.measurement()?;
        let (w, h) = (m.rect.width, m.rect.height);
        let s = STROKE_WIDTH / 2.0;
        let c = CORNER_SIZE;

        Some([
            Point::new(s, c),
            Point::new(c, s),
            Point::new(w - c, s),
            Point::new(w - s, c),
            Point::new(w - s, h - c),
            Point::new(w - c, h - s),
            Point::new(c, h - s),
            Point::new(s, h - c),
        ])
    }
}

#[derive(Debug, Clone)]
pub enum Occupant<C> {
    Vacant,
    ClickOrigin(ClickOrigin),
    Item(TreeItem<C>),
}

/// What sits at each anchor around the center item.
#[derive(Debug, Clone)]
pub struct CenterItemNodes<C> {
    slots: [Occupant<C>; 8],
}

impl<C> Default for CenterItemNodes<C> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| Occupant::Vacant),
        }
    }
}

impl<C> CenterItemNodes<C> {
    pub fn get(&self, anchor: Anchor) -> &Occupant<C> {
        &self.slots[anchor.as_index()]
    }

    pub fn insert(&mut self, anchor: Anchor, occupant: Occupant<C>) {
        self.slots[anchor.as_index()] = occupant;
    }

    pub fn item(&self, anchor: Anchor) -> Option<&TreeItem<C>> {
        match self.get(anchor) {
            Occupant::Item(item) => Some(item),
            Occupant::Vacant | Occupant::ClickOrigin(_) => None,
        }
    }

    pub fn item_mut(&mut self, anchor: Anchor) -> Option<&mut TreeItem<C>> {
        match &mut self.slots[anchor.as_index()] {
            Occupant::Item(item) => Some(item),
            Occupant::Vacant | Occupant::ClickOrigin(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Anchor, &Occupant<C>)> {
        ANCHORS.iter().copied().zip(self.slots.iter())
    }

    pub fn items(&self) -> impl Iterator<Item = (Anchor, &TreeItem<C>)> {
        self.iter().filter_map(|(anchor, occupant)| match occupant {
            Occupant::Item(item) => Some((anchor, item)),
            Occupant::Vacant | Occupant::ClickOrigin(_) => None,
        })
    }

    pub fn click_origin(&self) -> Option<(Anchor, &ClickOrigin)> {
        self.iter().find_map(|(anchor, occupant)| match occupant {
            Occupant::ClickOrigin(origin) => Some((anchor, origin)),
            Occupant::Vacant | Occupant::Item(_) => None,
        })
    }
}
