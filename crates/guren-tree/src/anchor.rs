use crate::error::TreeError;
use crate::geometry::{self, Point};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// Corner length of the clipped item border.
pub const CORNER_SIZE: f64 = 30.0;
pub const STROKE_WIDTH: f64 = 4.0;
/// Distance a corner anchor sits inside the item's bounding box on each axis.
pub const CORNER_INSET: f64 = (CORNER_SIZE + STROKE_WIDTH / 2.0) / 2.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    #[strum(to_string = "topLeft", serialize = "nw", serialize = "0")]
    TopLeft,
    #[strum(to_string = "top", serialize = "n", serialize = "1")]
    Top,
    #[strum(to_string = "topRight", serialize = "ne", serialize = "2")]
    TopRight,
    #[strum(to_string = "right", serialize = "e", serialize = "3")]
    Right,
    #[strum(to_string = "bottomRight", serialize = "se", serialize = "4")]
    BottomRight,
    #[strum(to_string = "bottom", serialize = "s", serialize = "5")]
    Bottom,
    #[strum(to_string = "bottomLeft", serialize = "sw", serialize = "6")]
    BottomLeft,
    #[strum(to_string = "left", serialize = "w", serialize = "7")]
    Left,
}

/// Ring order, clockwise from the top left corner.
pub const ANCHORS: [Anchor; 8] = [
    Anchor::TopLeft,
    Anchor::Top,
    Anchor::TopRight,
    Anchor::Right,
    Anchor::BottomRight,
    Anchor::Bottom,
    Anchor::BottomLeft,
    Anchor::Left,
];

/// Placement slots for actions: the ring without the two horizontal anchors.
pub const ANCHORS6: [Anchor; 6] = [
    Anchor::TopLeft,
    Anchor::Top,
    Anchor::TopRight,
    Anchor::BottomRight,
    Anchor::Bottom,
    Anchor::BottomLeft,
];

impl Anchor {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    /// Where a child placed at this anchor sits, relative to its parent's center.
    pub fn layout_offset(&self) -> Point {
        match self {
            Self::TopLeft => Point::new(-300.0, -100.0),
            Self::Top => Point::new(0.0, -200.0),
            Self::TopRight => Point::new(300.0, -100.0),
            Self::Right => Point::new(350.0, 0.0),
            Self::BottomRight => Point::new(300.0, 100.0),
            Self::Bottom => Point::new(0.0, 200.0),
            Self::BottomLeft => Point::new(-300.0, 100.0),
            Self::Left => Point::new(-350.0, 0.0),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSet {
    #[default]
    #[strum(to_string = "six", serialize = "6")]
    Six,
    #[strum(to_string = "eight", serialize = "8")]
    Eight,
}

impl AnchorSet {
    pub fn anchors(&self) -> &'static [Anchor] {
        match self {
            Self::Six => &ANCHORS6,
            Self::Eight => &ANCHORS,
        }
    }

    /// Direction from `origin` towards `target`, restricted to what this set can emit.
    pub fn classify(&self, origin: Point, target: Point) -> Result<Anchor, TreeError> {
        match self {
            Self::Six => geometry::direction_6way(origin, target),
            Self::Eight => geometry::direction_8way(origin, target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPoint {
    pub active: bool,
    pub pos: Point,
}

/// Connector attachment points of one item, relative to its own center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRing([AnchorPoint; 8]);

impl AnchorRing {
    pub fn from_size(width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let mut ring = [AnchorPoint::default(); 8];
        for anchor in ANCHORS {
            let pos = match anchor {
                Anchor::TopLeft => Point::new(CORNER_INSET - hw, CORNER_INSET - hh),
                Anchor::Top => Point::new(0.0, -hh),
                Anchor::TopRight => Point::new(hw - CORNER_INSET, CORNER_INSET - hh),
                Anchor::Right => Point::new(hw, 0.0),
                Anchor::BottomRight => Point::new(hw - CORNER_INSET, hh - CORNER_INSET),
                Anchor::Bottom => Point::new(0.0, hh),
                Anchor::BottomLeft => Point::new(CORNER_INSET - hw, hh - CORNER_INSET),
                Anchor::Left => Point::new(-hw, 0.0),
            };
            ring[anchor.as_index()] = AnchorPoint { active: false, pos };
        }
        Self(ring)
    }

    pub fn get(&self, anchor: Anchor) -> &AnchorPoint {
        &self.0[anchor.as_index()]
    }

}
