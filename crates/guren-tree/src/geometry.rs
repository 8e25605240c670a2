use crate::anchor::Anchor;
use crate::error::TreeError;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Bounding box of a rendered element, as reported by the measurement provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub x: f64,
    pub y: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Dimensions {
    /// A box of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let (left, top) = (center.x - width / 2.0, center.y - height / 2.0);
        Self {
            width,
            height,
            top,
            left,
            x: left,
            y: top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Quadrant of `target` as seen from `origin`. Only ever yields a diagonal;
/// `None` when the delta is not comparable (NaN).
pub fn direction_4way(origin: Point, target: Point) -> Option<Anchor> {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    if dx < 0.0 && dy < 0.0 {
        Some(Anchor::TopLeft)
    } else if dx >= 0.0 && dy < 0.0 {
        Some(Anchor::TopRight)
    } else if dx >= 0.0 && dy >= 0.0 {
        Some(Anchor::BottomRight)
    } else if dx < 0.0 && dy >= 0.0 {
        Some(Anchor::BottomLeft)
    } else {
        None
    }
}

/// Direction of `target` as seen from `origin`, separating exact verticals.
pub fn direction_6way(origin: Point, target: Point) -> Result<Anchor, TreeError> {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    if dx < 0.0 && dy < 0.0 {
        Ok(Anchor::TopLeft)
    } else if dx == 0.0 && dy < 0.0 {
        Ok(Anchor::Top)
    } else if dx > 0.0 && dy < 0.0 {
        Ok(Anchor::TopRight)
    } else if dx > 0.0 && dy >= 0.0 {
        Ok(Anchor::BottomRight)
    } else if dx == 0.0 && dy > 0.0 {
        Ok(Anchor::Bottom)
    } else if dx < 0.0 && dy >= 0.0 {
        Ok(Anchor::BottomLeft)
    } else {
        Err(TreeError::Undirected { dx, dy })
    }
}

/// Like [`direction_6way`], but exact horizontals map to `Right` / `Left`.
pub fn direction_8way(origin: Point, target: Point) -> Result<Anchor, TreeError> {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    if dy == 0.0 && dx > 0.0 {
        Ok(Anchor::Right)
    } else if dy == 0.0 && dx < 0.0 {
        Ok(Anchor::Left)
    } else {
        direction_6way(origin, target)
    }
}

/// Rotates `items` left by `count`, wrapping negative and oversized counts.
pub fn rotate<T>(items: &mut [T], count: isize) {
    if items.is_empty() {
        return;
    }
    let shift = count.rem_euclid(items.len() as isize) as usize;
    items.rotate_left(shift);
}
