use crate::anchor::{ANCHORS, Anchor, AnchorSet};
use crate::error::TreeError;
use crate::geometry::{self, Point};
use crate::item::{CenterItemNodes, ClickOrigin, MenuAction, Occupant, TreeItem};

/// Where assignment and reveal start when the click origin can't be placed.
pub const DEFAULT_REFERENCE_ANCHOR: Anchor = Anchor::TopLeft;

#[derive(Debug, Clone)]
pub struct Layout<C> {
    pub nodes: CenterItemNodes<C>,
    pub click_origin: Option<Anchor>,
    pub placed: usize,
    pub dropped: usize,
}

impl<C> Layout<C> {
    /// Anchor the reveal order is rotated to.
    pub fn reference_anchor(&self) -> Anchor {
        self.click_origin.unwrap_or(DEFAULT_REFERENCE_ANCHOR)
    }
}

/// Builds the anchor map around `center` once, at open time.
///
/// The click origin claims the center anchor facing it; actions then fill the
/// remaining anchors of `set` starting right after that anchor. Actions that
/// don't fit are dropped in input order.
pub fn layout<C>(
    center: Point,
    click_origin: Point,
    actions: impl IntoIterator<Item = MenuAction<C>>,
    set: AnchorSet,
) -> Result<Layout<C>, TreeError> {
    let mut nodes = CenterItemNodes::default();

    let origin_anchor = geometry::direction_4way(center, click_origin);
    if let Some(anchor) = origin_anchor {
        nodes.insert(
            anchor,
            Occupant::ClickOrigin(ClickOrigin {
                pos: click_origin,
                center_anchor: anchor,
            }),
        );
    }

    let free = free_anchors(set, origin_anchor)?;
    let mut placed = 0;
    let mut dropped = 0;

    for action in actions {
        match free.get(placed) {
            Some(&anchor) => {
                let pos = child_position(anchor, center);
                nodes.insert(anchor, Occupant::Item(TreeItem::placeholder(action, pos)));
                placed += 1;
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!(
            "{} menu action(s) dropped, only {} anchors are free",
            dropped,
            free.len()
        );
    }

    Ok(Layout {
        nodes,
        click_origin: origin_anchor,
        placed,
        dropped,
    })
}

/// Assignment order of the anchors left over for actions.
pub fn free_anchors(
    set: AnchorSet,
    click_origin: Option<Anchor>,
) -> Result<Vec<Anchor>, TreeError> {
    let mut free = set.anchors().to_vec();
    if let Some(anchor) = click_origin {
        let idx = free
            .iter()
            .position(|&a| a == anchor)
            .ok_or(TreeError::OriginNotInCandidates { anchor, set })?;
        free.remove(idx);
        geometry::rotate(&mut free, idx as isize);
    }
    Ok(free)
}

pub fn child_position(anchor: Anchor, parent: Point) -> Point {
    parent + anchor.layout_offset()
}

/// Item anchors in the order they appear, starting from `reference`.
pub fn reveal_order<C>(nodes: &CenterItemNodes<C>, reference: Anchor) -> Vec<Anchor> {
    let mut ring = ANCHORS;
    geometry::rotate(&mut ring, reference.as_index() as isize);
    ring.into_iter()
        .filter(|&anchor| nodes.item(anchor).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::ANCHORS6;

    const CENTER: Point = Point { x: 960.0, y: 540.0 };

    fn actions(n: usize) -> Vec<MenuAction<usize>> {
        (0..n).map(MenuAction::new).collect()
    }

    fn content_at(layout: &Layout<usize>, anchor: Anchor) -> Option<usize> {
        layout.nodes.item(anchor).map(|item| item.action.content)
    }

    #[test]
    fn test_bottom_right_origin_fans_out_after_it() {
        let layout = layout(CENTER, Point::new(1500.0, 900.0), actions(6), AnchorSet::Six).unwrap();

        assert_eq!(layout.click_origin, Some(Anchor::BottomRight));
        match layout.nodes.get(Anchor::BottomRight) {
            Occupant::ClickOrigin(origin) => {
                assert_eq!(origin.pos, Point::new(1500.0, 900.0));
                assert_eq!(origin.center_anchor, Anchor::BottomRight);
            }
            other => panic!("expected click origin, got {other:?}"),
        }

        let expected = [
            (Anchor::Bottom, 0),
            (Anchor::BottomLeft, 1),
            (Anchor::TopLeft, 2),
            (Anchor::Top, 3),
            (Anchor::TopRight, 4),
        ];
        for (anchor, content) in expected {
            assert_eq!(content_at(&layout, anchor), Some(content), "{anchor}");
        }
        assert_eq!((layout.placed, layout.dropped), (5, 1));

        // every placement slot is taken exactly once
        for anchor in ANCHORS6 {
            assert!(!matches!(layout.nodes.get(anchor), Occupant::Vacant));
        }
        assert!(matches!(layout.nodes.get(Anchor::Right), Occupant::Vacant));
        assert!(matches!(layout.nodes.get(Anchor::Left), Occupant::Vacant));
    }

    #[test]
    fn test_each_quadrant_starts_after_its_anchor() {
        let cases = [
            (Point::new(10.0, 10.0), Anchor::TopLeft, Anchor::Top),
            (Point::new(1900.0, 10.0), Anchor::TopRight, Anchor::BottomRight),
            (Point::new(10.0, 1000.0), Anchor::BottomLeft, Anchor::TopLeft),
        ];
        for (origin, origin_anchor, first) in cases {
            let layout = layout(CENTER, origin, actions(1), AnchorSet::Six).unwrap();
            assert_eq!(layout.click_origin, Some(origin_anchor));
            assert_eq!(content_at(&layout, first), Some(0));
        }
    }

    #[test]
    fn test_overflow_drops_in_input_order() {
        let unresolved = Point::new(f64::NAN, f64::NAN);
        let layout = layout(CENTER, unresolved, actions(8), AnchorSet::Six).unwrap();

        assert_eq!(layout.click_origin, None);
        assert!(layout.nodes.click_origin().is_none());
        assert_eq!((layout.placed, layout.dropped), (6, 2));
        for (i, anchor) in ANCHORS6.iter().enumerate() {
            assert_eq!(content_at(&layout, *anchor), Some(i));
        }
        let placed: Vec<_> = layout.nodes.items().map(|(_, i)| i.action.content).collect();
        assert!(!placed.contains(&6) && !placed.contains(&7));
    }

    #[test]
    fn test_positions_follow_offset_table() {
        let layout = layout(CENTER, Point::new(0.0, 0.0), actions(5), AnchorSet::Six).unwrap();
        for (anchor, item) in layout.nodes.items() {
            assert_eq!(item.origin, CENTER + anchor.layout_offset());
            assert!(!item.visible);
        }
        assert_eq!(
            layout.nodes.item(Anchor::Top).map(|i| i.origin),
            Some(Point::new(960.0, 340.0))
        );
    }

    #[test]
    fn test_eight_anchor_set_uses_horizontals() {
        let layout = layout(
            CENTER,
            Point::new(1500.0, 900.0),
            actions(8),
            AnchorSet::Eight,
        )
        .unwrap();
        assert_eq!((layout.placed, layout.dropped), (7, 1));
        assert_eq!(content_at(&layout, Anchor::Left), Some(2));
        assert_eq!(content_at(&layout, Anchor::Right), Some(6));
    }

    #[test]
    fn test_free_anchors_rejects_foreign_origin() {
        assert_eq!(
            free_anchors(AnchorSet::Six, Some(Anchor::Right)),
            Err(TreeError::OriginNotInCandidates {
                anchor: Anchor::Right,
                set: AnchorSet::Six
            })
        );
        assert_eq!(free_anchors(AnchorSet::Six, None).unwrap(), ANCHORS6.to_vec());
    }

    #[test]
    fn test_reveal_order_matches_assignment() {
        let with_origin =
            layout(CENTER, Point::new(1500.0, 900.0), actions(3), AnchorSet::Six).unwrap();
        assert_eq!(
            reveal_order(&with_origin.nodes, with_origin.reference_anchor()),
            vec![Anchor::Bottom, Anchor::BottomLeft, Anchor::TopLeft]
        );

        let without_origin =
            layout(CENTER, Point::new(f64::NAN, 0.0), actions(2), AnchorSet::Six).unwrap();
        assert_eq!(without_origin.reference_anchor(), Anchor::TopLeft);
        assert_eq!(
            reveal_order(&without_origin.nodes, without_origin.reference_anchor()),
            vec![Anchor::TopLeft, Anchor::Top]
        );
    }

    #[test]
    fn test_no_actions() {
        let layout: Layout<usize> =
            layout(CENTER, Point::new(0.0, 0.0), Vec::new(), AnchorSet::Six).unwrap();
        assert_eq!(layout.nodes.items().count(), 0);
        assert_eq!(layout.click_origin, Some(Anchor::TopLeft));
    }
}
