use crate::anchor::{Anchor, AnchorSet};
use crate::error::TreeError;
use crate::geometry::Point;
use crate::item::{CenterItemNodes, ItemPhase, Occupant, TreeItem};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorKind {
    /// Line to the item at this center anchor.
    Item(Anchor),
    /// Line back to the point the menu was opened from.
    ClickOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub from: Point,
    pub to: Point,
}

/// Everything the painter needs between the nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connectors {
    pub lines: Vec<Connector>,
    pub origin_dot: Option<Point>,
}

/// Computes connector endpoints for the current state of the menu.
///
/// Nothing is drawn until the center has been measured and revealed. Items
/// still waiting for a size or for their turn in the reveal are skipped.
pub fn connectors<C>(
    center: &TreeItem<C>,
    nodes: &CenterItemNodes<C>,
    set: AnchorSet,
) -> Result<Connectors, TreeError> {
    let mut out = Connectors::default();
    if !center.visible || center.measurement().is_none() {
        return Ok(out);
    }

    for (anchor, occupant) in nodes.iter() {
        let Some(to) = center.anchor_pos(anchor) else {
            continue;
        };

        match occupant {
            Occupant::Vacant => {}
            Occupant::ClickOrigin(origin) => {
                out.lines.push(Connector {
                    kind: ConnectorKind::ClickOrigin,
                    from: origin.pos,
                    to,
                });
                out.origin_dot = Some(origin.pos);
            }
            Occupant::Item(item) => match &item.phase {
                ItemPhase::Placeholder => {}
                ItemPhase::Measured(m) => {
                    if !item.visible {
                        continue;
                    }
                    let facing = set.classify(item.origin, center.origin)?;
                    out.lines.push(Connector {
                        kind: ConnectorKind::Item(anchor),
                        from: item.origin + m.anchors.get(facing).pos,
                        to,
                    });
                }
            },
        }
    }

    Ok(out)
}
