use crate::anchor::{Anchor, AnchorSet};
use thiserror::Error;

/// Layout invariants that only break through a programming defect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("no direction between points (delta {dx}, {dy})")]
    Undirected { dx: f64, dy: f64 },
    #[error("click origin anchor {anchor} is not part of the {set} anchor set")]
    OriginNotInCandidates { anchor: Anchor, set: AnchorSet },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unrecognised colour '{0}'")]
    Unrecognised(String),
    #[error("colour channel '{0}' out of range")]
    Channel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("unknown key command '{0}'")]
    UnknownCommand(String),
}
