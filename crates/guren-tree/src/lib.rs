//! Layout, input routing and reveal scheduling for a radial tree menu.
//!
//! The crate knows nothing about painting: hosts feed it measurements, timer
//! ticks, pointer positions and key presses, and read back the anchor map and
//! connector geometry.

pub mod anchor;
pub mod color;
pub mod connector;
pub mod error;
pub mod geometry;
pub mod input;
pub mod item;
pub mod keyboard;
pub mod layout;
pub mod macros;
pub mod menu;
pub mod reveal;

pub use anchor::{ANCHORS, ANCHORS6, Anchor, AnchorRing, AnchorSet};
pub use color::{ColorSpec, MenuStyle, hex2rgba, parse_color};
pub use connector::{Connector, ConnectorKind, Connectors};
pub use error::{ColorError, KeyError, TreeError};
pub use geometry::{Dimensions, Point};
pub use input::{Hit, KeyCommand, KeyMap, MenuKey, SelectEvent, SelectOutcome};
pub use item::{CenterItemNodes, ClickOrigin, CloseMenu, ItemPhase, MenuAction, Occupant, TreeItem};
pub use keyboard::{KeySubscription, KeyboardHub};
pub use menu::{MenuOptions, MountedMenu, NodeRef, RadialMenu};
pub use reveal::{DEFAULT_REVEAL_DELAY, RevealCounter};
