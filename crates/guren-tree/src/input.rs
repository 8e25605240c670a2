use crate::anchor::Anchor;
use crate::error::KeyError;
use crate::geometry::Point;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A discrete key press, reduced to what the menu cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub enum MenuKey {
    Char(char),
    Escape,
    Enter,
}

impl FromStr for MenuKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Ok(Self::Escape),
            "enter" | "return" => Ok(Self::Enter),
            "space" => Ok(Self::Char(' ')),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c.to_ascii_lowercase())),
                    _ => Err(KeyError::UnknownKey(s.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Escape => f.write_str("escape"),
            Self::Enter => f.write_str("enter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum KeyCommand {
    Close,
    ActivateCenter,
    Select(Anchor),
}

impl FromStr for KeyCommand {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "center" | "centre" => Ok(Self::ActivateCenter),
            _ => s
                .parse::<Anchor>()
                .map(Self::Select)
                .map_err(|_| KeyError::UnknownCommand(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<MenuKey, KeyCommand>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Anchor::*;
        use KeyCommand::*;

        let bindings = [
            (MenuKey::Char('x'), Close),
            (MenuKey::Escape, Close),
            (MenuKey::Enter, ActivateCenter),
            (MenuKey::Char('5'), ActivateCenter),
            (MenuKey::Char('q'), Select(TopLeft)),
            (MenuKey::Char('w'), Select(Top)),
            (MenuKey::Char('e'), Select(TopRight)),
            (MenuKey::Char('d'), Select(BottomRight)),
            (MenuKey::Char('s'), Select(Bottom)),
            (MenuKey::Char('a'), Select(BottomLeft)),
            // numpad layout
            (MenuKey::Char('7'), Select(TopLeft)),
            (MenuKey::Char('8'), Select(Top)),
            (MenuKey::Char('9'), Select(TopRight)),
            (MenuKey::Char('6'), Select(Right)),
            (MenuKey::Char('3'), Select(BottomRight)),
            (MenuKey::Char('2'), Select(Bottom)),
            (MenuKey::Char('1'), Select(BottomLeft)),
            (MenuKey::Char('4'), Select(Left)),
        ];

        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl KeyMap {
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (MenuKey, KeyCommand)>,
    ) -> Self {
        self.bindings.extend(overrides);
        self
    }

    pub fn command(&self, key: MenuKey) -> Option<KeyCommand> {
        self.bindings.get(&key).copied()
    }
}

/// What triggered a selection, handed through to action callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectEvent {
    Pointer { button: u32, position: Point },
    Key(MenuKey),
    Programmatic,
}

/// Result of routing one input to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The action's callback ran.
    Invoked,
    /// The node was hit but has no callback.
    NoCallback,
    /// The menu's close callback ran.
    Closed,
    /// Nothing sits at the selected anchor.
    Vacant,
    /// Key without a binding.
    Unbound,
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Center,
    Item(Anchor),
    ClickOrigin,
    Background,
}
