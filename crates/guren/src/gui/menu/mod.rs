pub mod model;
pub mod view;

pub use model::{ItemContent, MenuSession, RevealTimer, build_action};
pub use view::{draw, draw_backdrop, measure};

pub const MIN_ITEM_WIDTH: f64 = 200.0;
pub const MIN_ITEM_HEIGHT: f64 = 60.0;
pub const PADDING_X: f64 = 20.0;
pub const PADDING_Y: f64 = 10.0;
pub const ICON_SIZE: i32 = 32;
pub const ICON_GAP: f64 = 10.0;
pub const FONT_SIZE: f64 = 16.0;
pub const LINE_SPACING: f64 = 4.0;
pub const ORIGIN_DOT_RADIUS: f64 = 8.0;
pub const ORIGIN_DOT_HOVER_RADIUS: f64 = 15.0;
pub const ORIGIN_DOT_STROKE: f64 = 5.0;
