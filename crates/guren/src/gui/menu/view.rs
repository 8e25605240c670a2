use super::model::{ItemContent, content_size};
use super::{
    FONT_SIZE, ICON_GAP, ICON_SIZE, LINE_SPACING, ORIGIN_DOT_HOVER_RADIUS, ORIGIN_DOT_RADIUS,
    ORIGIN_DOT_STROKE, PADDING_X,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use guren_tree::anchor::STROKE_WIDTH;
use guren_tree::{Connectors, Dimensions, Hit, NodeRef, Point, RadialMenu, TreeItem};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn select_font(cr: &Context) {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(FONT_SIZE);
}

/// Measures every node's content and reports the sizes back to the menu.
/// Returns whether any node changed size.
pub fn measure(cr: &Context, menu: &mut RadialMenu<ItemContent>) -> Result<bool, cairo::Error> {
    cr.save()?;
    select_font(cr);
    let line_height = cr.font_extents()?.height();

    let mut changed = false;
    for node in menu.node_refs() {
        let Some(item) = menu.item(node) else {
            continue;
        };
        let widths = item
            .action
            .content
            .lines()
            .map(|line| cr.text_extents(line).map(|ext| ext.x_advance()))
            .collect::<Result<Vec<_>, _>>()?;
        let has_icon = item.action.content.pixbuf.is_some();
        let (width, height) = content_size(&widths, line_height, has_icon);
        let rect = Dimensions::centered(item.origin, width, height);
        changed |= menu.update_dimensions(node, rect);
    }

    cr.restore()?;
    Ok(changed)
}

struct ItemRenderer<'a> {
    item: &'a TreeItem<ItemContent>,
    rect: Dimensions,
    hovered: bool,
}

impl<'a> ItemRenderer<'a> {
    fn new(item: &'a TreeItem<ItemContent>, hovered: bool) -> Option<Self> {
        let rect = item.hit_rect()?;
        Some(Self {
            item,
            rect,
            hovered,
        })
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.rect.left, self.rect.top);
        self.draw_box(cr, colors)?;
        self.draw_content(cr, colors)?;
        cr.restore()
    }

    fn draw_box(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(outline) = self.item.outline() else {
            return Ok(());
        };

        cr.new_path();
        for p in &outline {
            cr.line_to(p.x, p.y);
        }
        cr.close_path();

        set_color(
            cr,
            if self.hovered {
                colors.item_hovered
            } else {
                colors.item
            },
        );
        cr.fill_preserve()?;

        set_color(cr, colors.secondary);
        cr.set_line_width(STROKE_WIDTH);
        cr.stroke()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let content = &self.item.action.content;
        let mut x = PADDING_X;

        if let Some(pixbuf) = &content.pixbuf {
            self.draw_icon(cr, pixbuf, x)?;
            x += ICON_SIZE as f64 + ICON_GAP;
        }

        select_font(cr);
        set_color(cr, colors.text);
        let fe = cr.font_extents()?;
        let lines: Vec<&str> = content.lines().collect();
        let block = lines.len() as f64 * fe.height()
            + lines.len().saturating_sub(1) as f64 * LINE_SPACING;

        let mut y = (self.rect.height - block) / 2.0 + fe.ascent();
        for line in lines {
            cr.move_to(x, y);
            cr.show_text(line)?;
            y += fe.height() + LINE_SPACING;
        }
        Ok(())
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf, x: f64) -> Result<(), cairo::Error> {
        let y = (self.rect.height - pixbuf.height() as f64) / 2.0;
        cr.set_source_pixbuf(pixbuf, x, y);
        cr.paint()
    }
}

fn draw_connectors(
    cr: &Context,
    connectors: &Connectors,
    colors: &ThemeColors,
    origin_hovered: bool,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.secondary);
    cr.set_line_width(STROKE_WIDTH);
    for line in &connectors.lines {
        cr.move_to(line.from.x, line.from.y);
        cr.line_to(line.to.x, line.to.y);
        cr.stroke()?;
    }

    if let Some(dot) = connectors.origin_dot {
        draw_origin_dot(cr, dot, origin_dot_radius(origin_hovered), colors)?;
    }
    Ok(())
}

fn origin_dot_radius(hovered: bool) -> f64 {
    if hovered {
        ORIGIN_DOT_HOVER_RADIUS
    } else {
        ORIGIN_DOT_RADIUS
    }
}

fn draw_origin_dot(
    cr: &Context,
    dot: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.new_sub_path();
    cr.arc(dot.x, dot.y, radius, 0.0, 2.0 * PI);
    set_color(cr, colors.primary);
    cr.fill_preserve()?;
    set_color(cr, colors.secondary);
    cr.set_line_width(ORIGIN_DOT_STROKE);
    cr.stroke()
}

fn is_hovered(hovered: Hit, node: NodeRef) -> bool {
    match (hovered, node) {
        (Hit::Center, NodeRef::Center) => true,
        (Hit::Item(a), NodeRef::Anchor(b)) => a == b,
        _ => false,
    }
}

pub fn draw_backdrop(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.backdrop);
    cr.paint()
}

/// Paints one frame: connectors first, then every revealed node on top.
pub fn draw(
    cr: &Context,
    menu: &RadialMenu<ItemContent>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let hovered = menu.hovered();
    match menu.connectors() {
        Ok(connectors) => draw_connectors(cr, &connectors, colors, hovered == Hit::ClickOrigin)?,
        Err(e) => log::error!("Cannot draw connectors: {}", e),
    }

    for node in menu.node_refs() {
        if let Some(renderer) = menu
            .item(node)
            .and_then(|item| ItemRenderer::new(item, is_hovered(hovered, node)))
        {
            renderer.draw(cr, colors)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guren_tree::Anchor;

    #[test]
    fn test_hover_matches_node() {
        assert!(is_hovered(Hit::Center, NodeRef::Center));
        assert!(is_hovered(Hit::Item(Anchor::Top), NodeRef::Anchor(Anchor::Top)));
        assert!(!is_hovered(Hit::Item(Anchor::Top), NodeRef::Anchor(Anchor::Bottom)));
        assert!(!is_hovered(Hit::ClickOrigin, NodeRef::Center));
        assert!(!is_hovered(Hit::Background, NodeRef::Anchor(Anchor::Left)));
    }

    #[test]
    fn test_origin_dot_grows_on_hover() {
        assert_eq!(origin_dot_radius(false), 8.0);
        assert_eq!(origin_dot_radius(true), 15.0);
    }
}
