//! Panel layout for the full-screen windows (status, shop, items).
//!
//! Everything is laid out once on the 640x480 logical screen; drawing
//! multiplies by the window scale.

use taffy::{TaffyResult, TaffyTree};
use taffy::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Shrinks every edge by `by`.
    pub fn inset(self, by: f32) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
            width: (self.width - 2.0 * by).max(0.0),
            height: (self.height - 2.0 * by).max(0.0),
        }
    }

    /// Cell `index` of a `columns`-wide grid of `cell`-sized squares anchored at the top left.
    pub fn grid_cell(self, index: usize, columns: usize, cell: f32, gap: f32) -> Self {
        let columns = columns.max(1);
        let column = (index % columns) as f32;
        let row = (index / columns) as f32;
        Self::new(self.x + column * (cell + gap), self.y + row * (cell + gap), cell, cell)
    }
}

/// Fixed windows of the field and battle screens.
pub const MESSAGE_WINDOW: PanelRect = PanelRect::new(140.0, 334.0, 360.0, 140.0);
pub const COMMAND_WINDOW: PanelRect = PanelRect::new(16.0, 16.0, 300.0, 160.0);
pub const BATTLE_COMMAND_WINDOW: PanelRect = PanelRect::new(96.0, 338.0, 136.0, 136.0);
pub const BATTLE_HUD: PanelRect = PanelRect::new(248.0, 338.0, 376.0, 136.0);

/// Header strip, three side-by-side columns and a footer strip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenLayout {
    pub header: PanelRect,
    pub left: PanelRect,
    pub middle: PanelRect,
    pub right: PanelRect,
    pub footer: PanelRect,
}

/// Fractions of the screen given to each strip and column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proportions {
    pub header: f32,
    pub footer: f32,
    pub left: f32,
    pub middle: f32,
    pub right: f32,
}

pub const STATUS_PROPORTIONS: Proportions =
    Proportions { header: 0.1, footer: 0.2, left: 0.35, middle: 0.2, right: 0.35 };
pub const SHOP_PROPORTIONS: Proportions =
    Proportions { header: 0.1, footer: 0.2, left: 0.5, middle: 0.1, right: 0.4 };
pub const ITEM_PROPORTIONS: Proportions =
    Proportions { header: 0.1, footer: 0.3, left: 0.45, middle: 0.0, right: 0.55 };

const OUTER_PADDING: f32 = 8.0;
const COLUMN_GAP: f32 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenLayouts {
    pub status: ScreenLayout,
    pub shop: ScreenLayout,
    pub items: ScreenLayout,
}

impl ScreenLayouts {
    pub fn compute(width: f32, height: f32) -> TaffyResult<Self> {
        Ok(Self {
            status: compute_screen_layout(STATUS_PROPORTIONS, width, height)?,
            shop: compute_screen_layout(SHOP_PROPORTIONS, width, height)?,
            items: compute_screen_layout(ITEM_PROPORTIONS, width, height)?,
        })
    }
}

pub fn compute_screen_layout(
    proportions: Proportions,
    width: f32,
    height: f32,
) -> TaffyResult<ScreenLayout> {
    let mut taffy: TaffyTree<()> = TaffyTree::new();

    let strip = |fraction: f32| Style {
        size: Size { width: percent(1.0), height: percent(fraction) },
        flex_shrink: 0.0,
        ..Default::default()
    };
    let column = |fraction: f32, gap: f32| Style {
        size: Size { width: percent(fraction), height: auto() },
        margin: taffy::Rect { left: length(gap), right: zero(), top: zero(), bottom: zero() },
        flex_shrink: 1.0,
        ..Default::default()
    };

    let header = taffy.new_leaf(strip(proportions.header))?;
    let footer = taffy.new_leaf(strip(proportions.footer))?;
    let left = taffy.new_leaf(column(proportions.left, 0.0))?;
    let middle = taffy.new_leaf(column(proportions.middle, COLUMN_GAP))?;
    let right = taffy.new_leaf(column(proportions.right, COLUMN_GAP))?;
    let body = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            justify_content: Some(JustifyContent::SpaceBetween),
            size: Size { width: percent(1.0), height: auto() },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[left, middle, right],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: length(width), height: length(height) },
            padding: taffy::Rect {
                left: length(OUTER_PADDING),
                right: length(OUTER_PADDING),
                top: length(OUTER_PADDING),
                bottom: length(OUTER_PADDING),
            },
            ..Default::default()
        },
        &[header, body, footer],
    )?;

    let available = Size {
        width: AvailableSpace::Definite(width),
        height: AvailableSpace::Definite(height),
    };
    taffy.compute_layout(root, available)?;

    let l_root = taffy.layout(root)?;
    let l_body = taffy.layout(body)?;
    Ok(ScreenLayout {
        header: panel_rect(taffy.layout(header)?, &[l_root]),
        left: panel_rect(taffy.layout(left)?, &[l_root, l_body]),
        middle: panel_rect(taffy.layout(middle)?, &[l_root, l_body]),
        right: panel_rect(taffy.layout(right)?, &[l_root, l_body]),
        footer: panel_rect(taffy.layout(footer)?, &[l_root]),
    })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(proportions: Proportions) -> ScreenLayout {
        compute_screen_layout(proportions, 640.0, 480.0).expect("layout computes")
    }

    #[test]
    fn strips_span_the_padded_width() {
        let screen = layout(STATUS_PROPORTIONS);
        assert_eq!(screen.header.x, OUTER_PADDING);
        assert_eq!(screen.header.width, 640.0 - 2.0 * OUTER_PADDING);
        assert!(screen.footer.y + screen.footer.height <= 480.0 - OUTER_PADDING + 0.5);
    }

    #[test]
    fn columns_sit_between_header_and_footer_in_order() {
        let screen = layout(SHOP_PROPORTIONS);
        let bottom = screen.header.y + screen.header.height;
        for panel in [screen.left, screen.middle, screen.right] {
            assert!(panel.y >= bottom - 0.5);
            assert!(panel.y + panel.height <= screen.footer.y + 0.5);
        }
        assert!(screen.left.x < screen.middle.x);
        assert!(screen.middle.x < screen.right.x);
        assert!(screen.right.x + screen.right.width <= 640.0 - OUTER_PADDING + 0.5);
    }

    #[test]
    fn item_screen_has_no_middle_column() {
        let screen = layout(ITEM_PROPORTIONS);
        assert_eq!(screen.middle.width, 0.0);
        assert!(screen.right.width > screen.left.width);
    }

    #[test]
    fn grid_cells_step_by_cell_and_gap() {
        let panel = PanelRect::new(10.0, 20.0, 200.0, 200.0);
        assert_eq!(panel.grid_cell(0, 5, 32.0, 4.0), PanelRect::new(10.0, 20.0, 32.0, 32.0));
        assert_eq!(panel.grid_cell(7, 5, 32.0, 4.0), PanelRect::new(82.0, 56.0, 32.0, 32.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        let tiny = PanelRect::new(0.0, 0.0, 4.0, 4.0).inset(5.0);
        assert_eq!((tiny.width, tiny.height), (0.0, 0.0));
    }
}
