//! Draws one frame of whichever screen the game is on.
//!
//! All coordinates are on the 640x480 logical screen and go through
//! `scaled` on the way to macroquad.

use std::ops::Range;

use crate::assets::{Assets, STAT_ICONS, UiImage, placeholder_color, sprite_cell};
use crate::game_layout::{
    BATTLE_COMMAND_WINDOW, BATTLE_HUD, COMMAND_WINDOW, MESSAGE_WINDOW, PanelRect, ScreenLayout,
    ScreenLayouts,
};
use crate::ui_text::{debug_lines, item_caption, price_line, stat_row};
use crate::window_config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use lanoir_app::app_loop::AppState;
use lanoir_core::battle::{Battle, BattleCommand};
use lanoir_core::content::SheetLayout;
use lanoir_core::entity::Body;
use lanoir_core::inventory::{
    BAG_SLOTS, Cursor, EquipSlot, INVENTORY_COLUMNS, INVENTORY_SLOTS, Slots, Zone,
};
use lanoir_core::item::Item;
use lanoir_core::menu::{Command, TitleOption};
use lanoir_core::message::MessageBox;
use lanoir_core::shop::{SELL_SLOT, SHELF_SLOTS, ShopCursor};
use lanoir_core::skill::{EffectPlayback, blend_rgba};
use lanoir_core::stats::Stat;
use lanoir_core::status::Panel;
use lanoir_core::{Game, GameMode, PixelPos, Pos, TILE_SIZE};
use macroquad::prelude::*;

const FONT_SIZE: f32 = 16.0;
const LINE_STEP: f32 = 22.0;
const WINDOW_BORDER: f32 = 2.0;
const WINDOW_FILL: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.85 };
const HIGHLIGHT: Color = Color { r: 1.0, g: 0.85, b: 0.3, a: 1.0 };
pub const SLOT: f32 = 36.0;
pub const SLOT_GAP: f32 = 4.0;
const SHELF_COLUMNS: usize = 3;
const EQUIPMENT_COLUMNS: usize = 2;
const PANEL_TITLE: f32 = 22.0;
/// Walk poses when a sheet is missing from `charachip.dat`.
const FALLBACK_SHEET: SheetLayout = SheetLayout { rows: 4, columns: 2 };

pub fn draw_frame(app: &AppState, assets: &Assets, layouts: &ScreenLayouts, scale: f32) {
    let game = &app.game;
    let painter = Painter { assets, scale };
    clear_background(BLACK);

    match game.mode() {
        GameMode::Title => draw_title(&painter, game),
        GameMode::Field | GameMode::Talk | GameMode::CommandMenu => {
            draw_field(&painter, game);
            if game.command_window_visible() {
                draw_command_window(&painter, game);
            }
        }
        GameMode::BattleInit | GameMode::BattleCommand | GameMode::BattleProcess => {
            if let Some(battle) = game.battle() {
                draw_battle(&painter, game, battle);
            }
        }
        GameMode::Status => draw_status(&painter, game, &layouts.status),
        GameMode::Shop => draw_shop(&painter, game, &layouts.shop),
        GameMode::ItemManagement => draw_items(&painter, game, &layouts.items),
    }

    if game.message().is_visible() {
        draw_message(&painter, game.message());
    }
    if app.show_debug {
        draw_debug(&painter, game);
    }
}

struct Painter<'a> {
    assets: &'a Assets,
    scale: f32,
}

impl Painter<'_> {
    fn s(&self, value: f32) -> f32 {
        scaled(value, self.scale)
    }

    /// `y` is the baseline.
    fn text(&self, text: &str, x: f32, y: f32, color: Color) {
        draw_text_ex(
            text,
            self.s(x),
            self.s(y),
            TextParams {
                font: self.assets.font.as_ref(),
                font_size: self.s(FONT_SIZE).round() as u16,
                color,
                ..Default::default()
            },
        );
    }

    fn window(&self, rect: PanelRect) {
        self.fill(rect, WINDOW_FILL);
        draw_rectangle_lines(
            self.s(rect.x),
            self.s(rect.y),
            self.s(rect.width),
            self.s(rect.height),
            self.s(WINDOW_BORDER),
            WHITE,
        );
    }

    fn outline(&self, rect: PanelRect, color: Color) {
        draw_rectangle_lines(
            self.s(rect.x),
            self.s(rect.y),
            self.s(rect.width),
            self.s(rect.height),
            self.s(1.0),
            color,
        );
    }

    fn fill(&self, rect: PanelRect, color: Color) {
        let (x, y) = (self.s(rect.x), self.s(rect.y));
        draw_rectangle(x, y, self.s(rect.width), self.s(rect.height), color);
    }

    /// Draws `texture` into `rect`, or a tinted square keyed by `key` when it is missing.
    fn image(&self, texture: Option<&Texture2D>, key: &str, rect: PanelRect, source: Option<Rect>) {
        match texture {
            Some(texture) => draw_texture_ex(
                texture,
                self.s(rect.x),
                self.s(rect.y),
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(self.s(rect.width), self.s(rect.height))),
                    source,
                    ..Default::default()
                },
            ),
            None => self.fill(rect, placeholder_color(key)),
        }
    }

    fn backdrop(&self, image: UiImage) {
        if let Some(texture) = self.assets.ui(image) {
            self.image(Some(texture), image.stem(), full_screen(), None);
        }
    }

    /// Pointer to the left of a menu entry whose baseline is `y`.
    fn pointer(&self, image: UiImage, x: f32, y: f32) {
        let rect = PanelRect::new(x - 18.0, y - 14.0, 16.0, 16.0);
        match self.assets.ui(image) {
            Some(texture) => self.image(Some(texture), image.stem(), rect, None),
            None => draw_triangle(
                vec2(self.s(rect.x), self.s(rect.y + 2.0)),
                vec2(self.s(rect.x), self.s(rect.y + 14.0)),
                vec2(self.s(rect.x + 10.0), self.s(rect.y + 8.0)),
                WHITE,
            ),
        }
    }

    fn item_icon(&self, item: &Item, rect: PanelRect) {
        self.image(self.assets.item_icon(&item.name), &item.name, rect.inset(2.0), None);
    }
}

fn scaled(value: f32, scale: f32) -> f32 {
    value * scale
}

fn full_screen() -> PanelRect {
    PanelRect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

fn draw_title(painter: &Painter, game: &Game) {
    painter.backdrop(UiImage::Sky);
    painter.backdrop(UiImage::Title);
    if let Some(logo) = painter.assets.ui(UiImage::Logo) {
        let (width, height) = (logo.width(), logo.height());
        let rect = PanelRect::new((SCREEN_WIDTH - width) / 2.0, 60.0, width, height);
        painter.image(Some(logo), "logo", rect, None);
    }
    for (index, option) in TitleOption::ALL.iter().enumerate() {
        let y = 320.0 + index as f32 * 32.0;
        painter.text(option.label(), 280.0, y, WHITE);
        if index == game.title().cursor() {
            painter.pointer(UiImage::TitleCursor, 280.0, y);
        }
    }
}

/// Top-left of the screen in map pixels, keeping the leader centred.
pub fn camera_offset(leader: PixelPos) -> (f32, f32) {
    (leader.x as f32 - SCREEN_WIDTH / 2.0, leader.y as f32 - SCREEN_HEIGHT / 2.0)
}

/// Cells that can touch the screen, with one cell of margin on each side.
pub fn visible_cells(offset: (f32, f32)) -> (Range<i32>, Range<i32>) {
    let tile = TILE_SIZE as f32;
    let first_x = (offset.0 / tile).floor() as i32 - 1;
    let first_y = (offset.1 / tile).floor() as i32 - 1;
    let across = (SCREEN_WIDTH / tile).ceil() as i32 + 3;
    let down = (SCREEN_HEIGHT / tile).ceil() as i32 + 3;
    (first_x..first_x + across, first_y..first_y + down)
}

/// One character sprite to draw on the field.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDraw<'a> {
    pub sprite: &'a str,
    pub pixel: PixelPos,
    pub row: u32,
    pub column: u32,
    /// Breaks ties on the same pixel row; higher draws later.
    pub layer: u8,
}

impl<'a> SpriteDraw<'a> {
    pub fn of(sprite: &'a str, body: &Body, sheet: SheetLayout, layer: u8) -> Self {
        let row = (body.facing() as u32).min(sheet.rows.saturating_sub(1));
        Self { sprite, pixel: body.pixel(), row, column: body.sprite_column(sheet.columns), layer }
    }
}

/// Characters further down the screen are drawn over those above them.
pub fn sort_by_row(sprites: &mut [SpriteDraw]) {
    sprites.sort_by_key(|sprite| (sprite.pixel.y, sprite.layer));
}

fn field_sprites(game: &Game) -> Vec<SpriteDraw<'_>> {
    let members = game.party().members();
    let mut sprites: Vec<SpriteDraw> = game
        .map()
        .npcs()
        .map(|(_, npc)| SpriteDraw::of(&npc.sprite, &npc.body, npc.sheet, 0))
        .collect();
    for (index, member) in members.iter().enumerate() {
        let sheet = game.world().sprites.get(&member.sprite).unwrap_or(FALLBACK_SHEET);
        let layer = (members.len() - index) as u8;
        sprites.push(SpriteDraw::of(&member.sprite, &member.body, sheet, layer));
    }
    sort_by_row(&mut sprites);
    sprites
}

fn draw_field(painter: &Painter, game: &Game) {
    let map = game.map();
    let offset = camera_offset(game.party().leader().body.pixel());
    let tile = TILE_SIZE as f32;
    let cell_rect = |pixel: PixelPos| {
        PanelRect::new(pixel.x as f32 - offset.0, pixel.y as f32 - offset.1, tile, tile)
    };

    let (columns, rows) = visible_cells(offset);
    for y in rows {
        for x in columns.clone() {
            let pos = Pos { y, x };
            let id = map.tile_at(pos);
            let rect = cell_rect(pos.to_pixels());
            painter.image(painter.assets.tile(id), &id.to_string(), rect, None);
        }
    }

    for event in map.events() {
        let id = event.tile();
        let texture = painter.assets.tile(id);
        let mut rect = cell_rect(event.pos().to_pixels());
        if let Some(texture) = texture {
            rect.width = texture.width();
            rect.height = texture.height();
        }
        painter.image(texture, &id.to_string(), rect, None);
    }

    for sprite in field_sprites(game) {
        painter.image(
            painter.assets.sprite(sprite.sprite),
            sprite.sprite,
            cell_rect(sprite.pixel),
            Some(sprite_cell(sprite.row, sprite.column)),
        );
    }
}

/// Baseline position of command `index` in the two-column command window.
pub fn command_slot(index: usize) -> (f32, f32) {
    let column = (index / 4) as f32;
    let row = (index % 4) as f32;
    (COMMAND_WINDOW.x + 40.0 + column * 140.0, COMMAND_WINDOW.y + 36.0 + row * 32.0)
}

fn draw_command_window(painter: &Painter, game: &Game) {
    painter.window(COMMAND_WINDOW);
    for (index, command) in Command::ALL.iter().enumerate() {
        let (x, y) = command_slot(index);
        painter.text(command.label(), x, y, WHITE);
    }
    let (x, y) = command_slot(game.commands().cursor());
    painter.pointer(UiImage::Cursor, x, y);
}

fn draw_message(painter: &Painter, message: &MessageBox) {
    painter.window(MESSAGE_WINDOW);
    for (index, line) in message.visible_lines().iter().enumerate() {
        let y = MESSAGE_WINDOW.y + 32.0 + index as f32 * 32.0;
        painter.text(line, MESSAGE_WINDOW.x + 16.0, y, WHITE);
    }
    if message.more_marker_lit() {
        let rect = PanelRect::new(
            MESSAGE_WINDOW.x + MESSAGE_WINDOW.width / 2.0 - 8.0,
            MESSAGE_WINDOW.y + MESSAGE_WINDOW.height - 20.0,
            16.0,
            16.0,
        );
        match painter.assets.ui(UiImage::MoreCursor) {
            Some(texture) => painter.image(Some(texture), "more", rect, None),
            None => draw_triangle(
                vec2(painter.s(rect.x), painter.s(rect.y)),
                vec2(painter.s(rect.x + rect.width), painter.s(rect.y)),
                vec2(painter.s(rect.x + rect.width / 2.0), painter.s(rect.y + rect.height / 2.0)),
                WHITE,
            ),
        }
    }
}

fn draw_battle(painter: &Painter, game: &Game, battle: &Battle) {
    match painter.assets.ui(UiImage::BattleBackground) {
        Some(_) => painter.backdrop(UiImage::BattleBackground),
        None => painter.fill(full_screen(), DARKGREEN),
    }

    let enemy = battle.enemy();
    let texture = painter.assets.enemy(&enemy.name);
    let (width, height) = texture.map_or((96.0, 96.0), |t| (t.width(), t.height()));
    let enemy_rect =
        PanelRect::new((SCREEN_WIDTH - width) / 2.0, 200.0 - height / 2.0, width, height);
    painter.image(texture, &enemy.name, enemy_rect, None);
    painter.text(
        &format!("{} Lv{}", enemy.name, enemy.level),
        enemy_rect.x,
        enemy_rect.y - 8.0,
        WHITE,
    );

    if let Some(effect) = battle.effect() {
        draw_effect(painter, effect, enemy_rect);
    }

    if game.battle_commands_visible() {
        painter.window(BATTLE_COMMAND_WINDOW);
        for (index, command) in BattleCommand::ALL.iter().enumerate() {
            let y = BATTLE_COMMAND_WINDOW.y + 30.0 + index as f32 * 28.0;
            painter.text(command.label(), BATTLE_COMMAND_WINDOW.x + 32.0, y, WHITE);
            if index == battle.cursor() {
                painter.pointer(UiImage::Cursor, BATTLE_COMMAND_WINDOW.x + 32.0, y);
            }
        }
    }

    if game.battle_hud_visible() {
        draw_battle_hud(painter, game);
    }
}

/// Fraction of a bar to fill; empty when the maximum is not positive.
pub fn bar_fraction(current: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (current as f32 / max as f32).clamp(0.0, 1.0)
}

fn draw_battle_hud(painter: &Painter, game: &Game) {
    painter.window(BATTLE_HUD);
    let bar_width = 80.0;
    for (index, member) in game.party().members().iter().enumerate() {
        let x = BATTLE_HUD.x + 12.0 + index as f32 * (bar_width + 12.0);
        let y = BATTLE_HUD.y + 24.0;
        painter.text(member.archetype, x, y, WHITE);
        let bars = [
            (member.current_health, member.stats.health, RED, 12.0),
            (member.current_mana, member.stats.mana, BLUE, 48.0),
        ];
        for (current, max, color, dy) in bars {
            let frame = PanelRect::new(x, y + dy, bar_width, 14.0);
            painter.fill(frame, DARKGRAY);
            painter.fill(
                PanelRect { width: bar_width * bar_fraction(current, max), ..frame },
                color,
            );
            painter.text(&format!("{current}/{max}"), x + 4.0, y + dy + 30.0, WHITE);
        }
    }
}

/// Draws the current frame of a skill effect centred on `target`, faded into the next.
fn draw_effect(painter: &Painter, effect: &EffectPlayback, target: PanelRect) {
    let frames = painter.assets.effect(&effect.effect);
    let Some(frame) = effect.frame(frames.len()) else { return };
    let Some(base) = frames.get(frame.index) else { return };
    let texture = match frame.next.and_then(|next| frames.get(next)) {
        Some(next) if frame.blend > 0.0 => {
            let bytes = blend_rgba(&base.bytes, &next.bytes, frame.blend);
            Texture2D::from_rgba8(base.width, base.height, &bytes)
        }
        _ => Texture2D::from_image(base),
    };
    let (width, height) = (f32::from(base.width), f32::from(base.height));
    let rect = PanelRect::new(
        target.x + (target.width - width) / 2.0,
        target.y + (target.height - height) / 2.0,
        width,
        height,
    );
    painter.image(Some(&texture), &effect.effect, rect, None);
}

fn panel_title(painter: &Painter, rect: PanelRect, title: &str, active: bool) {
    painter.text(title, rect.x + 8.0, rect.y + 18.0, if active { HIGHLIGHT } else { GRAY });
}

fn draw_status(painter: &Painter, game: &Game, layout: &ScreenLayout) {
    painter.backdrop(UiImage::StatusBackground);
    let status = game.status();
    let party = game.party();
    let Some(member) = party.member(status.page()) else { return };

    painter.window(layout.header);
    painter.text(
        &format!(
            "{}  HP {}/{}  MP {}/{}",
            member.archetype,
            member.current_health,
            member.stats.health,
            member.current_mana,
            member.stats.mana
        ),
        layout.header.x + 12.0,
        layout.header.y + 28.0,
        WHITE,
    );
    let page = format!("{}/{}", status.page() + 1, party.len());
    let page_x = layout.header.x + layout.header.width - 72.0;
    painter.text(&page, page_x + 16.0, layout.header.y + 28.0, WHITE);
    if status.page() > 0 {
        painter.pointer(UiImage::PageLeft, page_x + 8.0, layout.header.y + 28.0);
    }
    if status.page() + 1 < party.len()
        && let Some(texture) = painter.assets.ui(UiImage::PageRight)
    {
        let rect = PanelRect::new(page_x + 48.0, layout.header.y + 14.0, 16.0, 16.0);
        painter.image(Some(texture), "page_right", rect, None);
    }

    let staging = status.staging();
    let highlight = Color::from_rgba(255, 255, 255, status.pulse() / 3);

    painter.window(layout.left);
    panel_title(painter, layout.left, "STATUS", status.panel() == Panel::Stats);
    for (row, (stat, icon)) in Stat::ALLOCATABLE.iter().zip(STAT_ICONS).enumerate() {
        let y = layout.left.y + PANEL_TITLE + 8.0 + row as f32 * LINE_STEP;
        let line = PanelRect::new(layout.left.x + 4.0, y, layout.left.width - 8.0, LINE_STEP);
        if staging.is_some() && status.panel() == Panel::Stats && status.cursor() == row {
            painter.fill(line, highlight);
        }
        let icon_rect = PanelRect::new(line.x + 4.0, y + 3.0, 16.0, 16.0);
        painter.image(painter.assets.stat_icon(icon), icon, icon_rect, None);
        let text = stat_row(*stat, &member.stats, staging.map(|s| &s.after));
        painter.text(&text, line.x + 26.0, y + 16.0, WHITE);
    }

    painter.window(layout.middle);
    let mid_x = layout.middle.x + 10.0;
    painter.text("LV", mid_x, layout.middle.y + 40.0, GRAY);
    painter.text(&member.level.to_string(), mid_x, layout.middle.y + 64.0, WHITE);
    painter.text("EXP", mid_x, layout.middle.y + 104.0, GRAY);
    painter.text(&member.experience.to_string(), mid_x, layout.middle.y + 128.0, WHITE);

    painter.window(layout.right);
    panel_title(painter, layout.right, "SKILLS", status.panel() == Panel::Skills);
    for (row, skill) in member.skills.iter().enumerate() {
        let y = layout.right.y + PANEL_TITLE + 8.0 + row as f32 * LINE_STEP;
        let line = PanelRect::new(layout.right.x + 4.0, y, layout.right.width - 8.0, LINE_STEP);
        if staging.is_some() && status.panel() == Panel::Skills && status.cursor() == row {
            painter.fill(line, highlight);
        }
        let text = format!("{:<10} Lv{}", skill.name, skill.level);
        painter.text(&text, line.x + 8.0, y + 16.0, WHITE);
    }

    painter.window(layout.footer);
    let spent = staging.map_or(0, |s| s.spent);
    painter.text(
        &format!(
            "Status points: {}   Skill points: {}",
            member.status_points - spent,
            member.skill_points
        ),
        layout.footer.x + 12.0,
        layout.footer.y + 28.0,
        WHITE,
    );
    let hint = if staging.is_some() {
        "LEFT/RIGHT move points  SPACE commit  Q discard"
    } else {
        "A/D page  LEFT/RIGHT panel  SPACE distribute  Q back"
    };
    painter.text(hint, layout.footer.x + 12.0, layout.footer.y + 56.0, GRAY);
}

/// Grid origin inside a titled panel.
fn grid_origin(panel: PanelRect) -> PanelRect {
    PanelRect::new(panel.x + 8.0, panel.y + PANEL_TITLE + 6.0, panel.width, panel.height)
}

/// Screen cell of a shop cursor: inventory grid on the left, shelf and sell slot on the right.
pub fn shop_cell(layout: &ScreenLayout, cursor: ShopCursor) -> PanelRect {
    match cursor {
        ShopCursor::Inventory(index) => {
            grid_origin(layout.left).grid_cell(index, INVENTORY_COLUMNS, SLOT, SLOT_GAP)
        }
        ShopCursor::Shelf(index) => {
            grid_origin(layout.right).grid_cell(index, SHELF_COLUMNS, SLOT, SLOT_GAP)
        }
    }
}

fn draw_slots(painter: &Painter, slots: &Slots, cell: impl Fn(usize) -> PanelRect) {
    for index in 0..slots.len() {
        let rect = cell(index);
        painter.outline(rect, GRAY);
        if let Some(item) = slots.get(index) {
            painter.item_icon(item, rect);
        }
    }
}

fn draw_hand(painter: &Painter, cell: PanelRect, held: Option<&Item>) {
    painter.outline(cell, HIGHLIGHT);
    if let Some(item) = held {
        painter.item_icon(item, PanelRect { x: cell.x + 10.0, y: cell.y - 10.0, ..cell });
    }
}

fn draw_shop(painter: &Painter, game: &Game, layout: &ScreenLayout) {
    let Some(screen) = game.shop() else { return };
    let purse = game.purse();

    painter.window(layout.header);
    painter.text(&screen.shop().name, layout.header.x + 12.0, layout.header.y + 28.0, WHITE);
    painter.text(
        &format!("Gold: {}G", purse.gold()),
        layout.header.x + layout.header.width - 140.0,
        layout.header.y + 28.0,
        HIGHLIGHT,
    );

    painter.window(layout.left);
    let on_inventory = matches!(screen.cursor(), ShopCursor::Inventory(_));
    panel_title(painter, layout.left, "INVENTORY", on_inventory);
    draw_slots(painter, game.inventory(), |index| shop_cell(layout, ShopCursor::Inventory(index)));

    painter.window(layout.right);
    panel_title(painter, layout.right, "SHELF", matches!(screen.cursor(), ShopCursor::Shelf(_)));
    let items = &screen.shop().items;
    for index in 0..SHELF_SLOTS {
        let rect = shop_cell(layout, ShopCursor::Shelf(index));
        painter.outline(rect, GRAY);
        if let Some(item) = items.get(index) {
            painter.item_icon(item, rect);
        }
    }
    let sell = shop_cell(layout, ShopCursor::Shelf(SELL_SLOT));
    painter.outline(sell, GRAY);
    painter.text("SELL", sell.x + sell.width + 8.0, sell.y + 24.0, WHITE);

    let held = screen.held().map(|held| held.item());
    draw_hand(painter, shop_cell(layout, screen.cursor()), held);

    painter.window(layout.footer);
    let hovered = match screen.cursor() {
        ShopCursor::Inventory(index) => game.inventory().get(index),
        ShopCursor::Shelf(index) => items.get(index),
    };
    if let Some(item) = held.or(hovered) {
        painter.text(&price_line(item), layout.footer.x + 12.0, layout.footer.y + 28.0, WHITE);
        painter.text(&item.description, layout.footer.x + 12.0, layout.footer.y + 56.0, GRAY);
    }
    if purse.pending() > 0 {
        painter.text(
            &format!("-{}G", purse.pending()),
            layout.footer.x + layout.footer.width - 100.0,
            layout.footer.y + 28.0,
            RED,
        );
    }
}

/// Screen cell of an item-screen cursor. Bag and equipment sit on the left,
/// the shared inventory on the right with the drop slot beneath it.
pub fn item_cell(layout: &ScreenLayout, cursor: Cursor) -> PanelRect {
    let left = grid_origin(layout.left);
    let right = grid_origin(layout.right);
    match cursor.zone {
        Zone::Bag => left.grid_cell(cursor.index, BAG_SLOTS, SLOT, SLOT_GAP),
        Zone::Equipment => {
            let equipment = PanelRect { y: left.y + SLOT + PANEL_TITLE + 2.0 * SLOT_GAP, ..left };
            let cell = equipment.grid_cell(cursor.index, EQUIPMENT_COLUMNS, SLOT, SLOT_GAP);
            PanelRect { x: cell.x + (cursor.index % EQUIPMENT_COLUMNS) as f32 * 64.0, ..cell }
        }
        Zone::Inventory => right.grid_cell(cursor.index, INVENTORY_COLUMNS, SLOT, SLOT_GAP),
        Zone::Drop => {
            let last_row = right.grid_cell(INVENTORY_SLOTS - 1, INVENTORY_COLUMNS, SLOT, SLOT_GAP);
            PanelRect { y: last_row.y + SLOT + 2.0 * SLOT_GAP, ..last_row }
        }
    }
}

fn draw_items(painter: &Painter, game: &Game, layout: &ScreenLayout) {
    let screen = game.items();
    let party = game.party();
    let Some(member) = party.member(screen.member) else { return };

    painter.window(layout.header);
    painter.text(
        &format!("{}  Lv{}", member.archetype, member.level),
        layout.header.x + 12.0,
        layout.header.y + 28.0,
        WHITE,
    );
    painter.text(
        &format!("{}/{}", screen.member + 1, party.len()),
        layout.header.x + layout.header.width - 56.0,
        layout.header.y + 28.0,
        WHITE,
    );

    painter.window(layout.left);
    panel_title(painter, layout.left, "BAG", screen.cursor.zone == Zone::Bag);
    draw_slots(painter, &member.bag, |index| item_cell(layout, Cursor { zone: Zone::Bag, index }));
    draw_slots(painter, &member.equipment, |index| {
        item_cell(layout, Cursor { zone: Zone::Equipment, index })
    });
    for (index, slot) in EquipSlot::ALL.iter().enumerate() {
        let cell = item_cell(layout, Cursor { zone: Zone::Equipment, index });
        painter.text(slot.label(), cell.x + SLOT + 4.0, cell.y + 22.0, GRAY);
    }

    painter.window(layout.right);
    panel_title(painter, layout.right, "INVENTORY", screen.cursor.zone == Zone::Inventory);
    draw_slots(painter, game.inventory(), |index| {
        item_cell(layout, Cursor { zone: Zone::Inventory, index })
    });
    let drop = item_cell(layout, Cursor { zone: Zone::Drop, index: 0 });
    painter.outline(drop, RED);
    painter.text("DROP", drop.x + SLOT + 8.0, drop.y + 24.0, RED);

    let held = screen.grabbed().map(|grab| &grab.item);
    draw_hand(painter, item_cell(layout, screen.cursor), held);

    painter.window(layout.footer);
    let hovered = match screen.cursor.zone {
        Zone::Inventory => game.inventory().get(screen.cursor.index),
        Zone::Bag => member.bag.get(screen.cursor.index),
        Zone::Equipment => member.equipment.get(screen.cursor.index),
        Zone::Drop => None,
    };
    if let Some(item) = held.or(hovered) {
        painter.text(&item_caption(item), layout.footer.x + 12.0, layout.footer.y + 28.0, WHITE);
        painter.text(&item.description, layout.footer.x + 12.0, layout.footer.y + 56.0, GRAY);
    }
    let stats = Stat::ALLOCATABLE
        .iter()
        .map(|stat| format!("{} {}", stat.label(), member.stats.get(*stat)))
        .collect::<Vec<_>>()
        .join("  ");
    let bottom = layout.footer.y + layout.footer.height - 16.0;
    painter.text(&stats, layout.footer.x + 12.0, bottom, GRAY);
}

fn draw_debug(painter: &Painter, game: &Game) {
    let panel = PanelRect::new(SCREEN_WIDTH - 300.0, 8.0, 292.0, 200.0);
    painter.fill(panel, Color { r: 0.0, g: 0.0, b: 0.0, a: 0.6 });
    let lines = fit_lines_to_panel(&debug_lines(game), panel.height, 18.0, 20.0);
    for (index, line) in lines.iter().enumerate() {
        painter.text(line, panel.x + 8.0, panel.y + 20.0 + index as f32 * 18.0, YELLOW);
    }
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}
