//! Textures and the font, loaded up front from the assets directory.
//!
//! Every lookup is optional: a missing or unreadable file is logged once at
//! load time and the renderer draws a placeholder in its place.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use lanoir_core::skill::SKILL_EFFECT_SIZE;
use lanoir_core::{Game, TILE_SIZE};
use macroquad::prelude::*;

pub const FONT_FILE: &str = "lilliput_steps.ttf";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    CharacterChip,
    MapChip,
    ItemIcon,
    EnemyBatch,
    SkillEffect,
    Interface,
}

impl AssetKind {
    pub fn dir(self) -> &'static str {
        match self {
            AssetKind::CharacterChip => "charachip",
            AssetKind::MapChip => "mapchip",
            AssetKind::ItemIcon => "itemicon",
            AssetKind::EnemyBatch => "enemybatch",
            AssetKind::SkillEffect => "skilleffect",
            AssetKind::Interface => "data",
        }
    }
}

pub fn asset_path(root: &Path, kind: AssetKind, stem: &str) -> PathBuf {
    root.join(kind.dir()).join(format!("{stem}.png"))
}

/// Images used by the fixed screens, all under `data/` except the stat icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiImage {
    Title,
    TitleCursor,
    Logo,
    Sky,
    Cursor,
    MoreCursor,
    BattleBackground,
    StatusBackground,
    PageLeft,
    PageRight,
    StatusCursor,
}

impl UiImage {
    pub const ALL: [UiImage; 11] = [
        UiImage::Title,
        UiImage::TitleCursor,
        UiImage::Logo,
        UiImage::Sky,
        UiImage::Cursor,
        UiImage::MoreCursor,
        UiImage::BattleBackground,
        UiImage::StatusBackground,
        UiImage::PageLeft,
        UiImage::PageRight,
        UiImage::StatusCursor,
    ];

    pub fn stem(self) -> &'static str {
        match self {
            UiImage::Title => "title",
            UiImage::TitleCursor => "title_cursor",
            UiImage::Logo => "logo2",
            UiImage::Sky => "sky",
            UiImage::Cursor => "cursor",
            UiImage::MoreCursor => "cursor2",
            UiImage::BattleBackground => "grass",
            UiImage::StatusBackground => "status_bg",
            UiImage::PageLeft => "cursor_left",
            UiImage::PageRight => "cursor_right",
            UiImage::StatusCursor => "status_cursor",
        }
    }
}

/// Icon stems for the seven allocatable stats, in `Stat::ALLOCATABLE` order.
pub const STAT_ICONS: [&str; 7] = ["hp", "atk", "int", "def", "mgr", "agl", "cri"];

/// Top-left corners of the `size`-pixel frames of a sheet, row by row.
pub fn frame_origins(width: u32, height: u32, size: u32) -> Vec<(u32, u32)> {
    if size == 0 {
        return Vec::new();
    }
    let columns = width / size;
    let rows = height / size;
    (0..rows).flat_map(|row| (0..columns).map(move |column| (column * size, row * size))).collect()
}

/// Source rectangle of one cell of a character sheet: rows are facings, columns walk poses.
pub fn sprite_cell(row: u32, column: u32) -> Rect {
    let size = TILE_SIZE as f32;
    Rect::new(column as f32 * size, row as f32 * size, size, size)
}

/// Stable tint for a missing texture so distinct assets stay distinguishable.
pub fn placeholder_color(key: &str) -> Color {
    let mixed = key.bytes().fold(0x811c_9dc5_u32, |acc, byte| {
        (acc ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    let [r, g, b, _] = mixed.to_le_bytes();
    Color::from_rgba(r / 2 + 64, g / 2 + 64, b / 2 + 64, 255)
}

#[derive(Default)]
pub struct Assets {
    pub font: Option<Font>,
    tiles: HashMap<u8, Texture2D>,
    sprites: HashMap<String, Texture2D>,
    items: HashMap<String, Texture2D>,
    enemies: HashMap<String, Texture2D>,
    effects: HashMap<String, Vec<Image>>,
    ui: HashMap<UiImage, Texture2D>,
    stat_icons: HashMap<&'static str, Texture2D>,
}

impl Assets {
    /// Loads everything the loaded world and the starting party can ask for.
    pub async fn load(root: &Path, game: &Game) -> Self {
        let mut assets = Self::default();
        let world = game.world();

        let font_path = root.join(AssetKind::Interface.dir()).join(FONT_FILE);
        assets.font = match load_ttf_font(&font_path.to_string_lossy()).await {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("font {} unavailable, using the default: {err}", font_path.display());
                None
            }
        };

        for (id, tile) in world.tiles.iter() {
            if let Some(texture) = texture(root, AssetKind::MapChip, &tile.name).await {
                assets.tiles.insert(id, texture);
            }
        }
        for name in world.sprites.names() {
            if let Some(texture) = texture(root, AssetKind::CharacterChip, name).await {
                assets.sprites.insert(name.to_string(), texture);
            }
        }
        for item in world.items.iter() {
            if let Some(texture) = texture(root, AssetKind::ItemIcon, &item.name).await {
                assets.items.insert(item.name.clone(), texture);
            }
        }
        for id in 0..world.enemies.len() as u32 {
            let Some(template) = world.enemies.get(id) else { continue };
            if let Some(texture) = texture(root, AssetKind::EnemyBatch, &template.name).await {
                assets.enemies.insert(template.name.clone(), texture);
            }
        }

        let effects: BTreeSet<&str> = game
            .party()
            .members()
            .iter()
            .flat_map(|member| member.skills.iter().map(|skill| skill.effect.as_str()))
            .collect();
        for effect in effects {
            if let Some(frames) = effect_frames(root, effect).await {
                assets.effects.insert(effect.to_string(), frames);
            }
        }

        for image in UiImage::ALL {
            if let Some(texture) = texture(root, AssetKind::Interface, image.stem()).await {
                assets.ui.insert(image, texture);
            }
        }
        for stem in STAT_ICONS {
            if let Some(texture) = texture(root, AssetKind::ItemIcon, stem).await {
                assets.stat_icons.insert(stem, texture);
            }
        }

        log::info!(
            "loaded {} tiles, {} sprites, {} item icons, {} enemies, {} effects",
            assets.tiles.len(),
            assets.sprites.len(),
            assets.items.len(),
            assets.enemies.len(),
            assets.effects.len()
        );
        assets
    }

    pub fn tile(&self, id: u8) -> Option<&Texture2D> {
        self.tiles.get(&id)
    }

    pub fn sprite(&self, name: &str) -> Option<&Texture2D> {
        self.sprites.get(name)
    }

    pub fn item_icon(&self, name: &str) -> Option<&Texture2D> {
        self.items.get(name)
    }

    pub fn enemy(&self, name: &str) -> Option<&Texture2D> {
        self.enemies.get(name)
    }

    pub fn effect(&self, name: &str) -> &[Image] {
        self.effects.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn ui(&self, image: UiImage) -> Option<&Texture2D> {
        self.ui.get(&image)
    }

    pub fn stat_icon(&self, stem: &str) -> Option<&Texture2D> {
        self.stat_icons.get(stem)
    }
}

async fn texture(root: &Path, kind: AssetKind, stem: &str) -> Option<Texture2D> {
    let path = asset_path(root, kind, stem);
    match load_texture(&path.to_string_lossy()).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(err) => {
            log::warn!("image {} unavailable: {err}", path.display());
            None
        }
    }
}

async fn effect_frames(root: &Path, effect: &str) -> Option<Vec<Image>> {
    let path = asset_path(root, AssetKind::SkillEffect, effect);
    let sheet = match load_image(&path.to_string_lossy()).await {
        Ok(sheet) => sheet,
        Err(err) => {
            log::warn!("effect sheet {} unavailable: {err}", path.display());
            return None;
        }
    };
    let size = SKILL_EFFECT_SIZE;
    let frames: Vec<Image> =
        frame_origins(u32::from(sheet.width), u32::from(sheet.height), size)
            .into_iter()
            .map(|(x, y)| sheet.sub_image(Rect::new(x as f32, y as f32, size as f32, size as f32)))
            .collect();
    if frames.is_empty() {
        log::warn!("effect sheet {} is smaller than one {size}px frame", path.display());
        return None;
    }
    Some(frames)
}
