use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::active_map::ActiveMap;
use crate::battle::Battle;
use crate::config::GameConfig;
use crate::error::LoadResult;
use crate::inventory::{INVENTORY_SLOTS, ItemScreen, Slots};
use crate::menu::{CommandMenu, TitleMenu};
use crate::message::MessageBox;
use crate::party::Party;
use crate::shop::{Purse, ShopScreen};
use crate::status::StatusScreen;
use crate::types::*;
use crate::world::World;

mod battle_flow;
mod commands;
mod field;
mod hash;
mod screens;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

/// The whole session: the active map, the party and its belongings, and the
/// mode that decides which screen receives input each frame.
pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    config: GameConfig,
    world: World,
    mode: GameMode,
    title: TitleMenu,
    map: ActiveMap,
    party: Party,
    inventory: Slots,
    purse: Purse,
    message: MessageBox,
    commands: CommandMenu,
    battle: Option<Battle>,
    status: StatusScreen,
    shop: Option<ShopScreen>,
    items: ItemScreen,
    cues: Vec<Cue>,
    log: Vec<LogEvent>,
    quit_requested: bool,
}

impl Game {
    /// Starts on the title screen with the start map prepared behind it.
    pub fn new(world: World, config: GameConfig, seed: u64) -> LoadResult<Self> {
        let map = world.instantiate(&config.start_map)?;
        let party = world.starting_party()?;
        log::info!("new game on {} with seed {seed:#x}", config.start_map);
        Ok(Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            purse: Purse::new(config.starting_gold),
            config,
            world,
            mode: GameMode::Title,
            title: TitleMenu::default(),
            map,
            party,
            inventory: Slots::with_len(INVENTORY_SLOTS),
            message: MessageBox::default(),
            commands: CommandMenu::default(),
            battle: None,
            status: StatusScreen::default(),
            shop: None,
            items: ItemScreen::default(),
            cues: vec![Cue::Music(MusicCue::Title)],
            log: Vec::new(),
            quit_requested: false,
        })
    }

    /// Runs one frame: edge-triggered keys first, then the per-frame update.
    pub fn tick(&mut self, input: &FrameInput) {
        for &key in &input.pressed {
            if key == Key::Quit {
                self.quit_requested = true;
                continue;
            }
            self.handle_key(key);
        }
        self.update(input.held);
        self.tick += 1;
    }

    fn handle_key(&mut self, key: Key) {
        match self.mode {
            GameMode::Title => self.title_key(key),
            GameMode::Field => self.field_key(key),
            GameMode::Talk => self.talk_key(key),
            GameMode::CommandMenu => self.command_key(key),
            GameMode::BattleInit => self.battle_init_key(key),
            GameMode::BattleCommand => self.battle_command_key(key),
            GameMode::BattleProcess => self.battle_process_key(key),
            GameMode::Status => self.status_key(key),
            GameMode::Shop => self.shop_key(key),
            GameMode::ItemManagement => self.item_key(key),
        }
    }

    fn update(&mut self, held: Option<Direction>) {
        self.message.tick();
        match self.mode {
            GameMode::Field => self.update_field(held),
            GameMode::BattleInit | GameMode::BattleCommand | GameMode::BattleProcess => {
                if let Some(battle) = self.battle.as_mut() {
                    battle.tick();
                }
            }
            GameMode::Status => self.status.update(),
            GameMode::Shop => self.purse.tick(),
            GameMode::Title
            | GameMode::Talk
            | GameMode::CommandMenu
            | GameMode::ItemManagement => {}
        }
        if matches!(self.mode, GameMode::Field | GameMode::Talk | GameMode::CommandMenu) {
            self.party.animate();
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::debug!("mode {:?} -> {mode:?}", self.mode);
            self.mode = mode;
        }
    }

    fn sound(&mut self, cue: SoundCue) {
        self.cues.push(Cue::Sound(cue));
    }

    fn music(&mut self, cue: MusicCue) {
        self.cues.push(Cue::Music(cue));
    }

    fn resume_map_music(&mut self) {
        if let Some(bgm) = self.map.bgm() {
            let cue = MusicCue::Map(bgm.to_string());
            self.music(cue);
        }
    }

    /// Opens the message window and hands input to it.
    fn say(&mut self, text: &str) {
        self.message.show(text);
        self.set_mode(GameMode::Talk);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn title(&self) -> &TitleMenu {
        &self.title
    }

    pub fn map(&self) -> &ActiveMap {
        &self.map
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn inventory(&self) -> &Slots {
        &self.inventory
    }

    pub fn purse(&self) -> &Purse {
        &self.purse
    }

    pub fn message(&self) -> &MessageBox {
        &self.message
    }

    pub fn commands(&self) -> &CommandMenu {
        &self.commands
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn status(&self) -> &StatusScreen {
        &self.status
    }

    pub fn shop(&self) -> Option<&ShopScreen> {
        self.shop.as_ref()
    }

    pub fn items(&self) -> &ItemScreen {
        &self.items
    }

    /// The command window shows exactly while the command menu has input.
    pub fn command_window_visible(&self) -> bool {
        self.mode == GameMode::CommandMenu
    }

    pub fn battle_commands_visible(&self) -> bool {
        self.mode == GameMode::BattleCommand
    }

    pub fn battle_hud_visible(&self) -> bool {
        matches!(self.mode, GameMode::BattleCommand | GameMode::BattleProcess)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Audio requests raised since the last call, oldest first.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        mem::take(&mut self.cues)
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
