//! Text for the debug overlay, event log lines and item captions.

use lanoir_app::format_snapshot_hash;
use lanoir_core::item::Item;
use lanoir_core::stats::{CombatStats, Stat};
use lanoir_core::{Game, GameMode, LogEvent};

pub fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Title => "title",
        GameMode::Field => "field",
        GameMode::Talk => "talk",
        GameMode::CommandMenu => "command",
        GameMode::BattleInit => "battle (init)",
        GameMode::BattleCommand => "battle (command)",
        GameMode::BattleProcess => "battle (process)",
        GameMode::Status => "status",
        GameMode::Shop => "shop",
        GameMode::ItemManagement => "items",
    }
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::MapEntered { map, pos } => format!("entered {map} at ({}, {})", pos.x, pos.y),
        LogEvent::EncounterStarted { enemy } => format!("{enemy} appeared"),
        LogEvent::BattleEscaped => "escaped".to_string(),
        LogEvent::SkillInvoked { member, skill } => format!("member {member} used {skill}"),
        LogEvent::TreasureOpened { item, .. } => format!("found {item}"),
        LogEvent::DoorOpened { pos } => format!("opened door at ({}, {})", pos.x, pos.y),
        LogEvent::ItemBought { item, price } => format!("bought {item} for {price}G"),
        LogEvent::ItemSold { item, price } => format!("sold {item} for {price}G"),
        LogEvent::ItemDiscarded { item } => format!("dropped {item}"),
        LogEvent::StatsCommitted { member, points } => {
            format!("member {member} spent {points} point(s)")
        }
    }
}

pub fn debug_lines(game: &Game) -> Vec<String> {
    let leader = &game.party().leader().body;
    let mut lines = vec![
        format!("Seed: {}", game.seed()),
        format!("Tick: {}", game.current_tick()),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
        format!("Mode: {}", mode_label(game.mode())),
        format!("Map: {} ({}, {})", game.map().name(), leader.pos().x, leader.pos().y),
        format!("Gold: {} (pending {})", game.purse().gold(), game.purse().pending()),
    ];
    let log = game.log();
    lines.extend(log[log.len().saturating_sub(5)..].iter().map(event_log_line));
    lines
}

pub fn item_caption(item: &Item) -> String {
    format!("{} (+{} {})", item.name, item.power, item.class.bonus_stat().label())
}

pub fn price_line(item: &Item) -> String {
    format!("{}: {}G", item.name, item.price)
}

/// One stat row; while points are staged it shows the value before and after.
pub fn stat_row(stat: Stat, current: &CombatStats, staged: Option<&CombatStats>) -> String {
    let before = current.get(stat);
    match staged {
        Some(after) if after.get(stat) != before => {
            format!("{:<8}{before:>4} > {:>4}", stat.label(), after.get(stat))
        }
        _ => format!("{:<8}{before:>4}", stat.label()),
    }
}
