use super::test_support::*;
use super::*;
use crate::menu::Command;
use crate::message::Advance;
use crate::shop::ShopCursor;
use crate::types::{TILE_SIZE, WALK_SPEED};

/// Holds `direction` for one frame, then lets the step play out.
fn walk(game: &mut Game, direction: Direction) {
    game.tick(&FrameInput::hold(direction));
    for _ in 0..(TILE_SIZE / WALK_SPEED) * 2 {
        if game.party().leader_is_idle() {
            break;
        }
        game.tick(&FrameInput::default());
    }
}

fn select(game: &mut Game, command: Command) {
    press(game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::CommandMenu);
    let target = Command::ALL.iter().position(|&c| c == command).expect("listed command");
    while game.commands().cursor() % 4 != target % 4 {
        let key = if game.commands().cursor() % 4 < target % 4 { Key::Down } else { Key::Up };
        press(game, &[key]);
    }
    if game.commands().cursor() != target {
        let key = if game.commands().cursor() < target { Key::Right } else { Key::Left };
        press(game, &[key]);
    }
    assert_eq!(game.commands().selected(), command);
    press(game, &[Key::Confirm]);
}

/// The revealed text of the current page with line breaks removed.
fn shown(game: &Game) -> String {
    game.message().visible_lines().concat()
}

fn music(cues: &[Cue]) -> Vec<MusicCue> {
    cues.iter()
        .filter_map(|cue| match cue {
            Cue::Music(music) => Some(music.clone()),
            Cue::Sound(_) => None,
        })
        .collect()
}

#[test]
fn title_start_enters_the_start_map() {
    let mut game = Game::new(sample_world(), sample_config(), 1).expect("world loads");
    assert_eq!(game.mode(), GameMode::Title);
    assert_eq!(music(&game.drain_cues()), vec![MusicCue::Title]);

    press(&mut game, &[Key::Down, Key::Up, Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Field);
    assert_eq!(game.map().name(), "town");
    assert_eq!(music(&game.drain_cues()), vec![MusicCue::Map("town".to_string())]);
}

#[test]
fn title_exit_requests_quit() {
    let mut game = Game::new(sample_world(), sample_config(), 1).expect("world loads");
    press(&mut game, &[Key::Down, Key::Down, Key::Confirm]);
    assert!(game.quit_requested());
    assert_eq!(game.mode(), GameMode::Title);
}

#[test]
fn search_opens_the_chest_once() {
    let mut game = field_game();
    select(&mut game, Command::Search);
    assert_eq!(game.mode(), GameMode::Talk);
    settle(&mut game);
    assert_eq!(shown(&game), "get agl");
    assert!(game.drain_cues().contains(&Cue::Sound(SoundCue::Treasure)));
    assert_eq!(
        game.log().last(),
        Some(&LogEvent::TreasureOpened { pos: Pos { y: 5, x: 3 }, item: "agl".to_string() })
    );
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Field);

    select(&mut game, Command::Search);
    settle(&mut game);
    assert_eq!(shown(&game), "didn't find anything");
}

#[test]
fn door_below_the_leader_opens_once() {
    let mut game = field_game();
    select(&mut game, Command::Door);
    assert_eq!(game.mode(), GameMode::Field);
    assert_eq!(game.log().last(), Some(&LogEvent::DoorOpened { pos: Pos { y: 6, x: 3 } }));

    select(&mut game, Command::Door);
    assert_eq!(game.mode(), GameMode::Talk);
    settle(&mut game);
    assert_eq!(shown(&game), "There's no door there");
}

#[test]
fn opened_door_clears_the_way() {
    let mut game = field_game();
    walk(&mut game, Direction::Down);
    assert_eq!(game.party().leader().body.pos(), Pos { y: 5, x: 3 }, "door blocks");
    select(&mut game, Command::Door);
    walk(&mut game, Direction::Down);
    assert_eq!(game.party().leader().body.pos(), Pos { y: 6, x: 3 });
}

#[test]
fn talking_to_nobody() {
    let mut game = field_game();
    select(&mut game, Command::Talk);
    assert_eq!(game.mode(), GameMode::Talk);
    settle(&mut game);
    assert_eq!(shown(&game), "There's no one there");
}

#[test]
fn clerk_across_the_counter_opens_the_shop() {
    let mut game = field_game();
    walk(&mut game, Direction::Right);
    assert_eq!(game.party().leader().body.facing(), Direction::Right);
    assert_eq!(game.party().leader().body.pos(), Pos { y: 5, x: 3 });

    select(&mut game, Command::Talk);
    assert_eq!(game.mode(), GameMode::Shop);
    assert_eq!(game.shop().map(|shop| shop.shop().name.as_str()), Some("weapons"));
    assert_eq!(music(&game.drain_cues()), vec![MusicCue::Shop]);
    let clerk = game.map().npc_at(Pos { y: 5, x: 5 }).and_then(|id| game.map().npc(id));
    assert_eq!(clerk.map(|npc| npc.body.facing()), Some(Direction::Left));

    press(&mut game, &[Key::Confirm, Key::Left]);
    assert_eq!(game.shop().map(|shop| shop.cursor()), Some(ShopCursor::Inventory(9)));
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.inventory().get(9).map(|item| item.name.as_str()), Some("sword"));
    assert_eq!(game.purse().available(), 400);
    assert!(game.purse().gold() < 500, "debit starts draining at once");
    assert_eq!(
        game.log().last(),
        Some(&LogEvent::ItemBought { item: "sword".to_string(), price: 100 })
    );

    press(&mut game, &[Key::Cancel]);
    assert_eq!(game.mode(), GameMode::Field);
    assert!(game.shop().is_none());
    assert_eq!(game.purse().gold(), 400);
    assert_eq!(game.purse().pending(), 0);
    assert_eq!(music(&game.drain_cues()), vec![MusicCue::Map("town".to_string())]);
}

#[test]
fn passage_moves_the_party_to_the_cave() {
    let mut game = field_game();
    walk(&mut game, Direction::Left);
    assert_eq!(game.map().name(), "cave");
    assert_eq!(
        game.log().last(),
        Some(&LogEvent::MapEntered { map: "cave".to_string(), pos: Pos { y: 2, x: 2 } })
    );
    for member in game.party().members() {
        assert_eq!(member.body.pos(), Pos { y: 2, x: 2 });
        assert_eq!(member.body.facing(), Direction::Down);
    }
    let cues = game.drain_cues();
    assert!(cues.contains(&Cue::Sound(SoundCue::Step)));
    assert_eq!(music(&cues), vec![MusicCue::Map("cave".to_string())]);
}

#[test]
fn passage_landing_never_rolls_an_encounter() {
    let mut config = sample_config();
    config.encounter_rate = 1.0;
    config.encounter_maps = vec!["town".to_string(), "cave".to_string()];
    let mut game = field_game_with(config);
    walk(&mut game, Direction::Left);
    assert_eq!(game.map().name(), "cave");
    assert_eq!(game.mode(), GameMode::Field);
    assert!(game.battle().is_none());
    assert!(!music(&game.drain_cues()).contains(&MusicCue::Battle));
}

#[test]
fn villager_message_pages_through() {
    let mut game = field_game();
    walk(&mut game, Direction::Left);
    select(&mut game, Command::Talk);
    assert_eq!(game.mode(), GameMode::Talk);
    let villager = game.map().npc_at(Pos { y: 3, x: 2 }).and_then(|id| game.map().npc(id));
    assert_eq!(villager.map(|npc| npc.body.facing()), Some(Direction::Up));

    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Talk, "typing swallows confirm");
    settle(&mut game);
    assert_eq!(
        game.message().visible_lines(),
        vec!["Deep in here".to_string(), "nobody visits.".to_string(), String::new()]
    );
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.message().page_index(), 1);
    settle(&mut game);
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Field);
    assert!(!game.message().is_visible());
}

#[test]
fn encounter_attack_and_escape() {
    let mut config = sample_config();
    config.encounter_rate = 1.0;
    let mut game = field_game_with(config);
    walk(&mut game, Direction::Up);
    assert_eq!(game.mode(), GameMode::BattleInit);
    assert_eq!(game.battle().map(|b| b.enemy().name.as_str()), Some("slime"));
    assert_eq!(game.battle().map(|b| b.enemy().stats.health), Some(10));
    assert!(music(&game.drain_cues()).contains(&MusicCue::Battle));
    assert!(!game.battle_hud_visible());

    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::BattleCommand);
    assert!(game.battle_commands_visible() && game.battle_hud_visible());
    assert!(!game.message().is_visible());

    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::BattleProcess);
    assert!(!game.battle_commands_visible() && game.battle_hud_visible());
    settle(&mut game);
    assert_eq!(shown(&game), "player is attacking the monster");
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::BattleCommand);
    assert!(game.battle().and_then(Battle::effect).is_some());
    assert!(game.drain_cues().contains(&Cue::Sound(SoundCue::SwordSlice)));

    press(&mut game, &[Key::Down, Key::Down, Key::Down, Key::Down, Key::Confirm, Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Field);
    assert!(game.battle().is_none());
    assert_eq!(game.log().last(), Some(&LogEvent::BattleEscaped));
    assert_eq!(music(&game.drain_cues()), vec![MusicCue::Map("town".to_string())]);
}

#[test]
fn no_encounters_off_the_encounter_list() {
    let mut config = sample_config();
    config.encounter_rate = 1.0;
    config.encounter_maps.clear();
    let mut game = field_game_with(config);
    walk(&mut game, Direction::Up);
    assert_eq!(game.mode(), GameMode::Field);
    assert_eq!(game.party().leader().body.pos(), Pos { y: 4, x: 3 });
}

#[test]
fn status_points_commit_through_the_screen() {
    let mut game = field_game();
    select(&mut game, Command::Status);
    assert_eq!(game.mode(), GameMode::Status);
    assert!(music(&game.drain_cues()).contains(&MusicCue::Shop));

    let health = game.party().leader().stats.health;
    press(&mut game, &[Key::Confirm, Key::Right, Key::Right, Key::Left, Key::Confirm]);
    assert_eq!(game.party().leader().stats.health, health + 1);
    assert_eq!(game.log().last(), Some(&LogEvent::StatsCommitted { member: 0, points: 1 }));

    press(&mut game, &[Key::Cancel]);
    assert_eq!(game.mode(), GameMode::Field);
}

#[test]
fn item_screen_cancel_restores_a_grabbed_item() {
    let mut game = field_game();
    let _ = game.inventory.put(0, sample_item("rope", 5));
    select(&mut game, Command::Item);
    assert_eq!(game.mode(), GameMode::ItemManagement);
    press(&mut game, &[Key::Confirm, Key::Right]);
    assert!(game.items().grabbed().is_some());
    press(&mut game, &[Key::Cancel]);
    assert_eq!(game.mode(), GameMode::Field);
    assert_eq!(game.inventory().get(0).map(|item| item.name.as_str()), Some("rope"));
}

#[test]
fn command_window_cancel_and_visibility() {
    let mut game = field_game();
    press(&mut game, &[Key::Confirm]);
    assert!(game.command_window_visible());
    press(&mut game, &[Key::Cancel]);
    assert_eq!(game.mode(), GameMode::Field);
    assert!(!game.command_window_visible());
}

#[test]
fn confirm_is_ignored_while_the_leader_walks() {
    let mut game = field_game();
    game.tick(&FrameInput::hold(Direction::Up));
    press(&mut game, &[Key::Confirm]);
    assert_eq!(game.mode(), GameMode::Field);
}

#[test]
fn quit_key_is_honoured_in_any_mode() {
    let mut game = field_game();
    select(&mut game, Command::Status);
    press(&mut game, &[Key::Quit]);
    assert!(game.quit_requested());
}

#[test]
fn same_seed_same_snapshot() {
    let run = || {
        let mut config = sample_config();
        config.auto_move_rate = 0.5;
        config.encounter_rate = 0.3;
        let mut game = field_game_with(config);
        walk(&mut game, Direction::Left);
        for step in 0..40 {
            let direction = Direction::ALL[step % 4];
            walk(&mut game, direction);
            if game.mode() != GameMode::Field {
                press(&mut game, &[Key::Confirm, Key::Confirm]);
            }
        }
        game.snapshot_hash()
    };
    assert_eq!(run(), run());
}

#[test]
fn message_advance_reports_finish_once() {
    let mut game = field_game();
    select(&mut game, Command::Spell);
    settle(&mut game);
    let mut message = game.message().clone();
    assert_eq!(message.advance(), Advance::Finished);
}
