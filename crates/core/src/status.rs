//! Party status screen and status-point distribution.

use crate::party::Party;
use crate::stats::{CombatStats, Stat};
use crate::types::Direction;

const PULSE_MIN: u8 = 100;
const PULSE_MAX: u8 = 200;
const PULSE_STEP: u8 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Panel {
    #[default]
    Stats,
    Skills,
}

/// Stats before distribution started, the working copy, and the points it cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Staging {
    pub before: CombatStats,
    pub after: CombatStats,
    pub spent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StatusScreen {
    page: usize,
    panel: Panel,
    cursor: usize,
    staging: Option<Staging>,
    pulse: u8,
    pulse_rising: bool,
}

impl Default for StatusScreen {
    fn default() -> Self {
        Self {
            page: 0,
            panel: Panel::Stats,
            cursor: 0,
            staging: None,
            pulse: PULSE_MIN,
            pulse_rising: true,
        }
    }
}

impl StatusScreen {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_distributing(&self) -> bool {
        self.staging.is_some()
    }

    pub fn staging(&self) -> Option<&Staging> {
        self.staging.as_ref()
    }

    /// Alpha of the highlighted row, breathing between two bounds.
    pub fn pulse(&self) -> u8 {
        self.pulse
    }

    pub fn update(&mut self) {
        if self.pulse >= PULSE_MAX {
            self.pulse_rising = false;
        } else if self.pulse <= PULSE_MIN {
            self.pulse_rising = true;
        }
        self.pulse = if self.pulse_rising {
            self.pulse.saturating_add(PULSE_STEP)
        } else {
            self.pulse.saturating_sub(PULSE_STEP)
        };
    }

    pub fn turn_page(&mut self, forward: bool, party_len: usize) -> bool {
        if self.is_distributing() {
            return false;
        }
        let next = if forward { self.page + 1 } else { self.page.wrapping_sub(1) };
        if next >= party_len {
            return false;
        }
        self.page = next;
        true
    }

    /// Left/right: switches panels, or moves points while distributing stats.
    pub fn move_horizontal(&mut self, direction: Direction, party: &Party) -> bool {
        let Some(staging) = self.staging.as_mut() else {
            let panel = match direction {
                Direction::Left => Panel::Stats,
                Direction::Right => Panel::Skills,
                Direction::Up | Direction::Down => return false,
            };
            let changed = panel != self.panel;
            self.panel = panel;
            return changed;
        };
        if self.panel != Panel::Stats {
            return false;
        }
        let Some(stat) = Stat::ALLOCATABLE.get(self.cursor).copied() else {
            return false;
        };
        let Some(player) = party.member(self.page) else {
            return false;
        };
        let value = staging.after.get(stat);
        match direction {
            Direction::Right if player.status_points > staging.spent => {
                staging.after.set(stat, value + 1);
                staging.spent += 1;
                true
            }
            Direction::Left if value > staging.before.get(stat) => {
                staging.after.set(stat, value - 1);
                staging.spent -= 1;
                true
            }
            _ => false,
        }
    }

    /// Up/down: moves the row cursor while distributing.
    pub fn move_vertical(&mut self, direction: Direction, party: &Party) -> bool {
        if !self.is_distributing() {
            return false;
        }
        let rows = match self.panel {
            Panel::Stats => Stat::ALLOCATABLE.len(),
            Panel::Skills => party.member(self.page).map_or(0, |player| player.skills.len()),
        };
        match direction {
            Direction::Up if self.cursor > 0 => self.cursor -= 1,
            Direction::Down if self.cursor + 1 < rows => self.cursor += 1,
            _ => return false,
        }
        true
    }

    /// Toggles distribution. Leaving it writes the staged stats back and
    /// returns how many points were spent.
    pub fn confirm(&mut self, party: &mut Party) -> Option<u32> {
        self.cursor = 0;
        let Some(player) = party.member_mut(self.page) else {
            return None;
        };
        match self.staging.take() {
            None => {
                self.staging =
                    Some(Staging { before: player.stats, after: player.stats, spent: 0 });
                None
            }
            Some(staging) => {
                player.set_stats(staging.after);
                player.status_points -= staging.spent;
                Some(staging.spent)
            }
        }
    }

    /// Drops staged points if distributing. Returns true when the screen
    /// should close instead.
    pub fn cancel(&mut self) -> bool {
        self.cursor = 0;
        if self.staging.take().is_some() {
            return false;
        }
        *self = Self::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::sample_party;

    #[test]
    fn distribution_spends_and_refunds_within_bounds() {
        let mut party = sample_party();
        let mut screen = StatusScreen::default();
        let points = party.leader().status_points;
        let before = party.leader().stats;
        assert_eq!(screen.confirm(&mut party), None);

        assert!(!screen.move_horizontal(Direction::Left, &party), "cannot go below the start");
        for _ in 0..points + 3 {
            screen.move_horizontal(Direction::Right, &party);
        }
        let staging = screen.staging().copied().expect("distributing");
        assert_eq!(staging.spent, points);
        assert_eq!(staging.after.health, before.health + points as i32);

        assert_eq!(screen.confirm(&mut party), Some(points));
        assert_eq!(party.leader().status_points, 0);
        assert_eq!(party.leader().stats.health, before.health + points as i32);
    }

    #[test]
    fn cancel_discards_the_staging_buffer() {
        let mut party = sample_party();
        let original = party.clone();
        let mut screen = StatusScreen::default();
        screen.confirm(&mut party);
        screen.move_vertical(Direction::Down, &party);
        screen.move_horizontal(Direction::Right, &party);
        assert!(!screen.cancel(), "first cancel only leaves distribution");
        assert_eq!(party, original);
        assert!(screen.cancel());
    }

    #[test]
    fn pages_are_locked_while_distributing() {
        let mut party = sample_party();
        let mut screen = StatusScreen::default();
        assert!(!screen.turn_page(false, party.len()));
        assert!(screen.turn_page(true, party.len()));
        screen.confirm(&mut party);
        assert!(!screen.turn_page(true, party.len()));
        assert_eq!(screen.page(), 1);
    }

    #[test]
    fn cursor_is_bounded_by_the_panel_rows() {
        let mut party = sample_party();
        let mut screen = StatusScreen::default();
        assert!(!screen.move_vertical(Direction::Down, &party));
        screen.confirm(&mut party);
        let moves = (0..20).filter(|_| screen.move_vertical(Direction::Down, &party)).count();
        assert_eq!(moves, Stat::ALLOCATABLE.len() - 1);
    }

    #[test]
    fn pulse_stays_in_range() {
        let mut screen = StatusScreen::default();
        for _ in 0..500 {
            screen.update();
            assert!((PULSE_MIN - PULSE_STEP..=PULSE_MAX + PULSE_STEP).contains(&screen.pulse()));
        }
    }
}
