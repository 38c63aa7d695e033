//! Cursor menus for the title screen and the field command window.

use crate::types::Direction;

/// Field commands in cursor order: two columns of four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Talk,
    Status,
    Equipment,
    Door,
    Spell,
    Item,
    Tactics,
    Search,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Talk,
        Command::Status,
        Command::Equipment,
        Command::Door,
        Command::Spell,
        Command::Item,
        Command::Tactics,
        Command::Search,
    ];
    const ROWS: usize = 4;

    pub fn label(self) -> &'static str {
        match self {
            Command::Talk => "TALK",
            Command::Status => "STATUS",
            Command::Equipment => "EQUIPMENT",
            Command::Door => "DOOR",
            Command::Spell => "SPELL",
            Command::Item => "ITEM",
            Command::Tactics => "TACTICS",
            Command::Search => "SEARCH",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CommandMenu {
    cursor: usize,
}

impl CommandMenu {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Command {
        Command::ALL[self.cursor]
    }

    /// Moves within the grid without wrapping. Returns false at an edge.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let row = self.cursor % Command::ROWS;
        let next = match direction {
            Direction::Up if row > 0 => self.cursor - 1,
            Direction::Down if row + 1 < Command::ROWS => self.cursor + 1,
            Direction::Left if self.cursor >= Command::ROWS => self.cursor - Command::ROWS,
            Direction::Right if self.cursor < Command::ROWS => self.cursor + Command::ROWS,
            _ => return false,
        };
        self.cursor = next;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TitleOption {
    Start,
    Continue,
    Exit,
}

impl TitleOption {
    pub const ALL: [TitleOption; 3] =
        [TitleOption::Start, TitleOption::Continue, TitleOption::Exit];

    pub fn label(self) -> &'static str {
        match self {
            TitleOption::Start => "START",
            TitleOption::Continue => "CONTINUE",
            TitleOption::Exit => "EXIT",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TitleMenu {
    cursor: usize,
}

impl TitleMenu {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> TitleOption {
        TitleOption::ALL[self.cursor]
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Up if self.cursor > 0 => self.cursor -= 1,
            Direction::Down if self.cursor + 1 < TitleOption::ALL.len() => self.cursor += 1,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_cursor_clamps_at_every_edge() {
        let mut menu = CommandMenu::default();
        assert!(!menu.move_cursor(Direction::Up));
        assert!(!menu.move_cursor(Direction::Left));
        assert_eq!(menu.selected(), Command::Talk);

        assert!(menu.move_cursor(Direction::Right));
        assert_eq!(menu.selected(), Command::Spell);
        assert!(!menu.move_cursor(Direction::Right));
        assert!(!menu.move_cursor(Direction::Up));

        for _ in 0..5 {
            menu.move_cursor(Direction::Down);
        }
        assert_eq!(menu.selected(), Command::Search);
        assert!(menu.move_cursor(Direction::Left));
        assert_eq!(menu.selected(), Command::Door);
        assert!(!menu.move_cursor(Direction::Down), "column ends do not spill over");
    }

    #[test]
    fn title_cursor_clamps() {
        let mut menu = TitleMenu::default();
        assert!(!menu.move_cursor(Direction::Up));
        for _ in 0..4 {
            menu.move_cursor(Direction::Down);
        }
        assert_eq!(menu.selected(), TitleOption::Exit);
        assert!(!menu.move_cursor(Direction::Left));
    }
}
