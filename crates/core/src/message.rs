//! Paged message window with a per-frame typewriter reveal.
//!
//! Text is laid out when shown: `/` breaks the line, `%` breaks the page and
//! `$` ends the message. Lines wrap on the character that fills them.

use std::mem;

pub const CHARS_PER_LINE: usize = 20;
pub const LINES_PER_PAGE: usize = 3;
pub const MAX_LINES: usize = 30;
/// Frames per on/off phase of the "more" cursor.
const BLINK_CYCLE: u32 = 24;

const LINE_BREAK: char = '/';
const PAGE_BREAK: char = '%';
const END: char = '$';

/// What a confirm press did to the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The page is still being revealed; nothing happened.
    Typing,
    NextPage,
    /// The last page was acknowledged and the window closed.
    Finished,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MessageBox {
    pages: Vec<Vec<String>>,
    page: usize,
    revealed: usize,
    visible: bool,
    frame: u32,
}

impl MessageBox {
    pub fn show(&mut self, text: &str) {
        self.pages = layout(text);
        self.page = 0;
        self.revealed = 0;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_len(&self) -> usize {
        self.pages.get(self.page).map_or(0, |lines| lines.iter().map(|l| l.chars().count()).sum())
    }

    pub fn page_complete(&self) -> bool {
        self.revealed >= self.page_len()
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.pages.len()
    }

    /// Reveals one more character of the current page.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if self.visible && !self.page_complete() {
            self.revealed += 1;
        }
    }

    pub fn advance(&mut self) -> Advance {
        if !self.page_complete() {
            return Advance::Typing;
        }
        if self.is_last_page() {
            self.visible = false;
            return Advance::Finished;
        }
        self.page += 1;
        self.revealed = 0;
        Advance::NextPage
    }

    /// The revealed part of each line on the current page.
    pub fn visible_lines(&self) -> Vec<String> {
        let Some(lines) = self.pages.get(self.page) else {
            return Vec::new();
        };
        let mut budget = self.revealed;
        let mut shown = Vec::with_capacity(lines.len());
        for line in lines {
            let take = budget.min(line.chars().count());
            shown.push(line.chars().take(take).collect());
            budget -= take;
        }
        shown
    }

    /// Whether the blinking "more" marker is lit this frame.
    pub fn more_marker_lit(&self) -> bool {
        self.visible
            && self.page_complete()
            && !self.is_last_page()
            && (self.frame / BLINK_CYCLE) % 2 == 0
    }
}

fn layout(text: &str) -> Vec<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut width = 0;
    for ch in text.chars() {
        match ch {
            END => break,
            LINE_BREAK => {
                lines.push(mem::take(&mut line));
                width = 0;
            }
            PAGE_BREAK => {
                lines.push(mem::take(&mut line));
                width = 0;
                while lines.len() % LINES_PER_PAGE != 0 {
                    lines.push(String::new());
                }
            }
            _ => {
                line.push(ch);
                width += 1;
                if width == CHARS_PER_LINE {
                    lines.push(mem::take(&mut line));
                    width = 0;
                }
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    if lines.len() > MAX_LINES {
        log::warn!("message of {} lines cut to {MAX_LINES}: {text:?}", lines.len());
        lines.truncate(MAX_LINES);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines.chunks(LINES_PER_PAGE).map(<[String]>::to_vec).collect()
}
