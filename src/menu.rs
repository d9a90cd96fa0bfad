//! Difficulty-select screen state

use crate::difficulty::Difficulty;

/// What a menu selection asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start(Difficulty),
    Quit,
}

/// The difficulty-select menu: three difficulties plus quit
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    /// Create the menu with the cursor on the given difficulty
    pub fn new(initial: Difficulty) -> Self {
        let selected = Self::entries()
            .iter()
            .position(|e| *e == MenuAction::Start(initial))
            .unwrap_or(0);
        Self { selected }
    }

    /// Menu entries in display order: every difficulty, then quit
    pub fn entries() -> [MenuAction; 4] {
        let [easy, medium, hard] = Difficulty::all();
        [
            MenuAction::Start(easy),
            MenuAction::Start(medium),
            MenuAction::Start(hard),
            MenuAction::Quit,
        ]
    }

    pub fn move_up(&mut self) {
        let len = Self::entries().len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % Self::entries().len();
    }

    pub fn select(&self) -> MenuAction {
        Self::entries()[self.selected]
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut menu = Menu::new(Difficulty::Easy);
        menu.move_up();
        assert_eq!(menu.select(), MenuAction::Quit);
        menu.move_down();
        assert_eq!(menu.select(), MenuAction::Start(Difficulty::Easy));
    }

    #[test]
    fn test_menu_offers_every_difficulty() {
        let entries = Menu::entries();
        for difficulty in Difficulty::all() {
            assert!(entries.contains(&MenuAction::Start(difficulty)));
        }
        assert_eq!(entries.last(), Some(&MenuAction::Quit));
    }

    #[test]
    fn test_cursor_starts_on_requested_difficulty() {
        let menu = Menu::new(Difficulty::Hard);
        assert_eq!(menu.select(), MenuAction::Start(Difficulty::Hard));
    }
}
