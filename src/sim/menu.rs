//! Menu logic (selection state only; drawing is the renderer's job)

use serde::{Deserialize, Serialize};

use super::input::{Key, KeyEdges};
use super::state::Character;

/// Pause menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseMenuItem {
    Resume,
    Restart,
}

impl PauseMenuItem {
    pub const ALL: [PauseMenuItem; 2] = [PauseMenuItem::Resume, PauseMenuItem::Restart];

    pub fn as_str(&self) -> &'static str {
        match self {
            PauseMenuItem::Resume => "Resume",
            PauseMenuItem::Restart => "Restart",
        }
    }
}

/// What the game should do after a menu key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Restart,
}

/// Pause menu cursor
#[derive(Debug, Clone, Default)]
pub struct PauseMenu {
    selected: usize,
}

impl PauseMenu {
    pub fn selected(&self) -> PauseMenuItem {
        PauseMenuItem::ALL[self.selected]
    }

    /// Back to the first entry (on every pause)
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Up/Down move the cursor (wrapping), Enter activates
    pub fn handle_input(&mut self, keys: &KeyEdges) -> Option<MenuAction> {
        let len = PauseMenuItem::ALL.len();
        if keys.just_pressed(Key::Down) {
            self.selected = (self.selected + 1) % len;
        }
        if keys.just_pressed(Key::Up) {
            self.selected = (self.selected + len - 1) % len;
        }
        if keys.just_pressed(Key::Enter) {
            return Some(match self.selected() {
                PauseMenuItem::Resume => MenuAction::Resume,
                PauseMenuItem::Restart => MenuAction::Restart,
            });
        }
        None
    }
}

/// Character selection screen cursor
#[derive(Debug, Clone, Default)]
pub struct CharacterSelect {
    selected: Character,
}

impl CharacterSelect {
    /// Start on the previously chosen character
    pub fn new(selected: Character) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Character {
        self.selected
    }

    /// Left/Right cycle (wrapping); Enter confirms and returns the choice
    ///
    /// Left and Right pressed on the same tick cancel out.
    pub fn handle_input(&mut self, keys: &KeyEdges) -> Option<Character> {
        let len = Character::ALL.len();
        let index = self.selected.index();
        match (keys.just_pressed(Key::Left), keys.just_pressed(Key::Right)) {
            (false, true) => self.selected = Character::ALL[(index + 1) % len],
            (true, false) => self.selected = Character::ALL[(index + len - 1) % len],
            _ => {}
        }
        if keys.just_pressed(Key::Enter) {
            return Some(self.selected);
        }
        None
    }
}
