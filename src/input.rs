//! Input handling with DAS (Delayed Auto Shift) and ARR (Auto Repeat Rate)
//!
//! Uses a polling-based approach that doesn't rely on key release events,
//! which are unreliable on Linux terminals: a movement key is considered
//! held while press events keep arriving, and times out otherwise.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Time after which we consider a key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);
/// Delay before auto-repeat kicks in
const DAS: Duration = Duration::from_millis(170);
/// Interval between auto-repeated actions once DAS has triggered
const ARR: Duration = Duration::from_millis(50);

/// Tracks one held movement key
#[derive(Debug, Clone)]
struct HeldKey {
    first_press: Instant,
    last_seen: Instant,
    das_triggered: bool,
    last_repeat: Option<Instant>,
}

impl HeldKey {
    fn new(now: Instant) -> Self {
        Self {
            first_press: now,
            last_seen: now,
            das_triggered: false,
            last_repeat: None,
        }
    }

    /// Whether a repeat action is due at `now`
    fn repeat_due(&mut self, now: Instant) -> bool {
        if now.duration_since(self.first_press) < DAS {
            return false;
        }
        if !self.das_triggered {
            self.das_triggered = true;
            self.last_repeat = Some(now);
            return true;
        }
        match self.last_repeat {
            Some(last) if now.duration_since(last) >= ARR => {
                self.last_repeat = Some(now);
                true
            }
            _ => false,
        }
    }
}

/// Key bindings resolved to key codes, supporting several keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> KeyCode {
        match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s if s.len() == 1 => KeyCode::Char(s.chars().next().unwrap()),
            _ => KeyCode::Char(' '), // fallback
        }
    }

    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            pause: Self::parse_keys(&settings.keys.pause),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

/// Input handler with DAS/ARR support for the three movement directions
pub struct InputHandler {
    left: Option<HeldKey>,
    right: Option<HeldKey>,
    down: Option<HeldKey>,
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left: None,
            right: None,
            down: None,
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event - returns immediate actions
    pub fn key_down(&mut self, key: KeyEvent) -> Vec<Action> {
        let mut actions = Vec::new();
        let now = Instant::now();

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            actions.push(Action::Quit);
            return actions;
        }

        let code = normalize_key(key.code);

        if self.bindings.move_left.contains(&code) {
            if let Some(held) = &mut self.left {
                held.last_seen = now;
            } else {
                actions.push(Action::MoveLeft);
                self.left = Some(HeldKey::new(now));
            }
            // Cancel opposite direction
            self.right = None;
        } else if self.bindings.move_right.contains(&code) {
            if let Some(held) = &mut self.right {
                held.last_seen = now;
            } else {
                actions.push(Action::MoveRight);
                self.right = Some(HeldKey::new(now));
            }
            self.left = None;
        } else if self.bindings.soft_drop.contains(&code) {
            if let Some(held) = &mut self.down {
                held.last_seen = now;
            } else {
                actions.push(Action::SoftDrop);
                self.down = Some(HeldKey::new(now));
            }
        } else if self.bindings.hard_drop.contains(&code) {
            actions.push(Action::HardDrop);
        } else if self.bindings.rotate.contains(&code) {
            actions.push(Action::Rotate);
        } else if self.bindings.pause.contains(&code) {
            actions.push(Action::TogglePause);
        } else if self.bindings.restart.contains(&code) {
            actions.push(Action::Restart);
        } else if self.bindings.quit.contains(&code) {
            actions.push(Action::Quit);
        }

        actions
    }

    /// Handle a key release event (may not be delivered on Linux)
    pub fn key_up(&mut self, key: KeyEvent) {
        let code = normalize_key(key.code);

        if self.bindings.move_left.contains(&code) {
            self.left = None;
        } else if self.bindings.move_right.contains(&code) {
            self.right = None;
        } else if self.bindings.soft_drop.contains(&code) {
            self.down = None;
        }
    }

    /// Update held keys and return repeat actions (call every frame)
    pub fn update(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let now = Instant::now();

        for held in [&mut self.left, &mut self.right, &mut self.down] {
            if held
                .as_ref()
                .is_some_and(|h| now.duration_since(h.last_seen) > KEY_TIMEOUT)
            {
                *held = None;
            }
        }

        if let Some(held) = &mut self.left {
            if held.repeat_due(now) {
                actions.push(Action::MoveLeft);
            }
        }
        if let Some(held) = &mut self.right {
            if held.repeat_due(now) {
                actions.push(Action::MoveRight);
            }
        }
        if let Some(held) = &mut self.down {
            if held.repeat_due(now) {
                actions.push(Action::SoftDrop);
            }
        }

        actions
    }

    /// Clear all held keys (useful for pause/resume)
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
        self.down = None;
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_first_press_fires_immediately() {
        let mut input = InputHandler::from_settings(&Settings::default());
        assert_eq!(input.key_down(press(KeyCode::Left)), vec![Action::MoveLeft]);
        // Repeated press events while held produce no extra immediate action
        assert!(input.key_down(press(KeyCode::Left)).is_empty());
    }

    #[test]
    fn test_opposite_direction_cancels_held_key() {
        let mut input = InputHandler::from_settings(&Settings::default());
        input.key_down(press(KeyCode::Left));
        assert_eq!(
            input.key_down(press(KeyCode::Right)),
            vec![Action::MoveRight]
        );
        assert!(input.left.is_none());
    }

    #[test]
    fn test_bound_action_keys() {
        let mut input = InputHandler::from_settings(&Settings::default());
        assert_eq!(
            input.key_down(press(KeyCode::Char(' '))),
            vec![Action::HardDrop]
        );
        assert_eq!(input.key_down(press(KeyCode::Up)), vec![Action::Rotate]);
        assert_eq!(
            input.key_down(press(KeyCode::Char('X'))),
            vec![Action::Rotate],
            "bindings are case-insensitive"
        );
        assert_eq!(
            input.key_down(press(KeyCode::Char('p'))),
            vec![Action::TogglePause]
        );
        assert_eq!(
            input.key_down(press(KeyCode::Char('q'))),
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut input = InputHandler::from_settings(&Settings::default());
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(event), vec![Action::Quit]);
    }

    #[test]
    fn test_no_repeat_before_das() {
        let mut input = InputHandler::from_settings(&Settings::default());
        input.key_down(press(KeyCode::Left));
        // Immediately after the press, DAS has not elapsed
        assert!(input.update().is_empty());
    }
}
