//! Key mapping and movement-hold tracking.
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
    MenuUp,
    MenuDown,
    Select,
    Quit,
}

impl Action {
    pub fn is_movement(self) -> bool {
        matches!(self, Action::TurnLeft | Action::TurnRight | Action::Forward | Action::Backward)
    }
}

/// Map a terminal key event to a game action. Releases and unknown keys map to nothing.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Action::TurnLeft),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Action::TurnRight),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Forward),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Backward),
        KeyCode::Up => Some(Action::MenuUp),
        KeyCode::Down => Some(Action::MenuDown),
        KeyCode::Enter => Some(Action::Select),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Footsteps {
    Start,
    Stop,
}

/// Terminals report held keys as a stream of repeats with gaps between them,
/// so movement counts as ongoing until `hold` passes without a movement key.
pub struct MovementHold {
    hold: Duration,
    last_move: Option<Instant>,
    moving: bool,
}

impl MovementHold {
    pub fn new(hold: Duration) -> Self {
        Self { hold, last_move: None, moving: false }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Feed this frame's input; returns a footstep change when movement starts or stops.
    pub fn observe(&mut self, moved: bool, now: Instant) -> Option<Footsteps> {
        if moved {
            self.last_move = Some(now);
        }
        let held = self
            .last_move
            .is_some_and(|t| now.saturating_duration_since(t) <= self.hold);
        match (self.moving, held) {
            (false, true) => {
                self.moving = true;
                Some(Footsteps::Start)
            }
            (true, false) => {
                self.moving = false;
                Some(Footsteps::Stop)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.last_move = None;
        self.moving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_play_and_menu_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('w'))), Some(Action::Forward));
        assert_eq!(action_for_key(press(KeyCode::Char('S'))), Some(Action::Backward));
        assert_eq!(action_for_key(press(KeyCode::Left)), Some(Action::TurnLeft));
        assert_eq!(action_for_key(press(KeyCode::Enter)), Some(Action::Select));
        assert_eq!(action_for_key(press(KeyCode::Char('z'))), None);
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn hold_bridges_repeat_gaps_then_stops() {
        let start = Instant::now();
        let mut hold = MovementHold::new(Duration::from_millis(150));
        assert_eq!(hold.observe(true, start), Some(Footsteps::Start));
        assert_eq!(hold.observe(false, start + Duration::from_millis(60)), None);
        assert_eq!(hold.observe(true, start + Duration::from_millis(100)), None);
        assert!(hold.is_moving());
        assert_eq!(
            hold.observe(false, start + Duration::from_millis(400)),
            Some(Footsteps::Stop)
        );
        assert_eq!(hold.observe(false, start + Duration::from_millis(500)), None);
    }
}
