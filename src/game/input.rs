//! Key handling. Terminal key events arrive as press/release transitions;
//! the controller folds the held pair into steering intents so the session
//! never has to remember which keys are down.

/// The three keys the game cares about. Anything else is screen chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Jump,
}

/// A key transition as reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: GameKey,
    pub pressed: bool,
}

/// What the player should do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Stop,
    /// Jump key transition; the player edge-detects the press itself.
    Jump(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Tracks the held steering keys plus which side currently drives.
///
/// Pressing a direction claims the drive slot immediately. Releasing the
/// driving side falls back to the other side if it is still held, otherwise
/// stops; releasing the idle side changes nothing.
#[derive(Debug, Default)]
pub struct InputController {
    left_held: bool,
    right_held: bool,
    active: Option<Side>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Intent> {
        match (event.key, event.pressed) {
            (GameKey::Left, true) => {
                self.left_held = true;
                self.active = Some(Side::Left);
                Some(Intent::MoveLeft)
            }
            (GameKey::Right, true) => {
                self.right_held = true;
                self.active = Some(Side::Right);
                Some(Intent::MoveRight)
            }
            (GameKey::Left, false) => {
                self.left_held = false;
                if self.active != Some(Side::Left) {
                    return None;
                }
                if self.right_held {
                    self.active = Some(Side::Right);
                    Some(Intent::MoveRight)
                } else {
                    self.active = None;
                    Some(Intent::Stop)
                }
            }
            (GameKey::Right, false) => {
                self.right_held = false;
                if self.active != Some(Side::Right) {
                    return None;
                }
                if self.left_held {
                    self.active = Some(Side::Left);
                    Some(Intent::MoveLeft)
                } else {
                    self.active = None;
                    Some(Intent::Stop)
                }
            }
            (GameKey::Jump, pressed) => Some(Intent::Jump(pressed)),
        }
    }
}
