use serde::{Deserialize, Serialize};

pub const ARENA_WIDTH: i32 = 640;
pub const ARENA_HEIGHT: i32 = 480;

// Movement clamps. The strip above y = 40 is reserved for the HUD, so players
// may roam the full width but never above it.
pub const MIN_X: i32 = 0;
pub const MAX_X: i32 = 640;
pub const MIN_Y: i32 = 40;
pub const MAX_Y: i32 = 480;

// Spawn rectangle, inset from the walls so nothing materializes flush with
// the boundary art. x in [20, 620), y in [40, 440).
pub const SPAWN_MIN_X: i32 = 20;
pub const SPAWN_RANGE_X: i32 = 600;
pub const SPAWN_MIN_Y: i32 = 40;
pub const SPAWN_RANGE_Y: i32 = 400;

pub const DEFAULT_SPEED: i32 = 5;
pub const PROTOCOL_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Packet {
    Connect {
        client_version: u32,
    },
    MovePlayer {
        dir: Direction,
        speed: Option<i32>,
    },
    Ping,
    Disconnect,

    Connected {
        client_id: u32,
    },
    GameState {
        players: Vec<Player>,
        collectibles: Vec<Collectible>,
    },
    Pong {
        timestamp: u64,
    },
    Disconnected {
        reason: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub score: u32,
}

impl Player {
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self { id, x, y, score: 0 }
    }

    /// Applies one movement step. The candidate position is taken only if it
    /// stays inside the movement clamps; an out-of-bounds step leaves the
    /// player where they are (no bounce, no partial step). A step that
    /// overflows i32 is out of bounds by definition.
    pub fn apply_move(&mut self, dir: Direction, speed: i32) {
        match dir {
            Direction::Left | Direction::Right => {
                let candidate = if dir == Direction::Right {
                    self.x.checked_add(speed)
                } else {
                    self.x.checked_sub(speed)
                };
                match candidate {
                    Some(x) if (MIN_X..=MAX_X).contains(&x) => self.x = x,
                    _ => {}
                }
            }
            Direction::Up | Direction::Down => {
                let candidate = if dir == Direction::Down {
                    self.y.checked_add(speed)
                } else {
                    self.y.checked_sub(speed)
                };
                match candidate {
                    Some(y) if (MIN_Y..=MAX_Y).contains(&y) => self.y = y,
                    _ => {}
                }
            }
        }
    }

    /// Collection requires exact coordinate equality, not proximity.
    pub fn collides(&self, item: &Collectible) -> bool {
        self.x == item.x && self.y == item.y
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Collectible {
    pub id: u64,
    pub x: i32,
    pub y: i32,
    pub value: u32,
}

impl Collectible {
    pub fn new(id: u64, x: i32, y: i32) -> Self {
        Self { id, x, y, value: 1 }
    }
}

/// Resolves the speed field of a movement event. Missing or non-positive
/// values fall back to the default step of 5.
pub fn effective_speed(speed: Option<i32>) -> i32 {
    match speed {
        Some(s) if s > 0 => s,
        _ => DEFAULT_SPEED,
    }
}

/// 1-based rank of a player within the given list, or None if absent.
///
/// Players are ordered by descending score with a stable sort, so equal
/// scores keep their registration order: whoever joined first ranks higher
/// among ties. Clients render this next to the score display.
pub fn rank_of(player_id: u32, players: &[Player]) -> Option<usize> {
    let mut ordered: Vec<&Player> = players.iter().collect();
    ordered.sort_by(|a, b| b.score.cmp(&a.score));
    ordered.iter().position(|p| p.id == player_id).map(|i| i + 1)
}
