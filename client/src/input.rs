//! Keyboard mapping and send pacing

use macroquad::prelude::*;
use shared::Direction;
use std::time::{Duration, Instant};

/// One movement event per held direction at this cadence, mimicking the key
/// repeat rate of the original browser client.
const MOVE_REPEAT: Duration = Duration::from_millis(33);

/// Ping cadence. Doubles as the session keepalive, so it must stay well
/// under the server's 5-second silence timeout.
const PING_INTERVAL: Duration = Duration::from_secs(1);

pub struct InputManager {
    last_move: Instant,
    last_ping: Instant,
}

impl InputManager {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_move: now,
            // Backdate so the first ping fires on the first frame
            last_ping: now - PING_INTERVAL,
        }
    }

    /// Directions to send this frame. WASD and arrow keys both work;
    /// diagonal movement is two events, one per axis.
    pub fn movement(&mut self) -> Vec<Direction> {
        let mut dirs = Vec::new();

        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            dirs.push(Direction::Left);
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            dirs.push(Direction::Right);
        }
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            dirs.push(Direction::Up);
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            dirs.push(Direction::Down);
        }

        if dirs.is_empty() || self.last_move.elapsed() < MOVE_REPEAT {
            return Vec::new();
        }

        self.last_move = Instant::now();
        dirs
    }

    /// True once per [`PING_INTERVAL`].
    pub fn should_ping(&mut self) -> bool {
        if self.last_ping.elapsed() >= PING_INTERVAL {
            self.last_ping = Instant::now();
            true
        } else {
            false
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
