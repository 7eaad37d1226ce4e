use log::{info, warn};
use shared::{rank_of, Collectible, Packet, Player};
use std::time::Instant;

/// The client's display-only copy of the arena.
///
/// Replaced wholesale by every `GameState` broadcast; nothing here is ever
/// mutated locally beyond connection and ping bookkeeping.
pub struct DisplayState {
    pub players: Vec<Player>,
    pub collectibles: Vec<Collectible>,
    pub local_id: Option<u32>,
    pub ping_ms: Option<u64>,
    pending_ping: Option<Instant>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            collectibles: Vec::new(),
            local_id: None,
            ping_ms: None,
            pending_ping: None,
        }
    }

    /// Folds one server packet into the display state.
    pub fn handle_packet(&mut self, packet: Packet) {
        match packet {
            Packet::Connected { client_id } => {
                info!("Connected! Client ID: {}", client_id);
                self.local_id = Some(client_id);
            }

            Packet::GameState {
                players,
                collectibles,
            } => {
                self.players = players;
                self.collectibles = collectibles;
            }

            Packet::Pong { timestamp: _ } => {
                if let Some(sent) = self.pending_ping.take() {
                    self.ping_ms = Some(sent.elapsed().as_millis() as u64);
                }
            }

            Packet::Disconnected { reason } => {
                warn!("Disconnected: {}", reason);
                self.local_id = None;
            }

            _ => {
                warn!("Unexpected packet type from server");
            }
        }
    }

    /// Records that a ping is in flight so the next pong yields a latency.
    pub fn mark_ping_sent(&mut self) {
        self.pending_ping = Some(Instant::now());
    }

    pub fn is_connected(&self) -> bool {
        self.local_id.is_some()
    }

    pub fn local_player(&self) -> Option<&Player> {
        let id = self.local_id?;
        self.players.iter().find(|p| p.id == id)
    }

    /// 1-based rank of the local player in the current snapshot.
    pub fn local_rank(&self) -> Option<usize> {
        rank_of(self.local_id?, &self.players)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_sets_local_id() {
        let mut state = DisplayState::new();
        assert!(!state.is_connected());

        state.handle_packet(Packet::Connected { client_id: 7 });
        assert_eq!(state.local_id, Some(7));
        assert!(state.is_connected());
    }

    #[test]
    fn test_snapshot_replaces_previous_state() {
        let mut state = DisplayState::new();

        state.handle_packet(Packet::GameState {
            players: vec![Player::new(1, 100, 100)],
            collectibles: vec![Collectible::new(5, 50, 50)],
        });
        state.handle_packet(Packet::GameState {
            players: vec![Player::new(2, 200, 200)],
            collectibles: vec![Collectible::new(6, 60, 60)],
        });

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].id, 2);
        assert_eq!(state.collectibles[0].id, 6);
    }

    #[test]
    fn test_pong_without_pending_ping_is_ignored() {
        let mut state = DisplayState::new();
        state.handle_packet(Packet::Pong { timestamp: 123 });
        assert_eq!(state.ping_ms, None);
    }

    #[test]
    fn test_pong_measures_round_trip() {
        let mut state = DisplayState::new();
        state.mark_ping_sent();
        std::thread::sleep(std::time::Duration::from_millis(2));
        state.handle_packet(Packet::Pong { timestamp: 123 });
        assert!(state.ping_ms.is_some());
    }

    #[test]
    fn test_local_rank_follows_snapshot() {
        let mut state = DisplayState::new();
        state.handle_packet(Packet::Connected { client_id: 2 });

        let mut leader = Player::new(1, 100, 100);
        leader.score = 10;
        state.handle_packet(Packet::GameState {
            players: vec![leader, Player::new(2, 200, 200)],
            collectibles: vec![Collectible::new(5, 50, 50)],
        });

        assert_eq!(state.local_rank(), Some(2));
        assert_eq!(state.local_player().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_disconnected_clears_local_id() {
        let mut state = DisplayState::new();
        state.handle_packet(Packet::Connected { client_id: 7 });
        state.handle_packet(Packet::Disconnected {
            reason: "Server full".to_string(),
        });
        assert!(!state.is_connected());
    }
}
