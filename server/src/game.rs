use crate::spawn;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{effective_speed, Collectible, Direction, Packet, Player};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Authoritative arena state: the player and collectible registries plus the
/// event processor that mutates them.
///
/// Both registries are insertion-ordered, which keeps snapshots deterministic
/// and gives the score ranking its arrival-order tie-break. Only the server's
/// event loop holds a `GameState`; nothing else mutates it.
#[derive(Debug)]
pub struct GameState {
    pub players: Vec<Player>,
    pub collectibles: Vec<Collectible>,
    next_collectible_id: u64,
    rng: StdRng,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Builds a state with a caller-supplied RNG so tests can be deterministic.
    pub fn with_rng(rng: StdRng) -> Self {
        // Collectible ids are derived from the clock at creation and strictly
        // increase from there, so same-millisecond spawns stay distinct.
        let id_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        let mut state = Self {
            players: Vec::new(),
            collectibles: Vec::new(),
            next_collectible_id: id_seed,
            rng,
        };

        // The arena always holds at least one collectible
        state.spawn_collectible();
        state
    }

    /// Registers a new player at a random spawn position with score 0.
    ///
    /// The gateway hands out unique session ids, so a duplicate id means a
    /// stale session entry; the call is ignored rather than clobbering it.
    pub fn add_player(&mut self, client_id: u32) {
        if self.players.iter().any(|p| p.id == client_id) {
            warn!("Ignoring duplicate player id {}", client_id);
            return;
        }

        let (x, y) = spawn::random_position(&mut self.rng);
        info!("Added player {} at ({}, {})", client_id, x, y);
        self.players.push(Player::new(client_id, x, y));
    }

    /// Removes a player entirely. No-op if they already left.
    pub fn remove_player(&mut self, client_id: &u32) {
        let before = self.players.len();
        self.players.retain(|p| p.id != *client_id);
        if self.players.len() < before {
            info!("Removed player {}", client_id);
        }
    }

    /// Applies one movement event: clamp-checked position step, then the
    /// collection pass at the new position.
    ///
    /// Returns true when the event was processed and a broadcast is due,
    /// including moves the clamps reduced to a no-op, so score displays stay
    /// fresh. Returns false when the player is unknown (late event after
    /// disconnect) and the event was discarded.
    pub fn apply_move(&mut self, client_id: u32, dir: Direction, speed: Option<i32>) -> bool {
        let speed = effective_speed(speed);

        let Some(player) = self.players.iter_mut().find(|p| p.id == client_id) else {
            debug!("Dropping move event for unknown player {}", client_id);
            return false;
        };

        player.apply_move(dir, speed);
        self.collect_at(client_id);
        true
    }

    /// Consumes every collectible sharing the player's exact position. Each
    /// consumption awards its value and is immediately followed by exactly
    /// one replacement spawn, so the at-least-one invariant never lapses.
    fn collect_at(&mut self, client_id: u32) {
        let Some(idx) = self.players.iter().position(|p| p.id == client_id) else {
            return;
        };
        let (px, py) = (self.players[idx].x, self.players[idx].y);

        // Multiple collectibles on one coordinate are unlikely but legal;
        // all of them are consumed in this one step.
        let player = &self.players[idx];
        let hits: Vec<u64> = self
            .collectibles
            .iter()
            .filter(|c| player.collides(c))
            .map(|c| c.id)
            .collect();

        for id in hits {
            if let Some(value) = self.consume_collectible(id) {
                self.players[idx].score += value;
                info!(
                    "Player {} collected {} at ({}, {}), score now {}",
                    client_id, id, px, py, self.players[idx].score
                );
                self.spawn_collectible();
            }
        }
    }

    /// Adds a fresh collectible at a random spawn position.
    pub fn spawn_collectible(&mut self) {
        let (x, y) = spawn::random_position(&mut self.rng);
        let id = self.next_collectible_id;
        self.next_collectible_id += 1;

        debug!("Spawned collectible {} at ({}, {})", id, x, y);
        self.collectibles.push(Collectible::new(id, x, y));
    }

    /// Removes the collectible with the given id and returns its value.
    /// Unknown ids no-op, so a doubled consumption cannot double-award.
    pub fn consume_collectible(&mut self, id: u64) -> Option<u32> {
        let idx = self.collectibles.iter().position(|c| c.id == id)?;
        Some(self.collectibles.remove(idx).value)
    }

    /// Builds the full-state packet broadcast to every session. Always the
    /// complete player and collectible lists, never a delta.
    pub fn snapshot(&self) -> Packet {
        Packet::GameState {
            players: self.players.clone(),
            collectibles: self.collectibles.clone(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DEFAULT_SPEED, MAX_X, MAX_Y, MIN_X, MIN_Y};

    fn test_state() -> GameState {
        GameState::with_rng(StdRng::seed_from_u64(42))
    }

    /// Places the player at a fixed position so tests don't depend on spawns.
    fn place_player(state: &mut GameState, id: u32, x: i32, y: i32) {
        state.add_player(id);
        let player = state.players.iter_mut().find(|p| p.id == id).unwrap();
        player.x = x;
        player.y = y;
    }

    #[test]
    fn test_starts_with_one_collectible() {
        let state = test_state();
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].value, 1);
    }

    #[test]
    fn test_add_player_spawns_in_bounds() {
        let mut state = test_state();
        state.add_player(1);

        let player = &state.players[0];
        assert_eq!(player.score, 0);
        assert!((20..620).contains(&player.x));
        assert!((40..440).contains(&player.y));
    }

    #[test]
    fn test_duplicate_player_id_ignored() {
        let mut state = test_state();
        state.add_player(1);
        let original = state.players[0].clone();

        state.add_player(1);
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0], original);
    }

    #[test]
    fn test_remove_player_is_idempotent() {
        let mut state = test_state();
        state.add_player(1);
        state.remove_player(&1);
        assert!(state.players.is_empty());

        // Removing again must not panic or error
        state.remove_player(&1);
        assert!(state.players.is_empty());
    }

    #[test]
    fn test_players_keep_registration_order() {
        let mut state = test_state();
        state.add_player(3);
        state.add_player(1);
        state.add_player(2);

        let ids: Vec<u32> = state.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_move_applies_default_speed() {
        let mut state = test_state();
        place_player(&mut state, 1, 100, 100);

        let processed = state.apply_move(1, Direction::Right, None);
        assert!(processed);
        assert_eq!(state.players[0].x, 100 + DEFAULT_SPEED);

        state.apply_move(1, Direction::Right, Some(-4));
        assert_eq!(state.players[0].x, 100 + 2 * DEFAULT_SPEED);
    }

    #[test]
    fn test_hostile_speed_does_not_panic_the_processor() {
        let mut state = test_state();
        place_player(&mut state, 1, 100, 100);

        // Any positive i32 passes the speed check, so the step itself must
        // absorb values that would overflow the coordinate
        let processed = state.apply_move(1, Direction::Right, Some(i32::MAX));
        assert!(processed);
        assert_eq!((state.players[0].x, state.players[0].y), (100, 100));
    }

    #[test]
    fn test_move_for_unknown_player_is_discarded() {
        let mut state = test_state();
        let processed = state.apply_move(99, Direction::Left, Some(5));
        assert!(!processed);
    }

    #[test]
    fn test_blocked_move_still_counts_as_processed() {
        let mut state = test_state();
        place_player(&mut state, 1, 638, 100);

        // The clamp drops the step, but the event itself is processed
        let processed = state.apply_move(1, Direction::Right, Some(5));
        assert!(processed);
        assert_eq!(state.players[0].x, 638);
    }

    #[test]
    fn test_collection_awards_score_and_respawns() {
        let mut state = test_state();
        place_player(&mut state, 1, 45, 50);

        state.collectibles.clear();
        state.collectibles.push(Collectible::new(1000, 50, 50));

        state.apply_move(1, Direction::Right, Some(5));

        assert_eq!(state.players[0].score, 1);
        assert_eq!(state.collectibles.len(), 1);

        let replacement = &state.collectibles[0];
        assert_ne!(replacement.id, 1000);
        assert!((20..620).contains(&replacement.x));
        assert!((40..440).contains(&replacement.y));
    }

    #[test]
    fn test_near_miss_does_not_collect() {
        let mut state = test_state();
        place_player(&mut state, 1, 101, 100);

        state.collectibles.clear();
        state.collectibles.push(Collectible::new(1000, 100, 100));

        state.apply_move(1, Direction::Down, Some(5));

        assert_eq!(state.players[0].score, 0);
        assert_eq!(state.collectibles[0].id, 1000);
    }

    #[test]
    fn test_stacked_collectibles_all_consumed_in_one_step() {
        let mut state = test_state();
        place_player(&mut state, 1, 45, 50);

        state.collectibles.clear();
        state.collectibles.push(Collectible::new(1000, 50, 50));
        state.collectibles.push(Collectible::new(1001, 50, 50));
        state.collectibles.push(Collectible::new(1002, 300, 300));

        state.apply_move(1, Direction::Right, Some(5));

        // Both stacked items consumed, each with its own replacement
        assert_eq!(state.players[0].score, 2);
        assert_eq!(state.collectibles.len(), 3);
        assert!(state.collectibles.iter().any(|c| c.id == 1002));
        assert!(!state.collectibles.iter().any(|c| c.id == 1000));
        assert!(!state.collectibles.iter().any(|c| c.id == 1001));
    }

    #[test]
    fn test_consume_unknown_id_noops() {
        let mut state = test_state();
        let count = state.collectibles.len();

        assert_eq!(state.consume_collectible(u64::MAX), None);
        assert_eq!(state.collectibles.len(), count);
    }

    #[test]
    fn test_collectible_ids_are_unique() {
        let mut state = test_state();
        for _ in 0..50 {
            state.spawn_collectible();
        }

        let mut ids: Vec<u64> = state.collectibles.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.collectibles.len());
    }

    #[test]
    fn test_invariants_hold_under_random_walk() {
        let mut state = test_state();
        state.add_player(1);
        state.add_player(2);

        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        let mut last_scores = [0u32; 2];
        for step in 0..5_000 {
            let id = (step % 2 + 1) as u32;
            let dir = dirs[(step / 2) % 4];
            state.apply_move(id, dir, Some((step % 9 + 1) as i32));

            assert!(!state.collectibles.is_empty());
            for (i, player) in state.players.iter().enumerate() {
                assert!((MIN_X..=MAX_X).contains(&player.x));
                assert!((MIN_Y..=MAX_Y).contains(&player.y));
                assert!(player.score >= last_scores[i]);
                last_scores[i] = player.score;
            }
        }
    }

    #[test]
    fn test_snapshot_carries_full_state() {
        let mut state = test_state();
        state.add_player(1);
        state.add_player(2);

        match state.snapshot() {
            Packet::GameState {
                players,
                collectibles,
            } => {
                assert_eq!(players, state.players);
                assert_eq!(collectibles, state.collectibles);
            }
            _ => panic!("Snapshot must be a GameState packet"),
        }
    }
}
