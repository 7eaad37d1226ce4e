//! # Coin Grab Server Library
//!
//! Authoritative server for the multiplayer coin-collecting game. The server
//! owns the canonical arena state (players and collectibles), applies every
//! movement event exactly once, and pushes the resulting full-state snapshot
//! to all connected sessions.
//!
//! ## Architecture
//!
//! All mutations funnel through a single event loop: network tasks translate
//! datagrams into messages on one channel, and the loop applies them in
//! arrival order against the owned `GameState`. No two events can ever
//! observe inconsistent intermediate state, which is what makes the
//! broadcast-after-every-event model safe.
//!
//! Broadcasts are always the complete snapshot. Full-state replication costs
//! bandwidth but removes every class of client drift bug, which at this
//! arena size is the right trade.
//!
//! ## Module Organization
//!
//! - [`spawn`] - random position generation inside the arena's spawn margins
//! - [`game`] - player/collectible registries and the event processor
//! - [`client_manager`] - session registry, address lookup, liveness timeouts
//! - [`network`] - UDP gateway, broadcast coordinator, and the event loop

pub mod client_manager;
pub mod game;
pub mod network;
pub mod spawn;
