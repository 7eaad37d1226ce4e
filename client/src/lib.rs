//! # Coin Grab Client Library
//!
//! Display-only client for the multiplayer coin-collecting game. The client
//! holds no authoritative state: it forwards key presses to the server as
//! movement events and renders whatever snapshot the server last broadcast.
//! There is no prediction or reconciliation; at a 5px step per event the
//! round trip is short enough that none is needed.
//!
//! ## Module Organization
//!
//! - [`network`] - nonblocking UDP connection, polled once per frame
//! - [`game`] - the last-received snapshot plus ping/rank bookkeeping
//! - [`input`] - keyboard mapping and send pacing
//! - [`rendering`] - macroquad drawing of the arena, HUD, and rankings

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
