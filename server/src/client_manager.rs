//! Session management for the multiplayer server
//!
//! This module tracks connected sessions on the gateway side:
//! - Session lifecycle (connect, disconnect, timeout)
//! - Address-to-session resolution for incoming datagrams
//! - Liveness monitoring and automatic cleanup
//! - Capacity enforcement
//!
//! Sessions are pure connection bookkeeping. The matching player entity
//! lives in the game state and is created/removed alongside the session by
//! the server's event loop.

use log::info;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Sessions that stay silent this long are presumed gone. Clients ping once
/// a second, so a healthy connection never comes close.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A single connected session
///
/// Holds the server-assigned id (stable for the connection's lifetime), the
/// peer address for response routing, and the liveness clock.
#[derive(Debug)]
pub struct Client {
    /// Unique session identifier assigned by the server
    pub id: u32,
    /// Network address for sending responses
    pub addr: SocketAddr,
    /// Last time any packet arrived from this session
    pub last_seen: Instant,
}

impl Client {
    pub fn new(id: u32, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            last_seen: Instant::now(),
        }
    }

    /// Refreshes the liveness clock. Called for every packet the session sends.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// True if no packet has arrived within the timeout window.
    pub fn is_timed_out(&self, timeout: Duration) -> bool {
        self.last_seen.elapsed() > timeout
    }
}

/// Registry of all connected sessions
///
/// Enforces the capacity limit, assigns session ids, and resolves incoming
/// datagram addresses to sessions. Ids start at 1 and increment per
/// connection; they are never reused within a server run.
pub struct ClientManager {
    clients: HashMap<u32, Client>,
    next_client_id: u32,
    max_clients: usize,
}

impl ClientManager {
    pub fn new(max_clients: usize) -> Self {
        Self {
            clients: HashMap::new(),
            next_client_id: 1,
            max_clients,
        }
    }

    /// Admits a new session, returning its id, or None at capacity.
    pub fn add_client(&mut self, addr: SocketAddr) -> Option<u32> {
        if self.clients.len() >= self.max_clients {
            return None;
        }

        let client_id = self.next_client_id;
        self.next_client_id += 1;

        info!("Client {} connected from {}", client_id, addr);
        self.clients.insert(client_id, Client::new(client_id, addr));

        Some(client_id)
    }

    /// Drops a session. Returns true if it existed, false if already gone
    /// (explicit disconnect racing the timeout sweep is normal).
    pub fn remove_client(&mut self, client_id: &u32) -> bool {
        if let Some(client) = self.clients.remove(client_id) {
            info!("Client {} disconnected", client.id);
            true
        } else {
            false
        }
    }

    /// Resolves the session id for a peer address, if one is connected.
    pub fn find_client_by_addr(&self, addr: SocketAddr) -> Option<u32> {
        self.clients
            .iter()
            .find(|(_, client)| client.addr == addr)
            .map(|(id, _)| *id)
    }

    /// Marks a session as alive. Returns false for unknown ids.
    pub fn touch(&mut self, client_id: u32) -> bool {
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.touch();
            true
        } else {
            false
        }
    }

    /// Sweeps out sessions that exceeded [`CLIENT_TIMEOUT`], returning their
    /// ids so the caller can drop the matching players and broadcast.
    pub fn check_timeouts(&mut self) -> Vec<u32> {
        let timed_out: Vec<u32> = self
            .clients
            .iter()
            .filter(|(_, client)| client.is_timed_out(CLIENT_TIMEOUT))
            .map(|(id, _)| *id)
            .collect();

        for client_id in &timed_out {
            self.remove_client(client_id);
        }

        timed_out
    }

    /// All (session id, address) pairs, used to fan broadcasts out.
    pub fn get_client_addrs(&self) -> Vec<(u32, SocketAddr)> {
        self.clients
            .iter()
            .map(|(id, client)| (*id, client.addr))
            .collect()
    }

    /// Number of currently connected sessions
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// True if no sessions are connected
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
