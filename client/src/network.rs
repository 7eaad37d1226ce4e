//! Nonblocking UDP connection to the server, polled once per frame

use crate::game::DisplayState;
use bincode::{deserialize, serialize};
use log::{error, warn};
use shared::{Direction, Packet, DEFAULT_SPEED, PROTOCOL_VERSION};
use std::io::ErrorKind;
use std::net::UdpSocket;

pub struct Connection {
    socket: UdpSocket,
}

impl Connection {
    /// Binds an ephemeral socket, points it at the server, and fires the
    /// connection request. The `Connected` reply arrives through [`poll`].
    ///
    /// [`poll`]: Connection::poll
    pub fn connect(server_addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(server_addr)?;
        socket.set_nonblocking(true)?;

        let connection = Self { socket };
        connection.send(&Packet::Connect {
            client_version: PROTOCOL_VERSION,
        });

        Ok(connection)
    }

    /// Drains every packet the server sent since the last frame into the
    /// display state.
    pub fn poll(&self, state: &mut DisplayState) {
        // Snapshots grow with the player count, so the buffer is generous
        let mut buffer = [0u8; 16384];

        loop {
            match self.socket.recv(&mut buffer) {
                Ok(len) => match deserialize::<Packet>(&buffer[0..len]) {
                    Ok(packet) => state.handle_packet(packet),
                    Err(e) => warn!("Failed to deserialize packet: {}", e),
                },
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("Error receiving packet: {}", e);
                    break;
                }
            }
        }
    }

    pub fn send_move(&self, dir: Direction) {
        self.send(&Packet::MovePlayer {
            dir,
            speed: Some(DEFAULT_SPEED),
        });
    }

    pub fn send_ping(&self) {
        self.send(&Packet::Ping);
    }

    pub fn send_disconnect(&self) {
        self.send(&Packet::Disconnect);
    }

    fn send(&self, packet: &Packet) {
        match serialize(packet) {
            Ok(data) => {
                if let Err(e) = self.socket.send(&data) {
                    warn!("Failed to send packet: {}", e);
                }
            }
            Err(e) => error!("Failed to serialize packet: {}", e),
        }
    }
}
