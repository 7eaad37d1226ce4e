//! Headless scripted client for poking a running server by hand:
//! connects, walks a small square, pings, then disconnects, printing
//! everything the server sends back.

use bincode::{deserialize, serialize};
use shared::{Direction, Packet, PROTOCOL_VERSION};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{sleep, timeout};

async fn send(
    socket: &UdpSocket,
    addr: SocketAddr,
    packet: &Packet,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = serialize(packet)?;
    socket.send_to(&data, addr).await?;
    Ok(())
}

async fn recv(socket: &UdpSocket) -> Option<Packet> {
    let mut buf = [0u8; 8192];
    match timeout(Duration::from_millis(500), socket.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => deserialize::<Packet>(&buf[0..len]).ok(),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server_addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string())
        .parse::<SocketAddr>()?;

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    println!("Client socket bound to {}", socket.local_addr()?);

    println!("Sending connection request to {}", server_addr);
    send(
        &socket,
        server_addr,
        &Packet::Connect {
            client_version: PROTOCOL_VERSION,
        },
    )
    .await?;

    match recv(&socket).await {
        Some(Packet::Connected { client_id }) => {
            println!("Connection accepted with client ID: {}", client_id);
        }
        Some(other) => {
            println!("Unexpected response: {:?}", other);
            return Ok(());
        }
        None => {
            println!("No response from server");
            return Ok(());
        }
    }

    // Walk a small square and show each resulting snapshot
    let steps = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
    for dir in steps {
        send(
            &socket,
            server_addr,
            &Packet::MovePlayer {
                dir,
                speed: Some(5),
            },
        )
        .await?;

        if let Some(Packet::GameState {
            players,
            collectibles,
        }) = recv(&socket).await
        {
            println!(
                "Moved {:?}: {} players, {} collectibles",
                dir,
                players.len(),
                collectibles.len()
            );
            for p in &players {
                println!("  player {} at ({}, {}) score {}", p.id, p.x, p.y, p.score);
            }
        }

        sleep(Duration::from_millis(100)).await;
    }

    send(&socket, server_addr, &Packet::Ping).await?;
    if let Some(Packet::Pong { timestamp }) = recv(&socket).await {
        println!("Pong with timestamp {}", timestamp);
    }

    send(&socket, server_addr, &Packet::Disconnect).await?;
    println!("Disconnected");

    Ok(())
}
