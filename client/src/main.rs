use clap::Parser;
use client::game::DisplayState;
use client::input::InputManager;
use client::network::Connection;
use client::rendering;
use log::{error, info};
use macroquad::prelude::*;
use shared::{ARENA_HEIGHT, ARENA_WIDTH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Coin Grab".to_owned(),
        window_width: ARENA_WIDTH,
        window_height: ARENA_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Connecting to: {}", args.server);
    info!("Controls: WASD / arrow keys to move, Esc to quit");

    let connection = match Connection::connect(&args.server) {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to connect to {}: {}", args.server, e);
            return;
        }
    };

    let mut state = DisplayState::new();
    let mut input = InputManager::new();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            connection.send_disconnect();
            break;
        }

        connection.poll(&mut state);

        for dir in input.movement() {
            connection.send_move(dir);
        }

        if input.should_ping() {
            connection.send_ping();
            state.mark_ping_sent();
        }

        rendering::draw(&state);
        next_frame().await;
    }
}
