//! Macroquad rendering of the arena, HUD strip, and rankings overlay

use crate::game::DisplayState;
use macroquad::prelude::*;
use shared::{Player, ARENA_WIDTH, MIN_Y};

const PLAYER_SIZE: f32 = 20.0;
const COLLECTIBLE_SIZE: f32 = 10.0;

const BACKGROUND: Color = Color::new(0.13, 0.13, 0.13, 1.0);
const HUD_BACKGROUND: Color = Color::new(0.07, 0.07, 0.07, 1.0);
const COLLECTIBLE_GOLD: Color = Color::new(1.0, 0.84, 0.0, 1.0);
const LOCAL_GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const REMOTE_RED: Color = Color::new(1.0, 0.27, 0.27, 1.0);

pub fn draw(state: &DisplayState) {
    clear_background(BACKGROUND);

    draw_hud(state);
    draw_collectibles(state);
    draw_players(state);
    draw_rankings(state);
}

/// The strip above y = 40 that play never enters: title, score, rank, ping.
fn draw_hud(state: &DisplayState) {
    draw_rectangle(0.0, 0.0, ARENA_WIDTH as f32, MIN_Y as f32, HUD_BACKGROUND);
    draw_text("COIN GRAB", 10.0, 26.0, 24.0, WHITE);

    if let Some(player) = state.local_player() {
        let status = match state.local_rank() {
            Some(rank) => format!(
                "Score: {}   Rank: {} / {}",
                player.score,
                rank,
                state.players.len()
            ),
            None => format!("Score: {}", player.score),
        };
        draw_text(&status, 180.0, 26.0, 18.0, WHITE);
    } else {
        draw_text("Connecting...", 180.0, 26.0, 18.0, GRAY);
    }

    let connection_color = if state.is_connected() { GREEN } else { RED };
    draw_rectangle(ARENA_WIDTH as f32 - 90.0, 12.0, 8.0, 8.0, connection_color);

    let ping_text = match state.ping_ms {
        Some(ms) => format!("{} ms", ms),
        None => "-- ms".to_string(),
    };
    draw_text(&ping_text, ARENA_WIDTH as f32 - 75.0, 22.0, 16.0, WHITE);
}

fn draw_collectibles(state: &DisplayState) {
    for item in &state.collectibles {
        draw_rectangle(
            item.x as f32 - COLLECTIBLE_SIZE / 2.0,
            item.y as f32 - COLLECTIBLE_SIZE / 2.0,
            COLLECTIBLE_SIZE,
            COLLECTIBLE_SIZE,
            COLLECTIBLE_GOLD,
        );
    }
}

fn draw_players(state: &DisplayState) {
    for player in &state.players {
        let is_local = Some(player.id) == state.local_id;
        let color = if is_local { LOCAL_GREEN } else { REMOTE_RED };

        draw_rectangle(
            player.x as f32 - PLAYER_SIZE / 2.0,
            player.y as f32 - PLAYER_SIZE / 2.0,
            PLAYER_SIZE,
            PLAYER_SIZE,
            color,
        );
        draw_rectangle_lines(
            player.x as f32 - PLAYER_SIZE / 2.0,
            player.y as f32 - PLAYER_SIZE / 2.0,
            PLAYER_SIZE,
            PLAYER_SIZE,
            2.0,
            WHITE,
        );

        draw_text(
            &player.score.to_string(),
            player.x as f32 - 5.0,
            player.y as f32 + PLAYER_SIZE,
            14.0,
            WHITE,
        );
    }
}

/// Score table below the HUD, highest first, local player highlighted.
fn draw_rankings(state: &DisplayState) {
    if state.players.is_empty() {
        return;
    }

    let mut ordered: Vec<&Player> = state.players.iter().collect();
    ordered.sort_by(|a, b| b.score.cmp(&a.score));

    let panel_height = ordered.len() as f32 * 16.0 + 24.0;
    draw_rectangle(
        0.0,
        MIN_Y as f32,
        130.0,
        panel_height,
        Color::new(0.0, 0.0, 0.0, 0.7),
    );
    draw_text("RANKINGS", 5.0, MIN_Y as f32 + 16.0, 14.0, WHITE);

    for (index, player) in ordered.iter().enumerate() {
        let is_local = Some(player.id) == state.local_id;
        let color = if is_local { COLLECTIBLE_GOLD } else { WHITE };

        draw_text(
            &format!("{}. Player {}: {}", index + 1, player.id, player.score),
            5.0,
            MIN_Y as f32 + 34.0 + index as f32 * 16.0,
            13.0,
            color,
        );
    }
}
