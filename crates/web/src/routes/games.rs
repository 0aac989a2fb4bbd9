use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use chess_rules_core::render::board_rows;
use chess_rules_core::{Color, Finish, GameId, Position, Score};

use super::{render, AppError};
use crate::AppState;

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub game_id: GameId,
    pub rows: Vec<BoardRow>,
    pub files: Vec<char>,
    pub turn: String,
    pub score: String,
    pub winner: Option<String>,
}

pub struct BoardRow {
    pub rank: usize,
    pub text: String,
    pub squares: Vec<char>,
}

// ============================================================================
// REQUESTS / RESPONSES
// ============================================================================

#[derive(Deserialize)]
pub struct MoveForm {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub game_id: GameId,
    pub turn: Color,
    pub score: Score,
    pub is_end: bool,
    pub winner: Option<Color>,
}

#[derive(Serialize)]
pub struct EndResponse {
    pub game_id: GameId,
    pub decided: bool,
    pub winner: Option<Color>,
    pub score: Option<Score>,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn show_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Html<String>, AppError> {
    let game = state.service().load_game(game_id)?;

    let rows = board_rows(game.board())
        .into_iter()
        .zip((1..=8).rev())
        .map(|(text, rank)| BoardRow {
            rank,
            squares: text.chars().collect(),
            text,
        })
        .collect();

    render(&BoardTemplate {
        title: format!("Game #{}", game_id),
        game_id,
        rows,
        files: ('a'..='h').collect(),
        turn: game.turn().to_string(),
        score: game.calculate_score().to_string(),
        winner: game.winner().map(|c| c.to_string()),
    })
}

pub async fn move_piece(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
    Form(form): Form<MoveForm>,
) -> Result<Redirect, AppError> {
    let from: Position = form.from.parse()?;
    let to: Position = form.to.parse()?;

    let service = state.service();
    let mut game = service.load_game(game_id)?;
    let outcome = service.play(&mut game, from, to)?;

    if let Some(captured) = outcome.captured {
        info!(game_id, %captured, square = %to, "piece captured");
    }
    Ok(Redirect::to(&format!("/games/{}", game_id)))
}

pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Json<StatusResponse>, AppError> {
    let game = state.service().load_game(game_id)?;

    Ok(Json(StatusResponse {
        game_id,
        turn: game.turn(),
        score: game.calculate_score(),
        is_end: game.is_end(),
        winner: game.winner(),
    }))
}

pub async fn end_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<GameId>,
) -> Result<Json<EndResponse>, AppError> {
    let service = state.service();
    let game = service.load_game(game_id)?;

    let response = match service.finish(&game)? {
        Finish::Undecided(score) => EndResponse {
            game_id,
            decided: false,
            winner: None,
            score: Some(score),
        },
        Finish::Decided(winner) => EndResponse {
            game_id,
            decided: true,
            winner: Some(winner),
            score: None,
        },
    };
    Ok(Json(response))
}
