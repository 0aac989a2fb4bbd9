use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

use chess_rules_core::Error;

use crate::AppState;

pub mod games;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures a handler can report.
pub enum AppError {
    Core(Error),
    Template(askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(Error::Command(_) | Error::Position(_)) => StatusCode::BAD_REQUEST,
            AppError::Core(Error::Move(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Core(Error::GameNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Core(e) => e.to_string(),
            AppError::Template(e) => format!("Template error: {}", e),
        }
    }
}

impl<E: Into<Error>> From<E> for AppError {
    fn from(error: E) -> Self {
        AppError::Core(error.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(error = %message, "request failed");
        } else {
            warn!(error = %message, "request rejected");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(AppError::Template)
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub games: Vec<GameRow>,
}

pub struct GameRow {
    pub id: i64,
    pub turn: String,
    pub created: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let stored_games = state.service().games()?;

    let games: Vec<GameRow> = stored_games.iter().map(|g| {
        let created = chrono::DateTime::from_timestamp(g.created_at as i64, 0)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        GameRow {
            id: g.game_id,
            turn: g.turn.clone(),
            created,
        }
    }).collect();

    render(&IndexTemplate {
        title: "Chess".to_string(),
        games,
    })
}

pub async fn create_game(State(state): State<Arc<AppState>>) -> Result<Redirect, AppError> {
    let (game_id, _) = state.service().create_game()?;
    Ok(Redirect::to(&format!("/games/{}", game_id)))
}

pub async fn health() -> &'static str {
    "OK"
}
