//! REST API endpoint handlers for the Observer server.
//!
//! Every handler goes through [`AppState::read`] or [`AppState::mutate`],
//! so each request is one transaction against the single game session.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML scoreboard page |
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/api/game` | Start a new game (replaces any current one) |
//! | `GET` | `/api/game` | Scoreboard summary |
//! | `POST` | `/api/game/lineup` | Set the starting five |
//! | `POST` | `/api/game/score` | Log a score |
//! | `POST` | `/api/game/undo` | Undo the last play |
//! | `POST` | `/api/game/redo` | Redo the last undone play |
//! | `POST` | `/api/game/substitution` | Swap players on court |
//! | `POST` | `/api/game/quarter/complete` | Complete the current quarter |
//! | `GET` | `/api/game/quarters` | Per-quarter status |
//! | `GET` | `/api/game/report` | Player totals as JSON |
//! | `GET` | `/api/game/report.csv` | Player totals as a CSV download |
//! | `GET` | `/api/game/plays` | Play-by-play log |
//! | `GET` | `/api/game/integrity` | Replay check of the cached tally |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use courtside_core::GameSession;
use courtside_ledger::ProjectionResult;
use courtside_types::{
    BoxScoreRow, GameId, PlayByPlayEntry, Player, QuarterBoardEntry, QuarterProgress, ScoreValue,
    Scoreboard, Tally, Team,
};

use crate::error::ObserverError;
use crate::export::{REPORT_FILE_NAME, render_report_csv};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/game`.
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    /// Tracked team's name. Falls back to the configured default.
    #[serde(default)]
    pub own_team: Option<String>,
    /// Opponent's name. Falls back to the configured default.
    #[serde(default)]
    pub opponent_team: Option<String>,
    /// Raw roster names; trimmed, blanks dropped, truncated to the maximum.
    pub players: Vec<String>,
}

/// Response of `POST /api/game`.
#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    /// Identifier of the new game.
    pub game_id: GameId,
    /// When the game was started.
    pub started_at: DateTime<Utc>,
    /// The accepted roster.
    pub roster: Vec<Player>,
    /// Initial scoreboard.
    pub scoreboard: Scoreboard,
}

/// Body of `POST /api/game/lineup`.
#[derive(Debug, Deserialize)]
pub struct LineupRequest {
    /// The five starters.
    pub players: Vec<Player>,
}

/// Response of the lineup and substitution endpoints.
#[derive(Debug, Serialize)]
pub struct LineupResponse {
    /// Players on court after the change, in display order.
    pub lineup: Vec<Player>,
}

/// Body of `POST /api/game/score`.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// `own` or `opponent`.
    pub team: Team,
    /// 1, 2, or 3.
    pub points: ScoreValue,
}

/// Body of `POST /api/game/substitution`.
#[derive(Debug, Deserialize)]
pub struct SubstitutionRequest {
    /// Players leaving the court.
    pub out: Vec<Player>,
    /// Players entering, paired by position with `out`.
    #[serde(rename = "in")]
    pub incoming: Vec<Player>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the live score and play log.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .read(render_game)
        .await
        .unwrap_or_else(|_| "<p>No game in progress. Start one with <code>POST /api/game</code>.</p>".to_owned());

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Courtside</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Courtside</h1>
    {body}
    <hr>
    <p><a href="/api/game">/api/game</a> &middot; <a href="/api/game/report">/api/game/report</a>
    &middot; <a href="/api/game/report.csv">/api/game/report.csv</a>
    &middot; <a href="/api/game/plays">/api/game/plays</a>
    &middot; <code>ws://host:port/ws/game</code></p>
</body>
</html>"#
    ))
}

fn render_game(session: &GameSession) -> String {
    let board = session.scoreboard();
    let mut html = format!(
        r#"<p>{own} vs {opp} &middot; {quarter} &middot; {phase:?}</p>
    <div class="metric"><div class="label">{own}</div><div class="value">{team_score}</div></div>
    <div class="metric"><div class="label">{opp}</div><div class="value">{opp_score}</div></div>
    <h2>Plus/Minus</h2>
    <ul>"#,
        own = escape(&board.own_team),
        opp = escape(&board.opponent_team),
        quarter = board.current_quarter,
        phase = board.phase,
        team_score = board.team_score,
        opp_score = board.opponent_score,
    );
    let rows: String = session
        .export_report()
        .iter()
        .map(|row| {
            format!(
                "<li>{}: {} ({} possessions)</li>",
                escape(row.player.as_str()),
                courtside_core::report::signed(row.plus_minus),
                row.possessions_played
            )
        })
        .collect();
    let plays: String = session
        .play_by_play()
        .iter()
        .map(|entry| format!("<li>{}</li>", escape(&session.play_line(entry))))
        .collect();

    html.push_str(&rows);
    html.push_str("</ul>\n    <h2>Play-by-Play</h2>\n    <ul>");
    html.push_str(&plays);
    html.push_str("</ul>");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Game lifecycle
// ---------------------------------------------------------------------------

/// Start a new game, replacing any game already in progress.
pub async fn start_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartGameRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let own_team = non_blank(req.own_team).unwrap_or_else(|| state.game_defaults.own_team.clone());
    let opponent_team =
        non_blank(req.opponent_team).unwrap_or_else(|| state.game_defaults.opponent_team.clone());

    let session = GameSession::start(own_team, opponent_team, &req.players, &state.roster_rules)?;
    let game_id = session.id();
    let started_at = session.started_at();
    let roster = session.roster().players().to_vec();
    let scoreboard = state.replace_session(session).await;

    Ok((
        StatusCode::CREATED,
        Json(StartGameResponse {
            game_id,
            started_at,
            roster,
            scoreboard,
        }),
    ))
}

fn non_blank(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())
}

/// Return the live scoreboard.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Scoreboard>, ObserverError> {
    state.read(GameSession::scoreboard).await.map(Json)
}

/// Set the starting five.
pub async fn set_lineup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LineupRequest>,
) -> Result<Json<LineupResponse>, ObserverError> {
    let lineup = state
        .mutate(|s| {
            s.set_starting_lineup(&req.players)
                .map(|l| l.players().to_vec())
        })
        .await?;
    Ok(Json(LineupResponse { lineup }))
}

// ---------------------------------------------------------------------------
// Plays
// ---------------------------------------------------------------------------

/// Log a score and return the updated tally.
pub async fn record_score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<Tally>, ObserverError> {
    state
        .mutate(|s| s.record_score(req.team, req.points).cloned())
        .await
        .map(Json)
}

/// Undo the most recent play and return the updated tally.
pub async fn undo(State(state): State<Arc<AppState>>) -> Result<Json<Tally>, ObserverError> {
    state
        .mutate(|s| s.undo_last().cloned())
        .await
        .map(Json)
}

/// Redo the most recently undone play and return the updated tally.
pub async fn redo(State(state): State<Arc<AppState>>) -> Result<Json<Tally>, ObserverError> {
    state
        .mutate(|s| s.redo_last().cloned())
        .await
        .map(Json)
}

/// Swap players on court.
pub async fn substitute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubstitutionRequest>,
) -> Result<Json<LineupResponse>, ObserverError> {
    let lineup = state
        .mutate(|s| {
            s.substitute(&req.out, &req.incoming)
                .map(|l| l.players().to_vec())
        })
        .await?;
    Ok(Json(LineupResponse { lineup }))
}

// ---------------------------------------------------------------------------
// Quarters
// ---------------------------------------------------------------------------

/// Complete the current quarter.
pub async fn complete_quarter(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QuarterProgress>, ObserverError> {
    state
        .mutate(GameSession::complete_quarter)
        .await
        .map(Json)
}

/// Status of every quarter.
pub async fn quarters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuarterBoardEntry>>, ObserverError> {
    state.read(GameSession::quarter_board).await.map(Json)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Player totals as JSON rows.
pub async fn report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BoxScoreRow>>, ObserverError> {
    state.read(GameSession::export_report).await.map(Json)
}

/// Player totals as a CSV attachment.
pub async fn report_csv(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let rows = state.read(GameSession::export_report).await?;
    let body = render_report_csv(&rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// Applied plays in order.
pub async fn plays(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayByPlayEntry>>, ObserverError> {
    state.read(GameSession::play_by_play).await.map(Json)
}

/// Replay the play log and compare with the cached tally.
pub async fn integrity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectionResult>, ObserverError> {
    state.read(GameSession::verify).await.map(Json)
}
