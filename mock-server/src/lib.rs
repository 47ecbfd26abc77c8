use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const CHALLENGE_FILTERS_PATH: &str = "/survival.challenge.filter.ios";
pub const DEFAULT_SIGN: &str = "a7f3d9b2c5e8g1h6i4j0k7l3m9n2o5p8q1r6s4t0u";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    pub status: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Challenge {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_url: Vec<String>,
    pub image_url_new: Vec<ImageUrl>,
    pub tab: String,
    pub level: i64,
    pub step: i64,
    pub mediatype: String,
    pub package_name: String,
    pub thump_url: Option<String>,
    pub thump_filter: Option<String>,
    pub filter_name: String,
    pub username: String,
    pub text_des: String,
    pub img_option_url: Vec<String>,
    pub img_result_url: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(rename = "totalResults", skip_serializing_if = "Option::is_none")]
    pub total_results: Option<usize>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// How the challenge endpoint answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "status", rename_all = "snake_case")]
pub enum Mode {
    /// 200 with the fixture list under `data`.
    #[default]
    Ok,
    /// 200 with `"data": null`.
    NullData,
    /// 200 with an envelope that has no `data` key.
    MissingData,
    /// The given status with an error envelope.
    Status(u16),
    /// 200 with a body that is not JSON.
    Garbage,
}

#[derive(Debug)]
pub struct MockState {
    pub sign: String,
    pub mode: Mode,
    pub challenges: Vec<Challenge>,
    pub hits: u64,
}

impl MockState {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        Self {
            sign: DEFAULT_SIGN.to_string(),
            mode: Mode::Ok,
            challenges,
            hits: 0,
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(fixtures())
    }
}

pub type Db = Arc<RwLock<MockState>>;

pub fn app() -> Router {
    app_with_state(Arc::new(RwLock::new(MockState::default())))
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route(CHALLENGE_FILTERS_PATH, get(list_challenges))
        .route("/__mock/mode", put(set_mode))
        .route("/__mock/challenges", put(set_challenges))
        .route("/__mock/hits", get(hits))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

fn error_envelope(status: StatusCode) -> Response {
    let body = Envelope::<Vec<Challenge>> {
        status: Some(status.as_u16()),
        total_results: None,
        data: None,
        message: status.canonical_reason().map(str::to_string),
    };
    (status, Json(body)).into_response()
}

async fn list_challenges(State(db): State<Db>, Query(query): Query<HashMap<String, String>>) -> Response {
    let mut state = db.write().await;
    state.hits += 1;
    info!(hits = state.hits, mode = ?state.mode, "challenge filters requested");

    if query.get("sign") != Some(&state.sign) {
        return error_envelope(StatusCode::UNAUTHORIZED);
    }

    match state.mode {
        Mode::Ok => Json(Envelope {
            status: Some(200),
            total_results: Some(state.challenges.len()),
            data: Some(state.challenges.clone()),
            message: None,
        })
        .into_response(),
        Mode::NullData => Json(Envelope::<Vec<Challenge>> {
            status: Some(200),
            total_results: None,
            data: None,
            message: None,
        })
        .into_response(),
        Mode::MissingData => Json(serde_json::json!({"status": 200, "message": "no filters"})).into_response(),
        Mode::Status(code) => error_envelope(StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)),
        Mode::Garbage => ([(header::CONTENT_TYPE, "text/html")], "<html>maintenance</html>").into_response(),
    }
}

async fn set_mode(State(db): State<Db>, Json(mode): Json<Mode>) -> StatusCode {
    db.write().await.mode = mode;
    StatusCode::NO_CONTENT
}

async fn set_challenges(State(db): State<Db>, Json(challenges): Json<Vec<Challenge>>) -> StatusCode {
    db.write().await.challenges = challenges;
    StatusCode::NO_CONTENT
}

async fn hits(State(db): State<Db>) -> Json<u64> {
    Json(db.read().await.hits)
}

fn challenge(id: i64, name: &str, category: &str) -> Challenge {
    Challenge {
        id,
        name: name.to_string(),
        category: category.to_string(),
        tab: category.to_lowercase(),
        mediatype: "image".to_string(),
        filter_name: format!("{}_{name}", category.to_lowercase()),
        thump_url: Some(format!("https://cdn.example.com/thumb/{id}.jpg")),
        thump_filter: Some(format!("https://cdn.example.com/filter/{id}.jpg")),
        image_url: vec![format!("https://cdn.example.com/img/{id}.jpg")],
        ..Challenge::default()
    }
}

/// Seed data served in `Mode::Ok` until replaced.
pub fn fixtures() -> Vec<Challenge> {
    vec![
        challenge(1, "1", "Ranking"),
        challenge(2, "2", "Ranking"),
        challenge(3, "3", "Ranking"),
        challenge(4, "Who is it", "Guess"),
        challenge(5, "1", "Coloring"),
        challenge(6, "2", "Coloring"),
        Challenge {
            thump_filter: None,
            mediatype: "audio".to_string(),
            ..challenge(7, "Beat drop", "Audio")
        },
    ]
}
