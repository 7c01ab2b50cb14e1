//! Single binary web server: scoreboard page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Configure with env: HOST, PORT, SPEECH_LANGUAGE,
//! VOCABULARY_CSV, INACTIVITY_HOURS (see `AppConfig`).

use actix_files::Files;
use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use scorekeeper_web::{
    apply_command, handle_transcript, toggle_server, AppConfig, Command, MatchError, MatchState,
    Side, Vocabulary,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

type MatchId = Uuid;

/// Per-match entry: score state + timestamps (for display and auto-cleanup).
struct MatchEntry {
    state: MatchState,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

/// In-memory matches by ID. The write lock serializes every score change.
type AppState = Data<RwLock<HashMap<MatchId, MatchEntry>>>;

/// Loaded once at startup; read-only afterwards.
struct Speech {
    vocabulary: Vocabulary,
    language: String,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ConfigResponse<'a> {
    language: &'a str,
    continuous: bool,
    phrases: Vec<&'a str>,
}

/// Match as returned to the client.
#[derive(Serialize)]
struct MatchView<'a> {
    id: MatchId,
    created_at: DateTime<Utc>,
    #[serde(rename = "match")]
    state: &'a MatchState,
}

#[derive(Serialize)]
struct TranscriptResponse<'a> {
    #[serde(flatten)]
    view: MatchView<'a>,
    command: Option<Command>,
    consumed: bool,
    /// Refused command (e.g. "minus" at zero); the score did not change.
    rejected: Option<String>,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    player_one: String,
    player_two: String,
}

#[derive(Deserialize)]
struct TranscriptBody {
    transcript: String,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and side (e.g. /api/matches/{id}/players/one)
#[derive(Deserialize)]
struct MatchPlayerPath {
    id: MatchId,
    side: Side,
}

fn view(id: MatchId, entry: &MatchEntry) -> MatchView<'_> {
    MatchView {
        id,
        created_at: entry.created_at,
        state: &entry.state,
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" }))
}

/// Run one score change on a match under the write lock and answer with the new state.
/// A refused change leaves the match untouched and answers 400 with the reason.
fn update_match(
    state: &AppState,
    id: MatchId,
    change: impl FnOnce(&mut MatchState) -> Result<(), MatchError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Utc::now();
    match change(&mut entry.state) {
        Ok(()) => HttpResponse::Ok().json(view(id, entry)),
        Err(e) => {
            log::debug!("Match {}: ignored change: {}", id, e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "scorekeeper-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Options for the browser's speech recognition, plus the phrases it should listen for.
#[get("/api/config")]
async fn api_config(speech: Data<Speech>) -> HttpResponse {
    HttpResponse::Ok().json(ConfigResponse {
        language: &speech.language,
        continuous: true,
        phrases: speech.vocabulary.phrases().iter().map(|p| p.text()).collect(),
    })
}

/// Create a new match at 0:0 (returns it with id; client stores id for subsequent requests).
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Json<CreateMatchBody>) -> HttpResponse {
    let match_state = match MatchState::new(body.player_one.as_str(), body.player_two.as_str()) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = Uuid::new_v4();
    let now = Utc::now();
    log::info!(
        "Match {} created: {} vs {}",
        id,
        match_state.player_one.name(),
        match_state.player_two.name()
    );
    let entry = g.entry(id).or_insert(MatchEntry {
        state: match_state,
        created_at: now,
        last_activity: now,
    });
    HttpResponse::Ok().json(view(id, entry))
}

/// Get a match by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    update_match(&state, path.id, |_| Ok(()))
}

/// Give a point to one player.
#[post("/api/matches/{id}/players/{side}/increment")]
async fn api_increment(state: AppState, path: Path<MatchPlayerPath>) -> HttpResponse {
    update_match(&state, path.id, |m| apply_command(m, Command::Increment(path.side)))
}

/// Take a point from one player (400 if already at zero).
#[post("/api/matches/{id}/players/{side}/decrement")]
async fn api_decrement(state: AppState, path: Path<MatchPlayerPath>) -> HttpResponse {
    update_match(&state, path.id, |m| apply_command(m, Command::Decrement(path.side)))
}

/// Both scores back to zero; names are kept.
#[post("/api/matches/{id}/reset")]
async fn api_reset(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    update_match(&state, path.id, |m| apply_command(m, Command::Reset))
}

/// Manually hand the serve to the other player.
#[post("/api/matches/{id}/toggle-server")]
async fn api_toggle_server(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    update_match(&state, path.id, |m| {
        toggle_server(m);
        Ok(())
    })
}

/// Latest transcript from the browser. The client clears its transcript when `consumed` is true.
#[post("/api/matches/{id}/transcript")]
async fn api_transcript(
    state: AppState,
    speech: Data<Speech>,
    path: Path<MatchPath>,
    body: Json<TranscriptBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Utc::now();
    let outcome = handle_transcript(&mut entry.state, &speech.vocabulary, &body.transcript);
    HttpResponse::Ok().json(TranscriptResponse {
        view: view(path.id, entry),
        command: outcome.command,
        consumed: outcome.consumed,
        rejected: outcome.rejected.map(|e| e.to_string()),
    })
}

fn load_vocabulary(config: &AppConfig) -> std::io::Result<Vocabulary> {
    match &config.vocabulary_csv {
        Some(path) => {
            let vocabulary = Vocabulary::from_csv_path(path)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            log::info!(
                "Loaded {} phrase(s) from {}",
                vocabulary.phrases().len(),
                path.display()
            );
            Ok(vocabulary)
        }
        None => Ok(Vocabulary::default()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let speech = Data::new(Speech {
        vocabulary: load_vocabulary(&config)?,
        language: config.speech_language.clone(),
    });
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));

    // Background task: every 30 minutes, remove matches inactive for longer than the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = chrono::Duration::from_std(config.inactivity_timeout)
        .unwrap_or_else(|_| chrono::Duration::hours(12));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let cutoff = Utc::now() - inactivity_timeout;
            let before = g.len();
            g.retain(|_, entry| entry.last_activity > cutoff);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive match(es)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(speech.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_config)
            .service(api_create_match)
            .service(api_get_match)
            .service(api_increment)
            .service(api_decrement)
            .service(api_reset)
            .service(api_toggle_server)
            .service(api_transcript)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
