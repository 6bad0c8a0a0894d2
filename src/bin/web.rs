//! Single binary web server: the tournament engine behind a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//!
//! Authentication proper is the platform's concern; the authenticated
//! caller identity reaches this service as an `X-User-Id` header.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use matchday_web::{
    Engine, EngineError, ErrorKind, EventDirectory, EventId, Format, InMemoryDirectory, MatchId,
    TeamPoints, UserId,
};
use serde::Deserialize;

/// Engine over the in-memory directory; shared across workers.
type AppState = Data<Engine<InMemoryDirectory>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct GeneratedResponse {
    created: usize,
}

#[derive(Deserialize)]
struct CreateEventBody {
    name: String,
    format: Format,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct SettingsBody {
    points_per_win: u32,
    points_per_draw: u32,
    points_per_loss: u32,
}

#[derive(Deserialize)]
struct ResultBody {
    match_id: MatchId,
    team1_score: u32,
    team2_score: u32,
}

#[derive(Deserialize)]
struct LeaderboardRoundBody {
    round_number: u32,
    scores: Vec<TeamPoints>,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// The authenticated caller, as handed over by the auth layer in front of
/// this service. Mutating endpoints refuse to run without it.
fn actor_id(req: &HttpRequest) -> Result<UserId, HttpResponse> {
    req.headers()
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Missing or invalid X-User-Id" }))
        })
}

fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation | ErrorKind::State => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::Authorization => HttpResponse::Forbidden().json(body),
        ErrorKind::Transaction => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "matchday-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create an event owned by the caller (returns it with id).
#[post("/api/events")]
async fn api_create_event(
    state: AppState,
    req: HttpRequest,
    body: Json<CreateEventBody>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let event = state
        .directory()
        .create_event(body.name.trim(), body.format, actor);
    HttpResponse::Ok().json(event)
}

/// Get an event by id (404 if not found).
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.directory().event(path.id) {
        Some(event) => HttpResponse::Ok().json(event),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Event not found" })),
    }
}

/// Register an approved team for the event. The registration/approval
/// workflow proper lives outside the engine.
#[post("/api/events/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<EventPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    match state.directory().register_team(path.id, body.name.trim()) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

/// Upsert round-robin scoring settings (owner only).
#[put("/api/events/{id}/round-robin/settings")]
async fn api_configure_settings(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.configure_round_robin_settings(
        path.id,
        actor,
        body.points_per_win,
        body.points_per_draw,
        body.points_per_loss,
    ) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => error_response(&e),
    }
}

/// Generate the all-pairs schedule (owner only, at most once per event).
#[post("/api/events/{id}/round-robin/generate")]
async fn api_generate_schedule(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.generate_round_robin_schedule(path.id, actor) {
        Ok(created) => HttpResponse::Ok().json(GeneratedResponse { created }),
        Err(e) => error_response(&e),
    }
}

/// Record a round-robin result (owner only; draws allowed).
#[put("/api/events/{id}/round-robin/result")]
async fn api_submit_schedule_result(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.submit_round_robin_result(
        path.id,
        actor,
        body.match_id,
        body.team1_score,
        body.team2_score,
    ) {
        Ok(()) => match state.get_round_robin_schedule(path.id) {
            Ok(schedule) => HttpResponse::Ok().json(schedule),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// The schedule with team names (no auth).
#[get("/api/events/{id}/round-robin/schedule")]
async fn api_get_schedule(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_round_robin_schedule(path.id) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(&e),
    }
}

/// Standings (no auth; requires configured settings).
#[get("/api/events/{id}/round-robin/ranking")]
async fn api_get_ranking(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_round_robin_ranking(path.id) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => error_response(&e),
    }
}

/// Generate the knockout bracket (owner only, at most once per event).
#[post("/api/events/{id}/bracket/generate")]
async fn api_generate_bracket(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.generate_bracket(path.id, actor) {
        Ok(created) => HttpResponse::Ok().json(GeneratedResponse { created }),
        Err(e) => error_response(&e),
    }
}

/// Record a knockout result and advance the winner (owner only; no draws).
#[put("/api/events/{id}/bracket/result")]
async fn api_submit_bracket_result(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.submit_bracket_result(
        path.id,
        actor,
        body.match_id,
        body.team1_score,
        body.team2_score,
    ) {
        Ok(()) => match state.get_bracket(path.id) {
            Ok(bracket) => HttpResponse::Ok().json(bracket),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// The full bracket with team names (no auth).
#[get("/api/events/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_bracket(path.id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(&e),
    }
}

/// Upsert one round of leaderboard scores (owner only).
#[post("/api/events/{id}/leaderboard/rounds")]
async fn api_submit_leaderboard_round(
    state: AppState,
    req: HttpRequest,
    path: Path<EventPath>,
    body: Json<LeaderboardRoundBody>,
) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.submit_leaderboard_round(path.id, actor, body.round_number, &body.scores) {
        Ok(()) => match state.get_leaderboard_rounds(path.id) {
            Ok(rounds) => HttpResponse::Ok().json(rounds),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// Rounds grouped with per-team points (no auth).
#[get("/api/events/{id}/leaderboard/rounds")]
async fn api_get_leaderboard_rounds(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_leaderboard_rounds(path.id) {
        Ok(rounds) => HttpResponse::Ok().json(rounds),
        Err(e) => error_response(&e),
    }
}

/// Teams summed across rounds, dense-ranked (no auth).
#[get("/api/events/{id}/leaderboard/ranking")]
async fn api_get_leaderboard_ranking(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_leaderboard_ranking(path.id) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => error_response(&e),
    }
}

/// Mark the event finished (owner only, terminal).
#[post("/api/events/{id}/finish")]
async fn api_finish_event(state: AppState, req: HttpRequest, path: Path<EventPath>) -> HttpResponse {
    let actor = match actor_id(&req) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.finish_event(path.id, actor) {
        Ok(()) => match state.directory().event(path.id) {
            Some(event) => HttpResponse::Ok().json(event),
            None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Event not found" })),
        },
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Engine::new(InMemoryDirectory::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_register_team)
            .service(api_configure_settings)
            .service(api_generate_schedule)
            .service(api_submit_schedule_result)
            .service(api_get_schedule)
            .service(api_get_ranking)
            .service(api_generate_bracket)
            .service(api_submit_bracket_result)
            .service(api_get_bracket)
            .service(api_submit_leaderboard_round)
            .service(api_get_leaderboard_rounds)
            .service(api_get_leaderboard_ranking)
            .service(api_finish_event)
    })
    .bind(bind)?
    .run()
    .await
}
