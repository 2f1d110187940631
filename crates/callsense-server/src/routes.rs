use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use callsense_analytics::{escape_html, CallReport, ReportGenerator};
use callsense_core::error::CallError;
use callsense_core::types::{short_id, EmotionSample};
use serde::Deserialize;

const USER_COOKIE: &str = "user_id";
const HOST_COOKIE: &str = "is_host";

// ── Pages ───────────────────────────────────────────────────────────────

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/room/{room_id}", get(room))
        .route("/report/{room_id}/{user_id}", get(report))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Room view. Requires an active user cookie; initializes the (room, user)
/// sample sequence if it doesn't exist yet.
async fn room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    jar: CookieJar,
) -> Response {
    let Some(user_id) = jar.get(USER_COOKIE).map(|c| c.value().to_string()) else {
        // No session state yet: back to the landing page.
        return Redirect::to("/").into_response();
    };
    let is_host = jar
        .get(HOST_COOKIE)
        .map(|c| c.value() == "true")
        .unwrap_or(false);

    state.store.write().await.join(&room_id, &user_id);
    tracing::debug!("User {} viewing room {} (host: {})", user_id, room_id, is_host);

    let page = include_str!("../assets/room.html")
        .replace("{{room_id}}", &escape_html(&room_id))
        .replace("{{user_id}}", &escape_html(&user_id))
        .replace("{{is_host}}", if is_host { "true" } else { "false" });
    Html(page).into_response()
}

/// Post-call report for a (room, user) pair.
///
/// A pair that was never referenced is a 404; a session that exists with
/// zero samples renders the neutral default report.
async fn report(
    State(state): State<AppState>,
    Path((room_id, user_id)): Path<(String, String)>,
) -> Response {
    let store = state.store.read().await;
    let Some(session) = store.session(&room_id, &user_id) else {
        return (
            StatusCode::NOT_FOUND,
            CallError::SessionNotFound.to_string(),
        )
            .into_response();
    };

    let call_report = CallReport::from_samples(&session.samples);
    tracing::debug!(
        "Report for {}/{} from {} sample(s)",
        room_id,
        user_id,
        session.samples.len()
    );
    Html(ReportGenerator::html_report(&call_report)).into_response()
}

// ── Call flow ───────────────────────────────────────────────────────────

pub fn call_routes() -> Router<AppState> {
    Router::new()
        .route("/create_room", post(create_room))
        .route("/join_room", post(join_room))
        .route("/save_emotion", post(save_emotion))
        .route("/end_call", post(end_call))
}

/// Allocate a new room and a host user id, then redirect to the room view.
async fn create_room(jar: CookieJar) -> (CookieJar, Redirect) {
    let room_id = short_id();
    let user_id = short_id();
    tracing::info!("Created room {} (host {})", room_id, user_id);

    let jar = jar
        .add(session_cookie(USER_COOKIE, &user_id))
        .add(session_cookie(HOST_COOKIE, "true"));
    (jar, Redirect::to(&format!("/room/{}", room_id)))
}

#[derive(Debug, Deserialize)]
struct JoinRoomForm {
    room_id: String,
}

/// Join an existing room as a non-host participant.
///
/// The room id is taken as given; unknown rooms are not rejected.
async fn join_room(jar: CookieJar, Form(form): Form<JoinRoomForm>) -> (CookieJar, Redirect) {
    let user_id = short_id();
    tracing::info!("User {} joining room {}", user_id, form.room_id);

    let jar = jar
        .add(session_cookie(USER_COOKIE, &user_id))
        .add(session_cookie(HOST_COOKIE, "false"));
    (jar, Redirect::to(&format!("/room/{}", form.room_id)))
}

fn session_cookie(name: &'static str, value: &str) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

#[derive(Debug, Deserialize)]
struct SaveEmotionRequest {
    room_id: String,
    user_id: String,
    emotion: String,
    eye_contact: bool,
}

/// Append a sample with a server-generated timestamp, creating the session
/// entry if this (room, user) pair was never seen.
async fn save_emotion(
    State(state): State<AppState>,
    Json(req): Json<SaveEmotionRequest>,
) -> Json<serde_json::Value> {
    let sample = EmotionSample::new(req.emotion, req.eye_contact);
    state
        .store
        .write()
        .await
        .record_sample(&req.room_id, &req.user_id, sample);
    Json(serde_json::json!({ "status": "success" }))
}

#[derive(Debug, Deserialize)]
struct EndCallRequest {
    room_id: String,
    user_id: String,
}

async fn end_call(Json(req): Json<EndCallRequest>) -> Json<serde_json::Value> {
    tracing::info!("Call ended in room {} by {}", req.room_id, req.user_id);
    Json(serde_json::json!({
        "status": "success",
        "report_url": format!("/report/{}/{}", req.room_id, req.user_id),
    }))
}
