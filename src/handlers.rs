use crate::aggregate::WeekSummary;
use crate::errors::{AppError, TrackerResult};
use crate::models::{ActionResponse, DayRequest, RecordRequest, UpdateRequest, WeekResponse};
use crate::state::AppState;
use crate::storage::sync;
use crate::store::{Outcome, WeeklyStore};
use crate::time::parse_clock;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::State,
    response::{Html, Redirect},
};

/// Which surface the request came from. Page requests leave their notice
/// behind for the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Api,
    Page,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.lock().await;
    let flash = tracker.flash.take();
    Html(render_index(&tracker.store, flash.as_ref()))
}

pub async fn get_week(State(state): State<AppState>) -> Json<WeekResponse> {
    let tracker = state.tracker.lock().await;
    Json(week_response(&tracker.store))
}

pub async fn update_record(
    State(state): State<AppState>,
    Json(payload): Json<UpdateRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    apply_update(&state, payload, Surface::Api).await.map(Json)
}

pub async fn add_record(
    State(state): State<AppState>,
    Json(payload): Json<DayRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    apply(&state, Surface::Api, |store| Ok(store.add_record(payload.day)))
        .await
        .map(Json)
}

pub async fn delete_record(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    apply(&state, Surface::Api, |store| store.delete_record(payload.day, payload.index))
        .await
        .map(Json)
}

pub async fn confirm_delete(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    apply(&state, Surface::Api, |store| Ok(store.confirm_delete_record()))
        .await
        .map(Json)
}

pub async fn cancel_delete(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    apply(&state, Surface::Api, |store| Ok(store.cancel_delete_record()))
        .await
        .map(Json)
}

pub async fn clear_week(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    apply(&state, Surface::Api, |store| Ok(store.clear_week()))
        .await
        .map(Json)
}

pub async fn form_update(
    State(state): State<AppState>,
    Form(payload): Form<UpdateRequest>,
) -> Result<Redirect, AppError> {
    apply_update(&state, payload, Surface::Page).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_add(
    State(state): State<AppState>,
    Form(payload): Form<DayRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, Surface::Page, |store| Ok(store.add_record(payload.day))).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Form(payload): Form<RecordRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, Surface::Page, |store| store.delete_record(payload.day, payload.index)).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_confirm_delete(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Surface::Page, |store| Ok(store.confirm_delete_record())).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_cancel_delete(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Surface::Page, |store| Ok(store.cancel_delete_record())).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_clear_week(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply(&state, Surface::Page, |store| Ok(store.clear_week())).await?;
    Ok(Redirect::to("/"))
}

async fn apply_update(
    state: &AppState,
    payload: UpdateRequest,
    surface: Surface,
) -> Result<ActionResponse, AppError> {
    let value = parse_clock(&payload.value)?;
    apply(state, surface, |store| {
        store.update(payload.day, payload.index, payload.field, value)
    })
    .await
}

/// Runs one store operation and persists its result while holding the lock,
/// so events are handled strictly one after another.
async fn apply<F>(state: &AppState, surface: Surface, op: F) -> Result<ActionResponse, AppError>
where
    F: FnOnce(&mut WeeklyStore) -> TrackerResult<Outcome>,
{
    let mut tracker = state.tracker.lock().await;
    let outcome = op(&mut tracker.store)?;

    sync(&state.storage, outcome.persist, tracker.store.state()).await?;

    if surface == Surface::Page {
        tracker.flash = outcome.notice.clone();
    }

    Ok(ActionResponse {
        notice: outcome.notice,
        week: week_response(&tracker.store),
    })
}

fn week_response(store: &WeeklyStore) -> WeekResponse {
    WeekResponse {
        summary: WeekSummary::from_state(store.state()),
        pending_deletion: store.pending(),
    }
}
