use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/records/update", post(handlers::form_update))
        .route("/records/add", post(handlers::form_add))
        .route("/records/delete", post(handlers::form_delete))
        .route("/records/delete/confirm", post(handlers::form_confirm_delete))
        .route("/records/delete/cancel", post(handlers::form_cancel_delete))
        .route("/week/clear", post(handlers::form_clear_week))
        .route("/api/week", get(handlers::get_week))
        .route("/api/records/update", post(handlers::update_record))
        .route("/api/records/add", post(handlers::add_record))
        .route("/api/records/delete", post(handlers::delete_record))
        .route("/api/records/delete/confirm", post(handlers::confirm_delete))
        .route("/api/records/delete/cancel", post(handlers::cancel_delete))
        .route("/api/week/clear", post(handlers::clear_week))
        .with_state(state)
}
