use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/slots",
            get(handlers::slots::get_week).post(handlers::slots::create_slot),
        )
        .route(
            "/slots/:id/exception",
            put(handlers::slots::upsert_exception).delete(handlers::slots::delete_exception),
        )
}
