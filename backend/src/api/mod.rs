pub mod health;
pub mod schools;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(health::healthcheck))
        .route(
            "/v1/schools",
            get(schools::list_schools).post(schools::create_school),
        )
        .route(
            "/v1/schools/:id",
            get(schools::show_school)
                .patch(schools::update_school)
                .delete(schools::delete_school),
        )
        .with_state(state)
}
