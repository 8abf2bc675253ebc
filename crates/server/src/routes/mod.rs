pub mod auth;
pub mod budget;
pub mod guests;
pub mod milestones;
pub mod notes;
pub mod payments;
pub mod planning_tasks;
pub mod vendors;

use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(guests::router())
        .merge(vendors::router())
        .merge(notes::router())
        .merge(milestones::router())
        .merge(planning_tasks::router())
        .merge(payments::router())
        .merge(budget::router())
}
