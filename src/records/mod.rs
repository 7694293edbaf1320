use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod recommend;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::record_routes()
}
