use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{auth::extractors::CurrentUser, state::AppState};

/// Payload for a static informational page.
#[derive(Debug, Serialize)]
pub struct InfoPage {
    pub title: &'static str,
    pub body: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/help", get(help_page))
        .route("/settings", get(settings_page))
}

#[instrument(skip_all)]
pub async fn help_page(_user: CurrentUser) -> Json<InfoPage> {
    Json(InfoPage {
        title: "Help",
        body: "Record your vitals from the dashboard and manage medicine \
               schedules under records. Deleting an entry is permanent.",
    })
}

#[instrument(skip_all)]
pub async fn settings_page(_user: CurrentUser) -> Json<InfoPage> {
    Json(InfoPage {
        title: "Settings",
        body: "Account settings are limited to changing your password from \
               the profile page.",
    })
}
