use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tracing::error;

use crate::{auth::sessions::Session, state::AppState};

/// The authenticated identity for this request, resolved from the session
/// cookie. Handlers that take this run no body at all for anonymous
/// requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub token: String,
}

#[derive(Debug)]
pub enum AuthRejection {
    /// Anonymous request against a protected route.
    LoginRedirect,
    /// The session store itself failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRedirect => Redirect::to("/").into_response(),
            AuthRejection::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::LoginRedirect)?;
        let token = cookies
            .get(&app.config.session.cookie_name)
            .map(|c| c.value().to_string())
            .ok_or(AuthRejection::LoginRedirect)?;

        match Session::find_user(&app.db, &token).await {
            Ok(Some(found)) => Ok(CurrentUser {
                user_id: found.user_id,
                email: found.email,
                token,
            }),
            Ok(None) => Err(AuthRejection::LoginRedirect),
            Err(e) => {
                error!(error = %e, "session lookup failed");
                Err(AuthRejection::Internal)
            }
        }
    }
}
