use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tower_cookies::{Cookie, Cookies};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, ChangePasswordForm, LoginForm, ProfilePage, PublicUser, RegisterForm,
        },
        extractors::CurrentUser,
        password::{hash_password, verify_password},
        repo::User,
        sessions::Session,
    },
    error::AppError,
    notice::{Notice, NoticeResponse},
    pages::InfoPage,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .route(
            "/change_password",
            get(change_password_page).post(change_password),
        )
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// One failure path for both unknown email and wrong password.
fn check_credentials(user: Option<User>, password: &str) -> Result<User, AppError> {
    let Some(user) = user else {
        warn!("login with unknown email");
        return Err(AppError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}

fn session_cookie(name: String, token: String) -> Cookie<'static> {
    Cookie::build((name, token)).path("/").http_only(true).build()
}

#[instrument(skip_all)]
pub async fn login_page(user: Option<CurrentUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Json(InfoPage {
        title: "Sign in",
        body: "Log in with your email and password.",
    })
    .into_response()
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(mut form): Form<LoginForm>,
) -> Result<Json<AuthResponse>, AppError> {
    form.email = form.email.trim().to_lowercase();

    let found = User::find_by_email(&state.db, &form.email).await?;
    let user = check_credentials(found, &form.password)?;

    let session = Session::create(&state.db, user.id, state.config.session.ttl_minutes).await?;
    cookies.add(session_cookie(
        state.config.session.cookie_name.clone(),
        session.token,
    ));

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
        notices: vec![Notice::success("Login successful")],
    }))
}

#[instrument(skip_all)]
pub async fn register_page(user: Option<CurrentUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Json(InfoPage {
        title: "Register",
        body: "Create an account with your email and a password of at least 8 characters.",
    })
    .into_response()
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    form.email = form.email.trim().to_lowercase();

    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "invalid email");
        return Err(AppError::Validation("Invalid email"));
    }
    if form.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("Password too short"));
    }

    // Pre-check for a friendly conflict; the unique constraint on
    // users.email is the transactional backstop.
    if User::find_by_email(&state.db, &form.email).await?.is_some() {
        warn!(email = %form.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(&form.password)?;
    let user = User::create(&state.db, &form.email, &hash).await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: PublicUser {
                id: user.id,
                email: user.email,
            },
            notices: vec![Notice::success("Account created. Please log in.")],
        }),
    ))
}

#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    user: CurrentUser,
) -> Result<Redirect, AppError> {
    Session::delete(&state.db, &user.token).await?;
    cookies.remove(session_cookie(
        state.config.session.cookie_name.clone(),
        String::new(),
    ));

    info!(user_id = user.user_id, "user logged out");
    Ok(Redirect::to("/"))
}

#[instrument(skip_all)]
pub async fn profile(user: CurrentUser) -> Json<ProfilePage> {
    Json(ProfilePage {
        user: PublicUser {
            id: user.user_id,
            email: user.email,
        },
    })
}

#[instrument(skip_all)]
pub async fn change_password_page(_user: CurrentUser) -> Json<InfoPage> {
    Json(InfoPage {
        title: "Change password",
        body: "Enter your old password and a new password of at least 8 characters.",
    })
}

#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Json<NoticeResponse>, AppError> {
    let account = User::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&form.old_password, &account.password_hash)? {
        warn!(user_id = account.id, "password change with wrong old password");
        return Err(AppError::WrongOldPassword);
    }
    if form.new_password.len() < 8 {
        warn!(user_id = account.id, "new password too short");
        return Err(AppError::Validation("Password too short"));
    }

    let hash = hash_password(&form.new_password)?;
    User::update_password(&state.db, account.id, &hash).await?;

    info!(user_id = account.id, "password updated");
    Ok(Json(NoticeResponse {
        notices: vec![Notice::success("Password updated successfully")],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn stored_user(password: &str) -> User {
        User {
            id: 7,
            email: "user@example.com".into(),
            password_hash: hash_password(password).expect("hash"),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn valid_emails_accepted() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn invalid_emails_rejected() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn correct_password_authenticates() {
        let user = stored_user("right-password");
        let out = check_credentials(Some(user), "right-password").expect("should authenticate");
        assert_eq!(out.email, "user@example.com");
    }

    #[test]
    fn wrong_password_and_unknown_email_are_indistinguishable() {
        let user = stored_user("right-password");
        let wrong = check_credentials(Some(user), "wrong-password").unwrap_err();
        let missing = check_credentials(None, "right-password").unwrap_err();
        assert_eq!(wrong.to_string(), missing.to_string());
    }

    #[test]
    fn rehash_invalidates_the_old_password() {
        let mut user = stored_user("old-password");
        user.password_hash = hash_password("new-password").expect("rehash");
        assert!(check_credentials(Some(user.clone()), "old-password").is_err());
        assert!(check_credentials(Some(user), "new-password").is_ok());
    }
}
