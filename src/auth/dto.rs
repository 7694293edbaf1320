use serde::{Deserialize, Serialize};

use crate::notice::Notice;

/// Form body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

/// Form body for login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Form body for password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
}

/// Response returned after a successful login or registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub notices: Vec<Notice>,
}

/// Profile view of the current user.
#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: PublicUser,
}
