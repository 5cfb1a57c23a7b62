//! The sign up page and endpoint for creating a new account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, endpoints,
    auth::{
        cookie::set_auth_cookie,
        password::{DEFAULT_COST, PasswordHash},
    },
    html::{base, link},
    user::{UserId, create_user},
};

/// The minimum number of characters for a new password.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The state needed for the sign up endpoint.
#[derive(Clone)]
pub struct SignUpState {
    /// The key for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which auth cookies are valid.
    pub cookie_duration: Duration,
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SignUpState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<SignUpState> for Key {
    fn from_ref(state: &SignUpState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data from the sign up form.
#[derive(Debug, Deserialize)]
pub struct SignUpFormData {
    /// The name the user will sign in with.
    #[serde(default)]
    pub username: String,
    /// The user's new password in plain text.
    #[serde(default)]
    pub password: String,
    /// The password typed a second time, to catch typos.
    #[serde(default)]
    pub confirm_password: String,
}

/// Display the sign up page.
pub async fn get_sign_up_page() -> Markup {
    render_sign_up_page(None, "")
}

/// Create a new account and sign the user in.
///
/// On success the client is redirected to the home page with the auth
/// cookies set. On invalid input the form is redisplayed with an error
/// message and the username preserved.
pub async fn post_sign_up(
    State(state): State<SignUpState>,
    jar: PrivateCookieJar,
    Form(form_data): Form<SignUpFormData>,
) -> Response {
    let username = form_data.username.trim();

    if let Err(message) = validate_sign_up_form(username, &form_data) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            render_sign_up_page(Some(message), username),
        )
            .into_response();
    }

    match register_user(username, &form_data.password, &state) {
        Ok(user_id) => match set_auth_cookie(jar, user_id, state.cookie_duration) {
            Ok(jar) => (jar, Redirect::to(endpoints::ROOT)).into_response(),
            Err(error) => error.into_response(),
        },
        Err(Error::DuplicateUsername(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            render_sign_up_page(Some("That username is already taken."), username),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

fn validate_sign_up_form(
    username: &str,
    form_data: &SignUpFormData,
) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Enter a username.");
    }

    if form_data.password.len() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters long.");
    }

    if form_data.password != form_data.confirm_password {
        return Err("Passwords do not match.");
    }

    Ok(())
}

fn register_user(username: &str, password: &str, state: &SignUpState) -> Result<UserId, Error> {
    let password_hash = PasswordHash::new(password, DEFAULT_COST)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = create_user(username, password_hash, &connection)?;

    Ok(user.id)
}

fn render_sign_up_page(error_message: Option<&str>, username: &str) -> Markup {
    base(
        "Sign Up",
        &html! {
            main .auth-page {
                h1 { "Create an account" }

                @if let Some(message) = error_message {
                    p .form-error { (message) }
                }

                form method="post" action=(endpoints::SIGN_UP) {
                    div .form-field {
                        label for="username" { "Username" }
                        input type="text" id="username" name="username"
                            value=(username) required autofocus;
                    }

                    div .form-field {
                        label for="password" { "Password" }
                        input type="password" id="password" name="password"
                            minlength=(MIN_PASSWORD_LENGTH) required;
                    }

                    div .form-field {
                        label for="confirm_password" { "Confirm password" }
                        input type="password" id="confirm_password" name="confirm_password"
                            minlength=(MIN_PASSWORD_LENGTH) required;
                    }

                    button .button-primary type="submit" { "Sign up" }
                }

                p {
                    "Already have an account? "
                    (link(endpoints::SIGN_IN, "Sign in"))
                }
            }
        },
    )
}
