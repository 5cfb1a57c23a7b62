//! The sign in page and endpoint.

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
    auth::cookie::set_auth_cookie,
    html::{base, link},
    user::{UserId, get_user_by_username},
};

/// The error message shown when the username or password is wrong.
///
/// The same message covers unknown usernames so the form does not reveal
/// which usernames exist.
const INCORRECT_CREDENTIALS_MESSAGE: &str = "Incorrect username or password.";

/// The state needed for the sign in endpoint.
#[derive(Clone)]
pub struct SignInState {
    /// The key for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which auth cookies are valid.
    pub cookie_duration: Duration,
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SignInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<SignInState> for Key {
    fn from_ref(state: &SignInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data from the sign in form.
#[derive(Debug, Deserialize)]
pub struct SignInFormData {
    /// The name the user signs in with.
    #[serde(default)]
    pub username: String,
    /// The user's password in plain text.
    #[serde(default)]
    pub password: String,
}

/// Display the sign in page.
pub async fn get_sign_in_page() -> Markup {
    render_sign_in_page(None, "")
}

/// Check the submitted credentials and start a session.
///
/// On success the client is redirected to the home page with the auth
/// cookies set. On bad credentials the form is redisplayed with a generic
/// error message.
pub async fn post_sign_in(
    State(state): State<SignInState>,
    jar: PrivateCookieJar,
    Form(form_data): Form<SignInFormData>,
) -> Response {
    match verify_credentials(&form_data, &state) {
        Ok(user_id) => match set_auth_cookie(jar, user_id, state.cookie_duration) {
            Ok(jar) => (jar, Redirect::to(endpoints::ROOT)).into_response(),
            Err(error) => error.into_response(),
        },
        Err(Error::InvalidCredentials) | Err(Error::NotFound) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            render_sign_in_page(Some(INCORRECT_CREDENTIALS_MESSAGE), &form_data.username),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

fn verify_credentials(form_data: &SignInFormData, state: &SignInState) -> Result<UserId, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_username(&form_data.username, &connection)?;

    if user.password_hash.verify(&form_data.password)? {
        Ok(user.id)
    } else {
        Err(Error::InvalidCredentials)
    }
}

fn render_sign_in_page(error_message: Option<&str>, username: &str) -> Markup {
    base(
        "Sign In",
        &html! {
            main .auth-page {
                h1 { "Sign in" }

                @if let Some(message) = error_message {
                    p .form-error { (message) }
                }

                form method="post" action=(endpoints::SIGN_IN) {
                    div .form-field {
                        label for="username" { "Username" }
                        input type="text" id="username" name="username"
                            value=(username) required autofocus;
                    }

                    div .form-field {
                        label for="password" { "Password" }
                        input type="password" id="password" name="password" required;
                    }

                    button .button-primary type="submit" { "Sign in" }
                }

                p {
                    "Don't have an account? "
                    (link(endpoints::SIGN_UP, "Sign up"))
                }
            }
        },
    )
}
