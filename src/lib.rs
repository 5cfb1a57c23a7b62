//! Moneta is a small web app for tracking personal income and expenses.
//!
//! Logged-in users record transactions ("movimientos") with a name, kind
//! (income or expense), optional category, amount, and date, and see their
//! account totals on the home page. The server renders HTML directly.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod category;
mod db;
mod endpoints;
mod html;
mod logging;
mod navigation;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;
mod user;

pub use app_state::AppState;
pub use auth::PasswordHash;
pub use category::{
    Category, CategoryId, CategoryName, create_category, delete_category, get_all_categories,
    get_category,
};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use user::{User, UserId};

use crate::{
    html::error_view,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username and password did not match a registered user.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Sign-up was attempted with a username that is already taken.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// Either the user ID or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// There was an error parsing the date in the cookie or creating the new
    /// expiry date time.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not format expiry cookie date-time string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A transaction kind that is not "income" or "expense" was submitted.
    #[error("\"{0}\" is not a valid transaction kind")]
    InvalidKind(String),

    /// A transaction amount could not be parsed, was negative, or exceeded
    /// the precision bounds (at most 10 digits, 2 of them fractional).
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A transaction date could not be parsed as a calendar date.
    #[error("\"{0}\" is not a valid calendar date")]
    InvalidDate(String),

    /// The category ID used to create or edit a transaction did not match an
    /// existing category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A category with the same name already exists.
    #[error("the category \"{0}\" already exists in the database")]
    DuplicateCategoryName(String),

    /// The requested resource was not found.
    ///
    /// This covers both rows that do not exist and rows owned by another
    /// user, so a client can never learn whether another user's transaction
    /// exists.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl Error {
    /// Whether the error came from invalid user input to a create/edit form.
    ///
    /// Handlers use this to decide between redisplaying the form with an
    /// error message and failing the request outright.
    pub fn is_invalid_transaction_data(&self) -> bool {
        matches!(
            self,
            Error::InvalidKind(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDate(_)
                | Error::InvalidCategory(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(None),
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs.",
                    ),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn sql_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn not_found_renders_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_are_invalid_transaction_data() {
        assert!(Error::InvalidKind("savings".to_owned()).is_invalid_transaction_data());
        assert!(Error::InvalidAmount("abc".to_owned()).is_invalid_transaction_data());
        assert!(Error::InvalidDate("2024-13-40".to_owned()).is_invalid_transaction_data());
        assert!(Error::InvalidCategory(None).is_invalid_transaction_data());
        assert!(!Error::NotFound.is_invalid_transaction_data());
    }
}
