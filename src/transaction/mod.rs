//! Recording and reviewing income and expense transactions.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod form;
mod home_page;
mod service;
#[cfg(test)]
pub(crate) mod testing;

pub use create_endpoint::{get_new_transaction_page, post_new_transaction};
pub(crate) use db::create_transaction_table;
pub use delete_endpoint::post_delete_transaction;
pub use edit_endpoint::{get_edit_transaction_page, post_edit_transaction};
pub use home_page::get_home_page;

/// The state needed for the transaction pages and endpoints.
#[derive(Clone)]
pub struct TransactionState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
