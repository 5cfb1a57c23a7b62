//! The endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{Error, endpoints, user::UserId};

use super::{TransactionState, db::delete_transaction, domain::TransactionId};

/// Delete the transaction and send the user back to the home page.
///
/// Deleting a transaction that does not exist, including one owned by
/// another user, renders the 404 page.
pub async fn post_delete_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| delete_transaction(transaction_id, user_id, &connection));

    match result {
        Ok(()) => Redirect::to(endpoints::ROOT).into_response(),
        Err(error) => error.into_response(),
    }
}
