//! The page and endpoint for creating a new transaction.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use time::OffsetDateTime;

use crate::{
    Error,
    category::get_all_categories,
    endpoints,
    user::{UserId, get_user_by_id},
};

use super::{
    TransactionState,
    db::create_transaction,
    form::{INVALID_DATA_MESSAGE, TransactionFormData, transaction_form_page},
    service::parse_transaction_form,
};

/// Display the form for recording a new transaction.
///
/// The date field defaults to today.
pub async fn get_new_transaction_page(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
) -> Response {
    let fields = TransactionFormData {
        kind: "expense".to_owned(),
        date: OffsetDateTime::now_utc().date().to_string(),
        ..TransactionFormData::default()
    };

    match render_page(&state, user_id, &fields, None) {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Validate the submitted form and create the transaction.
///
/// The new transaction is always owned by the signed-in user. Invalid input
/// redisplays the form with the submitted values and a generic error
/// message.
pub async fn post_new_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    let result = parse_transaction_form(&form_data).and_then(|new_transaction| {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        create_transaction(new_transaction, user_id, &connection)
    });

    match result {
        Ok(_) => Redirect::to(endpoints::ROOT).into_response(),
        Err(error) if error.is_invalid_transaction_data() => {
            match render_page(&state, user_id, &form_data, Some(INVALID_DATA_MESSAGE)) {
                Ok(markup) => (StatusCode::UNPROCESSABLE_ENTITY, markup).into_response(),
                Err(error) => error.into_response(),
            }
        }
        Err(error) => error.into_response(),
    }
}

fn render_page(
    state: &TransactionState,
    user_id: UserId,
    fields: &TransactionFormData,
    error_message: Option<&str>,
) -> Result<Markup, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(user_id, &connection)?;
    let categories = get_all_categories(&connection)?;

    Ok(transaction_form_page(
        "New Transaction",
        endpoints::NEW_TRANSACTION,
        "Create",
        &user.username,
        fields,
        &categories,
        error_message,
    ))
}
