//! The page and endpoint for editing an existing transaction.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::{
    Error,
    category::get_all_categories,
    endpoints::{self, format_endpoint},
    user::{UserId, get_user_by_id},
};

use super::{
    TransactionState,
    db::{get_transaction, update_transaction},
    domain::TransactionId,
    form::{INVALID_DATA_MESSAGE, TransactionFormData, transaction_form_page},
    service::parse_transaction_form,
};

/// Display the form for editing a transaction, prefilled with its current
/// values.
///
/// Requesting another user's transaction renders the 404 page.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let page = || -> Result<Markup, Error> {
        let fields = {
            let connection = state
                .db_connection
                .lock()
                .map_err(|_| Error::DatabaseLockError)?;

            let transaction = get_transaction(transaction_id, user_id, &connection)?;
            TransactionFormData::from(&transaction)
        };

        render_page(&state, user_id, transaction_id, &fields, None)
    };

    match page() {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Validate the submitted form and overwrite the transaction.
///
/// Editing another user's transaction renders the 404 page. Invalid input
/// redisplays the form with the submitted values and a generic error
/// message.
pub async fn post_edit_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    let result = parse_transaction_form(&form_data).and_then(|new_transaction| {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        update_transaction(transaction_id, user_id, new_transaction, &connection)
    });

    match result {
        Ok(()) => Redirect::to(endpoints::ROOT).into_response(),
        Err(error) if error.is_invalid_transaction_data() => {
            match render_page(
                &state,
                user_id,
                transaction_id,
                &form_data,
                Some(INVALID_DATA_MESSAGE),
            ) {
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
    transaction_id: TransactionId,
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
        "Edit Transaction",
        &format_endpoint(endpoints::EDIT_TRANSACTION, transaction_id),
        "Save",
        &user.username,
        fields,
        &categories,
        error_message,
    ))
}

#[cfg(test)]
mod edit_transaction_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::{
            domain::TransactionKind,
            testing::{create_test_transaction, get_authenticated_server, get_transactions},
        },
    };

    #[tokio::test]
    async fn page_is_prefilled_with_current_values() {
        let (server, state) = get_authenticated_server().await;
        let transaction = create_test_transaction(&state, "Rent", "400.00");

        let response = server
            .get(&format_endpoint(
                endpoints::EDIT_TRANSACTION,
                transaction.id,
            ))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let text = response.text();
        assert!(text.contains("Rent"));
        assert!(text.contains("400.00"));
    }

    #[tokio::test]
    async fn page_for_unknown_transaction_is_404() {
        let (server, _state) = get_authenticated_server().await;

        let response = server
            .get(&format_endpoint(endpoints::EDIT_TRANSACTION, 999))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn valid_form_updates_transaction_and_redirects_home() {
        let (server, state) = get_authenticated_server().await;
        let transaction = create_test_transaction(&state, "Rnet", "400.00");

        let response = server
            .post(&format_endpoint(
                endpoints::EDIT_TRANSACTION,
                transaction.id,
            ))
            .form(&[
                ("name", "Rent"),
                ("kind", "expense"),
                ("category_id", ""),
                ("amount", "450.00"),
                ("description", ""),
                ("date", "2024-02-01"),
            ])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            endpoints::ROOT
        );

        let transactions = get_transactions(&state);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, transaction.id);
        assert_eq!(transactions[0].name, "Rent");
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].amount.as_f64(), 450.0);
    }

    #[tokio::test]
    async fn invalid_form_redisplays_with_error_and_leaves_row_unchanged() {
        let (server, state) = get_authenticated_server().await;
        let transaction = create_test_transaction(&state, "Rent", "400.00");

        let response = server
            .post(&format_endpoint(
                endpoints::EDIT_TRANSACTION,
                transaction.id,
            ))
            .form(&[
                ("name", "Rent"),
                ("kind", "savings"),
                ("category_id", ""),
                ("amount", "450.00"),
                ("description", ""),
                ("date", "2024-02-01"),
            ])
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        response.assert_text_contains("Enter valid data.");

        let transactions = get_transactions(&state);
        assert_eq!(transactions[0].amount.as_f64(), 400.0);
    }

    #[tokio::test]
    async fn editing_unknown_transaction_is_404() {
        let (server, _state) = get_authenticated_server().await;

        let response = server
            .post(&format_endpoint(endpoints::EDIT_TRANSACTION, 999))
            .form(&[
                ("name", "Rent"),
                ("kind", "expense"),
                ("category_id", ""),
                ("amount", "450.00"),
                ("description", ""),
                ("date", "2024-02-01"),
            ])
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
