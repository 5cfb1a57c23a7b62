//! Helpers shared by the transaction endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;
use time::macros::date;

use crate::{
    AppState,
    auth::PasswordHash,
    endpoints,
    routing::build_router,
    user::{UserId, create_user, get_user_by_username},
};

use super::{
    db::{create_transaction, get_transactions_for_user},
    domain::{Amount, NewTransaction, Transaction, TransactionKind},
};

const TEST_USERNAME: &str = "alice";
const TEST_PASSWORD: &str = "averystrongpassword";
const TEST_COST: u32 = 4;

/// Build the full application router with a fresh in-memory database, a
/// registered test user, and a signed-in test server.
pub(crate) async fn get_authenticated_server() -> (TestServer, AppState) {
    let state = AppState::new(
        Connection::open_in_memory().unwrap(),
        "wow, what a secret!",
    )
    .expect("Could not create app state");

    {
        let connection = state.db_connection.lock().unwrap();
        let password_hash =
            PasswordHash::new(TEST_PASSWORD, TEST_COST).expect("Could not hash password");
        create_user(TEST_USERNAME, password_hash, &connection)
            .expect("Could not create test user");
    }

    let mut server = TestServer::new(build_router(state.clone()));
    server.save_cookies();
    server
        .post(endpoints::SIGN_IN)
        .form(&[("username", TEST_USERNAME), ("password", TEST_PASSWORD)])
        .await;

    (server, state)
}

/// The ID of the signed-in test user.
pub(crate) fn test_user_id(state: &AppState) -> UserId {
    let connection = state.db_connection.lock().unwrap();

    get_user_by_username(TEST_USERNAME, &connection)
        .expect("Could not find test user")
        .id
}

/// All of the test user's transactions, most recent date first.
pub(crate) fn get_transactions(state: &AppState) -> Vec<Transaction> {
    let user_id = test_user_id(state);
    let connection = state.db_connection.lock().unwrap();

    get_transactions_for_user(user_id, &connection).expect("Could not get transactions")
}

/// Insert an expense for the test user directly into the database.
pub(crate) fn create_test_transaction(state: &AppState, name: &str, amount: &str) -> Transaction {
    let user_id = test_user_id(state);
    let connection = state.db_connection.lock().unwrap();

    create_transaction(
        NewTransaction {
            name: name.to_owned(),
            kind: TransactionKind::Expense,
            category_id: None,
            amount: Amount::parse(amount).expect("Could not parse test amount"),
            description: String::new(),
            date: date!(2024 - 01 - 05),
        },
        user_id,
        &connection,
    )
    .expect("Could not create test transaction")
}
