//! Database operations for transactions.
//!
//! Every query that targets a single transaction is scoped to the owning
//! user: a row that exists but belongs to another user is indistinguishable
//! from a row that does not exist.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    user::UserId,
};

use super::domain::{Amount, NewTransaction, Transaction, TransactionId};

/// Create a new transaction owned by `user_id` and return it with its
/// generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real
///   category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .execute(
            "INSERT INTO movimiento (user_id, name, kind, category_id, amount, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                user_id.as_i64(),
                &new_transaction.name,
                new_transaction.kind.as_str(),
                new_transaction.category_id,
                new_transaction.amount.as_f64(),
                &new_transaction.description,
                new_transaction.date,
            ),
        )
        .map_err(|error| map_foreign_key_error(error, &new_transaction))?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        user_id,
        name: new_transaction.name,
        kind: new_transaction.kind,
        category_id: new_transaction.category_id,
        amount: new_transaction.amount,
        description: new_transaction.description,
        date: new_transaction.date,
    })
}

/// Retrieve the transaction with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by
///   `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, kind, category_id, amount, description, date
             FROM movimiento WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all of a user's transactions, most recent date first.
///
/// Transactions on the same date keep their insertion order.
pub fn get_transactions_for_user(
    user_id: UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, kind, category_id, amount, description, date
             FROM movimiento WHERE user_id = :user_id
             ORDER BY date DESC, id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the fields of the transaction with `id` owned by `user_id`.
///
/// The identifier and owner are immutable; only the user-editable fields are
/// written.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by
///   `user_id`,
/// - [Error::InvalidCategory] if the category ID does not refer to a real
///   category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    user_id: UserId,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE movimiento
             SET name = ?1, kind = ?2, category_id = ?3, amount = ?4, description = ?5, date = ?6
             WHERE id = ?7 AND user_id = ?8",
            (
                &new_transaction.name,
                new_transaction.kind.as_str(),
                new_transaction.category_id,
                new_transaction.amount.as_f64(),
                &new_transaction.description,
                new_transaction.date,
                id,
                user_id.as_i64(),
            ),
        )
        .map_err(|error| map_foreign_key_error(error, &new_transaction))?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Permanently remove the transaction with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a transaction owned
/// by `user_id`, including when it was already deleted.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM movimiento WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// Deleting a user cascades to their transactions; deleting a category
/// clears the category of referencing transactions.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS movimiento (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            kind TEXT NOT NULL,
            category_id INTEGER,
            amount REAL NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_movimiento_user_date ON movimiento(user_id, date);",
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let name = row.get(2)?;
    let raw_kind: String = row.get(3)?;
    let category_id = row.get(4)?;
    let raw_amount: f64 = row.get(5)?;
    let description = row.get(6)?;
    let date = row.get(7)?;

    let kind = raw_kind.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("invalid transaction kind \"{raw_kind}\"").into(),
        )
    })?;

    Ok(Transaction {
        id,
        user_id: UserId::new(user_id),
        name,
        kind,
        category_id,
        amount: Amount::new_unchecked(raw_amount),
        description,
        date,
    })
}

fn map_foreign_key_error(error: rusqlite::Error, new_transaction: &NewTransaction) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::InvalidCategory(new_transaction.category_id),
        error => error.into(),
    }
}
