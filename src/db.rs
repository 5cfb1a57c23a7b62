//! Database initialization for the application's domain models.

use rusqlite::Connection;

use crate::{
    Error, category::create_category_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Initialize the database with the tables for the domain models.
///
/// Foreign keys are switched on for `connection` so that deleting a user
/// cascades to their transactions and deleting a category nullifies the
/// category of referencing transactions.
///
/// This function is safe to call on an already initialized database.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .map_err(Error::SqlError)?;

    create_user_table(connection).map_err(Error::SqlError)?;
    create_category_table(connection).map_err(Error::SqlError)?;
    create_transaction_table(connection).map_err(Error::SqlError)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_succeeds_on_empty_database() {
        let connection = Connection::open_in_memory().unwrap();

        assert!(initialize(&connection).is_ok());
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        assert!(initialize(&connection).is_ok());
    }

    #[test]
    fn initialize_enables_foreign_keys() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let foreign_keys: i64 = connection
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }
}
