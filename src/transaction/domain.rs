//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::CategoryId, user::UserId};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether a transaction brings money in or takes money out.
///
/// The direction of a transaction is carried entirely by its kind; the
/// amount is always a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl TransactionKind {
    /// The kind as the lowercase string stored in the database and used in
    /// forms and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated transaction amount.
///
/// An amount is a non-negative magnitude with at most two fractional digits
/// and at most ten digits in total. The sign of a transaction comes from its
/// [TransactionKind], not from the amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amount(f64);

impl Amount {
    /// The maximum number of digits an amount may have in total.
    const MAX_DIGITS: usize = 10;
    /// The maximum number of fractional digits an amount may have.
    const MAX_FRACTIONAL_DIGITS: usize = 2;

    /// Parse an amount from form input.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `text` is not a plain decimal
    /// number, is negative, or exceeds the precision bounds.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        let invalid = || Error::InvalidAmount(text.to_owned());

        let (integer_part, fractional_part) = match text.split_once('.') {
            Some((integer_part, fractional_part)) => (integer_part, fractional_part),
            None => (text, ""),
        };

        let all_digits = integer_part.chars().all(|c| c.is_ascii_digit())
            && fractional_part.chars().all(|c| c.is_ascii_digit());
        if !all_digits || integer_part.len() + fractional_part.len() == 0 {
            return Err(invalid());
        }

        if fractional_part.len() > Self::MAX_FRACTIONAL_DIGITS
            || integer_part.len() + fractional_part.len() > Self::MAX_DIGITS
        {
            return Err(invalid());
        }

        text.parse().map(Self).map_err(|_| invalid())
    }

    /// Create an amount from a float that is already known to be valid, e.g.
    /// one read back from the database.
    ///
    /// The caller should ensure that `value` is a non-negative magnitude
    /// within the precision bounds.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The amount as a 64 bit float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// An income or expense entry ("movimiento") owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// The display name of the transaction, e.g. "Salary".
    pub name: String,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// The amount of money earned or spent.
    pub amount: Amount,
    /// Free-text details about the transaction.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

/// The validated field set for creating or editing a transaction.
///
/// The owning user is deliberately not part of this struct: it always comes
/// from the session, never from the request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The display name of the transaction. Defaults to the empty string.
    pub name: String,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// The amount of money earned or spent.
    pub amount: Amount,
    /// Free-text details about the transaction.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}


#[cfg(test)]
mod amount_tests {
    use crate::Error;

    use super::Amount;

    #[test]
    fn parses_whole_number() {
        let amount = Amount::parse("1000").unwrap();

        assert_eq!(amount.as_f64(), 1000.0);
    }

    #[test]
    fn parses_two_decimal_places() {
        let amount = Amount::parse("400.25").unwrap();

        assert_eq!(amount.as_f64(), 400.25);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let result = Amount::parse("abc");

        assert_eq!(result, Err(Error::InvalidAmount("abc".to_owned())));
    }

    #[test]
    fn rejects_negative_amount() {
        // The sign comes from the transaction kind, so a leading minus is
        // not a digit and fails validation.
        let result = Amount::parse("-5.00");

        assert_eq!(result, Err(Error::InvalidAmount("-5.00".to_owned())));
    }

    #[test]
    fn rejects_three_decimal_places() {
        let result = Amount::parse("1.234");

        assert_eq!(result, Err(Error::InvalidAmount("1.234".to_owned())));
    }

    #[test]
    fn rejects_more_than_ten_digits() {
        let result = Amount::parse("123456789.99");

        assert_eq!(result, Err(Error::InvalidAmount("123456789.99".to_owned())));
    }

    #[test]
    fn accepts_exactly_ten_digits() {
        let amount = Amount::parse("12345678.99");

        assert!(amount.is_ok());
    }

    #[test]
    fn rejects_empty_string() {
        let result = Amount::parse("");

        assert_eq!(result, Err(Error::InvalidAmount("".to_owned())));
    }

    #[test]
    fn displays_with_two_decimal_places() {
        let amount = Amount::parse("12.5").unwrap();

        assert_eq!(amount.to_string(), "12.50");
    }
}
