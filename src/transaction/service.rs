//! Assembles the data for the home page and validates transaction form
//! submissions.
//!
//! The home page shows a filtered list of transactions next to the account
//! totals. The totals are always computed over the user's full transaction
//! set, so filtering changes what is listed but never the balance shown.

use rusqlite::Connection;
use time::{Date, macros::format_description};

use crate::{
    Error,
    category::CategoryId,
    user::UserId,
};

use super::{
    db::get_transactions_for_user,
    domain::{Amount, NewTransaction, Transaction, TransactionKind},
    form::TransactionFormData,
};

/// The format dates take in form fields and query strings, e.g. "2024-01-05".
const DATE_INPUT_FORMAT: &[time::format_description::BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

/// A filter on transaction kind for the home page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Show transactions of every kind.
    #[default]
    All,
    /// Show only transactions of the given kind.
    Only(TransactionKind),
}

impl KindFilter {
    /// Parse a filter from the `kind` query parameter.
    ///
    /// Anything that is not a valid transaction kind, including a missing
    /// parameter, means no filtering.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(text) => text
                .parse::<TransactionKind>()
                .map(KindFilter::Only)
                .unwrap_or_default(),
            None => KindFilter::All,
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => transaction.kind == *kind,
        }
    }

    /// The value to put back into the `kind` query parameter and filter form.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Only(kind) => kind.as_str(),
        }
    }
}

/// A filter on category for the home page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show transactions of every category, including uncategorized ones.
    #[default]
    All,
    /// Show only transactions in the given category.
    Only(CategoryId),
}

impl CategoryFilter {
    /// Parse a filter from the `category` query parameter.
    ///
    /// Anything that does not parse as a category ID, including a missing
    /// parameter, means no filtering. The ID is not checked against the
    /// category table; an unknown ID simply matches nothing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(text) => text
                .parse::<CategoryId>()
                .map(CategoryFilter::Only)
                .unwrap_or_default(),
            None => CategoryFilter::All,
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category_id) => transaction.category_id == Some(*category_id),
        }
    }

    /// The value to put back into the `category` query parameter and filter
    /// form.
    pub fn as_query_value(&self) -> String {
        match self {
            CategoryFilter::All => "all".to_owned(),
            CategoryFilter::Only(category_id) => category_id.to_string(),
        }
    }
}

/// The account totals shown on the home page.
///
/// Totals always cover the user's full transaction set, regardless of the
/// active filters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransactionTotals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// Income minus expenses. May be negative.
    pub net: f64,
}

/// Everything the home page needs to render for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    /// The user's transactions with the filters applied, most recent first.
    pub transactions: Vec<Transaction>,
    /// The account totals over the full, unfiltered transaction set.
    pub totals: TransactionTotals,
    /// The kind filter that produced `transactions`.
    pub kind_filter: KindFilter,
    /// The category filter that produced `transactions`.
    pub category_filter: CategoryFilter,
}

/// Build the home page data for `user_id`.
///
/// The totals are computed before the filters are applied, so they describe
/// the whole account rather than the visible subset.
pub fn get_home_view(
    user_id: UserId,
    kind_filter: KindFilter,
    category_filter: CategoryFilter,
    connection: &Connection,
) -> Result<HomeView, Error> {
    let all_transactions = get_transactions_for_user(user_id, connection)?;
    let totals = compute_totals(&all_transactions);

    let transactions = all_transactions
        .into_iter()
        .filter(|transaction| {
            kind_filter.matches(transaction) && category_filter.matches(transaction)
        })
        .collect();

    Ok(HomeView {
        transactions,
        totals,
        kind_filter,
        category_filter,
    })
}

/// Sum up income, expenses, and the net balance of `transactions`.
pub fn compute_totals(transactions: &[Transaction]) -> TransactionTotals {
    let mut totals = TransactionTotals::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => totals.income += transaction.amount.as_f64(),
            TransactionKind::Expense => totals.expense += transaction.amount.as_f64(),
        }
    }

    totals.net = totals.income - totals.expense;

    totals
}

/// Validate a transaction form submission.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidKind] if the kind is not "income" or "expense",
/// - [Error::InvalidCategory] if the category is set but not a number,
/// - [Error::InvalidAmount] if the amount is not a valid monetary amount,
/// - or [Error::InvalidDate] if the date is not a valid `YYYY-MM-DD` date.
///
/// All of these satisfy [Error::is_invalid_transaction_data], so handlers
/// can redisplay the form with the submitted values.
pub fn parse_transaction_form(form_data: &TransactionFormData) -> Result<NewTransaction, Error> {
    let kind = form_data.kind.parse::<TransactionKind>()?;

    let category_id = match form_data.category_id.trim() {
        "" => None,
        text => Some(
            text.parse::<CategoryId>()
                .map_err(|_| Error::InvalidCategory(None))?,
        ),
    };

    let amount = Amount::parse(&form_data.amount)?;

    let date = Date::parse(form_data.date.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| Error::InvalidDate(form_data.date.clone()))?;

    Ok(NewTransaction {
        name: form_data.name.trim().to_owned(),
        kind,
        category_id,
        amount,
        description: form_data.description.trim().to_owned(),
        date,
    })
}


#[cfg(test)]
mod filter_parse_tests {
    use crate::transaction::domain::TransactionKind;

    use super::{CategoryFilter, KindFilter};

    #[test]
    fn kind_filter_parses_valid_kinds() {
        assert_eq!(
            KindFilter::parse(Some("income")),
            KindFilter::Only(TransactionKind::Income)
        );
        assert_eq!(
            KindFilter::parse(Some("expense")),
            KindFilter::Only(TransactionKind::Expense)
        );
    }

    #[test]
    fn kind_filter_treats_invalid_values_as_all() {
        assert_eq!(KindFilter::parse(None), KindFilter::All);
        assert_eq!(KindFilter::parse(Some("all")), KindFilter::All);
        assert_eq!(KindFilter::parse(Some("savings")), KindFilter::All);
        assert_eq!(KindFilter::parse(Some("")), KindFilter::All);
    }

    #[test]
    fn category_filter_parses_numeric_id() {
        assert_eq!(CategoryFilter::parse(Some("42")), CategoryFilter::Only(42));
    }

    #[test]
    fn category_filter_treats_invalid_values_as_all() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("abc")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("")), CategoryFilter::All);
    }
}

#[cfg(test)]
mod parse_transaction_form_tests {
    use time::macros::date;

    use crate::{Error, transaction::form::TransactionFormData};

    use super::parse_transaction_form;

    fn valid_form_data() -> TransactionFormData {
        TransactionFormData {
            name: "Salary".to_owned(),
            kind: "income".to_owned(),
            category_id: String::new(),
            amount: "1000.00".to_owned(),
            description: "January pay".to_owned(),
            date: "2024-01-31".to_owned(),
        }
    }

    #[test]
    fn accepts_valid_data() {
        let new_transaction =
            parse_transaction_form(&valid_form_data()).expect("Valid form data was rejected");

        assert_eq!(new_transaction.name, "Salary");
        assert_eq!(new_transaction.category_id, None);
        assert_eq!(new_transaction.amount.as_f64(), 1000.0);
        assert_eq!(new_transaction.date, date!(2024 - 01 - 31));
    }

    #[test]
    fn accepts_empty_name_and_description() {
        let mut form_data = valid_form_data();
        form_data.name = String::new();
        form_data.description = String::new();

        let new_transaction = parse_transaction_form(&form_data).unwrap();

        assert_eq!(new_transaction.name, "");
        assert_eq!(new_transaction.description, "");
    }

    #[test]
    fn rejects_unknown_kind() {
        let mut form_data = valid_form_data();
        form_data.kind = "savings".to_owned();

        let result = parse_transaction_form(&form_data);

        assert_eq!(result, Err(Error::InvalidKind("savings".to_owned())));
        assert!(result.unwrap_err().is_invalid_transaction_data());
    }

    #[test]
    fn rejects_non_numeric_category() {
        let mut form_data = valid_form_data();
        form_data.category_id = "housing".to_owned();

        let result = parse_transaction_form(&form_data);

        assert_eq!(result, Err(Error::InvalidCategory(None)));
    }

    #[test]
    fn rejects_invalid_amount() {
        let mut form_data = valid_form_data();
        form_data.amount = "-5.00".to_owned();

        let result = parse_transaction_form(&form_data);

        assert_eq!(result, Err(Error::InvalidAmount("-5.00".to_owned())));
    }

    #[test]
    fn rejects_impossible_date() {
        let mut form_data = valid_form_data();
        form_data.date = "2024-02-30".to_owned();

        let result = parse_transaction_form(&form_data);

        assert_eq!(result, Err(Error::InvalidDate("2024-02-30".to_owned())));
    }

    #[test]
    fn rejects_non_iso_date() {
        let mut form_data = valid_form_data();
        form_data.date = "31/01/2024".to_owned();

        let result = parse_transaction_form(&form_data);

        assert_eq!(result, Err(Error::InvalidDate("31/01/2024".to_owned())));
    }
}
