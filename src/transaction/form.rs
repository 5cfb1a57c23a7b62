//! The shared form for creating and editing a transaction.
//!
//! The form submits raw strings; validation happens in
//! [crate::transaction::service::parse_transaction_form] so that the create
//! and edit endpoints reject bad input identically.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{category::Category, html::base, navigation::nav_bar};

use super::domain::Transaction;

/// The message shown when a create/edit submission fails validation.
pub(crate) const INVALID_DATA_MESSAGE: &str = "Enter valid data.";

/// The raw data from the create/edit transaction form.
///
/// Every field is kept as the string the client submitted so the form can be
/// redisplayed with the user's input intact when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionFormData {
    /// The display name of the transaction.
    #[serde(default)]
    pub name: String,
    /// The kind of the transaction, "income" or "expense".
    #[serde(default)]
    pub kind: String,
    /// The ID of the selected category, or the empty string for no category.
    #[serde(default)]
    pub category_id: String,
    /// The amount of the transaction as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// Free-text details about the transaction.
    #[serde(default)]
    pub description: String,
    /// The date of the transaction in `YYYY-MM-DD` format.
    #[serde(default)]
    pub date: String,
}

impl From<&Transaction> for TransactionFormData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            name: transaction.name.clone(),
            kind: transaction.kind.to_string(),
            category_id: transaction
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            amount: transaction.amount.to_string(),
            description: transaction.description.clone(),
            date: transaction.date.to_string(),
        }
    }
}

/// Render the fields of the transaction form.
///
/// `fields` holds the values to prefill, either from an existing transaction
/// or from a rejected submission. `error_message`, if set, is shown above the
/// fields.
pub fn transaction_form_fields(
    fields: &TransactionFormData,
    categories: &[Category],
    error_message: Option<&str>,
) -> Markup {
    html! {
        @if let Some(message) = error_message {
            p .form-error { (message) }
        }

        div .form-field {
            label for="name" { "Name" }
            input type="text" id="name" name="name" value=(fields.name);
        }

        div .form-field {
            label for="kind" { "Kind" }
            select id="kind" name="kind" required {
                option value="income" selected[fields.kind == "income"] { "Income" }
                option value="expense" selected[fields.kind == "expense"] { "Expense" }
            }
        }

        div .form-field {
            label for="category_id" { "Category" }
            select id="category_id" name="category_id" {
                option value="" selected[fields.category_id.is_empty()] { "(none)" }
                @for category in categories {
                    option
                        value=(category.id)
                        selected[fields.category_id == category.id.to_string()]
                    {
                        (category.name)
                    }
                }
            }
        }

        div .form-field {
            label for="amount" { "Amount" }
            input type="text" id="amount" name="amount" inputmode="decimal"
                placeholder="0.00" value=(fields.amount) required;
        }

        div .form-field {
            label for="description" { "Description" }
            textarea id="description" name="description" rows="3" {
                (fields.description)
            }
        }

        div .form-field {
            label for="date" { "Date" }
            input type="date" id="date" name="date" value=(fields.date) required;
        }
    }
}

/// Render a full page wrapping the transaction form.
///
/// `action` is the URL the form posts to and `submit_label` the text on the
/// submit button.
pub fn transaction_form_page(
    title: &str,
    action: &str,
    submit_label: &str,
    username: &str,
    fields: &TransactionFormData,
    categories: &[Category],
    error_message: Option<&str>,
) -> Markup {
    base(
        title,
        &html! {
            (nav_bar(username))

            main .page {
                h1 { (title) }

                form .transaction-form method="post" action=(action) {
                    (transaction_form_fields(fields, categories, error_message))

                    button .button-primary type="submit" { (submit_label) }
                }
            }
        },
    )
}
