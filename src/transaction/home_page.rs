//! The home page: the signed-in user's transactions and account totals.

use std::collections::HashMap;

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    category::{Category, CategoryId, get_all_categories},
    endpoints::{self, format_endpoint},
    html::{base, format_currency},
    navigation::nav_bar,
    user::{UserId, get_user_by_id},
};

use super::{
    TransactionState,
    domain::{Transaction, TransactionKind},
    service::{CategoryFilter, HomeView, KindFilter, get_home_view},
};

/// The raw filter query parameters from the home page URL.
///
/// Both parameters are optional and invalid values mean no filtering, so an
/// edited URL can never break the page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// The raw `kind` filter, e.g. "income".
    pub kind: Option<String>,
    /// The raw `category` filter, a category ID or "all".
    pub category: Option<String>,
}

/// Render the home page for the signed-in user.
pub async fn get_home_page(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let kind_filter = KindFilter::parse(query.kind.as_deref());
    let category_filter = CategoryFilter::parse(query.category.as_deref());

    let page = || -> Result<Markup, Error> {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let user = get_user_by_id(user_id, &connection)?;
        let categories = get_all_categories(&connection)?;
        let view = get_home_view(user_id, kind_filter, category_filter, &connection)?;

        Ok(render_home_page(&user.username, &view, &categories))
    };

    match page() {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_response(),
    }
}

fn render_home_page(username: &str, view: &HomeView, categories: &[Category]) -> Markup {
    let category_names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_ref()))
        .collect();

    base(
        "Home",
        &html! {
            (nav_bar(username))

            main .page {
                (totals_cards(view))
                (filter_form(view, categories))
                (transaction_table(&view.transactions, &category_names))
            }
        },
    )
}

fn totals_cards(view: &HomeView) -> Markup {
    html! {
        section .totals {
            div .totals-card {
                h2 { "Income" }
                p .amount-income { (format_currency(view.totals.income)) }
            }
            div .totals-card {
                h2 { "Expenses" }
                p .amount-expense { (format_currency(view.totals.expense)) }
            }
            div .totals-card {
                h2 { "Balance" }
                p .amount-net { (format_currency(view.totals.net)) }
            }
        }
    }
}

fn filter_form(view: &HomeView, categories: &[Category]) -> Markup {
    let kind_value = view.kind_filter.as_query_value();
    let category_value = view.category_filter.as_query_value();

    html! {
        form .filter-form method="get" action=(endpoints::ROOT) {
            label for="kind" { "Kind" }
            select id="kind" name="kind" {
                option value="all" selected[kind_value == "all"] { "All" }
                option value="income" selected[kind_value == "income"] { "Income" }
                option value="expense" selected[kind_value == "expense"] { "Expense" }
            }

            label for="category" { "Category" }
            select id="category" name="category" {
                option value="all" selected[category_value == "all"] { "All" }
                @for category in categories {
                    option
                        value=(category.id)
                        selected[category_value == category.id.to_string()]
                    {
                        (category.name)
                    }
                }
            }

            button type="submit" { "Apply" }
        }
    }
}

fn transaction_table(
    transactions: &[Transaction],
    category_names: &HashMap<CategoryId, &str>,
) -> Markup {
    html! {
        @if transactions.is_empty() {
            p .empty-list { "No transactions yet." }
        } @else {
            table .transaction-table {
                thead {
                    tr {
                        th { "Date" }
                        th { "Name" }
                        th { "Category" }
                        th { "Kind" }
                        th { "Amount" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for transaction in transactions {
                        (transaction_row(transaction, category_names))
                    }
                }
            }
        }
    }
}

fn transaction_row(
    transaction: &Transaction,
    category_names: &HashMap<CategoryId, &str>,
) -> Markup {
    let category_name = transaction
        .category_id
        .and_then(|id| category_names.get(&id).copied())
        .unwrap_or("-");
    let amount_class = match transaction.kind {
        TransactionKind::Income => "amount-income",
        TransactionKind::Expense => "amount-expense",
    };

    html! {
        tr {
            td { (transaction.date) }
            td { (transaction.name) }
            td { (category_name) }
            td { (transaction.kind) }
            td .(amount_class) { (format_currency(transaction.amount.as_f64())) }
            td .actions {
                a href=(format_endpoint(endpoints::EDIT_TRANSACTION, transaction.id)) {
                    "Edit"
                }
                form method="post"
                    action=(format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id)) {
                    button .button-delete type="submit" { "Delete" }
                }
            }
        }
    }
}
