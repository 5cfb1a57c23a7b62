//! The application route URIs.
//!
//! For routes that take a parameter, e.g. '/transactions/{transaction_id}/edit',
//! use [format_endpoint].

/// The home page: the logged-in user's transactions and account totals.
pub const ROOT: &str = "/";
/// The page for signing in to an existing account.
pub const SIGN_IN: &str = "/sign_in";
/// The page for creating a new account.
pub const SIGN_UP: &str = "/sign_up";
/// The route that ends the current session.
pub const SIGN_OUT: &str = "/sign_out";
/// The page (GET) and endpoint (POST) for creating a new transaction.
pub const NEW_TRANSACTION: &str = "/transactions/new";
/// The page (GET) and endpoint (POST) for editing an existing transaction.
pub const EDIT_TRANSACTION: &str = "/transactions/{transaction_id}/edit";
/// The endpoint for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}/delete";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the route parameter in `endpoint_path` with `id`.
///
/// A parameter is a string wrapped in braces, e.g. '{transaction_id}' in
/// '/transactions/{transaction_id}/edit'. This function assumes the path
/// contains at most one parameter. If no parameter is found, the original
/// `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };
    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::SIGN_IN);
        assert_endpoint_is_valid_uri(endpoints::SIGN_UP);
        assert_endpoint_is_valid_uri(endpoints::SIGN_OUT);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/transactions/{transaction_id}/edit", 42);

        assert_eq!(formatted_path, "/transactions/42/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
