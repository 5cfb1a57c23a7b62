//! Defines the application routes and wires the handlers to the state.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, get_sign_in_page, get_sign_up_page, post_sign_in, post_sign_out, post_sign_up},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        get_edit_transaction_page, get_home_page, get_new_transaction_page,
        post_delete_transaction, post_edit_transaction, post_new_transaction,
    },
};

/// Build the application router.
///
/// Everything except the sign in, sign up, and sign out routes sits behind
/// the auth middleware. Sign out must stay outside it: the middleware
/// re-extends the auth cookies on every response, which would overwrite the
/// invalidation cookies the sign out handler sets.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::NEW_TRANSACTION,
            get(get_new_transaction_page).post(post_new_transaction),
        )
        .route(
            endpoints::EDIT_TRANSACTION,
            get(get_edit_transaction_page).post(post_edit_transaction),
        )
        .route(endpoints::DELETE_TRANSACTION, post(post_delete_transaction))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let unprotected_routes = Router::new()
        .route(endpoints::SIGN_IN, get(get_sign_in_page).post(post_sign_in))
        .route(endpoints::SIGN_UP, get(get_sign_up_page).post(post_sign_up))
        .route(endpoints::SIGN_OUT, post(post_sign_out));

    Router::new()
        .merge(protected_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
