//! The endpoint that ends the current session.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::cookie::invalidate_auth_cookie, endpoints};

/// Invalidate the auth cookies and send the user back to the sign in page.
pub async fn post_sign_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::SIGN_IN)).into_response()
}

#[cfg(test)]
mod sign_out_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::Duration;

    use crate::{
        AppState,
        auth::cookie::{COOKIE_EXPIRY, COOKIE_USER_ID},
        endpoints,
    };

    use super::post_sign_out;

    #[tokio::test]
    async fn sign_out_invalidates_cookie_and_redirects() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "wow, what a secret!",
        )
        .expect("Could not create app state");
        let app = Router::new()
            .route(endpoints::SIGN_OUT, post(post_sign_out))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server.post(endpoints::SIGN_OUT).await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            endpoints::SIGN_IN
        );
        // Private cookies are encrypted on the wire, so assert on the max
        // age attribute rather than the value.
        assert_eq!(
            response.cookie(COOKIE_USER_ID).max_age(),
            Some(Duration::ZERO)
        );
        assert_eq!(
            response.cookie(COOKIE_EXPIRY).max_age(),
            Some(Duration::ZERO)
        );
    }
}
