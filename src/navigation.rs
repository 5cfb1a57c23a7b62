//! The navigation bar shown on pages behind the auth wall.

use maud::{Markup, html};

use crate::endpoints;

/// Render the top navigation bar.
///
/// `username` is the name of the signed-in user, shown next to the sign out
/// link.
pub fn nav_bar(username: &str) -> Markup {
    html! {
        nav .nav-bar {
            a .nav-brand href=(endpoints::ROOT) { "Moneta" }

            div .nav-links {
                a href=(endpoints::ROOT) { "Home" }
                a href=(endpoints::NEW_TRANSACTION) { "New transaction" }
            }

            div .nav-session {
                span .nav-username { (username) }
                form method="post" action=(endpoints::SIGN_OUT) {
                    button .nav-sign-out type="submit" { "Sign out" }
                }
            }
        }
    }
}
