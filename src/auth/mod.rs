//! User authentication: password hashing, session cookies, the auth
//! middleware, and the sign in/up/out pages.

mod cookie;
mod middleware;
mod password;
mod sign_in;
mod sign_out;
mod sign_up;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use middleware::auth_guard;
pub use password::PasswordHash;
pub use sign_in::{get_sign_in_page, post_sign_in};
pub use sign_out::post_sign_out;
pub use sign_up::{get_sign_up_page, post_sign_up};
