//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// The form fields whose values must never appear in the logs.
const SENSITIVE_FIELDS: [&str; 2] = ["password", "confirm_password"];

const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log each request and its response at the `info` level.
///
/// Password fields in form submissions are redacted before logging. Bodies
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes are truncated, with the full
/// body logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body for logging: {error}");
            return next.run(Request::from_parts(parts, axum::body::Body::empty())).await;
        }
    };
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    let is_form_post = parts.method == Method::POST
        && parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    let display_text = if is_form_post {
        SENSITIVE_FIELDS
            .iter()
            .fold(body_text.clone(), |text, field| redact_form_field(&text, field))
    } else {
        body_text.clone()
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &display_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    tracing::info!("Sending response: {}", response.status());

    response
}

/// Replace the value of `field_name` in a urlencoded form body with
/// asterisks.
fn redact_form_field(form_text: &str, field_name: &str) -> String {
    let prefix = format!("{field_name}=");

    form_text
        .split('&')
        .map(|pair| {
            if pair.starts_with(&prefix) {
                format!("{prefix}********")
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn log_body(message: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{message}\nbody: {}...", &body[..LOG_BODY_LENGTH_LIMIT]);
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("{message}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redact_form_field_tests {
    use super::redact_form_field;

    #[test]
    fn redacts_password_value() {
        let redacted = redact_form_field("username=alice&password=hunter2", "password");

        assert_eq!(redacted, "username=alice&password=********");
    }

    #[test]
    fn redacts_field_in_the_middle() {
        let redacted = redact_form_field(
            "username=alice&password=hunter2&remember=on",
            "password",
        );

        assert_eq!(redacted, "username=alice&password=********&remember=on");
    }

    #[test]
    fn leaves_other_fields_alone() {
        let redacted = redact_form_field("username=alice&amount=42.50", "password");

        assert_eq!(redacted, "username=alice&amount=42.50");
    }

    #[test]
    fn does_not_redact_similarly_named_fields() {
        let redacted = redact_form_field("confirm_password=hunter2", "password");

        assert_eq!(redacted, "confirm_password=hunter2");
    }
}
