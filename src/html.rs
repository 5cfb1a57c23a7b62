//! Shared building blocks for the server-rendered HTML views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

/// Wrap `content` in the application's HTML boilerplate.
///
/// `title` becomes the document title suffixed with the app name.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Moneta" }
                link href="/static/main.css" rel="stylesheet";
            }

            body
            {
                (content)
            }
        }
    }
}

/// A full page describing an error, e.g. a 404.
///
/// `header` is the large text (usually the status code), `description` says
/// what went wrong, and `fix` tells the user what to do about it.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    base(
        title,
        &html! {
            main .error-page {
                h1 { (header) }
                p { (description) }
                p { (fix) }
                p { (link(crate::endpoints::ROOT, "Back to the home page")) }
            }
        },
    )
}

/// Format `number` as a currency amount, e.g. "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// An inline text link.
pub fn link(url: &str, text: &str) -> Markup {
    html! {
        a .text-link href=(url) { (text) }
    }
}
