//! HTML rendering. Every dynamic value goes through [`escape`].

mod auth;
mod blog;
mod layout;

pub use auth::{login_page, sign_up_page, LoginValues, SignUpValues};
pub use blog::{home_page, list_page, not_found_page, post_page, PostView};
pub use layout::Chrome;

pub const DEFAULT_POST_IMAGE: &str = "/static/default_post_bg.svg";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn date(ts: &chrono::NaiveDateTime) -> String {
    ts.format("%d/%m/%Y").to_string()
}

fn field_error(message: Option<&str>) -> String {
    match message {
        Some(m) => format!(r#"<p class="field-error" role="alert">{}</p>"#, escape(m)),
        None => String::new(),
    }
}

fn invalid_attr(message: Option<&str>) -> &'static str {
    if message.is_some() {
        r#" aria-invalid="true""#
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
