//! Minimal HTML pages

/// Escape text for inclusion in HTML
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wrap `body` (already HTML) in a complete document
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn message_block(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"error\">{}</p>\n", escape(m)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#
    )
}

pub fn login_page(message: Option<&str>) -> String {
    page(
        "Log in",
        &format!(
            "<h1>Log in</h1>\n{}{}\n<p><a href=\"/api/auth/register\">Create an account</a></p>",
            message_block(message),
            credentials_form("/api/auth/login", "Log in"),
        ),
    )
}

pub fn register_page(message: Option<&str>) -> String {
    page(
        "Register",
        &format!(
            "<h1>Register</h1>\n{}{}\n<p><a href=\"/api/auth/login\">Already registered? Log in</a></p>",
            message_block(message),
            credentials_form("/api/auth/register", "Register"),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_login_page_message() {
        let html = login_page(Some("Incorrect email/password."));
        assert!(html.contains("Incorrect email/password."));
        assert!(html.contains("action=\"/api/auth/login\""));
        assert!(!login_page(None).contains("class=\"error\""));
    }
}
