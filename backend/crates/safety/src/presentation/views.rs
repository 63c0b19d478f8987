//! Report form page

use auth::presentation::views::{escape, page};

use crate::presentation::router::SUBMIT_API_PATH;

pub fn submit_page(message: Option<&str>) -> String {
    let message = message
        .map(|m| format!("<p class=\"error\">{}</p>\n", escape(m)))
        .unwrap_or_default();

    page(
        "Submit a safety card",
        &format!(
            r#"<h1>Submit a safety card</h1>
{message}<form method="post" action="{SUBMIT_API_PATH}">
<label>Category <input type="text" name="category" required></label>
<label>Location <input type="text" name="location" required></label>
<label>Description <textarea name="description" required></textarea></label>
<button type="submit">Submit</button>
</form>
<p><a href="/api/auth/logout">Log out</a></p>"#
        ),
    )
}
