use axum::response::Html;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Render the chat page, injecting the configured model name.
pub fn render_index(model: &str) -> Html<String> {
    Html(INDEX_HTML.replace("{{ model }}", model))
}
