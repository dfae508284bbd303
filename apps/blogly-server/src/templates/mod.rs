//! View rendering: template engine, view models, and the error page.

use std::sync::LazyLock;

use blogly_shared::ErrorResponse;
use minijinja::Value;

mod context;
mod engine;

pub use context::{PostView, TagOption, UserView};
pub use engine::{MiniJinjaEngine, TemplateEngine};

/// Engine used by error responses, which are built without access to the app state.
static ERROR_PAGES: LazyLock<MiniJinjaEngine> = LazyLock::new(MiniJinjaEngine::new);

/// Render the HTML body of an error response.
pub fn render_error_page(error: &ErrorResponse) -> String {
    ERROR_PAGES
        .render("error.html", Value::from_serialize(error))
        .unwrap_or_else(|e| {
            tracing::error!("Failed to render error page: {}", e);
            format!("{} {}", error.status, error.title)
        })
}
