use minijinja::{Environment, Value, default_auto_escape_callback};

/// Renders a named template against a context of named values.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("../../templates/base.html")),
        "error.html" => Some(include_str!("../../templates/error.html")),

        // Users
        "users/index.html" => Some(include_str!("../../templates/users/index.html")),
        "users/new.html" => Some(include_str!("../../templates/users/new.html")),
        "users/show.html" => Some(include_str!("../../templates/users/show.html")),
        "users/edit.html" => Some(include_str!("../../templates/users/edit.html")),

        // Posts
        "posts/new.html" => Some(include_str!("../../templates/posts/new.html")),
        "posts/show.html" => Some(include_str!("../../templates/posts/show.html")),
        "posts/edit.html" => Some(include_str!("../../templates/posts/edit.html")),

        // Tags
        "tags/index.html" => Some(include_str!("../../templates/tags/index.html")),
        "tags/new.html" => Some(include_str!("../../templates/tags/new.html")),
        "tags/show.html" => Some(include_str!("../../templates/tags/show.html")),
        "tags/edit.html" => Some(include_str!("../../templates/tags/edit.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn unknown_template_is_an_error() {
        let engine = MiniJinjaEngine::new();
        assert!(engine.render("nope.html", context! {}).is_err());
    }

    #[test]
    fn html_templates_escape_values() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render(
                "tags/index.html",
                context! { tags => vec![context! { id => 1, name => "<b>bold</b>" }] },
            )
            .unwrap();

        assert!(html.contains("&lt;b&gt;bold"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
