//! Embedded site templates using the Tera template engine
//!
//! All page templates are compiled into the binary, so a generated site
//! needs no template directory on disk.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::NavLink;

/// Stylesheet written into the generated site
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with all embedded page templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Article bodies are already HTML; nothing here renders
        // untrusted input
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("work.html", include_str!("site/work.html")),
            ("articles.html", include_str!("site/articles.html")),
            ("article.html", include_str!("site/article.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: render a date string like "2024-01-15" as
/// "January 15, 2024"; unparseable values pass through unchanged
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);

    match crate::content::parse_date_string(&s) {
        Some(dt) => Ok(tera::Value::String(dt.format("%B %-d, %Y").to_string())),
        None => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
    pub nav: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub summary: String,
    pub published_at: String,
    pub url: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_filter() {
        let value = tera::Value::String("2024-01-15".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("January 15, 2024".to_string()));
    }

    #[test]
    fn test_display_date_filter_passthrough() {
        let value = tera::Value::String("soon".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("soon".to_string()));
    }

    #[test]
    fn test_templates_compile() {
        assert!(TemplateRenderer::new().is_ok());
    }
}
