//! Article model and the loaded collection

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path};

/// A single article, produced once per content file at build time and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article title
    pub title: String,

    /// Publication date as written in the front matter
    pub published_at: String,

    /// Parsed publication date, used for ordering
    pub date: NaiveDateTime,

    /// One-line summary shown in the article list
    pub summary: String,

    /// URL identifier derived from the file path
    pub slug: String,

    /// Compiled HTML body
    pub body: String,

    /// Raw markdown body
    pub raw: String,

    /// Source file path relative to the content directory
    pub source: String,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Derive a slug from a path relative to the content directory.
///
/// Pure function of the path: the extension is stripped and directory
/// separators are normalized to `/`, so `guides/intro.mdx` becomes
/// `guides/intro` on every platform.
pub fn slug_from_path(relative: &Path) -> String {
    let stripped = relative.with_extension("");
    stripped
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The immutable set of articles produced by one build.
///
/// Iteration order carries no guarantee; consumers that need an order
/// sort for themselves (see [`Collection::sorted_by_date`]).
#[derive(Debug, Clone, Default)]
pub struct Collection {
    articles: Vec<Article>,
    by_slug: HashMap<String, usize>,
}

impl Collection {
    /// Build a collection from loaded articles. Slug uniqueness is the
    /// loader's responsibility and is asserted before this is called.
    pub(crate) fn new(articles: Vec<Article>) -> Self {
        let by_slug = articles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.slug.clone(), i))
            .collect();
        Self { articles, by_slug }
    }

    /// Look up an article by exact slug equality
    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.by_slug.get(slug).map(|&i| &self.articles[i])
    }

    /// Iterate over articles in load order
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    /// Articles newest-first; ties keep their load order (stable sort)
    pub fn sorted_by_date(&self) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, published_at: &str) -> Article {
        Article {
            title: format!("Article {slug}"),
            published_at: published_at.to_string(),
            date: crate::content::frontmatter::parse_date_string(published_at).unwrap(),
            summary: "A summary".to_string(),
            slug: slug.to_string(),
            body: String::new(),
            raw: String::new(),
            source: format!("{slug}.mdx"),
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_slug_strips_extension() {
        assert_eq!(slug_from_path(Path::new("hello-world.mdx")), "hello-world");
        assert_eq!(slug_from_path(Path::new("notes.md")), "notes");
    }

    #[test]
    fn test_slug_preserves_directories() {
        assert_eq!(
            slug_from_path(Path::new("guides/getting-started.mdx")),
            "guides/getting-started"
        );
    }

    #[test]
    fn test_slug_is_pure() {
        let a = slug_from_path(Path::new("guides/intro.mdx"));
        let b = slug_from_path(Path::new("guides/intro.mdx"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_paths_give_distinct_slugs() {
        let a = slug_from_path(Path::new("guides/intro.mdx"));
        let b = slug_from_path(Path::new("notes/intro.mdx"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_lookup_by_slug() {
        let collection = Collection::new(vec![article("hello-world", "2024-01-01")]);
        assert!(collection.get("hello-world").is_some());
        assert!(collection.get("does-not-exist").is_none());
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let collection = Collection::new(vec![
            article("a", "2024-01-01"),
            article("b", "2023-06-15"),
            article("c", "2024-03-10"),
        ]);

        let dates: Vec<&str> = collection
            .sorted_by_date()
            .iter()
            .map(|a| a.published_at.as_str())
            .collect();
        assert_eq!(dates, vec!["2024-03-10", "2024-01-01", "2023-06-15"]);
    }

    #[test]
    fn test_sort_tie_break_is_stable() {
        let collection = Collection::new(vec![
            article("first", "2024-01-01"),
            article("second", "2024-01-01"),
        ]);

        let slugs: Vec<&str> = collection
            .sorted_by_date()
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }
}
