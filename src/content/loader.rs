//! Content loader - builds the article collection from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::ContentError;
use super::{slug_from_path, Article, Collection, FrontMatter, MarkdownRenderer};

/// Loads every article under a content directory.
///
/// The load is fail-fast: a single schema violation, malformed date or
/// slug collision aborts the whole build with no partial collection.
pub struct ArticleLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ArticleLoader {
    pub fn new(content_dir: impl AsRef<Path>, highlight_theme: &str) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(highlight_theme),
        }
    }

    /// Load all articles into an immutable collection.
    ///
    /// The collection carries no ordering guarantee; consumers sort for
    /// display themselves.
    pub fn load(&self) -> Result<Collection, ContentError> {
        let mut articles: Vec<Article> = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        if !self.content_dir.exists() {
            return Ok(Collection::default());
        }

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_article_file(path) {
                continue;
            }

            let article = self.load_article(path)?;

            if let Some(first) = seen.get(&article.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: article.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(article.slug.clone(), path.to_path_buf());
            articles.push(article);
        }

        tracing::info!("Loaded {} articles", articles.len());
        Ok(Collection::new(articles))
    }

    /// Load and validate a single article file
    fn load_article(&self, path: &Path) -> Result<Article, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&content, path)?;

        // parse() already rejected unparseable dates
        let date = fm
            .parse_published_at()
            .ok_or_else(|| ContentError::MalformedDate {
                path: path.to_path_buf(),
                value: fm.published_at.clone(),
            })?;

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let slug = slug_from_path(relative);

        let body_html = self
            .renderer
            .render(body)
            .map_err(|e| ContentError::Render {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Article {
            title: fm.title,
            published_at: fm.published_at,
            date,
            summary: fm.summary,
            slug,
            body: body_html,
            raw: body.to_string(),
            source: relative.to_string_lossy().replace('\\', "/"),
            extra: fm.extra,
        })
    }
}

/// Check whether a file belongs to the article collection
fn is_article_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "mdx" || e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_article(dir: &Path, rel: &str, front: &str, body: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("---\n{front}---\n\n{body}\n")).unwrap();
    }

    fn loader(dir: &TempDir) -> ArticleLoader {
        ArticleLoader::new(dir.path(), "base16-ocean.dark")
    }

    #[test]
    fn test_load_valid_article() {
        let dir = TempDir::new().unwrap();
        write_article(
            dir.path(),
            "hello-world.mdx",
            "title: Hello World\npublishedAt: \"2024-01-15\"\nsummary: First post\n",
            "Some **markdown** here.",
        );

        let collection = loader(&dir).load().unwrap();
        assert_eq!(collection.len(), 1);

        let article = collection.get("hello-world").unwrap();
        assert_eq!(article.title, "Hello World");
        assert_eq!(article.published_at, "2024-01-15");
        assert_eq!(article.summary, "First post");
        assert!(article.body.contains("<strong>markdown</strong>"));
    }

    #[test]
    fn test_nested_path_slug() {
        let dir = TempDir::new().unwrap();
        write_article(
            dir.path(),
            "guides/getting-started.mdx",
            "title: Getting Started\npublishedAt: \"2024-02-01\"\nsummary: A guide\n",
            "Body.",
        );

        let collection = loader(&dir).load().unwrap();
        assert!(collection.get("guides/getting-started").is_some());
    }

    #[test]
    fn test_missing_field_fails_the_load() {
        let dir = TempDir::new().unwrap();
        write_article(
            dir.path(),
            "ok.mdx",
            "title: Fine\npublishedAt: \"2024-01-01\"\nsummary: Fine\n",
            "Body.",
        );
        write_article(
            dir.path(),
            "broken.mdx",
            "title: Broken\npublishedAt: \"2024-01-02\"\n",
            "Body.",
        );

        let err = loader(&dir).load().unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: "summary",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_slug_fails_the_load() {
        let dir = TempDir::new().unwrap();
        write_article(
            dir.path(),
            "post.md",
            "title: One\npublishedAt: \"2024-01-01\"\nsummary: One\n",
            "Body.",
        );
        write_article(
            dir.path(),
            "post.mdx",
            "title: Two\npublishedAt: \"2024-01-02\"\nsummary: Two\n",
            "Body.",
        );

        let err = loader(&dir).load().unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_repeated_loads_give_identical_slugs() {
        let dir = TempDir::new().unwrap();
        write_article(
            dir.path(),
            "guides/intro.mdx",
            "title: Intro\npublishedAt: \"2024-01-01\"\nsummary: Intro\n",
            "Body.",
        );

        let first = loader(&dir).load().unwrap();
        let second = loader(&dir).load().unwrap();
        let a: Vec<&str> = first.iter().map(|a| a.slug.as_str()).collect();
        let b: Vec<&str> = second.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_article_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "not an article").unwrap();
        write_article(
            dir.path(),
            "real.mdx",
            "title: Real\npublishedAt: \"2024-01-01\"\nsummary: Real\n",
            "Body.",
        );

        let collection = loader(&dir).load().unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_missing_content_dir_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let loader = ArticleLoader::new(dir.path().join("nope"), "base16-ocean.dark");
        let collection = loader.load().unwrap();
        assert!(collection.is_empty());
    }
}
