//! Content module - the article collection pipeline

mod article;
mod error;
mod frontmatter;
pub mod highlight;
pub mod loader;
mod markdown;

pub use article::{slug_from_path, Article, Collection};
pub use error::ContentError;
pub use frontmatter::{parse_date_string, FieldKind, FieldSpec, FrontMatter, ARTICLE_SCHEMA};
pub use loader::ArticleLoader;
pub use markdown::MarkdownRenderer;
