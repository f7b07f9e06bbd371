//! Create a new article

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Create a new article file named after the slugified title
pub fn run(folio: &Folio, title: &str) -> Result<()> {
    let today = chrono::Local::now().format("%Y-%m-%d");
    let file_slug = slug::slugify(title);

    fs::create_dir_all(&folio.content_dir)?;
    let file_path = folio.content_dir.join(format!("{file_slug}.mdx"));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {title}
publishedAt: "{today}"
summary: A short summary of the article.
---

"#
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_new_article_is_created_from_title() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::from_config(dir.path(), SiteConfig::default());

        run(&folio, "My Fancy Article").unwrap();
        let path = folio.content_dir.join("my-fancy-article.mdx");
        assert!(path.exists());

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("title: My Fancy Article"));
    }

    #[test]
    fn test_new_article_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::from_config(dir.path(), SiteConfig::default());

        run(&folio, "Twice").unwrap();
        assert!(run(&folio, "Twice").is_err());
    }
}
