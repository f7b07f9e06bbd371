//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content"))?;

    let config_content = r#"# Folio configuration

# Site
title: Folio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Header navigation
nav:
  - text: Home
    href: /
  - text: Articles
    href: /articles/
  - text: Work
    href: /work/

# Home page
home:
  heading: "Hi, I'm John 👋"
  tagline: I'm a software developer.
  bio: ''
  links: []

# Work and projects cards
work: []

# Code highlighting
highlight:
  theme: base16-ocean.dark
"#;

    fs::write(target_dir.join("folio.yml"), config_content)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_article = format!(
        r#"---
title: Hello World
publishedAt: "{today}"
summary: A first article to show what the pipeline does.
---

Welcome to your new site. Articles are markdown files under `content/`
with a front-matter block; `title`, `publishedAt` and `summary` are
required, and the URL slug comes from the file path.

Code fences are highlighted, and the fence info string can flag lines
and words:

```rust {{2}} /greeting/
fn main() {{
    let greeting = "hello";
    println!("{{greeting}}, world");
}}
```

Run `folio generate` to build the site, or `folio server` to preview it
with live reload.
"#
    );

    fs::write(
        target_dir.join("content/hello-world.mdx"),
        sample_article,
    )?;

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_a_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("folio.yml").exists());
        assert!(dir.path().join("content/hello-world.mdx").exists());

        let folio = Folio::new(dir.path()).unwrap();
        let articles = folio.load_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert!(articles.get("hello-world").is_some());
    }
}
