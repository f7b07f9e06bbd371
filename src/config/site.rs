//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Navigation links rendered in the page header
    pub nav: Vec<NavLink>,

    // Home page
    pub home: HomeConfig,

    // Work history cards
    pub work: Vec<WorkCard>,

    // Code highlighting
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            nav: vec![
                NavLink {
                    text: "Home".to_string(),
                    href: "/".to_string(),
                },
                NavLink {
                    text: "Articles".to_string(),
                    href: "/articles/".to_string(),
                },
                NavLink {
                    text: "Work".to_string(),
                    href: "/work/".to_string(),
                },
            ],

            home: HomeConfig::default(),
            work: Vec::new(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A navigation link: text and target, nothing else
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub href: String,
}

/// Home page profile content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub heading: String,
    pub tagline: String,
    pub bio: String,
    #[serde(default)]
    pub links: Vec<NavLink>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            heading: "Hi, I'm John".to_string(),
            tagline: "I'm a software developer.".to_string(),
            bio: String::new(),
            links: Vec::new(),
        }
    }
}

/// One card on the work history page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkCard {
    pub name: String,
    pub blurb: String,
    pub logo: Option<String>,
}

impl Default for WorkCard {
    fn default() -> Self {
        Self {
            name: String::new(),
            blurb: String::new(),
            logo: None,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Single fixed syntect theme used for all fences
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.nav.len(), 3);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: andyjones.co
author: Andy Jones
url: https://andyjones.co
nav:
  - text: Home
    href: /
  - text: Articles
    href: /articles/
work:
  - name: Fern
    blurb: User research made easy
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "andyjones.co");
        assert_eq!(config.author, "Andy Jones");
        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.work[0].name, "Fern");
        // Unspecified sections keep their defaults
        assert_eq!(config.public_dir, "public");
    }
}
