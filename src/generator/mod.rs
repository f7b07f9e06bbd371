//! Generator module - renders the site pages from the loaded collection

use anyhow::Result;
use std::fs;
use std::path::Path;
use tera::Context;

use crate::content::{Article, Collection};
use crate::templates::{ArticleData, ConfigData, TemplateRenderer, STYLESHEET};
use crate::Folio;

/// Static site generator over the embedded templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site into the public directory
    pub fn generate(&self, articles: &Collection) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.write_stylesheet()?;

        let config = self.config_data();

        self.generate_home(&config)?;
        self.generate_work(&config)?;
        self.generate_article_list(articles, &config)?;
        self.generate_article_pages(articles, &config)?;
        self.generate_not_found(&config)?;

        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.folio.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }

    fn generate_home(&self, config: &ConfigData) -> Result<()> {
        let mut context = Context::new();
        context.insert("config", config);
        context.insert("home", &self.folio.config.home);

        let html = self.renderer.render("index.html", &context)?;
        self.write_page(Path::new("index.html"), &html)
    }

    fn generate_work(&self, config: &ConfigData) -> Result<()> {
        let mut context = Context::new();
        context.insert("config", config);
        context.insert("work", &self.folio.config.work);

        let html = self.renderer.render("work.html", &context)?;
        self.write_page(Path::new("work/index.html"), &html)
    }

    /// The article list sorts newest-first; the loader itself makes no
    /// ordering promise
    fn generate_article_list(&self, articles: &Collection, config: &ConfigData) -> Result<()> {
        let rows: Vec<ArticleData> = articles
            .sorted_by_date()
            .into_iter()
            .map(|a| self.article_data(a))
            .collect();

        let mut context = Context::new();
        context.insert("config", config);
        context.insert("articles", &rows);

        let html = self.renderer.render("articles.html", &context)?;
        self.write_page(Path::new("articles/index.html"), &html)
    }

    fn generate_article_pages(&self, articles: &Collection, config: &ConfigData) -> Result<()> {
        for article in articles {
            let mut context = Context::new();
            context.insert("config", config);
            context.insert("article", &self.article_data(article));

            let html = self.renderer.render("article.html", &context)?;
            let rel = Path::new("articles").join(&article.slug).join("index.html");
            self.write_page(&rel, &html)?;
        }
        Ok(())
    }

    fn generate_not_found(&self, config: &ConfigData) -> Result<()> {
        let mut context = Context::new();
        context.insert("config", config);

        let html = self.renderer.render("404.html", &context)?;
        self.write_page(Path::new("404.html"), &html)
    }

    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let path = self.folio.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }

    fn config_data(&self) -> ConfigData {
        let c = &self.folio.config;
        ConfigData {
            title: c.title.clone(),
            description: c.description.clone(),
            author: c.author.clone(),
            language: c.language.clone(),
            root: c.root.clone(),
            nav: c.nav.clone(),
        }
    }

    fn article_data(&self, article: &Article) -> ArticleData {
        let root = self.folio.config.root.trim_end_matches('/');
        ArticleData {
            title: article.title.clone(),
            summary: article.summary.clone(),
            published_at: article.published_at.clone(),
            url: format!("{}/articles/{}/", root, article.slug),
            body: article.body.clone(),
        }
    }
}
