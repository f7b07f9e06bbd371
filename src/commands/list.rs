//! List site content

use anyhow::Result;

use crate::Folio;

/// Print every article, newest first
pub fn run(folio: &Folio) -> Result<()> {
    let articles = folio.load_articles()?;

    println!("Articles ({}):", articles.len());
    for article in articles.sorted_by_date() {
        println!(
            "  {} - {} [{}]",
            article.date.format("%Y-%m-%d"),
            article.title,
            article.slug
        );
    }

    Ok(())
}
