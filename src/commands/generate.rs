//! Generate the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Load the collection and render every page.
///
/// Fail-fast: a schema violation, malformed date or duplicate slug
/// aborts before anything is written, so a broken build never publishes
/// a partial site.
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let articles = folio.load_articles()?;

    let generator = Generator::new(folio)?;
    generator.generate(&articles)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} articles in {:.2}s",
        articles.len(),
        duration.as_secs_f64()
    );

    Ok(())
}
