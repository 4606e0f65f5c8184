mod app;
mod effects;
mod logging;
mod render;

use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:5001";

fn main() -> Result<()> {
    logging::initialize(logging::LogDestination::File);

    let mut args = std::env::args().skip(1);
    let product_url = args
        .next()
        .context("usage: outreach_app <product-url> <client-url>")?;
    let client_url = args
        .next()
        .context("usage: outreach_app <product-url> <client-url>")?;
    let base_url =
        std::env::var("OUTREACH_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    app::run(app::AppConfig {
        product_url,
        client_url,
        base_url,
    })
}
