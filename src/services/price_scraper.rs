use std::time::Duration;

use tokio::time::sleep;

use crate::{
    configuration::ScraperSettings,
    domain::{
        price_quote::PriceQuote,
        result_row::{ResultRow, ResultTable},
        variant::Variant,
    },
};

use super::{ListingSite, VariantMatcher};

#[derive(Debug, PartialEq)]
pub struct ScrollOutcome {
    pub rounds: u32,
    /// False when the page was still growing at `max_scroll_rounds`.
    pub stable: bool,
}

/// Navigates to `url` and scrolls until the document height stops changing.
pub async fn load_and_stabilize<S: ListingSite>(
    site: &S,
    url: &str,
    settle: Duration,
    settings: &ScraperSettings,
) -> anyhow::Result<ScrollOutcome> {
    site.goto(url).await?;
    sleep(settle).await;

    let mut last_height = site.document_height().await?;
    let mut rounds = 0;

    while rounds < settings.max_scroll_rounds {
        site.scroll_to_bottom().await?;
        sleep(settings.pauses.scroll()).await;
        rounds += 1;

        let new_height = site.document_height().await?;
        if new_height == last_height {
            log::info!("Listing stable at height {} after {} scrolls", new_height, rounds);
            return Ok(ScrollOutcome {
                rounds,
                stable: true,
            });
        }
        last_height = new_height;
    }

    log::warn!(
        "Listing still growing after {} scrolls, continuing with a partial listing",
        rounds
    );
    Ok(ScrollOutcome {
        rounds,
        stable: false,
    })
}

/// Walks every model card on the listing and appends one row per processing attempt.
///
/// Rows are pushed into `table` as they are produced, so a caller still holds
/// everything scraped before an `Err` is returned.
pub async fn scrape_listing<S: ListingSite>(
    site: &S,
    settings: &ScraperSettings,
    matcher: &dyn VariantMatcher,
    table: &mut ResultTable,
) -> anyhow::Result<()> {
    let listing_url = settings.listing_url.as_str();

    let outcome =
        load_and_stabilize(site, listing_url, settings.pauses.initial_load(), settings).await?;
    if !outcome.stable {
        table.mark_partial();
    }

    let count = site.list_models(settings.timeouts.models()).await?.len();
    log::info!("Found {} models", count);

    for index in 0..count {
        if let Err(e) = scrape_model(site, settings, matcher, index, table).await {
            log::error!("Error processing model at index {}: {:?}", index, e);
            table.push(ResultRow::model_error(index));
        }

        // Back to a fresh listing whatever happened to the model
        let outcome =
            load_and_stabilize(site, listing_url, settings.pauses.after_reload(), settings)
                .await?;
        if !outcome.stable {
            table.mark_partial();
        }
    }

    Ok(())
}

async fn scrape_model<S: ListingSite>(
    site: &S,
    settings: &ScraperSettings,
    matcher: &dyn VariantMatcher,
    index: usize,
    table: &mut ResultTable,
) -> anyhow::Result<()> {
    let models = site.list_models(settings.timeouts.models()).await?;
    let Some(model) = models.get(index) else {
        log::warn!(
            "Listing shrank to {} models, skipping index {}",
            models.len(),
            index
        );
        return Ok(());
    };

    let model_name = site.model_name(model).await?;
    log::info!(
        "Processing model {}/{}: {}",
        index + 1,
        models.len(),
        model_name
    );

    site.open_model(model).await?;
    sleep(settings.pauses.after_click()).await;

    resolve_variants(site, settings, matcher, &model_name, table).await;
    Ok(())
}

/// Emits one row per variant of the open model page, or a single
/// "No Variant" row when the model has no variant blocks.
pub async fn resolve_variants<S: ListingSite>(
    site: &S,
    settings: &ScraperSettings,
    matcher: &dyn VariantMatcher,
    model_name: &str,
    table: &mut ResultTable,
) {
    let variants = discover_variants(site, settings.timeouts.variants()).await;

    if variants.is_empty() {
        log::info!("No variants found, checking single price");
        let price = read_quote(site, settings.timeouts.single_price()).await;
        log::info!("{}: {}", model_name, price);
        table.push(ResultRow::single(model_name, price));
        return;
    }

    log::info!(
        "Found {} variants: {:?}",
        variants.len(),
        variants.iter().map(Variant::label).collect::<Vec<String>>()
    );

    for variant in variants.iter() {
        let price = quote_variant(site, settings, matcher, variant).await;
        table.push(ResultRow::quoted(model_name, variant, price));
    }
}

async fn discover_variants<S: ListingSite>(site: &S, timeout: Duration) -> Vec<Variant> {
    let blocks = match site.list_variants(timeout).await {
        Ok(blocks) => blocks,
        Err(e) => {
            log::warn!("Failed to list variant blocks: {:?}", e);
            return vec![];
        }
    };

    let mut variants = Vec::with_capacity(blocks.len());
    for block in blocks.iter() {
        match site.variant_label(block).await {
            Ok(label) => variants.push(Variant::parse(&label)),
            Err(e) => {
                log::warn!("Variant block without a readable label: {:?}", e);
                return vec![];
            }
        }
    }

    variants
}

async fn quote_variant<S: ListingSite>(
    site: &S,
    settings: &ScraperSettings,
    matcher: &dyn VariantMatcher,
    variant: &Variant,
) -> PriceQuote {
    let label = variant.label();

    match select_and_quote(site, settings, matcher, variant).await {
        Ok(Some(price)) => {
            log::info!("{}: {}", label, price);
            if let Err(e) = site.back().await {
                log::error!("Failed to go back after variant {}: {:?}", label, e);
            }
            sleep(settings.pauses.after_back()).await;
            price
        }
        Ok(None) => {
            log::warn!("Variant {} not found on the page", label);
            PriceQuote::VariantNotFound
        }
        Err(e) => {
            log::error!("Error processing variant {}: {:?}", label, e);
            PriceQuote::Error
        }
    }
}

/// `Ok(None)` when no live block matches `variant`.
async fn select_and_quote<S: ListingSite>(
    site: &S,
    settings: &ScraperSettings,
    matcher: &dyn VariantMatcher,
    variant: &Variant,
) -> anyhow::Result<Option<PriceQuote>> {
    let blocks = site.list_variants(settings.timeouts.variants()).await?;

    let mut best: Option<(usize, String, f64)> = None;
    for (position, block) in blocks.iter().enumerate() {
        let live_label = site.variant_label(block).await?;
        if !matcher.matches(variant, &live_label) {
            continue;
        }

        let score = matcher.score(variant, &live_label);
        if best.as_ref().map_or(true, |(_, _, top)| score > *top) {
            best = Some((position, live_label, score));
        }
    }

    let Some((position, live_label, _)) = best else {
        return Ok(None);
    };

    site.select_variant(&blocks[position]).await?;
    log::info!("Selected variant: {}", live_label);
    sleep(settings.pauses.after_select()).await;

    let price = read_quote(site, settings.timeouts.variant_price()).await;
    Ok(Some(price))
}

async fn read_quote<S: ListingSite>(site: &S, timeout: Duration) -> PriceQuote {
    match site.read_price(timeout).await {
        Ok(text) => PriceQuote::from_display(text),
        Err(e) => {
            log::warn!("Failed to read the price display: {:?}", e);
            PriceQuote::NotAvailable
        }
    }
}
