use chrono::{Local, NaiveDateTime};

use crate::{
    configuration::{ExportSettings, Settings},
    dal::spreadsheet,
    domain::result_row::ResultTable,
    services::{matcher_for, scrape_listing, CashifySite, Droid},
};

/// Runs the whole scrape: bootstrap, listing walk, export, teardown.
///
/// The browser session is quit before returning on every path past bootstrap,
/// and rows collected before a fatal scrape error are still exported.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    // Names the output file, however long the scrape takes
    let started_at = Local::now().naive_local();

    let droid = Droid::new(&settings.webdriver).await?;
    log::info!("Browser session started at {}", settings.webdriver.url);

    let mut table = ResultTable::default();
    let scrape_result = {
        let site = CashifySite::new(&droid.driver, &settings.scraper);
        let matcher = matcher_for(settings.scraper.variant_matching);
        scrape_listing(&site, &settings.scraper, matcher.as_ref(), &mut table).await
    };
    if let Err(ref e) = scrape_result {
        log::error!("Scrape aborted after {} rows: {:?}", table.len(), e);
    }

    let export_result = export(&table, &settings.export, started_at);

    droid.quit().await;

    scrape_result?;
    export_result
}

fn export(
    table: &ResultTable,
    settings: &ExportSettings,
    started_at: NaiveDateTime,
) -> anyhow::Result<()> {
    let path = spreadsheet::export_results(table, settings, started_at)?;

    log::info!("Results saved to: {}", path.display());
    log::info!("Total records: {}", table.len());
    log::info!("{}", table.summary());
    Ok(())
}
