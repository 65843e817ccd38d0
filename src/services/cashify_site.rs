use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use thirtyfour::{prelude::ElementQueryable, By, WebDriver, WebElement};

use crate::configuration::{ScraperSettings, Selectors};

use super::ListingSite;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const DOCUMENT_HEIGHT: &str = "return document.body.scrollHeight;";
const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView({behavior: 'smooth', block: 'center'});";
const CLICK: &str = "arguments[0].click();";

/// The resale site's listing/variant pages, driven through WebDriver.
pub struct CashifySite<'a> {
    driver: &'a WebDriver,
    selectors: Selectors,
    poll: Duration,
    scroll_settle: Duration,
}

impl<'a> CashifySite<'a> {
    pub fn new(driver: &'a WebDriver, settings: &ScraperSettings) -> Self {
        CashifySite {
            driver,
            selectors: settings.selectors.clone(),
            poll: settings.timeouts.poll(),
            scroll_settle: settings.pauses.scroll_into_view(),
        }
    }

    async fn scroll_into_view(&self, element: &WebElement) -> anyhow::Result<()> {
        self.driver
            .execute(SCROLL_INTO_VIEW, vec![element.to_json()?])
            .await?;
        tokio::time::sleep(self.scroll_settle).await;
        Ok(())
    }
}

#[async_trait]
impl<'a> ListingSite for CashifySite<'a> {
    type Card = WebElement;
    type VariantBlock = WebElement;

    async fn goto(&self, url: &str) -> anyhow::Result<()> {
        self.driver
            .goto(url.to_string())
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        Ok(())
    }

    async fn back(&self) -> anyhow::Result<()> {
        self.driver.back().await?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> anyhow::Result<()> {
        self.driver.execute(SCROLL_TO_BOTTOM, Vec::new()).await?;
        Ok(())
    }

    async fn document_height(&self) -> anyhow::Result<i64> {
        let ret = self.driver.execute(DOCUMENT_HEIGHT, Vec::new()).await?;
        ret.json()
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("Document height is not a number: {:?}", ret.json()))
    }

    async fn list_models(&self, timeout: Duration) -> anyhow::Result<Vec<WebElement>> {
        let cards = self
            .driver
            .query(By::Css(self.selectors.model_card.clone()))
            .wait(timeout, self.poll)
            .all_from_selector_required()
            .await
            .context("No model cards found on the listing page")?;
        Ok(cards)
    }

    async fn model_name(&self, card: &WebElement) -> anyhow::Result<String> {
        let name = card
            .find(By::Css(self.selectors.model_name.clone()))
            .await?
            .text()
            .await?;
        Ok(name.trim().to_string())
    }

    async fn open_model(&self, card: &WebElement) -> anyhow::Result<()> {
        self.scroll_into_view(card).await?;
        card.click().await?;
        Ok(())
    }

    async fn list_variants(&self, timeout: Duration) -> anyhow::Result<Vec<WebElement>> {
        let blocks = self
            .driver
            .query(By::Css(self.selectors.variant_block.clone()))
            .wait(timeout, self.poll)
            .all_from_selector()
            .await?;
        Ok(blocks)
    }

    async fn variant_label(&self, block: &WebElement) -> anyhow::Result<String> {
        let label = block
            .find(By::Css(self.selectors.variant_label.clone()))
            .await?
            .text()
            .await?;
        Ok(label.trim().to_string())
    }

    async fn select_variant(&self, block: &WebElement) -> anyhow::Result<()> {
        self.scroll_into_view(block).await?;
        // Overlays on the variant page intercept native clicks
        self.driver.execute(CLICK, vec![block.to_json()?]).await?;
        Ok(())
    }

    async fn read_price(&self, timeout: Duration) -> anyhow::Result<Option<String>> {
        let price = self
            .driver
            .query(By::Css(self.selectors.price.clone()))
            .wait(timeout, self.poll)
            .and_displayed()
            .first_opt()
            .await?;

        match price {
            Some(element) => Ok(Some(element.text().await?.trim().to_string())),
            None => Ok(None),
        }
    }
}
