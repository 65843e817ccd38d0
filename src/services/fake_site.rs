use std::{sync::Mutex, time::Duration};

use anyhow::anyhow;
use async_trait::async_trait;
use url::Url;

use crate::configuration::{Pauses, ScraperSettings, Selectors, Timeouts, VariantMatching};

use super::ListingSite;

const START_HEIGHT: i64 = 1_000;
const GROWTH_STEP: i64 = 500;

pub struct FakeVariant {
    label: String,
    price: Option<String>,
    // Label shown when the blocks are enumerated again
    live_label: Option<String>,
    select_fails: bool,
}

impl FakeVariant {
    pub fn priced(label: &str, price: &str) -> Self {
        FakeVariant {
            label: label.to_string(),
            price: Some(price.to_string()),
            live_label: None,
            select_fails: false,
        }
    }

    pub fn unpriced(label: &str) -> Self {
        FakeVariant {
            label: label.to_string(),
            price: None,
            live_label: None,
            select_fails: false,
        }
    }

    pub fn relabelled(mut self, live_label: &str) -> Self {
        self.live_label = Some(live_label.to_string());
        self
    }

    pub fn failing_select(mut self) -> Self {
        self.select_fails = true;
        self
    }
}

pub struct FakeModel {
    name: Option<String>,
    price: Option<String>,
    variants: Vec<FakeVariant>,
    open_fails: bool,
}

impl FakeModel {
    pub fn new(name: &str) -> Self {
        FakeModel {
            name: Some(name.to_string()),
            price: None,
            variants: vec![],
            open_fails: false,
        }
    }

    pub fn unnamed() -> Self {
        FakeModel {
            name: None,
            price: None,
            variants: vec![],
            open_fails: false,
        }
    }

    pub fn price(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn variant(mut self, variant: FakeVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.open_fails = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Page {
    Blank,
    Listing,
    Model(usize),
    Variant(usize, usize),
}

struct State {
    page: Page,
    history: Vec<Page>,
    height: i64,
    growth_left: u32,
    variant_listings: usize,
    gotos: usize,
    listing_loads: usize,
    backs: usize,
}

/// In-memory listing site with browser-like navigation history.
pub struct FakeSite {
    models: Vec<FakeModel>,
    growth_per_load: u32,
    // (load number, cards shown on that load)
    short_load: Option<(usize, usize)>,
    failing_goto: Option<usize>,
    state: Mutex<State>,
}

impl FakeSite {
    pub fn new(models: Vec<FakeModel>) -> Self {
        FakeSite {
            models,
            growth_per_load: 0,
            short_load: None,
            failing_goto: None,
            state: Mutex::new(State {
                page: Page::Blank,
                history: vec![],
                height: START_HEIGHT,
                growth_left: 0,
                variant_listings: 0,
                gotos: 0,
                listing_loads: 0,
                backs: 0,
            }),
        }
    }

    /// Every load keeps growing the document for `scrolls` scrolls.
    pub fn growing_for(mut self, scrolls: u32) -> Self {
        self.growth_per_load = scrolls;
        self
    }

    /// Listing load number `load` (1-based) only renders the first `visible` cards.
    pub fn short_on_load(mut self, load: usize, visible: usize) -> Self {
        self.short_load = Some((load, visible));
        self
    }

    /// Navigation attempt number `attempt` (1-based) fails.
    pub fn failing_goto(mut self, attempt: usize) -> Self {
        self.failing_goto = Some(attempt);
        self
    }

    pub fn listing_loads(&self) -> usize {
        self.state.lock().unwrap().listing_loads
    }

    pub fn backs(&self) -> usize {
        self.state.lock().unwrap().backs
    }

    fn current_model(&self) -> anyhow::Result<&FakeModel> {
        match self.state.lock().unwrap().page {
            Page::Model(index) => Ok(&self.models[index]),
            page => Err(anyhow!("Not on a model page: {:?}", page)),
        }
    }
}

#[async_trait]
impl ListingSite for FakeSite {
    type Card = usize;
    type VariantBlock = usize;

    async fn goto(&self, _url: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.gotos += 1;
        if self.failing_goto == Some(state.gotos) {
            return Err(anyhow!("Navigation timed out"));
        }

        state.page = Page::Listing;
        state.history.clear();
        state.height = START_HEIGHT;
        state.growth_left = self.growth_per_load;
        state.listing_loads += 1;
        Ok(())
    }

    async fn back(&self) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.backs += 1;
        state.page = state.history.pop().ok_or_else(|| anyhow!("No history"))?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.growth_left > 0 {
            state.height += GROWTH_STEP;
            state.growth_left -= 1;
        }
        Ok(())
    }

    async fn document_height(&self) -> anyhow::Result<i64> {
        Ok(self.state.lock().unwrap().height)
    }

    async fn list_models(&self, _timeout: Duration) -> anyhow::Result<Vec<usize>> {
        let state = self.state.lock().unwrap();
        let visible = match self.short_load {
            Some((load, visible)) if load == state.listing_loads => visible.min(self.models.len()),
            _ => self.models.len(),
        };

        match (state.page, visible) {
            (Page::Listing, visible) if visible > 0 => Ok((0..visible).collect()),
            _ => Err(anyhow!("No model cards found on the listing page")),
        }
    }

    async fn model_name(&self, card: &usize) -> anyhow::Result<String> {
        self.models[*card]
            .name
            .clone()
            .ok_or_else(|| anyhow!("Model name element missing"))
    }

    async fn open_model(&self, card: &usize) -> anyhow::Result<()> {
        if self.models[*card].open_fails {
            return Err(anyhow!("Element click intercepted"));
        }

        let mut state = self.state.lock().unwrap();
        let page = state.page;
        state.history.push(page);
        state.page = Page::Model(*card);
        state.variant_listings = 0;
        Ok(())
    }

    async fn list_variants(&self, _timeout: Duration) -> anyhow::Result<Vec<usize>> {
        let mut state = self.state.lock().unwrap();
        match state.page {
            Page::Model(index) => {
                state.variant_listings += 1;
                Ok((0..self.models[index].variants.len()).collect())
            }
            _ => Ok(vec![]),
        }
    }

    async fn variant_label(&self, block: &usize) -> anyhow::Result<String> {
        let relisted = self.state.lock().unwrap().variant_listings > 1;
        let variant = &self.current_model()?.variants[*block];

        match (&variant.live_label, relisted) {
            (Some(live_label), true) => Ok(live_label.clone()),
            _ => Ok(variant.label.clone()),
        }
    }

    async fn select_variant(&self, block: &usize) -> anyhow::Result<()> {
        if self.current_model()?.variants[*block].select_fails {
            return Err(anyhow!("Stale element reference"));
        }

        let mut state = self.state.lock().unwrap();
        let page = state.page;
        if let Page::Model(index) = page {
            state.history.push(page);
            state.page = Page::Variant(index, *block);
        }
        Ok(())
    }

    async fn read_price(&self, _timeout: Duration) -> anyhow::Result<Option<String>> {
        let page = self.state.lock().unwrap().page;
        match page {
            Page::Variant(model, variant) => Ok(self.models[model].variants[variant].price.clone()),
            Page::Model(model) => Ok(self.models[model].price.clone()),
            _ => Ok(None),
        }
    }
}

/// Scraper settings with every pause and wait set to zero.
pub fn test_settings() -> ScraperSettings {
    ScraperSettings {
        listing_url: Url::parse("https://example.test/sell-apple").unwrap(),
        max_scroll_rounds: 50,
        variant_matching: VariantMatching::Exact,
        selectors: Selectors {
            model_card: "div.card".to_string(),
            model_name: "span".to_string(),
            variant_block: "div.variant".to_string(),
            variant_label: "h6".to_string(),
            price: "span.price".to_string(),
        },
        timeouts: Timeouts {
            models_secs: 0,
            variants_secs: 0,
            variant_price_secs: 0,
            single_price_secs: 0,
            poll_millis: 0,
        },
        pauses: Pauses {
            initial_load_millis: 0,
            scroll_millis: 0,
            scroll_into_view_millis: 0,
            after_click_millis: 0,
            after_select_millis: 0,
            after_back_millis: 0,
            after_reload_millis: 0,
        },
    }
}
