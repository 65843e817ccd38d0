use std::time::Duration;

use async_trait::async_trait;

/// Page primitives the scrape pipeline drives.
///
/// Element handles (`Card`, `VariantBlock`) are only valid until the next
/// navigation; callers re-enumerate after every `goto`/`back`.
#[async_trait]
pub trait ListingSite: Send + Sync {
    type Card: Send + Sync;
    type VariantBlock: Send + Sync;

    async fn goto(&self, url: &str) -> anyhow::Result<()>;

    async fn back(&self) -> anyhow::Result<()>;

    async fn scroll_to_bottom(&self) -> anyhow::Result<()>;

    async fn document_height(&self) -> anyhow::Result<i64>;

    /// Fails when no card shows up within `timeout`.
    async fn list_models(&self, timeout: Duration) -> anyhow::Result<Vec<Self::Card>>;

    async fn model_name(&self, card: &Self::Card) -> anyhow::Result<String>;

    /// Brings the card into view and clicks through to the model page.
    async fn open_model(&self, card: &Self::Card) -> anyhow::Result<()>;

    /// Empty when no variant block shows up within `timeout`.
    async fn list_variants(&self, timeout: Duration) -> anyhow::Result<Vec<Self::VariantBlock>>;

    async fn variant_label(&self, block: &Self::VariantBlock) -> anyhow::Result<String>;

    async fn select_variant(&self, block: &Self::VariantBlock) -> anyhow::Result<()>;

    /// `None` when the price display is not visible within `timeout`.
    async fn read_price(&self, timeout: Duration) -> anyhow::Result<Option<String>>;
}
