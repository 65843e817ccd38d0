use std::time::Duration;

use config::{builder::DefaultState, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use url::Url;

const DEFAULT_CONFIGURATION: &str = include_str!("../configuration/base.yaml");

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub webdriver: WebDriverSettings,
    pub scraper: ScraperSettings,
    pub export: ExportSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebDriverSettings {
    pub url: String,
    pub headless: bool,
    pub user_agent: Option<String>,
    pub randomize_user_agent: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub listing_url: Url,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_scroll_rounds: u32,
    pub variant_matching: VariantMatching,
    pub selectors: Selectors,
    pub timeouts: Timeouts,
    pub pauses: Pauses,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum VariantMatching {
    Exact,
    Fuzzy,
}

/// CSS selectors for the listing and detail page markup.
#[derive(Deserialize, Clone, Debug)]
pub struct Selectors {
    pub model_card: String,
    pub model_name: String,
    pub variant_block: String,
    pub variant_label: String,
    pub price: String,
}

/// Upper bounds for the element waits.
#[derive(Deserialize, Clone, Debug)]
pub struct Timeouts {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub models_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub variants_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub variant_price_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub single_price_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_millis: u64,
}

impl Timeouts {
    pub fn models(&self) -> Duration {
        Duration::from_secs(self.models_secs)
    }

    pub fn variants(&self) -> Duration {
        Duration::from_secs(self.variants_secs)
    }

    pub fn variant_price(&self) -> Duration {
        Duration::from_secs(self.variant_price_secs)
    }

    pub fn single_price(&self) -> Duration {
        Duration::from_secs(self.single_price_secs)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_millis)
    }
}

/// Settle pauses after actions that trigger asynchronous rendering.
#[derive(Deserialize, Clone, Debug)]
pub struct Pauses {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub initial_load_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_into_view_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub after_click_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub after_select_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub after_back_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub after_reload_millis: u64,
}

impl Pauses {
    pub fn initial_load(&self) -> Duration {
        Duration::from_millis(self.initial_load_millis)
    }

    pub fn scroll(&self) -> Duration {
        Duration::from_millis(self.scroll_millis)
    }

    pub fn scroll_into_view(&self) -> Duration {
        Duration::from_millis(self.scroll_into_view_millis)
    }

    pub fn after_click(&self) -> Duration {
        Duration::from_millis(self.after_click_millis)
    }

    pub fn after_select(&self) -> Duration {
        Duration::from_millis(self.after_select_millis)
    }

    pub fn after_back(&self) -> Duration {
        Duration::from_millis(self.after_back_millis)
    }

    pub fn after_reload(&self) -> Duration {
        Duration::from_millis(self.after_reload_millis)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ExportSettings {
    pub directory: String,
    pub file_prefix: String,
}

/// Embedded defaults, overridden by `configuration/local.yaml` and `APP_*` env vars.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let local_file = base_path.join("configuration").join("local.yaml");

    configuration_builder()
        .add_source(File::from(local_file).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Settings>()
}

fn configuration_builder() -> ConfigBuilder<DefaultState> {
    config::Config::builder().add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Yaml))
}
