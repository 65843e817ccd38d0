pub mod cashify_site;
pub mod droid;
#[cfg(test)]
mod fake_site;
pub mod listing_site;
pub mod price_scraper;
pub mod variant_matcher;

pub use cashify_site::*;
pub use droid::*;
pub use listing_site::*;
pub use price_scraper::*;
pub use variant_matcher::*;
