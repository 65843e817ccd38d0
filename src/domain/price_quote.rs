use std::fmt;

/// Outcome of reading the price display for one processing attempt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PriceQuote {
    Found(String),
    NotAvailable,
    VariantNotFound,
    Error,
    // Model could not be processed at all
    NotApplicable,
}

impl PriceQuote {
    pub fn from_display(text: Option<String>) -> Self {
        match text {
            Some(price) => PriceQuote::Found(price),
            None => PriceQuote::NotAvailable,
        }
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceQuote::Found(price) => write!(f, "{}", price),
            PriceQuote::NotAvailable => write!(f, "Price not available"),
            PriceQuote::VariantNotFound => write!(f, "Variant not found"),
            PriceQuote::Error => write!(f, "Error"),
            PriceQuote::NotApplicable => write!(f, "N/A"),
        }
    }
}
