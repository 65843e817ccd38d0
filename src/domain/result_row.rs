use std::fmt;

use super::{price_quote::PriceQuote, variant::Variant};

pub const COLUMNS: [&str; 4] = ["Model", "RAM", "Storage", "Price"];
pub const NO_VARIANT: &str = "No Variant";

/// One exported (model, variant, price) observation.
#[derive(Debug, PartialEq, Clone)]
pub struct ResultRow {
    pub model: String,
    pub ram: String,
    pub storage: String,
    pub price: PriceQuote,
}

impl ResultRow {
    pub fn quoted(model: &str, variant: &Variant, price: PriceQuote) -> Self {
        ResultRow {
            model: model.to_string(),
            ram: variant.ram.clone(),
            storage: variant.storage.clone(),
            price,
        }
    }

    pub fn single(model: &str, price: PriceQuote) -> Self {
        ResultRow {
            model: model.to_string(),
            ram: String::new(),
            storage: NO_VARIANT.to_string(),
            price,
        }
    }

    /// Placeholder for a model that failed before any variant was processed.
    pub fn model_error(index: usize) -> Self {
        ResultRow {
            model: format!("Error at index {}", index),
            ram: "N/A".to_string(),
            storage: "N/A".to_string(),
            price: PriceQuote::NotApplicable,
        }
    }

    /// Cells in `COLUMNS` order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.model.clone(),
            self.ram.clone(),
            self.storage.clone(),
            self.price.to_string(),
        ]
    }
}

/// Append-only, in processing order.
#[derive(Debug, Default)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
    // Set when a listing load hit the scroll cap
    partial: bool,
}

impl ResultTable {
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn mark_partial(&mut self) {
        self.partial = true;
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        let initial = RunSummary {
            partial_listing: self.partial,
            ..RunSummary::default()
        };

        self.rows.iter().fold(initial, |mut summary, row| {
            summary.total += 1;
            match row.price {
                PriceQuote::Found(_) => summary.found += 1,
                PriceQuote::NotAvailable => summary.not_available += 1,
                PriceQuote::VariantNotFound => summary.variant_not_found += 1,
                PriceQuote::Error => summary.variant_errors += 1,
                PriceQuote::NotApplicable => summary.model_errors += 1,
            }
            summary
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub found: usize,
    pub not_available: usize,
    pub variant_not_found: usize,
    pub variant_errors: usize,
    pub model_errors: usize,
    pub partial_listing: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows | {} priced, {} not available, {} variants not found, {} variant errors, {} model errors",
            self.total,
            self.found,
            self.not_available,
            self.variant_not_found,
            self.variant_errors,
            self.model_errors
        )?;
        if self.partial_listing {
            write!(f, " | partial listing (scroll cap reached)")?;
        }
        Ok(())
    }
}
