pub mod price_quote;
pub mod result_row;
pub mod variant;
