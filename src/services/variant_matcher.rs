use strsim::jaro_winkler;

use crate::{configuration::VariantMatching, domain::variant::Variant};

/// Decides whether a live variant block is the one a parsed variant refers to.
pub trait VariantMatcher: Send + Sync {
    fn matches(&self, wanted: &Variant, live_label: &str) -> bool;

    /// Ranks matching blocks; the highest score wins, the earliest on ties.
    fn score(&self, wanted: &Variant, live_label: &str) -> f64 {
        jaro_winkler(&wanted.label(), live_label.trim())
    }
}

pub struct ExactLabelMatcher;

impl VariantMatcher for ExactLabelMatcher {
    fn matches(&self, wanted: &Variant, live_label: &str) -> bool {
        live_label.trim() == wanted.label()
    }
}

/// Tolerates case and spacing drift; RAM and storage must still agree exactly.
pub struct FuzzyLabelMatcher;

impl VariantMatcher for FuzzyLabelMatcher {
    fn matches(&self, wanted: &Variant, live_label: &str) -> bool {
        let live = Variant::parse(live_label);

        normalize(&wanted.ram) == normalize(&live.ram)
            && normalize(&wanted.storage) == normalize(&live.storage)
    }
}

fn normalize(part: &str) -> String {
    part.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

pub fn matcher_for(strategy: VariantMatching) -> Box<dyn VariantMatcher> {
    match strategy {
        VariantMatching::Exact => Box::new(ExactLabelMatcher),
        VariantMatching::Fuzzy => Box::new(FuzzyLabelMatcher),
    }
}
