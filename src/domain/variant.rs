/// A RAM/storage configuration of a model, as shown on its variant block.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Variant {
    pub ram: String,
    pub storage: String,
}

impl Variant {
    /// Splits a `"RAM / Storage"` label. A label without `/` has no RAM dimension.
    pub fn parse(label: &str) -> Self {
        match label.split_once('/') {
            Some((ram, storage)) => Variant {
                ram: ram.trim().to_string(),
                storage: storage.trim().to_string(),
            },
            None => Variant {
                ram: String::new(),
                storage: label.trim().to_string(),
            },
        }
    }

    /// The label a live variant block is expected to show for this variant.
    pub fn label(&self) -> String {
        match self.ram.is_empty() {
            true => self.storage.clone(),
            false => format!("{} / {}", self.ram, self.storage),
        }
    }
}
