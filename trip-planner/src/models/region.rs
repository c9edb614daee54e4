use serde::{Deserialize, Serialize};

/// A country, state/province or city as offered by the selects.
///
/// Countries and states use their ISO code. Cities have no code in the reference
/// data, so their `code` is the display name and they are only unique under a
/// given (country, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

impl Region {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
