use crate::config;

/// Which commodities the next request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantSelection {
    /// The full default id list.
    All,
    /// An explicit, non-empty id list.
    Ids(Vec<u32>),
}

impl VariantSelection {
    /// Parse either the sentinel `all` (any case) or a comma-separated id list.
    ///
    /// Returns `None` for anything else, including an empty list.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        let ids = raw
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        if ids.is_empty() {
            None
        } else {
            Some(Self::Ids(ids))
        }
    }

    /// The comma-joined form sent as the `variant_ids` field.
    pub fn to_param(&self) -> String {
        match self {
            Self::All => config::variant_ids_param(config::ALL_VARIANT_IDS),
            Self::Ids(ids) => config::variant_ids_param(ids),
        }
    }
}

impl From<Vec<u32>> for VariantSelection {
    fn from(ids: Vec<u32>) -> Self {
        Self::Ids(ids)
    }
}
