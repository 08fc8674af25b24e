use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A HAL link: a target URL plus whatever attributes the vendor attached
/// (`type`, `resource-type`, ...).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Link {
    pub href: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            attributes: Map::new(),
        }
    }
}

/// Relation name to link, as found under `_links`.
pub type Links = BTreeMap<String, Link>;
