use super::links::Links;
use serde::Serialize;

/// Body of a funding-source creation request.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFundingSource {
    pub name: String,
    /// Processor token issued by the bank-data aggregator.
    pub plaid_token: String,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl NewFundingSource {
    pub fn new(name: impl Into<String>, plaid_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plaid_token: plaid_token.into(),
            links: None,
        }
    }

    /// Attaches the links of an on-demand authorization.
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }
}
