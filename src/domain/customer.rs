use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    Personal,
    Business,
    ReceiveOnly,
    Unverified,
}

/// Fields of a customer to be created on the payments network.
///
/// Serialized as-is into the creation request. Fields the payments network
/// accepts but that are not modelled here go in `extra`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub address1: String,
    pub city: String,
    /// Two-letter uppercase state abbreviation, e.g. `NY`.
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: String,
    pub ssn: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<()> {
        if is_valid_state(&self.state) {
            Ok(())
        } else {
            Err(GatewayError::ValidationError(
                "Invalid state format. Use a two-letter state abbreviation.".to_string(),
            ))
        }
    }
}

/// Exactly two ASCII uppercase letters.
pub fn is_valid_state(state: &str) -> bool {
    state.len() == 2 && state.bytes().all(|b| b.is_ascii_uppercase())
}
