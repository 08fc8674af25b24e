use crate::error::GatewayError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The only currency transfers are issued in.
pub const TRANSFER_CURRENCY: &str = "USD";

/// Represents a positive monetary amount for transfers.
///
/// Keeps the scale it was created with, so `"25.00"` is sent as `"25.00"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GatewayError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|e| GatewayError::ValidationError(format!("Invalid amount {value:?}: {e}")))?;
        Self::new(decimal)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-side description of a transfer between two funding sources.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferParams {
    pub source_funding_source_url: String,
    pub destination_funding_source_url: String,
    pub amount: Amount,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Href {
    pub href: String,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct TransferLinks {
    pub source: Href,
    pub destination: Href,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Money {
    pub currency: &'static str,
    pub value: String,
}

/// Body of a transfer creation request.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct TransferRequest {
    #[serde(rename = "_links")]
    pub links: TransferLinks,
    pub amount: Money,
}

impl From<&TransferParams> for TransferRequest {
    fn from(params: &TransferParams) -> Self {
        Self {
            links: TransferLinks {
                source: Href {
                    href: params.source_funding_source_url.clone(),
                },
                destination: Href {
                    href: params.destination_funding_source_url.clone(),
                },
            },
            amount: Money {
                currency: TRANSFER_CURRENCY,
                value: params.amount.to_string(),
            },
        }
    }
}
