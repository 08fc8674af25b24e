use crate::domain::customer::NewCustomer;
use crate::domain::funding_source::NewFundingSource;
use crate::domain::ids::checked_id;
use crate::domain::links::Links;
use crate::domain::ports::PaymentsTransportBox;
use crate::domain::transfer::{TransferParams, TransferRequest};
use crate::error::{GatewayError, RemoteError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

/// Facade over the payments network.
///
/// `PaymentsGateway` shapes requests for customers, funding sources, on-demand
/// authorizations and transfers and hands them to its transport. Remote
/// failures are logged, including any embedded per-field errors, and then
/// returned to the caller unchanged. Nothing is retried.
///
/// The gateway holds no per-call state and can be shared freely (e.g. behind
/// an `Arc`) once built at startup.
pub struct PaymentsGateway {
    transport: PaymentsTransportBox,
}

impl PaymentsGateway {
    /// Creates a new `PaymentsGateway` instance.
    ///
    /// # Arguments
    ///
    /// * `transport` - Where creation requests are sent.
    pub fn new(transport: PaymentsTransportBox) -> Self {
        Self { transport }
    }

    /// Creates a customer and returns its location URL.
    ///
    /// The state code is checked first; a malformed one fails with
    /// `ValidationError` and nothing is sent.
    #[instrument(skip_all)]
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<String> {
        customer.validate()?;
        self.post_for_location("customers", to_body(customer)?)
            .await
            .inspect_err(|err| log_failure("Creating a customer", err))
    }

    /// Creates a funding source for `customer_id` and returns its location URL.
    ///
    /// A customer id that would not stay a single path segment fails with
    /// `ValidationError` before anything is sent.
    #[instrument(skip(self, funding_source))]
    pub async fn create_funding_source(
        &self,
        customer_id: &str,
        funding_source: &NewFundingSource,
    ) -> Result<String> {
        let path = format!(
            "customers/{}/funding-sources",
            checked_id("customer", customer_id)?
        );
        self.post_for_location(&path, to_body(funding_source)?)
            .await
            .inspect_err(|err| log_failure("Creating a funding source", err))
    }

    /// Creates an on-demand authorization and returns its links.
    #[instrument(skip_all)]
    pub async fn create_on_demand_authorization(&self) -> Result<Links> {
        self.request_authorization_links()
            .await
            .inspect_err(|err| log_failure("Creating an on-demand authorization", err))
    }

    /// Moves `amount` USD from one funding source to another and returns the
    /// transfer's location URL.
    #[instrument(skip_all)]
    pub async fn create_transfer(&self, params: &TransferParams) -> Result<String> {
        let request = TransferRequest::from(params);
        self.post_for_location("transfers", to_body(&request)?)
            .await
            .inspect_err(|err| log_failure("Transferring funds", err))
    }

    /// Authorizes and links a bank account in one go.
    ///
    /// The authorization is created first and its links are attached to the
    /// funding-source request. If the second step fails the authorization is
    /// left to expire on its own. The customer id is checked before either
    /// request goes out.
    #[instrument(skip(self, processor_token))]
    pub async fn add_funding_source_with_authorization(
        &self,
        customer_id: &str,
        processor_token: &str,
        bank_name: &str,
    ) -> Result<String> {
        let result = async {
            checked_id("customer", customer_id)?;
            let links = self.create_on_demand_authorization().await?;
            let funding_source = NewFundingSource::new(bank_name, processor_token).with_links(links);
            self.create_funding_source(customer_id, &funding_source).await
        }
        .await;

        result.inspect_err(|err| error!(error = %err, "Adding a funding source failed"))
    }

    async fn post_for_location(&self, path: &str, body: Value) -> Result<String> {
        let response = self.transport.post(path, Some(body)).await?;
        let location = response.location.ok_or_else(|| {
            RemoteError::UnexpectedResponse(format!("no location header in response to {path}"))
        })?;
        info!(%location, "created {path}");
        Ok(location)
    }

    async fn request_authorization_links(&self) -> Result<Links> {
        let response = self.transport.post("on-demand-authorizations", None).await?;
        let links = response.body.get("_links").cloned().ok_or_else(|| {
            RemoteError::UnexpectedResponse("authorization response has no _links".to_string())
        })?;
        let links = serde_json::from_value(links)
            .map_err(|e| RemoteError::UnexpectedResponse(format!("malformed _links: {e}")))?;
        Ok(links)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| GatewayError::ValidationError(format!("Unserializable request: {e}")))
}

/// Logs a failed operation, including the vendor's per-field errors verbatim.
fn log_failure(operation: &str, err: &GatewayError) {
    if let Some(errors) = err.as_remote().and_then(RemoteError::embedded_errors) {
        error!(errors = %errors, "{operation} failed with error details");
    }
    error!(error = %err, "{operation} failed");
}
