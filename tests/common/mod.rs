#![allow(dead_code)]

use bankbridge::domain::customer::{CustomerType, NewCustomer};
use serde_json::{Map, Value, json};

pub fn sample_customer(state: &str) -> NewCustomer {
    NewCustomer {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        customer_type: CustomerType::Personal,
        address1: "99-99 33rd St".to_string(),
        city: "Some City".to_string(),
        state: state.to_string(),
        postal_code: "11101".to_string(),
        date_of_birth: "1970-01-01".to_string(),
        ssn: "1234".to_string(),
        extra: Map::new(),
    }
}

pub fn sample_customer_json(state: &str) -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "type": "personal",
        "address1": "99-99 33rd St",
        "city": "Some City",
        "state": state,
        "postalCode": "11101",
        "dateOfBirth": "1970-01-01",
        "ssn": "1234"
    })
}

pub const TOKEN_BODY: &str =
    r#"{"access_token":"token-1","token_type":"bearer","expires_in":3600}"#;

pub fn authorization_links() -> Value {
    json!({
        "self": {
            "href": "https://api-sandbox.dwolla.com/on-demand-authorizations/30e7c028-0bdf-e511-80de-0aa34a9b2388",
            "type": "application/vnd.dwolla.v1.hal+json",
            "resource-type": "on-demand-authorization"
        }
    })
}
