//! Application layer: the operations callers actually invoke.
//!
//! `PaymentsGateway` shapes and issues requests to the payments network, and
//! `IdentityClientFactory` hands out session- or administrator-scoped clients
//! for the identity platform. Both reach the outside world only through the
//! ports in `domain::ports`.

pub mod capabilities;
pub mod identity;
pub mod payments;
