//! Order Data

use uuid::Uuid;

/// Details supplied when placing an order from the current cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub address_uuid: Option<Uuid>,
    pub payment_intent_id: Option<String>,
}
