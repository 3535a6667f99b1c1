#![allow(dead_code)]

use card_checkout::application::place_order::PlaceOrderService;
use card_checkout::domain::money::CurrencyCode;
use card_checkout::domain::order::{BillingAddress, Quote};
use card_checkout::infrastructure::in_memory::InMemoryOrderStore;
use card_checkout::infrastructure::scripted_gateway::ScriptedGateway;
use card_checkout::infrastructure::static_config::StaticConfig;
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const CARD: &str = "checkoutcom_card_payment";
pub const VAULT: &str = "checkoutcom_vault";

pub fn quote(id: u64, method: &str, grand_total: Decimal) -> Quote {
    Quote {
        id,
        customer_id: Some(42),
        grand_total,
        currency_code: CurrencyCode::new("EUR").unwrap(),
        payment_method: Some(method.to_string()),
        billing_address: BillingAddress {
            firstname: Some("Grace".to_string()),
            lastname: Some("Hopper".to_string()),
        },
    }
}

/// The orchestrator wired to in-memory collaborators. The store and gateway
/// handles share state with the ones inside the service.
pub struct Harness {
    pub service: PlaceOrderService,
    pub orders: InMemoryOrderStore,
    pub gateway: ScriptedGateway,
}

pub fn harness(config: StaticConfig) -> Harness {
    let orders = InMemoryOrderStore::new();
    let gateway = ScriptedGateway::new();
    let service = PlaceOrderService::new(
        Arc::new(config),
        Box::new(orders.clone()),
        Box::new(orders.clone()),
        Box::new(gateway.clone()),
    );
    Harness {
        service,
        orders,
        gateway,
    }
}

pub fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}
