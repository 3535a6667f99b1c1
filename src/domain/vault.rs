use serde::{Deserialize, Serialize};

/// A stored, tokenized card belonging to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultToken {
    pub public_hash: String,
    pub customer_id: u32,
    pub card_type: String,
    pub last4: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
}

impl VaultToken {
    /// `MM/YYYY`, as printed on the card.
    pub fn expiry(&self) -> String {
        format!("{:02}/{}", self.expiry_month, self.expiry_year)
    }

    pub fn masked_number(&self) -> String {
        format!("**** **** **** {}", self.last4)
    }
}
