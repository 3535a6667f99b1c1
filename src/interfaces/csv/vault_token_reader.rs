use crate::domain::vault::VaultToken;
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads stored cards from a CSV export.
///
/// Expected header: `public_hash,customer_id,card_type,last4,expiry_month,expiry_year`.
/// Whitespace around fields is trimmed.
pub struct VaultTokenReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> VaultTokenReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one result per row so a bad row does not stop the rest.
    pub fn tokens(self) -> impl Iterator<Item = Result<VaultToken>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
