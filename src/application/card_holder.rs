use crate::domain::order::Quote;
use serde::{Deserialize, Serialize};

/// Body of the card holder details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHolderDetails {
    pub card_holder_name: String,
}

/// Builds the card holder name from the quote's billing address.
pub fn card_holder_details(quote: &Quote) -> CardHolderDetails {
    let address = &quote.billing_address;
    CardHolderDetails {
        card_holder_name: format!(
            "{} {}",
            address.firstname.as_deref().unwrap_or_default(),
            address.lastname.as_deref().unwrap_or_default()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::CurrencyCode;
    use crate::domain::order::BillingAddress;
    use rust_decimal_macros::dec;

    fn quote(firstname: Option<&str>, lastname: Option<&str>) -> Quote {
        Quote {
            id: 1,
            customer_id: None,
            grand_total: dec!(1.00),
            currency_code: CurrencyCode::new("USD").unwrap(),
            payment_method: None,
            billing_address: BillingAddress {
                firstname: firstname.map(str::to_string),
                lastname: lastname.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_full_name() {
        let details = card_holder_details(&quote(Some("Ada"), Some("Lovelace")));
        assert_eq!(details.card_holder_name, "Ada Lovelace");
        assert_eq!(
            serde_json::to_string(&details).unwrap(),
            r#"{"card_holder_name":"Ada Lovelace"}"#
        );
    }

    #[test]
    fn test_missing_parts_stay_blank() {
        assert_eq!(
            card_holder_details(&quote(Some("Ada"), None)).card_holder_name,
            "Ada "
        );
        assert_eq!(card_holder_details(&quote(None, None)).card_holder_name, " ");
    }
}
