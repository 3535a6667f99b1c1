use crate::domain::ports::CardRenderer;
use crate::domain::vault::VaultToken;
use std::fmt::Write;

/// Renders a stored card as the radio-button fragment the vault list uses.
#[derive(Debug, Clone)]
pub struct HtmlCardRenderer {
    images_path: String,
}

impl HtmlCardRenderer {
    pub fn new(images_path: impl Into<String>) -> Self {
        Self {
            images_path: images_path.into(),
        }
    }
}

impl CardRenderer for HtmlCardRenderer {
    fn render(&self, token: &VaultToken) -> String {
        let hash = escape(&token.public_hash);
        let icon = scheme_icon(&token.card_type);
        let mut html = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            concat!(
                r#"<div class="cko-vault-card" data-public-hash="{hash}">"#,
                r#"<input type="radio" name="public_hash" id="cko-vault-{hash}" value="{hash}"/>"#,
                r#"<label for="cko-vault-{hash}">"#,
                r#"<img src="{images}/{icon}.svg" alt="{alt}"/>"#,
                r#"<span class="cko-card-number">{number}</span>"#,
                r#"<span class="cko-card-expiry">{expiry}</span>"#,
                "</label></div>"
            ),
            hash = hash,
            images = escape(&self.images_path),
            icon = icon,
            alt = escape(&token.card_type),
            number = escape(&token.masked_number()),
            expiry = escape(&token.expiry()),
        );
        html
    }
}

/// Maps the vault's card type code to an icon name.
fn scheme_icon(card_type: &str) -> String {
    match card_type.to_ascii_uppercase().as_str() {
        "VI" | "VISA" => "visa".to_string(),
        "MC" | "MASTERCARD" => "mastercard".to_string(),
        "AE" | "AMEX" => "amex".to_string(),
        "DI" | "DISCOVER" => "discover".to_string(),
        "DN" | "DINERS" => "diners".to_string(),
        "JCB" => "jcb".to_string(),
        _ => "card".to_string(),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(hash: &str, card_type: &str) -> VaultToken {
        VaultToken {
            public_hash: hash.to_string(),
            customer_id: 1,
            card_type: card_type.to_string(),
            last4: "4242".to_string(),
            expiry_month: 9,
            expiry_year: 2029,
        }
    }

    #[test]
    fn test_fragment_contains_token_data() {
        let renderer = HtmlCardRenderer::new("/static/images/checkoutcom");
        let html = renderer.render(&token("abc123", "VI"));

        assert!(html.contains(r#"value="abc123""#));
        assert!(html.contains("/static/images/checkoutcom/visa.svg"));
        assert!(html.contains("**** **** **** 4242"));
        assert!(html.contains("09/2029"));
    }

    #[test]
    fn test_fragment_escapes_markup() {
        let renderer = HtmlCardRenderer::new("/img");
        let html = renderer.render(&token("\"><script>", "??"));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains("/img/card.svg"));
    }
}
