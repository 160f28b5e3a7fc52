//! Outbound order links.
//!
//! Checkout is a pre-filled chat message: the order text is percent-encoded
//! into `https://<service>/<phone>?text=<prefix><order text>`.

use url::Url;

use crate::config::OrderConfig;

/// Builds deep links that open a chat with the store pre-filled with an order.
#[derive(Debug, Clone)]
pub struct OrderLink {
    base: String,
    prefix: String,
}

impl OrderLink {
    /// Create a link builder for the configured destination.
    #[must_use]
    pub fn new(config: &OrderConfig) -> Self {
        Self::from_parts(&config.service_url, &config.phone, &config.prefix)
    }

    fn from_parts(service_url: &Url, phone: &str, prefix: &str) -> Self {
        let service = service_url.as_str().trim_end_matches('/');
        Self {
            base: format!("{service}/{phone}"),
            prefix: prefix.to_string(),
        }
    }

    /// The chat URL with no pre-filled text.
    #[must_use]
    pub fn contact_url(&self) -> &str {
        &self.base
    }

    /// The chat URL pre-filled with `order_text`.
    #[must_use]
    pub fn for_order(&self, order_text: &str) -> String {
        let message = format!("{}{}", self.prefix, order_text);
        format!("{}?text={}", self.base, urlencoding::encode(&message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn link(prefix: &str) -> OrderLink {
        OrderLink::from_parts(&Url::parse("https://wa.me").unwrap(), "5491131066937", prefix)
    }

    #[test]
    fn test_contact_url() {
        assert_eq!(link("").contact_url(), "https://wa.me/5491131066937");
    }

    #[test]
    fn test_order_text_is_percent_encoded() {
        let url = link("").for_order("* Soap - $ 1.000,00 (2 unidades)\nTotal: $ 2.000,00");
        assert_eq!(
            url,
            "https://wa.me/5491131066937?text=\
             %2A%20Soap%20-%20%24%201.000%2C00%20%282%20unidades%29%0ATotal%3A%20%24%202.000%2C00"
        );
    }

    #[test]
    fn test_prefix_precedes_order_text() {
        let url = link("QuimicaGr-Pedido:").for_order("Total: $ 0,00");
        assert!(url.starts_with("https://wa.me/5491131066937?text=QuimicaGr-Pedido%3ATotal%3A"));
    }

    #[test]
    fn test_service_url_with_path() {
        let link = OrderLink::from_parts(
            &Url::parse("https://api.whatsapp.com/send/").unwrap(),
            "123",
            "",
        );
        assert_eq!(link.contact_url(), "https://api.whatsapp.com/send/123");
    }
}
