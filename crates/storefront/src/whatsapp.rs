//! WhatsApp deep-link construction.

use url::Url;

/// Build a `wa.me` link that opens a chat with `number` and the message
/// prefilled. The number must already be in international format without
/// the leading plus.
///
/// # Errors
///
/// Returns a [`url::ParseError`] if the number produces an invalid URL.
pub fn chat_link(number: &str, message: &str) -> Result<Url, url::ParseError> {
    let encoded = urlencoding::encode(message);
    Url::parse(&format!("https://wa.me/{number}?text={encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_link_encodes_message() {
        let url = chat_link("6283120940458", "Halo SuperMart! Saya ingin memesan").expect("url");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/6283120940458");
        let query = url.query().expect("query");
        assert!(query.starts_with("text="));
        assert!(!query.contains(' '));
        assert!(query.contains("Halo%20SuperMart%21"));
    }

    #[test]
    fn test_chat_link_roundtrips_newlines() {
        let url = chat_link("6283120940458", "line one\nline two").expect("url");
        let (_, text) = url.query_pairs().next().expect("text pair");
        assert_eq!(text, "line one\nline two");
    }
}
