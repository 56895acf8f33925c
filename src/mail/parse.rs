use mail_parser::{HeaderValue, Message, MessageParser};

/// Parse a raw message read from stdin. Garbage that mail-parser rejects is
/// treated as a message with no headers.
pub fn read_message(raw: &[u8]) -> Option<Message<'_>> {
    MessageParser::default().parse(raw)
}

/// Split one header value into `(address, display name)`.
///
/// Total over malformed input: an absent or empty header yields
/// `(None, "")`, and encoded words that fail to decode degrade to
/// replacement characters or the raw token inside mail-parser rather than
/// surfacing an error here. Only the first mailbox of a list or group is
/// used; a header with no address part yields `None` so the caller can skip
/// it.
pub fn parse_address(value: Option<&HeaderValue>) -> (Option<String>, String) {
    let Some(value) = value else {
        return (None, String::new());
    };

    match value {
        HeaderValue::Address(address) => match address.first() {
            Some(addr) => {
                let name = addr
                    .name
                    .as_ref()
                    .map(|n| n.trim().to_string())
                    .unwrap_or_default();
                let address = addr.address.as_ref().map(|a| a.to_string());
                (address, name)
            }
            None => (None, String::new()),
        },
        // From/To/Cc/Bcc normally parse as addresses; free text shows up for
        // values mail-parser could not make sense of
        HeaderValue::Text(text) => split_name_addr(text),
        HeaderValue::TextList(list) => {
            let joined = list
                .iter()
                .map(|t| t.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            split_name_addr(&joined)
        }
        _ => (None, String::new()),
    }
}

/// Best-effort `"display name" <address>` split for free-text values.
fn split_name_addr(text: &str) -> (Option<String>, String) {
    let text = text.trim();
    if text.is_empty() {
        return (None, String::new());
    }

    if let (Some(start), Some(end)) = (text.rfind('<'), text.rfind('>')) {
        if start < end {
            let address = text[start + 1..end].trim();
            let name = text[..start].trim().trim_matches('"').trim();
            if !address.is_empty() {
                return (Some(address.to_string()), name.to_string());
            }
            return (None, name.to_string());
        }
    }

    if text.contains('@') {
        (Some(text.to_string()), String::new())
    } else {
        (None, text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(raw: &[u8], name: &str) -> (Option<String>, String) {
        let message = read_message(raw);
        parse_address(message.as_ref().and_then(|m| m.header(name)))
    }

    #[test]
    fn absent_header_yields_nothing() {
        assert_eq!(parse_address(None), (None, String::new()));
        assert_eq!(
            header_of(b"From: jane@example.com\r\n\r\nbody\r\n", "Cc"),
            (None, String::new())
        );
    }

    #[test]
    fn plain_ascii_header() {
        assert_eq!(
            header_of(b"From: Jane Doe <jane@example.com>\r\n\r\nbody\r\n", "From"),
            (Some("jane@example.com".into()), "Jane Doe".into())
        );
    }

    #[test]
    fn bare_address_has_empty_name() {
        let (address, name) = header_of(b"To: jane@example.com\r\n\r\n", "To");
        assert_eq!(address.as_deref(), Some("jane@example.com"));
        assert!(name.is_empty());
    }

    #[test]
    fn encoded_word_is_decoded() {
        let (address, name) = header_of(
            b"From: =?utf-8?Q?J=C3=BCrgen_M=C3=BCller?= <jm@example.de>\r\n\r\n",
            "From",
        );
        assert_eq!(address.as_deref(), Some("jm@example.de"));
        assert_eq!(name, "J\u{fc}rgen M\u{fc}ller");
    }

    #[test]
    fn undecodable_bytes_do_not_panic() {
        // Latin-1 bytes without an encoded word; the name degrades but the
        // address must still come through
        let (address, name) = header_of(b"From: J\xf8rn <jorn@example.no>\r\n\r\n", "From");
        assert_eq!(address.as_deref(), Some("jorn@example.no"));
        assert!(!name.is_empty());
    }

    #[test]
    fn unknown_charset_degrades_to_best_effort() {
        let (address, _name) = header_of(
            b"From: =?x-no-such-charset?Q?Bj=9Brn?= <b@example.no>\r\n\r\n",
            "From",
        );
        assert_eq!(address.as_deref(), Some("b@example.no"));
    }

    #[test]
    fn first_mailbox_of_a_list_wins() {
        let (address, name) = header_of(
            b"To: Ann <ann@example.com>, Bob <bob@example.com>\r\n\r\n",
            "To",
        );
        assert_eq!(address.as_deref(), Some("ann@example.com"));
        assert_eq!(name, "Ann");
    }

    #[test]
    fn free_text_split_handles_common_shapes() {
        assert_eq!(
            split_name_addr("\"Jane Doe\" <jane@example.com>"),
            (Some("jane@example.com".into()), "Jane Doe".into())
        );
        assert_eq!(
            split_name_addr("jane@example.com"),
            (Some("jane@example.com".into()), String::new())
        );
        assert_eq!(split_name_addr("undisclosed"), (None, "undisclosed".into()));
        assert_eq!(split_name_addr("  "), (None, String::new()));
    }
}
