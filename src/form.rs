//! `application/x-www-form-urlencoded` body parsing.

use std::borrow::Cow;

/// Decode a single urlencoded component: `+` is a space, `%XX` an escaped
/// byte. Invalid UTF-8 is replaced rather than rejected.
fn decode_component(raw: &[u8]) -> String {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    let decoded: Cow<[u8]> = urlencoding::decode_binary(&spaced);
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Parse a form body into its name/value pairs, in order.
pub fn parse_form(body: &[u8]) -> Vec<(String, String)> {
    body.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(idx) => (&pair[..idx], &pair[idx + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_component(name), decode_component(value))
        })
        .collect()
}

/// Value of the first field called `name`, if present.
pub fn form_field(body: &[u8], name: &str) -> Option<String> {
    parse_form(body)
        .into_iter()
        .find(|(field, _)| field == name)
        .map(|(_, value)| value)
}
