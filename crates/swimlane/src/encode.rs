//! Encoding of diagram descriptions into rendering-service tokens.
//!
//! The rendering service expects a headerless deflate stream written in its
//! own 64-symbol alphabet. The text is compressed with zlib, the 2-byte zlib
//! header and 4-byte Adler-32 trailer are cut off, and the remaining bytes
//! are packed 3 bytes to 4 symbols. A trailing partial group is padded with
//! zero bytes and still yields 4 symbols.

use std::io::{Read as _, Write as _};

use flate2::{Compression, read::DeflateDecoder, write::ZlibEncoder};
use log::debug;

use crate::{config::RenderConfig, error::EncodingError};

/// Symbol for each 6-bit value.
const ALPHABET: [u8; 64] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

const ZLIB_HEADER_LEN: usize = 2;
const ZLIB_TRAILER_LEN: usize = 4;

/// Marks bytes outside [`ALPHABET`] in [`SYMBOL_VALUES`].
const NO_SYMBOL: u8 = u8::MAX;

/// 6-bit value of each byte, derived from [`ALPHABET`].
const SYMBOL_VALUES: [u8; 256] = {
    let mut table = [NO_SYMBOL; 256];
    let mut value = 0;
    while value < ALPHABET.len() {
        table[ALPHABET[value] as usize] = value as u8;
        value += 1;
    }
    table
};

/// Maps a symbol back to its 6-bit value.
fn symbol_value(symbol: u8) -> Option<u8> {
    match SYMBOL_VALUES[usize::from(symbol)] {
        NO_SYMBOL => None,
        value => Some(value),
    }
}

/// Encodes a diagram description into a URL-safe token.
///
/// # Errors
///
/// Returns [`EncodingError`] if compression fails or produces fewer bytes
/// than the zlib framing it must strip.
///
/// # Examples
///
/// ```
/// # use swimlane::encode::{decode, encode};
/// let token = encode("@startuml\nstop\n@enduml").unwrap();
/// assert!(token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
/// assert_eq!(decode(&token).unwrap(), "@startuml\nstop\n@enduml");
/// ```
pub fn encode(diagram: &str) -> Result<String, EncodingError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(diagram.as_bytes())
        .map_err(EncodingError::Compress)?;
    let zlib = encoder.finish().map_err(EncodingError::Compress)?;

    if zlib.len() < ZLIB_HEADER_LEN + ZLIB_TRAILER_LEN {
        return Err(EncodingError::Truncated(zlib.len()));
    }
    let deflated = &zlib[ZLIB_HEADER_LEN..zlib.len() - ZLIB_TRAILER_LEN];

    let token = pack(deflated);

    debug!(text_len = diagram.len(), deflated_len = deflated.len(), token_len = token.len(); "Diagram encoded");
    Ok(token)
}

/// Packs bytes 3 to 4 symbols, zero-padding a trailing partial group.
fn pack(bytes: &[u8]) -> String {
    let mut token = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);

        let values = [
            b1 >> 2,
            ((b1 & 0x3) << 4) | (b2 >> 4),
            ((b2 & 0xF) << 2) | (b3 >> 6),
            b3 & 0x3F,
        ];
        token.extend(values.iter().map(|&v| char::from(ALPHABET[usize::from(v)])));
    }
    token
}

/// Decodes a token produced by [`encode`] back into the diagram text.
///
/// Zero bytes introduced by padding are ignored since the deflate stream
/// marks its own end.
///
/// # Errors
///
/// Returns [`EncodingError`] for a symbol outside the alphabet, a stream
/// that does not inflate, or inflated bytes that are not UTF-8.
pub fn decode(token: &str) -> Result<String, EncodingError> {
    let values = token
        .bytes()
        .enumerate()
        .map(|(position, symbol)| {
            symbol_value(symbol).ok_or_else(|| EncodingError::InvalidSymbol {
                symbol: char::from(symbol),
                position,
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let mut deflated = Vec::with_capacity(values.len() / 4 * 3);
    for group in values.chunks(4) {
        let c1 = group[0];
        let c2 = group.get(1).copied().unwrap_or(0);
        let c3 = group.get(2).copied().unwrap_or(0);
        let c4 = group.get(3).copied().unwrap_or(0);

        deflated.push((c1 << 2) | (c2 >> 4));
        deflated.push(((c2 & 0xF) << 4) | (c3 >> 2));
        deflated.push(((c3 & 0x3) << 6) | c4);
    }

    let mut inflated = Vec::new();
    DeflateDecoder::new(deflated.as_slice())
        .read_to_end(&mut inflated)
        .map_err(EncodingError::Decompress)?;

    Ok(String::from_utf8(inflated)?)
}

/// Builds rendering-service URLs for diagram descriptions.
///
/// The URL has the form `<service>/<format>/<token>`. Building it is the
/// whole job; no request is made.
#[derive(Debug, Clone)]
pub struct DiagramEncoder {
    service_url: String,
    format: String,
}

impl DiagramEncoder {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            service_url: config.service_url().to_string(),
            format: config.format().to_string(),
        }
    }

    /// Encodes `diagram` into a token. See [`encode`].
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] if compression fails.
    pub fn encode(&self, diagram: &str) -> Result<String, EncodingError> {
        encode(diagram)
    }

    /// Builds the rendering URL for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] if compression fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane::{encode::DiagramEncoder, config::RenderConfig};
    /// let encoder = DiagramEncoder::new(&RenderConfig::default());
    /// let url = encoder.render_url("@startuml\nstop\n@enduml").unwrap();
    /// assert!(url.starts_with("https://www.plantuml.com/plantuml/svg/"));
    /// ```
    pub fn render_url(&self, diagram: &str) -> Result<String, EncodingError> {
        let token = self.encode(diagram)?;
        Ok(format!("{}/{}/{token}", self.service_url, self.format))
    }
}

impl Default for DiagramEncoder {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::config::RenderFormat;

    #[test]
    fn test_alphabet_order() {
        assert_eq!(ALPHABET[0], b'0');
        assert_eq!(ALPHABET[10], b'A');
        assert_eq!(ALPHABET[36], b'a');
        assert_eq!(ALPHABET[62], b'-');
        assert_eq!(ALPHABET[63], b'_');

        for (value, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_value(symbol), Some(value as u8));
        }
    }

    #[test]
    fn test_token_length_is_multiple_of_four() {
        for text in ["", "a", "@startuml\nstop\n@enduml", "|Customer|\n:refund request;"] {
            let token = encode(text).unwrap();
            assert_eq!(token.len() % 4, 0, "token for {text:?}");
        }
    }

    #[test]
    fn test_round_trip_unicode() {
        let text = "@startuml\n|Kundenservice|\n:prüfen ✓;\nstop\n@enduml";
        assert_eq!(decode(&encode(text).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let text = "@startuml\n|Agent|\n:review;\nstop\n@enduml";
        assert_eq!(encode(text).unwrap(), encode(text).unwrap());
    }

    #[test]
    fn test_decode_rejects_foreign_symbol() {
        let err = decode("SyfF?").unwrap_err();
        assert!(matches!(
            err,
            EncodingError::InvalidSymbol {
                symbol: '?',
                position: 4
            }
        ));
    }

    #[test]
    fn test_symbol_table_covers_only_alphabet() {
        let known = (0..=u8::MAX).filter(|&b| symbol_value(b).is_some()).count();
        assert_eq!(known, ALPHABET.len());
        assert_eq!(symbol_value(b'+'), None);
        assert_eq!(symbol_value(b'/'), None);
    }

    #[test]
    fn test_decode_rejects_invalid_stream() {
        // First byte 0xFF: final block with the reserved block type 3
        let err = decode("_____").unwrap_err();
        assert!(matches!(err, EncodingError::Decompress(_)), "{err:?}");
    }

    #[test]
    fn test_decode_rejects_non_utf8_content() {
        let mut compressed = ZlibEncoder::new(Vec::new(), Compression::default());
        compressed.write_all(&[0xFF, 0xFE, 0x80]).unwrap();
        let zlib = compressed.finish().unwrap();
        let token = pack(&zlib[ZLIB_HEADER_LEN..zlib.len() - ZLIB_TRAILER_LEN]);

        let err = decode(&token).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidUtf8(_)), "{err:?}");
    }

    #[test]
    fn test_render_url_uses_config() {
        let config = RenderConfig::new("http://localhost:8080/", RenderFormat::Png);
        let encoder = DiagramEncoder::new(&config);

        let url = encoder.render_url("@startuml\nstop\n@enduml").unwrap();
        let token = encode("@startuml\nstop\n@enduml").unwrap();
        assert_eq!(url, format!("http://localhost:8080/png/{token}"));
    }
}
