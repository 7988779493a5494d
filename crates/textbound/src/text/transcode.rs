use crate::error::{BoundaryError, Result};
use crate::locale::Charset;

/// Offset translation table between two encodings of the same text.
///
/// Holds one `(source, target)` pair per character start plus the end of
/// the text, both columns increasing, so lookups are a binary search.
#[derive(Debug, Clone, Default)]
pub struct OffsetMap {
    source: Vec<usize>,
    target: Vec<usize>,
}

impl OffsetMap {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            source: Vec::with_capacity(capacity),
            target: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, source: usize, target: usize) {
        self.source.push(source);
        self.target.push(target);
    }

    /// Translate a source offset that falls on a character boundary.
    pub fn translate(&self, source: usize) -> Option<usize> {
        self.source
            .binary_search(&source)
            .ok()
            .map(|i| self.target[i])
    }

    /// Number of recorded boundaries, including the end of text.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Decode UTF-16 into a `String`, returning the text and a map from UTF-8
/// offsets back to UTF-16 offsets.
///
/// # Errors
/// Returns [`BoundaryError::Encoding`] at the first unpaired surrogate.
pub fn decode_utf16(units: &[u16]) -> Result<(String, OffsetMap)> {
    let mut text = String::with_capacity(units.len());
    let mut map = OffsetMap::with_capacity(units.len() + 1);
    let mut unit_offset = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        let c = decoded.map_err(|_| BoundaryError::Encoding {
            charset: "UTF-16",
            offset: unit_offset,
        })?;
        map.push(text.len(), unit_offset);
        text.push(c);
        unit_offset += c.len_utf16();
    }
    map.push(text.len(), unit_offset);

    Ok((text, map))
}

/// Encode scalar values as UTF-16, returning the units and a map from
/// UTF-16 offsets back to char indices.
pub fn encode_chars_utf16(chars: &[char]) -> (Vec<u16>, OffsetMap) {
    let mut units = Vec::with_capacity(chars.len());
    let mut map = OffsetMap::with_capacity(chars.len() + 1);
    let mut buf = [0u16; 2];

    for (i, c) in chars.iter().enumerate() {
        map.push(units.len(), i);
        units.extend_from_slice(c.encode_utf16(&mut buf));
    }
    map.push(units.len(), chars.len());

    (units, map)
}

/// Widen narrow single-byte text to UTF-16, one unit per byte, so offsets
/// carry over unchanged.
///
/// # Errors
/// Returns [`BoundaryError::Encoding`] for bytes outside US-ASCII under that
/// charset, and for UTF-8 input, which is not a single-byte charset.
pub fn widen_single_byte(bytes: &[u8], charset: Charset) -> Result<Vec<u16>> {
    match charset {
        Charset::Latin1 => Ok(bytes.iter().map(|&b| u16::from(b)).collect()),
        Charset::Ascii => bytes
            .iter()
            .enumerate()
            .map(|(offset, &b)| {
                if b.is_ascii() {
                    Ok(u16::from(b))
                } else {
                    Err(BoundaryError::Encoding {
                        charset: charset.name(),
                        offset,
                    })
                }
            })
            .collect(),
        Charset::Utf8 => Err(BoundaryError::Encoding {
            charset: charset.name(),
            offset: 0,
        }),
    }
}

/// Validate narrow text as UTF-8.
///
/// # Errors
/// Returns [`BoundaryError::Encoding`] pointing at the first invalid byte.
pub fn validate_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| BoundaryError::Encoding {
        charset: Charset::Utf8.name(),
        offset: e.valid_up_to(),
    })
}
