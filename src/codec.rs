//! Canonical object encoding, naming and compression
//!
//! Encoded form:
//! ```text
//! <kind> SP <decimal length> NUL <payload>
//! ```
//!
//! The id of an object is the SHA-1 of its encoded form, and the stored file
//! is the encoded form deflated with zlib at level 1. No I/O happens here.

use crate::error::DecodeError;
use crate::model::{EncodedObject, ObjectId, ObjectKind};
use crate::{Error, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Compression level used for every stored object, matching git's loose
/// objects written with `core.compression=1`.
pub const COMPRESSION: Compression = Compression::fast();

/// Build the canonical encoding of `content` as an object of `kind`
pub fn encode(kind: ObjectKind, content: &[u8]) -> EncodedObject {
    let header = format!("{} {}\0", kind, content.len());
    let mut bytes = Vec::with_capacity(header.len() + content.len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(content);
    EncodedObject::from_raw(bytes)
}

/// Compute the identifier of an encoded object
pub fn identify(encoded: &EncodedObject) -> ObjectId {
    ObjectId::digest(encoded.as_bytes())
}

/// Validate an encoded blob and return its payload
///
/// The header ends at the first NUL; the payload may itself contain NUL
/// bytes. The declared length must match the payload exactly.
pub fn decode(encoded: &[u8]) -> std::result::Result<&[u8], DecodeError> {
    let nul = encoded
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::MalformedSeparator)?;
    let (header, payload) = (&encoded[..nul], &encoded[nul + 1..]);

    let mut fields = header.split(|&b| b == b' ');
    let (tag, len) = match (fields.next(), fields.next(), fields.next()) {
        (Some(tag), Some(len), None) => (tag, len),
        _ => return Err(DecodeError::MalformedHeader),
    };

    ObjectKind::from_tag(tag)
        .ok_or_else(|| DecodeError::UnsupportedKind(String::from_utf8_lossy(tag).into_owned()))?;

    let declared = parse_length(len)?;
    if declared != payload.len() {
        return Err(DecodeError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(payload)
}

/// Parse the length field. Only the form `encode` produces is accepted:
/// plain ASCII digits, no sign, no leading zeros.
fn parse_length(field: &[u8]) -> std::result::Result<usize, DecodeError> {
    let invalid = || DecodeError::InvalidLength(String::from_utf8_lossy(field).into_owned());

    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    if field.len() > 1 && field[0] == b'0' {
        return Err(invalid());
    }

    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(invalid)
}

/// Deflate an encoded object for storage
pub fn compress(encoded: &EncodedObject) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(encoded.len() / 2 + 16), COMPRESSION);
    encoder.write_all(encoded.as_bytes()).map_err(Error::Compress)?;
    encoder.finish().map_err(Error::Compress)
}

/// Inflate stored bytes back into an encoded object
///
/// The zlib stream must span the whole input; trailing bytes are rejected
/// as git does.
pub fn decompress(data: &[u8]) -> std::io::Result<EncodedObject> {
    let mut decoder = ZlibDecoder::new(data);
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;

    let consumed = decoder.total_in();
    if consumed != data.len() as u64 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "garbage at end of object: {} trailing bytes",
                data.len() as u64 - consumed
            ),
        ));
    }
    Ok(EncodedObject::from_raw(bytes))
}
