//! Object kinds and the capability set every storable object provides

use super::ObjectId;
use crate::codec;
use std::fmt;

/// Type tag written at the start of an object header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Opaque file contents
    Blob,
}

impl ObjectKind {
    /// The tag as it appears in the header
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
        }
    }

    /// Parse a header tag. Only kinds this store can hold are recognised.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"blob" => Some(ObjectKind::Blob),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical byte form of an object: `<kind> <len>\0<content>`
///
/// This is the only value that is ever hashed, compressed, or written.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedObject(Vec<u8>);

impl EncodedObject {
    /// Wrap bytes that are already in canonical form, e.g. freshly inflated
    /// from disk. Nothing is validated here; see [`codec::decode`].
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        EncodedObject(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifier of these bytes
    pub fn id(&self) -> ObjectId {
        codec::identify(self)
    }
}

impl AsRef<[u8]> for EncodedObject {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for EncodedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedObject({} bytes)", self.0.len())
    }
}

/// Anything that can be named and persisted in the object store.
///
/// Implementors only supply their kind and payload; encoding, naming and
/// compression are derived from those and are identical for every kind.
pub trait Object {
    /// Header tag of this object
    fn kind(&self) -> ObjectKind;

    /// Payload bytes, before encoding
    fn content(&self) -> &[u8];

    /// Canonical encoded bytes
    fn encode(&self) -> EncodedObject {
        codec::encode(self.kind(), self.content())
    }

    /// Content-derived identifier
    fn id(&self) -> ObjectId {
        codec::identify(&self.encode())
    }

    /// Encoded bytes, zlib-compressed for storage
    fn compress(&self) -> crate::Result<Vec<u8>> {
        codec::compress(&self.encode())
    }
}

/// A blob is an opaque byte payload, typically a file's contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    /// Create a new blob
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Blob { data: data.into() }
    }

    /// Recover a blob from its canonical encoding
    pub fn decode(encoded: &EncodedObject) -> Result<Self, crate::DecodeError> {
        codec::decode(encoded.as_bytes()).map(Blob::new)
    }

    /// Get the size of the payload
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn into_content(self) -> Vec<u8> {
        self.data
    }
}

impl Object for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }

    fn content(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_encoding() {
        let blob = Blob::new("hello\n");
        let encoded = blob.encode();

        assert_eq!(encoded.as_bytes(), b"blob 6\0hello\n");
        assert_eq!(encoded.len(), 13);
    }

    #[test]
    fn test_blob_id_matches_git() {
        let blob = Blob::new("hello\n");
        assert_eq!(
            blob.id().to_hex(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }

    #[test]
    fn test_empty_blob_id_matches_git() {
        let blob = Blob::new(Vec::new());
        assert_eq!(blob.encode().as_bytes(), b"blob 0\0");
        assert_eq!(
            blob.id().to_hex(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn test_blob_decode_roundtrip() {
        let original = Blob::new(b"a\0b\0c".to_vec());
        let restored = Blob::decode(&original.encode()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ObjectKind::from_tag(b"blob"), Some(ObjectKind::Blob));
        assert_eq!(ObjectKind::from_tag(b"tree"), None);
        assert_eq!(ObjectKind::Blob.to_string(), "blob");
    }
}
