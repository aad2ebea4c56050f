//! Object identifier - a SHA-1 digest over an encoded object

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of an object id in bytes
pub const OID_LEN: usize = 20;

/// Size of an object id rendered as hex
pub const OID_HEX_LEN: usize = OID_LEN * 2;

/// A 20-byte SHA-1 digest naming an object, as git does
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OID_LEN]);

impl ObjectId {
    /// Create an id from raw digest bytes
    pub fn from_bytes(bytes: [u8; OID_LEN]) -> Self {
        ObjectId(bytes)
    }

    /// Hash arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        ObjectId(sha1_smol::Sha1::from(data).digest().bytes())
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; OID_LEN] {
        &self.0
    }

    /// Convert to a 40 character lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex, either case
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        if s.len() != OID_HEX_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; OID_LEN];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(ObjectId(arr))
    }

    /// Name of the shard directory: the first byte as 2 hex chars
    pub fn shard(&self) -> String {
        hex::encode(&self.0[..1])
    }

    /// File name within the shard: the remaining 19 bytes as 38 hex chars
    pub fn file_name(&self) -> String {
        hex::encode(&self.0[1..])
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        ObjectId::from_hex(s).map_err(|_| crate::Error::InvalidObjectId(s.to_string()))
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Serialized as hex so ids read the same in JSON output as on the command line
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = ObjectId::digest(b"blob 6\0hello\n");
        let b = ObjectId::digest(b"blob 6\0hello\n");
        let c = ObjectId::digest(b"blob 6\0world\n");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_known_sha1() {
        // sha1("") is a well known constant
        let id = ObjectId::digest(b"");
        assert_eq!(id.to_hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_hex_parsing_normalises_case() {
        let lower = "ce013625030ba8dba906f756967f9e9ca394464a";
        let upper = lower.to_uppercase();

        let a = ObjectId::from_hex(lower).unwrap();
        let b = ObjectId::from_hex(&upper).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.to_string(), lower);
    }

    #[test]
    fn test_hex_parsing_rejects_bad_input() {
        assert!(ObjectId::from_hex("ce0136").is_err());
        assert!(ObjectId::from_hex("zz013625030ba8dba906f756967f9e9ca394464a").is_err());
        assert!("not-an-id".parse::<ObjectId>().is_err());
    }

    #[test]
    fn test_shard_split() {
        let id: ObjectId = "ce013625030ba8dba906f756967f9e9ca394464a".parse().unwrap();
        assert_eq!(id.shard(), "ce");
        assert_eq!(id.file_name(), "013625030ba8dba906f756967f9e9ca394464a");
        assert_eq!(id.file_name().len(), 38);
        assert_eq!(ObjectId::from_bytes(*id.as_bytes()), id);
    }

    #[test]
    fn test_debug_shows_full_id() {
        let id: ObjectId = "ce013625030ba8dba906f756967f9e9ca394464a".parse().unwrap();
        assert_eq!(
            format!("{:?}", id),
            "ObjectId(ce013625030ba8dba906f756967f9e9ca394464a)"
        );
    }

    #[test]
    fn test_serde_as_hex() {
        let id = ObjectId::digest(b"x");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
