//! Core data model types for minigit

mod object;
mod oid;

pub use object::{Blob, EncodedObject, Object, ObjectKind};
pub use oid::{ObjectId, OID_HEX_LEN, OID_LEN};
