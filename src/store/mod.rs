//! Content-addressed object store
//!
//! Objects are stored by the SHA-1 of their encoded form and compressed
//! with zlib, in the same loose-object layout git uses.

mod file_store;

pub use file_store::ObjectStore;

use crate::model::{EncodedObject, ObjectId};
use crate::Result;
use std::path::Path;

/// Store `content` as a blob under `root`, returns its id
pub fn store(root: impl AsRef<Path>, content: &[u8]) -> Result<ObjectId> {
    ObjectStore::new(root).put_blob(content)
}

/// Read back the verified content of blob `id` from `root`
pub fn read(root: impl AsRef<Path>, id: &ObjectId) -> Result<Vec<u8>> {
    Ok(ObjectStore::new(root).get_blob(id)?.into_content())
}

/// Read the verified encoded object `id` from `root` without decoding it
pub fn read_object(root: impl AsRef<Path>, id: &ObjectId) -> Result<EncodedObject> {
    ObjectStore::new(root).get(id)
}
