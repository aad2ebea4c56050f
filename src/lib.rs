//! # minigit
//!
//! A minimal content-addressed object store that reads and writes git's
//! loose object format.
//!
//! minigit wraps arbitrary bytes into git's canonical blob encoding, names
//! them by the SHA-1 of that encoding, and keeps them zlib-compressed under
//! `<root>/.git/objects`. Every read re-hashes what it found, so a corrupted
//! or misplaced file is reported instead of returned.
//!
//! ## Core Concepts
//!
//! - **Blobs**: opaque byte payloads, the only object kind supported
//! - **Encoded objects**: `"blob <len>\0<content>"`, the bytes that get hashed
//! - **Object ids**: 20-byte SHA-1 digests, rendered as 40 hex chars
//! - **Object store**: ids mapped to files sharded by their first byte
//!
//! ## Example
//!
//! ```no_run
//! use minigit::ObjectStore;
//!
//! let store = ObjectStore::new("/path/to/repo");
//! let id = store.put_blob(b"hello\n")?;
//! assert_eq!(id.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");
//! assert_eq!(store.get_blob(&id)?.into_content(), b"hello\n");
//! # Ok::<(), minigit::Error>(())
//! ```

pub mod codec;
pub mod model;
pub mod store;

mod error;

pub use error::{DecodeError, Error, Result};
pub use model::{Blob, EncodedObject, Object, ObjectId, ObjectKind};
pub use store::{read, read_object, store, ObjectStore};
