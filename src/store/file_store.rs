//! Loose object store laid out the way git lays out `.git/objects`
//!
//! Layout:
//! ```text
//! <root>/.git/objects/
//!   ce/                                          first byte of the id
//!     013625030ba8dba906f756967f9e9ca394464a     remaining 19 bytes
//! ```
//!
//! Each file holds the zlib-deflated encoded object. Files are written to a
//! temporary name in the shard directory and renamed into place, so a reader
//! sees either the whole object or nothing.

use crate::codec;
use crate::model::{Blob, EncodedObject, Object, ObjectId};
use crate::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A content-addressed object store rooted at a working directory
#[derive(Clone, Debug)]
pub struct ObjectStore {
    /// Directory containing `.git`
    root: PathBuf,
    /// `<root>/.git/objects`
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the store under `root`. Nothing is touched on disk until the
    /// first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let objects_dir = root.join(".git").join("objects");
        ObjectStore { root, objects_dir }
    }

    /// Get the root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Path the object named `id` lives at
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.objects_dir.join(id.shard()).join(id.file_name())
    }

    /// Check if an object file exists. The contents are not verified.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.object_path(id).is_file()
    }

    /// Store an object, returns its id
    ///
    /// Writing the same content twice rewrites the same path with the same
    /// bytes.
    pub fn put<O: Object + ?Sized>(&self, object: &O) -> Result<ObjectId> {
        let encoded = object.encode();
        let id = encoded.id();

        let dir = self.objects_dir.join(id.shard());
        fs::create_dir_all(&dir).map_err(|source| Error::DirectoryCreateFailed {
            path: dir.clone(),
            source,
        })?;

        let compressed = codec::compress(&encoded)?;
        let path = dir.join(id.file_name());
        write_atomic(&dir, &path, &compressed).map_err(|source| Error::WriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!(
            id = %id,
            kind = %object.kind(),
            size = object.content().len(),
            compressed = compressed.len(),
            path = %path.display(),
            "stored object"
        );
        Ok(id)
    }

    /// Store raw content as a blob
    pub fn put_blob(&self, content: &[u8]) -> Result<ObjectId> {
        self.put(&Blob::new(content))
    }

    /// Retrieve the encoded object named `id`, verifying that its bytes hash
    /// back to `id`
    pub fn get(&self, id: &ObjectId) -> Result<EncodedObject> {
        let path = self.object_path(id);

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::NotFound(*id)),
            Err(source) => return Err(Error::ReadFailed { path, source }),
        };

        let encoded = codec::decompress(&data).map_err(|source| {
            warn!(id = %id, path = %path.display(), error = %source, "object failed to inflate");
            Error::DecompressFailed { id: *id, source }
        })?;

        let computed = encoded.id();
        if computed != *id {
            warn!(id = %id, computed = %computed, path = %path.display(), "object failed integrity check");
            return Err(Error::IntegrityMismatch {
                expected: *id,
                computed,
            });
        }

        debug!(id = %id, size = encoded.len(), "read object");
        Ok(encoded)
    }

    /// Retrieve and decode a blob
    pub fn get_blob(&self, id: &ObjectId) -> Result<Blob> {
        let encoded = self.get(id)?;
        Blob::decode(&encoded).map_err(|source| Error::CorruptObject { id: *id, source })
    }
}

/// Write `data` to a temporary file in `dir`, then rename it onto `path`
fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix("tmp_obj_")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
