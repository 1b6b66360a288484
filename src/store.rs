use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// A JSON document stamped with a format version.
pub trait Versioned {
    const VERSION: u32;
    fn version(&self) -> u32;
}

/// Load a versioned JSON document.
///
/// A missing file yields `T::default()`. A file with another version is an
/// error. `what` names the document in error messages.
pub fn load<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned + Default + Versioned,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).with_context(|| format!("Failed to open {} at {}", what, path.display()))?;

    let doc: T = serde_json::from_reader(file).with_context(|| format!("Failed to load {}", what))?;

    if doc.version() != T::VERSION {
        anyhow::bail!("Unsupported {} version: {}", what, doc.version());
    }

    Ok(doc)
}

/// Save a JSON document atomically, creating parent directories.
pub fn save<T: Serialize>(path: &Path, doc: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, doc).with_context(|| format!("Failed to serialize {}", what))?;

    file.commit().with_context(|| format!("Failed to save {}", what))?;

    Ok(())
}
