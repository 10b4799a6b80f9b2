//! Read-only access to zip archives.
//!
//! Wraps `zip::ZipArchive` so callers deal in entry names and byte buffers
//! and never see the archive library's types.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::domain::{AppError, Result};

/// Name and kind of one archive entry.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// Position in the archive's central directory.
    pub index: usize,
    /// Raw entry name as stored in the archive.
    pub name: String,
    /// Whether the entry is a directory marker.
    pub is_dir: bool,
}

/// Reader over a single zip archive on disk.
pub struct ArchiveReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ArchiveReader {
    /// Opens an archive for reading.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be opened, or an archive error
    /// if it is not a valid zip container.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| AppError::io(format!("Failed to open {}", path.display()), e))?;

        let archive = ZipArchive::new(file).map_err(|e| AppError::archive(path, e))?;

        tracing::debug!(
            archive = %path.display(),
            entries = archive.len(),
            "Opened archive"
        );

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Lists every entry in archive order.
    ///
    /// # Errors
    /// Returns an archive error if an entry header cannot be read.
    pub fn entries(&mut self) -> Result<Vec<EntryInfo>> {
        let mut entries = Vec::with_capacity(self.archive.len());

        for index in 0..self.archive.len() {
            let entry = self
                .archive
                .by_index_raw(index)
                .map_err(|e| AppError::archive(&self.path, e))?;
            entries.push(EntryInfo {
                index,
                name: entry.name().to_string(),
                is_dir: entry.is_dir(),
            });
        }

        Ok(entries)
    }

    /// Reads and decompresses the full contents of one entry.
    ///
    /// # Errors
    /// Returns an archive error if the entry cannot be located or
    /// decompressed.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut entry = self
            .archive
            .by_index(index)
            .map_err(|e| AppError::archive(&self.path, e))?;

        let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut data).map_err(|e| AppError::Archive {
            path: self.path.clone(),
            message: format!("Failed to read entry '{}': {e}", entry.name()),
            source: None,
        })?;

        Ok(data)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for building zip fixtures in tests.

    use std::io::Write;
    use std::path::Path;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Writes a zip at `path` with the given `(name, bytes)` members.
    ///
    /// Names ending in `/` are added as directory entries.
    pub fn make_zip(path: &Path, members: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        for (name, data) in members {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
        }

        writer.finish().unwrap();
    }
}
