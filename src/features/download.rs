use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ClientError;

/// Locally held copy of a filled document. Dropping the slot deletes the file,
/// which releases the download reference.
#[derive(Debug)]
pub struct DownloadSlot {
    file: NamedTempFile,
    size: u64,
}

impl DownloadSlot {
    pub fn create(dir: &Path, bytes: &[u8]) -> Result<Self, ClientError> {
        let mut file = tempfile::Builder::new()
            .prefix("filled_")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            size: bytes.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
