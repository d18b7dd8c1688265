/*!
 * Request-scoped scratch storage for uploaded audio.
 *
 * The audio entry point spools the uploaded bytes to durable-enough storage
 * so the transcriber can read them back, and releases the file on every exit
 * path. The store is a trait so tests can substitute a fake that tracks the
 * spool/release lifecycle.
 */

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// One spooled audio upload, exclusively owned by the request that created it
#[async_trait]
pub trait ScratchAudio: Send + Sync {
    /// Location of the spooled bytes
    fn path(&self) -> &Path;

    /// Read the spooled bytes back
    async fn read(&self) -> std::io::Result<Vec<u8>>;

    /// Delete the backing storage; must be called exactly once
    async fn release(self: Box<Self>) -> std::io::Result<()>;
}

/// Factory for scratch audio files
#[async_trait]
pub trait ScratchStore: Send + Sync {
    /// Write `bytes` to a fresh scratch file carrying `suffix` (e.g. ".wav")
    async fn spool(&self, bytes: &[u8], suffix: &str) -> std::io::Result<Box<dyn ScratchAudio>>;
}

/// Scratch store backed by named temporary files
///
/// Explicit `release` closes and deletes the file; dropping an unreleased
/// handle deletes it too, so the file cannot outlive its request.
pub struct TempFileStore;

struct TempFileAudio {
    file: NamedTempFile,
}

#[async_trait]
impl ScratchStore for TempFileStore {
    async fn spool(&self, bytes: &[u8], suffix: &str) -> std::io::Result<Box<dyn ScratchAudio>> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        file.as_file_mut().write_all(bytes)?;
        file.as_file_mut().flush()?;
        Ok(Box::new(TempFileAudio { file }))
    }
}

#[async_trait]
impl ScratchAudio for TempFileAudio {
    fn path(&self) -> &Path {
        self.file.path()
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.file.path()).await
    }

    async fn release(self: Box<Self>) -> std::io::Result<()> {
        self.file.close()
    }
}
