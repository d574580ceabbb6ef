//! Payload file I/O.

use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Permissions for files created by `write_payload` (rw-r--r--).
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Read a whole file into memory.
pub async fn read_payload(path: &Path) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(path).await
}

/// Write `data` to `path`, replacing any existing contents.
///
/// Newly created files get mode 0644 on Unix; existing files keep theirs.
pub async fn write_payload(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(OUTPUT_MODE);

    let mut file = options.open(path).await?;
    file.write_all(data).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.bin");

        write_payload(&path, b"payload").await.unwrap();
        assert_eq!(read_payload(&path).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_write_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, b"a much longer previous payload").unwrap();

        write_payload(&path, b"short").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_new_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");
        write_payload(&path, b"x").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // The process umask can only clear bits.
        assert_eq!(mode & !OUTPUT_MODE, 0);
        assert_ne!(mode & 0o600, 0);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_payload(&dir.path().join("absent")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
