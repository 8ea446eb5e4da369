//! Per-request temporary archive file.

use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use tempfile::TempPath;

use crate::archive::SnapshotKind;

/// A temporary archive path owned by one request.
///
/// The file name carries the project, kind and a UTC timestamp, followed by
/// a random suffix so concurrent jobs never share a path. The file is
/// removed when the job is finished or dropped.
pub struct ArchiveJob {
    kind: SnapshotKind,
    path: TempPath,
}

impl ArchiveJob {
    /// Reserve a fresh temporary file in `dir`.
    pub fn create(dir: &Path, project: &str, kind: SnapshotKind) -> std::io::Result<Self> {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-{}-{}-", project, kind, stamp))
            .suffix(".tar.gz")
            .tempfile_in(dir)?;

        Ok(Self {
            kind,
            path: file.into_temp_path(),
        })
    }

    pub fn kind(&self) -> SnapshotKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the finished archive and delete the temporary file.
    pub async fn finish(self) -> std::io::Result<Bytes> {
        let read = tokio::fs::read(&self.path).await;
        // Removal is attempted even when the read failed.
        let removed = self.path.close();
        let bytes = read?;
        removed?;
        Ok(Bytes::from(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique_and_named() {
        let dir = tempfile::tempdir().unwrap();
        let a = ArchiveJob::create(dir.path(), "trip", SnapshotKind::Source).unwrap();
        let b = ArchiveJob::create(dir.path(), "trip", SnapshotKind::Source).unwrap();

        assert_ne!(a.path(), b.path());
        let name = a.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("trip-source-"));
        assert!(name.ends_with(".tar.gz"));
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let job = ArchiveJob::create(dir.path(), "trip", SnapshotKind::Build).unwrap();
        let path = job.path().to_path_buf();
        assert!(path.exists());

        drop(job);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_finish_reads_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let job = ArchiveJob::create(dir.path(), "trip", SnapshotKind::Source).unwrap();
        std::fs::write(job.path(), b"archive-bytes").unwrap();
        let path = job.path().to_path_buf();

        let bytes = job.finish().await.unwrap();
        assert_eq!(&bytes[..], b"archive-bytes");
        assert!(!path.exists());
    }
}
