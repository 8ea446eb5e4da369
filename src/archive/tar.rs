//! `tar`-backed archiver.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;

use crate::archive::{ArchiveError, ArchiveJob, Archiver, SnapshotKind};
use crate::config::ArchiveConfig;

/// Archives the project tree or its web build by shelling out to `tar`.
#[derive(Debug, Clone)]
pub struct TarArchiver {
    project_root: PathBuf,
    project_name: String,
    temp_dir: PathBuf,
    build_command: Vec<String>,
    build_dir: PathBuf,
    exclude: Vec<String>,
}

impl TarArchiver {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            project_root: PathBuf::from(&config.project_root),
            project_name: config.project_name.clone(),
            temp_dir: config
                .temp_dir
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            build_command: config.build_command.clone(),
            build_dir: PathBuf::from(&config.build_dir),
            exclude: config.exclude.clone(),
        }
    }

    /// Run the web export build inside the project root.
    async fn run_build(&self) -> Result<(), ArchiveError> {
        let (program, args) = self.build_command.split_first().ok_or_else(|| {
            ArchiveError::CommandFailed {
                step: "build",
                status: "not run".into(),
                stderr: "no build command configured".into(),
            }
        })?;

        tracing::info!(command = %self.build_command.join(" "), "Running web build");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.project_root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ArchiveError::Spawn { step: "build", source })?;

        check("build", output)
    }

    /// Write a gzip tar of `dir` into `dest`, skipping `exclude` patterns.
    async fn run_tar(&self, dest: &Path, dir: &Path, exclude: &[String]) -> Result<(), ArchiveError> {
        let mut cmd = Command::new("tar");
        for pattern in exclude {
            cmd.arg(format!("--exclude={}", pattern));
        }
        cmd.arg("-czf")
            .arg(dest)
            .arg("-C")
            .arg(dir)
            .arg(".")
            .kill_on_drop(true);

        let output = cmd
            .output()
            .await
            .map_err(|source| ArchiveError::Spawn { step: "tar", source })?;

        check("tar", output)
    }
}

#[async_trait]
impl Archiver for TarArchiver {
    async fn archive(&self, kind: SnapshotKind) -> Result<Bytes, ArchiveError> {
        let job = ArchiveJob::create(&self.temp_dir, &self.project_name, kind)?;
        tracing::debug!(kind = %kind, path = %job.path().display(), "Archive job created");

        // `job` is dropped (and its file removed) on every early return below.
        match kind {
            SnapshotKind::Source => {
                self.run_tar(job.path(), &self.project_root, &self.exclude).await?;
            }
            SnapshotKind::Build => {
                self.run_build().await?;
                let build_dir = self.project_root.join(&self.build_dir);
                self.run_tar(job.path(), &build_dir, &[]).await?;
            }
        }

        Ok(job.finish().await?)
    }
}

fn check(step: &'static str, output: Output) -> Result<(), ArchiveError> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::error!(step, status = %output.status, stderr = %stderr, "Archive step failed");
    Err(ArchiveError::CommandFailed {
        step,
        status: output.status.to_string(),
        stderr,
    })
}
