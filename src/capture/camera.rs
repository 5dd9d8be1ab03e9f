#[cfg(test)]
#[path = "camera_test.rs"]
mod tests;

use eyre::{Context, Result};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::{capture::file, config::CaptureConfig, models::Attachment};

/// Snapshots a single frame through an external capture command. The
/// command must write an image to the path passed in `$SNAPSHOT_FILE`.
/// The child process and the snapshot file are released on every exit
/// path: success, cancellation or error.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    command: Option<String>,
}

impl Camera {
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = Some(command.to_string());
        self
    }

    pub fn configured(&self) -> bool {
        self.command.is_some()
    }

    /// Returns `None` when no command is configured or the capture was
    /// cancelled before the command finished.
    pub async fn snapshot(&self, cancel_token: CancellationToken) -> Result<Option<Attachment>> {
        let command = match self.command.as_deref() {
            Some(command) => command,
            None => return Ok(None),
        };

        let path = std::env::temp_dir().join(format!("taxtutor-snap-{}.jpg", uuid::Uuid::new_v4()));

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .env("SNAPSHOT_FILE", &path)
            .kill_on_drop(true)
            .spawn()
            .wrap_err("spawning snapshot command")?;

        let status = tokio::select! {
            _ = cancel_token.cancelled() => {
                let _ = child.kill().await;
                let _ = tokio::fs::remove_file(&path).await;
                return Ok(None);
            }
            status = child.wait() => status.wrap_err("waiting for snapshot command")?,
        };

        if !status.success() {
            let _ = tokio::fs::remove_file(&path).await;
            eyre::bail!("snapshot command exited with {}", status);
        }

        let attachment = file::read_attachment(&path.to_string_lossy()).await;
        let _ = tokio::fs::remove_file(&path).await;
        attachment.map(Some)
    }
}

impl From<&CaptureConfig> for Camera {
    fn from(value: &CaptureConfig) -> Self {
        Self {
            command: value.camera_command.clone(),
        }
    }
}
