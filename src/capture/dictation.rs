#[cfg(test)]
#[path = "dictation_test.rs"]
mod tests;

use tokio::process::Command;

use crate::config::CaptureConfig;

/// Runs an external speech-to-text command and takes its stdout as the
/// finalized transcript. Failures are swallowed: the adapter simply
/// returns to idle with no transcript.
#[derive(Debug, Clone, Default)]
pub struct Dictation {
    command: Option<String>,
    locale: String,
}

impl Dictation {
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = Some(command.to_string());
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    pub fn configured(&self) -> bool {
        self.command.is_some()
    }

    /// Produces zero-or-one transcript strings.
    pub async fn transcribe(&self) -> Option<String> {
        let command = self.command.as_deref()?;

        let output = match Command::new("sh")
            .arg("-c")
            .arg(command)
            .env("DICTATION_LOCALE", &self.locale)
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                log::debug!("Dictation command failed to start: {}", err);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!("Dictation command exited with {}", output.status);
            return None;
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            None
        } else {
            Some(transcript)
        }
    }
}

impl From<&CaptureConfig> for Dictation {
    fn from(value: &CaptureConfig) -> Self {
        Self {
            command: value.dictation_command.clone(),
            locale: value.locale.clone(),
        }
    }
}
