pub mod gemini;

pub use gemini::Gemini;

#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::{
    config::BackendConfig,
    models::{ArcEventTx, TutorPrompt},
};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// A streaming completion service. `get_completion` issues exactly one
/// request and pushes the response fragments, in arrival order, into
/// `event_tx`. The fragment sequence is finite and forward-only; an `Err`
/// return means the transport failed after the stream started and no
/// further fragments will arrive.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Backend {
    fn name(&self) -> &str;
    async fn get_completion(&self, prompt: TutorPrompt, event_tx: ArcEventTx) -> Result<()>;
}

pub type ArcBackend = Arc<dyn Backend + Send + Sync>;

pub fn new_backend(config: &BackendConfig) -> Result<ArcBackend> {
    let gemini: Gemini = config.into();
    Ok(Arc::new(gemini))
}
