#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::Arc;

use crate::backend::ArcBackend;
use crate::capture::{self, Camera, Dictation};
use crate::models::{Action, ArcEventTx, Event};
use crate::{error_notice, warn_notice};
use eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs actions dispatched from the UI loop. Every action is handled on
/// its own task so the service never blocks the loop; results come back
/// as events.
pub struct ActionService {
    event_tx: ArcEventTx,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel_token: CancellationToken,
    backend: ArcBackend,
    dictation: Dictation,
    camera: Camera,
}

impl ActionService {
    pub fn new(
        event_tx: ArcEventTx,
        action_rx: mpsc::UnboundedReceiver<Action>,
        backend: ArcBackend,
        dictation: Dictation,
        camera: Camera,
        cancel_token: CancellationToken,
    ) -> ActionService {
        ActionService {
            event_tx,
            action_rx,
            cancel_token,
            backend,
            dictation,
            camera,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    return Ok(());
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else { continue };
                    self.dispatch(action);
                }
            }
        }
    }

    fn dispatch(&self, action: Action) {
        let event_tx = Arc::clone(&self.event_tx);
        match action {
            Action::CompletionRequest(prompt) => {
                let backend = Arc::clone(&self.backend);
                tokio::spawn(async move {
                    if let Err(err) = backend.get_completion(prompt, Arc::clone(&event_tx)).await {
                        log::error!("Completion stream failed: {:?}", err);
                        let _ = event_tx.send(Event::ChatCompletionFailed).await;
                    }
                });
            }

            Action::Dictate => {
                let dictation = self.dictation.clone();
                tokio::spawn(async move {
                    let transcript = dictation.transcribe().await;
                    let _ = event_tx.send(Event::DictationFinished(transcript)).await;
                });
            }

            Action::CameraSnapshot => {
                let camera = self.camera.clone();
                let cancel_token = self.cancel_token.clone();
                tokio::spawn(async move {
                    match camera.snapshot(cancel_token).await {
                        Ok(Some(attachment)) => {
                            let _ = event_tx.send(Event::AttachmentReady(attachment)).await;
                        }
                        Ok(None) => {
                            let _ = event_tx
                                .send(Event::Notice(warn_notice!("No snapshot captured")))
                                .await;
                        }
                        Err(err) => {
                            log::error!("Snapshot failed: {:?}", err);
                            let _ = event_tx
                                .send(Event::Notice(error_notice!(format!(
                                    "Snapshot failed: {}",
                                    err
                                ))))
                                .await;
                        }
                    }
                });
            }

            Action::AttachFile(path) => {
                tokio::spawn(async move {
                    match capture::read_attachment(&path).await {
                        Ok(attachment) => {
                            let _ = event_tx.send(Event::AttachmentReady(attachment)).await;
                        }
                        Err(err) => {
                            log::error!("Failed to attach {}: {:?}", path, err);
                            let _ = event_tx
                                .send(Event::Notice(error_notice!(format!(
                                    "Cannot attach {}: {}",
                                    path, err
                                ))))
                                .await;
                        }
                    }
                });
            }
        }
    }
}
