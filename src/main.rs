use std::sync::Arc;

use eyre::Result;
use taxtutor::app::services::{ActionService, EventService};
use taxtutor::app::{App, destruct_terminal_for_panic};
use taxtutor::backend::new_backend;
use taxtutor::capture::{Camera, Dictation};
use taxtutor::cli::Command;
use taxtutor::config::constants::API_KEY_ENV;
use taxtutor::config::{Configuration, init_logger, verbose};
use taxtutor::models::{Action, ArcEventTx};
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    Configuration::init(config)?;
    verbose!("[+] Logger initialized");

    let config = Configuration::instance();

    verbose!("[+] Initializing backend...");
    let backend = new_backend(&config.backend)?;
    verbose!("[+] Added backend: {}", backend.name());
    if config.backend.api_key.is_none() && std::env::var(API_KEY_ENV).is_err() {
        verbose!("[!] No API key configured, requests will be rejected");
    }

    let dictation = Dictation::from(&config.capture);
    let camera = Camera::from(&config.capture);
    if !dictation.configured() {
        verbose!("[!] No dictation command configured");
    }
    if !camera.configured() {
        verbose!("[!] No camera command configured");
    }

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let mut events = EventService::default();
    let token = CancellationToken::new();

    let event_tx: ArcEventTx = Arc::new(events.event_tx());
    let mut action_service = ActionService::new(
        event_tx,
        action_rx,
        backend,
        dictation,
        camera,
        token.clone(),
    );

    let mut task_set = task::JoinSet::new();
    task_set.spawn(async move { action_service.start().await });

    let mut app = App::new(action_tx, &mut events, token.clone());
    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    token.cancel();
    task_set.abort_all();
    while let Some(res) = task_set.join_next().await {
        match res {
            Ok(_) => {}
            Err(err) if err.is_cancelled() => {}
            Err(err) => log::error!("Task error: {}", err),
        }
    }

    Ok(())
}
