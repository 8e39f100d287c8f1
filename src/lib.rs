pub mod api;
pub mod core;
pub mod shared;

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::AppHandle;
use crate::core::clipboard::SystemClipboard;
use crate::core::context::WhatlangDetector;
use crate::core::controller::{Controller, Services};
use crate::core::features::translator::GoogleTranslateClient;
use crate::core::network::TcpProbe;
use crate::core::state::Configuration;
use crate::shared::emit::EventEmitter;
use crate::shared::error::AppResult;
use crate::shared::settings::AppSettings;

/// Options that only affect the console front end
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print events as JSON lines
    pub json: bool,
}

/// Wire the pipeline to the system clipboard and run until `quit`
pub async fn run(settings: AppSettings, options: RunOptions) -> AppResult<()> {
    settings.validate()?;

    let config = Configuration::new(settings.target_language()?, settings.preferences.auto_copy);
    let services = Services {
        clipboard: Box::new(SystemClipboard::new()),
        detector: Arc::new(WhatlangDetector::new(settings.preferences.min_detection_confidence)),
        translator: Arc::new(GoogleTranslateClient::new(&settings.translation)?),
        probe: Arc::new(TcpProbe::from_settings(&settings.connectivity)),
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let controller = Controller::new(config, &settings.monitor, services, EventEmitter::new(event_tx));
    let handle = AppHandle::new(controller.sender());

    let console = tokio::spawn(api::commands::console::run(handle, event_rx, options.json));
    println!("✅ Clipboard monitoring started ({})", api::commands::console::USAGE);

    controller.run().await;

    // The event stream closes once the controller is dropped
    if let Err(e) = console.await {
        log::warn!("[Console] Task ended abnormally: {}", e);
    }
    Ok(())
}
