//! Translation pipeline controller
//!
//! One task owns all mutable state (configuration, history, watcher,
//! open displays) and processes messages in order. Network work runs in
//! spawned tasks whose results come back as messages, so state is only
//! ever touched from here.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::core::clipboard::{ClipboardBackend, ClipboardWatcher, Poller, SkipReason, WatchDecision};
use crate::core::context::LanguageDetector;
use crate::core::display::{DisplayKind, DisplayRegistry};
use crate::core::features::translator::{route, HistoryStore, Route, TranslationClient};
use crate::core::menu::{render_menu, render_status};
use crate::core::network::ConnectivityProbe;
use crate::core::state::Configuration;
use crate::shared::emit::EventEmitter;
use crate::shared::error::AppResult;
use crate::shared::events::{AppEvent, TranslationReady};
use crate::shared::settings::MonitorSettings;
use crate::shared::types::{preview, Language, TranslationRequest, TranslationResult};

pub const TRANSLATING_MESSAGE: &str = "Translating…";
pub const PROVIDER_FAILURE_MESSAGE: &str = "Translation failed.\nCheck internet.";
pub const NETWORK_FAILURE_MESSAGE: &str = "DNS is broken.\n\nFix:\n• Toggle Wi-Fi\n• Restart Mac\n• Use 8.8.8.8";

/// User-facing commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectLanguage(Language),
    ToggleAutoCopy,
    TogglePause,
    TranslateText(String),
    CopyOriginal(usize),
    CopyTranslation(usize),
    CloseDisplay(Uuid),
    Refresh,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOrigin {
    Clipboard,
    Manual,
}

#[derive(Debug, Clone)]
pub struct Attempt {
    pub origin: AttemptOrigin,
    pub request: TranslationRequest,
}

/// How a pipeline attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    DetectionInconclusive,
    Skipped { detected: String },
    Started,
    Translated,
    Failed,
}

#[derive(Debug, Clone)]
pub enum Message {
    Command(Command),
    Tick,
    TranslationFinished { attempt: Attempt, outcome: AppResult<String> },
    ProbeFinished { reachable: bool },
    DisplayExpired(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// External collaborators of the pipeline
pub struct Services {
    pub clipboard: Box<dyn ClipboardBackend>,
    pub detector: Arc<dyn LanguageDetector>,
    pub translator: Arc<dyn TranslationClient>,
    pub probe: Arc<dyn ConnectivityProbe>,
}

pub struct Controller {
    config: Configuration,
    history: HistoryStore,
    watcher: ClipboardWatcher,
    displays: DisplayRegistry,
    poller: Poller,
    services: Services,
    emitter: EventEmitter,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    read_errors: u32,
}

impl Controller {
    pub fn new(config: Configuration, monitor: &MonitorSettings, services: Services, emitter: EventEmitter) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            history: HistoryStore::new(monitor.history_size),
            watcher: ClipboardWatcher::new(monitor.max_length),
            displays: DisplayRegistry::new(),
            poller: Poller::new(monitor.poll_interval()),
            services,
            emitter,
            tx,
            rx,
            read_errors: 0,
        }
    }

    /// Sender for commands and continuations
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.tx.clone()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Process messages until `Quit`
    pub async fn run(mut self) {
        self.start_monitoring();
        self.emit_menu();
        log::info!(
            "[Controller] Running (target={}, auto_copy={})",
            self.config.target_lang(),
            self.config.auto_copy_enabled()
        );

        while let Some(message) = self.rx.recv().await {
            if self.dispatch(message) == Flow::Exit {
                break;
            }
        }
        log::info!("[Controller] Stopped");
    }

    fn start_monitoring(&mut self) {
        self.poller.start(self.tx.clone(), Message::Tick);
    }

    fn dispatch(&mut self, message: Message) -> Flow {
        match message {
            Message::Tick => self.check_clipboard(),
            Message::Command(command) => return self.handle_command(command),
            Message::TranslationFinished { attempt, outcome } => {
                let outcome = self.finish_translation(attempt, outcome);
                log::debug!("[Controller] Attempt finished: {:?}", outcome);
            }
            Message::ProbeFinished { reachable } => {
                let text = if reachable { PROVIDER_FAILURE_MESSAGE } else { NETWORK_FAILURE_MESSAGE };
                self.show_info(text);
            }
            Message::DisplayExpired(id) => self.close_display(id),
        }
        Flow::Continue
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        log::debug!("[Controller] Command: {:?}", command);
        match command {
            Command::SelectLanguage(lang) => {
                if self.config.select_target(lang) {
                    self.emitter.emit_event(AppEvent::TargetLanguageChanged(lang));
                }
                self.emit_menu();
            }
            Command::ToggleAutoCopy => self.toggle_auto_copy(),
            Command::TogglePause => {
                let paused = self.config.toggle_pause();
                log::info!("[Controller] {}", if paused { "Paused" } else { "Resumed" });
                self.emit_modes();
                self.emit_menu();
            }
            Command::TranslateText(text) => {
                let input = text.trim();
                if !input.is_empty() {
                    self.begin_attempt(input, AttemptOrigin::Manual);
                }
            }
            Command::CopyOriginal(index) => self.copy_from_history(index, |entry| entry.original.clone()),
            Command::CopyTranslation(index) => self.copy_from_history(index, |entry| entry.translated.clone()),
            Command::CloseDisplay(id) => self.close_display(id),
            Command::Refresh => self.refresh(),
            Command::Quit => {
                self.poller.stop();
                self.close_all_displays();
                self.emitter.emit_event(AppEvent::ShuttingDown);
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn read_clipboard(&mut self) -> AppResult<Option<String>> {
        let result = self.services.clipboard.read_text();
        match &result {
            Ok(_) => self.read_errors = 0,
            Err(e) => {
                self.read_errors += 1;
                // Only log errors occasionally to avoid spam
                if self.read_errors == 1 || self.read_errors % 10 == 0 {
                    log::warn!("[ClipboardMonitor] Failed to read clipboard (error #{}): {}", self.read_errors, e);
                }
            }
        }
        result
    }

    fn check_clipboard(&mut self) {
        // A failed read says nothing about the clipboard; keep the last snapshot
        let text = match self.read_clipboard() {
            Ok(text) => text.unwrap_or_default(),
            Err(_) => return,
        };
        match self.watcher.observe(&text, self.config.is_paused()) {
            WatchDecision::Translate(snapshot) => {
                log::info!("[ClipboardMonitor] Detected clipboard change: \"{}\"", preview(&snapshot.text, 20));
                self.begin_attempt(&snapshot.text, AttemptOrigin::Clipboard);
            }
            WatchDecision::Skip(reason @ (SkipReason::InputTooLarge | SkipReason::NoiseMatch)) => {
                log::debug!("[ClipboardMonitor] Ignoring clipboard change: {:?}", reason);
            }
            WatchDecision::Skip(_) => {}
        }
    }

    /// Detect, route, and either skip or start the network call
    fn begin_attempt(&mut self, text: &str, origin: AttemptOrigin) -> AttemptOutcome {
        let detected = match self.services.detector.detect(text) {
            Some(code) => code,
            None => {
                log::debug!("[Controller] Language detection inconclusive");
                return AttemptOutcome::DetectionInconclusive;
            }
        };

        let (source, destination) = match route(&detected, self.config.target_lang()) {
            Route::Skip => {
                log::debug!("[Controller] Already in {}, skipping", detected);
                self.watcher.mark_seen(text);
                return AttemptOutcome::Skipped { detected };
            }
            Route::Translate { source, destination } => (source, destination),
        };

        if origin == AttemptOrigin::Manual {
            self.show_info(TRANSLATING_MESSAGE);
        }

        let attempt = Attempt {
            origin,
            request: TranslationRequest::new(text, source, destination),
        };
        log::info!(
            "[Translator] {} → {}: \"{}\"",
            attempt.request.source_lang,
            attempt.request.target_lang,
            preview(text, 20)
        );

        let translator = Arc::clone(&self.services.translator);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = translator.translate(&attempt.request).await;
            let _ = tx.send(Message::TranslationFinished { attempt, outcome });
        });
        AttemptOutcome::Started
    }

    fn finish_translation(&mut self, attempt: Attempt, outcome: AppResult<String>) -> AttemptOutcome {
        let Attempt { origin, request } = attempt;

        let translated = match outcome {
            Ok(translated) => translated,
            Err(e) => {
                log::warn!("[Translator] Translation failed: {}", e);
                if origin == AttemptOrigin::Clipboard {
                    self.watcher.mark_seen(&request.text);
                }
                let probe = Arc::clone(&self.services.probe);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let reachable = probe.is_reachable().await;
                    let _ = tx.send(Message::ProbeFinished { reachable });
                });
                return AttemptOutcome::Failed;
            }
        };

        if self.config.auto_copy_enabled() {
            match self.services.clipboard.write_text(&translated) {
                Ok(()) => self.watcher.mark_seen(&translated),
                Err(e) => log::warn!("[ClipboardMonitor] Failed to copy translation: {}", e),
            }
            if origin == AttemptOrigin::Clipboard {
                if let Some(lang) = self.config.learn_target(&request.source_lang) {
                    log::info!("[Controller] Target language is now {}", lang);
                    self.emitter.emit_event(AppEvent::TargetLanguageChanged(lang));
                }
            }
        } else if origin == AttemptOrigin::Clipboard {
            self.watcher.mark_seen(&request.text);
        }

        let result = TranslationResult::from_request(&request, translated);
        self.history.record(result.clone());
        self.emitter.emit_event(AppEvent::HistoryChanged(self.history.snapshot()));

        self.show_result(&result, true);
        self.emit_menu();
        AttemptOutcome::Translated
    }

    fn toggle_auto_copy(&mut self) {
        let enabled = self.config.toggle_auto_copy();
        log::info!("[Controller] Auto-copy {}", if enabled { "enabled" } else { "disabled" });
        self.emit_modes();
        self.emit_menu();

        if enabled {
            self.refresh();
            if let Ok(Some(text)) = self.read_clipboard() {
                if self.watcher.fits(&text) {
                    self.watcher.mark_seen(&text);
                    self.begin_attempt(&text, AttemptOrigin::Clipboard);
                }
            }
        }
    }

    fn copy_from_history<F>(&mut self, index: usize, pick: F)
    where
        F: Fn(&TranslationResult) -> String,
    {
        let text = match self.history.get(index) {
            Ok(entry) => pick(entry),
            Err(e) => {
                log::warn!("[History] {}", e);
                return;
            }
        };
        if let Err(e) = self.services.clipboard.write_text(&text) {
            log::warn!("[ClipboardMonitor] Failed to copy history entry: {}", e);
        }
    }

    /// Forget clipboard state, close displays, restart polling
    fn refresh(&mut self) {
        self.watcher.reset();
        self.poller.stop();
        self.close_all_displays();
        self.start_monitoring();
        self.emit_menu();
        log::info!("[Controller] Refreshed");
    }

    fn show_result(&mut self, result: &TranslationResult, show_both: bool) {
        let display_id = self.displays.open(
            DisplayKind::Result { show_both },
            &result.translated,
            &self.tx,
            Message::DisplayExpired,
        );
        self.emitter.emit_event(AppEvent::TranslationReady(TranslationReady {
            display_id,
            original: result.original.clone(),
            translated: result.translated.clone(),
            source_lang: result.source_lang.clone(),
            target_lang: result.target_lang.clone(),
            show_both,
        }));
    }

    fn show_info(&mut self, text: &str) {
        let display_id = self.displays.open(DisplayKind::Info, text, &self.tx, Message::DisplayExpired);
        self.emitter.emit_event(AppEvent::InfoMessage {
            display_id,
            text: text.to_string(),
        });
    }

    fn close_display(&mut self, id: Uuid) {
        if self.displays.close(id) {
            self.emitter.emit_event(AppEvent::DisplayClosed(id));
        }
    }

    fn close_all_displays(&mut self) {
        for id in self.displays.close_all() {
            self.emitter.emit_event(AppEvent::DisplayClosed(id));
        }
    }

    fn emit_modes(&self) {
        self.emitter.emit_event(AppEvent::ModesChanged {
            auto_copy: self.config.auto_copy_enabled(),
            paused: self.config.is_paused(),
        });
    }

    fn emit_menu(&self) {
        self.emitter.emit_event(AppEvent::MenuUpdated {
            menu: render_menu(&self.config, &self.history),
            status: render_status(&self.config),
        });
    }
}
