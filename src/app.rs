//! Core application state and logic.
//!
//! This module contains the main [`App`] struct that owns the connection state
//! machine, the pending AI suggestion, the activity log, and the UI state.
//! Time-dependent entry points have an `_at` variant taking the current
//! instant so they can be driven from tests.

use crate::catalog::{self, ServerLocation, SERVERS};
use crate::config::Settings;
use crate::connection::{ConnectionMachine, ConnectionStatus, Update};
use crate::constants::{
    MAX_LOG_LINES, MSG_BACKEND_INIT, MSG_NO_API_KEY, MSG_READY, TOAST_DURATION,
};
use crate::suggest::{self, CompletionProvider, SuggestError, Suggestion};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::widgets::TableState;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

const MSG_CHANGE_WHILE_ACTIVE: &str = "Disconnect before changing server";

/// Current input mode determining keyboard behavior.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// Searchable server list is open.
    ServerPicker {
        /// Current search text.
        search: String,
    },
    /// AI suggestion prompt is open.
    Suggest {
        /// Request typed so far.
        query: String,
    },
    /// Simulated browser address bar is open.
    Browse {
        /// Destination typed so far.
        url: String,
    },
}

/// Toast notification for temporary messages.
#[derive(Clone, Debug)]
pub struct Toast {
    /// Message to display.
    pub message: String,
    /// When the toast should disappear.
    pub expires: Instant,
}

/// Main application state container.
///
/// # Example
///
/// ```ignore
/// let mut app = App::new(&settings);
/// app.on_tick();
/// ```
#[allow(clippy::struct_excessive_bools)]
pub struct App {
    /// Flag indicating the application should exit.
    pub should_quit: bool,

    // === Connection ===
    /// Simulated connection state machine.
    pub machine: ConnectionMachine,

    // === AI Suggestions ===
    /// A suggestion request is in flight.
    pub is_suggesting: bool,
    /// A suggestion credential is configured.
    pub ai_enabled: bool,

    // === Activity Log ===
    pub logs: Vec<String>,
    pub logs_scroll: u16,
    pub logs_auto_scroll: bool,

    // === UI State ===
    pub input_mode: InputMode,
    pub show_help: bool,
    pub server_list_state: TableState,
    pub toast: Option<Toast>,

    provider: Arc<dyn CompletionProvider + Send + Sync>,
    suggestion_rx: Option<Receiver<Result<Suggestion, SuggestError>>>,
    rng: StdRng,
}

impl App {
    /// Create a new App from runtime settings.
    pub fn new(settings: &Settings) -> Self {
        let client = settings.provider();
        let ai_enabled = client.is_configured();
        let mut app = Self::with_provider(Arc::new(client), StdRng::from_entropy());
        app.ai_enabled = ai_enabled;
        if !ai_enabled {
            app.log(MSG_NO_API_KEY);
        }
        app
    }

    /// Create an App with an explicit completion backend and random source.
    pub fn with_provider(provider: Arc<dyn CompletionProvider + Send + Sync>, rng: StdRng) -> Self {
        let mut app = Self {
            should_quit: false,

            machine: ConnectionMachine::new(catalog::recommended()),

            is_suggesting: false,
            ai_enabled: true,

            logs: Vec::new(),
            logs_scroll: 0,
            logs_auto_scroll: true,

            input_mode: InputMode::Normal,
            show_help: false,
            server_list_state: TableState::default(),
            toast: None,

            provider,
            suggestion_rx: None,
            rng,
        };

        app.log(&format!(
            "INIT: {} v{} starting...",
            crate::constants::APP_NAME,
            crate::constants::APP_VERSION
        ));
        app.log(MSG_BACKEND_INIT);
        app.log(&format!("INFO: {} servers available", SERVERS.len()));
        app.log(MSG_READY);

        app
    }

    /// Add a message to the activity log with a timestamp.
    pub fn log(&mut self, message: &str) {
        let timestamp = crate::utils::format_local_time();
        self.logs.push(format!("{timestamp} {message}"));

        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
        }

        if self.logs_auto_scroll {
            #[allow(clippy::cast_possible_truncation)]
            let scroll = self.logs.len().saturating_sub(1) as u16;
            self.logs_scroll = scroll;
        }
    }

    /// Show a toast notification and log it
    fn show_toast(&mut self, message: String, now: Instant) {
        self.log(&message);
        self.toast = Some(Toast {
            message,
            expires: now + TOAST_DURATION,
        });
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    /// Handle keyboard input at a given instant.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        // Global: Handle Help Toggle
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Global: Quit
        if (key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
            && self.input_mode == InputMode::Normal
        {
            self.should_quit = true;
            return;
        }

        let input_mode = self.input_mode.clone();
        match input_mode {
            InputMode::ServerPicker { mut search } => {
                self.handle_picker_keys(key, &mut search, now);
                if matches!(self.input_mode, InputMode::ServerPicker { .. }) {
                    self.input_mode = InputMode::ServerPicker { search };
                }
            }
            InputMode::Suggest { mut query } => {
                self.handle_suggest_keys(key, &mut query, now);
                if matches!(self.input_mode, InputMode::Suggest { .. }) {
                    self.input_mode = InputMode::Suggest { query };
                }
            }
            InputMode::Browse { mut url } => {
                self.handle_browse_keys(key, &mut url, now);
                if matches!(self.input_mode, InputMode::Browse { .. }) {
                    self.input_mode = InputMode::Browse { url };
                }
            }
            InputMode::Normal => self.handle_normal_keys(key, now),
        }
    }

    fn handle_normal_keys(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('c' | ' ') | KeyCode::Enter => self.toggle_connection(now),
            KeyCode::Char('d') => self.disconnect(now),
            KeyCode::Char('s') => self.open_server_picker(now),
            KeyCode::Char('a') => self.open_suggest(now),
            KeyCode::Char('b') => self.open_browse(now),

            // Activity Log navigation
            KeyCode::Up | KeyCode::Char('k') => {
                self.logs_auto_scroll = false;
                self.logs_scroll = self.logs_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.logs_scroll = self.logs_scroll.saturating_add(1);
                #[allow(clippy::cast_possible_truncation)]
                let max_scroll = self.logs.len().saturating_sub(1) as u16;
                if self.logs_scroll >= max_scroll {
                    self.logs_auto_scroll = true;
                }
            }
            _ => {}
        }
    }

    fn handle_picker_keys(&mut self, key: KeyEvent, search: &mut String, now: Instant) {
        let matches = catalog::filter(SERVERS, search);
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Up => self.picker_previous(matches.len()),
            KeyCode::Down => self.picker_next(matches.len()),
            KeyCode::Enter => {
                let chosen = self
                    .server_list_state
                    .selected()
                    .and_then(|i| matches.get(i).copied());
                if let Some(server) = chosen {
                    self.select_server(server, now);
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Backspace => {
                search.pop();
                self.reset_picker_selection(search);
            }
            KeyCode::Char(c) => {
                search.push(c);
                self.reset_picker_selection(search);
            }
            _ => {}
        }
    }

    fn handle_suggest_keys(&mut self, key: KeyEvent, query: &mut String, now: Instant) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let submitted = query.clone();
                if self.submit_suggestion(&submitted, now) {
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) => query.push(c),
            _ => {}
        }
    }

    fn handle_browse_keys(&mut self, key: KeyEvent, url: &mut String, now: Instant) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let submitted = url.clone();
                if self.submit_browse(&submitted, now) {
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Backspace => {
                url.pop();
            }
            KeyCode::Char(c) => url.push(c),
            _ => {}
        }
    }

    // === Connection ===

    /// Connect when disconnected, disconnect when connected.
    fn toggle_connection(&mut self, now: Instant) {
        let before = self.machine.status();
        if !self.machine.toggle(now) {
            self.show_toast(format!("{} Please wait.", before.label()), now);
            return;
        }

        let server = self.machine.selected();
        if before == ConnectionStatus::Connected {
            self.log(&format!("STATUS: Disconnecting from {}", server.country));
        } else {
            self.log(&format!(
                "STATUS: Starting connection to {} {} ({})",
                server.flag, server.country, server.city
            ));
        }
    }

    fn disconnect(&mut self, now: Instant) {
        let status = self.machine.status();
        if self.machine.request_disconnect(now) {
            self.log(&format!(
                "STATUS: Disconnecting from {}",
                self.machine.selected().country
            ));
        } else if status.is_transient() {
            self.show_toast(format!("{} Please wait.", status.label()), now);
        } else {
            self.show_toast("Not connected".to_string(), now);
        }
    }

    fn log_transition(&mut self, to: ConnectionStatus) {
        match to {
            ConnectionStatus::Connected => {
                let country = self.machine.selected().country;
                let address = self.machine.address().to_string();
                self.log(&format!("SUCCESS: Connected via {country}, new IP {address}"));
            }
            ConnectionStatus::Disconnected => self.log("STATUS: Disconnected"),
            other => self.log(&format!("STATUS: {}", other.label())),
        }
    }

    // === Server Selection ===

    fn open_server_picker(&mut self, now: Instant) {
        if self.machine.status() != ConnectionStatus::Disconnected {
            self.show_toast(MSG_CHANGE_WHILE_ACTIVE.to_string(), now);
            return;
        }
        let current = SERVERS
            .iter()
            .position(|s| s.id == self.machine.selected().id);
        self.server_list_state.select(current.or(Some(0)));
        self.input_mode = InputMode::ServerPicker {
            search: String::new(),
        };
    }

    fn reset_picker_selection(&mut self, search: &str) {
        let any = !catalog::filter(SERVERS, search).is_empty();
        self.server_list_state.select(any.then_some(0));
    }

    fn picker_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.server_list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.server_list_state.select(Some(i));
    }

    fn picker_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.server_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.server_list_state.select(Some(i));
    }

    /// Make `server` the active selection, if the connection allows it.
    fn select_server(&mut self, server: &'static ServerLocation, now: Instant) -> bool {
        if !self.machine.select_server(server) {
            self.show_toast(MSG_CHANGE_WHILE_ACTIVE.to_string(), now);
            return false;
        }
        self.log(&format!(
            "INFO: Server set to {} {} ({})",
            server.flag, server.country, server.city
        ));
        true
    }

    // === AI Suggestions ===

    fn open_suggest(&mut self, now: Instant) {
        if self.machine.status() != ConnectionStatus::Disconnected {
            self.show_toast(MSG_CHANGE_WHILE_ACTIVE.to_string(), now);
        } else if self.is_suggesting {
            self.show_toast("AI suggestion already in progress".to_string(), now);
        } else {
            self.input_mode = InputMode::Suggest {
                query: String::new(),
            };
        }
    }

    /// Starts a background suggestion for `query`. Returns `true` if one was started.
    fn submit_suggestion(&mut self, query: &str, now: Instant) -> bool {
        if self.is_suggesting {
            self.show_toast("AI suggestion already in progress".to_string(), now);
            return false;
        }
        if self.machine.status() != ConnectionStatus::Disconnected {
            self.show_toast(MSG_CHANGE_WHILE_ACTIVE.to_string(), now);
            return false;
        }
        let query = query.trim();
        if query.is_empty() {
            self.show_toast(SuggestError::EmptyQuery.to_string(), now);
            return false;
        }

        self.log(&format!("AI: Asking for a server for \"{query}\"..."));
        self.is_suggesting = true;
        self.suggestion_rx = Some(suggest::spawn_resolver(
            Arc::clone(&self.provider),
            query.to_string(),
            catalog::countries(),
        ));
        true
    }

    /// Collects a finished suggestion, clearing the in-progress flag on every outcome.
    fn poll_suggestion(&mut self, now: Instant) {
        let Some(rx) = &self.suggestion_rx else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(SuggestError::Unavailable(
                "suggestion worker stopped".to_string(),
            )),
        };

        self.suggestion_rx = None;
        self.is_suggesting = false;
        self.apply_suggestion(result, now);
    }

    fn apply_suggestion(&mut self, result: Result<Suggestion, SuggestError>, now: Instant) {
        let suggestion = match result {
            Ok(suggestion) => suggestion,
            Err(e) => {
                self.show_toast(format!("AI Error: {e}"), now);
                return;
            }
        };

        if let Suggestion::Fallback { answer, country } = &suggestion {
            self.log(&format!(
                "WARN: Suggested country \"{answer}\" not in server list, using {country}"
            ));
        }

        let Some(server) = catalog::find_by_country(suggestion.country()) else {
            self.log(&format!(
                "WARN: No server for suggested country {}",
                suggestion.country()
            ));
            return;
        };

        if self.select_server(server, now) {
            self.show_toast(
                format!("AI picked {} {} ({})", server.flag, server.country, server.city),
                now,
            );
        }
    }

    // === Browser Simulation ===

    fn open_browse(&mut self, now: Instant) {
        if self.machine.status() == ConnectionStatus::Connected {
            self.input_mode = InputMode::Browse { url: String::new() };
        } else {
            self.show_toast("Connect before browsing".to_string(), now);
        }
    }

    /// Submits a destination to the simulated browser. Returns `true` if it started loading.
    fn submit_browse(&mut self, input: &str, now: Instant) -> bool {
        match self.machine.browse(input, now) {
            Ok(url) => {
                self.log(&format!(
                    "BROWSE: Opening {url} via {}",
                    self.machine.selected().country
                ));
                true
            }
            Err(e) => {
                self.show_toast(e.to_string(), now);
                false
            }
        }
    }

    // === Lifecycle ===

    /// Called on each tick
    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    /// Advances timers, collects background results, and expires the toast.
    pub fn on_tick_at(&mut self, now: Instant) {
        for update in self.machine.advance(now, &mut self.rng) {
            match update {
                Update::Status { to, .. } => self.log_transition(to),
                Update::Browsed(message) => self.log(&format!("SUCCESS: {message}")),
            }
        }

        // The browser only exists inside a session.
        if matches!(self.input_mode, InputMode::Browse { .. })
            && self.machine.status() != ConnectionStatus::Connected
        {
            self.input_mode = InputMode::Normal;
        }

        self.poll_suggestion(now);

        if let Some(ref toast) = self.toast {
            if now > toast.expires {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::GeminiClient;
    use std::time::Duration;

    const SEC: Duration = Duration::from_secs(1);

    struct Fixed(Result<&'static str, SuggestError>);

    impl CompletionProvider for Fixed {
        fn complete(&self, _prompt: &str) -> Result<String, SuggestError> {
            self.0.clone().map(str::to_string)
        }
    }

    fn app_with(provider: impl CompletionProvider + Send + Sync + 'static) -> App {
        App::with_provider(Arc::new(provider), StdRng::seed_from_u64(1))
    }

    fn app() -> App {
        app_with(Fixed(Ok("Germany")))
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key_at(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    fn wait_for_suggestion(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_suggesting && Instant::now() < deadline {
            app.on_tick();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!app.is_suggesting, "suggestion did not finish");
    }

    fn connect(app: &mut App, t0: Instant) {
        press(app, KeyCode::Char('c'), t0);
        app.on_tick_at(t0 + SEC * 3);
        assert_eq!(app.machine.status(), ConnectionStatus::Connected);
    }

    fn logged(app: &App, needle: &str) -> bool {
        app.logs.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_starts_disconnected_on_recommended_server() {
        let app = app();
        assert_eq!(app.machine.status(), ConnectionStatus::Disconnected);
        assert_eq!(app.machine.selected(), catalog::recommended());
        assert!(logged(&app, "INIT:"));
    }

    #[test]
    fn test_connect_and_disconnect_via_keys() {
        let t0 = Instant::now();
        let mut app = app();
        connect(&mut app, t0);
        assert!(logged(&app, "STATUS: Authenticating..."));
        assert!(logged(&app, "STATUS: Securing Connection..."));
        assert!(logged(&app, "SUCCESS: Connected via United States"));

        press(&mut app, KeyCode::Char('d'), t0 + SEC * 4);
        assert_eq!(app.machine.status(), ConnectionStatus::Disconnecting);
        app.on_tick_at(t0 + SEC * 5);
        assert_eq!(app.machine.status(), ConnectionStatus::Disconnected);
        assert!(logged(&app, "STATUS: Disconnected"));
    }

    #[test]
    fn test_toggle_during_transition_only_toasts() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.machine.status(), ConnectionStatus::Connecting);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('?'), t0);
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('c'), t0);
        assert!(!app.show_help);
        assert_eq!(app.machine.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_server_picker_search_and_select() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('s'), t0);
        assert!(matches!(app.input_mode, InputMode::ServerPicker { .. }));

        type_text(&mut app, "TOKYO", t0);
        assert_eq!(
            app.input_mode,
            InputMode::ServerPicker {
                search: "TOKYO".to_string()
            }
        );
        press(&mut app, KeyCode::Enter, t0);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.machine.selected().country, "Japan");
    }

    #[test]
    fn test_server_picker_esc_keeps_selection() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('s'), t0);
        press(&mut app, KeyCode::Down, t0);
        press(&mut app, KeyCode::Esc, t0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.machine.selected(), catalog::recommended());
    }

    #[test]
    fn test_server_picker_no_match_enter_does_nothing() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('s'), t0);
        type_text(&mut app, "atlantis", t0);
        assert_eq!(app.server_list_state.selected(), None);
        press(&mut app, KeyCode::Enter, t0);
        assert!(matches!(app.input_mode, InputMode::ServerPicker { .. }));
        assert_eq!(app.machine.selected(), catalog::recommended());
    }

    #[test]
    fn test_server_picker_refused_while_connected() {
        let t0 = Instant::now();
        let mut app = app();
        connect(&mut app, t0);
        press(&mut app, KeyCode::Char('s'), t0 + SEC * 3);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(MSG_CHANGE_WHILE_ACTIVE)
        );
    }

    #[test]
    fn test_suggestion_selects_matching_server() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('a'), t0);
        type_text(&mut app, "fastest server for gaming in EU", t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.is_suggesting);

        wait_for_suggestion(&mut app);
        assert_eq!(app.machine.selected().country, "Germany");
        assert!(logged(&app, "AI picked"));
    }

    #[test]
    fn test_suggestion_fallback_logs_warning() {
        let mut app = app_with(Fixed(Ok("Atlantis")));
        let japan = catalog::find_by_country("Japan").unwrap();
        assert!(app.machine.select_server(japan));

        assert!(app.submit_suggestion("somewhere mythical", Instant::now()));
        wait_for_suggestion(&mut app);

        assert_eq!(app.machine.selected(), catalog::recommended());
        assert!(logged(&app, "WARN: Suggested country \"Atlantis\""));
    }

    #[test]
    fn test_blank_suggestion_is_not_sent() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('a'), t0);
        type_text(&mut app, "   ", t0);
        press(&mut app, KeyCode::Enter, t0);

        assert!(!app.is_suggesting);
        assert!(matches!(app.input_mode, InputMode::Suggest { .. }));
        assert_eq!(app.machine.selected(), catalog::recommended());
    }

    #[test]
    fn test_suggestion_failure_clears_flag() {
        let mut app = app_with(Fixed(Err(SuggestError::Unavailable("boom".to_string()))));
        assert!(app.submit_suggestion("gaming", Instant::now()));
        wait_for_suggestion(&mut app);

        assert_eq!(app.machine.selected(), catalog::recommended());
        assert!(logged(&app, "AI Error: Suggestion unavailable: boom"));
    }

    #[test]
    fn test_missing_api_key_fails_cleanly() {
        let mut app = app_with(GeminiClient::new(None, "gemini-2.5-flash"));
        assert!(app.submit_suggestion("gaming", Instant::now()));
        wait_for_suggestion(&mut app);

        assert!(logged(&app, "not configured"));
        assert_eq!(app.machine.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_new_without_key_disables_ai() {
        let settings = Settings {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            tick_rate: 100,
        };
        let app = App::new(&settings);
        assert!(!app.ai_enabled);
        assert!(logged(&app, "API_KEY not set"));
    }

    #[test]
    fn test_suggestion_refused_while_connected() {
        let t0 = Instant::now();
        let mut app = app();
        connect(&mut app, t0);
        assert!(!app.submit_suggestion("gaming", t0 + SEC * 3));
        assert!(!app.is_suggesting);
    }

    #[test]
    fn test_browse_flow() {
        let t0 = Instant::now();
        let mut app = app();
        connect(&mut app, t0);
        let at = t0 + SEC * 3;

        press(&mut app, KeyCode::Char('b'), at);
        type_text(&mut app, "example.com", at);
        press(&mut app, KeyCode::Enter, at);
        assert_eq!(app.input_mode, InputMode::Normal);

        app.on_tick_at(at + Duration::from_millis(1500));
        assert!(logged(
            &app,
            "SUCCESS: ✅ Successfully accessed https://example.com via United States."
        ));
    }

    #[test]
    fn test_browse_requires_connection() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('b'), t0);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_empty_browse_keeps_prompt_open() {
        let t0 = Instant::now();
        let mut app = app();
        connect(&mut app, t0);
        press(&mut app, KeyCode::Char('b'), t0 + SEC * 3);
        press(&mut app, KeyCode::Enter, t0 + SEC * 3);
        assert!(matches!(app.input_mode, InputMode::Browse { .. }));
        assert!(app.machine.session().is_some_and(|s| !s.browser().is_loading()));
    }

    #[test]
    fn test_toast_expires() {
        let t0 = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Char('d'), t0);
        assert!(app.toast.is_some());
        app.on_tick_at(t0 + TOAST_DURATION + Duration::from_millis(1));
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_log_is_capped() {
        let mut app = app();
        for i in 0..(MAX_LOG_LINES + 10) {
            app.log(&format!("INFO: line {i}"));
        }
        assert_eq!(app.logs.len(), MAX_LOG_LINES);
        let newest = format!("INFO: line {}", MAX_LOG_LINES + 9);
        assert!(app.logs.last().unwrap().ends_with(&newest));
        assert!(!logged(&app, "INIT:"));
    }
}
