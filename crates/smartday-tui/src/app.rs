//! UI state and event handling.
//!
//! The [`App`] owns the screen state and the controllers, runs entirely on
//! the UI loop, and never blocks on the network: every backend call is
//! spawned onto the runtime and reports back through the [`AppEvent`]
//! channel.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;
use tracing::warn;

use smartday_application::auth::AuthUseCase;
use smartday_application::chat::ChatSession;
use smartday_application::map_overlay::{InitOutcome, MapOverlayController};
use smartday_application::preference::{PreferenceController, SAVING_STATUS};
use smartday_application::status::{StatusMessage, STATUS_CLEAR};
use smartday_core::backend::{ChatApi, MapApi, PreferenceApi};
use smartday_core::error::SmartdayError;
use smartday_core::map::{MapDataset, MarkerId};
use smartday_core::preference::{PreferenceCategory, PreferenceStore};
use smartday_core::session::{SessionStore, UserSession};
use smartday_core::view::ViewNavigator;

use crate::events::AppEvent;
use crate::map_surface::TerminalMapSurface;

/// Shown when a sign-in is rejected without a backend message.
const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect email or password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Username,
}

/// State of the login form (both sign-in and sign-up modes).
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub username: String,
    pub focus: LoginField,
    pub message: Option<StatusMessage>,
    pub busy: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            mode: LoginMode::SignIn,
            email: String::new(),
            password: String::new(),
            username: String::new(),
            focus: LoginField::Email,
            message: None,
            busy: false,
        }
    }
}

impl LoginForm {
    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::Username => &mut self.username,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order: &[LoginField] = match self.mode {
            LoginMode::SignIn => &[LoginField::Email, LoginField::Password],
            LoginMode::SignUp => &[
                LoginField::Email,
                LoginField::Password,
                LoginField::Username,
            ],
        };
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        if self.mode == LoginMode::SignIn && self.focus == LoginField::Username {
            self.focus = LoginField::Email;
        }
        self.message = None;
    }
}

/// Clickable regions recorded by the last draw, for mouse hit tests.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub sidebar: Rect,
    pub nav_chat: Rect,
    pub nav_map: Rect,
    pub lock_toggle: Rect,
    pub logout: Rect,
    pub save: Rect,
    pub categories: Vec<(PreferenceCategory, Rect)>,
    pub filters: Vec<(MapDataset, Rect)>,
    pub marker_rows: Vec<(MarkerId, Rect)>,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub login: LoginForm,
    pub session: Option<UserSession>,
    pub nav: ViewNavigator,
    pub chat: Option<ChatSession>,
    pub preferences: Option<PreferenceController>,
    pub map: Option<MapOverlayController<TerminalMapSurface>>,
    pub input: String,
    pub status: Option<(StatusMessage, Instant)>,
    pub notice: Option<String>,
    pub hovered_marker: Option<MarkerId>,
    pub areas: HitAreas,
    pointer_in_sidebar: bool,
    auth: Arc<AuthUseCase>,
    chat_api: Arc<dyn ChatApi>,
    map_api: Arc<dyn MapApi>,
    preference_api: Arc<dyn PreferenceApi>,
    preference_store: Arc<dyn PreferenceStore>,
    sessions: Arc<dyn SessionStore>,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
}

impl App {
    pub fn new(
        auth: Arc<AuthUseCase>,
        chat_api: Arc<dyn ChatApi>,
        map_api: Arc<dyn MapApi>,
        preference_api: Arc<dyn PreferenceApi>,
        preference_store: Arc<dyn PreferenceStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(32);
        let mut app = Self {
            screen: Screen::Login,
            should_quit: false,
            login: LoginForm::default(),
            session: None,
            nav: ViewNavigator::new(),
            chat: None,
            preferences: None,
            map: None,
            input: String::new(),
            status: None,
            notice: None,
            hovered_marker: None,
            areas: HitAreas::default(),
            pointer_in_sidebar: false,
            auth,
            chat_api,
            map_api,
            preference_api,
            preference_store,
            sessions,
            events_tx,
            events_rx,
        };
        // A persisted session skips the login screen entirely.
        if let Some(session) = app.auth.current_session() {
            app.enter_chat(session);
        }
        app
    }

    /// Builds the session-dependent controllers and switches to the chat
    /// screen. Nothing here runs without a session.
    fn enter_chat(&mut self, session: UserSession) {
        let mut preferences = PreferenceController::new(
            self.preference_api.clone(),
            self.preference_store.clone(),
            self.sessions.clone(),
        );
        preferences.load();
        self.preferences = Some(preferences);
        self.chat = Some(ChatSession::new(self.chat_api.clone()));
        self.map = Some(MapOverlayController::new(
            TerminalMapSurface::new(),
            self.map_api.clone(),
        ));
        self.nav = ViewNavigator::new();
        self.session = Some(session);
        self.screen = Screen::Chat;
    }

    /// Tears the chat screen down and returns to login.
    fn leave_chat(&mut self) {
        self.screen = Screen::Login;
        self.login = LoginForm::default();
        self.session = None;
        self.chat = None;
        self.preferences = None;
        self.map = None;
        self.nav = ViewNavigator::new();
        self.input.clear();
        self.status = None;
        self.notice = None;
        self.hovered_marker = None;
        self.pointer_in_sidebar = false;
    }

    // ------------------------------------------------------------------
    // Periodic work
    // ------------------------------------------------------------------

    /// Clears the transient status line once its display window has passed.
    pub fn on_tick(&mut self) {
        if let Some((_, shown_at)) = &self.status {
            if shown_at.elapsed() >= STATUS_CLEAR {
                self.status = None;
            }
        }
    }

    /// Drains and applies results from background tasks.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SignInFinished(Ok(session)) => {
                self.login.busy = false;
                self.enter_chat(session);
            }
            AppEvent::SignInFinished(Err(err)) => {
                self.login.busy = false;
                self.login.message = Some(StatusMessage::error(auth_error_text(&err)));
            }
            AppEvent::SignUpFinished(Ok(message)) => {
                self.login.busy = false;
                self.login.message = Some(StatusMessage::info(message));
                // Success switches straight to sign-in with the form cleared.
                self.login.mode = LoginMode::SignIn;
                self.login.focus = LoginField::Email;
                self.login.email.clear();
                self.login.password.clear();
                self.login.username.clear();
            }
            AppEvent::SignUpFinished(Err(err)) => {
                self.login.busy = false;
                self.login.message = Some(StatusMessage::error(auth_error_text(&err)));
            }
            AppEvent::SignOutFinished => self.leave_chat(),
            AppEvent::PreferenceSaved(status) => self.set_status(status),
            AppEvent::ChatReply(reply) => {
                if let Some(chat) = self.chat.as_mut() {
                    chat.apply_reply(reply);
                }
            }
            AppEvent::MarkersFetched { ticket, result } => {
                if let Some(map) = self.map.as_mut() {
                    if let Some(notice) = map.apply_result(&ticket, result) {
                        self.notice = Some(notice.message().to_string());
                    }
                }
            }
        }
    }

    fn set_status(&mut self, status: StatusMessage) {
        self.status = Some((status, Instant::now()));
    }

    // ------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.login.cycle_focus(true),
            KeyCode::BackTab => self.login.cycle_focus(false),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.focused_field_mut().pop();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login.toggle_mode();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login.focused_field_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        // A modal notice swallows everything until dismissed.
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.notice = None;
            }
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_chat_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::F(2) => self.nav.select_chat(),
            KeyCode::F(3) => self.on_select_map(),
            KeyCode::F(4) => self.nav.toggle_lock(),
            KeyCode::F(5) => self.dispatch_preference_save(),
            KeyCode::F(6) => self.dispatch_marker_load(MapDataset::Parks),
            KeyCode::F(7) => self.dispatch_marker_load(MapDataset::Restaurants),
            KeyCode::F(10) => self.dispatch_sign_out(),
            KeyCode::Char(c @ '1'..='4') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = (c as usize) - ('1' as usize);
                if let Some(category) = category_by_index(index) {
                    self.click_category(category);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Chat {
            return;
        }
        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };
        match mouse.kind {
            MouseEventKind::Moved => self.on_pointer_moved(position),
            MouseEventKind::Down(MouseButton::Left) => self.on_left_click(position),
            _ => {}
        }
    }

    fn on_pointer_moved(&mut self, position: Position) {
        let inside = self.areas.sidebar.contains(position);
        if inside != self.pointer_in_sidebar {
            self.pointer_in_sidebar = inside;
            if inside {
                self.nav.pointer_enter();
            } else {
                self.nav.pointer_leave();
            }
        }

        let hovered_now = self
            .areas
            .marker_rows
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| *id);
        if hovered_now != self.hovered_marker {
            if let Some(map) = self.map.as_mut() {
                if let Some(old) = self.hovered_marker {
                    map.leave_marker(old);
                }
                if let Some(new) = hovered_now {
                    map.hover_marker(new);
                }
            }
            self.hovered_marker = hovered_now;
        }
    }

    fn on_left_click(&mut self, position: Position) {
        if self.notice.is_some() {
            self.notice = None;
            return;
        }
        if self.areas.nav_chat.contains(position) {
            self.nav.select_chat();
        } else if self.areas.nav_map.contains(position) {
            self.on_select_map();
        } else if self.areas.lock_toggle.contains(position) {
            self.nav.toggle_lock();
        } else if self.areas.logout.contains(position) {
            self.dispatch_sign_out();
        } else if self.areas.save.contains(position) {
            self.dispatch_preference_save();
        } else if let Some(category) = self
            .areas
            .categories
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(category, _)| *category)
        {
            self.click_category(category);
        } else if let Some(dataset) = self
            .areas
            .filters
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(dataset, _)| *dataset)
        {
            self.dispatch_marker_load(dataset);
        }
    }

    fn click_category(&mut self, category: PreferenceCategory) {
        if let Some(preferences) = self.preferences.as_mut() {
            preferences.click_category(category);
        }
    }

    // ------------------------------------------------------------------
    // Backend dispatch (spawned, never blocking the loop)
    // ------------------------------------------------------------------

    fn submit_login(&mut self) {
        if self.login.busy {
            return;
        }
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();
        let auth = self.auth.clone();
        let tx = self.events_tx.clone();
        match self.login.mode {
            LoginMode::SignIn => {
                if email.is_empty() || password.is_empty() {
                    self.login.message =
                        Some(StatusMessage::error("Enter email and password."));
                    return;
                }
                self.login.busy = true;
                tokio::spawn(async move {
                    let result = auth.sign_in(&email, &password).await;
                    let _ = tx.send(AppEvent::SignInFinished(result)).await;
                });
            }
            LoginMode::SignUp => {
                let username = self.login.username.trim().to_string();
                if email.is_empty() || password.is_empty() || username.is_empty() {
                    self.login.message = Some(StatusMessage::error("Fill in every field."));
                    return;
                }
                self.login.busy = true;
                tokio::spawn(async move {
                    let result = auth.sign_up(&email, &password, &username).await;
                    let _ = tx.send(AppEvent::SignUpFinished(result)).await;
                });
            }
        }
    }

    fn submit_chat_input(&mut self) {
        let preference = self.preferences.as_ref().and_then(|p| p.current());
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        let Some(outbound) = chat.begin_send(&self.input, preference) else {
            return;
        };
        self.input.clear();
        let api = chat.api_handle();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let reply = ChatSession::exchange(api, outbound).await;
            let _ = tx.send(AppEvent::ChatReply(reply)).await;
        });
    }

    fn on_select_map(&mut self) {
        if !self.nav.select_map() {
            return;
        }
        let Some(map) = self.map.as_mut() else {
            return;
        };
        match map.ensure_initialized() {
            // First construction loads the default dataset with the first
            // filter control active.
            InitOutcome::Constructed => {
                self.dispatch_marker_load(MapDataset::default_dataset());
            }
            InitOutcome::Relayout | InitOutcome::Failed => {}
        }
    }

    fn dispatch_marker_load(&mut self, dataset: MapDataset) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        let Some(ticket) = map.begin_load(dataset) else {
            return;
        };
        // The hovered marker belonged to the set that was just cleared.
        self.hovered_marker = None;
        let api = map.api_handle();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_points(dataset).await;
            let _ = tx.send(AppEvent::MarkersFetched { ticket, result }).await;
        });
    }

    fn dispatch_preference_save(&mut self) {
        let Some(preferences) = self.preferences.as_ref() else {
            return;
        };
        match preferences.save_request() {
            Err(status) => self.set_status(status),
            Ok(request) => {
                let api = preferences.api_handle();
                let store = preferences.store_handle();
                self.set_status(StatusMessage::info(SAVING_STATUS));
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let status = PreferenceController::perform_save(api, store, request).await;
                    let _ = tx.send(AppEvent::PreferenceSaved(status)).await;
                });
            }
        }
    }

    fn dispatch_sign_out(&mut self) {
        let auth = self.auth.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = auth.sign_out().await {
                warn!("sign-out failed: {err}");
            }
            let _ = tx.send(AppEvent::SignOutFinished).await;
        });
    }
}

fn category_by_index(index: usize) -> Option<PreferenceCategory> {
    use strum::IntoEnumIterator as _;
    PreferenceCategory::iter().nth(index)
}

/// The text a rejected auth call should show: the backend's own message when
/// it sent one, a fixed line for bare rejections, the transport error
/// otherwise.
fn auth_error_text(err: &SmartdayError) -> String {
    match err {
        SmartdayError::Status { .. } => err
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| BAD_CREDENTIALS_MESSAGE.to_string()),
        other => other.to_string(),
    }
}
