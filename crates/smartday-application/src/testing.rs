//! In-memory fakes for the core ports, shared by the controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use smartday_core::backend::{AuthApi, ChatApi, MapApi, PreferenceApi, SignInOutcome};
use smartday_core::error::{Result, SmartdayError};
use smartday_core::map::{Coordinate, MapDataset, MapSurface, MarkerId, PointOfInterest};
use smartday_core::preference::{PreferenceCategory, PreferenceStore};
use smartday_core::session::{SessionStore, UserSession};

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<UserSession>>,
}

impl MemorySessionStore {
    pub fn with_session(session: UserSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<UserSession> {
        self.session.lock().unwrap().clone()
    }

    fn save(&self, session: &UserSession) -> Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<i64, PreferenceCategory>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, user_id: i64) -> Option<PreferenceCategory> {
        self.values.lock().unwrap().get(&user_id).copied()
    }

    fn save(&self, user_id: i64, category: PreferenceCategory) -> Result<()> {
        self.values.lock().unwrap().insert(user_id, category);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Backend fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeAuthApi {
    sign_in_outcome: Option<SignInOutcome>,
    sign_up_message: Option<String>,
    fail_sign_out: bool,
}

impl FakeAuthApi {
    pub fn signing_in(outcome: SignInOutcome) -> Self {
        Self {
            sign_in_outcome: Some(outcome),
            ..Self::default()
        }
    }

    pub fn failing_sign_out() -> Self {
        Self {
            fail_sign_out: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn sign_up(&self, _email: &str, _password: &str, _username: &str) -> Result<Option<String>> {
        Ok(self.sign_up_message.clone())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<SignInOutcome> {
        self.sign_in_outcome
            .clone()
            .ok_or_else(|| SmartdayError::Status {
                status: 401,
                message: "invalid credentials".to_string(),
            })
    }

    async fn sign_out(&self) -> Result<()> {
        if self.fail_sign_out {
            Err(SmartdayError::network("connection refused"))
        } else {
            Ok(())
        }
    }
}

/// Preference API fake that counts calls so tests can assert that guarded
/// saves never reach the network.
pub struct FakePreferenceApi {
    pub calls: AtomicUsize,
    response: Result<Option<String>>,
}

impl FakePreferenceApi {
    pub fn replying(response: Result<Option<String>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response,
        }
    }
}

impl Default for FakePreferenceApi {
    fn default() -> Self {
        Self::replying(Ok(None))
    }
}

#[async_trait]
impl PreferenceApi for FakePreferenceApi {
    async fn save_preference(
        &self,
        _user_id: i64,
        _category: PreferenceCategory,
    ) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }

    async fn fetch_preference(&self, _user_id: i64) -> Result<Option<PreferenceCategory>> {
        Ok(None)
    }
}

pub struct FakeChatApi {
    response: Result<String>,
}

impl FakeChatApi {
    pub fn replying(response: Result<String>) -> Self {
        Self { response }
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn send_message(
        &self,
        _message: &str,
        _preference: Option<PreferenceCategory>,
    ) -> Result<String> {
        self.response.clone()
    }
}

pub struct FakeMapApi {
    response: Result<Vec<PointOfInterest>>,
}

impl FakeMapApi {
    pub fn replying(response: Result<Vec<PointOfInterest>>) -> Self {
        Self { response }
    }
}

#[async_trait]
impl MapApi for FakeMapApi {
    async fn fetch_points(&self, _dataset: MapDataset) -> Result<Vec<PointOfInterest>> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Map surface fake
// ---------------------------------------------------------------------------

/// Records every surface operation so tests can assert on overlay hygiene.
#[derive(Default)]
pub struct FakeSurface {
    pub fail_construct: bool,
    pub construct_calls: usize,
    pub relayout_calls: usize,
    pub placed: Vec<MarkerId>,
    pub removed: Vec<MarkerId>,
    pub opened: Vec<MarkerId>,
    pub closed: Vec<MarkerId>,
    next_id: MarkerId,
}

impl FakeSurface {
    pub fn failing() -> Self {
        Self {
            fail_construct: true,
            ..Self::default()
        }
    }
}

impl MapSurface for FakeSurface {
    fn construct(&mut self, _center: Coordinate, _zoom: u8) -> Result<()> {
        if self.fail_construct {
            return Err(SmartdayError::internal("widget unavailable"));
        }
        self.construct_calls += 1;
        Ok(())
    }

    fn relayout(&mut self) {
        self.relayout_calls += 1;
    }

    fn place_marker(&mut self, _point: &PointOfInterest) -> MarkerId {
        self.next_id += 1;
        self.placed.push(self.next_id);
        self.next_id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.removed.push(id);
    }

    fn open_info(&mut self, id: MarkerId) {
        self.opened.push(id);
    }

    fn close_info(&mut self, id: MarkerId) {
        self.closed.push(id);
    }
}

/// A point with throwaway coordinates.
pub fn poi(name: &str) -> PointOfInterest {
    PointOfInterest {
        name: name.to_string(),
        lat: 37.55,
        lng: 126.98,
        tel: None,
    }
}
