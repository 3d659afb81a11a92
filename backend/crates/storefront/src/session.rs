//! Session Manager
//!
//! Owns the bearer token on the client side and derives two pieces of
//! observable state from it: whether the user is logged in, and the claims
//! snapshot (`user`). Both are only ever derived from the current token.
//!
//! Every request records the session generation it started under. `logout`
//! advances the generation, so a response that lands afterwards is dropped
//! with [`SessionError::Superseded`] instead of reviving the old session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::{ApiClient, ApiResponse, Credentials, Endpoint};
use crate::error::{SessionError, SessionResult};
use crate::observable::Observable;
use crate::storage::KeyValueStorage;
use crate::user::UserDetails;

/// Storage key holding the raw token string
pub const TOKEN_STORAGE_KEY: &str = "unishop-token";

/// Where `logout` sends the user
pub const LOGIN_ROUTE: &str = "/register-login";

/// View routing, as far as the session needs it.
pub trait Navigator: Send + Sync {
    fn navigate_by_url(&self, url: &str);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.entries().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.entries().clone()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate_by_url(&self, url: &str) {
        tracing::debug!(url = %url, "Navigating");
        self.entries().push(url.to_string());
    }
}

#[derive(Debug, Default)]
struct TokenState {
    /// `None` until storage has been read; `Some("")` means "no token"
    token: Option<String>,
    generation: u64,
}

pub struct SessionManager<S, N> {
    api: ApiClient,
    storage: Arc<S>,
    navigator: Arc<N>,
    state: Mutex<TokenState>,
    is_logged_in: Observable<bool>,
    user: Observable<Option<UserDetails>>,
}

impl<S, N> SessionManager<S, N>
where
    S: KeyValueStorage,
    N: Navigator,
{
    /// Build a manager, deriving login state and claims once from whatever
    /// token storage already holds.
    pub fn new(api: ApiClient, storage: Arc<S>, navigator: Arc<N>) -> Self {
        let manager = Self {
            api,
            storage,
            navigator,
            state: Mutex::new(TokenState::default()),
            is_logged_in: Observable::new(false),
            user: Observable::new(None),
        };

        let claims = manager.current_claims();
        let logged_in = claims.as_ref().is_some_and(UserDetails::is_active);
        manager.is_logged_in.set(logged_in);
        manager.user.set(claims);

        tracing::debug!(logged_in, "Session restored");
        manager
    }

    pub fn is_logged_in(&self) -> &Observable<bool> {
        &self.is_logged_in
    }

    pub fn user(&self) -> &Observable<Option<UserDetails>> {
        &self.user
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ========================================================================
    // Token
    // ========================================================================

    /// Current token. Falls back to durable storage when nothing is cached.
    pub fn token(&self) -> Option<String> {
        let mut state = self.lock_state();
        self.cached_token(&mut state)
    }

    /// Persist `token` and cache it.
    pub fn save_token(&self, token: &str) -> SessionResult<()> {
        let mut state = self.lock_state();
        self.store_token(&mut state, token)
    }

    /// Drop the session: token, login state, claims. Then go to the login view.
    ///
    /// In-flight requests started before this call will be discarded.
    pub fn logout(&self) -> SessionResult<()> {
        {
            let mut state = self.lock_state();
            state.generation += 1;
            state.token = Some(String::new());
        }
        let removed = self.storage.remove_item(TOKEN_STORAGE_KEY);

        self.is_logged_in.set(false);
        self.refresh_user();
        self.navigator.navigate_by_url(LOGIN_ROUTE);

        tracing::info!("Logged out");
        removed.map_err(SessionError::from)
    }

    /// Claims decoded from the token payload. Nothing is verified here.
    pub fn user_details(&self) -> SessionResult<Option<UserDetails>> {
        match self.token() {
            Some(token) => decode_user_details(&token).map(Some),
            None => Ok(None),
        }
    }

    /// Re-derive login state from the token's `exp` and publish it.
    ///
    /// Login state is otherwise not re-evaluated as time passes.
    pub fn refresh_login_state(&self) -> bool {
        let logged_in = self
            .current_claims()
            .is_some_and(|claims| claims.is_active());
        self.is_logged_in.set(logged_in);
        logged_in
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Send one request, saving any token a 2xx reply carries.
    pub async fn request(
        &self,
        endpoint: Endpoint,
        body: Option<&Credentials>,
    ) -> SessionResult<ApiResponse> {
        let generation = self.generation();
        self.dispatch(generation, endpoint, body).await
    }

    /// Register, then log in with the returned token.
    ///
    /// Any failure resets the session.
    pub async fn register(&self, credentials: &Credentials) -> SessionResult<ApiResponse> {
        let generation = self.generation();
        match self
            .dispatch(generation, Endpoint::Register, Some(credentials))
            .await
        {
            Ok(response) if response.is_success() => {
                self.ensure_current(generation)?;
                self.is_logged_in.set(true);
                self.refresh_user();
                Ok(response)
            }
            Ok(response) => {
                self.ensure_current(generation)?;
                tracing::info!(message = ?response.message, "Registration refused");
                self.logout()?;
                Ok(response)
            }
            Err(SessionError::Superseded) => Err(SessionError::Superseded),
            Err(e) => {
                self.ensure_current(generation)?;
                if let Err(logout_err) = self.logout() {
                    tracing::warn!(error = %logout_err, "Could not clear session after failed registration");
                }
                Err(e)
            }
        }
    }

    /// Log in. A refused login leaves any stored token alone.
    pub async fn login(&self, credentials: &Credentials) -> SessionResult<ApiResponse> {
        let generation = self.generation();
        match self
            .dispatch(generation, Endpoint::Login, Some(credentials))
            .await
        {
            Ok(response) => {
                self.ensure_current(generation)?;
                if response.is_success() {
                    self.is_logged_in.set(true);
                    self.refresh_user();
                } else {
                    tracing::info!(message = ?response.message, "Login refused");
                    self.is_logged_in.set(false);
                }
                Ok(response)
            }
            Err(SessionError::Superseded) => Err(SessionError::Superseded),
            Err(e) => {
                self.ensure_current(generation)?;
                self.is_logged_in.set(false);
                Err(e)
            }
        }
    }

    pub async fn profile(&self) -> SessionResult<ApiResponse> {
        self.request(Endpoint::Profile, None).await
    }

    pub async fn admin_auth(&self) -> SessionResult<ApiResponse> {
        self.request(Endpoint::AdminAuth, None).await
    }

    async fn dispatch(
        &self,
        generation: u64,
        endpoint: Endpoint,
        body: Option<&Credentials>,
    ) -> SessionResult<ApiResponse> {
        let token = self.token();
        let result = self.api.send(endpoint, token.as_deref(), body).await;

        let mut state = self.lock_state();
        if state.generation != generation {
            tracing::debug!(endpoint = ?endpoint, "Discarding response from a previous session");
            return Err(SessionError::Superseded);
        }

        let response = result?;
        if let Some(token) = response.token() {
            self.store_token(&mut state, token)?;
        }
        Ok(response)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn lock_state(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self) -> u64 {
        self.lock_state().generation
    }

    fn ensure_current(&self, generation: u64) -> SessionResult<()> {
        if self.generation() == generation {
            Ok(())
        } else {
            Err(SessionError::Superseded)
        }
    }

    fn cached_token(&self, state: &mut TokenState) -> Option<String> {
        if state.token.is_none() {
            let stored = match self.storage.get_item(TOKEN_STORAGE_KEY) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read stored token");
                    None
                }
            };
            state.token = Some(stored.unwrap_or_default());
        }
        state.token.clone().filter(|t| !t.is_empty())
    }

    fn store_token(&self, state: &mut TokenState, token: &str) -> SessionResult<()> {
        self.storage.set_item(TOKEN_STORAGE_KEY, token)?;
        state.token = Some(token.to_string());
        Ok(())
    }

    /// Claims of the current token; a malformed token counts as none.
    fn current_claims(&self) -> Option<UserDetails> {
        match self.user_details() {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session token");
                None
            }
        }
    }

    fn refresh_user(&self) {
        self.user.set(self.current_claims());
    }
}

/// Decode the claims segment of a compact token. Any JSON object will do.
pub fn decode_user_details(token: &str) -> SessionResult<UserDetails> {
    let payload = platform::crypto::decode_token_payload(token)
        .map_err(|e| SessionError::MalformedToken(e.to_string()))?;
    serde_json::from_slice(&payload).map_err(|e| SessionError::MalformedToken(e.to_string()))
}
