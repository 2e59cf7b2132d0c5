use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::UrlSearchParams;

use shared::config::FirebaseConfig;
use shared::constants::{STORAGE_REFRESH_TOKEN, TOKEN_REFRESH_MARGIN_SECS};
use shared::error::ServiceError;
use shared::identity_toolkit::{
    auth_error, decode_error, parse_expires_in, refresh_params, LookupRequest, LookupResponse, PasswordRequest,
    PasswordResponse, RefreshResponse, UpdateProfileRequest, UpdateProfileResponse,
};
use shared::observer::{SessionObservers, Subscription};
use shared::services::IdentityService;
use shared::types::Session;

use crate::connect_fetch::{send_form, send_json};
use crate::utils::{js_message, storage_get, storage_remove, storage_set};

#[derive(Debug, Clone)]
struct Credentials {
    session: Session,
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl Credentials {
    fn expires_soon(&self) -> bool {
        self.expires_at - Utc::now() < Duration::seconds(TOKEN_REFRESH_MARGIN_SECS)
    }
}

fn expiry(expires_in: &str) -> DateTime<Utc> {
    Utc::now() + Duration::seconds(parse_expires_in(expires_in))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|err| ServiceError::Decode(err.to_string()))
}

fn refresh_body(refresh_token: &str) -> Result<String, ServiceError> {
    let params = UrlSearchParams::new().map_err(|err| ServiceError::Network(js_message(&err)))?;
    for (key, value) in refresh_params(refresh_token) {
        params.append(key, value);
    }
    Ok(params.to_string().into())
}

async fn call<B, R>(url: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize,
        R: DeserializeOwned
{
    let reply = send_json("POST", url, Some(body), None).await?;
    if !reply.is_success() {
        return Err(decode_error(reply.status, &reply.body));
    }
    decode(&reply.body)
}

/// Signed-in credentials shared by the identity client and the document store.
///
/// The refresh token is mirrored to `localStorage` so a reload stays signed in.
#[derive(Clone)]
pub struct TokenStore {
    config: Rc<FirebaseConfig>,
    credentials: Rc<RefCell<Option<Credentials>>>,
}

impl TokenStore {
    fn new(config: Rc<FirebaseConfig>) -> Self {
        Self {
            config,
            credentials: Rc::new(RefCell::new(None)),
        }
    }

    fn session(&self) -> Option<Session> {
        self.credentials.borrow().as_ref().map(|c| c.session.clone())
    }

    fn set(&self, credentials: Option<Credentials>) {
        match &credentials {
            Some(c) => storage_set(STORAGE_REFRESH_TOKEN, &c.refresh_token),
            None => storage_remove(STORAGE_REFRESH_TOKEN),
        }
        *self.credentials.borrow_mut() = credentials;
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ServiceError> {
        let reply = send_form(&self.config.token_url(), &refresh_body(refresh_token)?).await?;
        if !reply.is_success() {
            return Err(decode_error(reply.status, &reply.body));
        }
        decode(&reply.body)
    }

    /// A valid ID token for the signed-in user, refreshed first if it is about to expire.
    pub async fn id_token(&self) -> Result<String, ServiceError> {
        let current = self.credentials.borrow().clone();
        let mut credentials = current.ok_or_else(|| auth_error("auth/no-current-user"))?;
        if !credentials.expires_soon() {
            return Ok(credentials.id_token);
        }

        log::info!("refreshing ID token for {}", credentials.session.uid);
        let fresh = self.refresh(&credentials.refresh_token).await?;
        credentials.id_token = fresh.id_token;
        credentials.refresh_token = fresh.refresh_token;
        credentials.expires_at = expiry(&fresh.expires_in);
        let token = credentials.id_token.clone();

        // keep the update only if nobody signed out or switched users meanwhile
        let same_user = self
            .credentials
            .borrow()
            .as_ref()
            .is_some_and(|c| c.session.uid == credentials.session.uid);
        if same_user {
            self.set(Some(credentials));
        }
        Ok(token)
    }
}

/// Email/password accounts on the Identity Toolkit REST API.
#[derive(Clone)]
pub struct FirebaseIdentity {
    config: Rc<FirebaseConfig>,
    tokens: TokenStore,
    observers: SessionObservers,
}

impl FirebaseIdentity {
    pub fn new(config: Rc<FirebaseConfig>) -> Self {
        Self {
            tokens: TokenStore::new(config.clone()),
            config,
            observers: SessionObservers::new(),
        }
    }

    pub fn tokens(&self) -> TokenStore {
        self.tokens.clone()
    }

    /// Resumes the session persisted by an earlier visit, if any.
    pub async fn restore(&self) {
        let Some(refresh_token) = storage_get(STORAGE_REFRESH_TOKEN) else {
            return;
        };
        match self.resume(&refresh_token).await {
            Ok(credentials) => {
                log::info!("restored session {}", credentials.session.uid);
                self.tokens.set(Some(credentials));
            }
            Err(err) => {
                log::warn!("could not restore session: {err}");
                self.tokens.set(None);
            }
        }
    }

    async fn resume(&self, refresh_token: &str) -> Result<Credentials, ServiceError> {
        let fresh = self.tokens.refresh(refresh_token).await?;
        let lookup: LookupResponse = call(
            &self.config.identity_url("lookup"),
            &LookupRequest { id_token: &fresh.id_token },
        )
        .await?;
        let user = lookup
            .users
            .into_iter()
            .find(|u| u.local_id == fresh.user_id)
            .ok_or_else(|| auth_error("auth/user-not-found"))?;
        if user.disabled {
            return Err(auth_error("auth/user-disabled"));
        }
        Ok(Credentials {
            session: user.session(),
            id_token: fresh.id_token,
            refresh_token: fresh.refresh_token,
            expires_at: expiry(&fresh.expires_in),
        })
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<Session, ServiceError> {
        let reply: PasswordResponse = call(&self.config.identity_url(method), &PasswordRequest::new(email, password)).await?;
        let session = reply.session();
        self.switch_to(Some(Credentials {
            session: session.clone(),
            id_token: reply.id_token,
            refresh_token: reply.refresh_token,
            expires_at: expiry(&reply.expires_in),
        }));
        Ok(session)
    }

    fn switch_to(&self, credentials: Option<Credentials>) {
        let before = self.tokens.session().map(|s| s.uid);
        let after = credentials.as_ref().map(|c| c.session.uid.clone());
        self.tokens.set(credentials);
        if before != after {
            self.observers.notify(self.tokens.session());
        }
    }
}

impl IdentityService for FirebaseIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        self.switch_to(None);
        Ok(())
    }

    async fn set_display_name(&self, session: &Session, name: &str) -> Result<(), ServiceError> {
        let id_token = self.tokens.id_token().await?;
        let reply: UpdateProfileResponse = call(
            &self.config.identity_url("update"),
            &UpdateProfileRequest {
                id_token: &id_token,
                display_name: name,
                return_secure_token: false,
            },
        )
        .await?;
        if let Some(credentials) = self.tokens.credentials.borrow_mut().as_mut() {
            if credentials.session.uid == session.uid && credentials.session.uid == reply.local_id {
                credentials.session.display_name = reply.display_name.filter(|n| !n.is_empty());
            }
        }
        Ok(())
    }

    fn on_session_changed(&self, observer: Box<dyn Fn(Option<Session>)>) -> Subscription {
        self.observers.subscribe(self.tokens.session(), observer)
    }
}
