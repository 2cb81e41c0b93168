//! Session layer: per-session profile, credential and latest result.
//!
//! Sessions live in process memory only. The store's lock guards the map and
//! is never held while a generation call is in flight. A session ends on an
//! explicit delete or after sitting idle longer than the configured TTL.

pub mod handlers;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::coaching::dispatcher::{DispatchOutcome, OutcomeKind};
use crate::coaching::features::Feature;
use crate::coaching::schedule::{build_schedule, ScheduleTable};
use crate::errors::AppError;
use crate::models::profile::{Choice, Profile};

pub const CREDENTIAL_PRESENT: &str = "API Connected";
pub const CREDENTIAL_MISSING: &str = "Enter API Key";

/// Result panel timestamp, e.g. "19 October 2026 | 03:07 PM".
const GENERATED_AT_FORMAT: &str = "%d %B %Y | %I:%M %p";

/// An API key pasted by the user. Debug output is redacted.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Blank input counts as no credential.
    pub fn new(raw: Option<String>) -> Option<Self> {
        raw.map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Credential)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// The latest feature invocation. Overwritten by the next one.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub feature: Feature,
    pub kind: OutcomeKind,
    pub text: String,
    pub generated_at: DateTime<Local>,
}

impl SessionResult {
    pub fn new(feature: Feature, outcome: DispatchOutcome, generated_at: DateTime<Local>) -> Self {
        Self {
            feature,
            kind: outcome.kind,
            text: outcome.text,
            generated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub profile: Profile,
    pub credential: Option<Credential>,
    pub result: Option<SessionResult>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every read or write through the store.
    pub last_active: Instant,
}

impl Session {
    fn new(profile: Profile, credential: Option<Credential>) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            credential,
            result: None,
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    /// "Welcome {name} | Level: {level} | Goal: {goal}", only once a name is entered.
    pub fn welcome(&self) -> Option<String> {
        self.profile.has_name().then(|| {
            format!(
                "Welcome {} | Level: {} | Goal: {}",
                self.profile.display_name(),
                self.profile.level.label(),
                self.profile.goal.label()
            )
        })
    }

    pub fn credential_status(&self) -> &'static str {
        if self.credential.is_some() {
            CREDENTIAL_PRESENT
        } else {
            CREDENTIAL_MISSING
        }
    }

    /// The result panel for the latest invocation. The schedule follows the
    /// profile's current injuries, not the ones at generation time.
    pub fn result_panel(&self) -> Option<ResultPanel> {
        let result = self.result.as_ref()?;
        let generated_at = format_generated_at(&result.generated_at);
        Some(ResultPanel {
            feature: result.feature,
            caption: format!("Generated on {generated_at}"),
            generated_at,
            kind: result.kind,
            text: result.text.clone(),
            schedule: build_schedule(&self.profile.injuries),
        })
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            profile: self.profile.clone(),
            credential_status: self.credential_status(),
            welcome: self.welcome(),
            result: self.result_panel(),
            created_at: self.created_at,
        }
    }
}

pub fn format_generated_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format(GENERATED_AT_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultPanel {
    pub feature: Feature,
    pub generated_at: String,
    pub caption: String,
    pub kind: OutcomeKind,
    pub text: String,
    pub schedule: ScheduleTable,
}

/// Client-facing snapshot of a session. Never includes the credential itself.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub profile: Profile,
    pub credential_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    pub result: Option<ResultPanel>,
    pub created_at: DateTime<Utc>,
}

/// Cloneable handle to the in-memory session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn create(&self, profile: Profile, credential: Option<Credential>) -> Session {
        let session = Session::new(profile, credential);
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        info!("Session {} created", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.modify(id, |_| {}).await
    }

    pub async fn update_profile(&self, id: Uuid, profile: Profile) -> Result<Session, AppError> {
        self.modify(id, |s| s.profile = profile).await
    }

    pub async fn set_credential(
        &self,
        id: Uuid,
        credential: Option<Credential>,
    ) -> Result<Session, AppError> {
        self.modify(id, |s| s.credential = credential).await
    }

    pub async fn record_result(
        &self,
        id: Uuid,
        result: SessionResult,
    ) -> Result<Session, AppError> {
        self.modify(id, |s| s.result = Some(result)).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if self.inner.write().await.remove(&id).is_none() {
            return Err(not_found(id));
        }
        info!("Session {id} ended");
        Ok(())
    }

    async fn modify(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut Session),
    ) -> Result<Session, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        change(session);
        session.last_active = Instant::now();
        Ok(session.clone())
    }

    /// Drops every session idle for at least `ttl`. Returns how many were dropped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active.elapsed() < ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions ({} remain)", sessions.len());
        }
        evicted
    }

    /// Background task running `evict_idle` every `every`.
    pub fn spawn_idle_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let evicted = store.evict_idle(ttl).await;
                debug!("Idle session sweep finished, {evicted} evicted");
            }
        })
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
