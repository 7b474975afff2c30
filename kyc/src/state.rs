//! Application state: the signed-in session and admin-side KYC state.
//!
//! State changes only through [`reduce`], a pure function of the previous
//! state and a typed [`Action`]. Callers own the [`AppState`] value and pass
//! it where it is needed.

use std::collections::BTreeSet;

use crate::error::{KycError, Result};
use crate::types::{Entity, KycLevel, Role};

/// The signed-in user. Authentication is mocked: sessions are created
/// locally, not issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn mock_admin() -> Self {
        Self {
            user_id: "usr-1".into(),
            email: "alice.johnson@example.com".into(),
            role: Role::Admin,
        }
    }

    pub fn mock_user(user_id: &str) -> Self {
        Self {
            user_id: user_id.into(),
            email: format!("{user_id}@example.com"),
            role: Role::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub levels: Vec<KycLevel>,
    pub selected_level: Option<String>,
    /// A create/update/delete is in flight.
    pub saving: bool,
    /// Last failed operation, shown until cleared.
    pub error: Option<String>,
    /// Entity paths whose cached lists must be refetched.
    pub stale: BTreeSet<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: Option<Session>,
    pub admin: AdminState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SignedIn(Session),
    SignedOut,
    LevelsLoaded(Vec<KycLevel>),
    LevelSelected(String),
    MutationStarted,
    MutationSucceeded { entity: &'static str, id: String },
    OperationFailed(String),
    ErrorCleared,
}

/// Compute the next state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    let AppState { session, mut admin } = state;
    match action {
        Action::SignedIn(new_session) => AppState {
            session: Some(new_session),
            admin: AdminState::default(),
        },
        Action::SignedOut => AppState::default(),
        Action::LevelsLoaded(levels) => {
            admin.stale.remove(KycLevel::PATH);
            if let Some(selected) = &admin.selected_level {
                if !levels.iter().any(|l| &l.id == selected) {
                    admin.selected_level = None;
                }
            }
            admin.levels = levels;
            AppState { session, admin }
        }
        Action::LevelSelected(id) => {
            admin.selected_level = Some(id);
            AppState { session, admin }
        }
        Action::MutationStarted => {
            admin.saving = true;
            admin.error = None;
            AppState { session, admin }
        }
        Action::MutationSucceeded { entity, .. } => {
            admin.saving = false;
            admin.stale.insert(entity);
            AppState { session, admin }
        }
        Action::OperationFailed(message) => {
            admin.saving = false;
            admin.error = Some(message);
            AppState { session, admin }
        }
        Action::ErrorCleared => {
            admin.error = None;
            AppState { session, admin }
        }
    }
}

impl AppState {
    /// Replace `self` with the reduced state.
    pub fn apply(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }

    /// Fail with a validation error unless an administrator is signed in.
    pub fn require_admin(&self) -> Result<&Session> {
        match &self.session {
            Some(s) if s.is_admin() => Ok(s),
            Some(_) => Err(KycError::Validation(
                "this action requires an administrator".into(),
            )),
            None => Err(KycError::Validation("not signed in".into())),
        }
    }

    pub fn is_stale(&self, entity: &str) -> bool {
        self.admin.stale.contains(entity)
    }

    pub fn selected_level(&self) -> Option<&KycLevel> {
        let id = self.admin.selected_level.as_ref()?;
        self.admin.levels.iter().find(|l| &l.id == id)
    }
}
