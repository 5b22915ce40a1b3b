// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures_util::lock::Mutex;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    api,
    error::Result,
    gateway::Gateway,
    model::user::{Credentials, NewUser, User},
    validate,
};

/// What the client currently believes about the login session. `Checking`
/// holds only until the initial status probe resolves; after that the store
/// is always in exactly one of the other two states. A user is carried by
/// `Authenticated` and nowhere else, so identity and authentication cannot
/// disagree.
#[derive(Clone, Debug)]
pub(crate) enum State {
    Checking,
    Authenticated(User),
    Anonymous,
}

/// Session data persisted between invocations: the cookies the service
/// handed us, as `name=value` pairs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Persisted {
    pub(crate) cookies: Vec<String>,
}

/// Single source of truth for "is there a signed-in user, and who".
pub(crate) struct Store<G> {
    gateway: Arc<G>,
    state: Mutex<State>,
    auth_changes: watch::Sender<bool>,
}

impl<G: Gateway> Store<G> {
    pub(crate) fn new(gateway: Arc<G>) -> Self {
        let (auth_changes, _) = watch::channel(false);
        Self {
            gateway,
            state: Mutex::new(State::Checking),
            auth_changes,
        }
    }

    /// Observers see `true` whenever the store settles into
    /// `Authenticated` and `false` otherwise.
    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_changes.subscribe()
    }

    pub(crate) async fn state(&self) -> State {
        self.state.lock().await.clone()
    }

    pub(crate) async fn is_checking(&self) -> bool {
        matches!(*self.state.lock().await, State::Checking)
    }

    pub(crate) async fn authenticated_user(&self) -> Option<User> {
        match &*self.state.lock().await {
            State::Authenticated(user) => Some(user.clone()),
            State::Checking | State::Anonymous => None,
        }
    }

    /// The one-shot status probe. Whatever the outcome — signed in, signed
    /// out, or a transport failure — the `Checking` phase ends here; the
    /// error is handed back for reporting only.
    pub(crate) async fn check_status(&self) -> Result<()> {
        let probe = self.gateway.auth_status().await;
        let mut state = self.state.lock().await;
        match probe {
            Ok(api::StatusResponse {
                is_authenticated: true,
                user: Some(user),
            }) => {
                debug!("status probe: signed in as {}", user.username);
                *state = State::Authenticated(user);
                let _ = self.auth_changes.send_replace(true);
                Ok(())
            }
            Ok(_) => {
                debug!("status probe: anonymous");
                *state = State::Anonymous;
                let _ = self.auth_changes.send_replace(false);
                Ok(())
            }
            Err(e) => {
                *state = State::Anonymous;
                let _ = self.auth_changes.send_replace(false);
                Err(e)
            }
        }
    }

    /// On success the returned user becomes the session identity; on
    /// failure the store settles into `Anonymous` and the error is passed
    /// through for the caller to render.
    pub(crate) async fn login(&self, credentials: &Credentials) -> Result<api::LoginResponse> {
        validate::non_empty("username", &credentials.username)?;

        let attempt = self.gateway.login(credentials).await;
        let mut state = self.state.lock().await;
        match attempt {
            Ok(response) => {
                *state = State::Authenticated(response.user.clone());
                let _ = self.auth_changes.send_replace(true);
                Ok(response)
            }
            Err(e) => {
                *state = State::Anonymous;
                let _ = self.auth_changes.send_replace(false);
                Err(e)
            }
        }
    }

    /// Always leaves the client signed out locally, even when the remote
    /// call fails; the failure is reported but must not resurrect the
    /// session.
    pub(crate) async fn logout(&self) -> Result<Option<String>> {
        let attempt = self.gateway.logout().await;
        {
            let mut state = self.state.lock().await;
            *state = State::Anonymous;
            let _ = self.auth_changes.send_replace(false);
        }
        attempt.map(|ack| ack.message)
    }

    /// Registration is a pass-through: a created account does not become
    /// the session identity.
    pub(crate) async fn signup(&self, registration: &NewUser) -> Result<api::SignupResponse> {
        validate::new_user(registration)?;
        self.gateway.signup(registration).await
    }
}
