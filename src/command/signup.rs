// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    app::App,
    error::{self, Error, Result},
    gateway::Gateway,
    model::user::NewUser,
    notify,
    password::{Prompt as _, RequestBuilder},
};

/// Register a new account. Registration does not sign you in; run
/// `taxdoc login` afterwards.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The username for the new account.
    #[clap()]
    username: String,

    /// The email address for the new account.
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let password = app
            .prompt
            .prompt(RequestBuilder::new().with_label("Choose a password").into_request())
            .await?
            .ok_or(error::Password::NoPrompt)?;
        let confirm_password = app
            .prompt
            .prompt(
                RequestBuilder::new()
                    .with_label("Confirm the password")
                    .into_request(),
            )
            .await?
            .ok_or(error::Password::NoPrompt)?;

        let registration = NewUser {
            username: self.username,
            email: self.email,
            password,
            confirm_password,
        };
        match app.session.signup(&registration).await {
            Ok(response) => {
                let _ = app
                    .notices
                    .push(response.message, notify::Kind::Success)
                    .await;
                Ok(())
            }
            Err(e) => {
                let _ = app.notices.push(e.to_string(), notify::Kind::Error).await;
                Err(Error::Command)
            }
        }
    }
}
