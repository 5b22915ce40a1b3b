// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    app::App,
    error::{self, Error, Result},
    gateway::Gateway,
    model::user::Credentials,
    notify,
    password::{Prompt as _, RequestBuilder},
};

/// Sign in and keep the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The username of the account.
    #[clap()]
    username: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let password = app
            .prompt
            .prompt(RequestBuilder::new().into_request())
            .await?
            .ok_or(error::Password::NoPrompt)?;

        let credentials = Credentials {
            username: self.username,
            password,
        };
        match app.session.login(&credentials).await {
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| format!("Signed in as {}.", response.user.username));
                let _ = app.notices.push(text, notify::Kind::Success).await;
                Ok(())
            }
            Err(e) => {
                let _ = app.notices.push(e.to_string(), notify::Kind::Error).await;
                Err(Error::Command)
            }
        }
    }
}
