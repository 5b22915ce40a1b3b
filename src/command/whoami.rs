// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{app::App, error::Result, gateway::Gateway, session::State};

/// Show who the service believes is signed in.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        match app.session.state().await {
            State::Authenticated(user) => match user.email {
                Some(email) => println!("Signed in as {} <{}>.", user.username, email),
                None => println!("Signed in as {}.", user.username),
            },
            State::Anonymous => println!("Not signed in."),
            State::Checking => println!("The session status has not been determined yet."),
        }
        Ok(())
    }
}
