// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{app::App, error::Result, gateway::Gateway, notify};

/// Sign out. The local session is discarded even when the server cannot be
/// reached.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        match app.session.logout().await {
            Ok(message) => {
                let _ = app
                    .notices
                    .push(
                        message.unwrap_or_else(|| "Logged out successfully".to_owned()),
                        notify::Kind::Success,
                    )
                    .await;
            }
            Err(e) => {
                let _ = app
                    .notices
                    .push(
                        format!(
                            "The server could not complete the sign-out ({e}); \
                             the local session was discarded anyway."
                        ),
                        notify::Kind::Warning,
                    )
                    .await;
            }
        }
        Ok(())
    }
}
