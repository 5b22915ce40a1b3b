// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{app::App, error::Result, gateway::Gateway};

pub(crate) mod list;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod pdf;
pub(crate) mod show;
pub(crate) mod signup;
pub(crate) mod speak;
pub(crate) mod upload;
pub(crate) mod whoami;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()>;
}
