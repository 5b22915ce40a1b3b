// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;

use crate::{
    analysis::Operation,
    app::App,
    error::{Error, Result},
    gateway::Gateway,
};

/// Download the PDF report for one document.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The document ID, as shown by `taxdoc list`.
    #[clap()]
    id: u64,

    /// The language of the report.
    #[clap(short, long, default_value = "en")]
    lang: String,

    /// Where to put the report: a directory (the server's suggested
    /// filename is used) or an explicit file path.
    #[clap(short, long, default_value = ".", value_hint = clap::ValueHint::AnyPath)]
    output: PathBuf,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let result = app
            .analysis
            .download_pdf(self.id, &self.lang, &self.output)
            .await;
        app.report(Operation::DownloadPdf).await;

        result.map(|_| ()).map_err(|_| Error::Command)
    }
}
