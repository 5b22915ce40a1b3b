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

/// Upload a document (PDF, PNG, JPEG, or TIFF) for analysis.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The document to upload.
    #[clap(value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let result = app.analysis.upload_document(&self.file).await;
        app.report(Operation::Upload).await;

        match result {
            Ok(Some(analysis)) => {
                let data = &analysis.analyzed_data;
                match (&data.invoice_number, data.total_amount) {
                    (Some(number), Some(total)) => match data.currency.as_deref() {
                        Some(currency) => println!(
                            "Extracted invoice {number} with a total of {total:.2} {currency}."
                        ),
                        None => {
                            println!("Extracted invoice {number} with a total of {total:.2}.");
                        }
                    },
                    (Some(number), None) => println!("Extracted invoice {number}."),
                    _ => println!(
                        "Extracted a {} document.",
                        data.document_type.as_deref().unwrap_or("new")
                    ),
                }
                if !data.validation_errors.is_empty() {
                    println!(
                        "The extraction reported {} validation problem(s); \
                         run `taxdoc show` for details.",
                        data.validation_errors.len()
                    );
                }
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(_) => Err(Error::Command),
        }
    }
}
