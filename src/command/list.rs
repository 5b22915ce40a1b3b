// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::{
    analysis::Operation,
    app::App,
    error::{Error, Result},
    gateway::Gateway,
    model::document::DocumentSummary,
};

/// List your uploaded documents and their analysis summaries.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "Uploaded")]
    uploaded: String,
    #[tabled(rename = "Invoice No.")]
    invoice_number: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Analyzed")]
    analyzed: String,
}

impl From<&DocumentSummary> for Row {
    fn from(doc: &DocumentSummary) -> Self {
        let summary = doc.summary.clone().unwrap_or_default();
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            uploaded: doc
                .upload_date
                .map_or_else(String::new, |date| date.format("%Y-%m-%d %H:%M").to_string()),
            invoice_number: summary.invoice_number.unwrap_or_default(),
            vendor: summary.vendor_name.unwrap_or_default(),
            total: match (summary.total_amount, summary.currency) {
                (Some(amount), Some(currency)) => format!("{amount:.2} {currency}"),
                (Some(amount), None) => format!("{amount:.2}"),
                (None, _) => String::new(),
            },
            analyzed: if doc.has_analysis { "yes" } else { "no" }.to_owned(),
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let result = app.analysis.fetch_previous_analyses().await;
        app.report(Operation::FetchList).await;

        match result {
            Ok(documents) if documents.is_empty() => {
                println!("No analyzed documents yet.");
                Ok(())
            }
            Ok(documents) => {
                println!(
                    "{}",
                    Table::new(documents.iter().map(Row::from))
                        .with(Style::rounded())
                        .with(Modify::new(Segment::new(1.., 1..=2)).with(Alignment::left()))
                );
                Ok(())
            }
            Err(_) => Err(Error::Command),
        }
    }
}
