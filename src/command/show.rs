// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    analysis::Operation,
    app::App,
    error::{Error, Result},
    gateway::Gateway,
    model::document::{DocumentDetail, LineItem},
};

/// Show the detailed analysis of one document.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The document ID, as shown by `taxdoc list`.
    #[clap()]
    id: u64,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Total")]
    total_price: String,
}

impl From<&LineItem> for ItemRow {
    fn from(item: &LineItem) -> Self {
        let amount = |value: Option<f64>| value.map_or_else(String::new, |v| format!("{v:.2}"));
        Self {
            description: item.description.clone().unwrap_or_default(),
            quantity: amount(item.quantity),
            unit_price: amount(item.unit_price),
            total_price: amount(item.total_price),
        }
    }
}

fn field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("{label}: {value}");
    }
}

fn amount_field(label: &str, value: Option<f64>, currency: Option<&str>) {
    if let Some(value) = value {
        match currency {
            Some(currency) => println!("{label}: {value:.2} {currency}"),
            None => println!("{label}: {value:.2}"),
        }
    }
}

fn render(detail: &DocumentDetail) {
    let data = &detail.analyzed_data;
    let currency = data.currency.as_deref();

    field("Filename", detail.filename.as_deref());
    if let Some(analyzed_at) = detail.analyzed_at {
        println!("Analyzed: {}", analyzed_at.format("%Y-%m-%d %H:%M"));
    }
    field("Language", detail.preferred_language.as_deref());
    field("Document type", data.document_type.as_deref());
    field("Invoice number", data.invoice_number.as_deref());
    field("Date", data.date.as_deref());
    field("Due date", data.due_date.as_deref());
    field("Vendor", data.vendor_name.as_deref());
    field("Vendor tax ID", data.vendor_tax_id.as_deref());
    field("Customer", data.customer_name.as_deref());
    field("Payment terms", data.payment_terms.as_deref());
    amount_field("Subtotal", data.subtotal_amount, currency);
    amount_field("Tax", data.tax_amount, currency);
    amount_field("Total", data.total_amount, currency);
    field("Notes", data.notes.as_deref());

    if !data.line_items.is_empty() {
        println!(
            "{}",
            Table::new(data.line_items.iter().map(ItemRow::from)).with(Style::rounded())
        );
    }
    if !data.validation_errors.is_empty() {
        println!("Validation errors:");
        for (key, value) in &data.validation_errors {
            println!("  {key}: {value}");
        }
    }
    if !data.warnings.is_empty() {
        println!("Warnings:");
        for (key, value) in &data.warnings {
            println!("  {key}: {value}");
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let result = app.analysis.fetch_detailed_analysis(self.id).await;
        app.report(Operation::FetchDetail).await;

        match result {
            Ok(Some(detail)) => {
                render(&detail);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(_) => Err(Error::Command),
        }
    }
}
