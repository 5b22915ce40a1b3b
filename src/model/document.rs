// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;

/// One row of the dashboard listing: the document plus the condensed
/// extraction summary the server attaches when an analysis exists.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DocumentSummary {
    pub(crate) id: u64,
    pub(crate) filename: String,
    #[serde(default)]
    pub(crate) upload_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub(crate) summary: Option<Summary>,
    #[serde(default)]
    pub(crate) has_analysis: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct Summary {
    #[serde(default)]
    pub(crate) invoice_number: Option<String>,
    #[serde(default)]
    pub(crate) vendor_name: Option<String>,
    #[serde(default)]
    pub(crate) total_amount: Option<f64>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
    #[serde(default)]
    pub(crate) date: Option<String>,
}

/// The full analysis record for one document.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DocumentDetail {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) document_id: Option<u64>,
    #[serde(default)]
    pub(crate) filename: Option<String>,
    #[serde(default)]
    pub(crate) analyzed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub(crate) preferred_language: Option<String>,
    pub(crate) analyzed_data: AnalyzedData,
}

/// Structured fields the extraction pipeline pulled out of the document.
/// Everything is optional: OCR output is best-effort, and the server adds
/// new keys over time, which land in `extra`.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct AnalyzedData {
    #[serde(default)]
    pub(crate) document_type: Option<String>,
    #[serde(default)]
    pub(crate) invoice_number: Option<String>,
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    pub(crate) due_date: Option<String>,
    #[serde(default)]
    pub(crate) vendor_name: Option<String>,
    #[serde(default)]
    pub(crate) vendor_address: Option<String>,
    #[serde(default)]
    pub(crate) vendor_tax_id: Option<String>,
    #[serde(default)]
    pub(crate) customer_name: Option<String>,
    #[serde(default)]
    pub(crate) customer_address: Option<String>,
    #[serde(default)]
    pub(crate) customer_tax_id: Option<String>,
    #[serde(default)]
    pub(crate) subtotal_amount: Option<f64>,
    #[serde(default)]
    pub(crate) tax_amount: Option<f64>,
    #[serde(default)]
    pub(crate) total_amount: Option<f64>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
    #[serde(default)]
    pub(crate) payment_terms: Option<String>,
    #[serde(default)]
    pub(crate) notes: Option<String>,
    #[serde(default)]
    pub(crate) line_items: Vec<LineItem>,
    #[serde(default)]
    pub(crate) validation_errors: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) warnings: BTreeMap<String, String>,
    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct LineItem {
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) quantity: Option<f64>,
    #[serde(default)]
    pub(crate) unit_price: Option<f64>,
    #[serde(default)]
    pub(crate) total_price: Option<f64>,
}
