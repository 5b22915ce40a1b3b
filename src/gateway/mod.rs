// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod http;

use async_trait::async_trait;

use crate::{
    api,
    error::Result,
    model::{
        document::DocumentDetail,
        user::{Credentials, NewUser},
    },
};

/// A document ready to be sent to the upload endpoint. The MIME type has
/// already passed local validation at this point.
pub(crate) struct Upload {
    pub(crate) filename: String,
    pub(crate) mime_type: &'static str,
    pub(crate) bytes: Vec<u8>,
}

pub(crate) struct PdfPayload {
    pub(crate) bytes: Vec<u8>,
    pub(crate) filename: Option<String>,
}

/// The one place the crate talks to the remote service. Implementations
/// carry the session credentials on every call; callers get either a parsed
/// payload or a structured failure.
#[async_trait]
pub(crate) trait Gateway: Send + Sync {
    async fn auth_status(&self) -> Result<api::StatusResponse>;

    async fn login(&self, credentials: &Credentials) -> Result<api::LoginResponse>;

    async fn logout(&self) -> Result<api::AckResponse>;

    async fn signup(&self, registration: &NewUser) -> Result<api::SignupResponse>;

    async fn my_documents(&self) -> Result<api::DocumentListResponse>;

    async fn upload_document(&self, upload: Upload) -> Result<api::UploadResponse>;

    async fn analysis_detail(&self, document_id: u64) -> Result<DocumentDetail>;

    async fn analysis_pdf(&self, document_id: u64, lang: &str) -> Result<PdfPayload>;

    async fn analysis_speech(&self, document_id: u64, lang: &str) -> Result<Vec<u8>>;
}
