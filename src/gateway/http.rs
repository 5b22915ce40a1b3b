// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures_util::lock::Mutex;
use log::debug;
use reqwest::{
    cookie::Jar,
    header::HeaderMap,
    multipart::{Form, Part},
    Response, StatusCode,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    api,
    error::{self, Result},
    metadata,
    model::{
        document::DocumentDetail,
        user::{Credentials, NewUser},
    },
};

use super::{Gateway, PdfPayload, Upload};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The shared HTTP client. Cookies received from the service are both kept
/// in the jar for session continuity and mirrored into `captured` so they
/// can be persisted between invocations.
pub(crate) struct Http {
    client: reqwest::Client,
    base: Url,
    captured: Mutex<BTreeMap<String, String>>,
}

impl Http {
    pub(crate) fn new(base: Url, stored_cookies: &[String]) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let mut captured = BTreeMap::new();
        for cookie in stored_cookies {
            jar.add_cookie_str(cookie, &base);
            if let Some((name, value)) = cookie.split_once('=') {
                let _ = captured.insert(name.to_owned(), value.to_owned());
            }
        }

        let client = reqwest::Client::builder()
            .user_agent(metadata::CLIENT_NAME.as_str())
            .cookie_provider(jar)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base,
            captured: Mutex::new(captured),
        })
    }

    /// The cookies to persist for the next invocation, as `name=value`
    /// pairs.
    pub(crate) async fn session_cookies(&self) -> Vec<String> {
        self.captured
            .lock()
            .await
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect()
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    async fn capture_cookies(&self, response: &Response) {
        let mut captured = self.captured.lock().await;
        for cookie in response.cookies() {
            debug!("captured session cookie {}", cookie.name());
            let _ = captured.insert(cookie.name().to_owned(), cookie.value().to_owned());
        }
    }

    /// Turns a non-2xx response into `Api::Remote`, preferring the server's
    /// own `message` field over the bare status line.
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<api::ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            });
        Err(error::Api::Remote { status, message }.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        self.capture_cookies(&response).await;
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        self.capture_cookies(&response).await;
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn get_binary(&self, path: &str, lang: &str) -> Result<Response> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("lang", lang)])
            .send()
            .await?;
        self.capture_cookies(&response).await;
        Self::ensure_success(response).await
    }
}

#[async_trait]
impl Gateway for Http {
    async fn auth_status(&self) -> Result<api::StatusResponse> {
        let response = self.client.get(self.endpoint("/auth/status")).send().await?;
        self.capture_cookies(&response).await;

        // A 401 from the status probe just means "anonymous".
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(api::StatusResponse {
                is_authenticated: false,
                user: None,
            });
        }

        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn login(&self, credentials: &Credentials) -> Result<api::LoginResponse> {
        self.post_json(
            "/auth/login",
            &api::LoginRequest {
                username: &credentials.username,
                password: credentials.password.expose_secret(),
            },
        )
        .await
    }

    async fn logout(&self) -> Result<api::AckResponse> {
        let response = self.client.post(self.endpoint("/auth/logout")).send().await?;
        self.capture_cookies(&response).await;
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn signup(&self, registration: &NewUser) -> Result<api::SignupResponse> {
        self.post_json(
            "/auth/signup",
            &api::SignupRequest {
                username: &registration.username,
                email: &registration.email,
                password: registration.password.expose_secret(),
                confirm_password: registration.confirm_password.expose_secret(),
            },
        )
        .await
    }

    async fn my_documents(&self) -> Result<api::DocumentListResponse> {
        self.get_json("/dashboard/my_documents").await
    }

    async fn upload_document(&self, upload: Upload) -> Result<api::UploadResponse> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(upload.mime_type)?;
        let form = Form::new().part("document", part);

        let response = self
            .client
            .post(self.endpoint("/documents/upload"))
            .multipart(form)
            .send()
            .await?;
        self.capture_cookies(&response).await;
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    async fn analysis_detail(&self, document_id: u64) -> Result<DocumentDetail> {
        self.get_json(&format!("/analysis/{document_id}")).await
    }

    async fn analysis_pdf(&self, document_id: u64, lang: &str) -> Result<PdfPayload> {
        let response = self
            .get_binary(&format!("/analysis/{document_id}/download_pdf"), lang)
            .await?;
        let filename = content_disposition_filename(response.headers());
        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(error::Api::EmptyPayload("PDF").into());
        }

        Ok(PdfPayload { bytes, filename })
    }

    async fn analysis_speech(&self, document_id: u64, lang: &str) -> Result<Vec<u8>> {
        let response = self
            .get_binary(&format!("/analysis/{document_id}/speak"), lang)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Pulls the suggested filename out of a `Content-Disposition` header,
/// tolerating both quoted and bare forms.
fn content_disposition_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    let (_, after) = value.split_once("filename=")?;
    let name = after
        .split(';')
        .next()
        .unwrap_or(after)
        .trim()
        .trim_matches('"');
    if name.is_empty() {
        return None;
    }

    Some(name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_DISPOSITION};

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn filename_from_quoted_disposition() {
        assert_eq!(
            content_disposition_filename(&headers(
                r#"attachment; filename="analysis_report_12.pdf"; size=882"#
            ))
            .as_deref(),
            Some("analysis_report_12.pdf")
        );
    }

    #[test]
    fn filename_from_bare_disposition() {
        assert_eq!(
            content_disposition_filename(&headers("attachment; filename=report.pdf")).as_deref(),
            Some("report.pdf")
        );
    }

    #[test]
    fn missing_filename_yields_none() {
        assert_eq!(content_disposition_filename(&headers("inline")), None);
        assert_eq!(content_disposition_filename(&HeaderMap::new()), None);
        assert_eq!(
            content_disposition_filename(&headers(r#"attachment; filename="""#)),
            None
        );
    }

    #[test]
    fn endpoints_keep_the_base_path_prefix() {
        let gateway = Http::new(
            Url::parse("http://localhost:5000/api").unwrap(),
            &["session=abc123".to_owned()],
        )
        .unwrap();

        assert_eq!(
            gateway.endpoint("/auth/status").as_str(),
            "http://localhost:5000/api/auth/status"
        );
        assert_eq!(
            gateway.endpoint("/analysis/9/download_pdf").as_str(),
            "http://localhost:5000/api/analysis/9/download_pdf"
        );
    }

    #[tokio::test]
    async fn stored_cookies_survive_a_round_trip() {
        let gateway = Http::new(
            Url::parse("http://localhost:5000/api").unwrap(),
            &["session=abc123".to_owned()],
        )
        .unwrap();

        assert_eq!(
            gateway.session_cookies().await,
            vec!["session=abc123".to_owned()]
        );
    }
}
