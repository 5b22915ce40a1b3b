// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures_util::lock::Mutex;
use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Error, Result},
    gateway::{Gateway, Upload},
    model::document::{DocumentDetail, DocumentSummary},
    session, validate,
};

/// The remote operations the orchestrator coordinates. Each one owns its
/// own slot in the status registry, so a slow list refresh can never
/// clobber the progress of an upload running next to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Operation {
    FetchList,
    Upload,
    FetchDetail,
    DownloadPdf,
    PlaySpeech,
}

impl Operation {
    /// Human phrasing for "you must be signed in to ...".
    const fn describes(self) -> &'static str {
        match self {
            Self::FetchList => "list your analyzed documents",
            Self::Upload => "upload documents",
            Self::FetchDetail => "view an analysis",
            Self::DownloadPdf => "download a PDF report",
            Self::PlaySpeech => "play the analysis audio",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct OpStatus {
    pub(crate) pending: bool,
    pub(crate) error: Option<String>,
    pub(crate) message: Option<String>,
}

#[derive(Default)]
struct Inner {
    documents: Vec<DocumentSummary>,
    current: Option<DocumentDetail>,
    ops: BTreeMap<Operation, OpStatus>,
    detail_seq: u64,
}

impl Inner {
    fn begin(&mut self, op: Operation) {
        let _ = self.ops.insert(
            op,
            OpStatus {
                pending: true,
                error: None,
                message: None,
            },
        );
    }

    fn succeed(&mut self, op: Operation, message: String) {
        let _ = self.ops.insert(
            op,
            OpStatus {
                pending: false,
                error: None,
                message: Some(message),
            },
        );
    }

    fn fail(&mut self, op: Operation, error: String) {
        let _ = self.ops.insert(
            op,
            OpStatus {
                pending: false,
                error: Some(error),
                message: None,
            },
        );
    }
}

/// What the speech endpoint produced: audio ready to play, or nothing —
/// the latter is an informational outcome, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Speech {
    Audio(Vec<u8>),
    Empty,
}

/// Coordinates every document-analysis operation against the remote
/// service and tracks their progress for display. Holds the session store
/// it depends on explicitly; nothing here is reachable while anonymous.
pub(crate) struct Orchestrator<G> {
    gateway: Arc<G>,
    session: Arc<session::Store<G>>,
    inner: Mutex<Inner>,
    liveness: CancellationToken,
}

impl<G: Gateway + 'static> Orchestrator<G> {
    pub(crate) fn new(gateway: Arc<G>, session: Arc<session::Store<G>>) -> Self {
        Self {
            gateway,
            session,
            inner: Mutex::new(Inner::default()),
            liveness: CancellationToken::new(),
        }
    }

    pub(crate) async fn documents(&self) -> Vec<DocumentSummary> {
        self.inner.lock().await.documents.clone()
    }

    pub(crate) async fn current_analysis(&self) -> Option<DocumentDetail> {
        self.inner.lock().await.current.clone()
    }

    pub(crate) async fn status(&self, op: Operation) -> OpStatus {
        self.inner.lock().await.ops.get(&op).cloned().unwrap_or_default()
    }

    /// Anything in flight at all — the coarse aggregate the per-operation
    /// registry still makes cheap to answer.
    pub(crate) async fn busy(&self) -> bool {
        self.inner
            .lock()
            .await
            .ops
            .values()
            .any(|status| status.pending)
    }

    /// Clears every operation's error and message; documents, the current
    /// analysis, and in-flight markers are untouched.
    pub(crate) async fn clear_messages(&self) {
        let mut inner = self.inner.lock().await;
        for status in inner.ops.values_mut() {
            status.error = None;
            status.message = None;
        }
    }

    /// Ends the orchestrator's lifetime: results of operations still in
    /// flight are discarded instead of applied.
    pub(crate) fn shutdown(&self) {
        self.liveness.cancel();
    }

    /// Re-fetches the document list whenever the session becomes
    /// authenticated, until shutdown.
    pub(crate) fn spawn_auto_refresh(self: Arc<Self>) -> JoinHandle<()> {
        let orchestrator = self;
        let mut changes = orchestrator.session.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = orchestrator.liveness.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if *changes.borrow_and_update() {
                            if let Err(e) = orchestrator.fetch_previous_analyses().await {
                                debug!("automatic document refresh failed: {e}");
                            }
                        }
                    }
                }
            }
        })
    }

    async fn guard(&self, op: Operation) -> Result<()> {
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.session.authenticated_user().await.is_none() {
            let e = Error::NotAuthenticated {
                action: op.describes(),
            };
            let mut inner = self.inner.lock().await;
            if op == Operation::FetchList {
                inner.documents.clear();
            }
            inner.fail(op, e.to_string());
            return Err(e);
        }
        Ok(())
    }

    /// Replaces `documents` with the server's list. On failure the list is
    /// cleared rather than left stale.
    pub(crate) async fn fetch_previous_analyses(&self) -> Result<Vec<DocumentSummary>> {
        const OP: Operation = Operation::FetchList;
        self.guard(OP).await?;
        self.inner.lock().await.begin(OP);

        let outcome = self.gateway.my_documents().await;
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut inner = self.inner.lock().await;
        match outcome {
            Ok(list) => {
                inner.documents = list.documents.clone();
                inner.succeed(
                    OP,
                    list.message
                        .unwrap_or_else(|| "Previous analyses loaded.".to_owned()),
                );
                Ok(list.documents)
            }
            Err(e) => {
                inner.documents.clear();
                inner.fail(OP, e.to_string());
                Err(e)
            }
        }
    }

    /// Validates and uploads one document, then refreshes the list once.
    /// The returned analysis, when the server includes it, lets the caller
    /// render the result without another round trip.
    pub(crate) async fn upload_document(&self, path: &Path) -> Result<Option<DocumentDetail>> {
        const OP: Operation = Operation::Upload;
        self.guard(OP).await?;

        let staged = validate::document_mime_type(path)
            .map_err(Error::from)
            .and_then(|mime_type| {
                Ok(Upload {
                    filename: path
                        .file_name()
                        .map_or_else(|| "document".to_owned(), |n| n.to_string_lossy().into_owned()),
                    mime_type,
                    bytes: fs::read(path)?,
                })
            });
        let upload = match staged {
            Ok(upload) => upload,
            Err(e) => {
                self.inner.lock().await.fail(OP, e.to_string());
                return Err(e);
            }
        };

        self.inner.lock().await.begin(OP);
        let outcome = self.gateway.upload_document(upload).await;
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        match outcome {
            Ok(response) => {
                self.inner.lock().await.succeed(
                    OP,
                    response
                        .message
                        .unwrap_or_else(|| "Document uploaded and analysis started.".to_owned()),
                );
                if let Err(e) = self.fetch_previous_analyses().await {
                    warn!("document list refresh after upload failed: {e}");
                }
                Ok(response.analysis_result)
            }
            Err(e) => {
                self.inner.lock().await.fail(OP, e.to_string());
                Err(e)
            }
        }
    }

    /// Loads the full analysis for one document. When several loads race,
    /// the latest-issued one wins: a resolution that has been superseded is
    /// discarded wholesale and reports `Ok(None)`.
    pub(crate) async fn fetch_detailed_analysis(
        &self,
        document_id: u64,
    ) -> Result<Option<DocumentDetail>> {
        const OP: Operation = Operation::FetchDetail;
        self.guard(OP).await?;

        let seq = {
            let mut inner = self.inner.lock().await;
            inner.detail_seq += 1;
            inner.begin(OP);
            inner.detail_seq
        };

        let outcome = self.gateway.analysis_detail(document_id).await;
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut inner = self.inner.lock().await;
        if inner.detail_seq != seq {
            debug!("discarding superseded analysis fetch for document {document_id}");
            return Ok(None);
        }

        match outcome {
            Ok(detail) => {
                inner.current = Some(detail.clone());
                inner.succeed(OP, "Detailed analysis loaded.".to_owned());
                Ok(Some(detail))
            }
            Err(e) => {
                inner.current = None;
                inner.fail(
                    OP,
                    format!("failed to load analysis for document {document_id}: {e}"),
                );
                Err(e)
            }
        }
    }

    /// Fetches the PDF report and writes it to `dest` (a directory, or an
    /// explicit file path). The server's suggested filename is honored,
    /// with `analysis_report_{id}.pdf` as the fallback.
    pub(crate) async fn download_pdf(
        &self,
        document_id: u64,
        lang: &str,
        dest: &Path,
    ) -> Result<PathBuf> {
        const OP: Operation = Operation::DownloadPdf;
        self.guard(OP).await?;
        self.inner.lock().await.begin(OP);

        let outcome = self.gateway.analysis_pdf(document_id, lang).await;
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let written = match outcome {
            Ok(payload) => {
                let target = if dest.is_dir() {
                    dest.join(
                        payload
                            .filename
                            .unwrap_or_else(|| format!("analysis_report_{document_id}.pdf")),
                    )
                } else {
                    dest.to_owned()
                };
                fs::write(&target, payload.bytes)
                    .map(|()| target)
                    .map_err(Error::from)
            }
            Err(e) => Err(e),
        };

        let mut inner = self.inner.lock().await;
        match written {
            Ok(target) => {
                inner.succeed(OP, format!("PDF report saved to {}.", target.display()));
                Ok(target)
            }
            Err(e) => {
                inner.fail(OP, e.to_string());
                Err(e)
            }
        }
    }

    /// Retrieves the spoken summary. An empty body is the "no audio
    /// content" outcome — informational, unlike a transport failure.
    pub(crate) async fn play_speech(&self, document_id: u64, lang: &str) -> Result<Speech> {
        const OP: Operation = Operation::PlaySpeech;
        self.guard(OP).await?;
        self.inner.lock().await.begin(OP);

        let outcome = self.gateway.analysis_speech(document_id, lang).await;
        if self.liveness.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut inner = self.inner.lock().await;
        match outcome {
            Ok(bytes) if bytes.is_empty() => {
                inner.succeed(OP, "No audio content received.".to_owned());
                Ok(Speech::Empty)
            }
            Ok(bytes) => {
                inner.succeed(OP, "Playing analysis audio.".to_owned());
                Ok(Speech::Audio(bytes))
            }
            Err(e) => {
                inner.fail(OP, e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::{
        api,
        error,
        gateway::{testing::Scripted, PdfPayload},
        model::user::Credentials,
    };
    use secrecy::SecretString;
    use serde_json::json;

    fn summary(id: u64, filename: &str) -> DocumentSummary {
        serde_json::from_value(json!({
            "id": id,
            "filename": filename,
            "has_analysis": true
        }))
        .unwrap()
    }

    fn detail(document_id: u64) -> DocumentDetail {
        serde_json::from_value(json!({
            "document_id": document_id,
            "preferred_language": "en",
            "analyzed_data": {"invoice_number": format!("INV-{document_id}")}
        }))
        .unwrap()
    }

    fn remote_error(message: &str) -> error::Error {
        error::Api::Remote {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_owned(),
        }
        .into()
    }

    async fn authenticated(gateway: &Arc<Scripted>) -> Arc<session::Store<Scripted>> {
        gateway.status.lock().unwrap().push_back(Ok(api::StatusResponse {
            is_authenticated: true,
            user: Some(serde_json::from_value(json!({"username": "bob"})).unwrap()),
        }));
        let store = Arc::new(session::Store::new(Arc::clone(gateway)));
        store.check_status().await.unwrap();
        store
    }

    async fn anonymous(gateway: &Arc<Scripted>) -> Arc<session::Store<Scripted>> {
        gateway.status.lock().unwrap().push_back(Ok(api::StatusResponse {
            is_authenticated: false,
            user: None,
        }));
        let store = Arc::new(session::Store::new(Arc::clone(gateway)));
        store.check_status().await.unwrap();
        store
    }

    fn list_response(documents: Vec<DocumentSummary>) -> api::DocumentListResponse {
        api::DocumentListResponse {
            documents,
            message: None,
        }
    }

    #[tokio::test]
    async fn anonymous_list_fetch_stays_local() {
        let gateway = Arc::new(Scripted::new());
        let session = anonymous(&gateway).await;
        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);

        let err = orchestrator.fetch_previous_analyses().await.unwrap_err();

        assert!(matches!(err, Error::NotAuthenticated { .. }));
        assert!(orchestrator.documents().await.is_empty());
        // The probe is the only traffic; the list endpoint was never hit.
        assert_eq!(gateway.calls(), vec!["auth_status"]);

        let status = orchestrator.status(Operation::FetchList).await;
        assert!(status.error.unwrap().contains("signed in"));
    }

    #[tokio::test]
    async fn list_fetch_replaces_documents_wholesale() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(api::DocumentListResponse {
                documents: vec![summary(1, "a.pdf"), summary(2, "b.pdf")],
                message: Some("2 documents found.".to_owned()),
            }));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        let documents = orchestrator.fetch_previous_analyses().await.unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(orchestrator.documents().await.len(), 2);
        let status = orchestrator.status(Operation::FetchList).await;
        assert_eq!(status.message.as_deref(), Some("2 documents found."));
        assert!(status.error.is_none());
        assert!(!status.pending);
    }

    #[tokio::test]
    async fn failed_list_fetch_clears_documents() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(1, "a.pdf")])));
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Err(remote_error("database unavailable")));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        orchestrator.fetch_previous_analyses().await.unwrap();
        assert_eq!(orchestrator.documents().await.len(), 1);

        assert!(orchestrator.fetch_previous_analyses().await.is_err());
        assert!(orchestrator.documents().await.is_empty());
        let status = orchestrator.status(Operation::FetchList).await;
        assert!(status.error.unwrap().contains("database unavailable"));
    }

    #[tokio::test]
    async fn upload_refreshes_the_list_exactly_once() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway.uploads.lock().unwrap().push_back(Ok(api::UploadResponse {
            message: Some("Document uploaded and analyzed successfully".to_owned()),
            analysis_result: Some(detail(5)),
        }));
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(5, "invoice.pdf")])));

        let file = std::env::temp_dir().join(format!("taxdoc-test-{}.pdf", uuid::Uuid::new_v4()));
        fs::write(&file, b"%PDF-1.4").unwrap();

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        let analysis = orchestrator.upload_document(&file).await.unwrap();
        fs::remove_file(&file).unwrap();

        assert_eq!(analysis.unwrap().document_id, Some(5));
        assert_eq!(orchestrator.documents().await.len(), 1);
        assert_eq!(
            gateway
                .calls()
                .iter()
                .filter(|call| **call == "my_documents")
                .count(),
            1
        );
        let status = orchestrator.status(Operation::Upload).await;
        assert_eq!(
            status.message.as_deref(),
            Some("Document uploaded and analyzed successfully")
        );
    }

    #[tokio::test]
    async fn unsupported_upload_type_never_reaches_the_network() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);

        let err = orchestrator
            .upload_document(Path::new("notes.txt"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(gateway.calls(), vec!["auth_status"]);
        assert!(orchestrator.documents().await.is_empty());
    }

    #[tokio::test]
    async fn failed_upload_sets_error_and_skips_the_refresh() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway
            .uploads
            .lock()
            .unwrap()
            .push_back(Err(remote_error("file too large")));

        let file = std::env::temp_dir().join(format!("taxdoc-test-{}.png", uuid::Uuid::new_v4()));
        fs::write(&file, b"\x89PNG").unwrap();

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        assert!(orchestrator.upload_document(&file).await.is_err());
        fs::remove_file(&file).unwrap();

        let status = orchestrator.status(Operation::Upload).await;
        assert!(status.error.unwrap().contains("file too large"));
        assert!(!gateway.calls().contains(&"my_documents"));
    }

    #[tokio::test]
    async fn detail_fetch_failure_clears_current_and_names_the_document() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway.details.lock().unwrap().push_back(Ok(detail(9)));
        gateway
            .details
            .lock()
            .unwrap()
            .push_back(Err(remote_error("Analysis not found")));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        orchestrator.fetch_detailed_analysis(9).await.unwrap();
        assert!(orchestrator.current_analysis().await.is_some());

        assert!(orchestrator.fetch_detailed_analysis(41).await.is_err());
        assert!(orchestrator.current_analysis().await.is_none());
        let status = orchestrator.status(Operation::FetchDetail).await;
        assert!(status.error.unwrap().contains("document 41"));
    }

    #[tokio::test]
    async fn racing_detail_fetches_resolve_to_the_latest_issued() {
        tokio::time::pause();
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        // First call is slow, second is immediate. Responses are handed out
        // at resolution time, so the fast call takes the front of the queue.
        gateway
            .detail_delays
            .lock()
            .unwrap()
            .push_back(Duration::from_millis(100));
        gateway.details.lock().unwrap().push_back(Ok(detail(2)));
        gateway.details.lock().unwrap().push_back(Ok(detail(1)));

        let orchestrator = Arc::new(Orchestrator::new(Arc::clone(&gateway), session));
        let slow_fetch = tokio::spawn({
            let orchestrator = Arc::clone(&orchestrator);
            async move { orchestrator.fetch_detailed_analysis(1).await }
        });
        tokio::task::yield_now().await;

        let fast = orchestrator.fetch_detailed_analysis(2).await.unwrap();
        assert_eq!(fast.unwrap().document_id, Some(2));

        tokio::time::advance(Duration::from_millis(200)).await;
        let stale = slow_fetch.await.unwrap().unwrap();

        // The stale resolution was discarded, not applied.
        assert!(stale.is_none());
        assert_eq!(
            orchestrator.current_analysis().await.unwrap().document_id,
            Some(2)
        );
    }

    #[tokio::test]
    async fn empty_speech_payload_is_a_message_not_an_error() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway.speech.lock().unwrap().push_back(Ok(Vec::new()));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        let outcome = orchestrator.play_speech(3, "en").await.unwrap();

        assert_eq!(outcome, Speech::Empty);
        let status = orchestrator.status(Operation::PlaySpeech).await;
        assert_eq!(status.message.as_deref(), Some("No audio content received."));
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn pdf_download_honors_the_suggested_filename() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway.pdfs.lock().unwrap().push_back(Ok(PdfPayload {
            bytes: b"%PDF-1.4".to_vec(),
            filename: Some("summary.pdf".to_owned()),
        }));
        gateway.pdfs.lock().unwrap().push_back(Ok(PdfPayload {
            bytes: b"%PDF-1.4".to_vec(),
            filename: None,
        }));

        let dir = std::env::temp_dir().join(format!("taxdoc-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        let named = orchestrator.download_pdf(12, "en", &dir).await.unwrap();
        let fallback = orchestrator.download_pdf(12, "en", &dir).await.unwrap();

        assert!(named.ends_with("summary.pdf"));
        assert!(fallback.ends_with("analysis_report_12.pdf"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn clear_messages_keeps_data_and_progress() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(1, "a.pdf")])));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        orchestrator.fetch_previous_analyses().await.unwrap();
        orchestrator.clear_messages().await;

        let status = orchestrator.status(Operation::FetchList).await;
        assert!(status.message.is_none());
        assert!(status.error.is_none());
        assert_eq!(orchestrator.documents().await.len(), 1);
    }

    #[tokio::test]
    async fn shutdown_discards_late_resolutions() {
        let gateway = Arc::new(Scripted::new());
        let session = authenticated(&gateway).await;
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(1, "a.pdf")])));
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(2, "b.pdf")])));

        let orchestrator = Orchestrator::new(Arc::clone(&gateway), session);
        orchestrator.fetch_previous_analyses().await.unwrap();

        orchestrator.shutdown();
        let err = orchestrator.fetch_previous_analyses().await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert_eq!(orchestrator.documents().await.len(), 1);
    }

    #[tokio::test]
    async fn authentication_triggers_an_automatic_refresh() {
        let gateway = Arc::new(Scripted::new());
        let session = anonymous(&gateway).await;
        gateway.login.lock().unwrap().push_back(Ok(api::LoginResponse {
            message: None,
            user: serde_json::from_value(json!({"username": "bob"})).unwrap(),
        }));
        gateway
            .documents
            .lock()
            .unwrap()
            .push_back(Ok(list_response(vec![summary(1, "a.pdf")])));

        let orchestrator = Arc::new(Orchestrator::new(Arc::clone(&gateway), Arc::clone(&session)));
        let refresher = Arc::clone(&orchestrator).spawn_auto_refresh();

        session
            .login(&Credentials {
                username: "bob".to_owned(),
                password: SecretString::new("Abcdefg1!".to_owned()),
            })
            .await
            .unwrap();

        for _ in 0..64 {
            if !orchestrator.documents().await.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(orchestrator.documents().await.len(), 1);

        orchestrator.shutdown();
        refresher.await.unwrap();
    }
}
