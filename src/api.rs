// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

//! Wire payloads for the analysis service endpoints. Shapes follow the
//! server contract; anything the server may omit is optional here.

use serde::{Deserialize, Serialize};

use crate::model::{
    document::{DocumentDetail, DocumentSummary},
    user::User,
};

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub(crate) is_authenticated: bool,
    #[serde(default)]
    pub(crate) user: Option<User>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'cred> {
    pub(crate) username: &'cred str,
    pub(crate) password: &'cred str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
    pub(crate) user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'reg> {
    pub(crate) username: &'reg str,
    pub(crate) email: &'reg str,
    pub(crate) password: &'reg str,
    pub(crate) confirm_password: &'reg str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupResponse {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentListResponse {
    #[serde(default)]
    pub(crate) documents: Vec<DocumentSummary>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) analysis_result: Option<DocumentDetail>,
}

/// Body shape the server uses for every non-2xx JSON response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_ser_tokens, Token};

    impl PartialEq for StatusResponse {
        fn eq(&self, other: &Self) -> bool {
            self.is_authenticated == other.is_authenticated
                && self.user.is_none() == other.user.is_none()
        }
    }

    #[test]
    fn login_request_wire_format() {
        let req = LoginRequest {
            username: "bob",
            password: "hunter2!A",
        };

        assert_ser_tokens(
            &req,
            &[
                Token::Struct {
                    name: "LoginRequest",
                    len: 2,
                },
                Token::Str("username"),
                Token::Str("bob"),
                Token::Str("password"),
                Token::Str("hunter2!A"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn signup_request_wire_format() {
        let req = SignupRequest {
            username: "bob",
            email: "bob@example.com",
            password: "hunter2!A",
            confirm_password: "hunter2!A",
        };

        assert_ser_tokens(
            &req,
            &[
                Token::Struct {
                    name: "SignupRequest",
                    len: 4,
                },
                Token::Str("username"),
                Token::Str("bob"),
                Token::Str("email"),
                Token::Str("bob@example.com"),
                Token::Str("password"),
                Token::Str("hunter2!A"),
                Token::Str("confirm_password"),
                Token::Str("hunter2!A"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn anonymous_status_response() {
        let expected = StatusResponse {
            is_authenticated: false,
            user: None,
        };

        assert_de_tokens(
            &expected,
            &[
                Token::Struct {
                    name: "StatusResponse",
                    len: 2,
                },
                Token::Str("is_authenticated"),
                Token::Bool(false),
                Token::Str("user"),
                Token::None,
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn upload_response_tolerates_missing_result() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"message": "Document uploaded and analyzed successfully"}"#)
                .unwrap();

        assert!(resp.analysis_result.is_none());
        assert_eq!(
            resp.message.as_deref(),
            Some("Document uploaded and analyzed successfully")
        );
    }
}
