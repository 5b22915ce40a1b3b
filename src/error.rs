// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("API error: {0}")]
    Api(#[from] Api),
    #[error("validation error: {0}")]
    Validation(#[from] Validation),
    #[error("audio error: {0}")]
    Audio(#[from] Audio),
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("you must be signed in to {action} (run `taxdoc login` first)")]
    NotAuthenticated { action: &'static str },
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

#[derive(Error, Debug)]
pub(crate) enum Api {
    #[error("server error ({status}): {message}")]
    Remote {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("server returned an empty {0} payload")]
    EmptyPayload(&'static str),
}

#[derive(Error, Debug)]
pub(crate) enum Validation {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error(r#""{email}" is not a valid email address"#)]
    Email { email: String },
    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("password must contain at least one digit")]
    PasswordNeedsDigit,
    #[error("password must contain at least one uppercase letter")]
    PasswordNeedsUppercase,
    #[error("password must contain at least one lowercase letter")]
    PasswordNeedsLowercase,
    #[error("password must contain at least one special character")]
    PasswordNeedsSpecialChar,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(r#"unsupported document type for "{filename}" (accepted: PDF, PNG, JPEG, TIFF)"#)]
    UnsupportedFileType { filename: String },
}

#[derive(Error, Debug)]
pub(crate) enum Audio {
    #[error("could not open an audio output device: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("could not start playback: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("could not decode the audio payload: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}

