// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

//! Local input validation. Everything here runs before a request is built;
//! a failure never reaches the network.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;

use crate::{error::Validation, model::user::NewUser};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // LINT: The pattern is a constant; construction cannot fail.
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Password complexity rules, mirrored from the server so a rejection is
/// caught before the round trip.
pub(crate) struct PasswordPolicy {
    pub(crate) min_length: usize,
    pub(crate) require_digit: bool,
    pub(crate) require_uppercase: bool,
    pub(crate) require_lowercase: bool,
    pub(crate) require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_digit: true,
            require_uppercase: true,
            require_lowercase: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    pub(crate) fn check(&self, password: &str) -> Result<(), Validation> {
        if password.len() < self.min_length {
            return Err(Validation::PasswordTooShort {
                min: self.min_length,
            });
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(Validation::PasswordNeedsDigit);
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            return Err(Validation::PasswordNeedsUppercase);
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            return Err(Validation::PasswordNeedsLowercase);
        }
        if self.require_special && !password.chars().any(|c| r#"!@#$%^&*(),.?":{}|<>"#.contains(c))
        {
            return Err(Validation::PasswordNeedsSpecialChar);
        }
        Ok(())
    }
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), Validation> {
    if value.trim().is_empty() {
        return Err(Validation::Empty { field });
    }
    Ok(())
}

pub(crate) fn email(address: &str) -> Result<(), Validation> {
    if !EMAIL_PATTERN.is_match(address) {
        return Err(Validation::Email {
            email: address.to_owned(),
        });
    }
    Ok(())
}

/// Full pre-flight check for a registration, in the order the server would
/// report problems.
pub(crate) fn new_user(registration: &NewUser) -> Result<(), Validation> {
    non_empty("username", &registration.username)?;
    non_empty("email", &registration.email)?;
    email(&registration.email)?;
    PasswordPolicy::default().check(registration.password.expose_secret())?;
    if registration.password.expose_secret() != registration.confirm_password.expose_secret() {
        return Err(Validation::PasswordMismatch);
    }
    Ok(())
}

/// Maps a document path to the MIME type the upload endpoint accepts, by
/// file extension. Anything else is rejected locally.
pub(crate) fn document_mime_type(path: &Path) -> Result<&'static str, Validation> {
    let unsupported = || Validation::UnsupportedFileType {
        filename: path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(unsupported)?;

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => Ok("application/pdf"),
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "tif" | "tiff" => Ok("image/tiff"),
        _ => Err(unsupported()),
    }
}
