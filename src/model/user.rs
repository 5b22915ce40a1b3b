// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::Deserialize;

/// The identity the server reports for the signed-in account. Replaced
/// wholesale on every successful login or status probe; fields we do not
/// model are carried along opaquely.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct User {
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, serde_json::Value>,
}

pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: SecretString,
}

pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: SecretString,
    pub(crate) confirm_password: SecretString,
}
