// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod account;
pub(crate) mod mapping;
pub(crate) mod payment;
pub(crate) mod receipt;
pub(crate) mod report;
pub(crate) mod search;
pub(crate) mod voucher;

use serde::{Deserialize, Serialize};

/// The profile the server hands back on login and on session validation.
/// A copy is cached alongside the token so commands can greet the user
/// without a round trip.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) role: Option<String>,
}

/// The error envelope the server uses for business-level rejections.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Failure {
    pub(crate) message: String,
}

pub(crate) fn display_amount(amount: &f64) -> String {
    format!("{amount:.2}")
}

pub(crate) fn display_optional_amount(amount: &Option<f64>) -> String {
    match amount {
        Some(amount) => display_amount(amount),
        None => String::new(),
    }
}
