// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A posting rule: which general-ledger account a given transaction kind
/// lands on.
#[derive(Clone, Debug, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GlMapping {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Transaction Type")]
    pub(crate) transaction_type: String,
    #[tabled(rename = "Account")]
    pub(crate) account_code: String,
    #[tabled(rename = "Description", display_with = "Self::format_description")]
    pub(crate) description: Option<String>,
}

impl GlMapping {
    fn format_description(description: &Option<String>) -> String {
        description.clone().unwrap_or_default()
    }
}
