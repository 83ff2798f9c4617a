// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Clone, Debug, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Receipt {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Number")]
    pub(crate) receipt_number: String,
    #[tabled(rename = "Date")]
    pub(crate) receipt_date: NaiveDate,
    #[tabled(rename = "Account")]
    pub(crate) account_code: String,
    #[tabled(rename = "Received From")]
    pub(crate) received_from: String,
    #[tabled(rename = "Amount", display_with = "super::display_amount")]
    pub(crate) amount: f64,
    #[tabled(rename = "Description", display_with = "Self::format_description")]
    pub(crate) description: Option<String>,
}

impl Receipt {
    fn format_description(description: &Option<String>) -> String {
        description.clone().unwrap_or_default()
    }
}
