// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use clap::ValueEnum;
use inflector::Inflector as _;
use serde::Deserialize;
use tabled::Tabled;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchKind {
    Accounts,
    Vouchers,
    Payments,
    Receipts,
}

impl SearchKind {
    /// The path segment the search endpoints use for this kind.
    pub(crate) const fn as_segment(self) -> &'static str {
        match self {
            Self::Accounts => "Accounts",
            Self::Vouchers => "Vouchers",
            Self::Payments => "Payments",
            Self::Receipts => "Receipts",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.to_possible_value().ok_or(std::fmt::Error)?;
        write!(f, "{}", value.get_name().to_title_case())
    }
}

#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchHit {
    #[tabled(rename = "Kind")]
    pub(crate) kind: String,
    #[tabled(rename = "Reference")]
    pub(crate) reference: String,
    #[tabled(rename = "Date", display_with = "Self::format_date")]
    pub(crate) date: Option<NaiveDate>,
    #[tabled(rename = "Description")]
    pub(crate) description: String,
    #[tabled(rename = "Amount", display_with = "super::display_optional_amount")]
    pub(crate) amount: Option<f64>,
}

impl SearchHit {
    fn format_date(date: &Option<NaiveDate>) -> String {
        match date {
            Some(date) => date.to_string(),
            None => String::new(),
        }
    }
}
