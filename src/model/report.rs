// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::Deserialize;
use tabled::Tabled;

/// A posting as it appears in ledger-style reports (general ledger and
/// per-account ledger).
#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LedgerRow {
    #[tabled(rename = "Date")]
    pub(crate) date: NaiveDate,
    #[tabled(rename = "Voucher")]
    pub(crate) voucher_number: String,
    #[tabled(rename = "Account")]
    pub(crate) account_code: String,
    #[tabled(rename = "Narration")]
    pub(crate) narration: String,
    #[tabled(rename = "Debit", display_with = "super::display_amount")]
    pub(crate) debit: f64,
    #[tabled(rename = "Credit", display_with = "super::display_amount")]
    pub(crate) credit: f64,
    #[tabled(rename = "Balance", display_with = "super::display_optional_amount")]
    pub(crate) balance: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrialBalanceRow {
    #[tabled(rename = "Account")]
    pub(crate) account_code: String,
    #[tabled(rename = "Name")]
    pub(crate) account_name: String,
    #[tabled(rename = "Debit", display_with = "super::display_amount")]
    pub(crate) debit: f64,
    #[tabled(rename = "Credit", display_with = "super::display_amount")]
    pub(crate) credit: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrialBalance {
    pub(crate) rows: Vec<TrialBalanceRow>,
    pub(crate) total_debit: f64,
    pub(crate) total_credit: f64,
}

#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatementRow {
    #[tabled(rename = "Account")]
    pub(crate) account_name: String,
    #[tabled(rename = "Amount", display_with = "super::display_amount")]
    pub(crate) amount: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatementSection {
    pub(crate) title: String,
    pub(crate) rows: Vec<StatementRow>,
    pub(crate) total: f64,
}

/// Shared shape of the income statement, profit & loss, and balance sheet
/// reports: titled sections with a grand total.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinancialStatement {
    pub(crate) sections: Vec<StatementSection>,
    pub(crate) net_total: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountLedger {
    pub(crate) account_code: String,
    pub(crate) account_name: String,
    pub(crate) rows: Vec<LedgerRow>,
    pub(crate) closing_balance: f64,
}
