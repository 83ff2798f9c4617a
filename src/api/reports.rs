// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use clap::ValueEnum;
use inflector::Inflector as _;
use reqwest::Method;

use crate::model;

use super::{Executor, Request};

/// Optional reporting period, applied to the query string as the backend
/// expects it.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct DateRange {
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
}

impl DateRange {
    fn apply(self, mut req: Request) -> Request {
        if let Some(from) = self.from {
            req = req.with_query("fromDate", from);
        }
        if let Some(to) = self.to {
            req = req.with_query("toDate", to);
        }
        req
    }
}

pub(crate) struct GeneralLedger(pub(crate) DateRange);

impl From<GeneralLedger> for Request {
    fn from(value: GeneralLedger) -> Self {
        value.0.apply(Self::new(Method::GET, "api/Reports/GeneralLedger"))
    }
}

impl Executor for GeneralLedger {
    type Response = Vec<model::report::LedgerRow>;
}

pub(crate) struct TrialBalance(pub(crate) DateRange);

impl From<TrialBalance> for Request {
    fn from(value: TrialBalance) -> Self {
        value.0.apply(Self::new(Method::GET, "api/Reports/TrialBalance"))
    }
}

impl Executor for TrialBalance {
    type Response = model::report::TrialBalance;
}

pub(crate) struct IncomeStatement(pub(crate) DateRange);

impl From<IncomeStatement> for Request {
    fn from(value: IncomeStatement) -> Self {
        value
            .0
            .apply(Self::new(Method::GET, "api/Reports/IncomeStatement"))
    }
}

impl Executor for IncomeStatement {
    type Response = model::report::FinancialStatement;
}

pub(crate) struct ProfitLoss(pub(crate) DateRange);

impl From<ProfitLoss> for Request {
    fn from(value: ProfitLoss) -> Self {
        value.0.apply(Self::new(Method::GET, "api/Reports/ProfitLoss"))
    }
}

impl Executor for ProfitLoss {
    type Response = model::report::FinancialStatement;
}

pub(crate) struct BalanceSheet {
    pub(crate) as_of: Option<NaiveDate>,
}

impl From<BalanceSheet> for Request {
    fn from(value: BalanceSheet) -> Self {
        let req = Self::new(Method::GET, "api/Reports/BalanceSheet");
        match value.as_of {
            Some(as_of) => req.with_query("asOfDate", as_of),
            None => req,
        }
    }
}

impl Executor for BalanceSheet {
    type Response = model::report::FinancialStatement;
}

pub(crate) struct AccountLedger {
    pub(crate) account_code: String,
    pub(crate) range: DateRange,
}

impl From<AccountLedger> for Request {
    fn from(value: AccountLedger) -> Self {
        value.range.apply(
            Self::new(Method::GET, "api/Reports/AccountLedger")
                .with_query("accountCode", value.account_code),
        )
    }
}

impl Executor for AccountLedger {
    type Response = model::report::AccountLedger;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportKind {
    GeneralLedger,
    TrialBalance,
    IncomeStatement,
    ProfitLoss,
    BalanceSheet,
}

impl ReportKind {
    /// The path segment the export endpoint uses for this report.
    pub(crate) const fn as_segment(self) -> &'static str {
        match self {
            Self::GeneralLedger => "GeneralLedger",
            Self::TrialBalance => "TrialBalance",
            Self::IncomeStatement => "IncomeStatement",
            Self::ProfitLoss => "ProfitLoss",
            Self::BalanceSheet => "BalanceSheet",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.to_possible_value().ok_or(std::fmt::Error)?;
        write!(f, "{}", value.get_name().to_title_case())
    }
}

/// Server-rendered PDF of a report. Binary body; callers use
/// [`Pipeline::dispatch`](super::Pipeline::dispatch) directly.
pub(crate) struct ExportPdf {
    pub(crate) report: ReportKind,
    pub(crate) range: DateRange,
}

impl From<ExportPdf> for Request {
    fn from(value: ExportPdf) -> Self {
        value.range.apply(
            Self::new(
                Method::GET,
                format!("api/Reports/ExportPDF/{}", value.report.as_segment()),
            )
            .with_header("accept", "application/pdf"),
        )
    }
}
