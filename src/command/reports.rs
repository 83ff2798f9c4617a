// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table};

use crate::{
    api::{self, reports::DateRange, Executor as _},
    error::Result,
    gate::Gate,
    model::report,
};

/// Run the financial reports.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The start of the reporting period.
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// The end of the reporting period.
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Every posting in the period, in journal order.
    GeneralLedger,

    /// Per-account debit and credit totals.
    TrialBalance,

    /// Revenue and expenses for the period.
    IncomeStatement,

    /// Profit and loss summary for the period.
    ProfitLoss,

    /// Assets, liabilities, and equity as of the period end.
    BalanceSheet,

    /// The postings touching one account.
    AccountLedger {
        /// The account code to report on.
        #[clap()]
        account: String,
    },

    /// Download a server-rendered PDF of a report.
    ExportPdf {
        /// Where to write the PDF.
        #[arg(long, short, value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// Which report to export.
        #[arg(value_enum)]
        report: api::reports::ReportKind,
    },
}

fn print_statement(statement: &report::FinancialStatement) {
    for section in &statement.sections {
        println!("{}", section.title);
        if !section.rows.is_empty() {
            println!("{}", Table::new(&section.rows).with(Style::rounded()));
        }
        println!("Total: {:.2}", section.total);
        println!();
    }
    println!("Net: {:.2}", statement.net_total);
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;
        let range = DateRange {
            from: self.from,
            to: self.to,
        };

        match self.action {
            Action::GeneralLedger => {
                let rows = api::reports::GeneralLedger(range).execute(app.pipeline).await?;
                if !rows.is_empty() {
                    println!("{}", Table::new(&rows).with(Style::rounded()));
                }
                Ok(())
            }
            Action::TrialBalance => {
                let balance = api::reports::TrialBalance(range).execute(app.pipeline).await?;
                if !balance.rows.is_empty() {
                    println!("{}", Table::new(&balance.rows).with(Style::rounded()));
                }
                println!(
                    "Totals: debit {:.2}, credit {:.2}",
                    balance.total_debit, balance.total_credit
                );
                Ok(())
            }
            Action::IncomeStatement => {
                let statement = api::reports::IncomeStatement(range)
                    .execute(app.pipeline)
                    .await?;
                print_statement(&statement);
                Ok(())
            }
            Action::ProfitLoss => {
                let statement = api::reports::ProfitLoss(range).execute(app.pipeline).await?;
                print_statement(&statement);
                Ok(())
            }
            Action::BalanceSheet => {
                let statement = api::reports::BalanceSheet { as_of: self.to }
                    .execute(app.pipeline)
                    .await?;
                print_statement(&statement);
                Ok(())
            }
            Action::AccountLedger { account } => {
                let ledger = api::reports::AccountLedger {
                    account_code: account,
                    range,
                }
                .execute(app.pipeline)
                .await?;
                println!("{} - {}", ledger.account_code, ledger.account_name);
                if !ledger.rows.is_empty() {
                    println!("{}", Table::new(&ledger.rows).with(Style::rounded()));
                }
                println!("Closing balance: {:.2}", ledger.closing_balance);
                Ok(())
            }
            Action::ExportPdf { output, report } => {
                let body = app
                    .pipeline
                    .dispatch(api::reports::ExportPdf { report, range }.into())
                    .await?;
                fs::write(&output, &body)?;
                println!("Wrote {} bytes to {}.", body.len(), output.display());
                Ok(())
            }
        }
    }
}
