// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table};

use crate::{
    api::{self, Executor as _},
    error::Result,
    gate::Gate,
};

/// Record money coming in.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List every receipt.
    List,

    /// Record a receipt.
    Create {
        /// The account the receipt deposits into.
        #[arg(long)]
        account: String,

        /// The receipt date; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// A note to record against the receipt.
        #[arg(long)]
        description: Option<String>,

        /// Who the money came from.
        #[clap()]
        received_from: String,

        /// The amount received.
        #[clap()]
        amount: f64,
    },

    /// Remove a receipt.
    Delete {
        /// The numeric ID of the receipt to remove.
        #[clap()]
        id: i64,
    },

    /// Download the printable PDF for a receipt.
    Pdf {
        /// Where to write the PDF.
        #[arg(long, short, value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// The numeric ID of the receipt.
        #[clap()]
        id: i64,
    },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;

        match self.action {
            Action::List => {
                let receipts = api::receipts::List.execute(app.pipeline).await?;
                if !receipts.is_empty() {
                    println!("{}", Table::new(&receipts).with(Style::rounded()));
                }
                Ok(())
            }
            Action::Create {
                account,
                date,
                description,
                received_from,
                amount,
            } => {
                let number = api::receipts::NewNumber
                    .execute(app.pipeline)
                    .await?
                    .receipt_number;
                let _ = api::receipts::Create {
                    receipt_number: number.clone(),
                    receipt_date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                    account_code: account,
                    received_from,
                    amount,
                    description,
                }
                .execute(app.pipeline)
                .await?;
                println!("Recorded receipt {number} for {amount:.2}.");
                Ok(())
            }
            Action::Delete { id } => {
                let _ = api::receipts::Delete { id }.execute(app.pipeline).await?;
                println!("Deleted receipt {id}.");
                Ok(())
            }
            Action::Pdf { output, id } => {
                let body = app
                    .pipeline
                    .dispatch(api::receipts::Pdf { id }.into())
                    .await?;
                fs::write(&output, &body)?;
                println!("Wrote {} bytes to {}.", body.len(), output.display());
                Ok(())
            }
        }
    }
}
