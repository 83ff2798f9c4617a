// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table};

use crate::{
    api::{self, Executor as _},
    error::Result,
    gate::Gate,
};

/// Record money going out.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List every payment.
    List,

    /// Record a payment.
    Create {
        /// The account the payment draws from.
        #[arg(long)]
        account: String,

        /// The payment date; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// A note to record against the payment.
        #[arg(long)]
        description: Option<String>,

        /// Who the payment went to.
        #[clap()]
        paid_to: String,

        /// The amount paid.
        #[clap()]
        amount: f64,
    },

    /// Remove a payment.
    Delete {
        /// The numeric ID of the payment to remove.
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
                let payments = api::payments::List.execute(app.pipeline).await?;
                if !payments.is_empty() {
                    println!("{}", Table::new(&payments).with(Style::rounded()));
                }
                Ok(())
            }
            Action::Create {
                account,
                date,
                description,
                paid_to,
                amount,
            } => {
                let number = api::payments::NewNumber
                    .execute(app.pipeline)
                    .await?
                    .payment_number;
                let _ = api::payments::Create {
                    payment_number: number.clone(),
                    payment_date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                    account_code: account,
                    paid_to,
                    amount,
                    description,
                }
                .execute(app.pipeline)
                .await?;
                println!("Recorded payment {number} for {amount:.2}.");
                Ok(())
            }
            Action::Delete { id } => {
                let _ = api::payments::Delete { id }.execute(app.pipeline).await?;
                println!("Deleted payment {id}.");
                Ok(())
            }
        }
    }
}
