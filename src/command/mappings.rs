// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table};

use crate::{
    api::{self, Executor as _},
    error::Result,
    gate::Gate,
};

/// Review and adjust the general-ledger posting rules.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List the posting rules.
    List,

    /// Point a transaction type at an account.
    Set {
        /// A note to record against the rule.
        #[arg(long)]
        description: Option<String>,

        /// The transaction type to map.
        #[clap()]
        transaction_type: String,

        /// The account code postings of this type should land on.
        #[clap()]
        account: String,
    },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;

        match self.action {
            Action::List => {
                let mappings = api::mappings::List.execute(app.pipeline).await?;
                if !mappings.is_empty() {
                    println!("{}", Table::new(&mappings).with(Style::rounded()));
                }
                Ok(())
            }
            Action::Set {
                description,
                transaction_type,
                account,
            } => {
                let _ = api::mappings::Set {
                    transaction_type: transaction_type.clone(),
                    account_code: account.clone(),
                    description,
                }
                .execute(app.pipeline)
                .await?;
                println!("Mapped {transaction_type} to {account}.");
                Ok(())
            }
        }
    }
}
