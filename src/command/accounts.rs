// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table,
};

use crate::{
    api::{self, Executor as _},
    error::Result,
    gate::Gate,
    model::account::AccountType,
};

/// Maintain the chart of accounts.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List every account with its current balance.
    List,

    /// Show a single account.
    Show {
        /// The numeric ID of the account.
        #[clap()]
        id: i64,
    },

    /// Add an account to the chart.
    Create {
        /// The classification of the new account.
        #[arg(long, short, value_enum)]
        type_: AccountType,

        /// The opening balance, if the account does not start at zero.
        #[arg(long)]
        opening_balance: Option<f64>,

        /// The account code, unique within the chart.
        #[clap()]
        code: String,

        /// The display name of the account.
        #[clap()]
        name: String,
    },

    /// Change an account's name, classification, or active flag.
    Update {
        /// A new display name.
        #[arg(long)]
        name: Option<String>,

        /// A new classification.
        #[arg(long, short, value_enum)]
        type_: Option<AccountType>,

        /// Activate or deactivate the account.
        #[arg(long)]
        active: Option<bool>,

        /// The numeric ID of the account to change.
        #[clap()]
        id: i64,
    },

    /// Remove an account.
    Delete {
        /// The numeric ID of the account to remove.
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
                let accounts = api::accounts::List.execute(app.pipeline).await?;
                if !accounts.is_empty() {
                    println!(
                        "{}",
                        Table::new(&accounts)
                            .with(Style::rounded())
                            .with(Modify::new(Columns::last()).with(Alignment::right()))
                    );
                }
                Ok(())
            }
            Action::Show { id } => {
                let account = api::accounts::Get { id }.execute(app.pipeline).await?;
                println!("{}", Table::new([account]).with(Style::rounded()));
                Ok(())
            }
            Action::Create {
                type_,
                opening_balance,
                code,
                name,
            } => {
                let _ = api::accounts::Create {
                    account_code: code.clone(),
                    account_name: name,
                    account_type: type_,
                    opening_balance,
                }
                .execute(app.pipeline)
                .await?;
                println!("Created account {code}.");
                Ok(())
            }
            Action::Update {
                name,
                type_,
                active,
                id,
            } => {
                let _ = api::accounts::Update {
                    id,
                    account_name: name,
                    account_type: type_,
                    is_active: active,
                }
                .execute(app.pipeline)
                .await?;
                println!("Updated account {id}.");
                Ok(())
            }
            Action::Delete { id } => {
                let _ = api::accounts::Delete { id }.execute(app.pipeline).await?;
                println!("Deleted account {id}.");
                Ok(())
            }
        }
    }
}
