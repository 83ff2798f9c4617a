// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use log::warn;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    api::{self, reports::DateRange, Executor as _},
    error::{Error, Result},
    gate::Gate,
};

/// A one-screen summary of the books.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Re-fetch the summary every this many minutes until interrupted.
    #[arg(long, value_name = "MINUTES")]
    watch: Option<u64>,
}

#[derive(Tabled)]
struct Stat {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

async fn render(pipeline: &api::Pipeline) -> Result<()> {
    let accounts = api::accounts::List.execute(pipeline).await?;
    let pending = api::vouchers::Pending.execute(pipeline).await?;
    let balance = api::reports::TrialBalance(DateRange::default())
        .execute(pipeline)
        .await?;

    let stats = [
        Stat {
            metric: "Accounts",
            value: accounts.len().to_string(),
        },
        Stat {
            metric: "Active accounts",
            value: accounts
                .iter()
                .filter(|account| account.is_active)
                .count()
                .to_string(),
        },
        Stat {
            metric: "Pending vouchers",
            value: pending.len().to_string(),
        },
        Stat {
            metric: "Trial balance debits",
            value: format!("{:.2}", balance.total_debit),
        },
        Stat {
            metric: "Trial balance credits",
            value: format!("{:.2}", balance.total_credit),
        },
    ];
    println!("{}", Table::new(stats).with(Style::rounded()));
    Ok(())
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;
        render(app.pipeline).await?;

        let Some(minutes) = self.watch else {
            return Ok(());
        };

        let mut interval = tokio::time::interval(Duration::from_secs(minutes.max(1) * 60));
        // The first tick completes immediately; the summary above already
        // covered it.
        let _ = interval.tick().await;
        loop {
            let _ = interval.tick().await;
            match render(app.pipeline).await {
                Ok(()) => {}
                // A torn-down session will not come back on its own.
                Err(e @ Error::Unauthorized) => return Err(e),
                Err(e) => warn!("The summary could not be refreshed: {}", e),
            }
        }
    }
}
