// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use core::num;

use async_trait::async_trait;
use clap::Parser;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table,
};

use crate::{
    api::{self, Executor as _},
    error::Result,
    gate::Gate,
    model::search::SearchKind,
};

/// Free-text search across accounts, vouchers, payments, and receipts.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Restrict the search to one kind of record.
    #[arg(long, short, value_enum)]
    kind: Option<SearchKind>,

    /// The number of hits to show.
    #[clap(short, long)]
    count: Option<num::NonZeroUsize>,

    /// The text to search for.
    #[clap()]
    query: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;

        let hits = api::search::Search {
            query: self.query,
            kind: self.kind,
        }
        .execute(app.pipeline)
        .await?;

        if !hits.is_empty() {
            println!(
                "{}",
                Table::new(
                    hits.iter()
                        .take(self.count.map_or(usize::MAX, num::NonZeroUsize::get))
                )
                .with(Style::rounded())
                .with(Modify::new(Segment::new(1.., 1..=3)).with(Alignment::left()))
            );
        }
        Ok(())
    }
}
