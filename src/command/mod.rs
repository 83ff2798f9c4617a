// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{api, error::Result, password};

pub(crate) mod accounts;
pub(crate) mod dashboard;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod mappings;
pub(crate) mod payments;
pub(crate) mod receipts;
pub(crate) mod register;
pub(crate) mod reports;
pub(crate) mod search;
pub(crate) mod vouchers;

/// Everything a command needs to run: the request pipeline (which carries
/// the session context) and a password prompt chain. Passed explicitly so
/// tests can wire in their own.
#[derive(Clone, Copy)]
pub(crate) struct App<'run> {
    pub(crate) pipeline: &'run api::Pipeline,
    pub(crate) prompt: &'run dyn password::Prompt,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, app: App<'_>) -> Result<()>;
}
