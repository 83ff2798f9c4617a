// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::warn;

use crate::{
    api::{self, Executor as _},
    error::{Error, Result},
};

/// Sign out and remove the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        if app.pipeline.session().current().await.is_none() {
            println!("Not signed in.");
            return Ok(());
        }

        // Best effort: the local session is removed even if the server
        // cannot be told about it.
        match api::auth::Logout.execute(app.pipeline).await {
            Ok(_) | Err(Error::Unauthorized) => {}
            Err(e) => warn!("The server could not be notified of the sign-out: {}", e),
        }
        let _ = app.pipeline.session().invalidate().await;

        println!("Signed out.");
        Ok(())
    }
}
