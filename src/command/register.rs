// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    api::{self, Executor as _},
    error::{self, Result},
    gate::Gate,
    password::{self, Prompt as _},
    session,
};

/// Create an account on the accounting server and sign in as it.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The display name for the new user.
    #[arg(long)]
    name: String,

    /// The email address for the new user.
    #[arg(long)]
    email: String,

    /// The username to register.
    #[clap()]
    username: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        if let Some(user) = Gate::new(app.pipeline).authenticated_user().await {
            println!("Already signed in as {}.", user.name);
            return Ok(());
        }

        let description = format!("Choose a password for {}", self.username);
        let password = app
            .prompt
            .prompt(
                password::RequestBuilder::new()
                    .with_description(&description)
                    .into_request(),
            )
            .await?
            .ok_or(error::Error::Password(error::Password::NoPrompt))?;

        let resp = api::auth::Register {
            name: self.name,
            username: self.username,
            email: self.email,
            password,
        }
        .execute(app.pipeline)
        .await?;

        match resp {
            api::auth::AuthResponse {
                success: true,
                session_id: Some(token),
                user: Some(user),
                ..
            } => {
                app.pipeline
                    .session()
                    .establish(&session::Data::new(
                        session::Token::new(token).into(),
                        user.clone(),
                    ))
                    .await;
                println!("Registered and signed in as {}.", user.name);
                Ok(())
            }
            api::auth::AuthResponse { message, .. } => Err(error::Api::Failure(
                message.unwrap_or_else(|| "the server rejected the registration".to_owned()),
            )
            .into()),
        }
    }
}
