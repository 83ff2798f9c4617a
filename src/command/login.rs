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

const ATTEMPTS: usize = 3;

/// Sign in to the accounting server and keep the session for later
/// invocations.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The username to sign in as.
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

        let description = format!("Password for {}", self.username);
        let mut request = password::RequestBuilder::new()
            .with_description(&description)
            .into_request();

        for attempt in 1..=ATTEMPTS {
            let password = app
                .prompt
                .prompt(request.clone())
                .await?
                .ok_or(error::Error::Password(error::Password::NoPrompt))?;

            let resp = api::auth::Login {
                username: self.username.clone(),
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
                    println!("Signed in as {}.", user.name);
                    return Ok(());
                }
                api::auth::AuthResponse { message, .. } => {
                    let reason =
                        message.unwrap_or_else(|| "the server rejected the sign-in".to_owned());
                    if attempt == ATTEMPTS {
                        return Err(error::Api::Failure(reason).into());
                    }
                    request = password::RequestBuilder::new()
                        .with_description(&description)
                        .with_error(&reason)
                        .into_request();
                }
            }
        }

        Err(error::Error::Command)
    }
}
