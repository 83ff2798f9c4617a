// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod command;
mod error;
mod gate;
mod metadata;
mod model;
mod password;
mod session;
mod storage;

use std::{path::PathBuf, process};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::error;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Logout(command::logout::Command),
    Register(command::register::Command),
    Accounts(command::accounts::Command),
    Vouchers(command::vouchers::Command),
    Payments(command::payments::Command),
    Receipts(command::receipts::Command),
    Mappings(command::mappings::Command),
    Reports(command::reports::Command),
    Search(command::search::Command),
    Dashboard(command::dashboard::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, app: command::App<'_>) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(app).await,
            Self::Logout(cmd) => cmd.execute(app).await,
            Self::Register(cmd) => cmd.execute(app).await,
            Self::Accounts(cmd) => cmd.execute(app).await,
            Self::Vouchers(cmd) => cmd.execute(app).await,
            Self::Payments(cmd) => cmd.execute(app).await,
            Self::Receipts(cmd) => cmd.execute(app).await,
            Self::Mappings(cmd) => cmd.execute(app).await,
            Self::Reports(cmd) => cmd.execute(app).await,
            Self::Search(cmd) => cmd.execute(app).await,
            Self::Dashboard(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the accounting server.
    #[arg(long, env = "TALLY_URL", default_value = "http://127.0.0.1:5000/", value_parser = Url::parse)]
    url: Url,

    /// Turn off persistent storage of the session. Signing in will only
    /// last for a single invocation.
    #[arg(long)]
    no_store_session: bool,

    /// The path to the Pinentry program to use when requesting a password.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

async fn get_session_storage(args: &Args) -> Box<dyn storage::Storage> {
    if !args.no_store_session {
        #[cfg(feature = "secret-service")]
        match storage::SecretService::new(&args.url).await {
            Ok(secret_service_storage) => return Box::new(secret_service_storage),
            Err(e) => {
                log::warn!("We need to fall back to unencrypted file storage because we can't connect to the secret service: {}", e);
            }
        }

        #[cfg(feature = "keychain")]
        match storage::Keychain::new(&args.url) {
            Ok(keychain_storage) => return Box::new(keychain_storage),
            Err(e) => {
                log::warn!("We need to fall back to unencrypted file storage because we can't connect to Keychain: {}", e);
            }
        }

        if let Some(file_storage) = storage::File::new("session.json") {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let session = session::Context::new(get_session_storage(&args).await);
    let pipeline = api::Pipeline::new(args.url, session)?;

    command::Command::execute(
        args.command,
        command::App {
            pipeline: &pipeline,
            prompt: &prompt,
        },
    )
    .await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("TALLY_LOG", "warn")
        .write_style("TALLY_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
