// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table};

use crate::{
    api::{self, Executor as _},
    error::{self, Result},
    gate::Gate,
    model::voucher,
};

/// Capture and review journal vouchers.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List every voucher.
    List,

    /// List vouchers awaiting approval.
    Pending,

    /// Record a voucher. The debit and credit lines must balance.
    Create {
        /// A debit line, repeatable.
        #[arg(long, value_name = "CODE=AMOUNT")]
        debit: Vec<String>,

        /// A credit line, repeatable.
        #[arg(long, value_name = "CODE=AMOUNT")]
        credit: Vec<String>,

        /// The voucher date; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// The narration describing the transaction.
        #[clap()]
        narration: String,
    },

    /// Remove a voucher.
    Delete {
        /// The numeric ID of the voucher to remove.
        #[clap()]
        id: i64,
    },

    /// Attach a supporting document to a voucher.
    Attach {
        /// The numeric ID of the voucher.
        #[clap()]
        id: i64,

        /// The file to upload.
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

fn parse_line(raw: &str) -> Result<(String, f64), error::Validation> {
    let (code, amount) = raw
        .split_once('=')
        .ok_or_else(|| error::Validation::MalformedLine(raw.to_owned()))?;
    let amount: f64 = amount
        .parse()
        .map_err(|_| error::Validation::Amount(amount.to_owned()))?;
    if amount <= 0.0 {
        return Err(error::Validation::Amount(amount.to_string()));
    }
    Ok((code.to_owned(), amount))
}

fn collect_lines(debits: &[String], credits: &[String]) -> Result<Vec<voucher::Line>, error::Validation> {
    let mut lines = Vec::with_capacity(debits.len() + credits.len());
    for raw in debits {
        let (code, amount) = parse_line(raw)?;
        lines.push(voucher::Line::debit(code, amount));
    }
    for raw in credits {
        let (code, amount) = parse_line(raw)?;
        lines.push(voucher::Line::credit(code, amount));
    }
    Ok(lines)
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: super::App<'_>) -> Result<()> {
        let _user = Gate::new(app.pipeline).require().await?;

        match self.action {
            Action::List => {
                let vouchers = api::vouchers::List.execute(app.pipeline).await?;
                if !vouchers.is_empty() {
                    println!("{}", Table::new(&vouchers).with(Style::rounded()));
                }
                Ok(())
            }
            Action::Pending => {
                let vouchers = api::vouchers::Pending.execute(app.pipeline).await?;
                if !vouchers.is_empty() {
                    println!("{}", Table::new(&vouchers).with(Style::rounded()));
                }
                Ok(())
            }
            Action::Create {
                debit,
                credit,
                date,
                narration,
            } => {
                let lines = collect_lines(&debit, &credit)?;
                let total = voucher::validate_balanced(&lines)?;

                let number = api::vouchers::NewNumber
                    .execute(app.pipeline)
                    .await?
                    .voucher_number;
                let _ = api::vouchers::Create {
                    voucher_number: number.clone(),
                    voucher_date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                    narration,
                    total_amount: total,
                    details: lines,
                }
                .execute(app.pipeline)
                .await?;
                println!("Recorded voucher {number} for {total:.2}.");
                Ok(())
            }
            Action::Delete { id } => {
                let _ = api::vouchers::Delete { id }.execute(app.pipeline).await?;
                println!("Deleted voucher {id}.");
                Ok(())
            }
            Action::Attach { id, file } => {
                let data = std::fs::read(&file)?;
                let file_name = file
                    .file_name()
                    .map_or_else(|| "attachment".to_owned(), |name| name.to_string_lossy().into_owned());
                let _ = api::vouchers::Attach {
                    id,
                    file_name,
                    data,
                }
                .execute(app.pipeline)
                .await?;
                println!("Attached {} to voucher {id}.", file.display());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use secrecy::SecretString;

    use crate::{api::stub, command::Command as _, model, password, session, storage};

    use super::*;

    struct NoPrompt;

    #[async_trait]
    impl password::Prompt for NoPrompt {
        async fn prompt(&self, _req: password::Request) -> Result<Option<SecretString>> {
            Ok(None)
        }
    }

    const VALIDATE_BODY: &str =
        r#"{"id":1,"name":"Alice","username":"alice","email":null,"role":null}"#;

    async fn signed_in_pipeline(base: url::Url) -> api::Pipeline {
        let session = session::Context::new(Box::new(storage::Memory::new()));
        session
            .establish(&session::Data::new(
                session::Token::new("abc123".to_owned()).into(),
                model::User {
                    id: 1,
                    name: "Alice".to_owned(),
                    username: "alice".to_owned(),
                    email: None,
                    role: None,
                },
            ))
            .await;
        api::Pipeline::new(base, session).expect("pipeline should build")
    }

    #[tokio::test]
    async fn balanced_voucher_posts_total_and_lines() -> Result<()> {
        let server = stub::serve(vec![
            stub::Response::new("200 OK", VALIDATE_BODY),
            stub::Response::new("200 OK", r#"{"voucherNumber":"JV-0042"}"#),
            stub::Response::new("200 OK", ""),
        ])
        .await;
        let pipeline = signed_in_pipeline(server.url()).await;

        Command {
            action: Action::Create {
                debit: vec!["1000=100.00".to_owned()],
                credit: vec!["4000=100.00".to_owned()],
                date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).ok_or(error::Error::Command)?),
                narration: "Opening sale".to_owned(),
            },
        }
        .execute(crate::command::App {
            pipeline: &pipeline,
            prompt: &NoPrompt,
        })
        .await?;

        let captured = server.finish().await;
        assert_eq!(captured.len(), 3);

        let body = captured[2]
            .split_once("\r\n\r\n")
            .map(|(_, body)| body)
            .ok_or(error::Error::Command)?;
        let posted: serde_json::Value = serde_json::from_str(body)?;
        assert_eq!(posted["voucherNumber"], "JV-0042");
        assert_eq!(posted["totalAmount"], 100.0);
        assert_eq!(
            posted["details"]
                .as_array()
                .ok_or(error::Error::Command)?
                .len(),
            2
        );
        Ok(())
    }

    #[tokio::test]
    async fn unbalanced_voucher_never_reaches_the_server() {
        let server = stub::serve(vec![stub::Response::new("200 OK", VALIDATE_BODY)]).await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let err = Command {
            action: Action::Create {
                debit: vec!["1000=100.00".to_owned()],
                credit: vec!["4000=90.00".to_owned()],
                date: None,
                narration: "Does not balance".to_owned(),
            },
        }
        .execute(crate::command::App {
            pipeline: &pipeline,
            prompt: &NoPrompt,
        })
        .await
        .expect_err("creation should fail");
        assert!(matches!(
            err,
            error::Error::Validation(error::Validation::OutOfBalance { .. })
        ));

        // Only the session validation went out.
        assert_eq!(server.finish().await.len(), 1);
    }

    #[test]
    fn line_parsing_rejects_garbage() {
        assert!(matches!(
            parse_line("1000"),
            Err(error::Validation::MalformedLine(_))
        ));
        assert!(matches!(
            parse_line("1000=ten"),
            Err(error::Validation::Amount(_))
        ));
        assert!(matches!(
            parse_line("1000=-5"),
            Err(error::Validation::Amount(_))
        ));
        assert!(parse_line("1000=12.50").is_ok());
    }
}
