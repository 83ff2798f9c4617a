// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Validation;

/// Debits must equal credits, but amounts are accumulated in floating
/// point, so the comparison allows a sub-cent skew.
pub(crate) const BALANCE_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Voucher {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Number")]
    pub(crate) voucher_number: String,
    #[tabled(rename = "Date")]
    pub(crate) voucher_date: NaiveDate,
    #[tabled(rename = "Narration")]
    pub(crate) narration: String,
    #[tabled(rename = "Amount", display_with = "super::display_amount")]
    pub(crate) total_amount: f64,
    #[tabled(rename = "Status", display_with = "Self::format_status")]
    pub(crate) status: Option<String>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) details: Vec<Line>,
}

impl Voucher {
    fn format_status(status: &Option<String>) -> String {
        status.clone().unwrap_or_default()
    }
}

/// One side of a double-entry posting. Exactly one of the two amounts is
/// nonzero on a well-formed line.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Line {
    pub(crate) account_code: String,
    pub(crate) debit_amount: f64,
    pub(crate) credit_amount: f64,
}

impl Line {
    pub(crate) fn debit(account_code: String, amount: f64) -> Self {
        Self {
            account_code,
            debit_amount: amount,
            credit_amount: 0.0,
        }
    }

    pub(crate) fn credit(account_code: String, amount: f64) -> Self {
        Self {
            account_code,
            debit_amount: 0.0,
            credit_amount: amount,
        }
    }
}

/// Check the double-entry invariant over a set of lines before anything is
/// sent to the server: at least one line on each side, and the two sides
/// summing to the same amount within [`BALANCE_TOLERANCE`]. Returns the
/// voucher total (the debit sum) when the lines balance.
pub(crate) fn validate_balanced(lines: &[Line]) -> Result<f64, Validation> {
    if !lines.iter().any(|line| line.debit_amount > 0.0) {
        return Err(Validation::NoDebitLines);
    }
    if !lines.iter().any(|line| line.credit_amount > 0.0) {
        return Err(Validation::NoCreditLines);
    }

    let debits: f64 = lines.iter().map(|line| line.debit_amount).sum();
    let credits: f64 = lines.iter().map(|line| line.credit_amount).sum();
    if (debits - credits).abs() > BALANCE_TOLERANCE {
        return Err(Validation::OutOfBalance { debits, credits });
    }

    Ok(debits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_lines_are_accepted() {
        let lines = [
            Line::debit("1000".to_owned(), 100.0),
            Line::credit("4000".to_owned(), 100.0),
        ];
        assert_eq!(validate_balanced(&lines).expect("lines balance"), 100.0);
    }

    #[test]
    fn sub_tolerance_float_accumulation_is_accepted() {
        let lines = [
            Line::debit("1000".to_owned(), 0.1),
            Line::debit("1000".to_owned(), 0.2),
            Line::credit("4000".to_owned(), 0.3),
        ];
        assert!(validate_balanced(&lines).is_ok());
    }

    #[test]
    fn out_of_balance_lines_are_rejected() {
        let lines = [
            Line::debit("1000".to_owned(), 100.0),
            Line::credit("4000".to_owned(), 99.5),
        ];
        assert!(matches!(
            validate_balanced(&lines),
            Err(Validation::OutOfBalance { .. })
        ));
    }

    #[test]
    fn each_side_must_be_present() {
        assert!(matches!(
            validate_balanced(&[Line::credit("4000".to_owned(), 10.0)]),
            Err(Validation::NoDebitLines)
        ));
        assert!(matches!(
            validate_balanced(&[Line::debit("1000".to_owned(), 10.0)]),
            Err(Validation::NoCreditLines)
        ));
        assert!(matches!(
            validate_balanced(&[]),
            Err(Validation::NoDebitLines)
        ));
    }
}
