// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use clap::ValueEnum;
use inflector::Inflector as _;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tabled::Tabled;

/// Account classification. The server stores these as numeric codes.
#[derive(Copy, Clone, Debug, Deserialize_repr, Serialize_repr, PartialEq, Eq, ValueEnum)]
#[repr(u8)]
pub(crate) enum AccountType {
    Asset = 1,
    Liability = 2,
    Equity = 3,
    Revenue = 4,
    Expense = 5,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.to_possible_value().ok_or(std::fmt::Error)?;
        write!(f, "{}", value.get_name().to_title_case())
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Account {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Code")]
    pub(crate) account_code: String,
    #[tabled(rename = "Name")]
    pub(crate) account_name: String,
    #[tabled(rename = "Type")]
    pub(crate) account_type: AccountType,
    #[tabled(rename = "Balance", display_with = "super::display_amount")]
    pub(crate) balance: f64,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) is_active: bool,
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_tokens, Token};

    use super::*;

    #[test]
    fn account_type_wire_codes() {
        assert_tokens(&AccountType::Asset, &[Token::U8(1)]);
        assert_tokens(&AccountType::Liability, &[Token::U8(2)]);
        assert_tokens(&AccountType::Equity, &[Token::U8(3)]);
        assert_tokens(&AccountType::Revenue, &[Token::U8(4)]);
        assert_tokens(&AccountType::Expense, &[Token::U8(5)]);
    }

    #[test]
    fn account_type_display_uses_title_case() {
        assert_eq!(AccountType::Asset.to_string(), "Asset");
        assert_eq!(AccountType::Expense.to_string(), "Expense");
    }
}
