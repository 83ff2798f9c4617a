// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::model;

use super::{Executor, Request};

pub(crate) struct List;

impl From<List> for Request {
    fn from(_: List) -> Self {
        Self::new(Method::GET, "api/ChartOfAccounts")
    }
}

impl Executor for List {
    type Response = Vec<model::account::Account>;
}

pub(crate) struct Get {
    pub(crate) id: i64,
}

impl From<Get> for Request {
    fn from(value: Get) -> Self {
        Self::new(Method::GET, format!("api/ChartOfAccounts/{}", value.id))
    }
}

impl Executor for Get {
    type Response = model::account::Account;
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Create {
    pub(crate) account_code: String,
    pub(crate) account_name: String,
    pub(crate) account_type: model::account::AccountType,
    pub(crate) opening_balance: Option<f64>,
}

impl TryFrom<Create> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Create) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/ChartOfAccounts").with_json(&value)?)
    }
}

impl Executor for Create {
    type Response = Option<serde_json::Value>;
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Update {
    #[serde(skip)]
    pub(crate) id: i64,
    pub(crate) account_name: Option<String>,
    pub(crate) account_type: Option<model::account::AccountType>,
    pub(crate) is_active: Option<bool>,
}

impl TryFrom<Update> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Update) -> Result<Self, Self::Error> {
        Ok(
            Self::new(Method::PUT, format!("api/ChartOfAccounts/{}", value.id))
                .with_json(&value)?,
        )
    }
}

impl Executor for Update {
    type Response = Option<serde_json::Value>;
}

pub(crate) struct Delete {
    pub(crate) id: i64,
}

impl From<Delete> for Request {
    fn from(value: Delete) -> Self {
        Self::new(Method::DELETE, format!("api/ChartOfAccounts/{}", value.id))
    }
}

impl Executor for Delete {
    type Response = Option<serde_json::Value>;
}
