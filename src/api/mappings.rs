// SPDX-FileCopyrightText: 2022 Noah Fontes
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
        Self::new(Method::GET, "api/GLMappings")
    }
}

impl Executor for List {
    type Response = Vec<model::mapping::GlMapping>;
}

/// Point a transaction type at a general-ledger account. The server upserts
/// by transaction type.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Set {
    pub(crate) transaction_type: String,
    pub(crate) account_code: String,
    pub(crate) description: Option<String>,
}

impl TryFrom<Set> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/GLMappings").with_json(&value)?)
    }
}

impl Executor for Set {
    type Response = Option<serde_json::Value>;
}
