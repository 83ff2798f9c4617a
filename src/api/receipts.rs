// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::model;

use super::{Executor, Request};

pub(crate) struct List;

impl From<List> for Request {
    fn from(_: List) -> Self {
        Self::new(Method::GET, "api/Receipts")
    }
}

impl Executor for List {
    type Response = Vec<model::receipt::Receipt>;
}

pub(crate) struct NewNumber;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiptNumber {
    pub(crate) receipt_number: String,
}

impl From<NewNumber> for Request {
    fn from(_: NewNumber) -> Self {
        Self::new(Method::GET, "api/Receipts/GetNewReceiptNumber")
    }
}

impl Executor for NewNumber {
    type Response = ReceiptNumber;
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Create {
    pub(crate) receipt_number: String,
    pub(crate) receipt_date: NaiveDate,
    pub(crate) account_code: String,
    pub(crate) received_from: String,
    pub(crate) amount: f64,
    pub(crate) description: Option<String>,
}

impl TryFrom<Create> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Create) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/Receipts").with_json(&value)?)
    }
}

impl Executor for Create {
    type Response = Option<serde_json::Value>;
}

pub(crate) struct Delete {
    pub(crate) id: i64,
}

impl From<Delete> for Request {
    fn from(value: Delete) -> Self {
        Self::new(Method::DELETE, format!("api/Receipts/{}", value.id))
    }
}

impl Executor for Delete {
    type Response = Option<serde_json::Value>;
}

/// Fetch the rendered PDF for a receipt. The body is binary, so callers go
/// through [`Pipeline::dispatch`](super::Pipeline::dispatch) directly
/// rather than the JSON decoding in [`Executor`].
pub(crate) struct Pdf {
    pub(crate) id: i64,
}

impl From<Pdf> for Request {
    fn from(value: Pdf) -> Self {
        Self::new(Method::GET, format!("api/Receipts/{}/pdf", value.id))
            .with_header("accept", "application/pdf")
    }
}
