// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::model;

use super::{Executor, Request};

pub(crate) struct List;

impl From<List> for Request {
    fn from(_: List) -> Self {
        Self::new(Method::GET, "api/Vouchers")
    }
}

impl Executor for List {
    type Response = Vec<model::voucher::Voucher>;
}

pub(crate) struct Pending;

impl From<Pending> for Request {
    fn from(_: Pending) -> Self {
        Self::new(Method::GET, "api/Vouchers/Pending")
    }
}

impl Executor for Pending {
    type Response = Vec<model::voucher::Voucher>;
}

/// Ask the server to reserve the next voucher number in sequence.
pub(crate) struct NewNumber;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoucherNumber {
    pub(crate) voucher_number: String,
}

impl From<NewNumber> for Request {
    fn from(_: NewNumber) -> Self {
        Self::new(Method::GET, "api/Vouchers/GetNewVoucherNumber")
    }
}

impl Executor for NewNumber {
    type Response = VoucherNumber;
}

/// Post a voucher. Callers are expected to have run
/// [`model::voucher::validate_balanced`] over the lines first; the total
/// here is the debit sum that check produces.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Create {
    pub(crate) voucher_number: String,
    pub(crate) voucher_date: NaiveDate,
    pub(crate) narration: String,
    pub(crate) total_amount: f64,
    pub(crate) details: Vec<model::voucher::Line>,
}

impl TryFrom<Create> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Create) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/Vouchers").with_json(&value)?)
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
        Self::new(Method::DELETE, format!("api/Vouchers/{}", value.id))
    }
}

impl Executor for Delete {
    type Response = Option<serde_json::Value>;
}

/// Attach a supporting document to a voucher. The upload is multipart, so
/// the pipeline leaves the content type to the form encoder.
pub(crate) struct Attach {
    pub(crate) id: i64,
    pub(crate) file_name: String,
    pub(crate) data: Vec<u8>,
}

impl From<Attach> for Request {
    fn from(value: Attach) -> Self {
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(value.data).file_name(value.file_name),
        );
        Self::new(Method::POST, format!("api/Vouchers/{}/attachment", value.id))
            .with_multipart(form)
    }
}

impl Executor for Attach {
    type Response = Option<serde_json::Value>;
}
