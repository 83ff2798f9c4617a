// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::model;

use super::{Executor, Request};

/// Envelope shared by the sign-in and registration calls.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub(crate) success: bool,
    pub(crate) session_id: Option<String>,
    pub(crate) user: Option<model::User>,
    pub(crate) message: Option<String>,
}

pub(crate) struct Login {
    pub(crate) username: String,
    pub(crate) password: SecretString,
}

impl TryFrom<Login> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Login) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/auth/login")
            .with_json(&json!({
                "username": value.username,
                "password": value.password.expose_secret(),
            }))?
            .public())
    }
}

impl Executor for Login {
    type Response = AuthResponse;
}

pub(crate) struct Register {
    pub(crate) name: String,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: SecretString,
}

impl TryFrom<Register> for Request {
    type Error = crate::error::Error;

    fn try_from(value: Register) -> Result<Self, Self::Error> {
        Ok(Self::new(Method::POST, "api/auth/register")
            .with_json(&json!({
                "name": value.name,
                "username": value.username,
                "email": value.email,
                "password": value.password.expose_secret(),
            }))?
            .public())
    }
}

impl Executor for Register {
    type Response = AuthResponse;
}

/// Lightweight session check; answers the current user profile when the
/// presented token is still good.
pub(crate) struct Validate;

impl From<Validate> for Request {
    fn from(_: Validate) -> Self {
        Self::new(Method::GET, "api/auth/validate")
    }
}

impl Executor for Validate {
    type Response = model::User;
}

pub(crate) struct Logout;

impl From<Logout> for Request {
    fn from(_: Logout) -> Self {
        Self::new(Method::POST, "api/auth/logout")
    }
}

impl Executor for Logout {
    type Response = Option<serde_json::Value>;
}
