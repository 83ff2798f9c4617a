// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
#[cfg(feature = "keychain")]
mod keychain;
mod memory;
#[cfg(feature = "secret-service")]
mod secret_service;

use async_trait::async_trait;

use crate::{error::Result, session};

pub(crate) use file::File;
#[cfg(feature = "keychain")]
pub(crate) use keychain::Keychain;
pub(crate) use memory::Memory;
#[cfg(feature = "secret-service")]
pub(crate) use secret_service::SecretService;

/// A place to keep the session token and cached user profile between
/// invocations. Implementations either hold a complete session or nothing;
/// partially written records surface as read errors and are wiped by the
/// session context.
#[async_trait]
pub(crate) trait Storage: Send + Sync {
    async fn get(&mut self) -> Result<Option<session::Data>>;
    async fn update(&mut self, data: &session::Data) -> Result<()>;
    async fn clear(&mut self) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&mut self) -> Result<Option<session::Data>> {
        (**self).get().await
    }

    async fn update(&mut self, data: &session::Data) -> Result<()> {
        (**self).update(data).await
    }

    async fn clear(&mut self) -> Result<()> {
        (**self).clear().await
    }
}
