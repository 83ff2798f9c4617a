// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures_util::lock::Mutex;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    model,
    storage::{self, Storage as _},
};

/// An opaque bearer token issued by the server. The client never inspects
/// it; it only replays it on authenticated requests.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(transparent)]
pub(crate) struct Token(String);

impl Token {
    pub(crate) const fn new(value: String) -> Self {
        Self(value)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl secrecy::Zeroize for Token {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl secrecy::CloneableSecret for Token {}

impl secrecy::SerializableSecret for Token {}

/// A session is a token and a user profile, together. Anything less is not
/// a session: storage that yields a partial record fails to deserialize and
/// the context below wipes it.
#[derive(Serialize, Deserialize, Clone)]
pub(crate) struct Data {
    token: secrecy::Secret<Token>,
    user: model::User,
}

impl Data {
    pub(crate) const fn new(token: secrecy::Secret<Token>, user: model::User) -> Self {
        Self { token, user }
    }

    pub(crate) const fn token(&self) -> &secrecy::Secret<Token> {
        &self.token
    }

    pub(crate) const fn user(&self) -> &model::User {
        &self.user
    }

    pub(crate) fn with_user(self, user: model::User) -> Self {
        Self { user, ..self }
    }
}

/// Shared handle to the session store. Reads are fail-safe: a record that
/// cannot be read is wiped and reported absent rather than surfaced as an
/// error, and writes never fail observably.
#[derive(Clone)]
pub(crate) struct Context {
    storage: Arc<Mutex<Box<dyn storage::Storage>>>,
}

impl Context {
    pub(crate) fn new(storage: Box<dyn storage::Storage>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    pub(crate) async fn current(&self) -> Option<Data> {
        let mut guard = self.storage.lock().await;
        match guard.get().await {
            Ok(data) => data,
            Err(e) => {
                warn!("Discarding a stored session that could not be read: {}", e);
                if let Err(e) = guard.clear().await {
                    warn!("The unreadable session could not be removed: {}", e);
                }
                None
            }
        }
    }

    pub(crate) async fn establish(&self, data: &Data) {
        if let Err(e) = self.storage.lock().await.update(data).await {
            warn!(
                "The session could not be saved; you may need to sign in again on the next invocation: {}",
                e
            );
        }
    }

    /// Tear down the current session, if one is still present. The check and
    /// the removal happen under one lock so concurrent authorization
    /// failures produce a single teardown.
    pub(crate) async fn invalidate(&self) -> bool {
        let mut guard = self.storage.lock().await;
        if let Ok(None) = guard.get().await {
            return false;
        }
        if let Err(e) = guard.clear().await {
            warn!("The session could not be removed from storage: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    fn sample() -> Data {
        Data::new(
            Token::new("abc123".to_owned()).into(),
            model::User {
                id: 7,
                name: "Alice".to_owned(),
                username: "alice".to_owned(),
                email: Some("alice@example.com".to_owned()),
                role: None,
            },
        )
    }

    #[tokio::test]
    async fn establish_then_current() {
        let ctx = Context::new(Box::new(storage::Memory::new()));
        assert!(ctx.current().await.is_none());

        ctx.establish(&sample()).await;
        let data = ctx.current().await.expect("session should be present");
        assert_eq!(data.token().expose_secret().as_str(), "abc123");
        assert_eq!(data.user().name, "Alice");
    }

    #[tokio::test]
    async fn invalidate_reports_whether_a_session_was_present() {
        let ctx = Context::new(Box::new(storage::Memory::new()));
        ctx.establish(&sample()).await;

        assert!(ctx.invalidate().await);
        assert!(!ctx.invalidate().await);
        assert!(ctx.current().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_record_is_wiped_and_reported_absent() {
        let path = std::env::temp_dir().join(format!(
            "tally-session-test-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, b"not json").expect("scratch file should be writable");

        let ctx = Context::new(Box::new(storage::File::with_path(path.clone())));
        assert!(ctx.current().await.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn refreshed_profile_replaces_the_cached_one() {
        let ctx = Context::new(Box::new(storage::Memory::new()));
        ctx.establish(&sample()).await;

        let data = ctx.current().await.expect("session should be present");
        let renamed = data.with_user(model::User {
            name: "Alice L.".to_owned(),
            ..sample().user().clone()
        });
        ctx.establish(&renamed).await;

        let data = ctx.current().await.expect("session should be present");
        assert_eq!(data.user().name, "Alice L.");
        assert_eq!(data.token().expose_secret().as_str(), "abc123");
    }
}
