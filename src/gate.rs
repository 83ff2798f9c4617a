// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::debug;

use crate::{
    api::{self, Executor as _},
    error::{Error, Result},
    model,
};

/// The session gate. Every protected command passes through here before
/// doing any work; the public commands use it to keep already-signed-in
/// users from signing in twice.
pub(crate) struct Gate<'pipeline> {
    pipeline: &'pipeline api::Pipeline,
}

impl<'pipeline> Gate<'pipeline> {
    pub(crate) const fn new(pipeline: &'pipeline api::Pipeline) -> Self {
        Self { pipeline }
    }

    /// Resolve the current session to a user profile. An absent session
    /// answers `None` without touching the network. A present session is
    /// validated against the server; success refreshes the cached profile.
    /// Every other outcome, including transport failure, tears the session
    /// down and answers `None`: an unverifiable token is treated as no
    /// token at all.
    pub(crate) async fn authenticated_user(&self) -> Option<model::User> {
        let data = self.pipeline.session().current().await?;

        match api::auth::Validate.execute(self.pipeline).await {
            Ok(user) => {
                self.pipeline
                    .session()
                    .establish(&data.with_user(user.clone()))
                    .await;
                Some(user)
            }
            Err(Error::Unauthorized) => {
                // The pipeline already tore the session down.
                None
            }
            Err(e) => {
                debug!("Session validation failed, treating as signed out: {}", e);
                let _ = self.pipeline.session().invalidate().await;
                None
            }
        }
    }

    /// Like [`Self::authenticated_user`], but an absent or unverifiable
    /// session is an error. Protected commands call this first.
    pub(crate) async fn require(&self) -> Result<model::User> {
        self.authenticated_user().await.ok_or(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{api::stub, session, storage};

    use super::*;

    fn sample_session() -> session::Data {
        session::Data::new(
            session::Token::new("abc123".to_owned()).into(),
            model::User {
                id: 1,
                name: "Alice".to_owned(),
                username: "alice".to_owned(),
                email: None,
                role: None,
            },
        )
    }

    async fn pipeline_with_session(base: Url) -> api::Pipeline {
        let session = session::Context::new(Box::new(storage::Memory::new()));
        session.establish(&sample_session()).await;
        api::Pipeline::new(base, session).expect("pipeline should build")
    }

    #[tokio::test]
    async fn absent_session_answers_none_without_network() {
        // An unreachable base URL: any attempted validation would error as
        // a transport failure rather than resolve to None cleanly.
        let base = Url::parse("http://127.0.0.1:9/").expect("URL should parse");
        let pipeline = api::Pipeline::new(
            base,
            session::Context::new(Box::new(storage::Memory::new())),
        )
        .expect("pipeline should build");

        assert!(Gate::new(&pipeline).authenticated_user().await.is_none());
    }

    #[tokio::test]
    async fn successful_validation_refreshes_the_cached_profile() {
        let server = stub::serve(vec![stub::Response::new(
            "200 OK",
            r#"{"id":1,"name":"Alice Liddell","username":"alice","email":null,"role":"admin"}"#,
        )])
        .await;
        let pipeline = pipeline_with_session(server.url()).await;

        let user = Gate::new(&pipeline)
            .authenticated_user()
            .await
            .expect("session should validate");
        assert_eq!(user.name, "Alice Liddell");

        let cached = pipeline
            .session()
            .current()
            .await
            .expect("session should remain");
        assert_eq!(cached.user().name, "Alice Liddell");
        let _ = server.finish().await;
    }

    #[tokio::test]
    async fn rejected_validation_clears_the_session() {
        let server = stub::serve(vec![stub::Response::new("401 Unauthorized", "")]).await;
        let pipeline = pipeline_with_session(server.url()).await;

        assert!(Gate::new(&pipeline).authenticated_user().await.is_none());
        assert!(pipeline.session().current().await.is_none());
        let _ = server.finish().await;
    }

    #[tokio::test]
    async fn server_errors_fail_closed() {
        let server = stub::serve(vec![stub::Response::new(
            "500 Internal Server Error",
            r#"{"message":"backend blip"}"#,
        )])
        .await;
        let pipeline = pipeline_with_session(server.url()).await;

        assert!(Gate::new(&pipeline).authenticated_user().await.is_none());
        assert!(pipeline.session().current().await.is_none());
        let _ = server.finish().await;
    }

    #[tokio::test]
    async fn transport_failures_fail_closed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback listener should bind");
        let base = Url::parse(&format!(
            "http://{}/",
            listener.local_addr().expect("listener should have an address")
        ))
        .expect("URL should parse");
        drop(listener);

        let pipeline = pipeline_with_session(base).await;
        assert!(Gate::new(&pipeline).authenticated_user().await.is_none());
        assert!(pipeline.session().current().await.is_none());
    }
}
