// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod accounts;
pub(crate) mod auth;
pub(crate) mod mappings;
pub(crate) mod payments;
pub(crate) mod receipts;
pub(crate) mod reports;
pub(crate) mod search;
pub(crate) mod vouchers;

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Method, StatusCode};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{self, Error, Result},
    metadata, model, session,
};

pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

/// A single outbound call, described independently of the session that will
/// authenticate it. Endpoint types convert into this and the pipeline adds
/// the bearer token at dispatch time.
pub(crate) struct Request {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    headers: Vec<(&'static str, String)>,
    body: Body,
    session: bool,
}

impl Request {
    pub(in crate::api) fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Self {
            method,
            path: path.into(),
            query: vec![],
            headers: vec![],
            body: Body::Empty,
            session: true,
        }
    }

    pub(in crate::api) fn with_json<T: Serialize>(
        mut self,
        body: &T,
    ) -> Result<Self, serde_json::Error> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(in crate::api) fn with_multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub(in crate::api) fn with_query<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(in crate::api) fn with_header<V: ToString>(mut self, name: &'static str, value: V) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    /// Mark the request as one that may be made without a session (the
    /// sign-in and registration calls themselves).
    pub(in crate::api) fn public(mut self) -> Self {
        self.session = false;
        self
    }
}

/// An endpoint with a typed response. Implementors describe the call by
/// converting into a [`Request`]; dispatch and decoding are shared here.
#[async_trait]
pub(crate) trait Executor {
    type Response;

    async fn execute(self, pipeline: &Pipeline) -> Result<Self::Response>
    where
        Self: TryInto<Request> + Send + Sized,
        <Self as TryInto<Request>>::Error: Send,
        Error: From<<Self as TryInto<Request>>::Error>,
        Self::Response: for<'de> Deserialize<'de>,
    {
        let body = pipeline.dispatch(self.try_into()?).await?;
        if body.is_empty() {
            // Mutation endpoints answer 2xx with no payload.
            Ok(serde_json::from_slice(b"null")?)
        } else {
            Ok(serde_json::from_slice(&body)?)
        }
    }
}

/// The authenticated request pipeline. It owns the HTTP client and the
/// session context; its only job is authentication and decoding, so
/// business-level failures are returned to the caller as typed errors
/// rather than handled here.
pub(crate) struct Pipeline {
    http: reqwest::Client,
    base: Url,
    session: session::Context,
}

impl Pipeline {
    pub(crate) fn new(base: Url, session: session::Context) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(metadata::USER_AGENT.as_str())
                .build()?,
            base,
            session,
        })
    }

    pub(crate) const fn session(&self) -> &session::Context {
        &self.session
    }

    /// Send one request and return the raw response body. Behavior by
    /// outcome:
    ///
    /// * session required but absent: [`Error::Unauthorized`] without any
    ///   network traffic;
    /// * HTTP 401: the session is torn down (once, however many calls race)
    ///   and [`Error::Unauthorized`] is returned;
    /// * other non-success statuses: [`error::Api::Rejected`] carrying the
    ///   server's message, session untouched;
    /// * transport failures: [`Error::Http`], session untouched.
    pub(crate) async fn dispatch(&self, req: Request) -> Result<Vec<u8>> {
        let token = if req.session {
            match self.session.current().await {
                Some(data) => Some(data.token().expose_secret().as_str().to_owned()),
                None => return Err(Error::Unauthorized),
            }
        } else {
            None
        };

        let url = self.base.join(&req.path)?;
        debug!("{} {}", req.method, url);

        let mut builder = self.http.request(req.method, url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        for (name, value) in &req.headers {
            builder = builder.header(*name, value.as_str());
        }
        builder = match req.body {
            Body::Empty => builder.header(header::CONTENT_TYPE, "application/json"),
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form),
        };
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await.map_err(Error::Http)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.bytes().await.map_err(Error::Http)?.to_vec());
        }

        if status == StatusCode::UNAUTHORIZED {
            let _ = self.session.invalidate().await;
            return Err(Error::Unauthorized);
        }

        let message = resp
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<model::Failure>(&body).ok())
            .map_or_else(
                || status.canonical_reason().unwrap_or("unknown error").to_owned(),
                |failure| failure.message,
            );
        Err(error::Api::Rejected { status, message }.into())
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use std::net::SocketAddr;

    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
        sync::mpsc,
        task::JoinHandle,
    };
    use url::Url;

    pub(crate) struct Response {
        pub(crate) status: &'static str,
        pub(crate) body: &'static str,
    }

    impl Response {
        pub(crate) const fn new(status: &'static str, body: &'static str) -> Self {
            Self { status, body }
        }
    }

    pub(crate) struct Server {
        addr: SocketAddr,
        requests: mpsc::UnboundedReceiver<String>,
        handle: JoinHandle<()>,
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let Ok(n) = socket.read(&mut chunk).await else {
                break;
            };
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let wanted = head_end + 4 + content_length(&text[..head_end]);
                if buf.len() >= wanted {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve a fixed script of responses on a local port, one connection
    /// per response, capturing each raw request for inspection.
    pub(crate) async fn serve(responses: Vec<Response>) -> Server {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback listener should bind");
        let addr = listener.local_addr().expect("listener should have an address");
        let (tx, requests) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            for response in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let req = read_request(&mut socket).await;
                let _ = tx.send(req);

                let payload = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    response.status,
                    response.body.len(),
                    response.body,
                );
                let _ = socket.write_all(payload.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Server {
            addr,
            requests,
            handle,
        }
    }

    impl Server {
        pub(crate) fn url(&self) -> Url {
            Url::parse(&format!("http://{}/", self.addr)).expect("loopback URL should parse")
        }

        /// Wait for the whole response script to be consumed and return the
        /// captured requests in order.
        pub(crate) async fn finish(mut self) -> Vec<String> {
            let _ = self.handle.await;
            let mut captured = Vec::new();
            while let Ok(req) = self.requests.try_recv() {
                captured.push(req);
            }
            captured
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::storage;

    use super::*;

    struct CountingStorage {
        inner: storage::Memory,
        clears: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    #[async_trait]
    impl storage::Storage for CountingStorage {
        async fn get(&mut self) -> Result<Option<session::Data>> {
            self.inner.get().await
        }

        async fn update(&mut self, data: &session::Data) -> Result<()> {
            self.inner.update(data).await
        }

        async fn clear(&mut self) -> Result<()> {
            let _ = self
                .clears
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.clear().await
        }
    }

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

    async fn signed_in_pipeline(base: Url) -> Pipeline {
        let session = session::Context::new(Box::new(storage::Memory::new()));
        session.establish(&sample_session()).await;
        Pipeline::new(base, session).expect("pipeline should build")
    }

    #[tokio::test]
    async fn absent_session_short_circuits_without_network() {
        // Port 9 is the TCP discard service; nothing in the test
        // environment listens there, so any attempted connection would
        // surface as a transport error instead of Unauthorized.
        let base = Url::parse("http://127.0.0.1:9/").expect("URL should parse");
        let pipeline = Pipeline::new(
            base,
            session::Context::new(Box::new(storage::Memory::new())),
        )
        .expect("pipeline should build");

        let err = pipeline
            .dispatch(Request::new(Method::GET, "api/ChartOfAccounts"))
            .await
            .expect_err("dispatch should fail");
        assert!(matches!(err, Error::Unauthorized));
    }

    #[tokio::test]
    async fn bearer_token_and_json_content_type_are_attached() {
        let server = stub::serve(vec![stub::Response::new("200 OK", "[]")]).await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let body = pipeline
            .dispatch(Request::new(Method::GET, "api/ChartOfAccounts"))
            .await
            .expect("dispatch should succeed");
        assert_eq!(body, b"[]");

        let captured = server.finish().await;
        assert_eq!(captured.len(), 1);
        let req = captured[0].to_lowercase();
        assert!(req.contains("authorization: bearer abc123"));
        assert!(req.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn multipart_bodies_are_not_sent_as_json() {
        let server = stub::serve(vec![stub::Response::new("200 OK", "null")]).await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let form = reqwest::multipart::Form::new().text("note", "supporting document");
        let _ = pipeline
            .dispatch(Request::new(Method::POST, "api/Vouchers/1/attachment").with_multipart(form))
            .await
            .expect("dispatch should succeed");

        let captured = server.finish().await;
        let req = captured[0].to_lowercase();
        assert!(req.contains("content-type: multipart/form-data"));
        assert!(!req.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn unauthorized_response_tears_down_the_session_and_does_not_retry() {
        let server = stub::serve(vec![stub::Response::new("401 Unauthorized", "")]).await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let err = pipeline
            .dispatch(Request::new(Method::GET, "api/ChartOfAccounts"))
            .await
            .expect_err("dispatch should fail");
        assert!(matches!(err, Error::Unauthorized));
        assert!(pipeline.session().current().await.is_none());

        // One captured request means the rejected call was not reissued.
        assert_eq!(server.finish().await.len(), 1);
    }

    #[tokio::test]
    async fn racing_unauthorized_responses_tear_down_the_session_once() {
        let server = stub::serve(vec![
            stub::Response::new("401 Unauthorized", ""),
            stub::Response::new("401 Unauthorized", ""),
        ])
        .await;

        let clears = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let session = session::Context::new(Box::new(CountingStorage {
            inner: storage::Memory::new(),
            clears: std::sync::Arc::clone(&clears),
        }));
        session.establish(&sample_session()).await;
        let pipeline = Pipeline::new(server.url(), session).expect("pipeline should build");

        let (first, second) = tokio::join!(
            pipeline.dispatch(Request::new(Method::GET, "api/Vouchers")),
            pipeline.dispatch(Request::new(Method::GET, "api/Payments")),
        );
        assert!(matches!(first, Err(Error::Unauthorized)));
        assert!(matches!(second, Err(Error::Unauthorized)));

        assert_eq!(clears.load(std::sync::atomic::Ordering::SeqCst), 1);
        let _ = server.finish().await;
    }

    #[tokio::test]
    async fn business_rejections_carry_the_server_message() {
        let server = stub::serve(vec![stub::Response::new(
            "422 Unprocessable Entity",
            r#"{"message":"voucher number already used"}"#,
        )])
        .await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let err = pipeline
            .dispatch(Request::new(Method::POST, "api/Vouchers"))
            .await
            .expect_err("dispatch should fail");
        match err {
            Error::Api(error::Api::Rejected { status, message }) => {
                assert_eq!(status.as_u16(), 422);
                assert_eq!(message, "voucher number already used");
            }
            other => panic!("unexpected error: {other}"),
        }

        // The rejection does not invalidate the session.
        assert!(pipeline.session().current().await.is_some());
        let _ = server.finish().await;
    }

    #[tokio::test]
    async fn transport_failures_propagate_and_leave_the_session_alone() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback listener should bind");
        let base = Url::parse(&format!(
            "http://{}/",
            listener.local_addr().expect("listener should have an address")
        ))
        .expect("URL should parse");
        drop(listener);

        let pipeline = signed_in_pipeline(base).await;
        let err = pipeline
            .dispatch(Request::new(Method::GET, "api/ChartOfAccounts"))
            .await
            .expect_err("dispatch should fail");
        assert!(matches!(err, Error::Http(_)));
        assert!(pipeline.session().current().await.is_some());
    }

    #[tokio::test]
    async fn undecodable_success_bodies_are_a_typed_error() {
        struct Probe;

        impl From<Probe> for Request {
            fn from(_: Probe) -> Self {
                Self::new(Method::GET, "api/ChartOfAccounts")
            }
        }

        impl Executor for Probe {
            type Response = Vec<model::account::Account>;
        }

        let server = stub::serve(vec![stub::Response::new("200 OK", "{not json")]).await;
        let pipeline = signed_in_pipeline(server.url()).await;

        let err = Probe
            .execute(&pipeline)
            .await
            .expect_err("decode should fail");
        assert!(matches!(err, Error::Json(_)));
        let _ = server.finish().await;
    }
}
