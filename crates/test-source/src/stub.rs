use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::{Router, routing};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::Fixture;

#[derive(Clone, Debug, PartialEq, Eq)]
enum StubBody {
    Json(serde_json::Value),
    Raw {
        content_type: Option<String>,
        body: String,
    },
}

/// A canned HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StubRoute {
    status: u16,
    body: StubBody,
    delay: Option<Duration>,
}

impl StubRoute {
    /// Responds `200 OK` with `value` encoded as JSON.
    pub fn json<T: Serialize>(value: &T) -> Self {
        Self {
            status: 200,
            body: StubBody::Json(
                serde_json::to_value(value)
                    .expect("stub bodies must serialize"),
            ),
            delay: None,
        }
    }

    /// Responds with an arbitrary status, content type and body.
    pub fn raw(status: u16, content_type: Option<&str>, body: &str) -> Self {
        Self {
            status,
            body: StubBody::Raw {
                content_type: content_type.map(ToOwned::to_owned),
                body: body.to_owned(),
            },
            delay: None,
        }
    }

    /// Waits before writing the response.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn respond(self) -> Response {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        let status = StatusCode::from_u16(self.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            StubBody::Json(value) => (status, Json(value)).into_response(),
            StubBody::Raw { content_type, body } => {
                let mut response = (status, Body::from(body)).into_response();
                if let Some(value) = content_type
                    .and_then(|v| HeaderValue::from_str(&v).ok())
                {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
                response
            }
        }
    }
}

/// Builder for [`StubServer`].
#[derive(Clone, Debug, Default)]
pub struct StubServerBuilder {
    routes: HashMap<String, StubRoute>,
    token: Option<String>,
}

impl StubServerBuilder {
    /// Serves the REST resources of `fixture` below `prefix`, which is
    /// either empty or starts with a slash (for example `/api`).
    pub fn with_fixture(fixture: &Fixture, prefix: &str) -> Self {
        let mut builder = Self::default()
            .route(
                &format!("{prefix}/conversations"),
                StubRoute::json(&fixture.conversations),
            )
            .route(&format!("{prefix}/users"), StubRoute::json(&fixture.users));
        for (id, messages) in &fixture.messages {
            builder = builder.route(
                &format!("{prefix}/conversations/{id}/messages"),
                StubRoute::json(messages),
            );
        }
        builder
    }

    /// Adds or replaces the response for `path`.
    #[inline]
    pub fn route(mut self, path: &str, route: StubRoute) -> Self {
        self.routes.insert(path.to_owned(), route);
        self
    }

    /// Answers `401` unless the request carries this bearer token.
    #[inline]
    pub fn require_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    /// Binds an ephemeral local port and starts serving.
    pub async fn start(self) -> io::Result<StubServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = self.into_router();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Ok(StubServer { addr, task })
    }

    fn into_router(self) -> Router {
        let mut app = Router::new();
        for (path, route) in self.routes {
            app = app.route(&path, routing::get(move || route.clone().respond()));
        }
        app = app.fallback(|| async { (StatusCode::NOT_FOUND, Html("Not Found")) });
        if let Some(token) = self.token {
            let expected = Arc::<str>::from(format!("Bearer {token}"));
            app = app.layer(middleware::from_fn_with_state(expected, check_token));
        }
        app
    }
}

async fn check_token(
    State(expected): State<Arc<str>>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|v| v.as_bytes() == expected.as_bytes());
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(req).await
}

/// A local HTTP server answering `GET` requests with canned responses.
/// Unknown paths get `404`.
///
/// The server stops accepting connections when dropped.
pub struct StubServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Returns the address the server listens on.
    #[inline]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns `http://{addr}{prefix}`.
    #[inline]
    pub fn base_url(&self, prefix: &str) -> String {
        format!("http://{}{prefix}", self.addr)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
