//! A conversation source backed by the REST API.

#[macro_use]
extern crate tracing;

mod config;
mod response;

use std::sync::Arc;

use inbox_model::{
    Conversation, ConversationSource, ErrorKind, FetchError, Message, Session,
    User,
};
use reqwest::{Client, Url, header};
use serde::de::DeserializeOwned;

pub use config::{HttpSourceConfig, HttpSourceConfigBuilder};

/// Conversation source that reads from the REST API.
///
/// Requests are made against these resources, relative to the configured
/// base URL:
///
/// - `GET /conversations`
/// - `GET /conversations/{conversation_id}/messages`
/// - `GET /users`
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: Client,
    config: Arc<HttpSourceConfig>,
}

impl HttpSource {
    /// Creates a new `HttpSource` with the given configuration.
    #[inline]
    pub fn new(config: HttpSourceConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a new `HttpSource` that sends requests through `client`.
    #[inline]
    pub fn with_client(config: HttpSourceConfig, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let invalid = |reason: String| {
            FetchError::new(
                ErrorKind::Transport,
                format!("invalid base url {:?}: {reason}", self.config.base_url),
            )
        };
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned + Send + 'static>(
        &self,
        session: &Session,
        segments: &[&str],
    ) -> impl Future<Output = Result<T, FetchError>> + Send + 'static + use<T>
    {
        let req = self.endpoint(segments).map(|url| {
            let req = self
                .client
                .get(url.clone())
                .timeout(self.config.timeout)
                .header(header::ACCEPT, "application/json");
            match session.token() {
                Some(token) => (url, req.bearer_auth(token)),
                None => (url, req),
            }
        });

        async move {
            let (url, req) = req?;
            debug!("GET {url}");
            let resp = req
                .send()
                .await
                .map_err(|err| response::error_from_reqwest(err, &url))?;
            response::decode_json(resp, &url).await
        }
    }
}

impl ConversationSource for HttpSource {
    fn conversations(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Conversation>, FetchError>> + Send + 'static
    {
        self.get(session, &["conversations"])
    }

    fn users(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send + 'static
    {
        self.get(session, &["users"])
    }

    fn messages(
        &self,
        session: &Session,
        conversation_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, FetchError>> + Send + 'static
    {
        self.get(session, &["conversations", conversation_id, "messages"])
    }
}
