//! Prints the summaries of the current user's conversations as JSON.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use inbox::{FailurePolicy, InboxClient, InboxClientBuilder, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match Options::from_env(|name| env::var(name).ok()) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let client = options.client_builder().build();

    match run(&client, &options.session).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Settings read from `INBOX_*` variables.
#[derive(Debug, PartialEq, Eq)]
struct Options {
    base_url: String,
    timeout: Option<Duration>,
    concurrency: Option<usize>,
    failure_policy: FailurePolicy,
    session: Session,
}

impl Options {
    /// Reads the settings through `var`, which returns the value of a
    /// variable if it is set.
    fn from_env<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(base_url) = var("INBOX_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
        else {
            return Err(
                "INBOX_API_BASE_URL environment variable is not set".to_owned()
            );
        };

        let timeout = parse_number("INBOX_TIMEOUT_SECS", var("INBOX_TIMEOUT_SECS"))
            .map(Duration::from_secs);
        let concurrency =
            parse_number("INBOX_CONCURRENCY", var("INBOX_CONCURRENCY"));
        let failure_policy = match var("INBOX_SKIP_FAILED") {
            Some(v) if is_truthy(&v) => FailurePolicy::Skip,
            _ => FailurePolicy::Abort,
        };
        let session = match var("INBOX_SESSION_TOKEN") {
            Some(token) if !token.trim().is_empty() => {
                Session::with_token(token.trim())
            }
            _ => Session::anonymous(),
        };

        Ok(Self {
            base_url,
            timeout,
            concurrency,
            failure_policy,
            session,
        })
    }

    fn client_builder(&self) -> InboxClientBuilder {
        let mut builder = InboxClientBuilder::with_base_url(&self.base_url)
            .with_failure_policy(self.failure_policy);
        if let Some(timeout) = self.timeout {
            builder = builder.with_timeout(timeout);
        }
        if let Some(concurrency) = self.concurrency {
            builder = builder.with_concurrency(concurrency);
        }
        builder
    }
}

/// Fetches the summaries and renders them as pretty JSON.
async fn run(client: &InboxClient, session: &Session) -> Result<String, String> {
    let summaries = client
        .recent_conversation_summaries(session)
        .await
        .map_err(|err| format!("failed to fetch conversations: {err}"))?;
    serde_json::to_string_pretty(&summaries).map_err(|err| {
        error!("error encoding summaries: {err}");
        format!("failed to encode summaries: {err}")
    })
}

/// Parses a numeric variable, ignoring it with a warning if malformed.
fn parse_number<T: FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring {name}={value:?}, not a number");
            None
        }
    }
}

#[inline]
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
