use inbox_model::{ErrorKind, FetchError};
use mime::Mime;
use reqwest::{Response, Url, header};
use serde::de::DeserializeOwned;

/// Maps a reqwest failure for `url` into a [`FetchError`].
pub fn error_from_reqwest(err: reqwest::Error, url: &Url) -> FetchError {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_decode() {
        ErrorKind::Decode
    } else {
        ErrorKind::Transport
    };
    FetchError::new(kind, format!("GET {url}: {err}"))
}

/// Checks the status and content type of `resp`, then decodes its body.
pub async fn decode_json<T: DeserializeOwned>(
    resp: Response,
    url: &Url,
) -> Result<T, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::status(status.as_u16(), format!("GET {url}")));
    }

    // A missing content type is tolerated, the body decides.
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    if let Some(content_type) = content_type {
        if !is_json_content_type(content_type) {
            return Err(FetchError::new(
                ErrorKind::Decode,
                format!("GET {url}: unexpected content type: {content_type}"),
            ));
        }
    }

    let body = resp
        .bytes()
        .await
        .map_err(|err| error_from_reqwest(err, url))?;
    trace!("got {} bytes from {url}", body.len());

    serde_json::from_slice(&body).map_err(|err| {
        FetchError::new(ErrorKind::Decode, format!("GET {url}: {err}"))
    })
}

/// Accepts `application/json` and `+json` suffixed types.
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        .unwrap_or(false)
}
