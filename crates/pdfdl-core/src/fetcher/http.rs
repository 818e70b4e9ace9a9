//! Single HTTP GET via libcurl, buffering the whole body.

use std::time::Duration;

use crate::config::PDF_MAGIC;
use crate::retry::FetchError;

/// Performs one GET and returns the body. Follows redirects.
/// Non-2xx responses are returned as [`FetchError::Http`].
/// Blocks the current thread; call from `spawn_blocking` if used from async code.
pub fn http_get(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}

/// Checks that `body` starts with the `%PDF` marker.
pub fn validate_pdf(body: &[u8]) -> Result<(), FetchError> {
    if body.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(FetchError::NotPdf { len: body.len() })
    }
}
