//! Classify curl errors and fetch failures into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Transport(ce) => classify_curl_error(ce),
        FetchError::Http(code) => ErrorKind::HttpStatus(u16::try_from(*code).unwrap_or(u16::MAX)),
        FetchError::NotPdf { .. } => ErrorKind::InvalidPayload,
        FetchError::Storage(_) => ErrorKind::Storage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_kept() {
        assert_eq!(classify(&FetchError::Http(404)), ErrorKind::HttpStatus(404));
        assert_eq!(classify(&FetchError::Http(503)), ErrorKind::HttpStatus(503));
    }

    #[test]
    fn not_pdf_is_invalid_payload() {
        assert_eq!(
            classify(&FetchError::NotPdf { len: 12 }),
            ErrorKind::InvalidPayload
        );
    }

    #[test]
    fn io_is_storage() {
        let e = FetchError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(classify(&e), ErrorKind::Storage);
    }

    #[test]
    fn curl_connect_and_timeout() {
        // CURLE_COULDNT_CONNECT = 7, CURLE_OPERATION_TIMEDOUT = 28
        assert_eq!(classify_curl_error(&curl::Error::new(7)), ErrorKind::Connection);
        assert_eq!(classify_curl_error(&curl::Error::new(28)), ErrorKind::Timeout);
    }
}
