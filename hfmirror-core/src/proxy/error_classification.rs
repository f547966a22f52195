use std::fmt;

/// Coarse class of an upstream transport failure, for the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Connect,
    Tls,
    Timeout,
    Reset,
    Protocol,
    Unknown,
}

impl TransportFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportFailure::Connect => "connect",
            TransportFailure::Tls => "tls",
            TransportFailure::Timeout => "timeout",
            TransportFailure::Reset => "reset",
            TransportFailure::Protocol => "protocol",
            TransportFailure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `None` for failures that did not originate upstream.
pub fn classify_pingora_error(err: &pingora::Error) -> Option<TransportFailure> {
    use pingora::{ErrorSource, ErrorType::*};

    if err.esource() != &ErrorSource::Upstream {
        return None;
    }

    let failure = match err.etype() {
        ConnectTimedout | ConnectRefused | ConnectNoRoute | ConnectProxyFailure | ConnectError => {
            TransportFailure::Connect
        }

        TLSHandshakeFailure | TLSHandshakeTimedout | TLSWantX509Lookup | InvalidCert
        | HandshakeError => TransportFailure::Tls,

        ReadTimedout | WriteTimedout => TransportFailure::Timeout,

        ReadError | WriteError | ConnectionClosed => TransportFailure::Reset,

        InvalidHTTPHeader | H1Error | H2Error | InvalidH2 | H2Downgrade => {
            TransportFailure::Protocol
        }

        _ => TransportFailure::Unknown,
    };

    Some(failure)
}

/// Status reported to pingora for a failed request. `0` means the client
/// side failed and there is nobody to answer.
pub(crate) fn failure_status(err: &pingora::Error) -> u16 {
    use pingora::{ErrorSource, ErrorType};

    match err.etype() {
        ErrorType::HTTPStatus(code) => *code,
        _ => match err.esource() {
            ErrorSource::Upstream => 502,
            ErrorSource::Downstream => 0,
            _ => 500,
        },
    }
}

/// Status of the error response to write, if one can still be written.
/// Once a response header has gone out the connection is closed instead.
pub(crate) fn error_body_status(err: &pingora::Error, header_sent: bool) -> Option<u16> {
    match failure_status(err) {
        0 => None,
        _ if header_sent => None,
        code => Some(code),
    }
}
