use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

/// Record header a well-behaved server answers with: handshake content, TLS 1.2 record version.
pub const SERVER_HELLO_MARKER: [u8; 3] = [0x16, 0x03, 0x03];

/// The endpoint under test.
///
/// `server_name` always goes into the SNI extension; `connect_host` is where the
/// socket actually points, which lets a specific backend be probed under a public name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub server_name: String,
    pub connect_host: String,
    pub port: u16,
}

impl Target {
    pub fn new(server_name: impl Into<String>, addr: Option<String>, port: u16) -> Self {
        let server_name = server_name.into();
        let connect_host = addr.unwrap_or_else(|| server_name.clone());
        Self {
            server_name,
            connect_host,
            port,
        }
    }

    pub fn authority(&self) -> String {
        format!("{}:{}", self.connect_host, self.port)
    }
}

/// One step of a delivery plan, expressed against the message being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStep {
    Write(Range<usize>),
    Pause(Duration),
}

/// Decides how a fully built message is cut into transport writes.
pub trait DeliveryStrategy: Send + Sync {
    /// Ordered write/pause plan covering `0..len` exactly once.
    fn plan(&self, len: usize) -> Vec<WriteStep>;

    /// Human phrase used in the report, e.g. "a single write".
    fn name(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{host}:{port} did not resolve to any address")]
    NoAddress { host: String, port: u16 },

    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("connect to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: SocketAddr, timeout: Duration },

    #[error("write failed after {sent} bytes: {source}")]
    Write {
        sent: usize,
        #[source]
        source: io::Error,
    },

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("no response within {0:?}")]
    ReadTimeout(Duration),
}

/// Executes one trial: connect, deliver `payload` per `strategy`, read one bounded response.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(
        &self,
        target: &Target,
        payload: &[u8],
        strategy: &dyn DeliveryStrategy,
    ) -> Result<Bytes, TransportError>;
}

/// What a single trial produced. Transport failures are data here, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    Received(Bytes),
    Failed(String),
}

impl TrialOutcome {
    pub fn verdict(&self) -> Verdict {
        match self {
            TrialOutcome::Received(data) if data.is_empty() => Verdict::Closed,
            TrialOutcome::Received(data) if data.starts_with(&SERVER_HELLO_MARKER) => {
                Verdict::ServerHello
            }
            TrialOutcome::Received(_) => Verdict::OtherResponse,
            TrialOutcome::Failed(_) => Verdict::Error,
        }
    }
}

impl From<Result<Bytes, TransportError>> for TrialOutcome {
    fn from(result: Result<Bytes, TransportError>) -> Self {
        match result {
            Ok(data) => TrialOutcome::Received(data),
            Err(e) => TrialOutcome::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Bytes' Debug renders as an escaped byte string: b"\x16\x03\x03..."
            TrialOutcome::Received(data) => write!(f, "{:?}", data),
            TrialOutcome::Failed(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ServerHello,
    OtherResponse,
    Closed,
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::ServerHello => "ServerHello",
            Verdict::OtherResponse => "other response",
            Verdict::Closed => "closed",
            Verdict::Error => "error",
        };
        f.write_str(s)
    }
}

/// Telemetry for one completed trial.
#[derive(Debug, Clone)]
pub struct TrialReport {
    pub profile: String,
    pub strategy: String,
    pub message_len: usize,
    pub outcome: TrialOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_connect_host_to_server_name() {
        let target = Target::new("example.com", None, 443);
        assert_eq!(target.connect_host, "example.com");
        assert_eq!(target.authority(), "example.com:443");
    }

    #[test]
    fn test_target_addr_override_keeps_sni() {
        let target = Target::new("example.com", Some("192.0.2.7".to_string()), 8443);
        assert_eq!(target.server_name, "example.com");
        assert_eq!(target.authority(), "192.0.2.7:8443");
    }

    #[test]
    fn test_verdict_classification() {
        let hello = TrialOutcome::Received(Bytes::from_static(b"\x16\x03\x03\x00\x7a"));
        assert_eq!(hello.verdict(), Verdict::ServerHello);

        let alert = TrialOutcome::Received(Bytes::from_static(b"\x15\x03\x03\x00\x02\x02\x28"));
        assert_eq!(alert.verdict(), Verdict::OtherResponse);

        assert_eq!(TrialOutcome::Received(Bytes::new()).verdict(), Verdict::Closed);
        assert_eq!(TrialOutcome::Failed("reset".into()).verdict(), Verdict::Error);
    }

    #[test]
    fn test_outcome_display_is_byte_string() {
        let outcome = TrialOutcome::Received(Bytes::from_static(b"\x16\x03\x03A"));
        assert_eq!(outcome.to_string(), "b\"\\x16\\x03\\x03A\"");
    }

    #[test]
    fn test_outcome_from_transport_error() {
        let err = TransportError::Read(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "reset by peer",
        ));
        let outcome = TrialOutcome::from(Err::<Bytes, _>(err));
        assert_eq!(outcome, TrialOutcome::Failed("read failed: reset by peer".to_string()));
    }
}
