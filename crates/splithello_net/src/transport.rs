use socket2::{Domain, Protocol, Socket, Type};
use splithello_traits::{Target, TransportError};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tracing::debug;

/// Socket-level knobs. Both timeouts default to none: a trial waits as long as the OS lets it.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

pub struct TransportBuilder;

impl TransportBuilder {
    pub async fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, TransportError> {
        let addrs: Vec<SocketAddr> = lookup_host((host, port))
            .await
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                port,
                source,
            })?
            .collect();

        if addrs.is_empty() {
            return Err(TransportError::NoAddress {
                host: host.to_string(),
                port,
            });
        }
        Ok(addrs)
    }

    /// Connects to the first reachable address of `target`, trying them in resolver order.
    pub async fn connect_target(
        target: &Target,
        options: &TransportOptions,
    ) -> Result<TcpStream, TransportError> {
        let addrs = Self::resolve(&target.connect_host, target.port).await?;

        let mut last_err = None;
        for addr in addrs {
            match Self::connect(addr, options.connect_timeout).await {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!("{}", e);
                    last_err = Some(e);
                }
            }
        }
        // resolve() never returns an empty list
        Err(last_err.unwrap_or(TransportError::NoAddress {
            host: target.connect_host.clone(),
            port: target.port,
        }))
    }

    /// Opens a TCP connection with Nagle disabled before the handshake, so each
    /// write is pushed to the wire as soon as it is issued instead of being coalesced.
    pub async fn connect(
        addr: SocketAddr,
        timeout: Option<Duration>,
    ) -> Result<TcpStream, TransportError> {
        let socket =
            Self::preflight(addr).map_err(|source| TransportError::Connect { addr, source })?;

        let connect = socket.connect(addr);
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, connect)
                .await
                .map_err(|_| TransportError::ConnectTimeout { addr, timeout: limit })?,
            None => connect.await,
        };
        let stream = result.map_err(|source| TransportError::Connect { addr, source })?;

        debug!("Connected to {} from {:?}", addr, stream.local_addr().ok());
        Ok(stream)
    }

    fn preflight(addr: SocketAddr) -> std::io::Result<TcpSocket> {
        let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };

        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
        socket.set_nodelay(true)?;
        socket.set_nonblocking(true)?; // tokio drives it from here

        let std_stream: std::net::TcpStream = socket.into();
        Ok(TcpSocket::from_std_stream(std_stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_literal_address() {
        let addrs = TransportBuilder::resolve("127.0.0.1", 443).await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:443".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn test_connect_sets_nodelay() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let stream = TransportBuilder::connect(addr, None).await.unwrap();
        assert!(stream.nodelay().unwrap());
        assert_eq!(stream.peer_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = TransportBuilder::connect(addr, Some(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
    }
}
