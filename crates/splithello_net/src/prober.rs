use crate::transport::{TransportBuilder, TransportOptions};
use async_trait::async_trait;
use bytes::Bytes;
use splithello_traits::{DeliveryStrategy, Prober, Target, TransportError, WriteStep};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Enough to hold a ServerHello record header and the start of its body.
pub const DEFAULT_READ_LIMIT: usize = 256;

/// Runs a trial over a fresh TCP connection per call. The connection is
/// dropped when the trial ends, whatever the outcome.
pub struct TcpProber {
    options: TransportOptions,
    read_limit: usize,
}

impl TcpProber {
    pub fn new(options: TransportOptions, read_limit: usize) -> Self {
        Self {
            options,
            read_limit,
        }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(TransportOptions::default(), DEFAULT_READ_LIMIT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(
        &self,
        target: &Target,
        payload: &[u8],
        strategy: &dyn DeliveryStrategy,
    ) -> Result<Bytes, TransportError> {
        let mut stream = TransportBuilder::connect_target(target, &self.options).await?;
        info!(
            "Delivering {} bytes to {} via {}",
            payload.len(),
            target.authority(),
            strategy.name()
        );

        let plan = strategy.plan(payload.len());
        send_plan(&mut stream, payload, &plan).await?;
        read_response(&mut stream, self.read_limit, self.options.read_timeout).await
    }
}

/// Executes `plan` against `writer`. Each write is flushed before the next step.
/// Returns the number of bytes sent.
pub async fn send_plan<W>(
    writer: &mut W,
    payload: &[u8],
    plan: &[WriteStep],
) -> Result<usize, TransportError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut sent = 0;
    for step in plan {
        match step {
            WriteStep::Write(range) => {
                let chunk = payload.get(range.clone()).ok_or_else(|| TransportError::Write {
                    sent,
                    source: io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("range {:?} outside {}-byte message", range, payload.len()),
                    ),
                })?;

                writer
                    .write_all(chunk)
                    .await
                    .map_err(|source| TransportError::Write { sent, source })?;
                writer
                    .flush()
                    .await
                    .map_err(|source| TransportError::Write { sent, source })?;
                sent += chunk.len();
                debug!("Wrote bytes {:?} ({} total)", range, sent);
            }
            WriteStep::Pause(delay) => {
                debug!("Pausing {:?} before next write", delay);
                tokio::time::sleep(*delay).await;
            }
        }
    }
    Ok(sent)
}

/// One read of at most `limit` bytes. An empty result means the peer closed cleanly.
pub async fn read_response<R>(
    reader: &mut R,
    limit: usize,
    timeout: Option<Duration>,
) -> Result<Bytes, TransportError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = vec![0u8; limit];
    let read = reader.read(&mut buf);
    let n = match timeout {
        Some(wait) => tokio::time::timeout(wait, read)
            .await
            .map_err(|_| TransportError::ReadTimeout(wait))?,
        None => read.await,
    }
    .map_err(TransportError::Read)?;

    buf.truncate(n);
    debug!("Read {} response bytes", n);
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_send_plan_writes_in_order() {
        let payload = b"0123456789";
        let plan = vec![
            WriteStep::Write(0..5),
            WriteStep::Pause(Duration::from_millis(20)),
            WriteStep::Write(5..10),
        ];

        let mut sink: Vec<u8> = Vec::new();
        let start = Instant::now();
        let sent = send_plan(&mut sink, payload, &plan).await.unwrap();

        assert_eq!(sent, 10);
        assert_eq!(sink, payload.to_vec());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_send_plan_rejects_out_of_range_step() {
        let mut sink: Vec<u8> = Vec::new();
        let err = send_plan(&mut sink, b"abc", &[WriteStep::Write(0..4)])
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Write { sent: 0, .. }));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_read_response_respects_limit() {
        let mut source: &[u8] = &[0x16; 600];
        let data = read_response(&mut source, 256, None).await.unwrap();
        assert_eq!(data.len(), 256);
    }

    #[tokio::test]
    async fn test_read_response_eof_is_empty() {
        let mut source: &[u8] = &[];
        let data = read_response(&mut source, 256, None).await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_read_response_timeout() {
        let (mut client, _server) = tokio::io::duplex(64);
        let err = read_response(&mut client, 256, Some(Duration::from_millis(50)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::ReadTimeout(_)));
    }
}
