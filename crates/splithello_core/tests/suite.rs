use splithello_core::{Config, ProbeSuite};
use splithello_net::TcpProber;
use splithello_traits::{Target, Verdict};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers every connection with a fake ServerHello once a full TLS record has arrived,
/// counting how many reads it took to collect it.
async fn tls_double(connections: usize) -> (SocketAddr, tokio::task::JoinHandle<Vec<usize>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut reads_per_conn = Vec::new();
        for _ in 0..connections {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut record = Vec::new();
            let mut buf = [0u8; 4096];
            let mut reads = 0;
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                assert!(n > 0, "client closed before the record was complete");
                reads += 1;
                record.extend_from_slice(&buf[..n]);
                if record.len() >= 5 {
                    let len = u16::from_be_bytes([record[3], record[4]]) as usize;
                    if record.len() >= 5 + len {
                        break;
                    }
                }
            }
            reads_per_conn.push(reads);
            stream.write_all(b"\x16\x03\x03\x00\x04done").await.unwrap();
        }
        reads_per_conn
    });

    (addr, handle)
}

fn local_config(addr: SocketAddr) -> Config {
    let mut config = Config::new(Target::new(
        "example.com",
        Some(addr.ip().to_string()),
        addr.port(),
    ));
    config.split_delay = Duration::from_millis(200);
    config
}

#[tokio::test]
async fn test_well_behaved_server() {
    let (addr, server) = tls_double(4).await;
    let config = local_config(addr);
    let prober = TcpProber::new(config.transport.clone(), config.read_limit);
    let suite = ProbeSuite::new(config, prober);

    let mut out = Vec::new();
    let reports = suite.run(&mut out).await.unwrap();
    assert!(reports.iter().all(|r| r.outcome.verdict() == Verdict::ServerHello));

    // single writes arrive whole, split writes in two pieces
    let reads = server.await.unwrap();
    assert_eq!(reads[1], 2);
    assert_eq!(reads[3], 2);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("every ClientHello"));
}

#[tokio::test]
async fn test_unreachable_server_reports_every_trial() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = local_config(addr);
    let prober = TcpProber::new(config.transport.clone(), config.read_limit);
    let suite = ProbeSuite::new(config, prober);

    let mut out = Vec::new();
    let reports = suite.run(&mut out).await.unwrap();
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.outcome.verdict() == Verdict::Error));

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("connect to 127.0.0.1:").count(), 4);
}
