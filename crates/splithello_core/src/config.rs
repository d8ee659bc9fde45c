use anyhow::{bail, Result};
use clap::Parser;
use splithello_net::{TransportOptions, DEFAULT_READ_LIMIT};
use splithello_traits::Target;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "splithello",
    version,
    about = "Sends a TLS ClientHello in one write and split across two writes, and prints what the server answers"
)]
pub struct Cli {
    /// Server name for SNI. Also the address to connect to unless --addr is given.
    pub host: String,

    /// Connect here instead of resolving `host`.
    #[arg(long)]
    pub addr: Option<String>,

    #[arg(long, default_value_t = 443)]
    pub port: u16,

    /// Pause between the two halves of a split write, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Maximum number of response bytes read per trial.
    #[arg(long, default_value_t = DEFAULT_READ_LIMIT)]
    pub read_limit: usize,

    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        if self.read_limit == 0 {
            bail!("--read-limit must be at least 1");
        }

        Ok(Config {
            target: Target::new(self.host, self.addr, self.port),
            split_delay: Duration::from_millis(self.delay_ms),
            read_limit: self.read_limit,
            transport: TransportOptions {
                connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
                read_timeout: self.read_timeout_ms.map(Duration::from_millis),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub split_delay: Duration,
    pub read_limit: usize,
    pub transport: TransportOptions,
}

impl Config {
    /// Same settings as a bare `splithello <host>` invocation.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            split_delay: mod_delivery::DEFAULT_SPLIT_DELAY,
            read_limit: DEFAULT_READ_LIMIT,
            transport: TransportOptions::default(),
        }
    }
}
