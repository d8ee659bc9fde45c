use clap::Parser;
use splithello_core::{init_tracing, Cli, ProbeSuite};
use splithello_net::TcpProber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config()?;
    tracing::info!("Probing {} as {:?}", config.target.authority(), config.target.server_name);

    let prober = TcpProber::new(config.transport.clone(), config.read_limit);
    let suite = ProbeSuite::new(config, prober);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    suite.run(&mut out).await?;

    Ok(())
}
