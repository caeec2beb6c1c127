use clap::Parser as _;
use folio::{
    cli::{Cli, Command},
    config, Config, Folio,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Cli { args, command } = Cli::parse();

    match command.unwrap_or(Command::Serve) {
        Command::ConfigTemplate => config::print_config_template(),
        Command::ConfigInit => {
            let path = config::init_config(args.config_path)?;
            println!("Configuration file created: {}", path.display());
        }
        Command::Seed { count } => {
            let config = Config::load(args.config_path)?;
            folio::seed(&config, count).await?;
        }
        Command::Serve => {
            let config = Config::load(args.config_path)?;
            Folio::boot(config).await?.serve().await?;
        }
    }

    Ok(())
}
