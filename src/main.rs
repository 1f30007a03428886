use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = spiral::cli::Cli::parse();
    match cli.subcommand {
        spiral::cli::CliSubcommand::Run { config } => spiral::cli::run(config.as_deref()),
        spiral::cli::CliSubcommand::Trace {
            config,
            viewport,
            instant,
        } => spiral::cli::trace(config.as_deref(), viewport, instant),
    }
}
