use notefeed::{cli, config, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());
    init_tracing(&cli);

    if let Err(e) = cli::run(cli) {
        tracing::error!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(cli: &cli::Cli) {
    let format = config::load(cli.config.as_deref())
        .map(|cfg| cfg.logging.format)
        .unwrap_or_default();
    telemetry::init(cli.verbose, cli.quiet, format);
}
