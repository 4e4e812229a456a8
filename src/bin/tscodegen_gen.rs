use clap::Parser;
use tscodegen::cli::{run_cli, Cli};
use tscodegen::logging::{init_logging_with_config, LogConfig};

fn main() {
    let cli = Cli::parse();
    let config = LogConfig::from_env().verbose(cli.verbose);
    if let Err(err) = init_logging_with_config(&config) {
        eprintln!("warning: {err:#}");
    }

    if let Err(err) = run_cli(cli) {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
