use std::process;

use clap::Parser;
use coursetier::cli::args::Cli;
use coursetier::cli::commands::execute_command;
use coursetier::cli::output;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // RUST_LOG narrows further, e.g. RUST_LOG=coursetier::domain=trace
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter).with_filter(env_filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursetier::util::testing;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        testing::init_test_setup();
        Cli::command().debug_assert();
    }

    #[test]
    fn given_tier_args_when_parsing_then_count_and_flag_set() {
        let cli = Cli::try_parse_from(["coursetier", "--seed", "7", "tier", "4", "--yes"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        match cli.command {
            Some(coursetier::cli::Commands::Tier { count, yes }) => {
                assert_eq!(count, 4);
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_save_name_when_parsing_then_saves_command_sees_it() {
        let cli = Cli::try_parse_from(["coursetier", "saves", "--save", "league"]).unwrap();
        assert_eq!(cli.save.as_deref(), Some("league"));
        assert!(matches!(cli.command, Some(coursetier::cli::Commands::Saves)));
    }

    #[test]
    fn given_save_and_snapshot_when_parsing_then_conflict() {
        let err =
            Cli::try_parse_from(["coursetier", "--save", "a", "--snapshot", "/tmp/b.toml", "list"])
                .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
