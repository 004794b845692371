use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use provenance::config::AnalyzerConfig;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of labelled JSON files
    #[arg(global = true, short, long, default_value = "data")]
    source: String,

    /// JSON analyzer config; explicit CLI flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Check(cmd::check::CheckArgs),
    Inspect(cmd::inspect::InspectArgs),
    Export(cmd::export::ExportArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // stdout is reserved for reports
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Check(args) => (&args.config, "check"),
        Commands::Inspect(args) => (&args.config, "inspect"),
        Commands::Export(args) => (&args.config, "export"),
    };

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from: {}", path);
            let mut file_config = AnalyzerConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    let result = match cli.command {
        Commands::Check(args) => cmd::check::run(&args, &cli.source, config),
        Commands::Inspect(_) => cmd::inspect::run(&cli.source, config),
        Commands::Export(args) => cmd::export::run(&args, &cli.source, config),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
