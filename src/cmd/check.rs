use crate::reports;
use clap::Args;
use provenance::config::AnalyzerConfig;
use provenance::error::PvResult;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: AnalyzerConfig,

    /// JSON file holding the sample to attribute
    #[arg(long)]
    pub sample: String,

    /// Print the classification as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &CheckArgs, source: &str, config: AnalyzerConfig) -> PvResult<()> {
    let mut analyzer = super::load_analyzer(source, config)?;
    let evaluation = analyzer.check_evaluation(&args.sample);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&evaluation.classification)?
        );
        return Ok(());
    }

    reports::print_classification(&evaluation);
    reports::print_checked(analyzer.checked_map());
    Ok(())
}
