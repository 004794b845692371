use crate::reports;
use clap::Args;
use provenance::config::AnalyzerConfig;
use provenance::error::PvResult;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: AnalyzerConfig,
}

pub fn run(source: &str, config: AnalyzerConfig) -> PvResult<()> {
    let analyzer = super::load_analyzer(source, config)?;

    reports::print_labels(&analyzer.labels());
    reports::print_properties(analyzer.scorer().model());
    Ok(())
}
