use clap::Args;
use provenance::api::PropertyReport;
use provenance::config::AnalyzerConfig;
use provenance::error::PvResult;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: AnalyzerConfig,

    /// CSV destination
    #[arg(short, long)]
    pub output: String,
}

pub fn run(args: &ExportArgs, source: &str, config: AnalyzerConfig) -> PvResult<()> {
    let analyzer = super::load_analyzer(source, config)?;
    let reports = analyzer.by_properties();

    let file = std::fs::File::create(&args.output)?;
    let rows = write_points(file, &reports)?;
    info!("Exported {} points to {}", rows, args.output);
    Ok(())
}

/// One CSV row per raw value of every reported property.
pub fn write_points<W: Write>(out: W, reports: &[PropertyReport]) -> PvResult<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "property",
        "minimum",
        "maximum",
        "label",
        "label_index",
        "color",
        "month",
        "value",
    ])?;

    let mut rows = 0;
    for report in reports {
        for p in &report.list {
            wtr.write_record([
                report.property.clone(),
                report.minimum.to_string(),
                report.maximum.to_string(),
                p.label.clone(),
                p.label_index.to_string(),
                p.color.to_string(),
                p.month.clone().unwrap_or_default(),
                p.value.to_string(),
            ])?;
            rows += 1;
        }
    }
    wtr.flush()?;
    Ok(rows)
}
