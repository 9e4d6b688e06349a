// Report rendering handlers

use crate::cli::{ReportArgs, ReportFormat};
use crate::config::Config;
use crate::core::operations::ScorecardService;
use crate::core::traits::IndicatorStore;
use crate::utils::error::AppResult;
use crate::utils::output::DisplayFormatter;

pub fn handle_report_command<S: IndicatorStore>(
    service: &ScorecardService<S>,
    config: &Config,
    args: &ReportArgs,
) -> AppResult<()> {
    let format = args.format.unwrap_or(config.general.report_format);
    print_report(service, &format, args.stats)
}

pub fn print_report<S: IndicatorStore>(
    service: &ScorecardService<S>,
    format: &ReportFormat,
    stats: bool,
) -> AppResult<()> {
    let report = service.report()?;
    DisplayFormatter::print_report(&report, format)?;

    // Statistics would break JSON output, so they only follow text formats.
    if stats && *format != ReportFormat::Json {
        println!();
        DisplayFormatter::print_stats(&report.summaries());
    }

    Ok(())
}
