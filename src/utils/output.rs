use chrono::{DateTime, Local};
use colored::*;
use serde::Serialize;

use crate::cli::ReportFormat;
use crate::core::data::{Indicator, PerspectiveSummary, ReportRow, ScorecardReport};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{format_datetime, format_score, format_value, truncate_string};

/// Width used when the terminal size is unknown (pipes, tests)
const FALLBACK_TERMINAL_WIDTH: usize = 100;
const MIN_NAME_WIDTH: usize = 10;

pub struct OutputStyle;

impl OutputStyle {
    pub fn name(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn value(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Colour a score by how much of the target was reached
    pub fn score(score: f64, text: &str) -> ColoredString {
        if score >= 100.0 {
            text.green()
        } else if score >= 75.0 {
            text.yellow()
        } else {
            text.red()
        }
    }

    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }

    pub fn print_indicator_detailed(indicator: &Indicator) {
        Self::print_field_colored("Perspective", indicator.perspective.label(), Self::value);
        Self::print_field_colored("KPI", &indicator.name, Self::name);
        Self::print_field_colored("Target", &format_value(indicator.target), Self::value);
        Self::print_field_colored("Actual", &format_value(indicator.actual), Self::value);
        Self::print_field_colored("Weight", &format_value(indicator.weight), Self::muted);
        Self::print_field_colored("Score", &format_score(indicator.score), |s| {
            Self::score(indicator.score, s)
        });
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    perspectives: &'a ScorecardReport,
}

/// Renders scorecard reports in the supported formats
pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn print_report(report: &ScorecardReport, format: &ReportFormat) -> AppResult<()> {
        let now = Local::now();
        let rendered = match format {
            ReportFormat::Table => Self::render_table(report, &now, terminal_width()),
            ReportFormat::Simple => Self::render_simple(report),
            ReportFormat::Json => Self::render_json(report, &now)?,
        };
        println!("{}", rendered);
        Ok(())
    }

    pub fn print_stats(summaries: &[PerspectiveSummary]) {
        println!("{}", Self::render_stats(summaries));
    }

    /// Title, timestamp and one box-drawn table per perspective
    pub fn render_table(report: &ScorecardReport, generated_at: &DateTime<Local>, width: usize) -> String {
        let mut out = Vec::new();
        out.push(format!("{}", OutputStyle::title("Balanced Scorecard Report")));
        out.push(format!("{}", OutputStyle::muted(&format!("Generated {}", format_datetime(generated_at)))));
        out.push(OutputStyle::header_separator());

        for (perspective, rows) in report.iter() {
            out.push(String::new());
            out.push(format!("{}", OutputStyle::header(&format!("{} Perspective", perspective))));
            if rows.is_empty() {
                out.push(format!(" {}", OutputStyle::muted("No KPIs added yet.")));
            } else {
                out.extend(Self::render_rows(rows, width));
            }
            out.push(format!("{}", OutputStyle::muted(&OutputStyle::separator())));
        }

        out.join("\n")
    }

    fn render_rows(rows: &[ReportRow], width: usize) -> Vec<String> {
        let cells: Vec<[String; 3]> = rows
            .iter()
            .map(|r| [format_value(r.target), format_value(r.actual), format_score(r.score)])
            .collect();

        let mut num_widths = ["Target".len(), "Actual".len(), "Score".len()];
        for row in &cells {
            for (w, cell) in num_widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        // Borders and padding take 13 columns for a four-column table.
        let fixed = 13 + num_widths.iter().sum::<usize>();
        let max_name_width = width.saturating_sub(fixed).max(MIN_NAME_WIDTH);
        let name_width = rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("KPI".len())
            .min(max_name_width);

        let rule = |left: &str, mid: &str, right: &str| {
            format!(
                "{}─{}─{}─{}─{}─{}─{}─{}─{}",
                left,
                "─".repeat(name_width),
                mid,
                "─".repeat(num_widths[0]),
                mid,
                "─".repeat(num_widths[1]),
                mid,
                "─".repeat(num_widths[2]),
                right
            )
        };

        let mut lines = vec![
            rule("┌", "┬", "┐"),
            format!(
                "│ {} │ {} │ {} │ {} │",
                OutputStyle::header(&format!("{:<w$}", "KPI", w = name_width)),
                OutputStyle::header(&format!("{:>w$}", "Target", w = num_widths[0])),
                OutputStyle::header(&format!("{:>w$}", "Actual", w = num_widths[1])),
                OutputStyle::header(&format!("{:>w$}", "Score", w = num_widths[2])),
            ),
            rule("├", "┼", "┤"),
        ];

        for (row, [target, actual, score]) in rows.iter().zip(cells.iter()) {
            let name = truncate_string(&row.name, name_width);
            lines.push(format!(
                "│ {} │ {} │ {} │ {} │",
                OutputStyle::name(&format!("{:<w$}", name, w = name_width)),
                OutputStyle::value(&format!("{:>w$}", target, w = num_widths[0])),
                OutputStyle::value(&format!("{:>w$}", actual, w = num_widths[1])),
                OutputStyle::score(row.score, &format!("{:>w$}", score, w = num_widths[2])),
            ));
        }

        lines.push(rule("└", "┴", "┘"));
        lines
    }

    /// One line per KPI, suitable for piping
    pub fn render_simple(report: &ScorecardReport) -> String {
        if report.is_empty() {
            return format!("{}", OutputStyle::muted("No KPIs added yet."));
        }

        report
            .iter()
            .flat_map(|(perspective, rows)| {
                rows.iter().map(move |r| {
                    format!(
                        "{} / {}: {} of {} ({}%)",
                        perspective,
                        OutputStyle::name(&r.name),
                        format_value(r.actual),
                        format_value(r.target),
                        OutputStyle::score(r.score, &format_score(r.score)),
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(report: &ScorecardReport, generated_at: &DateTime<Local>) -> AppResult<String> {
        let payload = JsonReport {
            generated_at: generated_at.to_rfc3339(),
            perspectives: report,
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| AppError::Io(format!("Failed to serialize report to JSON: {}", e)))
    }

    pub fn render_stats(summaries: &[PerspectiveSummary]) -> String {
        let mut out = vec![
            format!("{}", OutputStyle::title("📊 Scorecard Statistics")),
            OutputStyle::header_separator(),
        ];

        for summary in summaries {
            let average = summary
                .average_score
                .map(format_score)
                .unwrap_or_else(|| "-".to_string());
            out.push(format!(
                "{:>20}: {} KPI(s), average score {}",
                OutputStyle::label(summary.perspective.label()),
                OutputStyle::info(&summary.count.to_string()),
                OutputStyle::info(&average),
            ));
        }

        let total: usize = summaries.iter().map(|s| s.count).sum();
        out.push(format!("{:>20}: {}", OutputStyle::label("Total"), OutputStyle::info(&total.to_string())));
        out.join("\n")
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}
