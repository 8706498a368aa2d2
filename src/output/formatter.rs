use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::scenario::AccountId;
use crate::scoring::{Consumer, ScoreReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colors when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve a color mode against the current stdout
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Auto => std::io::stdout().is_terminal(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

/// Format a score with an explicit sign ("+3", "-2", "0")
pub fn format_score(score: i64) -> String {
    if score > 0 {
        format!("+{}", score)
    } else {
        score.to_string()
    }
}

fn colored_score(score: i64, use_colors: bool) -> String {
    paint_score(format_score(score), score, use_colors)
}

fn paint_score(text: String, score: i64, use_colors: bool) -> String {
    if !use_colors {
        return text;
    }
    if score > 0 {
        text.green().to_string()
    } else if score < 0 {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

fn join_accounts(accounts: &[AccountId]) -> String {
    if accounts.is_empty() {
        "-".to_string()
    } else {
        accounts
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Format a monthly score report.
///
/// First line is the total. With `show_breakdown`, one line per month follows:
/// name (padded), contribution (right-aligned), missed accounts.
pub fn format_report(report: &ScoreReport, show_breakdown: bool, use_colors: bool) -> String {
    let total = format!("Total score: {}", colored_score(report.total, use_colors));
    let total = if use_colors {
        total.bold().to_string()
    } else {
        total
    };

    if !show_breakdown || report.months.is_empty() {
        return total;
    }

    let name_width = report
        .months
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);

    let lines = report.months.iter().map(|month| {
        // Pad before coloring so ANSI codes don't skew alignment
        let score = paint_score(
            format!("{:>4}", format_score(month.contribution)),
            month.contribution,
            use_colors,
        );
        format!(
            "  {:<width$}  {}  missed: {}",
            month.name,
            score,
            join_accounts(&month.missed),
            width = name_width
        )
    });

    std::iter::once(total)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_report_json(report: &ScoreReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize score report")
}

#[derive(Debug, Serialize)]
struct SimpleResult {
    score: i64,
    events: usize,
}

pub fn format_simple(
    score: i64,
    events: usize,
    format: OutputFormat,
    use_colors: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Score: {} ({} events)",
            colored_score(score, use_colors),
            events
        )),
        OutputFormat::Json => serde_json::to_string_pretty(&SimpleResult { score, events })
            .context("Failed to serialize simple score"),
    }
}

#[derive(Debug, Serialize)]
struct StandingResult {
    balance: f64,
    good_standing: bool,
}

pub fn format_standing(
    consumer: &Consumer,
    format: OutputFormat,
    use_colors: bool,
) -> Result<String> {
    let good_standing = consumer.good_standing();
    match format {
        OutputFormat::Text => {
            let verdict = if good_standing {
                "good standing"
            } else {
                "not in good standing"
            };
            let verdict = match (use_colors, good_standing) {
                (false, _) => verdict.to_string(),
                (true, true) => verdict.green().to_string(),
                (true, false) => verdict.red().to_string(),
            };
            Ok(format!("Balance {:.2}: {}", consumer.balance, verdict))
        }
        OutputFormat::Json => serde_json::to_string_pretty(&StandingResult {
            balance: consumer.balance,
            good_standing,
        })
        .context("Failed to serialize standing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::MonthScore;

    fn sample_report() -> ScoreReport {
        ScoreReport {
            total: 3,
            months: vec![
                MonthScore {
                    name: "january".to_string(),
                    contribution: 3,
                    paid: vec!["electric".into(), "gas".into(), "cable".into()],
                    missed: vec![],
                },
                MonthScore {
                    name: "february".to_string(),
                    contribution: 0,
                    paid: vec!["electric".into(), "gas".into()],
                    missed: vec!["cable".into()],
                },
            ],
        }
    }

    #[test]
    fn test_format_score_sign() {
        assert_eq!(format_score(3), "+3");
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(-2), "-2");
    }

    #[test]
    fn test_format_report_total_only() {
        let output = format_report(&sample_report(), false, false);
        assert_eq!(output, "Total score: +3");
    }

    #[test]
    fn test_format_report_breakdown() {
        let output = format_report(&sample_report(), true, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  january     +3  missed: -");
        assert_eq!(lines[2], "  february     0  missed: cable");
    }

    #[test]
    fn test_format_report_json() {
        let json = format_report_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["months"][0]["paid"][2], "cable");
    }

    #[test]
    fn test_format_simple_text() {
        let output = format_simple(12, 5, OutputFormat::Text, false).unwrap();
        assert_eq!(output, "Score: +12 (5 events)");
    }

    #[test]
    fn test_format_standing_text() {
        let output =
            format_standing(&Consumer::new(-100.0), OutputFormat::Text, false).unwrap();
        assert_eq!(output, "Balance -100.00: not in good standing");
    }

    #[test]
    fn test_format_standing_json() {
        let output = format_standing(&Consumer::new(0.0), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["good_standing"], true);
    }

    #[test]
    fn test_color_mode_never() {
        assert!(!should_use_colors(ColorMode::Never));
        assert!(should_use_colors(ColorMode::Always));
    }
}
