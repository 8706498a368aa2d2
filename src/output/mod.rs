pub mod formatter;

pub use formatter::{
    format_report, format_report_json, format_score, format_simple, format_standing,
    should_use_colors, ColorMode, OutputFormat,
};
