use serde::{Deserialize, Serialize};

use crate::output::{ColorMode, OutputFormat};

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// format: text
/// color: auto
/// show_breakdown: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default output format when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub color: ColorMode,

    /// Print the per-month breakdown under the total in text output
    #[serde(default = "default_show_breakdown")]
    pub show_breakdown: bool,
}

fn default_show_breakdown() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            show_breakdown: default_show_breakdown(),
        }
    }
}
