//! Text/JSON/YAML rendering of position sets.

use std::fmt::Write as _;

use rackmap_core::{aisle_headers, bounds, LayoutConfig, Position};

use crate::error::ToolError;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a laid-out position set.
pub fn export(
    positions: &[Position],
    layout: &LayoutConfig,
    format: OutputFormat,
) -> Result<String, ToolError> {
    match format {
        OutputFormat::Text => Ok(render_text(positions, layout)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(positions)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(positions)?),
    }
}

/// One line per position, `*` marks highlighted ones.
fn render_text(positions: &[Position], layout: &LayoutConfig) -> String {
    let aisles: Vec<String> = aisle_headers(positions, layout)
        .into_iter()
        .map(|h| h.aisle)
        .collect();
    let canvas = bounds(positions, layout);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {} positions in {} aisles [{}], canvas {}x{}",
        positions.len(),
        aisles.len(),
        aisles.join(" "),
        canvas.width,
        canvas.height
    );

    for pos in positions {
        let mark = if pos.highlighted { '*' } else { ' ' };
        let floors: Vec<String> = pos
            .floors
            .iter()
            .map(|f| format!("{}:{}", f.level, f.product().unwrap_or_else(|| "-".to_string())))
            .collect();
        let _ = writeln!(
            out,
            "{}{:<8} x={:<5} y={:<5} {}",
            mark,
            pos.label,
            pos.x,
            pos.y,
            floors.join("  ")
        );
    }

    out
}
