use std::str::FromStr;

use chrono::Weekday;
use unicode_width::UnicodeWidthStr;

use crate::error::{LabelError, Result};
use crate::labeler::Observation;
use crate::weekday::WeekdayName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(LabelError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[tracing::instrument(skip(self, obs), fields(format = ?self.format))]
    pub fn render(&self, obs: &Observation) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!("{}\n", obs.label)),
            OutputFormat::Html => Ok(format!(
                "<span class=\"weekday\" lang=\"fa\" dir=\"rtl\">{}</span>\n",
                escape_html(obs.label)
            )),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(obs)?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    /// The full weekday table, one row per day starting on Saturday.
    pub fn render_table(&self) -> String {
        let headers = ["Index", "Name", "Label"];
        let rows: Vec<[String; 3]> = WeekdayName::ALL
            .iter()
            .map(|name| {
                [
                    Weekday::from(*name).num_days_from_sunday().to_string(),
                    name.as_str().to_string(),
                    name.label().to_string(),
                ]
            })
            .collect();

        let mut widths = headers.map(|header| UnicodeWidthStr::width(header));
        for row in &rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let mut out = String::new();
        write_row(&mut out, &headers.map(str::to_string), &widths);
        for (idx, width) in widths.iter().enumerate() {
            let sep = if idx + 1 == widths.len() { "\n" } else { " " };
            out.push_str(&"-".repeat(*width));
            out.push_str(sep);
        }
        for row in &rows {
            write_row(&mut out, row, &widths);
        }
        out
    }
}

fn write_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    for (idx, cell) in cells.iter().enumerate() {
        if idx + 1 == cells.len() {
            out.push_str(cell);
            out.push('\n');
        } else {
            let padding = widths[idx].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            out.push_str(cell);
            out.push_str(&" ".repeat(padding + 1));
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
