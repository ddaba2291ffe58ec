use std::fmt::Write as _;
use std::io;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::error::StimmungError;
use crate::pipeline::Analysis;
use crate::record::{AnalyzedRecord, SentimentCounts};

/// Column names of exported records.
pub const RECORD_HEADER: [&str; 5] = [
    "Headline",
    "Translated",
    "Sentiment",
    "Polarity",
    "Subjectivity",
];

/// How an analysis is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Csv,
}

impl FromStr for Format {
    type Err = StimmungError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            _ => Err(StimmungError::UnknownFormat(s.to_string())),
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::Table
    }
}

/// Writes the analysis in `format`.
pub fn export(analysis: &Analysis, format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(render(analysis)),
        Format::Json => to_json(&analysis.records),
        Format::Csv => to_csv(&analysis.records),
    }
}

/// The records as a pretty printed json array.
pub fn to_json(records: &[AnalyzedRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize records as json.")
}

pub fn from_json(json: &str) -> Result<Vec<AnalyzedRecord>> {
    serde_json::from_str(json).context("Failed to read records from json.")
}

/// Writes the header row and one row per record.
pub fn write_csv<W: io::Write>(writer: W, records: &[AnalyzedRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(RECORD_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv(records: &[AnalyzedRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).context("Csv output is not valid utf-8.")
}

/// Renders rows as left aligned columns, numbers aligned right.
fn table(header: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let mut out = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            let pad = " ".repeat(widths[i] - cell.chars().count());
            if numeric.contains(&i) {
                out.push_str(&pad);
                out.push_str(cell);
            } else {
                out.push_str(cell);
                out.push_str(&pad);
            }
        }
        out.trim_end().to_string()
    };

    let mut out = line(header.to_vec());
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn sentiment_table(counts: &SentimentCounts) -> String {
    let rows: Vec<_> = counts
        .iter()
        .map(|(label, count)| vec![label.to_string(), count.to_string()])
        .collect();
    table(&["Sentiment", "Count"], &rows, &[1])
}

pub fn keyword_table(top: &[(&str, usize)]) -> String {
    let rows: Vec<_> = top
        .iter()
        .map(|(word, count)| vec![word.to_string(), count.to_string()])
        .collect();
    table(&["Keyword", "Count"], &rows, &[1])
}

pub fn record_table(records: &[AnalyzedRecord]) -> String {
    let rows: Vec<_> = records
        .iter()
        .map(|r| {
            vec![
                r.headline.clone(),
                r.translated.clone(),
                r.sentiment.to_string(),
                format!("{:.3}", r.polarity),
                format!("{:.3}", r.subjectivity),
            ]
        })
        .collect();
    table(&RECORD_HEADER, &rows, &[3, 4])
}

/// Human readable report of a whole analysis.
pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Last updated: {}",
        analysis.finished_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(query) = &analysis.query {
        let _ = writeln!(out, "Query: {}", query);
    }
    if let Some(diagnostic) = &analysis.diagnostic {
        let _ = writeln!(out, "Warning: {}", diagnostic);
    }
    if analysis.cancelled {
        let _ = writeln!(out, "Warning: analysis was cancelled, results are partial");
    }

    let _ = writeln!(out, "\nSentiment Distribution\n{}", sentiment_table(&analysis.counts));

    let top = analysis.top_keywords();
    if top.is_empty() {
        let _ = writeln!(out, "No headlines available to extract keywords.\n");
    } else {
        let _ = writeln!(out, "Top Keywords\n{}", keyword_table(&top));
    }

    if !analysis.entities.is_empty() {
        let _ = writeln!(out, "Named Entities");
        for found in &analysis.entities {
            if found.entities.is_empty() {
                continue;
            }
            let names: Vec<_> = found
                .entities
                .iter()
                .map(|e| format!("{} ({})", e.text, e.label))
                .collect();
            let _ = writeln!(
                out,
                "{}: {}",
                analysis.records[found.record].headline,
                names.join(", ")
            );
        }
        out.push('\n');
    }

    let _ = write!(out, "Analyzed Headlines\n{}", record_table(&analysis.records));
    out
}
