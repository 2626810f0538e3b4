use anyhow::{anyhow, Result};
use library_lib::ApiResponse;
use serde_json::Value;
use tabled::builder::Builder;

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Xml,
}

impl OutputFormat {
    /// Unknown names fall back to JSON.
    pub fn parse(name: &str) -> Self {
        match name {
            "table" => OutputFormat::Table,
            "csv" => OutputFormat::Csv,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Json,
        }
    }
}

/// Status and headers go to stderr, the body to stdout. Error bodies are
/// always printed as JSON.
pub fn print_response(response: &ApiResponse, format: &OutputFormat) -> Result<()> {
    eprintln!("{}", response.status);
    for (name, value) in &response.headers {
        eprintln!("{}: {}", name, value);
    }

    let Some(body) = &response.body else {
        return Ok(());
    };
    if !response.status.is_success() {
        eprintln!("{}", serde_json::to_string_pretty(body)?);
        return Ok(());
    }
    println!("{}", render(body, format)?);
    Ok(())
}

pub fn render(body: &Value, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(body)?),
        OutputFormat::Table => Ok(render_table(body)),
        OutputFormat::Csv => render_csv(body),
        OutputFormat::Xml => Ok(xml_output::to_xml(body)?),
    }
}

// -- Row builders --

/// Records carried by an envelope: the items of a list or of a linked
/// collection's `value`, or the single resource itself.
fn records(body: &Value) -> Vec<&Value> {
    match body {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("value") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![body],
        },
        _ => Vec::new(),
    }
}

/// Column names in first-seen order across all records.
fn columns(records: &[&Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

/// Flattens a value into a cell. Link lists collapse to their relation names.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item.get("rel").and_then(Value::as_str) {
                Some(rel) => rel.to_string(),
                None => cell(Some(item)),
            })
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
    }
}

fn build_rows(body: &Value) -> (Vec<String>, Vec<Vec<String>>) {
    let records = records(body);
    let columns = columns(&records);
    let rows = records
        .iter()
        .map(|record| columns.iter().map(|c| cell(record.get(c))).collect())
        .collect();
    (columns, rows)
}

// -- Table output --

fn render_table(body: &Value) -> String {
    let (columns, rows) = build_rows(body);
    let mut builder = Builder::default();
    builder.push_record(columns);
    for row in rows {
        builder.push_record(row);
    }
    builder.build().to_string()
}

// -- CSV output --

fn render_csv(body: &Value) -> Result<String> {
    let (columns, rows) = build_rows(body);
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if !columns.is_empty() {
        wtr.write_record(&columns)?;
        for row in rows {
            wtr.write_record(&row)?;
        }
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("flushing csv output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
