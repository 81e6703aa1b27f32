// src/report/mod.rs

// --- Imports ---
use crate::extractors::aggregate;
use crate::extractors::numbers::{BaseNumber, DocumentNumbers, NumberRecord};
use crate::utils::error::AppError;
use serde::Serialize;

/// Formats a value with grouping commas and two decimals, e.g.
/// `1234567.891` -> `"1,234,567.89"`.
fn comma_grouped(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (number, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{fraction}")
}

// --- ASCII Table Rendering ---
fn horizontal_rule(widths: &[usize]) -> String {
    let mut rule = String::from("+");
    for width in widths {
        rule.push_str(&"-".repeat(width + 2));
        rule.push('+');
    }
    rule
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let mut row = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        row.push_str(&format!(" {cell:<w$} |", w = *width));
    }
    row
}

/// Renders a bordered table. Every row must have one cell per header.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.len());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule = horizontal_rule(&widths);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&table_row(&header_cells, &widths));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        out.push_str(&table_row(row, &widths));
        out.push('\n');
    }
    out.push_str(&rule);
    out
}

fn render_base_table(rows: &[BaseNumber]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|n| vec![comma_grouped(n.value), n.page.to_string()])
        .collect();
    render_table(&["Number", "Page"], &cells)
}

fn render_contextual_table(rows: &[NumberRecord]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.page.to_string(),
                comma_grouped(r.original),
                comma_grouped(r.scaled),
                r.scale_word.clone().unwrap_or_else(|| "N/A".to_string()),
                r.position.to_string(),
            ]
        })
        .collect();
    render_table(
        &["Page", "Original", "Scaled", "Scale Word", "Position"],
        &cells,
    )
}

// --- Report Output ---
/// Prints the largest-value summary and the top-N tables for both scans.
pub fn print_report(numbers: &DocumentNumbers, top: usize) {
    match aggregate::largest_base(&numbers.base) {
        Some(largest) => {
            println!(
                "The largest number found (base scan): {}",
                comma_grouped(largest.value)
            );
            println!("Found on page: {}", largest.page);
        }
        None => println!("No numbers found using the base scan."),
    }

    match aggregate::largest_contextual(&numbers.contextual) {
        Some(largest) => {
            println!(
                "The largest number found (contextual scan): {}",
                comma_grouped(largest.scaled)
            );
            println!("Original value: {}", comma_grouped(largest.original));
            println!("Found on page: {}", largest.page);
        }
        None => println!("No numbers found using the contextual scan."),
    }

    println!("\nBase results (top {top} largest numbers):");
    println!("{}", render_base_table(&aggregate::top_base(&numbers.base, top)));

    println!("\nContextual results (top {top} largest numbers):");
    println!(
        "{}",
        render_contextual_table(&aggregate::top_contextual(&numbers.contextual, top))
    );
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    largest_base: Option<&'a BaseNumber>,
    largest_contextual: Option<&'a NumberRecord>,
    top_base: Vec<BaseNumber>,
    top_contextual: Vec<NumberRecord>,
}

/// Renders the same artifacts as [`print_report`] as pretty-printed JSON.
pub fn render_json(numbers: &DocumentNumbers, top: usize) -> Result<String, AppError> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        largest_base: aggregate::largest_base(&numbers.base),
        largest_contextual: aggregate::largest_contextual(&numbers.contextual),
        top_base: aggregate::top_base(&numbers.base, top),
        top_contextual: aggregate::top_contextual(&numbers.contextual, top),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::numbers::PageResults;

    #[test]
    fn comma_grouping_matches_display_convention() {
        assert_eq!(comma_grouped(1_234_567.891), "1,234,567.89");
        assert_eq!(comma_grouped(100.0), "100.00");
        assert_eq!(comma_grouped(-1_234.5), "-1,234.50");
        assert_eq!(comma_grouped(5e9), "5,000,000,000.00");
    }

    #[test]
    fn tables_align_columns_and_carry_borders() {
        let rows = vec![BaseNumber { value: 999.99, page: 1 }, BaseNumber { value: 7.0, page: 12 }];
        let table = render_base_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("+-"));
        assert!(lines[1].contains("| Number"));
        assert!(lines[3].contains("| 999.99"));
        // All lines share the same width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn contextual_table_shows_na_for_missing_scale_word() {
        let rows = vec![NumberRecord {
            original: 100.0,
            scaled: 1.0e8,
            scale_word: None,
            position: 19,
            page: 2,
        }];
        let table = render_contextual_table(&rows);
        assert!(table.contains("N/A"));
        assert!(table.contains("100,000,000.00"));
    }

    #[test]
    fn json_report_carries_both_interpretations() {
        let mut contextual = PageResults::new();
        contextual.insert(
            2,
            vec![NumberRecord {
                original: 5.0,
                scaled: 5.0e9,
                scale_word: Some("billion".to_string()),
                position: 0,
                page: 2,
            }],
        );
        let numbers = DocumentNumbers {
            base: vec![BaseNumber { value: 999.99, page: 1 }],
            contextual,
        };

        let rendered = render_json(&numbers, 10).expect("serializable report");
        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("valid JSON output");

        assert_eq!(value["largest_base"]["value"], 999.99);
        assert_eq!(value["largest_contextual"]["scale_word"], "billion");
        assert_eq!(value["top_base"].as_array().map(|a| a.len()), Some(1));
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn empty_document_report_has_no_result_rows() {
        let numbers = DocumentNumbers::default();
        let rendered = render_json(&numbers, 10).expect("serializable report");
        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("valid JSON output");

        assert!(value["largest_base"].is_null());
        assert!(value["largest_contextual"].is_null());
        assert_eq!(value["top_contextual"].as_array().map(|a| a.len()), Some(0));
    }
}
