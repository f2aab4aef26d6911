//! Local input handling: header rows from CSV files and manual mapping
//! arguments.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use sheetlink_model::RequiredColumn;

/// Read the header row from the first record of a CSV file.
pub fn read_headers_from_path(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_headers(BufReader::new(file)).with_context(|| format!("read headers from {}", path.display()))
}

/// Read the header row from CSV data. Spreadsheet exports often lead with
/// a UTF-8 BOM; it is stripped from the first field.
pub fn read_headers<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();
    let Some(first) = records.next() else {
        return Ok(Vec::new());
    };
    let record = first.context("read header row")?;
    Ok(record
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let field = if index == 0 { strip_bom(field) } else { field };
            field.trim().to_string()
        })
        .collect())
}

fn strip_bom(value: &str) -> &str {
    value.strip_prefix('\u{feff}').unwrap_or(value)
}

/// Parse one `--map COLUMN=HEADER` argument. The column must be a required
/// column's exact label.
pub fn parse_assignment(raw: &str) -> Result<(RequiredColumn, String)> {
    let Some((column, header)) = raw.split_once('=') else {
        bail!("invalid mapping '{raw}', expected COLUMN=HEADER");
    };
    let column: RequiredColumn = column
        .trim()
        .parse()
        .with_context(|| format!("in mapping '{raw}'"))?;
    let header = header.trim();
    if header.is_empty() {
        bail!("empty header in mapping '{raw}'");
    }
    Ok((column, header.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped_from_first_field_only() {
        let data = "\u{feff}Date,Sale Price\n2024-01-01,9.99\n";
        let headers = read_headers(data.as_bytes()).unwrap();
        assert_eq!(headers, vec!["Date".to_string(), "Sale Price".to_string()]);
    }

    #[test]
    fn assignment_requires_known_column_label() {
        let (column, header) = parse_assignment("Sale Price=Unit Price").unwrap();
        assert_eq!(column, RequiredColumn::SalePrice);
        assert_eq!(header, "Unit Price");

        assert!(parse_assignment("Price=Unit Price").is_err());
        assert!(parse_assignment("Sale Price").is_err());
        assert!(parse_assignment("Sale Price=  ").is_err());
    }
}
