use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use sheetlink_map::{AssignmentSource, MappingSession};
use sheetlink_model::{FileUploadStatus, RequiredColumn, Spreadsheet};

use crate::types::{DetectOutcome, StatusReport};

pub fn print_status(report: &StatusReport) {
    if let Some(email) = &report.session.user_record.email {
        println!("Account: {email}");
    }
    if let (Some(sheet_id), Some(title)) = (
        &report.session.user_record.sheet_id,
        &report.session.user_record.worksheet_title,
    ) {
        println!("Sheet: {sheet_id} ({title})");
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Status")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for step in &report.steps {
        let label = format!("{}. {}", step.ordinal, step.label);
        let label_cell = if step.active {
            Cell::new(label).fg(Color::Blue).add_attribute(Attribute::Bold)
        } else if step.completed {
            Cell::new(label)
        } else {
            dim_cell(label)
        };
        table.add_row(vec![label_cell, step_status_cell(step.completed, step.active)]);
    }
    println!("{table}");
    if report.steps.iter().all(|step| step.completed) {
        println!("Setup complete.");
    } else if let Some(step) = report
        .steps
        .iter()
        .find(|step| step.ordinal == report.current_ordinal)
    {
        println!("Next: step {} of {} ({})", step.ordinal, report.steps.len(), step.label);
    }
}

pub fn print_detect(outcome: &DetectOutcome, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in RequiredColumn::ALL {
        match outcome.result.score_for(column) {
            Some(score) => table.add_row(vec![
                Cell::new(column.label()),
                Cell::new(outcome.result.mapping.get(column)),
                score_cell(score),
            ]),
            None => table.add_row(vec![Cell::new(column.label()), dim_cell("-"), dim_cell("-")]),
        };
    }
    println!("{table}");
    println!(
        "Matched {} of {} columns across {} headers.",
        outcome.result.matched_count(),
        RequiredColumn::ALL.len(),
        outcome.headers.len()
    );
    if !outcome.result.unmatched_headers.is_empty() {
        println!("Unmatched headers: {}", outcome.result.unmatched_headers.join(", "));
    }
    if let Some(path) = &outcome.draft_path {
        println!("Draft saved: {}", path.display());
    }
    Ok(())
}

/// Render the mapping review table. `review_ordinal` is the fractional step
/// number when the review runs inside the setup flow.
pub fn print_mapping_review(session: &MappingSession, review_ordinal: Option<f32>) {
    match review_ordinal {
        Some(ordinal) => println!("Step {ordinal}: review column mapping"),
        None => println!("Review column mapping"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    for column in RequiredColumn::ALL {
        let header = session.mapping().get(column);
        let value_cell = if header.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(header)
        };
        table.add_row(vec![
            Cell::new(column.label()),
            value_cell,
            source_cell(session.source(column)),
        ]);
    }
    println!("{table}");
    let counts = session.summary();
    println!(
        "Assigned {} of {} ({} detected, {} manual, {} saved).",
        counts.assigned(),
        RequiredColumn::ALL.len(),
        counts.detected,
        counts.manual,
        counts.saved
    );
    let duplicates = session.mapping().duplicate_headers();
    if !duplicates.is_empty() {
        println!("Headers claimed by more than one column: {}", duplicates.join(", "));
    }
}

pub fn print_spreadsheets(spreadsheets: &[Spreadsheet]) {
    if spreadsheets.is_empty() {
        println!("No spreadsheets visible to the linked account.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Spreadsheet ID"), header_cell("Name")]);
    apply_table_style(&mut table);
    for spreadsheet in spreadsheets {
        table.add_row(vec![spreadsheet.id.clone(), spreadsheet.name.clone()]);
    }
    println!("{table}");
    println!("Pick one and rerun with --spreadsheet <ID>.");
}

pub fn print_upload_status(status: &FileUploadStatus) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Uploaded")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    table.add_row(vec![Cell::new("Purchases"), check_cell(status.has_purchases)]);
    table.add_row(vec![Cell::new("Inventory"), check_cell(status.has_inventory)]);
    println!("{table}");
    if status.files_complete {
        println!("File uploads complete.");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn step_status_cell(completed: bool, active: bool) -> Cell {
    if completed {
        Cell::new("✓ done")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else if active {
        Cell::new("current")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("pending")
    }
}

fn check_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn score_cell(score: f64) -> Cell {
    if score >= 100.0 {
        Cell::new(format!("{score:.1}")).fg(Color::Green)
    } else {
        Cell::new(format!("{score:.1}"))
    }
}

fn source_cell(source: Option<AssignmentSource>) -> Cell {
    match source {
        Some(AssignmentSource::Detected { score }) => Cell::new(format!("detected ({score:.1})")),
        Some(AssignmentSource::Manual) => Cell::new("manual").fg(Color::Cyan),
        Some(AssignmentSource::Saved) => Cell::new("saved").fg(Color::Blue),
        None => Cell::new("missing").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
