//! Terminal summaries for completed jobs and previews.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use massage_core::JobReport;

pub fn print_summary(report: &JobReport) {
    println!("Input: {}", report.input.display());
    match &report.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("{}", summary_table(report));
}

pub fn summary_table(report: &JobReport) -> Table {
    let stats = &report.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Suffixes stripped"),
        header_cell("Values changed"),
        header_cell("Unchanged"),
        header_cell("Elapsed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(stats.rows).add_attribute(Attribute::Bold),
        count_cell(stats.suffixes_stripped, Color::Green),
        count_cell(stats.changed, Color::Cyan),
        count_cell(stats.rows - stats.changed, Color::Yellow),
        Cell::new(format!("{:.2?}", report.elapsed)),
    ]);
    table
}

pub fn preview_table(values: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Normalized")]);
    apply_table_style(&mut table);
    for value in values {
        let normalized = massage_core::normalize_county(value);
        let normalized_cell = if normalized == *value {
            dim_cell(&normalized)
        } else {
            Cell::new(&normalized).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(format!("{value:?}")), normalized_cell]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
