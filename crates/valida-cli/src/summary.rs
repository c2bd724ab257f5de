//! Terminal summary tables.

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use valida_rules::LoadedRules;

use crate::commands::CheckOutcome;

pub fn print_summary(outcome: &CheckOutcome) {
    let results = &outcome.results;
    println!("Dataset: {}", outcome.dataset.display());
    println!("Salida / Output: {}", outcome.output_dir.display());
    println!(
        "Resultados / Results: {}",
        outcome.results_json.display()
    );
    for path in &outcome.report_paths {
        println!("Informe / Report: {}", path.display());
    }
    for path in &outcome.chart_paths {
        println!("Gráfico / Chart: {}", path.display());
    }
    println!(
        "Total de registros / Total records: {}",
        results.total_records
    );
    if !results.missing_columns.is_empty() {
        println!(
            "Columnas faltantes / Missing columns: {}",
            results.missing_columns.join(", ")
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Columna / Column"),
        header_cell("Tipo / Type"),
        header_cell("Nulos / Nulls"),
        header_cell("Duplicados / Duplicates"),
        header_cell("Fuera de rango / Out of range"),
        header_cell("Fuera de fecha / Out of date"),
    ]);
    apply_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (column, detected) in &results.detected_types {
        let nulls = results.null_counts.get(column).copied();
        table.add_row(vec![
            Cell::new(column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(detected.as_str()),
            count_cell(nulls, Color::Yellow),
            count_cell(results.duplicates.get(column).copied(), Color::Red),
            count_cell(results.out_of_range.get(column).copied(), Color::Red),
            count_cell(results.out_of_date_range.get(column).copied(), Color::Red),
        ]);
    }
    println!("{table}");

    print_skipped(&results.skipped_rules);
}

pub fn print_rules(path: &Path, loaded: &LoadedRules) {
    let document = &loaded.document;
    println!("Documento de reglas / Rule document: {}", path.display());
    println!("Reglas / Rules: {}", document.rule_count());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sección / Section"),
        header_cell("Columna / Column"),
        header_cell("Detalle / Detail"),
    ]);
    apply_table_style(&mut table);
    for column in &document.required_columns {
        table.add_row(vec![
            Cell::new("columnas_obligatorias"),
            Cell::new(column),
            Cell::new("obligatoria / required"),
        ]);
    }
    for column in &document.unique_columns {
        table.add_row(vec![
            Cell::new("unicidad"),
            Cell::new(column),
            Cell::new("sin duplicados / no duplicates"),
        ]);
    }
    for (column, bounds) in &document.numeric_ranges {
        table.add_row(vec![
            Cell::new("rangos"),
            Cell::new(column),
            Cell::new(format!("[{}, {}]", bounds.min, bounds.max)),
        ]);
    }
    for (column, bounds) in &document.date_ranges {
        table.add_row(vec![
            Cell::new("fechas_validas"),
            Cell::new(column),
            Cell::new(format!("[{}, {}]", bounds.min, bounds.max)),
        ]);
    }
    println!("{table}");

    print_skipped(&loaded.skipped);
}

fn print_skipped(skipped: &[valida_model::SkippedRule]) {
    if skipped.is_empty() {
        return;
    }
    println!();
    println!("Reglas omitidas / Skipped rules:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sección / Section"),
        header_cell("Columna / Column"),
        header_cell("Motivo / Reason"),
    ]);
    apply_table_style(&mut table);
    for entry in skipped {
        table.add_row(vec![
            Cell::new(entry.section.wire_key()).fg(Color::Yellow),
            Cell::new(&entry.column),
            Cell::new(&entry.reason),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: Option<u64>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
