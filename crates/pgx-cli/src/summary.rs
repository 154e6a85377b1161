use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use pgx_model::{ClassificationOutcome, Phenotype};
use pgx_report::ReportArtifacts;
use pgx_standards::{ReferenceIssue, VerifySummary};

pub fn print_outcome(outcome: &ClassificationOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Gen"),
        header_cell("Diplotipo"),
        header_cell("Fenotipo"),
        header_cell("Fármaco de interés"),
        header_cell("Recomendación"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for row in &outcome.summary {
        table.add_row(vec![
            Cell::new(row.gene)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.diplotype),
            phenotype_cell(&row.phenotype, row.category),
            Cell::new(&row.drug_of_interest),
            Cell::new(&row.recommendation),
        ]);
    }
    println!("{table}");
    if !outcome.polymorphisms.is_empty() {
        println!("Polimorfismos: {}", outcome.polymorphisms);
    }
    for result in &outcome.results {
        if result.dropped_occurrences > 0 {
            eprintln!(
                "warning: {} variant occurrence(s) beyond the first two ignored for {}",
                result.dropped_occurrences, result.gene
            );
        }
    }
}

pub fn print_report_result(outcome: &ClassificationOutcome, artifacts: &ReportArtifacts) {
    print_outcome(outcome);
    if let Some(path) = &artifacts.json {
        println!("JSON report: {}", path.display());
    }
    if let Some(path) = &artifacts.xml {
        println!("Results table XML: {}", path.display());
    }
}

pub fn print_reference_summary(summary: &VerifySummary, issues: &[ReferenceIssue]) {
    println!("Reference: {}", summary.reference_dir.display());
    println!(
        "Panel: {}  Guidelines: {}",
        summary.manifest_pins.panel, summary.manifest_pins.guidelines
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (gene, count) in &summary.markers_by_gene {
        table.add_row(vec![Cell::new(format!("{gene} markers")), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("CYP2D6 stars"),
        Cell::new(summary.cyp2d6_star_count),
    ]);
    table.add_row(vec![
        Cell::new("CYP2D6 phenotypes"),
        Cell::new(summary.cyp2d6_phenotype_count),
    ]);
    table.add_row(vec![
        Cell::new("Recommendations"),
        Cell::new(summary.recommendation_count),
    ]);
    println!("{table}");
    print_issue_table(issues);
    println!("{} files verified", summary.file_count);
}

fn print_issue_table(issues: &[ReferenceIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Table"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(&issue.kind).fg(Color::Yellow),
            dim_cell(&issue.role),
            Cell::new(&issue.detail),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Percentage(35)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn phenotype_cell(label: &str, category: Phenotype) -> Cell {
    match category {
        Phenotype::Poor => Cell::new(label)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Phenotype::Intermediate | Phenotype::Ultrarapid => Cell::new(label).fg(Color::Yellow),
        Phenotype::Normal => Cell::new(label).fg(Color::Green),
        Phenotype::Indeterminate => dim_cell(label),
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
