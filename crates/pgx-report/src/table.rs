//! WordprocessingML fragment for the results table.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use pgx_model::SummaryRow;

use crate::layout::{PageGeometry, RiskLevel, cm_to_twips, fit_column_widths, soft_breaks};

/// WordprocessingML main namespace.
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub const HEADERS: [&str; 4] = [
    "Gen",
    "Fenotipo",
    "Fármaco de interés",
    "Recomendación terapéutica",
];

pub const HEADER_FILL: &str = "DDDDDD";

/// Run sizes in half-points.
const HEADER_SIZE: &str = "20";
const BODY_SIZE: &str = "19";
const RECOMMENDATION_SIZE: &str = "18";

struct Cell<'a> {
    text: &'a str,
    width: u32,
    fill: Option<&'a str>,
    size: &'a str,
}

fn write_empty<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attr in attrs {
        element.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_cell<W: Write>(writer: &mut Writer<W>, cell: &Cell<'_>) -> Result<()> {
    let width = cell.width.to_string();
    writer.write_event(Event::Start(BytesStart::new("w:tc")))?;

    writer.write_event(Event::Start(BytesStart::new("w:tcPr")))?;
    write_empty(writer, "w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
    if let Some(fill) = cell.fill {
        write_empty(
            writer,
            "w:shd",
            &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill)],
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tcPr")))?;

    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    write_empty(writer, "w:sz", &[("w:val", cell.size)])?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    for (idx, line) in cell.text.split('\n').enumerate() {
        if idx > 0 {
            write_empty(writer, "w:br", &[])?;
        }
        let mut text = BytesStart::new("w:t");
        text.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(text))?;
        writer.write_event(Event::Text(BytesText::new(line)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;

    writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
    Ok(())
}

/// Writes the results table as a `<w:tbl>` element.
///
/// Columns use fixed widths fitted to `page`; phenotype and recommendation
/// cells are shaded by risk, and the drug and recommendation texts get soft
/// line breaks.
pub fn write_results_table<W: Write>(
    writer: &mut Writer<W>,
    rows: &[SummaryRow],
    page: &PageGeometry,
) -> Result<()> {
    let widths = fit_column_widths(page).map(cm_to_twips);
    let total = widths.iter().sum::<u32>().to_string();

    let mut table = BytesStart::new("w:tbl");
    table.push_attribute(("xmlns:w", WORDML_NS));
    writer.write_event(Event::Start(table))?;

    writer.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
    write_empty(writer, "w:tblStyle", &[("w:val", "TableGrid")])?;
    write_empty(writer, "w:tblW", &[("w:w", total.as_str()), ("w:type", "dxa")])?;
    write_empty(writer, "w:tblLayout", &[("w:type", "fixed")])?;
    writer.write_event(Event::End(BytesEnd::new("w:tblPr")))?;

    writer.write_event(Event::Start(BytesStart::new("w:tblGrid")))?;
    for width in widths {
        let width = width.to_string();
        write_empty(writer, "w:gridCol", &[("w:w", width.as_str())])?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tblGrid")))?;

    writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
    for (header, width) in HEADERS.iter().zip(widths) {
        write_cell(
            writer,
            &Cell {
                text: header,
                width,
                fill: Some(HEADER_FILL),
                size: HEADER_SIZE,
            },
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tr")))?;

    for row in rows {
        let fill = RiskLevel::from(row.category).fill();
        let gene = format!("{}\n{}", row.gene, row.diplotype);
        let drug = soft_breaks(&row.drug_of_interest);
        let recommendation = soft_breaks(&row.recommendation);
        let cells = [
            Cell {
                text: &gene,
                width: widths[0],
                fill: None,
                size: BODY_SIZE,
            },
            Cell {
                text: &row.phenotype,
                width: widths[1],
                fill: Some(fill),
                size: BODY_SIZE,
            },
            Cell {
                text: &drug,
                width: widths[2],
                fill: None,
                size: BODY_SIZE,
            },
            Cell {
                text: &recommendation,
                width: widths[3],
                fill: Some(fill),
                size: RECOMMENDATION_SIZE,
            },
        ];
        writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
        for cell in &cells {
            write_cell(writer, cell)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
    Ok(())
}

/// Renders the results table fragment to a string.
pub fn results_table_xml(rows: &[SummaryRow], page: &PageGeometry) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_results_table(&mut writer, rows, page)?;
    String::from_utf8(writer.into_inner()).context("results table is not valid UTF-8")
}
