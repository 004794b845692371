use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use provenance::api::LabelReport;
use provenance::model::PropertyModel;
use provenance::scorer::{CheckedMap, Evaluation};

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_labels(labels: &[LabelReport]) {
    println!("\nLabels ({})", labels.len());
    let mut table = new_table(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Color"),
    ]);

    for l in labels {
        table.add_row(vec![
            Cell::new(l.label_index).set_alignment(CellAlignment::Right),
            Cell::new(&l.label),
            Cell::new(l.color.to_string()),
        ]);
    }
    println!("{}", table);
}

pub fn print_properties(model: &PropertyModel) {
    println!("\nProperties ({})", model.len());
    let mut table = new_table(vec![
        Cell::new("Property").add_attribute(Attribute::Bold),
        Cell::new("Min"),
        Cell::new("Max"),
        Cell::new("Avg"),
        Cell::new("Values"),
        Cell::new("Labels"),
    ]);
    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for item in model.properties.values() {
        let name = if item.is_degenerate() {
            Cell::new(format!("{} (degenerate)", item.property)).fg(Color::DarkGrey)
        } else {
            Cell::new(&item.property)
        };
        table.add_row(vec![
            name,
            Cell::new(format!("{:.2}", item.minimum)),
            Cell::new(format!("{:.2}", item.maximum)),
            Cell::new(format!("{:.2}", item.average())),
            Cell::new(item.count),
            Cell::new(item.labels.len()),
        ]);
    }
    println!("{}", table);
}

pub fn print_classification(evaluation: &Evaluation) {
    let c = &evaluation.classification;
    if c.is_empty() {
        println!("\nNo property of the sample matched the loaded data.");
        return;
    }

    println!("\nResult: {}", c.result);
    let mut table = new_table(vec![
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Rate"),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for share in &evaluation.ranking {
        table.add_row(vec![
            Cell::new(&share.label),
            Cell::new(format!("{:.6}", share.rate)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}%", share.percent)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);

    println!("\nBy month:");
    for line in c.string.lines() {
        println!("  {}", line);
    }
}

pub fn print_checked(checked: &CheckedMap) {
    if checked.is_empty() {
        return;
    }
    let mut table = new_table(vec![
        Cell::new("Property").add_attribute(Attribute::Bold),
        Cell::new("Month"),
        Cell::new("Value"),
        Cell::new("Range"),
    ]);
    for (property, months) in checked {
        for m in months {
            table.add_row(vec![
                Cell::new(property),
                Cell::new(&m.month),
                Cell::new(m.value).set_alignment(CellAlignment::Right),
                Cell::new(format!("{} .. {}", m.minimum, m.maximum)),
            ]);
        }
    }
    println!("{}", table);
}
