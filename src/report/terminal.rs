use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::Classification;
use crate::outdated::UpdateKind;
use crate::view::{Summary, TableFilter, TableRow};

/// Banner, summary box and the header line shared by both terminal views.
pub fn render_header(source: &str, summary: &Summary, quiet: bool) {
    if quiet {
        println!("{}", summary_line(summary));
        return;
    }

    println!("\n {} v{}", "pkglens".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Uploaded: {}\n", source);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<49} │", "SUMMARY".bold());
    println!(" │  {:<49} │", format!("Total packages     : {:>5}", summary.total));
    println!(" │  {:<49} │", format!("Dependencies       : {:>5}", summary.production));
    println!(" │  {:<49} │", format!("Dev dependencies   : {:>5}", summary.development));
    println!(" │  {:<49} │", format!("Nested dependencies: {:>5}", summary.nested));
    println!(" │  {:<49} │", format!("Outdated           : {:>5}", summary.outdated));
    println!(" └────────────────────────────────────────────────────┘\n");
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Total: {}  Dependencies: {}  Dev: {}  Nested: {}  Outdated: {}",
        summary.total,
        summary.production,
        summary.development,
        summary.nested,
        if summary.outdated > 0 {
            summary.outdated.to_string().red().to_string()
        } else {
            summary.outdated.to_string().green().to_string()
        },
    )
}

/// Render the package table for the chosen filter.
pub fn render(rows: &[TableRow], filter: TableFilter) {
    let title = match filter {
        TableFilter::All => "All packages",
        TableFilter::Production => "Dependencies",
        TableFilter::Development => "Dev dependencies",
    };
    println!(" {} {}:\n", "[TABLE]".cyan().bold(), title);

    if rows.is_empty() {
        println!(" No packages to show.\n");
        return;
    }

    println!("{}\n", build_table(rows));
}

pub fn build_table(rows: &[TableRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package Name").add_attribute(Attribute::Bold),
            Cell::new("Current Version").add_attribute(Attribute::Bold),
            Cell::new("Latest Version").add_attribute(Attribute::Bold),
            Cell::new("Last Published").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        let current = if row.outdated {
            Cell::new(&row.current)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&row.current)
        };

        let latest_color = match row.update {
            Some(UpdateKind::Major) => Color::Red,
            Some(UpdateKind::Minor) => Color::Yellow,
            Some(UpdateKind::Patch) | Some(UpdateKind::Prerelease) => Color::Green,
            None => Color::Reset,
        };

        let type_color = match row.classification {
            Classification::Production => Color::Cyan,
            Classification::Development => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(&row.name),
            current,
            Cell::new(&row.latest).fg(latest_color),
            Cell::new(&row.last_published),
            Cell::new(row.classification.to_string()).fg(type_color),
            Cell::new(&row.state).set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, outdated: bool) -> TableRow {
        TableRow {
            name: name.to_string(),
            current: "^1.0.0".to_string(),
            latest: if outdated { "2.0.0" } else { "N/A" }.to_string(),
            last_published: "N/A".to_string(),
            classification: Classification::Production,
            state: "fetched".to_string(),
            outdated,
            update: outdated.then_some(UpdateKind::Major),
        }
    }

    #[test]
    fn test_table_contains_every_row() {
        let table = build_table(&[row("react", true), row("left-pad", false)]);
        let rendered = table.to_string();
        assert!(rendered.contains("Package Name"));
        assert!(rendered.contains("react"));
        assert!(rendered.contains("left-pad"));
        assert!(rendered.contains("dependency"));
    }

    #[test]
    fn test_summary_line_counts() {
        colored::control::set_override(false);
        let line = summary_line(&Summary {
            total: 4,
            production: 3,
            development: 1,
            nested: 0,
            outdated: 2,
        });
        assert_eq!(
            line,
            "Total: 4  Dependencies: 3  Dev: 1  Nested: 0  Outdated: 2"
        );
    }
}
