use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dh_sheet::SheetView;

use super::Context;

pub async fn run(ctx: &Context, json: bool) -> Result<(), String> {
    let record = super::load_record(&ctx.file)?;
    if json {
        let out = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let view = SheetView::from_record(&record);
    println!("  {}", view.name.bold());
    if view.origin.is_empty() {
        println!("  origin:  {}", "(none)".dimmed());
    } else {
        println!("  origin:  {}", view.origin);
    }
    println!(
        "  wounds:  {}/{} {}",
        view.wounds.current,
        view.wounds.maximum,
        format!("({}%)", view.wounds.percent).dimmed()
    );
    println!("  fate:    {}/{}", view.fate.current, view.fate.maximum);
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Characteristic", "Value", "Bonus"]);
    for row in &view.characteristics {
        table.add_row(vec![
            row.label.to_string(),
            row.full_name.to_string(),
            row.value.to_string(),
            row.bonus.to_string(),
        ]);
    }
    println!("{table}");

    if !view.attachments.is_empty() {
        println!();
        println!("  {}", "Properties".bold().underline());
        for row in &view.attachments {
            let lock = if row.editable { "" } else { " (locked)" };
            let bound = row
                .bound
                .map(|c| format!(" -> {}", c.label()))
                .unwrap_or_default();
            println!(
                "  {} {}{bound}{}",
                row.name,
                format!("[{}]", row.kind).dimmed(),
                lock.dimmed()
            );
        }
    }
    Ok(())
}
