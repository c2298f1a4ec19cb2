use colored::Colorize;
use dh_core::CharacterRecord;

use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    if ctx.file.exists() {
        return Err(format!("{} already exists", ctx.file.display()));
    }
    let record = CharacterRecord::new(name);
    super::save_record(&ctx.file, &record)?;
    println!(
        "  Created {} in {}",
        record.name.bold(),
        ctx.file.display().to_string().dimmed()
    );
    Ok(())
}
