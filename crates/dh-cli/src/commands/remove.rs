use colored::Colorize;
use dh_core::{AttachmentId, CharacterRecord};
use dh_sheet::Removal;

use super::{Context, Session};

/// Find an attachment by name, full id, or id prefix.
fn lookup(record: &CharacterRecord, key: &str) -> Option<AttachmentId> {
    if let Some(found) = record.find_attachment(key) {
        return Some(found.id);
    }
    if let Some(id) = AttachmentId::parse(key) {
        return Some(id);
    }
    let prefix = key.trim().to_lowercase();
    if prefix.is_empty() {
        return None;
    }
    let mut matches = record
        .attachments()
        .iter()
        .filter(|a| a.id.0.to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.id),
        _ => None,
    }
}

pub async fn run(ctx: &Context, key: &str) -> Result<(), String> {
    let session = Session::open(ctx, Vec::new()).await?;
    let record = session.snapshot().await?;
    let removal = match lookup(&record, key) {
        Some(id) => session
            .sheet
            .remove_attachment(session.record, id)
            .await
            .map_err(|e| e.to_string())?,
        None => Removal::Missing,
    };
    match removal {
        Removal::Missing => {
            let notice = format!("no attachment matches \"{key}\"; nothing removed");
            println!("  {}", notice.dimmed());
            return Ok(());
        }
        Removal::Detached(attachment) => {
            println!("  Removed {}", attachment.name.bold());
        }
        Removal::OriginDetached {
            attachment,
            next_origin,
        } => {
            println!("  Removed {}", attachment.name.bold());
            match next_origin {
                Some(name) => println!("  origin is now {name}"),
                None => println!("  {}", "no origin left; wounds and fate reset".yellow()),
            }
        }
    }
    session.finish().await
}
