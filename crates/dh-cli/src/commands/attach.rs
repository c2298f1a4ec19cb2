use std::fs;
use std::path::Path;

use colored::Colorize;
use dh_core::{AttachmentSource, Characteristic};
use dh_mechanics::GenerationMode;
use dh_sheet::adapters::ScriptedAnswer;
use dh_sheet::{DropPayload, Interruption, OriginReport};

use super::{Context, Session};

pub async fn run(
    ctx: &Context,
    source: &Path,
    mode: Option<&str>,
    alloc: &[String],
) -> Result<(), String> {
    let text = fs::read_to_string(source)
        .map_err(|e| format!("cannot read {}: {e}", source.display()))?;
    let item: AttachmentSource = serde_json::from_str(&text)
        .map_err(|e| format!("invalid item file {}: {e}", source.display()))?;
    let name = item.name.clone();

    let mode = mode
        .map(GenerationMode::parse)
        .transpose()
        .map_err(|e| e.to_string())?;
    let allocation = parse_allocation(alloc)?;
    if !allocation.is_empty() && mode != Some(GenerationMode::PointBuy) {
        return Err("--alloc needs --mode pointbuy".to_string());
    }

    let mut answers = Vec::new();
    if let Some(mode) = mode {
        answers.push(ScriptedAnswer::Choose(mode.id().to_string()));
        if mode == GenerationMode::PointBuy {
            answers.push(ScriptedAnswer::Allocate(allocation));
        }
    }

    let session = Session::open(ctx, answers).await?;
    let report = session
        .sheet
        .handle_drop(session.record, &DropPayload::inline(item))
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("{} is not a usable item", source.display()))?;

    println!(
        "  Attached {} {} {}",
        name.bold(),
        format!("[{}]", report.kind).dimmed(),
        report.attachment.to_string().dimmed()
    );
    if let Some(origin) = &report.origin {
        print_origin(origin);
    }
    println!();
    session.finish().await
}

fn parse_allocation(entries: &[String]) -> Result<Vec<(Characteristic, i32)>, String> {
    entries
        .iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (key, amount) = entry
                .split_once('=')
                .ok_or_else(|| format!("allocation \"{entry}\" is not key=points"))?;
            let characteristic = Characteristic::from_key(key)
                .ok_or_else(|| format!("unknown characteristic: \"{}\"", key.trim()))?;
            let amount = amount
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("allocation \"{entry}\" has no point count"))?;
            Ok((characteristic, amount))
        })
        .collect()
}

fn print_origin(report: &OriginReport) {
    if let Some(wounds) = report.wounds {
        println!("  wounds:  {wounds}");
    } else {
        println!("  wounds:  {}", "(not rolled)".dimmed());
    }
    if let Some(fate) = report.fate {
        let blessing = match report.blessing {
            Some(b) if b.granted => format!(" (blessed: {} >= {})", b.die, b.threshold),
            Some(b) => format!(" (no blessing: {} < {})", b.die, b.threshold),
            None => String::new(),
        };
        println!("  fate:    {fate}{}", blessing.dimmed());
    }
    if let Some(mode) = report.mode {
        println!("  mode:    {}", mode.label());
    }
    if let Some((stage, why)) = report.interrupted {
        let why = match why {
            Interruption::Dismissed => "dismissed",
            Interruption::TimedOut => "timed out",
        };
        println!(
            "  {}",
            format!("stopped at {stage:?}: dialog {why}").yellow()
        );
    }
}
