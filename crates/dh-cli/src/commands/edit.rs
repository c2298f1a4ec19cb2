use std::collections::BTreeMap;

use dh_core::Characteristic;
use dh_core::field::paths;
use dh_sheet::TrackField;
use dh_sheet::adapters::ScriptedAnswer;

use super::{Context, Session};

pub async fn run(ctx: &Context, field: &str, value: &str) -> Result<(), String> {
    if let Some(track) = TrackField::from_path(field) {
        let session = Session::open(ctx, Vec::new()).await?;
        let stored = session
            .sheet
            .edit_track(session.record, track, value)
            .await
            .map_err(|e| e.to_string())?;
        println!("  {} = {stored}", track.path());
        return session.finish().await;
    }

    let key = field.strip_prefix(paths::CHARACTERISTIC_PREFIX).unwrap_or(field);
    let characteristic = Characteristic::from_key(key).ok_or_else(|| {
        format!("unknown field: \"{field}\" (expected a characteristic or wounds/fate counter)")
    })?;
    let form = BTreeMap::from([(characteristic, value.to_string())]);
    let session = Session::open(ctx, vec![ScriptedAnswer::Fill(form)]).await?;
    let stored = session
        .sheet
        .edit_characteristics(session.record)
        .await
        .map_err(|e| e.to_string())?
        .and_then(|values| values.get(&characteristic).copied())
        .ok_or_else(|| "characteristic form was closed".to_string())?;
    println!("  {} = {stored}", characteristic.full_name());
    session.finish().await
}
