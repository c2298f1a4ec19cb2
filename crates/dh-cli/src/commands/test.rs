use dh_core::Characteristic;
use dh_mechanics::TestModifier;
use dh_sheet::adapters::ScriptedAnswer;

use super::{Context, Session};

pub async fn run(ctx: &Context, characteristic: &str, modifier: &str) -> Result<(), String> {
    let characteristic = Characteristic::from_key(characteristic)
        .ok_or_else(|| format!("unknown characteristic: \"{characteristic}\""))?;
    let modifier = TestModifier::parse(modifier).map_err(|e| e.to_string())?;

    let session = Session::open(ctx, vec![ScriptedAnswer::Choose(modifier.id())]).await?;
    session
        .sheet
        .roll_test(session.record, characteristic)
        .await
        .map_err(|e| e.to_string())?;
    session.finish().await
}
