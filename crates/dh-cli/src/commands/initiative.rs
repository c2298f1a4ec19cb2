use super::{Context, Session};

pub async fn run(ctx: &Context) -> Result<(), String> {
    let session = Session::open(ctx, Vec::new()).await?;
    session
        .sheet
        .roll_initiative(session.record)
        .await
        .map_err(|e| e.to_string())?;
    session.finish().await
}
