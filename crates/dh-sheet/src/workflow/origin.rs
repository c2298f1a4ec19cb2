//! Origin application.
//!
//! Attaching an origin runs a fixed sequence of stages:
//!
//! ```text
//! Start -> WoundsRolled -> FateResolved -> GenerationModeChosen -> Generated | PointBought -> Done
//! ```
//!
//! Each stage finishes before the next begins and there is no way back.
//! A bad dice formula never stops the sequence: the wounds stage is
//! skipped and a characteristic falls back to a fixed value. Closing a
//! dialog (or letting it time out) stops the sequence where it is. Stages
//! already committed stay committed.

use std::collections::BTreeMap;

use dh_core::field::paths;
use dh_core::{AttachmentId, CharacterRecord, Characteristic, CoreError, FieldUpdate, OriginProfile, RecordId};
use dh_mechanics::generation::{FALLBACK_VALUE, clamp_generated};
use dh_mechanics::{Bonuses, GenerationMode, PointBuy};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{SheetError, SheetResult};
use crate::journal::{ChatKind, ChatRecord};
use crate::ports::{ChoiceOption, DialogOutcome};
use crate::sheet::Sheet;

/// Formula of the fate blessing roll.
pub const BLESSING_FORMULA: &str = "1d10";

const MODE_TITLE: &str = "Characteristic generation";

/// A stage of origin application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginStage {
    /// Triggered by the attach.
    Start,
    /// Wound maximum rolled (or skipped).
    WoundsRolled,
    /// Fate committed.
    FateResolved,
    /// The user picked a generation mode.
    GenerationModeChosen,
    /// Characteristics rolled.
    Generated,
    /// Characteristics bought.
    PointBought,
    /// Nothing more will happen.
    Done,
}

/// Why a dialog produced no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interruption {
    /// The dialog was closed.
    Dismissed,
    /// The dialog timed out.
    TimedOut,
}

/// The fate blessing roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlessingRoll {
    /// Die result needed.
    pub threshold: i32,
    /// Die result rolled.
    pub die: i32,
    /// Whether the +1 was granted.
    pub granted: bool,
}

/// What an origin application did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginReport {
    /// Name of the applied origin.
    pub origin: String,
    /// Stages entered, in order.
    pub stages: Vec<OriginStage>,
    /// The rolled wound maximum, if the stage was not skipped.
    pub wounds: Option<i32>,
    /// The committed fate maximum.
    pub fate: Option<i32>,
    /// The blessing roll, if one was made.
    pub blessing: Option<BlessingRoll>,
    /// The chosen generation mode.
    pub mode: Option<GenerationMode>,
    /// Committed characteristic values.
    pub characteristics: Option<BTreeMap<Characteristic, i32>>,
    /// The stage at which a dialog went unanswered.
    pub interrupted: Option<(OriginStage, Interruption)>,
}

impl OriginReport {
    fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            stages: vec![OriginStage::Start],
            wounds: None,
            fate: None,
            blessing: None,
            mode: None,
            characteristics: None,
            interrupted: None,
        }
    }

    /// The last stage entered.
    pub fn stage(&self) -> OriginStage {
        self.stages.last().copied().unwrap_or(OriginStage::Start)
    }

    /// Whether every stage ran without interruption.
    pub fn completed(&self) -> bool {
        self.interrupted.is_none() && self.stage() == OriginStage::Done
    }

    fn enter(&mut self, stage: OriginStage) {
        debug!(origin = %self.origin, ?stage, "origin stage");
        self.stages.push(stage);
    }

    fn interrupt<T>(mut self, outcome: DialogOutcome<T>) -> Self {
        let why = match outcome {
            DialogOutcome::TimedOut => Interruption::TimedOut,
            DialogOutcome::Chosen(_) | DialogOutcome::Dismissed => Interruption::Dismissed,
        };
        info!(origin = %self.origin, stage = ?self.stage(), ?why, "origin application stopped");
        self.interrupted = Some((self.stage(), why));
        self.finish()
    }

    fn finish(mut self) -> Self {
        self.enter(OriginStage::Done);
        self
    }
}

/// Whether an allocation is fully spent and starts from this origin's floors.
fn fits(allocation: &PointBuy, bonuses: &Bonuses) -> bool {
    allocation.can_commit()
        && Characteristic::ALL
            .into_iter()
            .all(|c| allocation.start(c) == bonuses.floor(c))
}

impl Sheet {
    /// Run origin application for an origin already attached to the record.
    ///
    /// Fails with [`SheetError::WorkflowBusy`] while another application is
    /// running on the same record.
    pub async fn apply_origin(
        &self,
        record: RecordId,
        attachment: AttachmentId,
    ) -> SheetResult<OriginReport> {
        let _guard = self.locks.acquire(record)?;
        self.run_origin(record, attachment).await
    }

    /// The stages themselves. The caller holds the record's workflow lock.
    pub(crate) async fn run_origin(
        &self,
        record: RecordId,
        attachment: AttachmentId,
    ) -> SheetResult<OriginReport> {
        let character = self.ports.records.get(record).await?;
        let origin = character
            .attachment(attachment)
            .ok_or(CoreError::AttachmentNotFound(attachment))?;
        let profile = origin
            .as_origin()
            .ok_or(SheetError::NotAnOrigin(attachment))?
            .clone();
        let name = origin.name.clone();
        let mut report = OriginReport::new(&name);
        info!(%record, origin = %name, "applying origin");

        report.wounds = self.roll_wounds(&character, &name, &profile).await?;
        report.enter(OriginStage::WoundsRolled);

        let (fate, blessing) = self.resolve_fate(&character, &name, &profile).await?;
        report.fate = Some(fate);
        report.blessing = blessing;
        report.enter(OriginStage::FateResolved);

        let mode = match self.choose_mode().await? {
            DialogOutcome::Chosen(mode) => mode,
            outcome => return Ok(report.interrupt(outcome)),
        };
        report.mode = Some(mode);
        report.enter(OriginStage::GenerationModeChosen);

        let bonuses = Bonuses::from_origin(&profile);
        match mode {
            GenerationMode::Randomized => {
                let values = self
                    .generate_characteristics(&character, &name, &bonuses)
                    .await?;
                report.characteristics = Some(values);
                report.enter(OriginStage::Generated);
            }
            GenerationMode::PointBuy => {
                let allocation = PointBuy::new(&bonuses);
                match self.ask(self.ports.dialog.point_buy(allocation)).await {
                    DialogOutcome::Chosen(allocation) if !fits(&allocation, &bonuses) => {
                        warn!(%record, origin = %name, "point-buy allocation does not fit the origin, discarding");
                        return Ok(report.interrupt(DialogOutcome::<PointBuy>::Dismissed));
                    }
                    DialogOutcome::Chosen(allocation) => {
                        let values = self
                            .commit_point_buy(&character, &name, &allocation)
                            .await?;
                        report.characteristics = Some(values);
                        report.enter(OriginStage::PointBought);
                    }
                    outcome => return Ok(report.interrupt(outcome)),
                }
            }
        }
        Ok(report.finish())
    }

    async fn roll_wounds(
        &self,
        character: &CharacterRecord,
        origin: &str,
        profile: &OriginProfile,
    ) -> SheetResult<Option<i32>> {
        let formula = profile.wounds_formula.trim();
        if formula.is_empty() {
            debug!(origin, "origin has no wounds formula");
            return Ok(None);
        }
        let eval = match self.ports.dice.evaluate(formula).await {
            Ok(eval) => eval,
            Err(e) => {
                warn!(origin, formula, error = %e, "invalid wounds formula on origin");
                return Ok(None);
            }
        };
        let maximum = eval.total;
        let mut update = FieldUpdate::new().set(paths::WOUNDS_MAXIMUM, maximum);
        if self.config.wound_current_sync {
            update.insert(paths::WOUNDS_CURRENT, maximum);
        }
        self.ports.records.update(character.id, update).await?;

        let chat = ChatRecord::new(ChatKind::Wounds, &character.name, format!("Wounds: {origin}"))
            .line(format!("Formula: {formula}"))
            .summary(format!("Result: {maximum}"))
            .tag("origin", origin)
            .tag("formula", formula)
            .tag("total", maximum);
        self.ports.log.emit(chat).await;
        Ok(Some(maximum))
    }

    async fn resolve_fate(
        &self,
        character: &CharacterRecord,
        origin: &str,
        profile: &OriginProfile,
    ) -> SheetResult<(i32, Option<BlessingRoll>)> {
        let mut fate = profile.fate_base.max(0);
        let mut blessing = None;
        if let Some(threshold) = profile.blessing() {
            match self.ports.dice.evaluate(BLESSING_FORMULA).await {
                Ok(eval) => {
                    let granted = eval.total >= threshold;
                    if granted {
                        fate += 1;
                    }
                    blessing = Some(BlessingRoll {
                        threshold,
                        die: eval.total,
                        granted,
                    });
                }
                Err(e) => warn!(origin, error = %e, "blessing roll failed"),
            }
        }
        let update = FieldUpdate::new()
            .set(paths::FATE_MAXIMUM, fate)
            .set(paths::FATE_CURRENT, fate);
        self.ports.records.update(character.id, update).await?;

        if let Some(roll) = blessing {
            let verdict = if roll.granted {
                "Threshold met: +1 maximum fate"
            } else {
                "Threshold not met"
            };
            let chat = ChatRecord::new(
                ChatKind::Blessing,
                &character.name,
                format!("Emperor's Blessing: {origin}"),
            )
            .line(format!("Threshold: {}, die: {}", roll.threshold, roll.die))
            .summary(verdict)
            .tag("origin", origin)
            .tag("threshold", roll.threshold)
            .tag("die", roll.die)
            .tag("fate_max", fate);
            self.ports.log.emit(chat).await;
        }
        Ok((fate, blessing))
    }

    async fn choose_mode(&self) -> SheetResult<DialogOutcome<GenerationMode>> {
        let options: Vec<ChoiceOption> = GenerationMode::ALL
            .into_iter()
            .map(|m| ChoiceOption::new(m.id(), m.label()))
            .collect();
        match self.ask(self.ports.dialog.choice(MODE_TITLE, &options)).await {
            DialogOutcome::Chosen(id) => Ok(DialogOutcome::Chosen(GenerationMode::parse(&id)?)),
            DialogOutcome::Dismissed => Ok(DialogOutcome::Dismissed),
            DialogOutcome::TimedOut => Ok(DialogOutcome::TimedOut),
        }
    }

    async fn generate_characteristics(
        &self,
        character: &CharacterRecord,
        origin: &str,
        bonuses: &Bonuses,
    ) -> SheetResult<BTreeMap<Characteristic, i32>> {
        let mut values = BTreeMap::new();
        let mut update = FieldUpdate::new();
        let mut chat = ChatRecord::new(
            ChatKind::Generation,
            &character.name,
            format!("Characteristic generation: {origin}"),
        )
        .tag("origin", origin);
        for characteristic in Characteristic::ALL {
            let formula = bonuses.formula(characteristic);
            let rolled = match self.ports.dice.evaluate(formula).await {
                Ok(eval) => eval.total,
                Err(e) => {
                    warn!(%characteristic, formula, error = %e, "generation roll failed, using fallback");
                    FALLBACK_VALUE
                }
            };
            let value = clamp_generated(rolled);
            update.insert(paths::characteristic(characteristic), value);
            chat = chat.line(format!("{}: {formula} = {value}", characteristic.full_name()));
            values.insert(characteristic, value);
        }
        self.ports.records.update(character.id, update).await?;
        self.ports.log.emit(chat).await;
        Ok(values)
    }

    async fn commit_point_buy(
        &self,
        character: &CharacterRecord,
        origin: &str,
        allocation: &PointBuy,
    ) -> SheetResult<BTreeMap<Characteristic, i32>> {
        let values = allocation.commit()?;
        let mut update = FieldUpdate::new();
        let mut chat = ChatRecord::new(
            ChatKind::PointBuy,
            &character.name,
            format!("Point-buy: {origin}"),
        )
        .tag("origin", origin);
        for (&characteristic, &value) in &values {
            update.insert(paths::characteristic(characteristic), value);
            chat = chat.line(format!(
                "{}: {} -> {value}",
                characteristic.full_name(),
                allocation.start(characteristic)
            ));
        }
        self.ports.records.update(character.id, update).await?;
        self.ports.log.emit(chat).await;
        Ok(values)
    }
}
