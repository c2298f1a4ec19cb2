//! Characteristic tests.

use dh_core::{Characteristic, RecordId};
use dh_mechanics::resolution::TEST_FORMULA;
use dh_mechanics::{PercentileTest, TestModifier, TestOutcome};
use tracing::{debug, info};

use crate::error::SheetResult;
use crate::journal::{ChatKind, ChatRecord};
use crate::ports::{ChoiceOption, DialogOutcome};
use crate::sheet::Sheet;

const MODIFIER_TITLE: &str = "Test modifier";

impl Sheet {
    /// Ask the user for a test modifier.
    pub async fn prompt_modifier(&self) -> SheetResult<DialogOutcome<TestModifier>> {
        let options: Vec<ChoiceOption> = TestModifier::choices()
            .map(|m| ChoiceOption::new(m.id(), m.id()))
            .collect();
        match self
            .ask(self.ports.dialog.choice(MODIFIER_TITLE, &options))
            .await
        {
            DialogOutcome::Chosen(id) => Ok(DialogOutcome::Chosen(TestModifier::parse(&id)?)),
            DialogOutcome::Dismissed => Ok(DialogOutcome::Dismissed),
            DialogOutcome::TimedOut => Ok(DialogOutcome::TimedOut),
        }
    }

    /// Prompt for a modifier, then test a characteristic.
    ///
    /// Returns `None` when the modifier dialog is closed or times out; no
    /// dice are rolled and nothing is posted in that case.
    pub async fn roll_test(
        &self,
        record: RecordId,
        characteristic: Characteristic,
    ) -> SheetResult<Option<TestOutcome>> {
        match self.prompt_modifier().await? {
            DialogOutcome::Chosen(modifier) => Ok(Some(
                self.roll_test_with(record, characteristic, modifier).await?,
            )),
            outcome => {
                info!(%record, %characteristic, ?outcome, "test abandoned at modifier dialog");
                Ok(None)
            }
        }
    }

    /// Test a characteristic with a known modifier.
    pub async fn roll_test_with(
        &self,
        record: RecordId,
        characteristic: Characteristic,
        modifier: TestModifier,
    ) -> SheetResult<TestOutcome> {
        let character = self.ports.records.get(record).await?;
        let base = character.characteristic(characteristic);
        let test = PercentileTest::new(base, modifier.value());
        let roll = self.ports.dice.evaluate(TEST_FORMULA).await?;
        let outcome = test.resolve(roll.total)?;
        debug!(%record, %characteristic, base, modifier = modifier.value(), roll = outcome.roll, "test resolved");

        let chat = ChatRecord::new(
            ChatKind::Test,
            &character.name,
            format!("{} ({})", characteristic.full_name(), outcome.target),
        )
        .line(format!("Roll: {}", outcome.roll))
        .summary(outcome.to_string())
        .tag("characteristic", characteristic.key())
        .tag("base", base)
        .tag("modifier", modifier.value())
        .tag("target", outcome.target)
        .tag("roll", outcome.roll)
        .tag("success", outcome.success)
        .tag("degrees", outcome.degrees);
        self.ports.log.emit(chat).await;
        Ok(outcome)
    }
}
