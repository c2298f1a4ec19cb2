//! Initiative rolls.

use dh_core::{Characteristic, RecordId};
use dh_mechanics::Initiative;
use dh_mechanics::initiative::INITIATIVE_FORMULA;

use crate::error::SheetResult;
use crate::journal::{ChatKind, ChatRecord};
use crate::sheet::Sheet;

impl Sheet {
    /// Roll initiative: 1d10 plus the Agility bonus.
    pub async fn roll_initiative(&self, record: RecordId) -> SheetResult<Initiative> {
        let character = self.ports.records.get(record).await?;
        let agility = character.characteristic(Characteristic::Agility);
        let die = self.ports.dice.evaluate(INITIATIVE_FORMULA).await?;
        let initiative = Initiative::new(die.total, agility);

        let chat = ChatRecord::new(ChatKind::Initiative, &character.name, "Initiative")
            .line(format!(
                "{INITIATIVE_FORMULA}: {}, Ag bonus: {}",
                initiative.die, initiative.bonus
            ))
            .summary(format!("Result: {}", initiative.total))
            .tag("ag", agility)
            .tag("ag_bonus", initiative.bonus)
            .tag("die", initiative.die)
            .tag("total", initiative.total);
        self.ports.log.emit(chat).await;
        Ok(initiative)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dh_core::FieldUpdate;

    use super::*;
    use crate::adapters::{MemoryCatalog, ScriptedDialog};
    use crate::config::SheetConfig;
    use crate::ports::RecordStore;
    use crate::workflow::harness::{fixed_dice, harness};

    #[tokio::test]
    async fn adds_agility_bonus_and_posts() {
        let h = harness(
            fixed_dice(&[("1d10", 4)]),
            Arc::new(ScriptedDialog::default()),
            SheetConfig::default(),
            MemoryCatalog::new(),
        )
        .await;
        let update = FieldUpdate::new().set_characteristic(Characteristic::Agility, 37);
        h.store.update(h.record, update).await.unwrap();

        let initiative = h.sheet.roll_initiative(h.record).await.unwrap();
        assert_eq!(initiative.total, 7);

        let journal = h.presenter.journal().await;
        let chat = journal.last().unwrap();
        assert_eq!(chat.body, vec!["1d10: 4, Ag bonus: 3"]);
        assert_eq!(chat.result_summary, "Result: 7");
    }

    #[tokio::test]
    async fn default_agility() {
        let h = harness(
            fixed_dice(&[("1d10", 10)]),
            Arc::new(ScriptedDialog::default()),
            SheetConfig::default(),
            MemoryCatalog::new(),
        )
        .await;
        let initiative = h.sheet.roll_initiative(h.record).await.unwrap();
        assert_eq!(initiative.bonus, 2);
        assert_eq!(initiative.total, 12);
    }
}
