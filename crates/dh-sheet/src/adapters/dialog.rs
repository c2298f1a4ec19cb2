//! Dialogs answered from a queue of scripted answers.

use std::collections::VecDeque;

use async_trait::async_trait;
use dh_core::{Characteristic, Characteristics};
use dh_mechanics::PointBuy;
use tokio::sync::Mutex;
use tracing::warn;

use crate::ports::{CharacteristicForm, ChoiceOption, DialogOutcome, DialogPrompt};

/// A prepared answer to the next dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Pick the option with this id.
    Choose(String),
    /// Apply these point-buy adjustments, then save.
    Allocate(Vec<(Characteristic, i32)>),
    /// Submit the characteristic form with these raw inputs.
    Fill(CharacteristicForm),
    /// Close the dialog without answering.
    Dismiss,
    /// Let the dialog time out.
    TimeOut,
}

/// Answers dialogs in order from a script.
///
/// An exhausted script dismisses every further dialog. An answer of the
/// wrong shape for the dialog asked also dismisses it.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    titles: Mutex<Vec<String>>,
}

impl ScriptedDialog {
    /// Create a dialog with the given answers.
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            titles: Mutex::new(Vec::new()),
        }
    }

    /// Queue another answer.
    pub async fn push(&self, answer: ScriptedAnswer) {
        self.answers.lock().await.push_back(answer);
    }

    /// Titles of the dialogs shown so far.
    pub async fn titles(&self) -> Vec<String> {
        self.titles.lock().await.clone()
    }

    /// Answers not yet used.
    pub async fn remaining(&self) -> usize {
        self.answers.lock().await.len()
    }

    async fn next(&self, title: &str) -> Option<ScriptedAnswer> {
        self.titles.lock().await.push(title.to_string());
        self.answers.lock().await.pop_front()
    }
}

fn unanswered<T>(answer: Option<ScriptedAnswer>, title: &str) -> DialogOutcome<T> {
    match answer {
        Some(ScriptedAnswer::TimeOut) => DialogOutcome::TimedOut,
        None | Some(ScriptedAnswer::Dismiss) => DialogOutcome::Dismissed,
        Some(other) => {
            warn!(dialog = title, answer = ?other, "scripted answer does not fit dialog");
            DialogOutcome::Dismissed
        }
    }
}

#[async_trait]
impl DialogPrompt for ScriptedDialog {
    async fn choice(&self, title: &str, options: &[ChoiceOption]) -> DialogOutcome<String> {
        match self.next(title).await {
            Some(ScriptedAnswer::Choose(id)) if options.iter().any(|o| o.id == id) => {
                DialogOutcome::Chosen(id)
            }
            other => unanswered(other, title),
        }
    }

    async fn point_buy(&self, mut allocation: PointBuy) -> DialogOutcome<PointBuy> {
        const TITLE: &str = "Point-buy";
        match self.next(TITLE).await {
            Some(ScriptedAnswer::Allocate(steps)) => {
                for (characteristic, delta) in steps {
                    // A refused step is a disabled button: the click does nothing.
                    let _ = allocation.adjust(characteristic, delta);
                }
                if allocation.can_commit() {
                    DialogOutcome::Chosen(allocation)
                } else {
                    warn!(remaining = allocation.remaining(), "point-buy closed unbalanced");
                    DialogOutcome::Dismissed
                }
            }
            other => unanswered(other, TITLE),
        }
    }

    async fn characteristic_form(
        &self,
        _current: Characteristics,
    ) -> DialogOutcome<CharacteristicForm> {
        const TITLE: &str = "Characteristics";
        match self.next(TITLE).await {
            Some(ScriptedAnswer::Fill(form)) => DialogOutcome::Chosen(form),
            other => unanswered(other, TITLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_mechanics::Bonuses;

    fn options() -> Vec<ChoiceOption> {
        vec![ChoiceOption::new("a", "A"), ChoiceOption::new("b", "B")]
    }

    #[tokio::test]
    async fn answers_in_order_then_dismisses() {
        let dialog = ScriptedDialog::new([
            ScriptedAnswer::Choose("b".into()),
            ScriptedAnswer::TimeOut,
        ]);
        assert_eq!(
            dialog.choice("first", &options()).await,
            DialogOutcome::Chosen("b".to_string())
        );
        assert_eq!(dialog.choice("second", &options()).await, DialogOutcome::TimedOut);
        assert_eq!(dialog.choice("third", &options()).await, DialogOutcome::Dismissed);
        assert_eq!(dialog.titles().await, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn unknown_option_dismisses() {
        let dialog = ScriptedDialog::new([ScriptedAnswer::Choose("z".into())]);
        assert_eq!(dialog.choice("pick", &options()).await, DialogOutcome::Dismissed);
    }

    #[tokio::test]
    async fn unbalanced_point_buy_dismisses() {
        let dialog = ScriptedDialog::new([ScriptedAnswer::Allocate(vec![(
            Characteristic::Strength,
            10,
        )])]);
        let outcome = dialog.point_buy(PointBuy::new(&Bonuses::default())).await;
        assert_eq!(outcome, DialogOutcome::Dismissed);
    }

    #[tokio::test]
    async fn balanced_point_buy_is_chosen() {
        let dialog = ScriptedDialog::new([ScriptedAnswer::Allocate(vec![
            (Characteristic::WeaponSkill, 15),
            (Characteristic::BallisticSkill, 15),
            (Characteristic::Strength, 15),
            (Characteristic::Toughness, 15),
        ])]);
        let outcome = dialog.point_buy(PointBuy::new(&Bonuses::default())).await;
        let allocation = outcome.chosen().unwrap();
        assert_eq!(allocation.remaining(), 0);
        assert_eq!(allocation.value(Characteristic::Strength), 40);
    }
}
