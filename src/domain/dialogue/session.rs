//! Session record - the complete state of one diagnostic conversation.
//!
//! Fields are private; the engine mutates a session only through the
//! methods below, which keep these invariants:
//! - `symptoms_experienced[0]` is the primary symptom and the list has no duplicates
//! - `symptoms_to_ask` never contains the primary symptom
//! - `current_symptom_index <= symptoms_to_ask.len()`
//! - `initial_prediction` is set once per session

use serde::{Deserialize, Serialize};

use super::errors::DialogueError;
use super::state::DialogueState;
use crate::domain::foundation::{DiseaseId, StateMachine, SymptomId, Timestamp, ValidationError};

/// One user's conversation, persisted as a whole after every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    state: DialogueState,
    user_name: Option<String>,
    user_age: Option<i64>,
    symptoms_experienced: Vec<SymptomId>,
    symptom_options: Vec<SymptomId>,
    num_days: Option<i64>,
    initial_prediction: Option<DiseaseId>,
    symptoms_to_ask: Vec<SymptomId>,
    current_symptom_index: usize,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh session waiting for the user's name.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            state: DialogueState::GetName,
            user_name: None,
            user_age: None,
            symptoms_experienced: Vec::new(),
            symptom_options: Vec::new(),
            num_days: None,
            initial_prediction: None,
            symptoms_to_ask: Vec::new(),
            current_symptom_index: 0,
            started_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn user_age(&self) -> Option<i64> {
        self.user_age
    }

    pub fn symptoms_experienced(&self) -> &[SymptomId] {
        &self.symptoms_experienced
    }

    pub fn symptom_options(&self) -> &[SymptomId] {
        &self.symptom_options
    }

    pub fn num_days(&self) -> Option<i64> {
        self.num_days
    }

    pub fn initial_prediction(&self) -> Option<&DiseaseId> {
        self.initial_prediction.as_ref()
    }

    pub fn symptoms_to_ask(&self) -> &[SymptomId] {
        &self.symptoms_to_ask
    }

    pub fn current_symptom_index(&self) -> usize {
        self.current_symptom_index
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The first symptom the user gave, if resolved yet.
    pub fn primary_symptom(&self) -> Option<&SymptomId> {
        self.symptoms_experienced.first()
    }

    /// The related symptom currently being asked about.
    pub fn pending_question(&self) -> Option<&SymptomId> {
        self.symptoms_to_ask.get(self.current_symptom_index)
    }

    // ─────────────────────────────────────────────────────────────────
    // Mutations (engine only)
    // ─────────────────────────────────────────────────────────────────

    /// Moves to `next`, rejecting edges the state machine does not allow.
    pub(crate) fn advance(&mut self, next: DialogueState) -> Result<(), DialogueError> {
        self.state = self.state.transition_to(next)?;
        Ok(())
    }

    pub(crate) fn record_name(&mut self, name: String) {
        self.user_name = Some(name);
    }

    pub(crate) fn record_age(&mut self, age: i64) {
        self.user_age = Some(age);
    }

    /// Makes `symptom` the sole experienced symptom and drops any menu.
    pub(crate) fn record_primary_symptom(&mut self, symptom: SymptomId) {
        self.symptoms_experienced = vec![symptom];
        self.symptom_options.clear();
    }

    pub(crate) fn offer_symptom_options(&mut self, options: Vec<SymptomId>) {
        self.symptom_options = options;
    }

    /// Picks a menu entry by index and makes it the primary symptom.
    pub(crate) fn select_symptom_option(&mut self, index: i64) -> Result<SymptomId, DialogueError> {
        let len = self.symptom_options.len();
        let selected = usize::try_from(index)
            .ok()
            .and_then(|i| self.symptom_options.get(i))
            .cloned()
            .ok_or(DialogueError::SelectionOutOfRange { index, len })?;
        self.record_primary_symptom(selected.clone());
        Ok(selected)
    }

    pub(crate) fn record_days(&mut self, days: i64) {
        self.num_days = Some(days);
    }

    /// Stores the preliminary diagnosis and the questions that follow from it.
    ///
    /// Symptoms already experienced (the primary one included) and repeats
    /// are dropped from `questions`, preserving order.
    pub(crate) fn begin_questioning(
        &mut self,
        initial_prediction: DiseaseId,
        questions: Vec<SymptomId>,
    ) -> Result<(), DialogueError> {
        if self.initial_prediction.is_some() {
            return Err(DialogueError::InvalidTransition(ValidationError::invalid_format(
                "initial_prediction",
                "Preliminary diagnosis is already recorded",
            )));
        }
        let mut to_ask: Vec<SymptomId> = Vec::with_capacity(questions.len());
        for symptom in questions {
            if !self.symptoms_experienced.contains(&symptom) && !to_ask.contains(&symptom) {
                to_ask.push(symptom);
            }
        }
        self.initial_prediction = Some(initial_prediction);
        self.symptoms_to_ask = to_ask;
        self.current_symptom_index = 0;
        Ok(())
    }

    /// Records the answer to the pending question and moves the cursor on.
    ///
    /// Returns the next pending question, or `None` once all are answered.
    pub(crate) fn answer_pending(&mut self, experienced: bool) -> Option<&SymptomId> {
        if let Some(symptom) = self.pending_question().cloned() {
            if experienced && !self.symptoms_experienced.contains(&symptom) {
                self.symptoms_experienced.push(symptom);
            }
            self.current_symptom_index += 1;
        }
        self.pending_question()
    }

    pub(crate) fn touch(&mut self) {
        self.touch_at(Timestamp::now());
    }

    pub(crate) fn touch_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
