//! Dialogue engine - applies one user message to one session.
//!
//! Each call works on a copy of the session. On success the copy becomes
//! the new snapshot; on any error the copy is discarded and the user gets a
//! re-prompt, so a rejected message never changes stored state.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::errors::{DialogueError, InputField};
use super::formatter::ResponseFormatter;
use super::input::{is_start_command, parse_integer, parse_name, parse_yes_no};
use super::report::DiagnosisReport;
use super::session::Session;
use super::state::DialogueState;
use crate::domain::foundation::{DiseaseId, SymptomId, Timestamp};
use crate::ports::{DiagnosisOracle, SymptomMatcher};

/// Tunables for the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueSettings {
    /// Questions asked from the vocabulary when related-symptom lookup fails.
    pub fallback_question_limit: usize,
    /// Shortest accepted user name, in characters.
    pub min_name_length: usize,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            fallback_question_limit: 10,
            min_name_length: 2,
        }
    }
}

/// Outcome of one message: the session to persist and the reply to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub session: Session,
    pub reply: String,
}

/// The conversation state machine.
pub struct DialogueEngine {
    oracle: Arc<dyn DiagnosisOracle>,
    matcher: Arc<dyn SymptomMatcher>,
    settings: DialogueSettings,
}

impl DialogueEngine {
    pub fn new(oracle: Arc<dyn DiagnosisOracle>, matcher: Arc<dyn SymptomMatcher>) -> Self {
        Self {
            oracle,
            matcher,
            settings: DialogueSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DialogueSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &DialogueSettings {
        &self.settings
    }

    /// Applies `message` to `session` and returns the next snapshot.
    ///
    /// Never fails: rejected input yields the unchanged session plus a
    /// re-prompt for whatever is pending.
    pub fn handle(&self, session: &Session, message: &str) -> Turn {
        let message = message.trim();
        let mut next = session.clone();

        match self.step(&mut next, message) {
            Ok(reply) => {
                if next.state() != session.state() {
                    info!(from = ?session.state(), to = ?next.state(), "Dialogue advanced");
                }
                next.touch();
                Turn {
                    session: next,
                    reply,
                }
            }
            Err(err) => {
                if err.is_user_error() {
                    debug!(state = ?session.state(), error = %err, "Re-prompting");
                } else {
                    error!(state = ?session.state(), error = %err, "Dialogue step failed");
                }
                Turn {
                    session: session.clone(),
                    reply: ResponseFormatter::reprompt(&err, session.pending_question()),
                }
            }
        }
    }

    fn step(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        match session.state() {
            DialogueState::GetName => self.on_name(session, message),
            DialogueState::GetAge => self.on_age(session, message),
            DialogueState::GetSymptom => self.on_symptom(session, message),
            DialogueState::GetSymptomSelection => self.on_selection(session, message),
            DialogueState::GetDays => self.on_days(session, message),
            DialogueState::GetOtherSymptoms => self.on_related_answer(session, message),
            DialogueState::Closed => self.on_closed(session, message),
        }
    }

    fn on_name(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        let name = parse_name(message, self.settings.min_name_length)?;
        session.advance(DialogueState::GetAge)?;
        let reply = ResponseFormatter::ask_age(&name);
        session.record_name(name);
        Ok(reply)
    }

    fn on_age(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        let age = parse_integer(message, InputField::Age)?;
        session.advance(DialogueState::GetSymptom)?;
        session.record_age(age);
        Ok(ResponseFormatter::ask_primary_symptom(age))
    }

    fn on_symptom(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        let mut candidates = self.matcher.find_matches(message, self.oracle.vocabulary());
        debug!(input = message, candidates = candidates.len(), "Resolved symptom text");

        match candidates.len() {
            0 => Err(DialogueError::no_match(message)),
            1 => {
                let symptom = candidates.remove(0);
                session.advance(DialogueState::GetDays)?;
                let reply = ResponseFormatter::ask_days_after_match(&symptom);
                session.record_primary_symptom(symptom);
                Ok(reply)
            }
            _ => {
                session.advance(DialogueState::GetSymptomSelection)?;
                let reply = ResponseFormatter::symptom_menu(&candidates);
                session.offer_symptom_options(candidates);
                Ok(reply)
            }
        }
    }

    fn on_selection(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        let index = parse_integer(message, InputField::SymptomSelection)?;
        let selected = session.select_symptom_option(index)?;
        session.advance(DialogueState::GetDays)?;
        Ok(ResponseFormatter::ask_days_after_selection(&selected))
    }

    /// Records the duration, computes the preliminary diagnosis, and either
    /// opens the yes/no loop or concludes right away when nothing is left to ask.
    fn on_days(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        let days = parse_integer(message, InputField::Days)?;
        let primary = session
            .primary_symptom()
            .cloned()
            .ok_or(DialogueError::incomplete("primary symptom"))?;

        let initial = self.oracle.predict(std::slice::from_ref(&primary));
        let questions = match self.oracle.related_symptoms(&initial) {
            Ok(related) => related,
            Err(err) => {
                warn!(disease = %initial, error = %err, "Related symptom lookup failed, using fallback questions");
                self.fallback_questions(session.symptoms_experienced())
            }
        };

        session.record_days(days);
        session.begin_questioning(initial.clone(), questions)?;
        debug!(
            disease = %initial,
            questions = session.symptoms_to_ask().len(),
            "Preliminary diagnosis recorded"
        );

        match session.pending_question().cloned() {
            Some(first) => {
                session.advance(DialogueState::GetOtherSymptoms)?;
                Ok(ResponseFormatter::first_related_question(&first))
            }
            None => {
                session.advance(DialogueState::Closed)?;
                let report = DiagnosisReport::primary_only(self.oracle.as_ref(), &initial);
                Ok(ResponseFormatter::conclusion(&report))
            }
        }
    }

    fn on_related_answer(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<String, DialogueError> {
        if session.pending_question().is_none() {
            return self.conclude(session);
        }

        let experienced = parse_yes_no(message)?;
        match session.answer_pending(experienced).cloned() {
            Some(next) => Ok(ResponseFormatter::next_related_question(&next)),
            None => self.conclude(session),
        }
    }

    fn on_closed(&self, session: &mut Session, message: &str) -> Result<String, DialogueError> {
        if !is_start_command(message) {
            return Ok(ResponseFormatter::session_complete());
        }
        session.advance(DialogueState::GetName)?;
        *session = Session::new();
        Ok(ResponseFormatter::restarted())
    }

    /// Runs the final prediction over every confirmed symptom and closes.
    fn conclude(&self, session: &mut Session) -> Result<String, DialogueError> {
        let initial: DiseaseId = session
            .initial_prediction()
            .cloned()
            .ok_or(DialogueError::incomplete("initial prediction"))?;
        let final_prediction = self.oracle.predict(session.symptoms_experienced());
        session.advance(DialogueState::Closed)?;

        info!(
            initial = %initial,
            final_prediction = %final_prediction,
            symptoms = session.symptoms_experienced().len(),
            duration_secs = Timestamp::now().seconds_since(session.started_at()),
            "Diagnosis concluded"
        );
        let report = DiagnosisReport::reconcile(self.oracle.as_ref(), &initial, &final_prediction);
        Ok(ResponseFormatter::conclusion(&report))
    }

    /// First vocabulary entries the user has not already reported.
    fn fallback_questions(&self, experienced: &[SymptomId]) -> Vec<SymptomId> {
        self.oracle
            .vocabulary()
            .iter()
            .filter(|symptom| !experienced.contains(symptom))
            .take(self.settings.fallback_question_limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::OracleError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ───────────────────────────────────────────────────────────────
    // Test doubles
    // ───────────────────────────────────────────────────────────────

    fn symptom(id: &str) -> SymptomId {
        SymptomId::new(id).unwrap()
    }

    fn disease(id: &str) -> DiseaseId {
        DiseaseId::new(id).unwrap()
    }

    /// Oracle with scripted predictions keyed by the exact symptom list.
    struct ScriptedOracle {
        vocabulary: Vec<SymptomId>,
        predictions: HashMap<Vec<SymptomId>, DiseaseId>,
        related: HashMap<DiseaseId, Vec<SymptomId>>,
        predict_calls: Mutex<Vec<Vec<SymptomId>>>,
    }

    impl ScriptedOracle {
        fn new(vocabulary: &[&str]) -> Self {
            Self {
                vocabulary: vocabulary.iter().map(|s| symptom(s)).collect(),
                predictions: HashMap::new(),
                related: HashMap::new(),
                predict_calls: Mutex::new(Vec::new()),
            }
        }

        fn predicting(mut self, symptoms: &[&str], result: &str) -> Self {
            self.predictions
                .insert(symptoms.iter().map(|s| symptom(s)).collect(), disease(result));
            self
        }

        fn with_related(mut self, disease_id: &str, related: &[&str]) -> Self {
            self.related
                .insert(disease(disease_id), related.iter().map(|s| symptom(s)).collect());
            self
        }
    }

    impl DiagnosisOracle for ScriptedOracle {
        fn vocabulary(&self) -> &[SymptomId] {
            &self.vocabulary
        }

        fn predict(&self, symptoms: &[SymptomId]) -> DiseaseId {
            self.predict_calls.lock().unwrap().push(symptoms.to_vec());
            self.predictions
                .get(symptoms)
                .cloned()
                .unwrap_or_else(|| disease("Unscripted"))
        }

        fn related_symptoms(&self, disease: &DiseaseId) -> Result<Vec<SymptomId>, OracleError> {
            self.related
                .get(disease)
                .cloned()
                .ok_or_else(|| OracleError::UnknownDisease(disease.clone()))
        }

        fn description(&self, disease: &DiseaseId) -> Option<String> {
            Some(format!("{} description", disease))
        }

        fn precautions(&self, disease: &DiseaseId) -> Vec<String> {
            vec![format!("{} precaution", disease)]
        }
    }

    /// Matcher that returns vocabulary entries containing the text.
    struct ContainsMatcher;

    impl SymptomMatcher for ContainsMatcher {
        fn find_matches(&self, text: &str, vocabulary: &[SymptomId]) -> Vec<SymptomId> {
            let needle = text.to_lowercase().replace(' ', "_");
            if needle.is_empty() {
                return vec![];
            }
            vocabulary
                .iter()
                .filter(|s| s.as_str().contains(&needle))
                .cloned()
                .collect()
        }
    }

    fn engine(oracle: ScriptedOracle) -> DialogueEngine {
        DialogueEngine::new(Arc::new(oracle), Arc::new(ContainsMatcher))
    }

    fn standard_oracle() -> ScriptedOracle {
        ScriptedOracle::new(&["cough", "fatigue", "vomiting", "itching", "skin_rash", "high_fever"])
            .predicting(&["cough"], "Bronchitis")
            .predicting(&["cough", "fatigue"], "Tuberculosis")
            .with_related("Bronchitis", &["cough", "fatigue", "vomiting"])
    }

    /// Feeds messages in order, returning the final turn.
    fn drive(engine: &DialogueEngine, messages: &[&str]) -> Turn {
        let mut turn = Turn {
            session: Session::new(),
            reply: String::new(),
        };
        for message in messages {
            turn = engine.handle(&turn.session, message);
        }
        turn
    }

    // ───────────────────────────────────────────────────────────────
    // Name and age
    // ───────────────────────────────────────────────────────────────

    mod profile {
        use super::*;

        #[test]
        fn valid_name_advances_and_is_echoed() {
            let turn = drive(&engine(standard_oracle()), &["Al"]);
            assert_eq!(turn.session.state(), DialogueState::GetAge);
            assert_eq!(turn.session.user_name(), Some("Al"));
            assert!(turn.reply.contains("Al"));
        }

        #[test]
        fn short_name_is_rejected_without_progress() {
            let turn = drive(&engine(standard_oracle()), &["A"]);
            assert_eq!(turn.session.state(), DialogueState::GetName);
            assert_eq!(turn.reply, "Please enter your name to start.");
        }

        #[test]
        fn non_numeric_age_leaves_session_untouched() {
            let engine = engine(standard_oracle());
            let before = drive(&engine, &["Al"]).session;
            let turn = engine.handle(&before, "abc");
            assert_eq!(turn.session, before);
            assert!(turn.reply.contains("valid number"));
        }

        #[test]
        fn numeric_age_is_stored() {
            let turn = drive(&engine(standard_oracle()), &["Al", "34"]);
            assert_eq!(turn.session.state(), DialogueState::GetSymptom);
            assert_eq!(turn.session.user_age(), Some(34));
            assert!(turn.reply.contains("34 years old"));
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Symptom resolution
    // ───────────────────────────────────────────────────────────────

    mod resolution {
        use super::*;

        #[test]
        fn unique_match_goes_straight_to_days() {
            let turn = drive(&engine(standard_oracle()), &["Al", "34", "cough"]);
            assert_eq!(turn.session.state(), DialogueState::GetDays);
            assert_eq!(turn.session.symptoms_experienced(), &[symptom("cough")]);
        }

        #[test]
        fn no_match_reprompts() {
            let turn = drive(&engine(standard_oracle()), &["Al", "34", "headache"]);
            assert_eq!(turn.session.state(), DialogueState::GetSymptom);
            assert!(turn.session.symptoms_experienced().is_empty());
            assert!(turn.reply.contains("couldn't find that symptom"));
        }

        #[test]
        fn ambiguous_text_opens_menu_in_matcher_order() {
            let oracle = ScriptedOracle::new(&["itching", "skin_rash", "skin_peeling"]);
            let turn = drive(&engine(oracle), &["Al", "34", "skin"]);
            assert_eq!(turn.session.state(), DialogueState::GetSymptomSelection);
            assert_eq!(
                turn.session.symptom_options(),
                &[symptom("skin_rash"), symptom("skin_peeling")]
            );
            assert!(turn.reply.contains("0) skin rash<br>1) skin peeling"));
        }

        #[test]
        fn selecting_from_menu_sets_primary_symptom() {
            let oracle = ScriptedOracle::new(&["itching", "skin_rash", "skin_peeling"]);
            let turn = drive(&engine(oracle), &["Al", "34", "skin", "1"]);
            assert_eq!(turn.session.state(), DialogueState::GetDays);
            assert_eq!(turn.session.symptoms_experienced(), &[symptom("skin_peeling")]);
            assert!(turn.session.symptom_options().is_empty());
        }

        #[test]
        fn out_of_range_selection_keeps_menu() {
            let oracle = ScriptedOracle::new(&["skin_rash", "skin_peeling"]);
            let engine = engine(oracle);
            let before = drive(&engine, &["Al", "34", "skin"]).session;

            for bad in ["2", "-1", "99"] {
                let turn = engine.handle(&before, bad);
                assert_eq!(turn.session, before);
                assert!(turn.reply.starts_with("Invalid selection."));
            }
        }

        #[test]
        fn non_numeric_selection_reprompts() {
            let oracle = ScriptedOracle::new(&["skin_rash", "skin_peeling"]);
            let turn = drive(&engine(oracle), &["Al", "34", "skin", "rash"]);
            assert_eq!(turn.session.state(), DialogueState::GetSymptomSelection);
            assert_eq!(turn.reply, "Please enter a valid number for your selection.");
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Prediction bootstrap
    // ───────────────────────────────────────────────────────────────

    mod bootstrap {
        use super::*;

        #[test]
        fn days_start_loop_without_primary_symptom() {
            let turn = drive(&engine(standard_oracle()), &["Al", "34", "cough", "5"]);
            let session = &turn.session;
            assert_eq!(session.state(), DialogueState::GetOtherSymptoms);
            assert_eq!(session.num_days(), Some(5));
            assert_eq!(session.initial_prediction(), Some(&disease("Bronchitis")));
            assert_eq!(
                session.symptoms_to_ask(),
                &[symptom("fatigue"), symptom("vomiting")]
            );
            assert_eq!(session.current_symptom_index(), 0);
            assert!(turn.reply.contains("**fatigue**"));
        }

        #[test]
        fn non_numeric_days_do_not_predict() {
            let engine = engine(standard_oracle());
            let before = drive(&engine, &["Al", "34", "cough"]).session;
            let turn = engine.handle(&before, "five");
            assert_eq!(turn.session, before);
            assert!(turn.reply.contains("**only a number**"));
        }

        #[test]
        fn empty_related_list_concludes_in_same_request() {
            let oracle = ScriptedOracle::new(&["cough"])
                .predicting(&["cough"], "Common Cold")
                .with_related("Common Cold", &["cough"]);
            let turn = drive(&engine(oracle), &["Al", "34", "cough", "5"]);

            assert_eq!(turn.session.state(), DialogueState::Closed);
            assert!(turn
                .reply
                .starts_with("Based on the symptom you gave, I predict **Common Cold**."));
            assert!(turn.reply.contains("Common Cold description"));
            assert!(turn.reply.contains("<li>Common Cold precaution</li>"));
            assert!(!turn.reply.contains("(Yes/No)"));
        }

        #[test]
        fn lookup_failure_falls_back_to_unused_vocabulary() {
            let oracle = ScriptedOracle::new(&["a", "b", "c", "d"]).predicting(&["b"], "Unindexed");
            let engine = engine(oracle).with_settings(DialogueSettings {
                fallback_question_limit: 2,
                ..Default::default()
            });
            let turn = drive(&engine, &["Al", "34", "b", "3"]);

            assert_eq!(turn.session.state(), DialogueState::GetOtherSymptoms);
            assert_eq!(turn.session.symptoms_to_ask(), &[symptom("a"), symptom("c")]);
        }

        #[test]
        fn fallback_on_single_word_vocabulary_concludes() {
            let oracle = ScriptedOracle::new(&["cough"]).predicting(&["cough"], "Unindexed");
            let turn = drive(&engine(oracle), &["Al", "34", "cough", "2"]);
            assert_eq!(turn.session.state(), DialogueState::Closed);
            assert!(turn.reply.contains("**Unindexed**"));
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Yes/no loop and conclusion
    // ───────────────────────────────────────────────────────────────

    mod related_loop {
        use super::*;

        #[test]
        fn invalid_answer_repeats_same_question() {
            let engine = engine(standard_oracle());
            let before = drive(&engine, &["Al", "34", "cough", "5"]).session;
            let turn = engine.handle(&before, "sometimes");
            assert_eq!(turn.session, before);
            assert_eq!(
                turn.reply,
                "Please answer with **Yes** or **No**. Are you experiencing **fatigue**?"
            );
        }

        #[test]
        fn yes_then_no_confirms_only_first() {
            let oracle = standard_oracle();
            let engine = engine(oracle);
            let mid = drive(&engine, &["Al", "34", "cough", "5", "YES"]);
            assert_eq!(mid.session.state(), DialogueState::GetOtherSymptoms);
            assert_eq!(mid.reply, "Next: Are you also experiencing **vomiting**? (Yes/No)");

            let turn = engine.handle(&mid.session, "no");
            assert_eq!(turn.session.state(), DialogueState::Closed);
            assert_eq!(
                turn.session.symptoms_experienced(),
                &[symptom("cough"), symptom("fatigue")]
            );
            assert!(turn.reply.contains("You may have **Bronchitis** or **Tuberculosis**."));
            assert!(turn.reply.contains("<li>Bronchitis precaution</li>"));
            assert!(!turn.reply.contains("Tuberculosis precaution"));
        }

        #[test]
        fn conclusion_predicts_from_all_confirmed_symptoms() {
            let oracle = Arc::new(standard_oracle());
            let engine = DialogueEngine::new(oracle.clone(), Arc::new(ContainsMatcher));
            drive(&engine, &["Al", "34", "cough", "5", "yes", "no"]);

            let calls = oracle.predict_calls.lock().unwrap();
            assert_eq!(
                calls.as_slice(),
                &[vec![symptom("cough")], vec![symptom("cough"), symptom("fatigue")]]
            );
        }

        #[test]
        fn agreeing_predictions_name_one_disease() {
            let turn = drive(&engine(standard_oracle()), &["Al", "34", "cough", "5", "no", "no"]);
            assert!(turn.reply.contains("You may have **Bronchitis**."));
            assert!(!turn.reply.contains("** or **"));
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Closed sessions
    // ───────────────────────────────────────────────────────────────

    mod closed {
        use super::*;

        fn closed_session(engine: &DialogueEngine) -> Session {
            drive(engine, &["Al", "34", "cough", "5", "no", "no"]).session
        }

        #[test]
        fn anything_but_start_keeps_session_closed() {
            let engine = engine(standard_oracle());
            let closed = closed_session(&engine);
            for message in ["hello", "yes", "restart", ""] {
                let turn = engine.handle(&closed, message);
                assert_eq!(turn.session.state(), DialogueState::Closed);
                assert_eq!(turn.session.symptoms_experienced(), closed.symptoms_experienced());
                assert_eq!(turn.reply, ResponseFormatter::session_complete());
            }
        }

        #[test]
        fn start_resets_every_field() {
            let engine = engine(standard_oracle());
            let closed = closed_session(&engine);
            let turn = engine.handle(&closed, "Start");

            assert_eq!(turn.session.state(), DialogueState::GetName);
            assert!(turn.session.user_name().is_none());
            assert!(turn.session.symptoms_experienced().is_empty());
            assert!(turn.session.initial_prediction().is_none());
            assert!(turn.session.symptoms_to_ask().is_empty());
            assert_eq!(turn.reply, ResponseFormatter::restarted());
        }
    }
}
