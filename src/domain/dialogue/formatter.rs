//! Response formatter - renders engine decisions as the text sent to the user.
//!
//! Pure functions only. Markup conventions understood by the chat front end:
//! `**…**` for emphasis, `<br>` between segments, `<ol><li>…</li></ol>` for
//! precautions. Symptom and disease names are shown with underscores as spaces.

use super::errors::{DialogueError, InputField};
use super::report::{DiagnosisReport, ReportBasis};
use crate::domain::foundation::{DiseaseId, SymptomId};

const LINE_BREAK: &str = "<br>";
const SAFETY_DISCLAIMER: &str = "**Consult a nearby doctor if pain persists or symptoms worsen.**";
const RESTART_HINT: &str = "Type **start** to begin a new session.";

/// Renders every reply the dialogue can produce.
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn greeting() -> String {
        "Hello! I am the Healthcare Bot 🤖. Before we begin, **What is your name?**".to_string()
    }

    pub fn restarted() -> String {
        format!("Starting a new session. {}", Self::greeting())
    }

    pub fn ask_age(name: &str) -> String {
        format!("Thank you, {}. **What is your age**? (Please enter a number)", name)
    }

    pub fn ask_primary_symptom(age: i64) -> String {
        format!(
            "Got it, {} years old. Please **enter the main symptom** you are experiencing.",
            age
        )
    }

    /// Zero-indexed menu of candidate symptoms, in the order given.
    pub fn symptom_menu(options: &[SymptomId]) -> String {
        let items = options
            .iter()
            .enumerate()
            .map(|(i, symptom)| format!("{}) {}", i, symptom.display_name()))
            .collect::<Vec<_>>()
            .join(LINE_BREAK);
        format!(
            "I found multiple matches. Please **select the one you meant (0 - {})**:{}{}",
            options.len().saturating_sub(1),
            LINE_BREAK,
            items
        )
    }

    /// Days prompt after a unique match.
    pub fn ask_days_after_match(symptom: &SymptomId) -> String {
        format!("Understood, **{}**. {}", symptom.display_name(), DAYS_QUESTION)
    }

    /// Days prompt after a menu selection.
    pub fn ask_days_after_selection(symptom: &SymptomId) -> String {
        format!("Got it: **{}**. {}", symptom.display_name(), DAYS_QUESTION)
    }

    pub fn first_related_question(symptom: &SymptomId) -> String {
        format!(
            "Thank you. Now, are you experiencing any related symptoms? For example, are you experiencing **{}**? (Yes/No)",
            symptom.display_name()
        )
    }

    pub fn next_related_question(symptom: &SymptomId) -> String {
        format!(
            "Next: Are you also experiencing **{}**? (Yes/No)",
            symptom.display_name()
        )
    }

    pub fn session_complete() -> String {
        "Session complete. Please type **start** to begin a new session.".to_string()
    }

    pub fn internal_error() -> String {
        "Sorry, something went wrong on our side. Please send your last answer again.".to_string()
    }

    /// Re-prompt for a rejected message.
    ///
    /// `pending` is the yes/no question still waiting for an answer, if any.
    pub fn reprompt(error: &DialogueError, pending: Option<&SymptomId>) -> String {
        match error {
            DialogueError::Validation { field, .. } => match field {
                InputField::Name => "Please enter your name to start.".to_string(),
                InputField::Age => {
                    "Invalid input. Please enter your age as **a valid number**.".to_string()
                }
                InputField::SymptomSelection => {
                    "Please enter a valid number for your selection.".to_string()
                }
                InputField::Days => {
                    "Invalid input. Please enter **only a number** for the days (e.g., 5)."
                        .to_string()
                }
                InputField::YesNoAnswer => match pending {
                    Some(symptom) => format!(
                        "Please answer with **Yes** or **No**. Are you experiencing **{}**?",
                        symptom.display_name()
                    ),
                    None => "Please answer with **Yes** or **No**.".to_string(),
                },
            },
            DialogueError::NoMatch { .. } => {
                "I couldn't find that symptom. Please enter a valid symptom name.".to_string()
            }
            DialogueError::SelectionOutOfRange { .. } => {
                "Invalid selection. Please enter the number corresponding to the symptom."
                    .to_string()
            }
            DialogueError::InvalidTransition(_) | DialogueError::IncompleteSession { .. } => {
                Self::internal_error()
            }
        }
    }

    /// Final report: summary, descriptions, precautions, disclaimer, restart hint.
    pub fn conclusion(report: &DiagnosisReport) -> String {
        let mut reply = match report.basis() {
            ReportBasis::PrimarySymptom => Self::single_prediction_body(report),
            ReportBasis::AllSymptoms => Self::reconciled_body(report),
        };
        reply.push_str(&Self::precaution_list(report.precautions()));
        reply.push_str(&format!("{0}{0}{1}", LINE_BREAK, SAFETY_DISCLAIMER));
        reply.push_str(&format!("{0}{0}{1}", LINE_BREAK, RESTART_HINT));
        reply
    }

    fn single_prediction_body(report: &DiagnosisReport) -> String {
        let mut body = String::new();
        for finding in report.findings() {
            body.push_str(&format!(
                "Based on the symptom you gave, I predict {}.{1}{1}Description: {2}{1}{1}",
                emphasize(&finding.disease),
                LINE_BREAK,
                finding.description.replace('_', " ")
            ));
        }
        body
    }

    fn reconciled_body(report: &DiagnosisReport) -> String {
        let names = report
            .diseases()
            .map(emphasize)
            .collect::<Vec<_>>()
            .join(" or ");
        let mut body = format!(
            "It might not be that bad but you should take precautions.{0}You may have {1}.{0}{0}Description:{0}",
            LINE_BREAK, names
        );
        for finding in report.findings() {
            body.push_str(&format!(
                "{}: {}{2}{2}",
                emphasize(&finding.disease),
                finding.description.replace('_', " "),
                LINE_BREAK
            ));
        }
        body
    }

    fn precaution_list(precautions: &[String]) -> String {
        let items: String = precautions
            .iter()
            .map(|p| format!("<li>{}</li>", p.replace('_', " ")))
            .collect();
        format!("Take the following measures:<ol>{}</ol>.", items)
    }
}

const DAYS_QUESTION: &str =
    "From how many **days** have you been experiencing this? (Please enter **just the number**, e.g., 5)";

fn emphasize(disease: &DiseaseId) -> String {
    format!("**{}**", disease.display_name())
}
