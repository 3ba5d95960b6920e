use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::{AssessmentCategory, HeroAiQuestion};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("question {0} was not answered")]
    Unanswered(Uuid),

    #[error("answer given for unknown question {0}")]
    UnknownQuestion(Uuid),

    #[error("question {0} has no option with key '{1}'")]
    UnknownOption(Uuid, String),

    #[error("question {0} carries malformed options")]
    MalformedOptions(Uuid),
}

#[derive(Debug, Deserialize)]
struct QuestionOption {
    key: String,
    #[allow(unused)]
    label: String,
    #[serde(rename = "trait")]
    trait_key: String,
}

/// Scores one completed run. Every option of a choice question is tagged
/// with a trait key; a trait's score in its category is the percentage of
/// that category's questions whose chosen option carries the trait, rounded
/// to the nearest integer. The wizard is linear with no skip logic, so every
/// active choice question must be answered.
pub fn score_answers(
    questions: &[HeroAiQuestion],
    answers: &HashMap<Uuid, String>,
) -> Result<HashMap<AssessmentCategory, serde_json::Value>, ScoringError> {
    let mut totals: HashMap<AssessmentCategory, u32> = HashMap::new();
    let mut tallies: HashMap<AssessmentCategory, BTreeMap<String, u32>> = HashMap::new();
    let mut known_ids: Vec<Uuid> = Vec::with_capacity(questions.len());

    for question in questions.iter().filter(|q| q.category.is_choice()) {
        known_ids.push(question.id);

        let options: Vec<QuestionOption> = question
            .options
            .as_ref()
            .and_then(|raw| serde_json::from_value(raw.clone()).ok())
            .ok_or(ScoringError::MalformedOptions(question.id))?;

        let chosen = answers
            .get(&question.id)
            .ok_or(ScoringError::Unanswered(question.id))?;

        let option = options
            .iter()
            .find(|o| o.key == *chosen)
            .ok_or_else(|| ScoringError::UnknownOption(question.id, chosen.clone()))?;

        *totals.entry(question.category).or_default() += 1;
        *tallies
            .entry(question.category)
            .or_default()
            .entry(option.trait_key.clone())
            .or_default() += 1;

        // Traits that were never chosen still appear with a zero score
        for o in &options {
            tallies
                .entry(question.category)
                .or_default()
                .entry(o.trait_key.clone())
                .or_default();
        }
    }

    if let Some(extra) = answers.keys().find(|id| !known_ids.contains(id)) {
        return Err(ScoringError::UnknownQuestion(*extra));
    }

    let mut scores = HashMap::new();
    for (category, traits) in tallies {
        let total = totals.get(&category).copied().unwrap_or(0);
        let percentages: serde_json::Map<String, serde_json::Value> = traits
            .into_iter()
            .map(|(trait_key, count)| {
                let percent = if total == 0 {
                    0
                } else {
                    ((count as f64 / total as f64) * 100.0).round() as u32
                };
                (trait_key, serde_json::Value::from(percent))
            })
            .collect();
        scores.insert(category, serde_json::Value::Object(percentages));
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(category: AssessmentCategory, traits: &[&str]) -> HeroAiQuestion {
        let options: Vec<_> = traits
            .iter()
            .enumerate()
            .map(|(i, t)| json!({"key": format!("opt{i}"), "label": format!("Option {i}"), "trait": t}))
            .collect();
        HeroAiQuestion {
            id: Uuid::new_v4(),
            category,
            question: "Which fits you best?".to_string(),
            options: Some(json!(options)),
            position: 1,
            is_active: true,
        }
    }

    fn answer(questions: &[HeroAiQuestion], picks: &[usize]) -> HashMap<Uuid, String> {
        questions
            .iter()
            .zip(picks)
            .map(|(q, pick)| (q.id, format!("opt{pick}")))
            .collect()
    }

    #[test]
    fn percentages_sum_from_chosen_traits() {
        let vak = ["visual", "auditory", "kinesthetic"];
        let questions = vec![
            question(AssessmentCategory::Vak, &vak),
            question(AssessmentCategory::Vak, &vak),
            question(AssessmentCategory::Vak, &vak),
            question(AssessmentCategory::Vak, &vak),
        ];
        // three visual picks, one auditory
        let answers = answer(&questions, &[0, 0, 0, 1]);

        let scores = score_answers(&questions, &answers).unwrap();
        let vak_scores = &scores[&AssessmentCategory::Vak];
        assert_eq!(vak_scores["visual"], 75);
        assert_eq!(vak_scores["auditory"], 25);
        assert_eq!(vak_scores["kinesthetic"], 0);
    }

    #[test]
    fn thirds_round_to_nearest() {
        let disc = ["dominance", "influence", "steadiness"];
        let questions = vec![
            question(AssessmentCategory::Disc, &disc),
            question(AssessmentCategory::Disc, &disc),
            question(AssessmentCategory::Disc, &disc),
        ];
        let answers = answer(&questions, &[0, 1, 2]);

        let scores = score_answers(&questions, &answers).unwrap();
        let disc_scores = &scores[&AssessmentCategory::Disc];
        assert_eq!(disc_scores["dominance"], 33);
        assert_eq!(disc_scores["influence"], 33);
        assert_eq!(disc_scores["steadiness"], 33);
    }

    #[test]
    fn categories_score_independently() {
        let questions = vec![
            question(AssessmentCategory::Vak, &["visual", "auditory"]),
            question(AssessmentCategory::Riasec, &["realistic", "artistic"]),
        ];
        let answers = answer(&questions, &[0, 1]);

        let scores = score_answers(&questions, &answers).unwrap();
        assert_eq!(scores[&AssessmentCategory::Vak]["visual"], 100);
        assert_eq!(scores[&AssessmentCategory::Riasec]["artistic"], 100);
        assert_eq!(scores[&AssessmentCategory::Riasec]["realistic"], 0);
    }

    #[test]
    fn missing_answer_is_rejected() {
        let questions = vec![
            question(AssessmentCategory::Vak, &["visual", "auditory"]),
            question(AssessmentCategory::Vak, &["visual", "auditory"]),
        ];
        let answers = answer(&questions[..1], &[0]);

        assert!(matches!(
            score_answers(&questions, &answers),
            Err(ScoringError::Unanswered(_))
        ));
    }

    #[test]
    fn unknown_option_key_is_rejected() {
        let questions = vec![question(AssessmentCategory::Vak, &["visual", "auditory"])];
        let mut answers = HashMap::new();
        answers.insert(questions[0].id, "opt9".to_string());

        assert!(matches!(
            score_answers(&questions, &answers),
            Err(ScoringError::UnknownOption(_, _))
        ));
    }

    #[test]
    fn stray_answer_ids_are_rejected() {
        let questions = vec![question(AssessmentCategory::Vak, &["visual", "auditory"])];
        let mut answers = answer(&questions, &[0]);
        answers.insert(Uuid::new_v4(), "opt0".to_string());

        assert!(matches!(
            score_answers(&questions, &answers),
            Err(ScoringError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn mission_prompts_are_not_scored() {
        let mut mission = question(AssessmentCategory::Mission, &[]);
        mission.options = None;
        let choice = question(AssessmentCategory::Vak, &["visual", "auditory"]);
        let answers = answer(std::slice::from_ref(&choice), &[0]);

        let scores = score_answers(&[mission, choice], &answers).unwrap();
        assert!(!scores.contains_key(&AssessmentCategory::Mission));
    }
}
