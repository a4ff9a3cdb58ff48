//! Section completeness scoring.
//!
//! Two aggregation policies coexist: [`ScoringPolicy::Binary`] marks each
//! present section as filled or empty, [`ScoringPolicy::Fractional`] scores
//! the share of filled entries inside each section. They disagree on empty
//! sequences (counted as empty vs. skipped), which is kept as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::content::{ContentDetector, is_real_text};
use crate::record::{ProjectRecord, SectionKey, Value};

const READINESS_LEVELS: [&str; 4] = ["TRL", "SRL", "ORL", "LRL"];
const PROJECT_IDEA_TEXT_FIELDS: [&str; 5] = [
    "projectTitle",
    "projectAcronym",
    "mainAim",
    "stateOfTheArt",
    "proposedSolution",
];
const WORK_PACKAGE_LISTS: [&str; 3] = ["tasks", "milestones", "deliverables"];
const RISK_TEXT_FIELDS: [&str; 3] = ["title", "description", "mitigation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScoringPolicy {
    /// One point per present section that passes its section check.
    #[default]
    Binary,
    /// Fill ratio of the entries or fields inside each section.
    Fractional,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub section: SectionKey,
    /// 0.0..=1.0; always 0 or 1 under the binary policy.
    pub ratio: f64,
    /// Whether the section contributed to the denominator.
    pub counted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub policy: ScoringPolicy,
    pub percentage: u8,
    pub sections: Vec<SectionScore>,
}

#[derive(Debug, Clone, Default)]
pub struct CompletenessScorer {
    detector: ContentDetector,
    policy: ScoringPolicy,
}

impl CompletenessScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            detector: ContentDetector::default(),
            policy,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let detector = match &config.skip_fields {
            Some(fields) => ContentDetector::with_skip_fields(fields.iter().cloned()),
            None => ContentDetector::default(),
        };
        Self {
            detector,
            policy: config.policy,
        }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn detector(&self) -> &ContentDetector {
        &self.detector
    }

    pub fn score(&self, record: &ProjectRecord) -> u8 {
        self.report(record).percentage
    }

    pub fn report(&self, record: &ProjectRecord) -> CompletenessReport {
        let mut sections = Vec::new();
        for (key, data) in record.present_sections() {
            let score = match self.policy {
                ScoringPolicy::Binary => SectionScore {
                    section: key,
                    ratio: if self.section_is_filled(key, data) { 1.0 } else { 0.0 },
                    counted: true,
                },
                ScoringPolicy::Fractional => match self.section_fill_ratio(data) {
                    Some(ratio) => SectionScore {
                        section: key,
                        ratio,
                        counted: true,
                    },
                    None => SectionScore {
                        section: key,
                        ratio: 0.0,
                        counted: false,
                    },
                },
            };
            debug!(
                section = key.as_str(),
                ratio = score.ratio,
                counted = score.counted,
                "scored section"
            );
            sections.push(score);
        }

        let counted = sections.iter().filter(|score| score.counted).count();
        let filled: f64 = sections
            .iter()
            .filter(|score| score.counted)
            .map(|score| score.ratio)
            .sum();
        let percentage = percentage_of(filled, counted);
        debug!(policy = ?self.policy, counted, percentage, "completeness computed");

        CompletenessReport {
            policy: self.policy,
            percentage,
            sections,
        }
    }

    /// Binary check for one section.
    pub fn section_is_filled(&self, key: SectionKey, data: &Value) -> bool {
        match key {
            SectionKey::ProblemAnalysis => self.problem_analysis_filled(data),
            SectionKey::ProjectIdea => self.project_idea_filled(data),
            SectionKey::ProjectManagement => {
                data.get("description").is_some_and(is_real_text)
                    || data
                        .get("structure")
                        .is_some_and(|structure| self.detector.has_content(structure))
            }
            SectionKey::Activities => entries(data).any(work_package_filled),
            SectionKey::Risks => entries(data).any(|risk| {
                RISK_TEXT_FIELDS
                    .iter()
                    .any(|field| risk.get(field).is_some_and(is_real_text))
            }),
            SectionKey::GeneralObjectives
            | SectionKey::SpecificObjectives
            | SectionKey::Outputs
            | SectionKey::Outcomes
            | SectionKey::Impacts
            | SectionKey::Kers => self.detector.has_content(data),
        }
    }

    /// Fractional fill ratio for one section; `None` when the section is an
    /// empty sequence and should not be counted at all.
    pub fn section_fill_ratio(&self, data: &Value) -> Option<f64> {
        match data {
            Value::Sequence(items) if items.is_empty() => None,
            Value::Sequence(items) => {
                let filled = items
                    .iter()
                    .filter(|item| {
                        item.get("title").is_some_and(is_real_text)
                            || item.get("description").is_some_and(is_real_text)
                    })
                    .count();
                Some(filled as f64 / items.len() as f64)
            }
            Value::Mapping(map) => Some(self.mapping_fill_ratio(map)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    fn mapping_fill_ratio(&self, map: &BTreeMap<String, Value>) -> f64 {
        let eligible: Vec<&Value> = map
            .iter()
            .filter(|(key, _)| !self.detector.is_skipped(key))
            .map(|(_, value)| value)
            .collect();
        if eligible.is_empty() {
            return 1.0;
        }
        let filled = eligible.iter().filter(|value| loosely_filled(value)).count();
        filled as f64 / eligible.len() as f64
    }

    fn problem_analysis_filled(&self, data: &Value) -> bool {
        let core_problem = data.get("coreProblem");
        let core_text = ["title", "description"].iter().any(|field| {
            core_problem
                .and_then(|problem| problem.get(field))
                .is_some_and(is_real_text)
        });
        core_text
            || ["causes", "consequences"]
                .iter()
                .any(|field| data.get(field).is_some_and(|list| self.detector.has_content(list)))
    }

    fn project_idea_filled(&self, data: &Value) -> bool {
        let text = PROJECT_IDEA_TEXT_FIELDS
            .iter()
            .any(|field| data.get(field).is_some_and(is_real_text));
        let policies = data
            .get("policies")
            .is_some_and(|policies| self.detector.has_content(policies));
        let readiness = data.get("readinessLevels").is_some_and(|levels| {
            READINESS_LEVELS.iter().any(|name| {
                levels
                    .get(name)
                    .and_then(|entry| entry.get("level"))
                    .and_then(Value::as_f64)
                    .is_some_and(|level| level > 0.0)
            })
        });
        text || policies || readiness
    }
}

fn entries(data: &Value) -> impl Iterator<Item = &Value> {
    data.as_sequence().unwrap_or_default().iter()
}

fn work_package_filled(package: &Value) -> bool {
    package.get("title").is_some_and(is_real_text)
        || WORK_PACKAGE_LISTS.iter().any(|field| {
            package
                .get(field)
                .and_then(Value::as_sequence)
                .is_some_and(|list| !list.is_empty())
        })
}

fn loosely_filled(value: &Value) -> bool {
    match value {
        Value::String(_) => is_real_text(value),
        Value::Sequence(items) => !items.is_empty(),
        Value::Number(_) => true,
        Value::Mapping(map) => map.values().any(|member| !member.is_null()),
        Value::Null | Value::Bool(_) => false,
    }
}

fn percentage_of(filled: f64, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (filled / total as f64 * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProjectRecord {
        ProjectRecord::from_value(Value::from(value))
    }

    fn binary() -> CompletenessScorer {
        CompletenessScorer::new(ScoringPolicy::Binary)
    }

    fn fractional() -> CompletenessScorer {
        CompletenessScorer::new(ScoringPolicy::Fractional)
    }

    #[test]
    fn empty_record_scores_zero() {
        let empty = ProjectRecord::new();
        assert_eq!(binary().score(&empty), 0);
        assert_eq!(fractional().score(&empty), 0);
    }

    #[test]
    fn absent_sections_do_not_change_the_denominator() {
        let base = record(json!({
            "risks": [{"title": "Supplier delay"}],
            "outputs": [{"title": ""}]
        }));
        let with_null = record(json!({
            "risks": [{"title": "Supplier delay"}],
            "outputs": [{"title": ""}],
            "kers": null,
            "impacts": null
        }));
        assert_eq!(binary().score(&base), 50);
        assert_eq!(binary().score(&with_null), 50);
        assert_eq!(fractional().score(&base), fractional().score(&with_null));
    }

    #[test]
    fn readiness_level_counts_only_when_positive() {
        let scorer = binary();
        let null_level = json!({"readinessLevels": {"TRL": {"level": null, "justification": ""}}});
        let zero_level = json!({"readinessLevels": {"SRL": {"level": 0}}});
        let set_level = json!({"readinessLevels": {"LRL": {"level": 3}}});
        assert!(!scorer.section_is_filled(SectionKey::ProjectIdea, &Value::from(null_level)));
        assert!(!scorer.section_is_filled(SectionKey::ProjectIdea, &Value::from(zero_level)));
        assert!(scorer.section_is_filled(SectionKey::ProjectIdea, &Value::from(set_level)));
    }

    #[test]
    fn project_idea_text_and_policies() {
        let scorer = binary();
        let acronym = Value::from(json!({"projectAcronym": "GRIDX"}));
        let policies = Value::from(json!({"policies": [{"name": "Green Deal"}]}));
        let blank = Value::from(json!({"projectTitle": "  ", "policies": []}));
        assert!(scorer.section_is_filled(SectionKey::ProjectIdea, &acronym));
        assert!(scorer.section_is_filled(SectionKey::ProjectIdea, &policies));
        assert!(!scorer.section_is_filled(SectionKey::ProjectIdea, &blank));
    }

    #[test]
    fn problem_analysis_checks_core_problem_and_lists() {
        let scorer = binary();
        let core = Value::from(json!({"coreProblem": {"title": "Energy loss"}}));
        let causes = Value::from(json!({"coreProblem": {}, "causes": [{"description": "Old grid"}]}));
        let empty = Value::from(json!({"coreProblem": {"title": ""}, "consequences": []}));
        assert!(scorer.section_is_filled(SectionKey::ProblemAnalysis, &core));
        assert!(scorer.section_is_filled(SectionKey::ProblemAnalysis, &causes));
        assert!(!scorer.section_is_filled(SectionKey::ProblemAnalysis, &empty));
    }

    #[test]
    fn activities_accept_titles_or_non_empty_lists() {
        let scorer = binary();
        let titled = Value::from(json!([{"title": "WP1"}]));
        let tasks = Value::from(json!([{"title": "", "tasks": [{"id": "T1"}]}]));
        let bare = Value::from(json!([{"title": "", "tasks": [], "milestones": []}]));
        assert!(scorer.section_is_filled(SectionKey::Activities, &titled));
        assert!(scorer.section_is_filled(SectionKey::Activities, &tasks));
        assert!(!scorer.section_is_filled(SectionKey::Activities, &bare));
    }

    #[test]
    fn risks_ignore_enumerated_fields() {
        let scorer = binary();
        let enums_only = Value::from(json!([{"category": "technical", "likelihood": "high"}]));
        let mitigated = Value::from(json!([{"mitigation": "Dual sourcing"}]));
        assert!(!scorer.section_is_filled(SectionKey::Risks, &enums_only));
        assert!(scorer.section_is_filled(SectionKey::Risks, &mitigated));
    }

    #[test]
    fn project_management_uses_description_or_structure() {
        let scorer = binary();
        let structure = Value::from(json!({"description": "", "structure": {"coordinator": "Lead partner"}}));
        let nothing = Value::from(json!({"description": " ", "structure": {"id": "x"}}));
        assert!(scorer.section_is_filled(SectionKey::ProjectManagement, &structure));
        assert!(!scorer.section_is_filled(SectionKey::ProjectManagement, &nothing));
    }

    #[test]
    fn empty_sequence_is_asymmetric_between_policies() {
        let rec = record(json!({
            "outputs": [],
            "outcomes": [{"title": "Adoption"}]
        }));
        // Binary: 1 of 2 sections filled.
        assert_eq!(binary().score(&rec), 50);
        // Fractional: the empty sequence is skipped entirely.
        let report = fractional().report(&rec);
        assert_eq!(report.percentage, 100);
        assert!(!report.sections[0].counted);
    }

    #[test]
    fn fractional_sequence_ratio() {
        let rec = record(json!({
            "risks": [
                {"title": "A"},
                {"description": "B"},
                {"title": " ", "mitigation": "only mitigation"},
                {}
            ]
        }));
        assert_eq!(fractional().score(&rec), 50);
    }

    #[test]
    fn fractional_mapping_ratio_uses_loose_rule() {
        let scorer = fractional();
        let data = Value::from(json!({
            "id": "skipped",
            "description": "text",
            "budget": 0,
            "structure": {"lead": null},
            "partners": [],
            "flag": true
        }));
        // Eligible: description, budget, structure, partners, flag; filled: description, budget.
        assert_eq!(scorer.section_fill_ratio(&data), Some(0.4));
        let only_skipped = Value::from(json!({"id": "x", "updatedAt": "2024-01-01"}));
        assert_eq!(scorer.section_fill_ratio(&only_skipped), Some(1.0));
    }

    #[test]
    fn percentages_round_half_up() {
        assert_eq!(percentage_of(1.0, 3), 33);
        assert_eq!(percentage_of(2.0, 3), 67);
        assert_eq!(percentage_of(1.0, 8), 13);
        assert_eq!(percentage_of(0.0, 0), 0);
    }

    #[test]
    fn report_lists_sections_in_canonical_order() {
        let rec = record(json!({
            "kers": [{"title": "Platform"}],
            "problemAnalysis": {"coreProblem": {"title": "x"}},
            "risks": []
        }));
        let report = binary().report(&rec);
        let order: Vec<SectionKey> = report.sections.iter().map(|s| s.section).collect();
        assert_eq!(
            order,
            vec![SectionKey::ProblemAnalysis, SectionKey::Risks, SectionKey::Kers]
        );
        assert_eq!(report.percentage, 67);
    }

    #[test]
    fn config_skip_fields_reach_the_detector() {
        let config = ScoringConfig {
            policy: ScoringPolicy::Binary,
            skip_fields: Some(vec!["title".to_string()]),
        };
        let scorer = CompletenessScorer::from_config(&config);
        let rec = record(json!({"outputs": [{"title": "hidden"}]}));
        assert_eq!(scorer.score(&rec), 0);
    }
}
