//! Typed model for a validated analysis

use crate::error::{Result, ResumeLensError};
use serde::Serialize;
use std::fmt;

/// Immutable per-invocation value holding the two analysis inputs.
/// Discarded once the request completes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume_text: String, job_description: String) -> Result<Self> {
        if resume_text.trim().is_empty() {
            return Err(ResumeLensError::EmptyDocument);
        }
        if job_description.trim().is_empty() {
            return Err(ResumeLensError::MissingInput(
                "job description is empty".to_string(),
            ));
        }
        Ok(Self {
            resume_text,
            job_description,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AtsCompatibility {
    High,
    Medium,
    Low,
}

impl AtsCompatibility {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(AtsCompatibility::High),
            "medium" => Some(AtsCompatibility::Medium),
            "low" => Some(AtsCompatibility::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AtsCompatibility::High => "High",
            AtsCompatibility::Medium => "Medium",
            AtsCompatibility::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResumeLength {
    #[serde(rename = "Too Short")]
    TooShort,
    Optimal,
    #[serde(rename = "Too Long")]
    TooLong,
}

impl ResumeLength {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "too short" => Some(ResumeLength::TooShort),
            "optimal" => Some(ResumeLength::Optimal),
            "too long" => Some(ResumeLength::TooLong),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResumeLength::TooShort => "Too Short",
            ResumeLength::Optimal => "Optimal",
            ResumeLength::TooLong => "Too Long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToneOfLanguage {
    Professional,
    Casual,
    Neutral,
    Aggressive,
}

impl ToneOfLanguage {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "professional" => Some(ToneOfLanguage::Professional),
            "casual" => Some(ToneOfLanguage::Casual),
            "neutral" => Some(ToneOfLanguage::Neutral),
            "aggressive" => Some(ToneOfLanguage::Aggressive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToneOfLanguage::Professional => "Professional",
            ToneOfLanguage::Casual => "Casual",
            ToneOfLanguage::Neutral => "Neutral",
            ToneOfLanguage::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for AtsCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ResumeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ToneOfLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoftSkillsMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalProficiency {
    pub strong: Vec<String>,
    pub moderate: Vec<String>,
    pub weak_or_missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordsAnalysis {
    pub present_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequirementsCoverage {
    pub met_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceAlignment {
    pub aligned_experience: Vec<String>,
    pub missing_experience_areas: Vec<String>,
}

/// The validated analysis. Only ever constructed by the validator from a
/// payload that passed the full schema pass; there is no partially-filled
/// variant of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub overall_summary: String,
    pub resume_score: f32,
    pub ats_compatibility: AtsCompatibility,
    pub resume_length: ResumeLength,
    pub readability_score: f32,
    pub skills_match: SkillsMatch,
    pub soft_skills_match: SoftSkillsMatch,
    pub technical_proficiency: TechnicalProficiency,
    pub keywords_analysis: KeywordsAnalysis,
    pub job_requirements_coverage: JobRequirementsCoverage,
    pub experience_alignment: ExperienceAlignment,
    pub tone_of_language: ToneOfLanguage,
    pub formatting_issues: Vec<String>,
    pub grammar_issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trips_case_insensitively() {
        assert_eq!(AtsCompatibility::from_label("HIGH"), Some(AtsCompatibility::High));
        assert_eq!(AtsCompatibility::from_label(" medium "), Some(AtsCompatibility::Medium));
        assert_eq!(AtsCompatibility::from_label("none"), None);

        assert_eq!(ResumeLength::from_label("too short"), Some(ResumeLength::TooShort));
        assert_eq!(ResumeLength::from_label("OPTIMAL"), Some(ResumeLength::Optimal));
        assert_eq!(ResumeLength::from_label("Too Long"), Some(ResumeLength::TooLong));
        assert_eq!(ResumeLength::from_label("short"), None);

        assert_eq!(ToneOfLanguage::from_label("Professional"), Some(ToneOfLanguage::Professional));
        assert_eq!(ToneOfLanguage::from_label("AGGRESSIVE"), Some(ToneOfLanguage::Aggressive));
        assert_eq!(ToneOfLanguage::from_label("friendly"), None);
    }

    #[test]
    fn test_request_rejects_blank_inputs() {
        assert!(AnalysisRequest::new("resume".into(), "job".into()).is_ok());
        assert!(matches!(
            AnalysisRequest::new("   ".into(), "job".into()),
            Err(ResumeLensError::EmptyDocument)
        ));
        assert!(matches!(
            AnalysisRequest::new("resume".into(), "".into()),
            Err(ResumeLensError::MissingInput(_))
        ));
    }

    #[test]
    fn test_wire_labels_survive_serialization() {
        let encoded = serde_json::to_value(ResumeLength::TooShort).unwrap();
        assert_eq!(encoded, "Too Short");
        let encoded = serde_json::to_value(AtsCompatibility::High).unwrap();
        assert_eq!(encoded, "High");
    }
}
