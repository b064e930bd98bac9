//! Schema validation for the completion service's JSON reply
//!
//! The service is instructed to return a single JSON object, but replies drift
//! in practice: code fences, wrong enum casing, out-of-range scores. This pass
//! absorbs the tolerated drift (fences, casing, score bounds) and rejects
//! everything else field by field, so a malformed payload can never leak into
//! an `AnalysisResult`.

use crate::processing::result::{
    AnalysisResult, AtsCompatibility, ExperienceAlignment, JobRequirementsCoverage,
    KeywordsAnalysis, ResumeLength, SkillsMatch, SoftSkillsMatch, TechnicalProficiency,
    ToneOfLanguage,
};
use log::debug;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Malformed analysis payload: {0}")]
    Malformed(String),

    #[error("Analysis payload field '{field}' {reason}")]
    SchemaMismatch { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Malformed,
    SchemaMismatch,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::Malformed(_) => ValidationErrorKind::Malformed,
            ValidationError::SchemaMismatch { .. } => ValidationErrorKind::SchemaMismatch,
        }
    }

    /// The offending field path for a schema mismatch, dotted for nested members.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Malformed(_) => None,
            ValidationError::SchemaMismatch { field, .. } => Some(field),
        }
    }
}

type FieldResult<T> = std::result::Result<T, ValidationError>;

pub struct ResultValidator;

impl ResultValidator {
    /// Parse and validate a raw service reply into an `AnalysisResult`.
    ///
    /// Fields are checked in the schema's declared order, so the first
    /// missing or mismatched field is the one reported. Bounded scores are
    /// clamped into [0, 100] rather than rejected; enum labels match
    /// case-insensitively. Any other deviation aborts the whole parse.
    pub fn parse(raw: &str) -> FieldResult<AnalysisResult> {
        let cleaned = strip_code_fences(raw);
        let value: Value = serde_json::from_str(cleaned)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        let root = value
            .as_object()
            .ok_or_else(|| ValidationError::Malformed("top-level value is not a JSON object".to_string()))?;

        let overall_summary = require_string(root, "overall_summary", "overall_summary")?;
        if overall_summary.trim().is_empty() {
            return Err(mismatch("overall_summary", "must be a non-empty string"));
        }

        let resume_score = require_score(root, "resume_score", "resume_score")?;
        let ats_compatibility = require_label(
            root,
            "ats_compatibility",
            "ats_compatibility",
            AtsCompatibility::from_label,
        )?;
        let resume_length =
            require_label(root, "resume_length", "resume_length", ResumeLength::from_label)?;
        let readability_score = require_score(root, "readability_score", "readability_score")?;

        let skills = require_object(root, "skills_match", "skills_match")?;
        let skills_match = SkillsMatch {
            matched: require_string_array(skills, "matched", "skills_match.matched")?,
            missing: require_string_array(skills, "missing", "skills_match.missing")?,
            match_percentage: require_score(skills, "match_percentage", "skills_match.match_percentage")?,
        };

        let soft_skills = require_object(root, "soft_skills_match", "soft_skills_match")?;
        let soft_skills_match = SoftSkillsMatch {
            matched: require_string_array(soft_skills, "matched", "soft_skills_match.matched")?,
            missing: require_string_array(soft_skills, "missing", "soft_skills_match.missing")?,
        };

        let proficiency = require_object(root, "technical_proficiency", "technical_proficiency")?;
        let technical_proficiency = TechnicalProficiency {
            strong: require_string_array(proficiency, "strong", "technical_proficiency.strong")?,
            moderate: require_string_array(proficiency, "moderate", "technical_proficiency.moderate")?,
            weak_or_missing: require_string_array(
                proficiency,
                "weak_or_missing",
                "technical_proficiency.weak_or_missing",
            )?,
        };

        let keywords = require_object(root, "keywords_analysis", "keywords_analysis")?;
        let keywords_analysis = KeywordsAnalysis {
            present_keywords: require_string_array(
                keywords,
                "present_keywords",
                "keywords_analysis.present_keywords",
            )?,
            missing_keywords: require_string_array(
                keywords,
                "missing_keywords",
                "keywords_analysis.missing_keywords",
            )?,
        };

        let coverage = require_object(root, "job_requirements_coverage", "job_requirements_coverage")?;
        let job_requirements_coverage = JobRequirementsCoverage {
            met_requirements: require_string_array(
                coverage,
                "met_requirements",
                "job_requirements_coverage.met_requirements",
            )?,
            missing_requirements: require_string_array(
                coverage,
                "missing_requirements",
                "job_requirements_coverage.missing_requirements",
            )?,
        };

        let alignment = require_object(root, "experience_alignment", "experience_alignment")?;
        let experience_alignment = ExperienceAlignment {
            aligned_experience: require_string_array(
                alignment,
                "aligned_experience",
                "experience_alignment.aligned_experience",
            )?,
            missing_experience_areas: require_string_array(
                alignment,
                "missing_experience_areas",
                "experience_alignment.missing_experience_areas",
            )?,
        };

        let tone_of_language = require_label(
            root,
            "tone_of_language",
            "tone_of_language",
            ToneOfLanguage::from_label,
        )?;
        let formatting_issues = require_string_array(root, "formatting_issues", "formatting_issues")?;
        let grammar_issues = require_string_array(root, "grammar_issues", "grammar_issues")?;
        let recommendations = require_string_array(root, "recommendations", "recommendations")?;

        debug!("Analysis payload validated (resume_score {:.0})", resume_score);

        Ok(AnalysisResult {
            overall_summary,
            resume_score,
            ats_compatibility,
            resume_length,
            readability_score,
            skills_match,
            soft_skills_match,
            technical_proficiency,
            keywords_analysis,
            job_requirements_coverage,
            experience_alignment,
            tone_of_language,
            formatting_issues,
            grammar_issues,
            recommendations,
        })
    }
}

fn mismatch(field: &str, reason: &str) -> ValidationError {
    ValidationError::SchemaMismatch {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn require<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> FieldResult<&'a Value> {
    obj.get(key).ok_or_else(|| mismatch(path, "is missing"))
}

fn require_string(obj: &Map<String, Value>, key: &str, path: &str) -> FieldResult<String> {
    require(obj, key, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(path, "must be a string"))
}

/// Bounded numeric field: out-of-range values are clamped into [0, 100]
/// instead of rejected, per the tolerant-drift policy.
fn require_score(obj: &Map<String, Value>, key: &str, path: &str) -> FieldResult<f32> {
    let number = require(obj, key, path)?
        .as_f64()
        .ok_or_else(|| mismatch(path, "must be a number"))?;
    Ok(number.clamp(0.0, 100.0) as f32)
}

fn require_object<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> FieldResult<&'a Map<String, Value>> {
    require(obj, key, path)?
        .as_object()
        .ok_or_else(|| mismatch(path, "must be an object"))
}

fn require_string_array(obj: &Map<String, Value>, key: &str, path: &str) -> FieldResult<Vec<String>> {
    let items = require(obj, key, path)?
        .as_array()
        .ok_or_else(|| mismatch(path, "must be an array of strings"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| mismatch(path, "must contain only strings"))
        })
        .collect()
}

fn require_label<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    parse: fn(&str) -> Option<T>,
) -> FieldResult<T> {
    let label = require(obj, key, path)?
        .as_str()
        .ok_or_else(|| mismatch(path, "must be a string"))?;
    parse(label).ok_or_else(|| mismatch(path, "has a value outside the allowed set"))
}

/// Strip a markdown code fence the service may have wrapped its JSON in.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "overall_summary": "Solid backend profile with a container-orchestration gap.",
            "resume_score": 78,
            "ats_compatibility": "High",
            "resume_length": "Optimal",
            "readability_score": 85,
            "skills_match": {
                "matched": ["Go", "AWS"],
                "missing": ["Kubernetes"],
                "match_percentage": 66.7
            },
            "soft_skills_match": {
                "matched": ["Communication"],
                "missing": ["Leadership"]
            },
            "technical_proficiency": {
                "strong": ["Go"],
                "moderate": ["Docker"],
                "weak_or_missing": ["Kubernetes"]
            },
            "keywords_analysis": {
                "present_keywords": ["backend", "AWS"],
                "missing_keywords": ["Kubernetes"]
            },
            "job_requirements_coverage": {
                "met_requirements": ["5 years experience"],
                "missing_requirements": ["Kubernetes in production"]
            },
            "experience_alignment": {
                "aligned_experience": ["Backend services on AWS"],
                "missing_experience_areas": ["Container orchestration"]
            },
            "tone_of_language": "Professional",
            "formatting_issues": [],
            "grammar_issues": ["Inconsistent tense in bullet points"],
            "recommendations": ["Add a Kubernetes project", "Quantify achievements"]
        })
    }

    #[test]
    fn test_valid_payload_parses() {
        let result = ResultValidator::parse(&valid_payload().to_string()).unwrap();

        assert_eq!(result.resume_score, 78.0);
        assert_eq!(result.ats_compatibility, AtsCompatibility::High);
        assert_eq!(result.resume_length, ResumeLength::Optimal);
        assert_eq!(result.skills_match.matched, vec!["Go", "AWS"]);
        assert_eq!(result.skills_match.missing, vec!["Kubernetes"]);
        assert_eq!(result.tone_of_language, ToneOfLanguage::Professional);
        assert!(result.formatting_issues.is_empty());
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_malformed_payload() {
        let err = ResultValidator::parse("{not json").unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::Malformed);
    }

    #[test]
    fn test_non_object_payload() {
        let err = ResultValidator::parse("[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::Malformed);
    }

    #[test]
    fn test_fenced_payload_parses() {
        let fenced = format!("```json\n{}\n```", valid_payload());
        assert!(ResultValidator::parse(&fenced).is_ok());
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let mut payload = valid_payload();
        payload["resume_score"] = json!(150);
        payload["readability_score"] = json!(-12);
        payload["skills_match"]["match_percentage"] = json!(101.5);

        let result = ResultValidator::parse(&payload.to_string()).unwrap();
        assert_eq!(result.resume_score, 100.0);
        assert_eq!(result.readability_score, 0.0);
        assert_eq!(result.skills_match.match_percentage, 100.0);
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("overall_summary");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::SchemaMismatch);
        assert_eq!(err.field(), Some("overall_summary"));
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("resume_score");
        payload.as_object_mut().unwrap().remove("tone_of_language");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("resume_score"));
    }

    #[test]
    fn test_nested_field_uses_dotted_path() {
        let mut payload = valid_payload();
        payload["skills_match"].as_object_mut().unwrap().remove("match_percentage");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("skills_match.match_percentage"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut payload = valid_payload();
        payload["skills_match"]["matched"] = json!("Go");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("skills_match.matched"));
    }

    #[test]
    fn test_mixed_array_rejected() {
        let mut payload = valid_payload();
        payload["recommendations"] = json!(["Add metrics", 42]);

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("recommendations"));
    }

    #[test]
    fn test_enum_labels_match_case_insensitively() {
        let mut payload = valid_payload();
        payload["ats_compatibility"] = json!("HIGH");
        payload["resume_length"] = json!("too long");
        payload["tone_of_language"] = json!("professional");

        let result = ResultValidator::parse(&payload.to_string()).unwrap();
        assert_eq!(result.ats_compatibility, AtsCompatibility::High);
        assert_eq!(result.resume_length, ResumeLength::TooLong);
        assert_eq!(result.tone_of_language, ToneOfLanguage::Professional);
    }

    #[test]
    fn test_unknown_enum_label_rejected() {
        let mut payload = valid_payload();
        payload["ats_compatibility"] = json!("Excellent");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("ats_compatibility"));
    }

    #[test]
    fn test_blank_summary_rejected() {
        let mut payload = valid_payload();
        payload["overall_summary"] = json!("   ");

        let err = ResultValidator::parse(&payload.to_string()).unwrap_err();
        assert_eq!(err.field(), Some("overall_summary"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }
}
