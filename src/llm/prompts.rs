//! Prompt construction for the schema-constrained analysis request

use serde::{Deserialize, Serialize};

/// Prompt template for the analysis request
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            analysis: ANALYSIS_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_text: String,
    pub job_description: String,
}

impl PromptTemplates {
    /// Render the analysis prompt. Pure substitution: identical inputs always
    /// produce byte-identical output, and neither document is truncated.
    pub fn render_analysis(&self, params: &PromptParams) -> String {
        self.analysis
            .replace("{resume}", &params.resume_text)
            .replace("{job}", &params.job_description)
    }
}

const ANALYSIS_TEMPLATE: &str = r#"You are a strict resume evaluator. Assess the resume below exclusively against the provided job description. Every judgement must be driven by the job description, not by generic resume advice. Be critical and specific.

Respond with a single JSON object and nothing else. The object must contain exactly these fields:

{
  "overall_summary": string,
  "resume_score": number from 0 to 100,
  "ats_compatibility": one of "High" | "Medium" | "Low",
  "resume_length": one of "Too Short" | "Optimal" | "Too Long",
  "readability_score": number from 0 to 100,
  "skills_match": {
    "matched": [array of strings],
    "missing": [array of strings],
    "match_percentage": number from 0 to 100
  },
  "soft_skills_match": {
    "matched": [array of strings],
    "missing": [array of strings]
  },
  "technical_proficiency": {
    "strong": [array of strings],
    "moderate": [array of strings],
    "weak_or_missing": [array of strings]
  },
  "keywords_analysis": {
    "present_keywords": [array of strings],
    "missing_keywords": [array of strings]
  },
  "job_requirements_coverage": {
    "met_requirements": [array of strings],
    "missing_requirements": [array of strings]
  },
  "experience_alignment": {
    "aligned_experience": [array of strings],
    "missing_experience_areas": [array of strings]
  },
  "tone_of_language": one of "Professional" | "Casual" | "Neutral" | "Aggressive",
  "formatting_issues": [array of strings],
  "grammar_issues": [array of strings],
  "recommendations": [array of strings]
}

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>"#;
