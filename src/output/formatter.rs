//! Output formatters for the analysis report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::result::AtsCompatibility;
use colored::{Color, Colorize};

/// Trait for rendering an analysis report in one output format
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colored multi-panel presentation
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for structured export
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter;

/// Dispatches a report to the formatter matching the requested format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn render(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: f32) -> Color {
        match score as u32 {
            75..=100 => Color::Green,
            50..=74 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score(&self, score: f32) -> String {
        self.colorize(&format!("{:.0}/100", score), Self::score_color(score))
    }

    fn format_list(&self, output: &mut String, items: &[String], color: Color) {
        for item in items {
            output.push_str(&format!("  • {}\n", self.colorize(item, color)));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Model: {} | {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.model,
            report.metadata.elapsed_ms
        ));

        // Summary and scores
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!("{}\n", self.colorize(&analysis.overall_summary, Color::Cyan)));

        output.push_str(&self.format_header("Scores", 2));
        output.push_str(&format!("🎯 Resume Score: {}\n", self.format_score(analysis.resume_score)));
        output.push_str(&format!(
            "📖 Readability: {}\n",
            self.format_score(analysis.readability_score)
        ));
        let ats_color = match analysis.ats_compatibility {
            AtsCompatibility::High => Color::Green,
            AtsCompatibility::Medium => Color::Yellow,
            AtsCompatibility::Low => Color::Red,
        };
        output.push_str(&format!(
            "🤖 ATS Compatibility: {}\n",
            self.colorize(analysis.ats_compatibility.label(), ats_color)
        ));
        output.push_str(&format!("📏 Length: {}\n", analysis.resume_length));
        output.push_str(&format!("🗣️  Tone: {}\n", analysis.tone_of_language));

        // Skills
        output.push_str(&self.format_header("Skills Match", 2));
        output.push_str(&format!(
            "Coverage: {}\n",
            self.format_score(analysis.skills_match.match_percentage)
        ));
        if !analysis.skills_match.matched.is_empty() {
            output.push_str(&self.format_header("✅ Matched Skills", 3));
            self.format_list(&mut output, &analysis.skills_match.matched, Color::Green);
        }
        if !analysis.skills_match.missing.is_empty() {
            output.push_str(&self.format_header("⚠️  Missing Skills", 3));
            self.format_list(&mut output, &analysis.skills_match.missing, Color::Yellow);
        }
        if !analysis.soft_skills_match.matched.is_empty() || !analysis.soft_skills_match.missing.is_empty() {
            output.push_str(&self.format_header("🤝 Soft Skills", 3));
            self.format_list(&mut output, &analysis.soft_skills_match.matched, Color::Green);
            self.format_list(&mut output, &analysis.soft_skills_match.missing, Color::Yellow);
        }

        // Technical proficiency
        output.push_str(&self.format_header("Technical Proficiency", 2));
        if !analysis.technical_proficiency.strong.is_empty() {
            output.push_str("Strong:\n");
            self.format_list(&mut output, &analysis.technical_proficiency.strong, Color::Green);
        }
        if !analysis.technical_proficiency.moderate.is_empty() {
            output.push_str("Moderate:\n");
            self.format_list(&mut output, &analysis.technical_proficiency.moderate, Color::Yellow);
        }
        if !analysis.technical_proficiency.weak_or_missing.is_empty() {
            output.push_str("Weak or missing:\n");
            self.format_list(&mut output, &analysis.technical_proficiency.weak_or_missing, Color::Red);
        }

        // Keywords and requirements
        output.push_str(&self.format_header("Keyword Coverage", 2));
        output.push_str(&format!(
            "Present: {} | Missing: {}\n",
            analysis.keywords_analysis.present_keywords.len(),
            analysis.keywords_analysis.missing_keywords.len()
        ));
        if !analysis.keywords_analysis.missing_keywords.is_empty() {
            self.format_list(&mut output, &analysis.keywords_analysis.missing_keywords, Color::Yellow);
        }

        output.push_str(&self.format_header("Job Requirements", 2));
        if !analysis.job_requirements_coverage.met_requirements.is_empty() {
            output.push_str("Met:\n");
            self.format_list(&mut output, &analysis.job_requirements_coverage.met_requirements, Color::Green);
        }
        if !analysis.job_requirements_coverage.missing_requirements.is_empty() {
            output.push_str("Missing:\n");
            self.format_list(
                &mut output,
                &analysis.job_requirements_coverage.missing_requirements,
                Color::Red,
            );
        }

        // Experience
        if !analysis.experience_alignment.aligned_experience.is_empty()
            || !analysis.experience_alignment.missing_experience_areas.is_empty()
        {
            output.push_str(&self.format_header("Experience Alignment", 2));
            self.format_list(&mut output, &analysis.experience_alignment.aligned_experience, Color::Green);
            self.format_list(
                &mut output,
                &analysis.experience_alignment.missing_experience_areas,
                Color::Yellow,
            );
        }

        // Issues
        if !analysis.formatting_issues.is_empty() {
            output.push_str(&self.format_header("📝 Formatting Issues", 2));
            self.format_list(&mut output, &analysis.formatting_issues, Color::Yellow);
        }
        if !analysis.grammar_issues.is_empty() {
            output.push_str(&self.format_header("✏️  Grammar Issues", 2));
            self.format_list(&mut output, &analysis.grammar_issues, Color::Yellow);
        }

        // Recommendations
        if !analysis.recommendations.is_empty() {
            output.push_str(&self.format_header("💡 Recommendations", 2));
            for (i, rec) in analysis.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, self.colorize(rec, Color::White)));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# Resume Analysis\n\n");
        output.push_str(&format!(
            "_Generated {} by {}_\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.metadata.model
        ));

        output.push_str("## Summary\n\n");
        output.push_str(&format!("{}\n\n", analysis.overall_summary));

        output.push_str("## Scores\n\n");
        output.push_str("| Metric | Value |\n|---|---|\n");
        output.push_str(&format!("| Resume score | {:.0}/100 |\n", analysis.resume_score));
        output.push_str(&format!("| Readability | {:.0}/100 |\n", analysis.readability_score));
        output.push_str(&format!("| ATS compatibility | {} |\n", analysis.ats_compatibility));
        output.push_str(&format!("| Length | {} |\n", analysis.resume_length));
        output.push_str(&format!("| Tone | {} |\n", analysis.tone_of_language));
        output.push_str(&format!(
            "| Skills coverage | {:.0}% |\n\n",
            analysis.skills_match.match_percentage
        ));

        push_md_list(&mut output, "Matched skills", &analysis.skills_match.matched);
        push_md_list(&mut output, "Missing skills", &analysis.skills_match.missing);
        push_md_list(&mut output, "Matched soft skills", &analysis.soft_skills_match.matched);
        push_md_list(&mut output, "Missing soft skills", &analysis.soft_skills_match.missing);
        push_md_list(&mut output, "Strong areas", &analysis.technical_proficiency.strong);
        push_md_list(&mut output, "Moderate areas", &analysis.technical_proficiency.moderate);
        push_md_list(
            &mut output,
            "Weak or missing areas",
            &analysis.technical_proficiency.weak_or_missing,
        );
        push_md_list(
            &mut output,
            "Present keywords",
            &analysis.keywords_analysis.present_keywords,
        );
        push_md_list(
            &mut output,
            "Missing keywords",
            &analysis.keywords_analysis.missing_keywords,
        );
        push_md_list(
            &mut output,
            "Met requirements",
            &analysis.job_requirements_coverage.met_requirements,
        );
        push_md_list(
            &mut output,
            "Missing requirements",
            &analysis.job_requirements_coverage.missing_requirements,
        );
        push_md_list(
            &mut output,
            "Aligned experience",
            &analysis.experience_alignment.aligned_experience,
        );
        push_md_list(
            &mut output,
            "Missing experience areas",
            &analysis.experience_alignment.missing_experience_areas,
        );
        push_md_list(&mut output, "Formatting issues", &analysis.formatting_issues);
        push_md_list(&mut output, "Grammar issues", &analysis.grammar_issues);

        if !analysis.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for (i, rec) in analysis.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, rec));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

fn push_md_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("## {}\n\n", title));
    for item in items {
        output.push_str(&format!("- {}\n", item));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::result::*;

    fn sample_report() -> AnalysisReport {
        let analysis = AnalysisResult {
            overall_summary: "Strong backend profile.".to_string(),
            resume_score: 81.0,
            ats_compatibility: AtsCompatibility::High,
            resume_length: ResumeLength::Optimal,
            readability_score: 88.0,
            skills_match: SkillsMatch {
                matched: vec!["Go".to_string(), "AWS".to_string()],
                missing: vec!["Kubernetes".to_string()],
                match_percentage: 66.0,
            },
            soft_skills_match: SoftSkillsMatch {
                matched: vec!["Communication".to_string()],
                missing: vec![],
            },
            technical_proficiency: TechnicalProficiency {
                strong: vec!["Go".to_string()],
                moderate: vec![],
                weak_or_missing: vec!["Kubernetes".to_string()],
            },
            keywords_analysis: KeywordsAnalysis {
                present_keywords: vec!["backend".to_string()],
                missing_keywords: vec!["orchestration".to_string()],
            },
            job_requirements_coverage: JobRequirementsCoverage {
                met_requirements: vec!["5 years experience".to_string()],
                missing_requirements: vec![],
            },
            experience_alignment: ExperienceAlignment {
                aligned_experience: vec!["Cloud services".to_string()],
                missing_experience_areas: vec![],
            },
            tone_of_language: ToneOfLanguage::Professional,
            formatting_issues: vec![],
            grammar_issues: vec![],
            recommendations: vec!["Add a Kubernetes project".to_string()],
        };
        AnalysisReport::new(analysis, "test-model", 1200)
    }

    #[test]
    fn test_console_report_without_colors() {
        let formatter = ConsoleFormatter::new(false);
        let rendered = formatter.format_report(&sample_report()).unwrap();

        assert!(rendered.contains("RESUME ANALYSIS"));
        assert!(rendered.contains("Strong backend profile."));
        assert!(rendered.contains("81/100"));
        assert!(rendered.contains("Kubernetes"));
        assert!(rendered.contains("1. Add a Kubernetes project"));
        // No ANSI escapes when colors are disabled
        assert!(!rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_json_report_round_trip() {
        let formatter = JsonFormatter::new(true);
        let rendered = formatter.format_report(&sample_report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["analysis"]["resume_score"], 81.0);
        assert_eq!(value["analysis"]["ats_compatibility"], "High");
        assert_eq!(value["analysis"]["resume_length"], "Optimal");
        assert_eq!(value["metadata"]["model"], "test-model");
    }

    #[test]
    fn test_markdown_report_sections() {
        let rendered = MarkdownFormatter.format_report(&sample_report()).unwrap();

        assert!(rendered.contains("# Resume Analysis"));
        assert!(rendered.contains("| Resume score | 81/100 |"));
        assert!(rendered.contains("## Missing skills"));
        assert!(rendered.contains("- Kubernetes"));
        assert!(rendered.contains("## Recommendations"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false);
        let report = sample_report();

        assert!(generator.render(&report, &OutputFormat::Console).is_ok());
        assert!(generator.render(&report, &OutputFormat::Json).is_ok());
        assert!(generator.render(&report, &OutputFormat::Markdown).is_ok());
    }
}
