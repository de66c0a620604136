//! Output formatters for ranking and score reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{RankingReport, ScoreReport};
use crate::processing::scoring::ScoreBreakdown;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn format_score(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn score_color(total: f64) -> Color {
        match total {
            t if t >= 70.0 => Color::Green,
            t if t >= 40.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_breakdown(&self, breakdown: &ScoreBreakdown, indent: &str) -> String {
        breakdown
            .entries()
            .iter()
            .map(|(name, value)| format!("{}{:<16} {:>7.2}\n", indent, name, value))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = self.format_header(&format!("RANKING: {} (job {})", report.job_title, report.job_id));
        output.push_str(&format!(
            "Generated: {}\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if report.entries.is_empty() {
            output.push_str(&self.colorize("No resumes ranked.\n", Color::Yellow));
            return Ok(output);
        }

        for entry in &report.entries {
            let score = format!("{:>7.2}", entry.total_score);
            output.push_str(&format!(
                "{:>3}. {}  #{:<5} {:<20} {}\n",
                entry.rank,
                self.colorize(&score, Self::score_color(entry.total_score)),
                entry.resume_id,
                entry.submitter,
                entry.file_path
            ));

            if self.detailed {
                output.push_str(&self.format_breakdown(&entry.breakdown, "       "));
                output.push_str(&format!(
                    "       experience: {} years | skills: {}\n\n",
                    entry.experience_years,
                    entry.skills.join(", ")
                ));
            }
        }

        Ok(output)
    }

    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut output = self.format_header(&format!("SCORE: {}", report.file_path));
        output.push_str(&format!("Job: {} (job {})\n", report.job_title, report.job_id));

        let total = format!("{:.2}", report.total_score);
        output.push_str(&format!(
            "Total: {}\n",
            self.colorize(&total, Self::score_color(report.total_score))
        ));

        match report.rank {
            Some(rank) => output.push_str(&format!("Rank: {} of {}\n", rank, report.ranked_count)),
            None if report.resume_id.is_some() => output.push_str("Rank: Not ranked\n"),
            None => {}
        }

        output.push_str("\nBreakdown:\n");
        output.push_str(&self.format_breakdown(&report.breakdown, "  "));

        output.push_str(&format!("\nExperience: {} years\n", report.experience_years));
        output.push_str(&format!("Skills: {}\n", report.skills.join(", ")));
        if self.detailed {
            output.push_str(&format!("Education: {}\n", report.education.join("; ")));
            for project in &report.projects {
                output.push_str(&format!("  • {}\n", project));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        Ok(if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn breakdown_header() -> String {
        let columns = ScoreBreakdown::CATEGORIES.join(" | ");
        let rule = vec!["---:"; ScoreBreakdown::CATEGORIES.len()].join(" | ");
        format!(
            "| Rank | Resume | Submitter | Total | {} |\n|---:|---|---|---:| {} |\n",
            columns, rule
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = format!("# Ranking: {}\n\n", report.job_title);
        output.push_str(&format!(
            "*Job {} · generated {}*\n\n",
            report.job_id,
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        if report.entries.is_empty() {
            output.push_str("No resumes ranked.\n");
            return Ok(output);
        }

        output.push_str(&Self::breakdown_header());
        for entry in &report.entries {
            let subscores: Vec<String> = entry
                .breakdown
                .entries()
                .iter()
                .map(|(_, value)| format!("{:.2}", value))
                .collect();
            output.push_str(&format!(
                "| {} | {} | {} | {:.2} | {} |\n",
                entry.rank,
                entry.resume_id,
                entry.submitter,
                entry.total_score,
                subscores.join(" | ")
            ));
        }

        Ok(output)
    }

    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut output = format!("# Score: {}\n\n", report.file_path);
        output.push_str(&format!("**Job:** {} (job {})  \n", report.job_title, report.job_id));
        output.push_str(&format!("**Total:** {:.2}  \n", report.total_score));
        if let Some(rank) = report.rank {
            output.push_str(&format!("**Rank:** {} of {}  \n", rank, report.ranked_count));
        }

        output.push_str("\n| Category | Score |\n|---|---:|\n");
        for (name, value) in report.breakdown.entries() {
            output.push_str(&format!("| {} | {:.2} |\n", name, value));
        }

        if !report.skills.is_empty() {
            output.push_str(&format!("\n**Skills:** {}\n", report.skills.join(", ")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_ranking(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }

    pub fn generate_score(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_score(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_id: u64, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("job{}_ranking{}.{}", job_id, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::RankingEntry;
    use chrono::Utc;

    fn report() -> RankingReport {
        RankingReport {
            job_id: 3,
            job_title: "Data Engineer".to_string(),
            generated_at: Utc::now(),
            entries: vec![RankingEntry {
                rank: 1,
                resume_id: 11,
                submitter: "ada".to_string(),
                file_path: "ada.pdf".to_string(),
                total_score: 42.5,
                breakdown: ScoreBreakdown {
                    required_skills: 30.0,
                    experience: 12.5,
                    ..Default::default()
                },
                experience_years: 7,
                skills: vec!["python".to_string(), "spark".to_string()],
                education: Vec::new(),
                project_count: 0,
            }],
        }
    }

    #[test]
    fn test_json_ranking() {
        let json = JsonFormatter::new(false).format_ranking(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["entries"][0]["breakdown"]["required_skills"], 30.0);
        assert_eq!(value["entries"][0]["breakdown"]["preferred_skill"], 0.0);
        assert_eq!(value["job_title"], "Data Engineer");
    }

    #[test]
    fn test_markdown_ranking_table() {
        let markdown = MarkdownFormatter.format_ranking(&report()).unwrap();

        assert!(markdown.contains("# Ranking: Data Engineer"));
        assert!(markdown.contains("| 1 | 11 | ada | 42.50 | 30.00 | 0.00 | 12.50 |"));
    }

    #[test]
    fn test_console_without_colors() {
        let console = ConsoleFormatter::new(false, true).format_ranking(&report()).unwrap();

        assert!(console.contains("RANKING: Data Engineer"));
        assert!(console.contains("42.50"));
        assert!(console.contains("python, spark"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Markdown, 3, false), "job3_ranking.md");
    }
}
