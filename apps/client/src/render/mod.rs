//! Terminal rendering of analysis results and history.
//!
//! Renderers build plain `String`s so they stay testable; the binary is the
//! only place that prints. Color is additive — every assertion-worthy token
//! survives with colors stripped.

use colored::Colorize;

use crate::models::analysis::Analysis;
use crate::models::history::HistoryEntry;

const GAUGE_WIDTH: usize = 25;

/// Full analysis report: candidate, score gauge, skill breakdown, work
/// history with a total-experience row, and the match indicators.
pub fn render_report(analysis: &Analysis) -> String {
    let mut out = String::new();
    let skills = &analysis.skill_analysis;
    let exp = &analysis.experience_analysis;

    out.push_str(&format!(
        "{}\n",
        "Resume Analysis Report".bold().underline()
    ));
    out.push_str(&format!(
        "Candidate: {}\n\n",
        analysis.candidate_info.candidate_name.bold()
    ));

    out.push_str(&format!(
        "Overall Match Score  {}  {}\n\n",
        gauge(skills.match_score),
        format!("{}%", skills.match_score).bold()
    ));

    out.push_str(&skill_section(
        "Matched primary skills",
        &skills.matching_skills,
        true,
    ));
    out.push_str(&skill_section(
        "Missing primary skills",
        &skills.missing_primary_skills,
        false,
    ));
    if skills.missing_secondary_skills.is_empty() {
        if !skills.matching_secondary_skills.is_empty() {
            out.push_str(&format!(
                "{}\n",
                "All secondary skills matched.".green()
            ));
        }
    } else {
        out.push_str(&skill_section(
            "Missing secondary skills",
            &skills.missing_secondary_skills,
            false,
        ));
    }
    out.push('\n');

    if !exp.positions.is_empty() {
        out.push_str(&work_history_table(analysis));
        out.push('\n');
    }

    if !exp.required_experience.is_empty() {
        out.push_str(&format!("Required experience: {}\n", exp.required_experience));
    }
    out.push_str(&indicator("Experience match", exp.experience_match));
    if exp.frequent_hopper {
        out.push_str(&format!(
            "{}\n",
            "Frequent hopper: candidate shows frequent job changes".yellow()
        ));
    }

    if !analysis.summary.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", "Profile Feedback".bold(), analysis.summary));
    }

    out
}

/// `[█████░░░░░] `-style bar for a 0-100 score.
fn gauge(score: u32) -> String {
    let score = score.min(100) as usize;
    let filled = score * GAUGE_WIDTH / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled).green(),
        "░".repeat(GAUGE_WIDTH - filled)
    )
}

fn skill_section(label: &str, skills: &[String], matched: bool) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let list = skills.join(", ");
    let list = if matched { list.green() } else { list.red() };
    format!("{label}: {list}\n")
}

fn indicator(label: &str, ok: bool) -> String {
    let mark = if ok { "yes".green() } else { "no".red() };
    format!("{label}: {mark}\n")
}

fn work_history_table(analysis: &Analysis) -> String {
    let exp = &analysis.experience_analysis;
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Work History".bold()));
    out.push_str(&format!(
        "{:<3} {:<30} {:<25} {:<20} {}\n",
        "#", "Company / Role", "Period", "Duration", "Type"
    ));

    for (i, p) in exp.positions.iter().enumerate() {
        let company = if p.company.is_empty() { "Unknown" } else { &p.company };
        let title = if p.title.is_empty() { "Unknown" } else { &p.title };
        let period = if p.duration_missing {
            "Start and End Date Missing".to_string()
        } else {
            format_period(&p.duration)
        };
        let duration = if p.duration_missing {
            String::new()
        } else if p.duration_length.is_empty() {
            "N/A".to_string()
        } else {
            p.duration_length.clone()
        };
        let kind = if p.is_internship { "Internship" } else { "Full-time" };
        out.push_str(&format!(
            "{:<3} {:<30} {:<25} {:<20} {}\n",
            i + 1,
            format!("{company} / {title}"),
            period,
            duration,
            kind
        ));
    }

    let total = if exp.total_experience.is_empty() {
        "N/A"
    } else {
        &exp.total_experience
    };
    out.push_str(&format!(
        "{:<3} {:<30} {:<25} {}\n",
        "", "Total Experience", "", total
    ));
    out
}

/// Normalizes "Jan 2020-Mar 2022" into "Jan 2020 - Mar 2022".
fn format_period(duration: &str) -> String {
    if duration.is_empty() {
        return "N/A".to_string();
    }
    match duration.split_once('-') {
        Some((start, end)) => format!("{} - {}", start.trim(), end.trim()),
        None => duration.to_string(),
    }
}

/// History listing, newest first as returned by the backend.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses yet.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:<20} {:<20} {:<24} {:>5}  {}\n",
        "Analysis", "Client", "Job Description", "Candidate", "Score", "When"
    ));
    for entry in entries {
        let when = entry
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<26} {:<20} {:<20} {:<24} {:>4}%  {}\n",
            entry.analysis_id,
            entry.client_name,
            entry.jd_title,
            entry.candidate_name,
            entry.match_score,
            when
        ));
    }
    out
}
