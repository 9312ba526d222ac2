//! Terminal presentation of a finished run.
//!
//! Two panels, mirroring the projections: a bar chart of the top skills
//! and a full ranked table. Rendering is string-building only so it can
//! be tested without a terminal.

use colored::Colorize;
use serde_json::json;

use crate::client::SkillCount;
use crate::error::Result;

const BAR_WIDTH: usize = 40;

/// Human-readable report: search id banner, chart panel, table panel.
#[must_use]
pub fn render_report(search_id: Option<&str>, top: &[SkillCount], all: &[SkillCount]) -> String {
    let mut out = String::new();

    if let Some(id) = search_id {
        out.push_str(&format!("{} {id}\n\n", "Search ID:".dimmed()));
    }

    out.push_str(&format!("{}\n", "Top Skills".bold()));
    out.push_str(&render_chart(top));
    out.push('\n');
    out.push_str(&format!("{} ({})\n", "All Skills".bold(), all.len()));
    out.push_str(&render_table(all));

    out
}

/// Machine output: the same shape the backend speaks, ranked.
pub fn render_json(search_id: Option<&str>, skills: &[SkillCount]) -> Result<String> {
    let value = json!({
        "search_id": search_id,
        "skills": skills,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_chart(top: &[SkillCount]) -> String {
    if top.is_empty() {
        return format!("  {}\n", "No data yet".dimmed());
    }

    let label_width = top.iter().map(|e| e.skill.len()).max().unwrap_or(0);
    let max_count = top.iter().map(|e| e.count).max().unwrap_or(0).max(1);

    let mut out = String::new();
    for entry in top {
        let filled = ((entry.count as f64 / max_count as f64) * BAR_WIDTH as f64).round() as usize;
        // A non-zero count always gets at least one cell.
        let filled = if entry.count > 0 { filled.max(1) } else { 0 };
        let bar: String = "█".repeat(filled);
        out.push_str(&format!(
            "  {:<label_width$}  {} {}\n",
            entry.skill,
            bar.cyan(),
            entry.count
        ));
    }
    out
}

fn render_table(all: &[SkillCount]) -> String {
    if all.is_empty() {
        return format!("  {}\n", "No data yet".dimmed());
    }

    let label_width = all.iter().map(|e| e.skill.len()).max().unwrap_or(5).max(5);

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<label_width$}  {}\n",
        "Skill".dimmed(),
        "Count".dimmed()
    ));
    for entry in all {
        out.push_str(&format!(
            "  {:<label_width$}  {}\n",
            entry.skill, entry.count
        ));
    }
    out
}
