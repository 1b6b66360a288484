use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde_json::json;
use terminal_size::{terminal_size, Width};

use crate::aid::AidEstimate;
use crate::colleges::CollegeMatch;
use crate::quiz::Recommendation;
use crate::scholarships::Scholarship;
use crate::scoring::ScoredCandidate;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Name column width: fits the terminal when there is one, otherwise `preferred`
fn name_width(preferred: usize, fixed_width: usize) -> usize {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => preferred.min(width - fixed_width),
        Some(_) => 10,
        None => preferred,
    }
}

/// Drop a trailing ".0" (e.g., "100.0" -> "100")
fn trim_zero(s: String) -> String {
    match s.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => s,
    }
}

/// Format a fit score as "77.5/100", or "12.0" without a ceiling.
/// If incomplete is true, appends asterisk to indicate partial scoring
pub fn format_fit_score(score: f64, ceiling: Option<f64>, incomplete: bool) -> String {
    let score = format!("{:.1}", score);
    let formatted = match ceiling {
        Some(ceiling) => format!("{}/{}", score, trim_zero(format!("{:.1}", ceiling))),
        None => score,
    };

    if incomplete {
        format!("{}*", formatted)
    } else {
        formatted
    }
}

/// Group the integer part with commas: 1234567 -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "$1,234.56"
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// "$45,000"
pub fn format_dollars(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&format!("{:.0}", amount.abs())))
}

/// Rate in [0, 1] as a whole percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

fn to_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

// Colleges

/// College table: College, Tuition, SAT Avg, Accept%, Fit Score
pub fn format_college_table(
    matches: &[CollegeMatch],
    ceiling: Option<f64>,
    explain: bool,
    use_colors: bool,
) -> String {
    if matches.is_empty() {
        return "No colleges match your criteria.".to_string();
    }

    // Tuition 10, SAT 8, Accept% 8, score ~10, separators
    let width = name_width(25, 10 + 8 + 8 + 10 + 4);
    let header = format!(
        "{:<width$} {:<10} {:<8} {:<8} {}",
        "College",
        "Tuition",
        "SAT Avg",
        "Accept%",
        "Fit Score",
        width = width
    );

    let mut lines = Vec::new();
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header.clone());
    }
    lines.push("-".repeat(header.chars().count()));

    for m in matches {
        let name = truncate_name(&m.college.name, width);
        let score = format_fit_score(m.result.score, ceiling, m.result.incomplete);
        let row = format!(
            "{:<width$} {:<10} {:<8} {:<8} ",
            name,
            format_dollars(m.college.tuition),
            m.college.sat_avg,
            format_percent(m.college.acceptance_rate),
            width = width
        );
        if use_colors {
            lines.push(format!("{}{}", row, score.bold()));
        } else {
            lines.push(format!("{}{}", row, score));
        }
        if explain {
            lines.push(format_breakdown(&m.result, use_colors));
        }
    }

    if matches.iter().any(|m| m.result.incomplete) {
        lines.push(String::new());
        lines.push("* some criteria could not be scored (missing data)".to_string());
    }

    lines.join("\n")
}

/// Per-criterion breakdown, one indented line per contribution
pub fn format_breakdown(result: &ScoredCandidate, use_colors: bool) -> String {
    result
        .breakdown
        .iter()
        .map(|c| {
            let points = format!(
                "{:>6}/{}",
                format!("{:.1}", c.points),
                trim_zero(format!("{:.1}", c.max))
            );
            let detail = if c.missing {
                "missing data".to_string()
            } else {
                c.description.clone()
            };
            if use_colors {
                format!("    {:<12} {}  {}", c.label.dimmed(), points, detail.dimmed())
            } else {
                format!("    {:<12} {}  {}", c.label, points, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns: score, name, tuition, sat_avg, acceptance_rate, location (no headers, no colors)
pub fn format_college_tsv(matches: &[CollegeMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "{:.1}\t{}\t{}\t{}\t{}\t{}",
                m.result.score,
                m.college.name,
                m.college.tuition,
                m.college.sat_avg,
                m.college.acceptance_rate,
                m.college.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_college_json(matches: &[CollegeMatch]) -> Result<String> {
    let rows: Vec<_> = matches
        .iter()
        .map(|m| {
            let breakdown: Vec<_> = m
                .result
                .breakdown
                .iter()
                .map(|c| {
                    json!({
                        "criterion": c.label,
                        "points": c.points,
                        "max": c.max,
                        "missing": c.missing,
                    })
                })
                .collect();
            json!({
                "college": m.college,
                "score": m.result.score,
                "incomplete": m.result.incomplete,
                "breakdown": breakdown,
            })
        })
        .collect();
    to_json(&serde_json::Value::Array(rows))
}

// Quiz

pub fn format_recommendations(recommendations: &[Recommendation], use_colors: bool) -> String {
    if recommendations.is_empty() {
        return "No recommendations: no answers were recorded.".to_string();
    }

    recommendations
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score = format!("({} points)", r.score);
            if use_colors {
                format!(
                    "{} {} {}\n    {}",
                    index_str.dimmed(),
                    r.major.bold(),
                    score.dimmed(),
                    r.description
                )
            } else {
                format!("{} {} {}\n    {}", index_str, r.major, score, r.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns: score, major, description
pub fn format_recommendations_tsv(recommendations: &[Recommendation]) -> String {
    recommendations
        .iter()
        .map(|r| format!("{}\t{}\t{}", r.score, r.major, r.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_recommendations_json(recommendations: &[Recommendation]) -> Result<String> {
    serde_json::to_string_pretty(recommendations).context("Failed to serialize output")
}

// Scholarships

fn days_left(days: i64) -> String {
    match days {
        d if d < 0 => "closed".to_string(),
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        d => format!("{} days", d),
    }
}

/// Scholarship table: Name, Amount, GPA Req, Major, Deadline, Days Left
pub fn format_scholarship_table(scholarships: &[&Scholarship], today: NaiveDate, use_colors: bool) -> String {
    if scholarships.is_empty() {
        return "No eligible scholarships found.".to_string();
    }

    let width = name_width(30, 10 + 8 + 15 + 10 + 10 + 5);
    let header = format!(
        "{:<width$} {:<10} {:<8} {:<15} {:<10} {}",
        "Name",
        "Amount",
        "GPA Req",
        "Major",
        "Deadline",
        "Days Left",
        width = width
    );

    let mut lines = Vec::new();
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header.clone());
    }
    lines.push("-".repeat(header.chars().count()));

    for s in scholarships {
        let days = s.days_remaining(today);
        let row = format!(
            "{:<width$} {:<10} {:<8} {:<15} {:<10} ",
            truncate_name(&s.name, width),
            format_dollars(s.amount),
            s.gpa_min,
            s.major,
            s.deadline.format("%Y-%m-%d").to_string(),
            width = width
        );
        let left = days_left(days);
        if !use_colors {
            lines.push(format!("{}{}", row, left));
        } else if days < 0 {
            lines.push(format!("{}{}", row.dimmed(), left.dimmed()));
        } else if days <= 14 {
            lines.push(format!("{}{}", row, left.red()));
        } else {
            lines.push(format!("{}{}", row, left));
        }
    }

    lines.join("\n")
}

/// Columns: name, amount, gpa_min, major, deadline, days_remaining
pub fn format_scholarship_tsv(scholarships: &[&Scholarship], today: NaiveDate) -> String {
    scholarships
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                s.name,
                s.amount,
                s.gpa_min,
                s.major,
                s.deadline.format("%Y-%m-%d"),
                s.days_remaining(today)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_scholarship_json(scholarships: &[&Scholarship], today: NaiveDate) -> Result<String> {
    let rows: Vec<_> = scholarships
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "amount": s.amount,
                "gpa_min": s.gpa_min,
                "major": s.major,
                "deadline": s.deadline,
                "days_remaining": s.days_remaining(today),
            })
        })
        .collect();
    to_json(&serde_json::Value::Array(rows))
}

// Aid

pub fn format_aid_estimate(estimate: &AidEstimate, use_colors: bool) -> String {
    let rows = [
        ("Annual Tuition:", estimate.tuition),
        ("Need-based Aid:", estimate.need_based),
        ("Merit-based Aid:", estimate.merit),
        ("Total Aid:", estimate.total),
        ("Net Cost:", estimate.net_cost),
        ("Estimated Loans Needed:", estimate.loans),
    ];

    rows.iter()
        .map(|(label, amount)| {
            let line = format!("{:<24} {}", label, format_money(*amount));
            if use_colors && *label == "Net Cost:" {
                line.bold().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns: tuition, need_based, merit, total, net_cost, loans
pub fn format_aid_tsv(estimate: &AidEstimate) -> String {
    format!(
        "{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
        estimate.tuition, estimate.need_based, estimate.merit, estimate.total, estimate.net_cost, estimate.loans
    )
}

pub fn format_aid_json(estimate: &AidEstimate) -> Result<String> {
    serde_json::to_string_pretty(estimate).context("Failed to serialize output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colleges::{compare, default_colleges, CompareRequest};
    use crate::scholarships::default_scholarships;
    use crate::scoring::{ScoringConfig, ScoringEngine};

    fn ranked(colleges: &[crate::colleges::College]) -> Vec<CollegeMatch<'_>> {
        let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
        let request = CompareRequest {
            sat: 1300.0,
            budget: 40000.0,
            location: None,
        };
        compare(colleges, &engine, &request, 5)
    }

    #[test]
    fn test_format_fit_score() {
        assert_eq!(format_fit_score(77.5, Some(100.0), false), "77.5/100");
        assert_eq!(format_fit_score(100.0, Some(100.0), false), "100.0/100");
        assert_eq!(format_fit_score(82.833, Some(100.0), true), "82.8/100*");
        assert_eq!(format_fit_score(12.0, None, false), "12.0");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.5), "$999.50");
        assert_eq!(format_money(1234.56), "$1,234.56");
        assert_eq!(format_money(1234567.0), "$1,234,567.00");
        assert_eq!(format_money(-2500.0), "-$2,500.00");
    }

    #[test]
    fn test_format_dollars_and_percent() {
        assert_eq!(format_dollars(45000.0), "$45,000");
        assert_eq!(format_dollars(8000.0), "$8,000");
        assert_eq!(format_percent(0.65), "65%");
        assert_eq!(format_percent(0.15), "15%");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("State University", 30), "State University");
        assert_eq!(truncate_name("Liberal Arts College", 10), "Liberal...");
        assert_eq!(truncate_name("Élite", 3), "Éli");
    }

    #[test]
    fn test_college_table() {
        let colleges = default_colleges();
        let matches = ranked(&colleges);
        let table = format_college_table(&matches, Some(100.0), false, false);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("College"));
        assert!(lines[0].ends_with("Fit Score"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("State University"));
        assert!(lines[2].contains("$25,000"));
        assert!(lines[2].contains("65%"));
        assert!(lines[2].ends_with("82.8/100"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_college_table_empty() {
        assert_eq!(
            format_college_table(&[], Some(100.0), false, false),
            "No colleges match your criteria."
        );
    }

    #[test]
    fn test_college_table_explain() {
        let colleges = default_colleges();
        let matches = ranked(&colleges);
        let table = format_college_table(&matches[..1], Some(100.0), true, false);
        assert!(table.contains("    sat"));
        assert!(table.contains("    budget"));
        assert!(table.contains("    acceptance"));
    }

    #[test]
    fn test_college_tsv_and_json() {
        let colleges = default_colleges();
        let matches = ranked(&colleges);

        let tsv = format_college_tsv(&matches);
        let first = tsv.lines().next().unwrap();
        assert!(first.starts_with("82.8\tState University\t"));

        let json = format_college_json(&matches).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 5);
        assert_eq!(parsed[0]["college"]["name"], "State University");
        assert_eq!(parsed[0]["breakdown"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_recommendations() {
        let recs = vec![
            Recommendation {
                major: "Engineering".to_string(),
                score: 5,
                description: "Design things.".to_string(),
            },
            Recommendation {
                major: "Math".to_string(),
                score: 3,
                description: "Prove things.".to_string(),
            },
        ];
        let out = format_recommendations(&recs, false);
        assert!(out.starts_with(" 1. Engineering (5 points)\n    Design things."));
        assert!(out.contains(" 2. Math (3 points)"));
        assert_eq!(format_recommendations_tsv(&recs), "5\tEngineering\tDesign things.\n3\tMath\tProve things.");
        assert!(format_recommendations(&[], false).starts_with("No recommendations"));
    }

    #[test]
    fn test_scholarship_table() {
        let all = default_scholarships();
        let refs: Vec<&Scholarship> = all.iter().collect();
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let table = format_scholarship_table(&refs, today, false);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].starts_with("Merit Excellence Scholarship"));
        assert!(lines[2].ends_with("closed"));
        assert!(lines[6].ends_with("56 days"));

        let tsv = format_scholarship_tsv(&refs, today);
        assert!(tsv.lines().nth(2).unwrap().ends_with("\t2024-04-01\t12"));

        let json: serde_json::Value =
            serde_json::from_str(&format_scholarship_json(&refs, today).unwrap()).unwrap();
        assert_eq!(json[0]["deadline"], "2024-03-15");
        assert_eq!(json[0]["days_remaining"], -5);
    }

    #[test]
    fn test_aid_estimate() {
        let estimate = AidEstimate {
            tuition: 35000.0,
            need_based: 14000.0,
            merit: 5250.0,
            total: 19250.0,
            net_cost: 15750.0,
            loans: 8250.0,
        };
        let out = format_aid_estimate(&estimate, false);
        assert!(out.contains("Annual Tuition:          $35,000.00"));
        assert!(out.contains("Estimated Loans Needed:  $8,250.00"));
        assert_eq!(
            format_aid_tsv(&estimate),
            "35000.00\t14000.00\t5250.00\t19250.00\t15750.00\t8250.00"
        );
        let json: serde_json::Value = serde_json::from_str(&format_aid_json(&estimate).unwrap()).unwrap();
        assert_eq!(json["merit"], 5250.0);
    }
}
