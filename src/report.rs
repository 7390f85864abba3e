//! Plain-text rendering of an analysis for terminals.

use std::fmt::Write;

use crate::domain::models::{PageFacts, ResourceStatus, ScoreResult, Section, Status};

const SECTIONS: [Section; 4] = [
    Section::Structure,
    Section::Security,
    Section::Content,
    Section::Social,
];

fn marker(status: Status) -> &'static str {
    match status {
        Status::Pass => "[PASS]",
        Status::Info => "[INFO]",
        Status::Warning => "[WARN]",
        Status::Fail => "[FAIL]",
        Status::Error => "[ERR ]",
    }
}

pub fn render_text(
    facts: &PageFacts,
    score: &ScoreResult,
    robots_txt: Option<&ResourceStatus>,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "SEO report for {}", facts.url);
    let _ = writeln!(out, "Score: {}/100", score.total);
    let _ = writeln!(
        out,
        "{} pass, {} info, {} warning, {} fail, {} error",
        score.count(Status::Pass),
        score.count(Status::Info),
        score.count(Status::Warning),
        score.count(Status::Fail),
        score.count(Status::Error)
    );

    for section in SECTIONS {
        let verdicts = score.section(section);
        if verdicts.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", section.label());
        for (category, verdict) in verdicts {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                marker(verdict.status),
                category.label(),
                verdict.message
            );
            if verdict.status != Status::Pass && !verdict.tip.is_empty() {
                let _ = writeln!(out, "         {}", verdict.tip);
            }
        }
    }

    if let Some(status) = robots_txt {
        let line = match status {
            ResourceStatus::Found(url) => format!("found at {}", url),
            ResourceStatus::Unauthorized(url) => format!("exists but is protected ({})", url),
            ResourceStatus::NotFound => "not found".to_string(),
        };
        let _ = writeln!(out, "\nrobots.txt: {}", line);
    }

    out
}
