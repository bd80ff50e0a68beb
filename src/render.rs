//! Plain-text rendering of view state for the terminal shell.

use std::fmt::Write;

use crate::models::{InsightOutput, InterviewPrepTip, SkillAnalysis, SkillRecommendation};
use crate::session::LOGIN_PROMPT;
use crate::views::{ApplicationRow, ListScreen, PanelView, EMPTY_LIST_MESSAGE};

pub fn list_screen(screen: &ListScreen) -> String {
    match screen {
        ListScreen::LoginPrompt => LOGIN_PROMPT.to_string(),
        ListScreen::Empty => format!("Applications\n\n{}", EMPTY_LIST_MESSAGE),
        ListScreen::Rows(rows) => {
            let mut out = String::from("Applications\n");
            for (i, row) in rows.iter().enumerate() {
                out.push('\n');
                out.push_str(&application_row(i + 1, row));
            }
            out
        }
    }
}

fn application_row(position: usize, row: &ApplicationRow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", position, row.company);
    let _ = writeln!(out, "    Job: {}", row.job);
    let _ = writeln!(out, "    Details: {}", row.details);
    let _ = writeln!(out, "    Deadline: {}", row.deadline);
    let _ = writeln!(out, "    Contact Info: {}", row.contact_info);
    out
}

pub fn panel(view: &PanelView) -> Option<String> {
    match view {
        PanelView::Hidden => None,
        PanelView::Loading(_) => Some("Loading...".to_string()),
        PanelView::Showing(_, output) => Some(insight_output(output)),
    }
}

pub fn insight_output(output: &InsightOutput) -> String {
    match output {
        InsightOutput::Skills(list) => skills(list),
        InsightOutput::Interview(list) => interview(list),
        InsightOutput::SkillAnalysis(analysis) => skill_analysis(analysis),
        InsightOutput::Error(message) => format!("Error: {}", message),
    }
}

fn skills(list: &[SkillRecommendation]) -> String {
    let mut out = String::from("Recommended Skills:\n");
    for item in list {
        let _ = writeln!(out, "  * {}", item.skill);
        let _ = writeln!(out, "    Course: {}", item.course_name);
        let _ = writeln!(out, "    Provider: {}", item.provider);
        let _ = writeln!(out, "    Description: {}", item.description);
    }
    out
}

fn interview(list: &[InterviewPrepTip]) -> String {
    let mut out = String::from("Interview Prep Tips:\n");
    for tip in list {
        let _ = writeln!(out, "  * Platform Name: {}", tip.platform_name);
        let _ = writeln!(out, "    URL: {}", tip.url);
        let _ = writeln!(out, "    Focus: {}", tip.focus);
        let _ = writeln!(out, "    Category: {}", tip.category);
    }
    out
}

fn skill_analysis(analysis: &SkillAnalysis) -> String {
    format!(
        "Skill Analysis:\n  Matched Skills: {}\n  Improve Skills: {}\n  Missing Skills: {}\n",
        analysis.matched_skills.join(", "),
        analysis.improve_skills.join(", "),
        analysis.missing_skills.join(", "),
    )
}
