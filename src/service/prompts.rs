//! Prompt text for the completion provider.

use crate::models::SearchResult;

/// Domains the resource search is restricted to.
pub const LEARNING_DOMAINS: &[&str] = &[
    "coursera.org",
    "khanacademy.org",
    "freecodecamp.org",
    "w3schools.com",
    "developer.mozilla.org",
    "docs.microsoft.com",
    "tutorialspoint.com",
    "geeksforgeeks.org",
    "youtube.com",
    "medium.com",
    "udemy.com",
    "udacity.com",
];

pub const SEARCH_MAX_RESULTS: u32 = 15;
pub const CURATION_MAX_TOKENS: u32 = 2048;
pub const PLAN_MAX_TOKENS: u32 = 1024;

pub fn search_query(subject: &str) -> String {
    format!(
        "best free learning resources tutorials courses guides documentation for learning {}",
        subject
    )
}

pub const CURATION_SYSTEM: &str = "You curate free, high-quality learning resources. \
Pick from reputable platforms and official documentation, prefer well-structured courses \
and tutorials, and only include resources that are free to access. Reply with JSON only.";

pub fn curation_user(subject: &str, search: &SearchResult) -> String {
    let mut context = String::new();
    if !search.answer.is_empty() {
        context.push_str(&search.answer);
        context.push('\n');
    }
    if !search.results.is_empty() {
        let results = serde_json::to_string_pretty(&search.results).unwrap_or_default();
        context.push_str("Additional results:\n");
        context.push_str(&results);
        context.push('\n');
    }

    format!(
        r#"Select exactly 5 of the most valuable free learning resources for {subject}.

Search context:
{context}
Mix formats (video, interactive, documentation), keep them beginner friendly but thorough,
and make sure each one offers clear learning value.

Reply with this JSON object and nothing else:
{{
  "resources": [
    {{
      "title": "Resource name, with platform if relevant",
      "url": "Direct URL",
      "description": "Two or three sentences on what it covers",
      "benefits": ["Concrete benefit", "Another benefit", "Why it suits this subject"],
      "format": "Video Course | Interactive Tutorial | Documentation | ...",
      "difficulty_level": "Beginner | Intermediate | Advanced"
    }}
  ]
}}"#
    )
}

pub const PLAN_SYSTEM: &str =
    "You write detailed, realistic study plans. Reply with JSON only.";

pub fn plan_user(subject: &str, exam_date: &str, days_until_exam: i64) -> String {
    format!(
        r#"Write a study plan for {subject} with {days_until_exam} days left until the exam on {exam_date}.

Reply with this JSON object and nothing else:
{{
  "overview": {{
    "subject": "{subject}",
    "duration": "{days_until_exam} days",
    "examDate": "{exam_date}"
  }},
  "weeklyPlans": [
    {{
      "week": "Week 1",
      "goals": ["Goal 1", "Goal 2"],
      "dailyTasks": [
        {{ "day": "YYYY-MM-DD (Day X)", "tasks": ["Task 1", "Task 2"], "duration": "X hours" }}
      ]
    }}
  ],
  "recommendations": ["Tip 1", "Tip 2"]
}}"#
    )
}
