//! Templated text generator backing the form's "AI" enrichment buttons.
//!
//! Pure string templating — no model call anywhere. Output varies with the
//! job title (a hash picks the phrasing variant) but is deterministic per
//! input, so enrichment is reproducible and testable.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

/// The sections the generator can write text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Summary,
    Experience,
    Skills,
    CoverLetter,
}

impl TextKind {
    /// Parses the wire value from the enrichment request.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(TextKind::Summary),
            "experience" => Some(TextKind::Experience),
            "skills" => Some(TextKind::Skills),
            "coverLetter" | "cover_letter" => Some(TextKind::CoverLetter),
            _ => None,
        }
    }
}

/// Free-form context posted alongside the kind. Everything is optional;
/// templates fall back to neutral wording.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    pub job_title: Option<String>,
    pub full_name: Option<String>,
    pub skills: Option<String>,
    pub keywords: Option<String>,
    pub current_text: Option<String>,
}

const SUMMARY_ADJECTIVES: [&str; 5] = [
    "Motivated",
    "Experienced",
    "Results-oriented",
    "Creative",
    "Dedicated",
];

const COMMON_SKILLS: [&str; 4] = [
    "Communication",
    "Leadership",
    "Project Management",
    "Problem Solving",
];
const TECH_SKILLS: [&str; 6] = ["Python", "JavaScript", "React", "Node.js", "SQL", "AWS"];
const DESIGN_SKILLS: [&str; 4] = ["Photoshop", "Figma", "UI/UX", "Branding"];

/// Generates enrichment text for the given section.
pub fn generate(kind: TextKind, context: &GenerationContext) -> String {
    let job_title = context.job_title.as_deref().unwrap_or("Professional");

    match kind {
        TextKind::Summary => {
            let adjective = pick(&SUMMARY_ADJECTIVES, job_title);
            format!(
                "{adjective} {job_title} with a proven track record of success. \
                 Skilled in problem-solving and driving operational efficiency. \
                 Committed to delivering high-quality results in fast-paced environments."
            )
        }
        TextKind::Experience => format!(
            "• Spearheaded key projects for {job_title} roles, improving efficiency by 20%.\n\
             • Collaborated with cross-functional teams to deliver high-quality solutions.\n\
             • Mentored junior team members and implemented best practices.\n\
             • Analyzed data trends to drive strategic decision-making."
        ),
        TextKind::Skills => skill_list(job_title),
        TextKind::CoverLetter => {
            let name = context.full_name.as_deref().unwrap_or("");
            let skills = context.skills.as_deref().unwrap_or("my field");
            format!(
                "Dear Hiring Manager,\n\n\
                 I am writing to express my interest in the {job_title} position. \
                 With my background in {skills}, I am confident in my ability to \
                 contribute.\n\nSincerely,\n{name}"
            )
        }
    }
}

/// Skill suggestions keyed off the job title, tech or design stacks first
/// when the title hints at them. Rotation (not random shuffle) keeps output
/// deterministic per title while still varying across titles.
fn skill_list(job_title: &str) -> String {
    let lower = job_title.to_lowercase();
    let mut pool: Vec<&str> = if lower.contains("software") || lower.contains("developer") {
        TECH_SKILLS.iter().chain(COMMON_SKILLS.iter()).copied().collect()
    } else if lower.contains("design") {
        DESIGN_SKILLS.iter().chain(COMMON_SKILLS.iter()).copied().collect()
    } else {
        COMMON_SKILLS.to_vec()
    };

    let offset = hash_of(job_title) as usize % pool.len();
    pool.rotate_left(offset);
    pool.truncate(8);
    pool.join(", ")
}

fn pick<'a>(options: &[&'a str], seed: &str) -> &'a str {
    options[hash_of(seed) as usize % options.len()]
}

fn hash_of(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}
