// Prompt text for resume analysis.
// The JSON contract below is the only protocol we have with the model.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Key names the model is told to emit and the parser reads back.
/// Builder and parser share one instance so the two cannot drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSchema {
    pub score_key: &'static str,
    pub keywords_key: &'static str,
    pub suggestions_key: &'static str,
}

impl Default for ResponseSchema {
    fn default() -> Self {
        Self {
            score_key: "relevance_score",
            keywords_key: "missing_keywords",
            suggestions_key: "suggestions",
        }
    }
}

/// Persona wording for the evaluator. Only the framing changes between
/// profiles; the output contract is the same for all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptProfile {
    #[default]
    Evaluator,
    Ats,
    Coach,
}

impl PromptProfile {
    pub fn persona(&self) -> &'static str {
        match self {
            PromptProfile::Evaluator => {
                "You are an experienced resume evaluator. \
                 Compare the candidate's resume against the job description and judge how well it fits."
            }
            PromptProfile::Ats => {
                "You are an applicant tracking system (ATS) scanner. \
                 Score the resume the way an ATS would, focusing on keyword and skill coverage for the job description."
            }
            PromptProfile::Coach => {
                "You are a career coach reviewing a client's resume. \
                 Compare it with the job description and give practical advice to improve the fit."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptProfile::Evaluator => "evaluator",
            PromptProfile::Ats => "ats",
            PromptProfile::Coach => "coach",
        }
    }
}

impl fmt::Display for PromptProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evaluator" => Ok(PromptProfile::Evaluator),
            "ats" => Ok(PromptProfile::Ats),
            "coach" => Ok(PromptProfile::Coach),
            other => Err(format!(
                "unknown prompt profile '{other}' (expected evaluator, ats or coach)"
            )),
        }
    }
}

/// System prompt that enforces the JSON-only contract.
pub fn analysis_system(profile: PromptProfile, schema: &ResponseSchema) -> String {
    format!(
        "{persona} \
         You MUST respond with a single valid JSON object only. \
         The object must contain exactly these keys: \"{score}\", \"{keywords}\", \"{suggestions}\". \
         Do NOT add any other top-level keys. \
         Do NOT include any text outside the JSON object. \
         Do NOT use markdown code fences. \
         Do NOT include explanations or apologies.",
        persona = profile.persona(),
        score = schema.score_key,
        keywords = schema.keywords_key,
        suggestions = schema.suggestions_key,
    )
}

/// User prompt carrying both documents. Texts are embedded verbatim.
pub fn analysis_prompt(resume_text: &str, jd_text: &str, schema: &ResponseSchema) -> String {
    format!(
        r#"Compare the resume below against the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}

OUTPUT SCHEMA (return exactly this structure, nothing else):
{{
  "{score}": "a number from 0 to 10 describing how relevant the resume is to the job",
  "{keywords}": ["important keyword from the job description that the resume lacks"],
  "{suggestions}": ["one concrete change that would make the resume a better fit"]
}}

RULES:
1. "{score}" is out of 10. Use a plain number such as "7".
2. "{keywords}" and "{suggestions}" are arrays of strings. Use [] when there is nothing to report.
3. Return ONLY the JSON object. No narration, no extra prose, no code fences."#,
        score = schema.score_key,
        keywords = schema.keywords_key,
        suggestions = schema.suggestions_key,
    )
}
