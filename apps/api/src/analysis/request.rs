//! Prompt Builder: composes the single request sent to the model.

use crate::analysis::prompts::{analysis_prompt, analysis_system, PromptProfile, ResponseSchema};

/// Immutable once built. Inputs are carried unmodified; no length limit is
/// applied here.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    resume_text: String,
    jd_text: String,
    system: String,
    prompt: String,
}

impl AnalysisRequest {
    pub fn build(
        resume_text: String,
        jd_text: String,
        profile: PromptProfile,
        schema: &ResponseSchema,
    ) -> Self {
        let system = analysis_system(profile, schema);
        let prompt = analysis_prompt(&resume_text, &jd_text, schema);
        Self {
            resume_text,
            jd_text,
            system,
            prompt,
        }
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn jd_text(&self) -> &str {
        &self.jd_text
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}
