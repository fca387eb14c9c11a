//! The upload/result page. One template, three states: empty form,
//! rendered analysis, or an error banner.

use askama::Template;

use crate::analysis::presenter::{ListView, RenderedAnalysis, ReportView};
use crate::errors::AppError;

pub const TITLE: &str = "Analyze Your Resume";
pub const CAPTION: &str = "Scan. Analyze. Improve. Let AI help you land the job.";

pub struct Banner {
    pub level: &'static str,
    pub message: String,
}

pub struct RawView {
    pub warning: &'static str,
    pub raw: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
    pub caption: &'static str,
    pub banner: Option<Banner>,
    pub report: Option<ReportView>,
    pub raw: Option<RawView>,
}

impl IndexPage {
    pub fn empty() -> Self {
        Self {
            title: TITLE,
            caption: CAPTION,
            banner: None,
            report: None,
            raw: None,
        }
    }

    pub fn with_analysis(display: RenderedAnalysis) -> Self {
        let mut page = Self::empty();
        match display {
            RenderedAnalysis::Report(report) => page.report = Some(report),
            RenderedAnalysis::Raw { warning, raw } => page.raw = Some(RawView { warning, raw }),
        }
        page
    }

    pub fn with_error(err: &AppError) -> Self {
        let mut page = Self::empty();
        page.banner = Some(Banner {
            level: "error",
            message: err.user_message(),
        });
        page
    }
}
