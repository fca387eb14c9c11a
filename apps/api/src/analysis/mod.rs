// Resume analysis: extract → prompt → model call → parse → present.
// All model calls go through `client::AnalysisClient`.

pub mod client;
pub mod extractor;
pub mod handlers;
pub mod page;
pub mod parser;
pub mod pipeline;
pub mod presenter;
pub mod prompts;
pub mod request;
