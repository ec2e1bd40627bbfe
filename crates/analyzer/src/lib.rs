pub mod classify;
pub mod corpus;
pub mod features;
pub mod labels;
pub mod metrics;
pub mod patterns;
pub mod personalization;
pub mod profile;
pub mod prompt;
pub mod render;
pub mod validation;

pub use corpus::{AnalyzerError, MessageCorpus};
pub use metrics::Metrics;
pub use profile::{ProfileGenerator, ToneProfile, generate_profile};
pub use prompt::build_rephrase_prompt;
pub use render::{RenderError, render_profile, render_value};
pub use validation::{FieldError, ValidationReport, validate_profile};
