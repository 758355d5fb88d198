//! Fact-check pipeline logic: prompt, response repair and reports

mod prompt;
mod repair;
mod report;
mod verdict;

pub use prompt::build_judgment_prompt;
pub use repair::{parse_judgment, strip_code_fence, ResponseParseError};
pub use report::{confidence_from_distance, ClaimReport, RetrievalMetadata, MODEL_OUTPUT_FORMAT_ERROR};
pub use verdict::{Judgment, Verdict};
