pub mod concurrency;
pub mod dates;
pub mod files;
pub mod http;
pub mod patterns;
pub mod rules;
pub mod streams;
pub mod text;

pub use concurrency::ConcurrencyChallenges;
pub use dates::DatesChallenges;
pub use files::FileChallenges;
pub use http::HttpChallenges;
pub use patterns::PatternsChallenges;
pub use rules::RulesChallenges;
pub use streams::StreamsChallenges;
pub use text::TextChallenges;

use crate::domain::ports::{ChallengeSet, RunConfig, Storage};
use crate::utils::error::{CampError, Result};

/// Every set this build knows about, in the order a full run executes them.
pub const SET_NAMES: &[&str] = &[
    "dates",
    "text",
    "rules",
    "patterns",
    "streams",
    "http",
    "concurrency",
    "files",
];

/// Resolves requested set names into runnable sets. The HTTP set gets its
/// own copy of the run configuration; the files set gets the storage.
pub fn build_sets<C, S>(names: &[String], config: &C, storage: &S) -> Result<Vec<Box<dyn ChallengeSet>>>
where
    C: RunConfig + Clone + 'static,
    S: Storage + Clone + 'static,
{
    names
        .iter()
        .map(|name| match name.as_str() {
            "dates" => Ok(Box::new(DatesChallenges) as Box<dyn ChallengeSet>),
            "text" => Ok(Box::new(TextChallenges) as Box<dyn ChallengeSet>),
            "rules" => Ok(Box::new(RulesChallenges) as Box<dyn ChallengeSet>),
            "patterns" => Ok(Box::new(PatternsChallenges) as Box<dyn ChallengeSet>),
            "streams" => Ok(Box::new(StreamsChallenges) as Box<dyn ChallengeSet>),
            "http" => Ok(Box::new(HttpChallenges::new(config.clone())) as Box<dyn ChallengeSet>),
            "concurrency" => Ok(Box::new(ConcurrencyChallenges) as Box<dyn ChallengeSet>),
            "files" => Ok(Box::new(FileChallenges::new(storage.clone())) as Box<dyn ChallengeSet>),
            other => Err(CampError::UnknownSetError {
                name: other.to_string(),
            }),
        })
        .collect()
}
