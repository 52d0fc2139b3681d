use crate::domain::error::WolframError;
use crate::domain::model::QueryResult;
use async_trait::async_trait;

/// Something that can answer a free-text query.
///
/// `WolframClient` is the real implementation; callers such as the answer
/// service only depend on this trait, so they can be driven by a canned
/// engine in tests.
#[async_trait]
pub trait AnswerEngine {
    /// Run a query with optional extra `(key, value)` parameters
    async fn ask(&self, input: &str, params: &[(&str, &str)])
        -> Result<QueryResult, WolframError>;
}
