//! Async client for the Wolfram|Alpha v2.0 query API.
//!
//! ```no_run
//! # async fn run() -> Result<(), wolfram::WolframError> {
//! let client = wolfram::WolframClient::new("YOUR-APP-ID")?;
//! let result = client.query("integrate x^2", &[]).await?;
//!
//! for pod in result.pods() {
//!     println!("{}: {:?}", pod.title().unwrap_or_default(), pod.text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Responses are parsed into a generic [`Node`] tree first; [`QueryResult`],
//! [`Pod`] and [`Subpod`] are read-only views over that tree.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::error::WolframError;
pub use domain::model::{
    ApiError, Assumption, AssumptionValue, Image, Info, Pod, QueryResult, Subpod, Warning,
};
pub use domain::traits::AnswerEngine;
pub use domain::tree::Node;
pub use infrastructure::network::WolframClient;
pub use infrastructure::xml::parse;
