use crate::domain::error::WolframError;
use crate::domain::traits::AnswerEngine;

/// Ask a question and return the first textual answer.
///
/// `Ok(None)` means the query went through but nothing in the response
/// reads as an answer; how to present that is up to the caller.
pub async fn first_answer<E>(engine: &E, text: &str) -> Result<Option<String>, WolframError>
where
    E: AnswerEngine + Sync + ?Sized,
{
    let result = engine.ask(text, &[]).await?;
    let answer = result.answer().map(str::to_string);

    if answer.is_none() {
        tracing::debug!(input = text, success = result.success(), "no textual answer");
    }

    Ok(answer)
}
