use crate::domain::model::QueryResult;
use crate::presentation::theme::Theme;
use std::fmt::Write;

/// Render a result for the terminal
pub fn format_result(query: &str, result: &QueryResult, theme: &Theme) -> String {
    let mut output = String::new();

    writeln!(output, "{}", (theme.heading)(query)).ok();

    if !result.success() {
        writeln!(output, "  {}", (theme.note)("No results")).ok();
    }

    for warning in result.warnings() {
        if let Some(text) = warning.text() {
            writeln!(output, "  {}", (theme.note)(text)).ok();
        }
    }

    for assumption in result.assumptions() {
        if let Some(text) = assumption.text() {
            writeln!(output, "  {}", (theme.note)(&text)).ok();
        }
    }

    let cutoff = "⸺".repeat(40);
    for pod in result.pods() {
        writeln!(output).ok();
        let title = pod.title().unwrap_or("Untitled");
        writeln!(output, "  {}", (theme.pod_title)(title)).ok();
        writeln!(output, "  {}", (theme.line)(&cutoff)).ok();

        let style = if pod.primary() { theme.answer } else { theme.text };
        for subpod in pod.subpods() {
            if let Some(title) = subpod.title() {
                writeln!(output, "  {}", (theme.note)(title)).ok();
            }
            match (subpod.plaintext(), subpod.img()) {
                (Some(text), _) => {
                    for line in text.lines() {
                        writeln!(output, "    {}", style(line)).ok();
                    }
                }
                // image-only subpod
                (None, Some(img)) => {
                    if let Some(src) = img.src() {
                        writeln!(output, "    {}", (theme.link)(src)).ok();
                    }
                }
                (None, None) => {}
            }
        }
    }

    writeln!(output).ok();
    output
}
