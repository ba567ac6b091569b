//! Step views and record reviews.

use std::fmt;

use crate::{forms::StepView, models::FieldValue, wizard::Wizard};

/// Width of the text progress bar, in cells.
const BAR_WIDTH: usize = 20;

fn progress_bar(percent: usize) -> String {
    let filled = (percent.min(100) * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl fmt::Display for StepView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.form)?;
        writeln!(f)?;
        writeln!(
            f,
            "## Step {} of {}: {}",
            self.index + 1,
            self.count,
            self.title
        )?;
        writeln!(f)?;
        writeln!(f, "`{}` {}%", progress_bar(self.progress()), self.progress())?;
        writeln!(f)?;

        if self.submitting {
            writeln!(f, "> Submitting...")?;
            writeln!(f)?;
        }
        if let Some(error) = &self.error {
            for line in error.lines() {
                writeln!(f, "> **{line}**")?;
            }
            writeln!(f)?;
        }

        for field in &self.fields {
            let marker = if field.required { " *" } else { "" };
            let lock = if field.read_only { " (read-only)" } else { "" };
            let value = if field.value.is_empty() {
                field
                    .placeholder
                    .as_deref()
                    .map(|p| format!("_e.g. {p}_"))
                    .unwrap_or_else(|| "_empty_".to_string())
            } else {
                field.value.clone()
            };
            writeln!(
                f,
                "- **{}**{marker}{lock} `{}.{}` [{}]: {value}",
                field.label, self.section, field.name, field.kind
            )?;
            if let Some(error) = &field.error {
                writeln!(f, "  - *{error}*")?;
            }
        }

        writeln!(f)?;
        if self.is_last() {
            writeln!(f, "Last step: review and submit.")
        } else {
            writeln!(f, "Next: {} more step(s).", self.count - self.index - 1)
        }
    }
}

/// Every section of a wizard's record, labelled by step.
pub struct RecordReview<'a>(pub &'a Wizard);

impl fmt::Display for RecordReview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wizard = self.0;
        writeln!(f, "# {} (review)", wizard.schema().title)?;

        for (index, step) in wizard.schema().steps.iter().enumerate() {
            let current = if index == wizard.state().step {
                " (current)"
            } else {
                ""
            };
            writeln!(f, "\n## {}. {}{current}\n", index + 1, step.title)?;
            for spec in &step.fields {
                let value = match wizard.record().field(step.section, spec.name) {
                    Some(FieldValue::Text(text)) if !text.trim().is_empty() => text.clone(),
                    Some(FieldValue::Flag(flag)) => (if *flag { "yes" } else { "no" }).to_string(),
                    Some(FieldValue::File(Some(file))) => file.file_name.clone(),
                    _ => "-".to_string(),
                };
                writeln!(f, "- **{}**: {value}", spec.label)?;
            }
        }
        Ok(())
    }
}
