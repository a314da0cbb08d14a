//! Validate command - Check a draft file offline

use std::path::Path;

use crate::domain::{validate_draft, validate_stage_buffer};
use crate::errors::Result;
use crate::fs;

/// Run every stage through the buffer rules, then the whole draft.
///
/// No project or session is needed; nothing is sent anywhere.
pub async fn run(file: &Path) -> Result<()> {
    let draft = fs::read_draft(file)?;

    for (i, stage) in draft.stages.iter().enumerate() {
        validate_stage_buffer(stage, &draft.stages[..i])?;
    }
    validate_draft(&draft)?;

    println!(
        "{}: {} stages, {} actions, OK",
        file.display(),
        draft.stages.len(),
        draft.action_count()
    );
    Ok(())
}
