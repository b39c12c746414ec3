use anyhow::Context;
use colored::Colorize;
use tracing::info;
use ymerge_io::{load_all, render, write_output, DocumentSource};
use ymerge_merge::{merge_all, Conflict, TracingSink};
use ymerge_types::Mapping;

use crate::config::CliConfig;

/// Result of folding every input document.
pub struct MergeOutcome {
    pub merged: Mapping,
    pub conflicts: Vec<Conflict>,
}

/// Load `sources` and fold them in order.
///
/// Nothing is merged unless every source loads. Conflicts are logged as they
/// happen and also collected for the summary.
pub fn merge_sources(sources: &[DocumentSource]) -> ymerge_io::Result<MergeOutcome> {
    let documents = load_all(sources)?;
    let mut conflicts = Vec::new();
    let merged = merge_all(documents, &mut (TracingSink, &mut conflicts));
    info!(
        documents = sources.len(),
        keys = merged.len(),
        conflicts = conflicts.len(),
        "merge complete"
    );
    Ok(MergeOutcome { merged, conflicts })
}

pub fn run(sources: &[DocumentSource], config: &CliConfig) -> anyhow::Result<()> {
    let outcome = merge_sources(sources).context("Error merging YAML files")?;

    if config.report_conflicts {
        print_conflict_summary(&outcome.conflicts);
    }

    let text = render(outcome.merged, config.format)
        .context("Error marshaling merged YAML data")?;
    write_output(&text, config.output.as_deref())?;
    Ok(())
}

fn print_conflict_summary(conflicts: &[Conflict]) {
    if conflicts.is_empty() {
        eprintln!("{} no conflicts", "✓".green().bold());
        return;
    }
    eprintln!(
        "{} {} conflicting key(s), earlier values kept:",
        "!".yellow().bold(),
        conflicts.len()
    );
    for conflict in conflicts {
        eprintln!(
            "  {} ({} kept, {} discarded)",
            conflict.path.to_string().yellow(),
            conflict.kept,
            conflict.discarded
        );
    }
}
