use std::io;
use std::io::IsTerminal;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::Local;

use tone_analyzer::{MessageCorpus, ProfileGenerator, render_profile};
use tone_store::ProfileStore;

use crate::OutputFormat;

pub(crate) fn run_profile_save(
    store: &mut ProfileStore,
    generator: &ProfileGenerator,
    id: &str,
    messages: Vec<String>,
    force: bool,
) -> Result<()> {
    let corpus = MessageCorpus::new(messages)?;
    if !force
        && let Ok(existing) = store.load(id)
        && existing.is_current(&corpus)
    {
        println!("profile '{id}' is already up to date ({} messages)", existing.message_count);
        return Ok(());
    }

    let profile = generator.generate(&corpus);
    let store_path = store.path().display().to_string();
    let record = store.save(id, &corpus, profile)?;
    println!(
        "saved profile '{}' from {} messages to {store_path}",
        record.id, record.message_count
    );
    Ok(())
}

pub(crate) fn run_profile_show(store: &ProfileStore, id: &str, format: OutputFormat) -> Result<()> {
    let record = store.load(id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&record.profile)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&record.profile)?),
        OutputFormat::Report => print!("{}", render_profile(&record.profile)?),
    }
    Ok(())
}

pub(crate) fn run_profile_list(store: &ProfileStore) {
    println!("── stored profiles ──────────────────────────────────");
    if store.is_empty() {
        println!("  (none) - save one with `tone profile save <ID> <INPUT>`");
        return;
    }
    for record in store.list() {
        let updated = record.last_updated.with_timezone(&Local);
        println!(
            "  {:<20} {:>5} msgs  {:<12} updated {}",
            record.id,
            record.message_count,
            record.profile.formality.label(),
            updated.format("%Y-%m-%d %H:%M")
        );
    }
    println!("  ({} profiles total, {})", store.len(), store.path().display());
}

pub(crate) fn run_profile_remove(store: &mut ProfileStore, id: &str, yes: bool) -> Result<()> {
    let record = store.load(id)?;
    println!(
        "about to remove profile '{}' ({} messages, {})",
        record.id,
        record.message_count,
        store.path().display()
    );

    if !yes {
        if !io::stdin().is_terminal() {
            bail!("refusing to remove a profile in non-interactive mode without --yes");
        }

        print!("Type '{id}' to confirm: ");
        io::stdout().flush()?;
        let mut confirmation = String::new();
        io::stdin().read_line(&mut confirmation)?;
        if confirmation.trim() != id {
            println!("remove cancelled");
            return Ok(());
        }
    }

    let removed = store.remove(id)?;
    println!("removed profile '{}'", removed.id);
    println!("remaining profiles: {}", store.len());
    Ok(())
}
