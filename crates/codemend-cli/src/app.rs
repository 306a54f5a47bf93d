use anyhow::{anyhow, Context, Result};
use codemend_core::{patch, report, RepairSession, Settings};
use std::io::Write;
use std::path::Path;

use crate::review::{parse_review_input, ReviewAction, ReviewOutcome};

// ── Run ─────────────────────────────────────────────────────────────────

pub async fn run_file(settings: &Settings, file: &Path) -> Result<()> {
    let mut session = load_session(settings, file)?;

    if let Err(e) = session.run(None).await {
        return Err(anyhow!(report::clean_error(&e.to_string())));
    }

    let logs = session.terminal_logs();
    if !logs.is_empty() {
        println!("{logs}");
    }
    let stderr = session.stderr();
    if !stderr.is_empty() {
        eprintln!("{stderr}");
        if let Some(line) = report::error_line_number(stderr) {
            eprintln!("(error near line {line})");
        }
    }
    Ok(())
}

// ── Repair ──────────────────────────────────────────────────────────────

pub async fn repair_file(
    settings: &Settings,
    file: &Path,
    iterations: Option<u32>,
    yes: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = load_session(settings, file)?;

    if let Err(e) = session.start_repair(iterations).await {
        return Err(anyhow!(report::clean_error(&e.to_string())));
    }

    if session.history().is_empty() {
        println!("No patches produced; the code may already run cleanly.");
        return Ok(());
    }

    eprintln!("Repair finished with {} patch(es).", session.history().len());
    if !yes && review_patches(&mut session)? == ReviewOutcome::Declined {
        eprintln!("No patches applied; nothing written.");
        return Ok(());
    }
    write_result(&session, file, output)
}

// ── Patch ───────────────────────────────────────────────────────────────

pub async fn patch_file(
    settings: &Settings,
    file: &Path,
    yes: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = load_session(settings, file)?;

    if let Err(e) = session.generate_patch().await {
        return Err(anyhow!(report::clean_error(&e.to_string())));
    }

    if yes {
        if let Some(index) = session.selected_index() {
            session.apply_at(index);
        }
    } else if review_patches(&mut session)? == ReviewOutcome::Declined {
        eprintln!("No patches applied; nothing written.");
        return Ok(());
    }
    write_result(&session, file, output)
}

// ── Chat ────────────────────────────────────────────────────────────────

pub async fn chat_once(settings: &Settings, file: &Path, message: &str) -> Result<()> {
    let mut session = load_session(settings, file)?;
    let reply = session.chat(message).await?;
    println!("{reply}");
    Ok(())
}

// ── Review loop ─────────────────────────────────────────────────────────

/// Walk the patch log from the first entry, showing each diff and letting
/// the user apply, reject, or skip. The cursor drives the loop, so a
/// rejection lands on the next entry still awaiting review. The outcome
/// reports whether anything was applied, so a quit or a reject-everything
/// pass never reaches the file on disk.
fn review_patches(session: &mut RepairSession) -> Result<ReviewOutcome> {
    session.select_at(Some(0));
    let total = session.history().len();
    let stdin = std::io::stdin();
    let mut applied = 0;

    while let Some(index) = session.selected_index() {
        let (diff, reasoning) = match session.history().get(index) {
            Some(entry) => (entry.unified_diff(), entry.reasoning.clone()),
            None => break,
        };

        println!("\nPatch {} of {}", index + 1, total);
        if !reasoning.is_empty() {
            println!("{reasoning}");
        }
        if patch::is_patch_empty(&diff) {
            println!("(no textual change)");
        } else {
            print!("{diff}");
        }

        print!("[a]pply / [r]eject / [s]kip / [q]uit review: ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        stdin.read_line(&mut input)?;

        match parse_review_input(&input) {
            ReviewAction::Apply => {
                if session.apply_at(index) {
                    applied += 1;
                }
            }
            ReviewAction::Reject => {
                session.reject_at(index);
            }
            ReviewAction::Quit => break,
            ReviewAction::Skip => {
                let next = index + 1;
                session.select_at(if next < total { Some(next) } else { None });
            }
        }
    }
    Ok(ReviewOutcome::from_applied(applied))
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn load_session(settings: &Settings, file: &Path) -> Result<RepairSession> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;
    tracing::debug!("loaded {} bytes from {}", code.len(), file.display());
    let mut session = settings.build_session()?;
    session.load_code(Some(&code));
    Ok(session)
}

fn write_result(session: &RepairSession, file: &Path, output: Option<&Path>) -> Result<()> {
    let target = output.unwrap_or(file);
    std::fs::write(target, session.current_code())
        .with_context(|| format!("could not write {}", target.display()))?;
    eprintln!("Wrote {}", target.display());
    Ok(())
}
