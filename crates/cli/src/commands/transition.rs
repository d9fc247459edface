// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `move`, `resolve` and `confirm`: every status change goes through the
//! lifecycle service. Evidence files are uploaded first so the engine only
//! sees URLs.

use std::path::PathBuf;

use fd_core::identity::PartialIdentity;
use fd_core::{
    Actor, Database, FsEvidenceStore, Intent, Issue, Lifecycle, Status, SystemClock,
    TransitionRequest,
};

use super::{current_actor, open_db};
use crate::config::get_evidence_dir;
use crate::error::Result;

/// Parsed transition arguments shared by the three commands.
pub struct TransitionArgs {
    pub id: String,
    pub intent: Intent,
    pub notes: Option<String>,
    pub evidence: Vec<PathBuf>,
}

pub fn run_move(
    flags: &PartialIdentity,
    id: String,
    status: &str,
    notes: Option<String>,
    evidence: Vec<PathBuf>,
) -> Result<()> {
    let intent: Intent = status.parse()?;
    run(flags, TransitionArgs { id, intent, notes, evidence })
}

pub fn run_resolve(
    flags: &PartialIdentity,
    id: String,
    notes: String,
    evidence: Vec<PathBuf>,
) -> Result<()> {
    run(
        flags,
        TransitionArgs {
            id,
            intent: Intent::AdminResolve,
            notes: Some(notes),
            evidence,
        },
    )
}

pub fn run_confirm(
    flags: &PartialIdentity,
    id: String,
    notes: String,
    evidence: Vec<PathBuf>,
) -> Result<()> {
    run(
        flags,
        TransitionArgs {
            id,
            intent: Intent::StudentConfirm,
            notes: Some(notes),
            evidence,
        },
    )
}

fn run(flags: &PartialIdentity, args: TransitionArgs) -> Result<()> {
    let (db, config, work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let evidence = FsEvidenceStore::new(get_evidence_dir(&work_dir, &config));
    let issue = run_impl(&db, &evidence, &actor, args)?;
    println!("{}", describe(&issue));
    Ok(())
}

/// Internal implementation that accepts db and evidence store for testing.
pub(crate) fn run_impl(
    db: &Database,
    evidence: &FsEvidenceStore,
    actor: &Actor,
    args: TransitionArgs,
) -> Result<Issue> {
    let attachments = args
        .evidence
        .iter()
        .map(|path| evidence.upload_file(path))
        .collect::<fd_core::Result<Vec<_>>>()?;

    let mut request = TransitionRequest::new(args.intent).with_attachments(attachments);
    if let Some(notes) = args.notes {
        request = request.with_notes(notes);
    }

    let clock = SystemClock;
    let issue = Lifecycle::new(db, db, &clock).transition(&args.id, actor, &request)?;
    Ok(issue)
}

fn describe(issue: &Issue) -> String {
    match issue.status {
        Status::PendingStudentConfirmation => format!(
            "Marked {} resolved; waiting for the student to confirm",
            issue.id
        ),
        Status::Resolved => format!("Confirmed {} as resolved", issue.id),
        status => format!("Moved {} to {}", issue.id, status),
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
