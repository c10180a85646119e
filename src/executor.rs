// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Plan execution: performs the moves a plan describes

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

use crate::history::{create_entry, History};
use crate::planner::{FileOperation, OrganizeMode};
use crate::Result;

/// Per-batch outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Execute a plan: create category directories, move files, record history.
///
/// Per-operation failures are logged and counted, never abort the batch.
/// With `dry_run` the filesystem and history are left untouched.
pub fn execute_plan(
    plan: &[FileOperation],
    mode: OrganizeMode,
    history: &History,
    dry_run: bool,
) -> Result<ExecutionReport> {
    let mut report = ExecutionReport::default();

    for op in plan {
        if !op.source.exists() {
            warn!("Source no longer exists, skipping: {:?}", op.source);
            report.skipped += 1;
            continue;
        }

        let destination = disambiguate(&op.destination);

        if dry_run {
            info!("DRY RUN: Would move {:?} to {:?}", op.source, destination);
            report.moved += 1;
            continue;
        }

        if let Some(parent) = destination.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create {:?}: {}", parent, e);
                report.failed += 1;
                continue;
            }
        }

        match fs::rename(&op.source, &destination) {
            Ok(()) => {
                let entry = create_entry(
                    Uuid::new_v4().to_string(),
                    op.source.clone(),
                    destination.clone(),
                    op.category.clone(),
                    mode,
                );
                if let Err(e) = history.append(&entry) {
                    warn!("Failed to record history entry: {}", e);
                }
                info!("Moved {:?} to {:?}", op.source, destination);
                report.moved += 1;
            }
            Err(e) => {
                warn!("Failed to move {:?}: {}", op.source, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Undo the most recent `count` moves recorded in history.
///
/// Entries whose destination has vanished or whose source slot is occupied
/// again are skipped.
pub fn undo_moves(history: &History, count: usize, dry_run: bool) -> Result<ExecutionReport> {
    let entries = history.get_undoable()?;
    let to_undo: Vec<_> = entries.into_iter().rev().take(count).collect();

    let mut report = ExecutionReport::default();

    for entry in to_undo {
        if !entry.destination.exists() {
            warn!("File not found (moved or deleted): {:?}", entry.destination);
            report.skipped += 1;
            continue;
        }
        if entry.source.exists() {
            warn!("Original path already occupied: {:?}", entry.source);
            report.skipped += 1;
            continue;
        }

        if dry_run {
            info!("DRY RUN: Would restore {:?} to {:?}", entry.destination, entry.source);
            report.moved += 1;
            continue;
        }

        if let Some(parent) = entry.source.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::rename(&entry.destination, &entry.source) {
            Ok(()) => {
                history.mark_undone(&entry.id)?;
                info!("Restored {:?} to {:?}", entry.destination, entry.source);
                report.moved += 1;
            }
            Err(e) => {
                warn!("Failed to restore {:?}: {}", entry.destination, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Append `_N` before the extension until the destination is free
fn disambiguate(destination: &Path) -> PathBuf {
    if !destination.exists() {
        return destination.to_path_buf();
    }

    let stem = destination
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = destination.extension().and_then(|e| e.to_str());
    let parent = destination.parent().unwrap_or_else(|| Path::new(""));

    for n in 1.. {
        let name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }

    unreachable!()
}
