//! Command handlers
//!
//! Each handler prints its output and returns the process exit code. The
//! work itself is done by `run_*` functions that return the text, so it can
//! be exercised against a [`MockFileSystem`](crate::fs::MockFileSystem).

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::commands::{AuditArgs, DecodeArgs, GrantArgs, LsArgs};
use super::output::OutputFormatter;
use crate::entry::FileEntry;
use crate::error::{parse_mode, ParseModeError};
use crate::fs::{mode, FileSystem};
use crate::permissions::Permissions;
use crate::render::Renderer;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_FINDINGS: i32 = 3;

/// Text produced by a command and the exit code it ends with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

impl Outcome {
    fn new(output: String, exit_code: i32) -> Self {
        Self { output, exit_code }
    }
}

fn emit(result: Result<Outcome>, failure_code: i32) -> i32 {
    match result {
        Ok(outcome) => {
            print!("{}", outcome.output);
            outcome.exit_code
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {:#}", e);
            failure_code
        }
    }
}

/// Loads entries for `paths`, expanding directories into their children
/// when `expand_dirs` is set. Paths that cannot be stat'ed at all are skipped
/// and counted.
pub fn collect_entries<F: FileSystem + ?Sized>(
    fs: &F,
    paths: &[PathBuf],
    expand_dirs: bool,
) -> (Vec<FileEntry>, usize) {
    let default_paths = [PathBuf::from(".")];
    let paths = if paths.is_empty() {
        &default_paths[..]
    } else {
        paths
    };

    let mut entries = Vec::new();
    let mut failures = 0;

    for path in paths {
        if fs.symlink_metadata(path).is_err() {
            warn!(path = %path.display(), "cannot access path");
            failures += 1;
            continue;
        }

        let is_dir = fs.metadata(path).map(|m| m.is_dir()).unwrap_or(false);
        if !(expand_dirs && is_dir) {
            entries.push(FileEntry::load(fs, path));
            continue;
        }

        match fs.read_dir(path) {
            Ok(children) => {
                debug!(path = %path.display(), count = children.len(), "listing directory");
                entries.extend(children.iter().map(|c| FileEntry::load(fs, c.path())));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read directory");
                failures += 1;
            }
        }
    }

    (entries, failures)
}

fn failure_code(failures: usize) -> i32 {
    if failures > 0 {
        EXIT_FAILURE
    } else {
        EXIT_OK
    }
}

pub fn run_ls<F: FileSystem + ?Sized>(
    fs: &F,
    renderer: &Renderer,
    args: &LsArgs,
) -> Result<Outcome> {
    let formatter = OutputFormatter::new(args.format.into(), renderer.clone());
    let (entries, failures) = collect_entries(fs, &args.paths, !args.directory);
    let output = formatter.format_entries(&entries)?;
    Ok(Outcome::new(output, failure_code(failures)))
}

pub fn handle_ls<F: FileSystem + ?Sized>(fs: &F, renderer: &Renderer, args: &LsArgs) -> i32 {
    emit(run_ls(fs, renderer, args), EXIT_FAILURE)
}

/// Parses each mode string. POSIX `st_mode` values are converted to the
/// packed layout unless `raw` is set.
pub fn decode_modes(
    modes: &[String],
    raw: bool,
) -> std::result::Result<Vec<(String, Permissions)>, ParseModeError> {
    modes
        .iter()
        .map(|input| {
            let value = parse_mode(input)?;
            let word = if raw { value } else { mode::from_posix(value) };
            Ok((input.clone(), Permissions::from_mode(word)))
        })
        .collect()
}

pub fn run_decode(renderer: &Renderer, args: &DecodeArgs) -> Result<Outcome> {
    let formatter = OutputFormatter::new(args.format.into(), renderer.clone());
    let decoded = decode_modes(&args.modes, args.raw)?;
    let output = formatter.format_decoded(&decoded)?;
    Ok(Outcome::new(output, EXIT_OK))
}

pub fn handle_decode(renderer: &Renderer, args: &DecodeArgs) -> i32 {
    emit(run_decode(renderer, args), EXIT_USAGE)
}

pub fn run_audit<F: FileSystem + ?Sized>(
    fs: &F,
    renderer: &Renderer,
    args: &AuditArgs,
    default_threshold: f64,
) -> Result<Outcome> {
    let threshold = args.min_risk.unwrap_or(default_threshold);
    let formatter = OutputFormatter::new(args.format.into(), renderer.clone());

    let (entries, failures) = collect_entries(fs, &args.paths, true);
    let scanned = entries.len();
    let findings: Vec<FileEntry> = entries
        .into_iter()
        .filter(|e| e.exists && e.permissions.risk() >= threshold)
        .collect();

    info!(scanned, findings = findings.len(), threshold, "audit complete");

    let output = formatter.format_audit(&findings, scanned, threshold)?;
    let exit_code = if findings.is_empty() {
        failure_code(failures)
    } else {
        EXIT_FINDINGS
    };
    Ok(Outcome::new(output, exit_code))
}

pub fn handle_audit<F: FileSystem + ?Sized>(
    fs: &F,
    renderer: &Renderer,
    args: &AuditArgs,
    default_threshold: f64,
) -> i32 {
    emit(
        run_audit(fs, renderer, args, default_threshold),
        EXIT_FAILURE,
    )
}

/// Applies the requested adjustments in read, write, exec order. A granted
/// exec re-adds read for its subjects.
pub fn apply_grants(perms: &mut Permissions, args: &GrantArgs) {
    if let Some(s) = args.read {
        perms.grant_read(s.owner, s.group, s.world);
    }
    if let Some(s) = args.write {
        perms.grant_write(s.owner, s.group, s.world);
    }
    if let Some(s) = args.exec {
        perms.grant_exec(s.owner, s.group, s.world);
    }
}

pub fn run_grant<F: FileSystem + ?Sized>(
    fs: &F,
    renderer: &Renderer,
    args: &GrantArgs,
) -> Result<Outcome> {
    let path: &Path = &args.path;
    if !fs.exists(path) {
        bail!("cannot access {}", path.display());
    }

    let before = Permissions::resolve(fs, path);
    let mut after = before.clone();
    apply_grants(&mut after, args);

    if after.posix_mode() != before.posix_mode() {
        fs.set_mode(path, after.posix_mode())
            .with_context(|| format!("Failed to update permissions of {}", path.display()))?;
        info!(
            path = %path.display(),
            from = %before.octal(),
            to = %after.octal(),
            "permissions updated"
        );
    } else {
        debug!(path = %path.display(), "permissions unchanged");
    }

    let formatter = OutputFormatter::new(args.format.into(), renderer.clone());
    let output = formatter.format_grant(path, &before, &after)?;
    Ok(Outcome::new(output, EXIT_OK))
}

pub fn handle_grant<F: FileSystem + ?Sized>(
    fs: &F,
    renderer: &Renderer,
    args: &GrantArgs,
) -> i32 {
    if args.is_empty() {
        eprintln!("Error: nothing to grant. Pass at least one of --read, --write, --exec");
        return EXIT_USAGE;
    }
    emit(run_grant(fs, renderer, args), EXIT_FAILURE)
}
