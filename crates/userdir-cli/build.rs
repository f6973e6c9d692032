//! Build script to stamp the binary with the workspace's git version.

use std::path::PathBuf;
use std::process::Command;

fn main() {
    // The package lives below the repository root, so ask git where its
    // metadata is instead of assuming `.git` next to this file.
    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        let git_dir = PathBuf::from(git_dir);
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
        println!("cargo:rerun-if-changed={}", git_dir.join("refs").display());
    }

    // Outside a checkout (e.g. a crates.io tarball) fall back to the manifest version
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=USERDIR_VERSION={}", version);
}

fn git_version() -> Option<String> {
    // Tags look like v0.1.0; `--dirty` marks builds from a modified tree
    let version = git(&["describe", "--tags", "--always", "--dirty"])?;
    Some(version.strip_prefix('v').unwrap_or(&version).to_string())
}

/// Run git and return trimmed stdout, or `None` on any failure.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let stdout = stdout.trim();

    if stdout.is_empty() {
        return None;
    }

    Some(stdout.to_string())
}
