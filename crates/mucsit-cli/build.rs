//! Build script to capture git version information at compile time.

use std::process::Command;

fn main() {
    // Rerun when HEAD moves or a tag is added
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Fall back to the crate version outside a checkout
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=MUCSIT_VERSION={}", version);
}

/// `git describe` output without a leading `v`, if git is available.
fn git_version() -> Option<String> {
    // Nearest tag, or the short hash when there is none; `-dirty` marks local edits
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    if described.is_empty() {
        return None;
    }

    // Tags are v-prefixed; --version prints the bare number
    Some(described.strip_prefix('v').unwrap_or(described).to_string())
}
