//! Embeds git build details as compile-time environment variables:
//!
//! - `CHECKOUT_GIT_COMMIT`: short commit hash, or `unknown`
//! - `CHECKOUT_COMMIT_DATE`: committer date (ISO 8601), or `unknown`
//! - `CHECKOUT_GIT_DIRTY`: `true` when the work tree had uncommitted changes
//!
//! Each can be preset in the build environment (release pipelines building
//! from a source tarball have no `.git`).

use std::env;
use std::path::Path;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn emit(name: &str, detect: impl FnOnce() -> String) {
    println!("cargo:rerun-if-env-changed={}", name);
    let value = env::var(name).unwrap_or_else(|_| detect());
    println!("cargo:rustc-env={}={}", name, value);
}

fn main() {
    for watched in ["../../.git/HEAD", "../../.git/index"] {
        if Path::new(watched).exists() {
            println!("cargo:rerun-if-changed={}", watched);
        }
    }

    emit("CHECKOUT_GIT_COMMIT", || {
        git(&["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
    });
    emit("CHECKOUT_COMMIT_DATE", || {
        git(&["log", "-1", "--format=%cI"]).unwrap_or_else(|| "unknown".to_string())
    });
    emit("CHECKOUT_GIT_DIRTY", || {
        let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
            .is_some_and(|status| !status.is_empty());
        dirty.to_string()
    });
}
