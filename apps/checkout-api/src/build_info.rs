//! Version and git details captured by `build.rs`.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash the binary was built from.
pub const GIT_COMMIT: &str = env!("CHECKOUT_GIT_COMMIT");

/// Committer date of [`GIT_COMMIT`].
pub const COMMIT_DATE: &str = env!("CHECKOUT_COMMIT_DATE");

const GIT_DIRTY: &str = env!("CHECKOUT_GIT_DIRTY");

/// True when the build included uncommitted changes.
pub fn is_dirty() -> bool {
    GIT_DIRTY == "true"
}

/// Text printed by `checkout-api version`.
pub fn version_report() -> String {
    let mut report = format!(
        "version: {}\ngit commit sha: {}\ncommit timestamp: {}\n",
        VERSION, GIT_COMMIT, COMMIT_DATE
    );
    if is_dirty() {
        report.push_str("git tree DIRTY (uncommitted changes in build)\n");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_report() {
        let report = version_report();
        assert!(report.starts_with(&format!("version: {}\n", VERSION)));
        assert!(report.contains(&format!("git commit sha: {}", GIT_COMMIT)));
        assert_eq!(report.contains("DIRTY"), is_dirty());
    }
}
