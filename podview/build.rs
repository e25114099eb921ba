//! Embeds git metadata into the binary for the "Binary Version" section.
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Files whose change means a new commit: HEAD, the branch it points to and
/// packed-refs. Paths come from git so worktrees and `GIT_DIR` are honored.
fn git_rerun_paths() -> Vec<String> {
    let mut refs = vec!["HEAD".to_string(), "packed-refs".to_string()];
    refs.extend(git(&["symbolic-ref", "-q", "HEAD"]));

    refs.iter()
        .filter_map(|r| git(&["rev-parse", "--git-path", r.as_str()]))
        .filter(|path| std::path::Path::new(path).exists())
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for path in git_rerun_paths() {
        println!("cargo:rerun-if-changed={path}");
    }

    let version = git(&["describe", "--tags", "--always", "--dirty"])
        .unwrap_or_else(|| format!("v{}", env!("CARGO_PKG_VERSION")));
    let revision = git(&["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    // Strict ISO 8601 committer date, e.g. 2024-05-01T12:00:00+02:00
    let last_commit = git(&["log", "-1", "--format=%cI"]).unwrap_or_default();

    println!("cargo:rustc-env=PODVIEW_BUILD_VERSION={version}");
    println!("cargo:rustc-env=PODVIEW_BUILD_REVISION={revision}");
    println!("cargo:rustc-env=PODVIEW_BUILD_LAST_COMMIT={last_commit}");
}
