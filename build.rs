//! Build script embedding the git revision as GIT_HASH

use std::process::Command;

fn git_revision() -> Option<String> {
    let output = Command::new("git").args(["describe", "--always", "--dirty"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!revision.is_empty()).then_some(revision)
}

fn main() {
    let revision = git_revision().unwrap_or_else(|| String::from("unknown"));
    println!("cargo:rustc-env=GIT_HASH={}", revision);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
