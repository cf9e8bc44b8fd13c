use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=INVSSH_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Release builds pass the tag in INVSSH_VERSION; local builds report the
    // crate version.
    let version = env::var("INVSSH_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());

    let revision = git(&["describe", "--always", "--dirty", "--abbrev=10"])
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=INVSSH_VERSION={version}");
    println!("cargo:rustc-env=INVSSH_BUILD_HASH={revision}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
