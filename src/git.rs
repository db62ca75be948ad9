use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

pub struct GitOutput {
    pub(crate) stdout: String,
}

impl GitOutput {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}

/// Run git, discarding its stderr. Output is kept untrimmed since trailing
/// whitespace can be part of a path.
pub fn run_git(args: &[&str]) -> Result<GitOutput> {
    tracing::debug!("Running `git {}`", args.join(" "));
    let out = Command::new("git")
        .args(args)
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("running git {args:?}"))?;

    if !out.status.success() {
        bail!("git {:?} failed with exit status: {}", args, out.status);
    }
    Ok(GitOutput {
        stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
    })
}

pub fn status_args(show_ignored: bool) -> Vec<&'static str> {
    let mut args = vec!["status", "--porcelain=v2", "--branch"];
    if show_ignored {
        args.push("--ignored=traditional");
    }
    args
}

/// `git status --porcelain=v2 --branch` for the current directory.
pub fn git_status_porcelain(show_ignored: bool) -> Result<GitOutput> {
    run_git(&status_args(show_ignored)).context("is this a git repository?")
}
