//! `deprank completions`: print a shell completion script.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `deprank completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute `deprank completions`.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out)
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> Result<()> {
    generate(shell, command, "deprank", out);
    out.flush().context("Failed to write completion script")
}
