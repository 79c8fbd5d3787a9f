//! `vsnet completions` and `vsnet man`.

use anyhow::Result;
use clap::Command;
use std::io;

pub fn run_completions(mut cmd: Command, shell: clap_complete::Shell) -> Result<()> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

pub fn run_man(cmd: Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
