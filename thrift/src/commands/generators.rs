use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GeneratorsCommand {}

impl GeneratorsCommand {
    pub fn run(&self) -> Result<()> {
        ops::generators().render(&mut TerminalOutput::new());
        Ok(())
    }
}
