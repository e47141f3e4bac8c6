//! List command - Print the available checks.

use anyhow::Result;

use idnits_checks::{render_listing, RuleSet, RunTally};

pub fn execute() -> Result<RunTally> {
    let rules = RuleSet::standard();
    print!("{}", render_listing(&rules.listing()));
    Ok(RunTally::default())
}
