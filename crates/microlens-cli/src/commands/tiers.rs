// SPDX-License-Identifier: MIT OR Apache-2.0
//! `tiers` subcommand: list the configured challenge tiers.

use anyhow::Result;
use clap::Args;
use console::style;
use microlens_schema::TierConfig;

use crate::exit::EXIT_SUCCESS;
use crate::output::OutputConfig;

#[derive(Args, Debug)]
pub struct TiersCommand {}

impl TiersCommand {
    pub fn execute(&self, tiers: &TierConfig, output: &OutputConfig) -> Result<i32> {
        output.emit_result(tiers, |tiers| {
            for (name, tier) in &tiers.tiers {
                println!("{}  {}", style(name).bold(), tier.description);
                println!("    events: {}", tier.events.describe());
                if let Some(models) = &tier.allowed_model_types {
                    let names: Vec<&str> = models.iter().map(|m| m.as_str()).collect();
                    println!("    model types: {}", names.join(", "));
                }
                if let Some(effects) = &tier.allowed_effects {
                    let names: Vec<&str> = effects.iter().map(|e| e.as_str()).collect();
                    println!("    effects: {}", names.join(", "));
                }
            }
        })?;
        Ok(EXIT_SUCCESS)
    }
}
