// SPDX-License-Identifier: MIT OR Apache-2.0
pub mod tiers;
pub mod validate;

pub use tiers::TiersCommand;
pub use validate::ValidateCommand;
