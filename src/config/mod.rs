// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cklint.
//!
//! This module handles locating and parsing rule declarations, and the
//! built-in presets they are layered on.

pub mod default;
mod loader;
mod schema;

pub use default::{conventional_rules, preset_rules};
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config, CONFIG_FILES};
pub use schema::*;
