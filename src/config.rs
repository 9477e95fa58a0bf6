use crate::consts::{DEFAULT_BIN_SIZE, DEFAULT_TOP_N};
use crate::error::{RfResult, RosterError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Knobs shared by every derived view (histograms, star lists).
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    /// Histogram bucket width in raw power units.
    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: u64,

    /// How many top players each comparison slot lists.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            bin_size: DEFAULT_BIN_SIZE,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ViewParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RfResult<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> RfResult<()> {
        if self.bin_size == 0 {
            return Err(RosterError::Config("bin_size must be greater than 0".into()));
        }
        Ok(())
    }

    /// Overrides fields the user explicitly typed on the command line,
    /// leaving file-provided values alone otherwise.
    pub fn merge_from_cli(&mut self, cli_params: &ViewParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field;
                }
            };
        }

        update_if_present!(bin_size, "bin_size");
        update_if_present!(top_n, "top_n");
    }
}
