//! Shared test harness modules for the waymerge CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::lines::{LinesConfig, execute, resolve_lines_config, write_features};

mod helpers;
mod unit;
