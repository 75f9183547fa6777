//! Ratatui widgets for the exoscope TUI.

pub mod command_bar;
pub mod details;
pub mod help;
pub mod query_bar;
pub mod results_list;
pub mod status_bar;
