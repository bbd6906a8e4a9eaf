//! Read the data series out of .agr (Grace) files written by VMD, then plot
//! them or export them as csv, svg, png or jpg.

pub mod cli;
pub mod color;
pub mod constants;
pub mod data;
pub mod export;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod state;
#[cfg(feature = "gui")]
pub mod ui;
