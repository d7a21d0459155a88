//! Static site generation on top of `mdsite-core`.
//!
//! The `mdsite` binary is a thin clap front end over [`site::build_site`]
//! and a few single-file commands; the pieces live here so they can be
//! tested without spawning the binary.

pub mod config;
pub mod site;

pub use config::{ConfigError, SiteConfig};
pub use site::{build_site, BuildReport, PageFailure};
