//! Usage: Application layer (fixed config, logging, Container Shell window lifecycle).

pub(crate) mod config;
pub(crate) mod logging;
pub(crate) mod shell;
