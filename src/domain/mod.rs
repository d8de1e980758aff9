//! Usage: Domain layer (notification permission lifecycle).

pub(crate) mod notifications;
