//! clipsync device process: bootstrap and the host-shell stdio boundary.

pub mod bootstrap;
pub mod host;
