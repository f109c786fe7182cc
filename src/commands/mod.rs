//! CLI commands implementation

pub mod init;
pub mod serve;
pub mod status;

pub use init::*;
pub use serve::*;
pub use status::*;
