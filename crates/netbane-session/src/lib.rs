// netbane-session: CLI transport and external-parser boundary consumed by netbane-core.

pub mod error;
pub mod parse;
pub mod session;
pub mod ssh;
mod ssh_config;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::SessionError;
pub use parse::{
    ConfigParser, ConfigTree, IndentConfigParser, IndentConfigTree, ParsedRecord, RecordParser,
};
pub use session::CliSession;
pub use ssh::{SshCliSession, SshOptions};
