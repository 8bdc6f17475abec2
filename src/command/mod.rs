pub mod cli_host;
pub mod orchestrator;

pub use cli_host::{CliHost, CONSOLE_ID};
pub use orchestrator::{CommandOrchestrator, Host, ADMIN_PERMISSION};
