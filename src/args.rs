// Argument parsing: the client accepts exactly two invocation forms,
// disambiguated by argument count, so this stays a hand-rolled pure
// function rather than a declarative parser.

use anyhow::{bail, Result};

/// Server address used when the invocation omits one. Resolved by the
/// caller and passed explicitly into `Session::new`; nothing below the
/// entrypoint falls back to it implicitly.
pub const DEFAULT_SERVER_URL: &str = "http://129.151.168.7";

/// Parsed command line. `server_url` is `None` for the two-argument form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub server_url: Option<String>,
    pub room_id: String,
    pub file_path: String,
}

impl CliArgs {
    /// Parse the argv tail (everything after the program name).
    ///
    /// - `<room_id> <file_path>` → default server
    /// - `<server_url> <room_id> <file_path>` → explicit server, verbatim
    ///
    /// Any other count is a usage error; the caller prints the usage text.
    pub fn parse(args: &[String]) -> Result<Self> {
        match args {
            [room_id, file_path] => Ok(CliArgs {
                server_url: None,
                room_id: room_id.clone(),
                file_path: file_path.clone(),
            }),
            [server_url, room_id, file_path] => Ok(CliArgs {
                server_url: Some(server_url.clone()),
                room_id: room_id.clone(),
                file_path: file_path.clone(),
            }),
            _ => bail!("expected 2 or 3 arguments, got {}", args.len()),
        }
    }
}
