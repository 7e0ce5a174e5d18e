// UI layer: terminal output helpers for the one-shot session flow.
// Progress lines go to stdout; usage text, errors and the waiting
// spinner go to stderr, keeping stdout clean apart from the diff itself.

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::args::DEFAULT_SERVER_URL;

/// Informational progress line (stdout, blue).
pub fn info(msg: &str) {
    println!("{}", msg.blue());
}

/// Progress line for a completed step (stdout, green).
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error chain in red to stderr. The alternate anyhow format
/// includes the context trail, so the server-supplied message (when one
/// exists) is part of the output.
pub fn error(err: &anyhow::Error) {
    eprintln!("{}", format!("{err:#}").red());
}

/// Print the usage text for both invocation forms to stderr.
pub fn print_usage(program: &str) {
    eprintln!(
        "{}",
        format!("Usage: {program} [server_url] <room_id> <file_path>").red()
    );
    eprintln!(
        "{}",
        format!("If [server_url] is omitted, it defaults to {DEFAULT_SERVER_URL}.").yellow()
    );
    eprintln!(
        "{}",
        format!("Example: {program} your-room-id ./file1.txt").yellow()
    );
    eprintln!(
        "{}",
        format!("Example: {program} http://localhost:3000 your-room-id ./file1.txt").yellow()
    );
}

/// Spinner shown while waiting for the counterparty's upload. Draws on
/// stderr; the caller clears it once a terminal event arrives.
pub fn waiting_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
