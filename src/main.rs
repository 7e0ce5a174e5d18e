// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build a session, run it.
// - Every failure path prints to stderr and exits 1; the rendered diff
//   is the only success path and exits 0.

use std::process::ExitCode;

use diffroom_cli::{args::CliArgs, args::DEFAULT_SERVER_URL, session::Session, ui};

fn main() -> ExitCode {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "diffroom-cli".to_string());
    let rest: Vec<String> = argv.collect();

    let args = match CliArgs::parse(&rest) {
        Ok(args) => args,
        Err(_) => {
            ui::print_usage(&program);
            return ExitCode::FAILURE;
        }
    };

    // The built-in default is resolved here, explicitly, so the session
    // itself never guesses at an address.
    let server_url = args
        .server_url
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let result = Session::new(server_url, args.room_id, args.file_path).and_then(|s| s.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(&err);
            ExitCode::FAILURE
        }
    }
}
