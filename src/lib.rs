// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to run one diff session end to end.
//
// Module responsibilities:
// - `args`: Parses the two accepted invocation forms and carries the
//   built-in default server address.
// - `api`: Encapsulates HTTP interactions with the diff service (room
//   join, multipart file upload).
// - `channel`: Wraps the server's push channel as a stream of tagged
//   events consumed from a single blocking receiver.
// - `render`: Pure colorizer for unified-diff text.
// - `session`: Sequences join → channel connect → upload → await result.
// - `ui`: Terminal output helpers (colored lines, waiting spinner, usage).
//
// Keeping this separation makes the protocol logic testable without a
// terminal and the rendering testable without a network.
pub mod api;
pub mod args;
pub mod channel;
pub mod render;
pub mod session;
pub mod ui;
