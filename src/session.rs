// Session orchestrator: one CLI invocation is one session. Validates the
// local file, joins the room, opens the push channel, and then consumes
// channel events from a single blocking point until the session reaches a
// terminal state. No step is retried; the first failure ends the session.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use anyhow::{bail, Context, Result};

use crate::api::ApiClient;
use crate::channel::{ChannelEvent, DiffResult, ResultChannel};
use crate::render;
use crate::ui;

/// Ephemeral state for one invocation.
#[derive(Debug)]
pub struct Session {
    server_url: String,
    room_id: String,
    file_path: PathBuf,
    api: ApiClient,
}

impl Session {
    /// Build a session. The file path is resolved to an absolute path
    /// here, so a missing file fails before any network activity.
    pub fn new(
        server_url: impl Into<String>,
        room_id: impl Into<String>,
        file_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let server_url = server_url.into();
        let file_path = std::fs::canonicalize(file_path.as_ref())
            .with_context(|| format!("File not found at {}", file_path.as_ref().display()))?;
        let api = ApiClient::new(server_url.clone())?;
        Ok(Session {
            server_url,
            room_id: room_id.into(),
            file_path,
            api,
        })
    }

    /// Absolute path of the file this session contributes.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Run the session to completion: join the room, connect the push
    /// channel, upload once the channel is up, and render the diff when
    /// it arrives. Returns `Ok(())` only on the rendered-diff path.
    pub fn run(&self) -> Result<()> {
        ui::info(&format!("Connecting to room '{}'...", self.room_id));
        self.api
            .join_room(&self.room_id)
            .context("Error creating or joining room")?;
        ui::success(&format!(
            "Successfully created or joined room '{}'.",
            self.room_id
        ));

        // The channel must be up before the upload starts, otherwise a
        // fast server could emit the result while nobody is listening.
        let channel = ResultChannel::connect(&self.server_url, &self.room_id);

        let mut spinner = None;
        let outcome = drive(channel.events(), || {
            ui::success("Successfully connected to server. Uploading file...");
            self.api
                .upload_file(&self.room_id, &self.file_path)
                .context("Error uploading file")?;
            ui::success("File uploaded successfully!");
            spinner = Some(ui::waiting_spinner(
                "Waiting for the other user to upload their file...",
            ));
            Ok(())
        });
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let result = outcome?;

        println!();
        for line in render::render(&result.diff) {
            println!("{line}");
        }
        println!();

        channel.close();
        Ok(())
    }
}

/// Consume channel events until the session reaches a terminal state.
///
/// `on_connected` performs the upload; it runs only when the channel
/// reports `Connected`, and its failure is the session's failure. Kept
/// separate from `Session` so the sequencing is testable with a hand-fed
/// event channel.
pub fn drive(
    events: &Receiver<ChannelEvent>,
    mut on_connected: impl FnMut() -> Result<()>,
) -> Result<DiffResult> {
    loop {
        match events.recv() {
            Ok(ChannelEvent::Connected) => on_connected()?,
            Ok(ChannelEvent::ResultReceived(result)) => return Ok(result),
            Ok(ChannelEvent::Failed(reason)) => bail!("Connection failed: {reason}"),
            Err(_) => bail!("Result channel ended before a diff arrived"),
        }
    }
}
