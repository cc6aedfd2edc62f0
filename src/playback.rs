// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::PlaybackError;

/// Streaming endpoint resolving an episode id to playable audio
pub const MEDIA_ENDPOINT: &str = "https://vgtrk-podcast.cdnvideo.ru/audio/listen";

/// Default external player binary
pub const DEFAULT_PLAYER: &str = "mpv";

/// Build the streaming URL of an episode
pub fn stream_url(episode_id: u64) -> Result<Url, PlaybackError> {
    Ok(Url::parse(&format!("{MEDIA_ENDPOINT}?id={episode_id}"))?)
}

/// A single audio sink that plays one source at a time
#[async_trait]
pub trait AudioOutput: Send {
    /// Replace the current source. Whatever was playing stops.
    async fn set_source(&mut self, url: Url) -> Result<(), PlaybackError>;

    /// Start playing the current source
    async fn play(&mut self) -> Result<(), PlaybackError>;
}

/// Owns the one audio output of the application.
///
/// Views receive a `&mut PlaybackController` instead of reaching for a
/// global player handle.
pub struct PlaybackController<O> {
    output: O,
    current: Option<Url>,
}

impl<O: AudioOutput> PlaybackController<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            current: None,
        }
    }

    /// Point the output at an episode's stream and start playback
    pub async fn play(&mut self, episode_id: u64) -> Result<Url, PlaybackError> {
        let url = stream_url(episode_id)?;
        info!(%url, "playing episode {episode_id}");

        self.output.set_source(url.clone()).await?;
        self.current = Some(url.clone());
        self.output.play().await?;

        Ok(url)
    }

    /// Source most recently handed to the output
    pub fn current(&self) -> Option<&Url> {
        self.current.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

/// Audio output backed by an external `mpv` process.
///
/// Each source gets its own process; replacing the source kills the
/// previous one.
pub struct MpvOutput {
    program: String,
    source: Option<Url>,
    process: Option<Child>,
}

impl MpvOutput {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            source: None,
            process: None,
        }
    }

    async fn halt(&mut self) {
        if let Some(mut child) = self.process.take() {
            debug!(pid = ?child.id(), "stopping player");
            if let Err(e) = child.kill().await {
                warn!("failed to stop player: {e}");
            }
        }
    }
}

impl Default for MpvOutput {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER)
    }
}

#[async_trait]
impl AudioOutput for MpvOutput {
    async fn set_source(&mut self, url: Url) -> Result<(), PlaybackError> {
        self.halt().await;
        self.source = Some(url);
        Ok(())
    }

    async fn play(&mut self) -> Result<(), PlaybackError> {
        let source = self.source.clone().ok_or(PlaybackError::NoSource)?;
        self.halt().await;

        let child = Command::new(&self.program)
            .arg("--no-video")
            .arg("--really-quiet")
            .arg(source.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::SpawnFailed {
                program: self.program.clone(),
                source: e,
            })?;

        debug!(pid = ?child.id(), "player started");
        self.process = Some(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{OutputCall, RecordingOutput};

    #[test]
    fn stream_url_carries_episode_id() {
        let url = stream_url(42).unwrap();
        assert_eq!(
            url.as_str(),
            "https://vgtrk-podcast.cdnvideo.ru/audio/listen?id=42"
        );
    }

    #[tokio::test]
    async fn play_sets_source_then_plays_once() {
        let mut controller = PlaybackController::new(RecordingOutput::default());

        let url = controller.play(42).await.unwrap();

        assert!(url.as_str().contains("id=42"));
        assert_eq!(
            controller.output().calls(),
            vec![OutputCall::SetSource(url.clone()), OutputCall::Play]
        );
        assert_eq!(controller.current(), Some(&url));
    }

    #[tokio::test]
    async fn second_play_replaces_source() {
        let mut controller = PlaybackController::new(RecordingOutput::default());

        controller.play(1).await.unwrap();
        let second = controller.play(2).await.unwrap();

        assert_eq!(controller.current(), Some(&second));
        assert_eq!(controller.output().play_count(), 2);
    }

    #[tokio::test]
    async fn mpv_play_without_source_fails() {
        let mut output = MpvOutput::default();
        assert!(matches!(output.play().await, Err(PlaybackError::NoSource)));
    }

    #[tokio::test]
    async fn mpv_missing_binary_reports_spawn_failure() {
        let mut output = MpvOutput::new("vesti-rss-no-such-player");
        output.set_source(stream_url(7).unwrap()).await.unwrap();

        match output.play().await {
            Err(PlaybackError::SpawnFailed { program, .. }) => {
                assert_eq!(program, "vesti-rss-no-such-player");
            }
            other => panic!("Expected SpawnFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn mpv_replacing_source_stops_running_player() {
        let mut output = MpvOutput::new("true");

        output.set_source(stream_url(1).unwrap()).await.unwrap();
        output.play().await.unwrap();
        assert!(output.process.is_some());

        output.set_source(stream_url(2).unwrap()).await.unwrap();
        assert!(output.process.is_none());
        assert_eq!(output.source, Some(stream_url(2).unwrap()));

        output.play().await.unwrap();
        assert!(output.process.is_some());
    }
}
