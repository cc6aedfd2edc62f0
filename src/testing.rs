// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::PlaybackError;
use crate::http::{HeadResponse, HttpClient, HttpResponse};
use crate::playback::AudioOutput;

/// In-memory HTTP client; unknown URLs answer 404
#[derive(Clone, Default)]
pub struct MockHttpClient {
    bodies: HashMap<String, (u16, Bytes)>,
    heads: HashMap<String, HeadResponse>,
    redirects: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies
            .insert(url.to_string(), (200, Bytes::from(body.to_string())));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.bodies.insert(url.to_string(), (status, Bytes::new()));
        self
    }

    pub fn with_head(mut self, url: &str, content_length: Option<u64>, final_url: &str) -> Self {
        self.heads.insert(
            url.to_string(),
            HeadResponse {
                status: 200,
                content_length,
                url: Url::parse(final_url).unwrap(),
            },
        );
        self
    }

    pub fn with_head_status(mut self, url: &str, status: u16) -> Self {
        self.heads.insert(
            url.to_string(),
            HeadResponse {
                status,
                content_length: None,
                url: Url::parse(url).unwrap(),
            },
        );
        self
    }

    /// Make GET requests to `url` land on `final_url`
    pub fn with_redirect(mut self, url: &str, final_url: &str) -> Self {
        self.redirects.insert(url.to_string(), final_url.to_string());
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        self.requests.lock().unwrap().push(url.to_string());

        let final_url = self.redirects.get(url).map(String::as_str).unwrap_or(url);
        let (status, body) = self
            .bodies
            .get(final_url)
            .cloned()
            .unwrap_or((404, Bytes::new()));

        Ok(HttpResponse {
            status,
            body,
            url: Url::parse(final_url).unwrap(),
        })
    }

    async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error> {
        self.requests.lock().unwrap().push(url.to_string());

        Ok(self.heads.get(url).cloned().unwrap_or_else(|| HeadResponse {
            status: 404,
            content_length: None,
            url: Url::parse(url).unwrap(),
        }))
    }
}

/// A call received by [`RecordingOutput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCall {
    SetSource(Url),
    Play,
}

/// Audio output that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingOutput {
    calls: Vec<OutputCall>,
}

impl RecordingOutput {
    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.clone()
    }

    pub fn play_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == OutputCall::Play)
            .count()
    }
}

#[async_trait]
impl AudioOutput for RecordingOutput {
    async fn set_source(&mut self, url: Url) -> Result<(), PlaybackError> {
        self.calls.push(OutputCall::SetSource(url));
        Ok(())
    }

    async fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(OutputCall::Play);
        Ok(())
    }
}
