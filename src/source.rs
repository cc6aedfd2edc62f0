// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::error::DataError;
use crate::http::HttpClient;

/// Where the static catalog and episode JSON files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Base URL that resource paths are joined onto
    Remote(Url),
    /// Local directory holding the same file layout
    Local(PathBuf),
}

impl DataSource {
    /// Interpret a string as either a base URL or a directory path
    pub fn parse(source: &str) -> Result<Self, DataError> {
        if is_url(source) {
            let mut base = Url::parse(source)?;
            // Without a trailing slash `join` would replace the last segment
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            Ok(Self::Remote(base))
        } else {
            Ok(Self::Local(PathBuf::from(source)))
        }
    }

    /// Human-readable location of a resource, used in logs and errors
    pub fn locate(&self, resource: &str) -> String {
        match self {
            Self::Remote(base) => base
                .join(resource)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| format!("{base}{resource}")),
            Self::Local(dir) => dir.join(resource).display().to_string(),
        }
    }

    /// Load the raw bytes of a resource relative to this source
    pub async fn load<C: HttpClient>(&self, client: &C, resource: &str) -> Result<Bytes, DataError> {
        match self {
            Self::Remote(base) => {
                let url = base.join(resource)?;
                debug!(%url, "fetching resource");

                let response = client
                    .get(url.as_str())
                    .await
                    .map_err(|e| DataError::FetchFailed {
                        url: url.to_string(),
                        source: e,
                    })?;

                if !response.is_success() {
                    return Err(DataError::HttpStatus {
                        url: url.to_string(),
                        status: response.status,
                    });
                }

                Ok(response.body)
            }
            Self::Local(dir) => {
                let path = dir.join(resource);
                debug!(path = %path.display(), "reading resource");

                tokio::fs::read(&path)
                    .await
                    .map(Bytes::from)
                    .map_err(|e| DataError::FileReadFailed { path, source: e })
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(base) => write!(f, "{base}"),
            Self::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Determine if a string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
