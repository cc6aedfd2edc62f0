// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::{IdentifierError, NavigationError};

/// Query parameter carrying a brand identifier
pub const BRAND_PARAM: &str = "brand_id";
/// Query parameter carrying a rubric identifier
pub const RUBRIC_PARAM: &str = "rubric_id";

/// Path of the episode view
pub const LISTEN_PATH: &str = "/listen";

/// Base used to resolve relative navigation targets
const APP_ORIGIN: &str = "app://vesti-rss/";

/// Identifies a podcast program in the upstream catalog.
///
/// The upstream data carries either a brand or a rubric id, never both;
/// this enum is the single place where that shape is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProgramId {
    Brand { id: u64 },
    Rubric { id: u64 },
}

impl ProgramId {
    /// Resolve the raw optional fields into exactly one identifier
    pub fn from_fields(brand_id: Option<u64>, rubric_id: Option<u64>) -> Result<Self, IdentifierError> {
        match (brand_id, rubric_id) {
            (Some(id), None) => Ok(Self::Brand { id }),
            (None, Some(id)) => Ok(Self::Rubric { id }),
            (Some(brand_id), Some(rubric_id)) => Err(IdentifierError::Ambiguous {
                brand_id,
                rubric_id,
            }),
            (None, None) => Err(IdentifierError::Missing),
        }
    }

    /// Read the identifier from a navigation URL's query string.
    ///
    /// `brand_id` wins over `rubric_id`. Values that are not numeric are
    /// ignored with a warning.
    pub fn from_query(url: &Url) -> Option<Self> {
        let mut brand = None;
        let mut rubric = None;

        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                BRAND_PARAM => &mut brand,
                RUBRIC_PARAM => &mut rubric,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            match value.parse::<u64>() {
                Ok(id) => *slot = Some(id),
                Err(_) => warn!(param = %key, value = %value, "ignoring non-numeric identifier"),
            }
        }

        brand
            .map(|id| Self::Brand { id })
            .or(rubric.map(|id| Self::Rubric { id }))
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Brand { id } | Self::Rubric { id } => *id,
        }
    }

    /// Query parameter name used in navigation URLs
    pub fn query_param(&self) -> &'static str {
        match self {
            Self::Brand { .. } => BRAND_PARAM,
            Self::Rubric { .. } => RUBRIC_PARAM,
        }
    }

    /// Parameter name used by the upstream audio API
    pub fn api_param(&self) -> &'static str {
        match self {
            Self::Brand { .. } => "brandId",
            Self::Rubric { .. } => "rubricId",
        }
    }

    /// Path of the static episode resource for this program
    pub fn episodes_resource(&self) -> String {
        match self {
            Self::Brand { id } => format!("brands/{id}.json"),
            Self::Rubric { id } => format!("rubrics/{id}.json"),
        }
    }

    /// Navigation URL that opens the episode view for this program
    pub fn listen_url(&self) -> String {
        format!("{LISTEN_PATH}?{}={}", self.query_param(), self.id())
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brand { id } => write!(f, "brand {id}"),
            Self::Rubric { id } => write!(f, "rubric {id}"),
        }
    }
}

/// A view the user can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The podcast catalog
    Home,
    /// The episode list; `None` when the query names no program
    Listen(Option<ProgramId>),
}

impl Route {
    /// Resolve a navigation target such as `/listen?brand_id=5`.
    ///
    /// Absolute URLs are accepted too; only path and query are consulted.
    pub fn parse(target: &str) -> Result<Self, NavigationError> {
        let invalid = |source| NavigationError::InvalidTarget {
            target: target.to_string(),
            source,
        };
        let base = Url::parse(APP_ORIGIN).map_err(invalid)?;
        let url = base.join(target).map_err(invalid)?;

        match url.path().trim_end_matches('/') {
            "" => Ok(Self::Home),
            LISTEN_PATH => Ok(Self::Listen(ProgramId::from_query(&url))),
            other => Err(NavigationError::UnknownRoute(other.to_string())),
        }
    }
}
