// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

/// Size in bytes of a media file, from a HEAD request.
///
/// `None` when the server does not answer 200 with a non-zero length.
pub async fn probe_media_size<C: HttpClient>(client: &C, url: &Url) -> Option<u64> {
    match client.head(url.as_str()).await {
        Ok(response) if response.status == 200 => {
            let size = response.content_length.filter(|size| *size > 0);
            if size.is_none() {
                warn!(%url, "no Content-Length for media");
            }
            size
        }
        Ok(response) => {
            warn!(%url, status = response.status, "media size probe failed");
            None
        }
        Err(e) => {
            warn!(%url, "media size probe failed: {e}");
            None
        }
    }
}

/// Probe all media sizes concurrently, in input order
pub async fn probe_media_sizes<C: HttpClient>(client: &C, urls: &[Url]) -> Vec<Option<u64>> {
    join_all(urls.iter().map(|url| probe_media_size(client, url))).await
}

const METHOD_NOT_ALLOWED: u16 = 405;

/// Follow redirects of a preview image link to its final location.
///
/// Hosts that refuse HEAD are asked again with GET. Falls back to the link
/// itself when it cannot be resolved.
pub async fn resolve_picture<C: HttpClient>(client: &C, url: &str) -> String {
    match client.head(url).await {
        Ok(response) if (200..300).contains(&response.status) => response.url.to_string(),
        Ok(response) if response.status == METHOD_NOT_ALLOWED => {
            debug!(%url, "HEAD not allowed, resolving picture with GET");
            match client.get(url).await {
                Ok(response) if response.is_success() => response.url.to_string(),
                Ok(response) => {
                    warn!(%url, status = response.status, "failed to resolve picture URL");
                    url.to_string()
                }
                Err(e) => {
                    warn!(%url, "failed to resolve picture URL: {e}");
                    url.to_string()
                }
            }
        }
        Ok(response) => {
            warn!(%url, status = response.status, "failed to resolve picture URL");
            url.to_string()
        }
        Err(e) => {
            warn!(%url, "failed to resolve picture URL: {e}");
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHttpClient;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn sizes_keep_input_order_and_mark_failures() {
        let client = MockHttpClient::new()
            .with_head("https://cdn.example.com/a", Some(1000), "https://cdn.example.com/a")
            .with_head("https://cdn.example.com/c", Some(0), "https://cdn.example.com/c");

        let sizes = probe_media_sizes(
            &client,
            &[
                url("https://cdn.example.com/a"),
                url("https://cdn.example.com/b"),
                url("https://cdn.example.com/c"),
            ],
        )
        .await;

        assert_eq!(sizes, vec![Some(1000), None, None]);
    }

    #[tokio::test]
    async fn picture_follows_redirect() {
        let client = MockHttpClient::new().with_head(
            "https://example.com/preview/1",
            None,
            "https://img.example.com/1.jpg",
        );

        let resolved = resolve_picture(&client, "https://example.com/preview/1").await;
        assert_eq!(resolved, "https://img.example.com/1.jpg");
    }

    #[tokio::test]
    async fn picture_retries_with_get_when_head_refused() {
        let client = MockHttpClient::new()
            .with_head_status("https://example.com/preview/3", 405)
            .with_redirect("https://example.com/preview/3", "https://img.example.com/3.jpg")
            .with_body("https://img.example.com/3.jpg", "jpeg");

        let resolved = resolve_picture(&client, "https://example.com/preview/3").await;

        assert_eq!(resolved, "https://img.example.com/3.jpg");
        assert_eq!(
            client.requests(),
            vec!["https://example.com/preview/3", "https://example.com/preview/3"]
        );
    }

    #[tokio::test]
    async fn picture_falls_back_to_original_link() {
        let resolved = resolve_picture(&MockHttpClient::new(), "https://example.com/preview/2").await;
        assert_eq!(resolved, "https://example.com/preview/2");
    }
}
