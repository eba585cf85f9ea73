//! Share page metadata (page title, Open Graph and Twitter cards)

use crate::config::ShareConfig;
use serde::Serialize;

/// Page and card title
pub const TITLE: &str = "My Weekly Allocation";

/// Preview image alt text
pub const IMAGE_ALT: &str = "Weekly time allocation chart";

/// Preview image width in pixels
pub const IMAGE_WIDTH: u32 = 1200;

/// Preview image height in pixels
pub const IMAGE_HEIGHT: u32 = 630;

/// Preview image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Open Graph card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<PreviewImage>,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Twitter card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Metadata for one share page
///
/// Depends only on the segment, never on whether it resolves, so link
/// previews stay stable even for charts that later disappear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMetadata {
    pub title: String,
    pub description: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

impl ShareMetadata {
    /// Build metadata for the share page of `segment`
    #[must_use]
    pub fn for_segment(config: &ShareConfig, segment: &str) -> Self {
        let title = TITLE.to_owned();
        let description = format!(
            "Check out how I spend my week! Create your own personalized chart: {}",
            config.app_url
        );
        let image_url = preview_image_url(config, segment);

        Self {
            open_graph: OpenGraph {
                title: title.clone(),
                description: description.clone(),
                images: vec![PreviewImage {
                    url: image_url.clone(),
                    width: IMAGE_WIDTH,
                    height: IMAGE_HEIGHT,
                    alt: IMAGE_ALT.to_owned(),
                }],
                kind: "website".to_owned(),
                url: config.share_url(segment),
            },
            twitter: TwitterCard {
                card: "summary_large_image".to_owned(),
                title: title.clone(),
                description: description.clone(),
                images: vec![image_url],
            },
            title,
            description,
        }
    }
}

/// Address of the generated preview image for `segment`
#[must_use]
pub fn preview_image_url(config: &ShareConfig, segment: &str) -> String {
    format!("{}/api/og?data={}", config.app_url, urlencoding::encode(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metadata_for_reference() {
        let config = ShareConfig::new().with_app_url("https://allot.example");
        let meta = ShareMetadata::for_segment(&config, "42");

        assert_eq!(meta.title, "My Weekly Allocation");
        assert_eq!(
            meta.description,
            "Check out how I spend my week! Create your own personalized chart: https://allot.example"
        );
        assert_eq!(meta.open_graph.url, "https://allot.example/share/42");
        assert_eq!(
            meta.open_graph.images[0].url,
            "https://allot.example/api/og?data=42"
        );
        assert_eq!(meta.open_graph.images[0].width, 1200);
        assert_eq!(meta.open_graph.images[0].height, 630);
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.images, vec![meta.open_graph.images[0].url.clone()]);
    }

    #[test]
    fn segment_is_percent_encoded_in_image_url() {
        let config = ShareConfig::new();
        assert_eq!(
            preview_image_url(&config, "a b/c"),
            "http://localhost:3000/api/og?data=a%20b%2Fc"
        );
    }

    #[test]
    fn serializes_with_card_field_names() {
        let meta = ShareMetadata::for_segment(&ShareConfig::new(), "tok");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["openGraph"]["type"], "website");
        assert_eq!(json["twitter"]["card"], "summary_large_image");
    }
}
