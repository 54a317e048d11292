//! Result-URL extraction from the worker's loosely-structured response.
//!
//! The worker guarantees no fixed schema, so the caller searches a small
//! ordered set of known locations. "No URL" is a first-class outcome,
//! never an empty string.

use serde_json::Value;

/// Outcome of searching a worker response for a result URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedUrl {
    /// A result URL was present at one of the known locations.
    Found(String),
    /// No recognizable URL field; callers must treat this as an error.
    NotFound,
}

impl ExtractedUrl {
    /// Convert into an `Option`, discarding the tag.
    pub fn into_option(self) -> Option<String> {
        match self {
            ExtractedUrl::Found(url) => Some(url),
            ExtractedUrl::NotFound => None,
        }
    }
}

/// Search a worker response for the result image URL.
///
/// Checked in order: top-level `image_url`, nested `result.image_url`,
/// top-level `outputUrl`. The first present string value wins;
/// non-string values at those keys are treated as absent.
pub fn extract_image_url(response: &Value) -> ExtractedUrl {
    let candidates = [
        response.get("image_url"),
        response.get("result").and_then(|r| r.get("image_url")),
        response.get("outputUrl"),
    ];

    for candidate in candidates {
        if let Some(url) = candidate.and_then(Value::as_str) {
            return ExtractedUrl::Found(url.to_string());
        }
    }

    ExtractedUrl::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_image_url() {
        let response = json!({"image_url": "https://x/1.png"});
        assert_eq!(
            extract_image_url(&response),
            ExtractedUrl::Found("https://x/1.png".into())
        );
    }

    #[test]
    fn nested_result_image_url() {
        let response = json!({"result": {"image_url": "https://x/2.png"}});
        assert_eq!(
            extract_image_url(&response),
            ExtractedUrl::Found("https://x/2.png".into())
        );
    }

    #[test]
    fn top_level_output_url() {
        let response = json!({"outputUrl": "https://x/3.png"});
        assert_eq!(
            extract_image_url(&response),
            ExtractedUrl::Found("https://x/3.png".into())
        );
    }

    #[test]
    fn first_present_location_wins() {
        let response = json!({
            "image_url": "https://x/first.png",
            "result": {"image_url": "https://x/second.png"},
            "outputUrl": "https://x/third.png",
        });
        assert_eq!(
            extract_image_url(&response),
            ExtractedUrl::Found("https://x/first.png".into())
        );
    }

    #[test]
    fn no_recognizable_field() {
        let response = json!({"status": "ok"});
        assert_eq!(extract_image_url(&response), ExtractedUrl::NotFound);
    }

    #[test]
    fn non_string_value_is_skipped() {
        // A numeric image_url does not match; the nested location does.
        let response = json!({
            "image_url": 42,
            "result": {"image_url": "https://x/2.png"},
        });
        assert_eq!(
            extract_image_url(&response),
            ExtractedUrl::Found("https://x/2.png".into())
        );
    }

    #[test]
    fn empty_object() {
        assert_eq!(extract_image_url(&json!({})), ExtractedUrl::NotFound);
    }

    #[test]
    fn non_object_response() {
        assert_eq!(extract_image_url(&json!("done")), ExtractedUrl::NotFound);
    }

    #[test]
    fn into_option() {
        assert_eq!(
            ExtractedUrl::Found("https://x/1.png".into()).into_option(),
            Some("https://x/1.png".to_string())
        );
        assert_eq!(ExtractedUrl::NotFound.into_option(), None);
    }
}
