//! Common types shared across the version layer

use serde::Deserialize;

/// A single published release as reported by the release feed.
///
/// Only the fields needed for resolution are kept; everything else in the
/// feed's JSON objects is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: bool,
}

impl Release {
    pub fn new(tag_name: impl Into<String>, prerelease: bool) -> Self {
        Self {
            tag_name: tag_name.into(),
            prerelease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_ignores_unknown_fields_and_defaults_prerelease() {
        let releases: Vec<Release> = serde_json::from_str(
            r#"[
                {"tag_name": "7.0.0", "prerelease": false, "html_url": "https://example.com"},
                {"tag_name": "7.1.0rc1", "prerelease": true},
                {"tag_name": "6.0.0", "draft": false}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            releases,
            vec![
                Release::new("7.0.0", false),
                Release::new("7.1.0rc1", true),
                Release::new("6.0.0", false),
            ]
        );
    }

    #[test]
    fn deserialize_rejects_release_without_tag_name() {
        let result = serde_json::from_str::<Vec<Release>>(r#"[{"prerelease": true}]"#);
        assert!(result.is_err());
    }
}
