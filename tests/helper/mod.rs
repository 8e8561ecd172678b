//! Shared fixtures for integration tests

use mockito::{Mock, ServerGuard};

pub const RELEASES_PATH: &str = "/repos/bazelbuild/bazel/releases";

/// Release feed body covering stable releases, release candidates and an
/// unparsable tag.
pub const RELEASES_JSON: &str = r#"[
    {"tag_name": "7.1.0rc1", "prerelease": true, "draft": false},
    {"tag_name": "7.0.1", "prerelease": false, "draft": false},
    {"tag_name": "7.0.0", "prerelease": false, "draft": false},
    {"tag_name": "7.0.0rc2", "prerelease": true, "draft": false},
    {"tag_name": "7.0.0rc1", "prerelease": true, "draft": false},
    {"tag_name": "6.2.0", "prerelease": false, "draft": false},
    {"tag_name": "6.2.0rc2", "prerelease": true, "draft": false},
    {"tag_name": "6.2.0rc1", "prerelease": true, "draft": false},
    {"tag_name": "6.1.1", "prerelease": false, "draft": false},
    {"tag_name": "6.1.0", "prerelease": false, "draft": false},
    {"tag_name": "6.0.0", "prerelease": false, "draft": false},
    {"tag_name": "invalid-version", "prerelease": false, "draft": false}
]"#;

pub fn releases_url(server: &ServerGuard) -> String {
    format!("{}{}", server.url(), RELEASES_PATH)
}

/// Mock the release feed, expecting exactly `hits` requests.
pub fn mock_releases(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", RELEASES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASES_JSON)
        .expect(hits)
        .create()
}
