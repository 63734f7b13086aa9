use serde::{Deserialize, Serialize};

/// A single entry from the public events feed. `created_at` stays a raw
/// string and is parsed at the point of use: a malformed timestamp drops
/// the event from the time-based reducers only, never from the
/// activity-type histogram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub merged: Option<bool>,
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_event_deserializes_with_extra_fields() {
        let json = r#"{
            "id": "44358000000",
            "type": "PushEvent",
            "actor": {"id": 1, "login": "octocat"},
            "repo": {"id": 2, "name": "octocat/hello-world"},
            "payload": {
                "push_id": 123,
                "ref": "refs/heads/main",
                "commits": [
                    {"sha": "abc123", "message": "fix parser", "distinct": true},
                    {"sha": "def456", "message": "add tests"}
                ]
            },
            "public": true,
            "created_at": "2024-01-15T10:00:00Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, "PushEvent");
        assert_eq!(event.payload.commits.len(), 2);
        assert_eq!(event.payload.commits[0].sha, "abc123");
    }

    #[test]
    fn test_event_without_payload_fields_deserializes() {
        let json = r#"{"type": "WatchEvent", "payload": {"action": "started"}, "created_at": "2024-03-01T08:30:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.payload.commits.is_empty());
        assert_eq!(event.payload.action.as_deref(), Some("started"));
        assert!(event.payload.pull_request.is_none());
    }

    #[test]
    fn test_event_missing_created_at_defaults_to_empty() {
        let json = r#"{"type": "ForkEvent"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, "ForkEvent");
        assert!(event.created_at.is_empty());
    }

    #[test]
    fn test_pull_request_event_deserializes() {
        let json = r#"{
            "type": "PullRequestEvent",
            "payload": {
                "action": "closed",
                "pull_request": {
                    "merged": true,
                    "created_at": "2024-01-01T00:00:00Z",
                    "closed_at": "2024-01-02T12:00:00Z",
                    "title": "Add feature"
                }
            },
            "created_at": "2024-01-02T12:00:01Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        let pr = event.payload.pull_request.unwrap();
        assert_eq!(pr.merged, Some(true));
        assert_eq!(pr.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }
}
