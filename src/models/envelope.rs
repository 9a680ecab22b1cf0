use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::playlist::RawPlaylistNode;

/// Reply shape shared by the upstream provider and the gateway's own API:
/// `{ success, data?, message? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok(data: impl Serialize) -> Self {
        Self {
            success: true,
            // Serializing plain data structures into a Value cannot fail
            data: Some(serde_json::to_value(data).unwrap_or(Value::Null)),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// `data.playlist`, or `None` when the provider did not send one.
    ///
    /// A playlist that is present but not shaped like a node list is an
    /// upstream parse failure.
    pub fn playlist(&self) -> Result<Option<Vec<RawPlaylistNode>>, serde_json::Error> {
        match self.data.as_ref().and_then(|data| data.get("playlist")) {
            None | Some(Value::Null) => Ok(None),
            Some(playlist) => Vec::<RawPlaylistNode>::deserialize(playlist).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_playlist_missing() {
        let envelope = Envelope {
            success: true,
            data: Some(json!({"title": "x"})),
            message: None,
        };
        assert_eq!(envelope.playlist().unwrap(), None);
        assert_eq!(Envelope::default().playlist().unwrap(), None);
    }

    #[test]
    fn test_playlist_present() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "data": {"playlist": [{"title": "English", "file": "f1"}]}
        }))
        .unwrap();

        let playlist = envelope.playlist().unwrap().unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist[0].title(), Some("English"));
    }

    #[test]
    fn test_playlist_malformed() {
        let envelope = Envelope {
            success: true,
            data: Some(json!({"playlist": "not a list"})),
            message: None,
        };
        assert!(envelope.playlist().is_err());
    }

    #[test]
    fn test_fail_serialization() {
        assert_eq!(
            serde_json::to_value(Envelope::fail("Please provide a valid id")).unwrap(),
            json!({"success": false, "message": "Please provide a valid id"})
        );
    }
}
