//! Webcast chat message model.
//!
//! These types mirror the JSON shape the barrage dispatcher accepts on its
//! `/ws/dy` endpoint: one object per message, camelCase keys, counters encoded
//! as strings.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Content of the fixed song request.
pub const SONG_REQUEST_CONTENT: &str = "点歌 奢香夫人";

/// Kind of a Webcast message, serialized as its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastMethod {
    #[serde(rename = "WebcastChatMessage")]
    Chat,
    #[serde(rename = "WebcastGiftMessage")]
    Gift,
    #[serde(rename = "WebcastLikeMessage")]
    Like,
    #[serde(rename = "WebcastMemberMessage")]
    Member,
    #[serde(rename = "WebcastSocialMessage")]
    Social,
    #[serde(rename = "WebcastRoomUserSeqMessage")]
    RoomUserSeq,
    #[serde(rename = "WebcastControlMessage")]
    Control,
    #[serde(rename = "WebcastRoomRankMessage")]
    RoomRank,
    #[serde(rename = "WebcastRoomStatsMessage")]
    RoomStats,
    #[serde(rename = "WebcastEmojiChatMessage")]
    EmojiChat,
    #[serde(rename = "WebcastFansclubMessage")]
    Fansclub,
    #[serde(rename = "WebcastRoomDataSyncMessage")]
    RoomDataSync,
    /// Messages injected by tooling rather than the live room.
    #[serde(rename = "CustomMessage")]
    Custom,
}

impl CastMethod {
    /// The name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CastMethod::Chat => "WebcastChatMessage",
            CastMethod::Gift => "WebcastGiftMessage",
            CastMethod::Like => "WebcastLikeMessage",
            CastMethod::Member => "WebcastMemberMessage",
            CastMethod::Social => "WebcastSocialMessage",
            CastMethod::RoomUserSeq => "WebcastRoomUserSeqMessage",
            CastMethod::Control => "WebcastControlMessage",
            CastMethod::RoomRank => "WebcastRoomRankMessage",
            CastMethod::RoomStats => "WebcastRoomStatsMessage",
            CastMethod::EmojiChat => "WebcastEmojiChatMessage",
            CastMethod::Fansclub => "WebcastFansclubMessage",
            CastMethod::RoomDataSync => "WebcastRoomDataSyncMessage",
            CastMethod::Custom => "CustomMessage",
        }
    }
}

impl fmt::Display for CastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender code decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender code {0}")]
pub struct UnknownGender(pub u8);

/// Best-effort gender of a viewer, carried as a small integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> u8 {
        match gender {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

impl TryFrom<u8> for Gender {
    type Error = UnknownGender;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Gender::Unknown),
            1 => Ok(Gender::Male),
            2 => Ok(Gender::Female),
            other => Err(UnknownGender(other)),
        }
    }
}

/// The viewer a message is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastUser {
    /// Opaque platform identifier.
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub avatar: String,
}

/// Live room counters at the time the message was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRoom {
    pub audience_count: String,
    pub like_count: String,
    pub follow_count: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_user_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// A single outbound Webcast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub method: CastMethod,
    pub user: CastUser,
    pub content: String,
    pub room: LiveRoom,
}

impl ChatMessage {
    /// Creates a chat message stamped with the current time in milliseconds.
    ///
    /// The id is only as unique as the clock: two messages built within the
    /// same millisecond share it.
    pub fn new(user: CastUser, content: impl Into<String>, room: LiveRoom) -> Self {
        ChatMessage {
            id: Utc::now().timestamp_millis().to_string(),
            method: CastMethod::Chat,
            user,
            content: content.into(),
            room,
        }
    }

    /// The canned song request used to exercise the dispatcher.
    pub fn song_request() -> Self {
        let user = CastUser {
            id: "MS4wLjABAAAAA1j9svveTKS5Aa2p-LUpBN1tFGR3l1NQzi0UlkHDGDU".to_owned(),
            name: "囧囧有神璐璐".to_owned(),
            gender: Gender::Male,
            avatar: "https://example.com/avatar.jpg".to_owned(),
        };
        let room = LiveRoom {
            audience_count: "100".to_owned(),
            like_count: "500".to_owned(),
            follow_count: "1000".to_owned(),
            total_user_count: None,
            status: None,
        };
        ChatMessage::new(user, SONG_REQUEST_CONTENT, room)
    }

    /// Encodes the message as a JSON text payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn keys(value: &Value) -> Vec<&str> {
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("not a JSON object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn song_request_has_expected_shape() {
        let value = serde_json::to_value(ChatMessage::song_request()).unwrap();

        assert_eq!(keys(&value), ["content", "id", "method", "room", "user"]);
        assert_eq!(keys(&value["user"]), ["avatar", "gender", "id", "name"]);
        assert_eq!(
            keys(&value["room"]),
            ["audienceCount", "followCount", "likeCount"]
        );

        assert_eq!(value["method"], "WebcastChatMessage");
        assert_eq!(value["content"], SONG_REQUEST_CONTENT);
        assert_eq!(value["user"]["name"], "囧囧有神璐璐");
        assert_eq!(value["user"]["gender"], 1);
        assert_eq!(value["room"]["audienceCount"], "100");
        assert_eq!(value["room"]["likeCount"], "500");
        assert_eq!(value["room"]["followCount"], "1000");
    }

    #[test]
    fn id_is_a_millisecond_timestamp() {
        let before = Utc::now().timestamp_millis();
        let message = ChatMessage::song_request();
        let after = Utc::now().timestamp_millis();

        let id: i64 = message.id.parse().expect("id is not an integer");
        assert!(id >= before, "{} < {}", id, before);
        assert!(id <= after, "{} > {}", id, after);
    }

    #[test]
    fn json_payload_round_trips() {
        let message = ChatMessage::song_request();
        let json = message.to_json().unwrap();

        let decoded: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.to_json().unwrap(), json);
    }

    #[test]
    fn optional_room_fields_are_emitted_when_set() {
        let mut message = ChatMessage::song_request();
        message.room.total_user_count = Some("42000".to_owned());
        message.room.status = Some(2);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["room"]["totalUserCount"], "42000");
        assert_eq!(value["room"]["status"], 2);
    }

    #[test]
    fn cast_method_uses_wire_names() {
        for method in [CastMethod::Chat, CastMethod::RoomDataSync, CastMethod::Custom] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
            assert_eq!(serde_json::from_str::<CastMethod>(&json).unwrap(), method);
        }
        assert!(serde_json::from_str::<CastMethod>("\"WebcastNope\"").is_err());
    }

    #[test]
    fn gender_codes() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Gender>("0").unwrap(), Gender::Unknown);
        assert_eq!(Gender::try_from(7), Err(UnknownGender(7)));
        assert!(serde_json::from_str::<Gender>("3").is_err());
    }
}
