use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable room identifier, as assigned by whoever defines the rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A member of a room's current participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Where and how often a room's occupancy is announced.
///
/// Intervals are written as milliseconds in room definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    pub channel_id: String,
    /// Overrides the system-wide minimum interval between sweep announcements.
    #[serde(default, with = "optional_millis")]
    pub notification_interval: Option<Duration>,
}

impl NotificationConfig {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            notification_interval: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.notification_interval = Some(interval);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub join_url: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Absent means notifications are disabled for this room.
    #[serde(default, alias = "slackNotification")]
    pub notification: Option<NotificationConfig>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>, join_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            join_url: join_url.into(),
            participants: Vec::new(),
            notification: None,
        }
    }

    pub fn with_notification(mut self, config: NotificationConfig) -> Self {
        self.notification = Some(config);
        self
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notification.is_some()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_occupied(&self) -> bool {
        !self.participants.is_empty()
    }
}

mod optional_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
