use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trip::Waypoint;

/// A past rider search, offered back for quick reuse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderQuery {
    pub query_uuid: Option<String>,
    pub from: Option<Waypoint>,
    pub to: Option<Waypoint>,
    pub date: Option<DateTime<Utc>>,
    pub last_queried: Option<DateTime<Utc>>,
}
