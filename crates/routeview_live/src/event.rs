use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStart {
    pub route_index: Option<usize>,
    pub vehicle: Option<Value>,
    pub issued_at: Timestamp,
}

/// Events pushed to viewers, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    StartNavigation(NavigationStart),
}

impl LiveEvent {
    pub fn start_navigation(route_index: Option<usize>, vehicle: Option<Value>) -> Self {
        LiveEvent::StartNavigation(NavigationStart {
            route_index,
            vehicle,
            issued_at: Timestamp::now(),
        })
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
