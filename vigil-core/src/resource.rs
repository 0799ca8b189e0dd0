//! Read-only resource records shown in the dashboard lists.
//!
//! Records arrive fully resolved from whatever data source the host uses;
//! the core never mutates them and only reads the handful of fields the
//! rows need (identity, name, silenced flag).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Stable row identifier used for selection and key-based row diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Anything that can be listed as a selectable row.
pub trait Resource {
    /// Identity of the row. Must be unique within one list.
    fn id(&self) -> ResourceId;

    /// Human readable name, also the target of the filter input.
    fn name(&self) -> &str;

    /// Whether the resource is currently silenced.
    fn is_silenced(&self) -> bool;

    /// Whether silence/clear-silence actions make sense for this resource.
    fn silenceable(&self) -> bool {
        true
    }

    /// Noun used in prompts ("entity", "event", "silence").
    fn kind(&self) -> &'static str;
}

/// Exit status of a check, following the usual plugin convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckStatus(pub u32);

impl CheckStatus {
    pub const OK: Self = Self(0);
    pub const WARNING: Self = Self(1);
    pub const CRITICAL: Self = Self(2);

    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "ok",
            1 => "warning",
            2 => "critical",
            _ => "unknown",
        }
    }

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySystem {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub platform_version: String,
}

/// A monitored entity (agent or proxy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub namespace: String,
    pub class: String,
    #[serde(default)]
    pub status: CheckStatus,
    #[serde(default)]
    pub is_silenced: bool,
    #[serde(default)]
    pub last_seen: Option<Timestamp>,
    #[serde(default)]
    pub system: EntitySystem,
    /// Subscriptions the entity's agent listens on.
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

impl Entity {
    /// One-line description of when the entity was last seen.
    ///
    /// Entities that have never reported and are not agents (e.g. proxies)
    /// are described by their class alone. `relative` renders a timestamp
    /// as relative time; formatting is left to the caller.
    pub fn status_description(&self, relative: impl FnOnce(Timestamp) -> String) -> String {
        if self.last_seen.is_none() && self.class != "agent" {
            return format!("{} entity.", capitalize(&self.class));
        }
        let seen = self.last_seen.map(relative).unwrap_or_else(|| "never".to_string());
        format!("The {} was last seen {}.", self.class, seen)
    }
}

impl Resource for Entity {
    fn id(&self) -> ResourceId {
        ResourceId::new(self.name.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_silenced(&self) -> bool {
        self.is_silenced
    }

    fn kind(&self) -> &'static str {
        "entity"
    }
}

/// The slice of an entity embedded in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub last_seen: Option<Timestamp>,
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCheck {
    pub name: String,
    #[serde(default)]
    pub status: CheckStatus,
    #[serde(default)]
    pub output: String,
    /// Names of the silences currently applying to this check.
    #[serde(default)]
    pub silenced_by: Vec<String>,
}

/// The latest result of one check on one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub namespace: String,
    pub timestamp: Timestamp,
    pub entity: EntityRef,
    pub check: EventCheck,
    #[serde(default)]
    pub is_silenced: bool,
}

impl Resource for Event {
    fn id(&self) -> ResourceId {
        ResourceId::new(format!("{}/{}", self.entity.name, self.check.name))
    }

    fn name(&self) -> &str {
        &self.check.name
    }

    fn is_silenced(&self) -> bool {
        self.is_silenced
    }

    fn kind(&self) -> &'static str {
        "event"
    }
}

/// A silence entry, named `subscription:check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Silence {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub check: Option<String>,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub begin: Option<Timestamp>,
    #[serde(default)]
    pub expire_on_resolve: bool,
}

impl Resource for Silence {
    fn id(&self) -> ResourceId {
        ResourceId::new(self.name.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_silenced(&self) -> bool {
        false
    }

    fn silenceable(&self) -> bool {
        false
    }

    fn kind(&self) -> &'static str {
        "silence"
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entity(class: &str, last_seen: Option<Timestamp>) -> Entity {
        Entity {
            name: "web-01".to_string(),
            namespace: "default".to_string(),
            class: class.to_string(),
            status: CheckStatus::OK,
            is_silenced: false,
            last_seen,
            system: EntitySystem::default(),
            subscriptions: Vec::new(),
        }
    }

    #[test]
    fn unseen_proxy_is_described_by_class() {
        let description = entity("proxy", None).status_description(|_| unreachable!());
        assert_eq!(description, "Proxy entity.");
    }

    #[test]
    fn unseen_agent_reports_never() {
        let description = entity("agent", None).status_description(|_| unreachable!());
        assert_eq!(description, "The agent was last seen never.");
    }

    #[test]
    fn seen_entity_uses_relative_formatter() {
        let seen = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let description = entity("proxy", Some(seen)).status_description(|_| "5 minutes ago".into());
        assert_eq!(description, "The proxy was last seen 5 minutes ago.");
    }

    #[test]
    fn sparse_records_fill_defaults() {
        let entity: Entity = serde_json::from_str(
            r#"{"name":"web-01","namespace":"default","class":"agent"}"#,
        )
        .unwrap();
        assert_eq!(entity.status, CheckStatus::OK);
        assert!(!entity.is_silenced);
        assert!(entity.last_seen.is_none());

        let silence: Silence =
            serde_json::from_str(r#"{"name":"*:check-cpu","namespace":"default"}"#).unwrap();
        assert!(silence.subscription.is_none());
        assert!(!silence.silenceable());
    }

    #[test]
    fn event_identity_combines_entity_and_check() {
        let event = Event {
            namespace: "default".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            entity: EntityRef {
                name: "web-01".to_string(),
                class: "agent".to_string(),
                last_seen: None,
                subscriptions: Vec::new(),
            },
            check: EventCheck {
                name: "check-cpu".to_string(),
                status: CheckStatus::CRITICAL,
                output: String::new(),
                silenced_by: Vec::new(),
            },
            is_silenced: false,
        };
        assert_eq!(event.id().as_str(), "web-01/check-cpu");
        assert_eq!(event.check.status.label(), "critical");
    }
}
