//! In-memory data source seeded from a JSON file.
//!
//! Mutations change the in-memory copy only; the file is never written.

use super::{apply_silences, matches_query, DataSource, NewSilence, SourceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use vigil_core::{Entity, Event, Silence};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub silences: Vec<Silence>,
}

#[derive(Debug)]
pub struct FixtureSource {
    namespace: String,
    data: Mutex<FixtureData>,
}

impl FixtureSource {
    pub fn new(namespace: impl Into<String>, data: FixtureData) -> Self {
        Self {
            namespace: namespace.into(),
            data: Mutex::new(data),
        }
    }

    pub fn load(path: &Path, namespace: impl Into<String>) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        let data: FixtureData = serde_json::from_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            entities = data.entities.len(),
            events = data.events.len(),
            silences = data.silences.len(),
            "loaded fixture data"
        );
        Ok(Self::new(namespace, data))
    }

    /// Silence flags recomputed from the current silences.
    async fn snapshot(&self) -> FixtureData {
        let data = self.data.lock().await;
        let mut snapshot = FixtureData {
            entities: data
                .entities
                .iter()
                .filter(|e| e.namespace == self.namespace)
                .cloned()
                .collect(),
            events: data
                .events
                .iter()
                .filter(|e| e.namespace == self.namespace)
                .cloned()
                .collect(),
            silences: data
                .silences
                .iter()
                .filter(|s| s.namespace == self.namespace)
                .cloned()
                .collect(),
        };
        apply_silences(&mut snapshot.entities, &mut snapshot.events, &snapshot.silences);
        snapshot
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn list_entities(&self, query: &str) -> Result<Vec<Entity>, SourceError> {
        let mut entities = self.snapshot().await.entities;
        entities.retain(|e| matches_query(&e.name, query));
        Ok(entities)
    }

    async fn list_events(&self, query: &str) -> Result<Vec<Event>, SourceError> {
        let mut events = self.snapshot().await.events;
        events.retain(|e| matches_query(&e.check.name, query));
        Ok(events)
    }

    async fn list_silences(&self, query: &str) -> Result<Vec<Silence>, SourceError> {
        let mut silences = self.snapshot().await.silences;
        silences.retain(|s| matches_query(&s.name, query));
        Ok(silences)
    }

    async fn create_silence(&self, silence: NewSilence) -> Result<(), SourceError> {
        if !silence.is_valid() {
            return Err(SourceError::InvalidResponse(
                "a silence needs a subscription or a check".to_string(),
            ));
        }
        let silence = silence.into_silence(&self.namespace, "fixture");
        let mut data = self.data.lock().await;
        data.silences
            .retain(|s| !(s.namespace == silence.namespace && s.name == silence.name));
        data.silences.push(silence);
        Ok(())
    }

    async fn delete_silence(&self, name: &str) -> Result<(), SourceError> {
        let mut data = self.data.lock().await;
        let before = data.silences.len();
        let namespace = &self.namespace;
        data.silences
            .retain(|s| !(&s.namespace == namespace && s.name == name));
        if data.silences.len() == before {
            return Err(SourceError::NotFound(format!("silence {}", name)));
        }
        Ok(())
    }

    async fn delete_entity(&self, name: &str) -> Result<(), SourceError> {
        let mut data = self.data.lock().await;
        let before = data.entities.len();
        let namespace = &self.namespace;
        data.entities
            .retain(|e| !(&e.namespace == namespace && e.name == name));
        if data.entities.len() == before {
            return Err(SourceError::NotFound(format!("entity {}", name)));
        }
        Ok(())
    }

    async fn delete_event(&self, entity: &str, check: &str) -> Result<(), SourceError> {
        let mut data = self.data.lock().await;
        let before = data.events.len();
        let namespace = &self.namespace;
        data.events.retain(|e| {
            !(&e.namespace == namespace && e.entity.name == entity && e.check.name == check)
        });
        if data.events.len() == before {
            return Err(SourceError::NotFound(format!("event {}/{}", entity, check)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Target;
    use chrono::Utc;
    use vigil_core::{CheckStatus, EntityRef, EntitySystem, EventCheck};

    fn entity(name: &str) -> Entity {
        Entity {
            name: name.to_string(),
            namespace: "default".to_string(),
            class: "agent".to_string(),
            status: CheckStatus::OK,
            is_silenced: false,
            last_seen: None,
            system: EntitySystem::default(),
            subscriptions: Vec::new(),
        }
    }

    fn event(entity: &str, check: &str) -> Event {
        Event {
            namespace: "default".to_string(),
            timestamp: Utc::now(),
            entity: EntityRef {
                name: entity.to_string(),
                class: "agent".to_string(),
                last_seen: None,
                subscriptions: Vec::new(),
            },
            check: EventCheck {
                name: check.to_string(),
                status: CheckStatus::CRITICAL,
                output: String::new(),
                silenced_by: Vec::new(),
            },
            is_silenced: false,
        }
    }

    fn source() -> FixtureSource {
        FixtureSource::new(
            "default",
            FixtureData {
                entities: vec![entity("web-01"), entity("db-01")],
                events: vec![event("web-01", "check-cpu"), event("db-01", "check-disk")],
                silences: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn listing_filters_by_name() {
        let source = source();
        let entities = source.list_entities("WEB").await.unwrap_or_default();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "web-01");
    }

    #[tokio::test]
    async fn silencing_entity_marks_entity_and_its_events() {
        let source = source();
        let target = Target::entity(&entity("web-01"));
        assert!(source.silence(&target).await.is_ok());

        let entities = source.list_entities("").await.unwrap_or_default();
        assert!(entities.iter().any(|e| e.name == "web-01" && e.is_silenced));
        assert!(entities.iter().any(|e| e.name == "db-01" && !e.is_silenced));

        let events = source.list_events("check-cpu").await.unwrap_or_default();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_silenced);
        assert_eq!(events[0].check.silenced_by, vec!["entity:web-01:*".to_string()]);
    }

    #[tokio::test]
    async fn clearing_silence_removes_covering_entries() {
        let source = source();
        let unsilenced = event("web-01", "check-cpu");
        assert!(source.silence(&Target::event(&unsilenced)).await.is_ok());
        assert_eq!(source.list_silences("").await.map(|s| s.len()).unwrap_or(0), 1);

        let events = source.list_events("check-cpu").await.unwrap_or_default();
        assert!(source.clear_silence(&Target::event(&events[0])).await.is_ok());
        assert_eq!(source.list_silences("").await.map(|s| s.len()).unwrap_or(1), 0);
    }

    #[tokio::test]
    async fn clearing_silence_removes_subscription_silences() {
        let mut subscribed = event("web-01", "check-cpu");
        subscribed.entity.subscriptions = vec!["linux".to_string()];
        let source = FixtureSource::new(
            "default",
            FixtureData {
                entities: vec![entity("web-01")],
                events: vec![subscribed, event("db-01", "check-cpu")],
                silences: Vec::new(),
            },
        );
        let linux = NewSilence {
            subscription: Some("linux".to_string()),
            check: Some("check-cpu".to_string()),
            ..NewSilence::default()
        };
        assert!(source.create_silence(linux).await.is_ok());

        let events = source.list_events("check-cpu").await.unwrap_or_default();
        let web = events.iter().find(|e| e.entity.name == "web-01");
        assert_eq!(
            web.map(|e| e.check.silenced_by.clone()),
            Some(vec!["linux:check-cpu".to_string()])
        );
        assert!(events.iter().any(|e| e.entity.name == "db-01" && !e.is_silenced));

        if let Some(web) = web {
            assert!(source.clear_silence(&Target::event(web)).await.is_ok());
        }
        assert!(source.list_silences("").await.unwrap_or_default().is_empty());
        let events = source.list_events("check-cpu").await.unwrap_or_default();
        assert!(events.iter().all(|e| !e.is_silenced));
    }

    #[tokio::test]
    async fn subscription_silence_marks_member_entities() {
        let mut member = entity("web-01");
        member.subscriptions = vec!["linux".to_string()];
        let source = FixtureSource::new(
            "default",
            FixtureData {
                entities: vec![member.clone(), entity("db-01")],
                events: Vec::new(),
                silences: Vec::new(),
            },
        );
        let linux = NewSilence {
            subscription: Some("linux".to_string()),
            ..NewSilence::default()
        };
        assert!(source.create_silence(linux).await.is_ok());

        let entities = source.list_entities("").await.unwrap_or_default();
        assert!(entities.iter().any(|e| e.name == "web-01" && e.is_silenced));
        assert!(entities.iter().any(|e| e.name == "db-01" && !e.is_silenced));

        assert!(source.clear_silence(&Target::entity(&member)).await.is_ok());
        assert!(source.list_silences("").await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_record_is_an_error() {
        let source = source();
        assert!(source.delete(&Target::entity(&entity("web-01"))).await.is_ok());
        assert!(matches!(
            source.delete(&Target::entity(&entity("web-01"))).await,
            Err(SourceError::NotFound(_))
        ));
    }
}
