//! Data sources feeding the dashboard lists.
//!
//! The event loop never awaits a data source directly: it turns user intent
//! into a [`Request`], runs it on a spawned task with [`execute`], and gets
//! the outcome back as a `TuiEvent`.

pub mod fixture;
pub mod rest;

use crate::events::{Completion, Loaded, TuiEvent};
use crate::nav::View;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use vigil_core::{CheckStatus, Entity, Event, ResourceId, Silence};

pub use fixture::FixtureSource;
pub use rest::RestSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Fixture IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// What a mutation is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Entity {
        name: String,
        subscriptions: Vec<String>,
    },
    /// `silenced_by` names the silences the event was shown as muted by.
    Event {
        entity: String,
        check: String,
        silenced_by: Vec<String>,
    },
    Silence(String),
}

impl Target {
    pub fn entity(entity: &Entity) -> Self {
        Target::Entity {
            name: entity.name.clone(),
            subscriptions: entity.subscriptions.clone(),
        }
    }

    pub fn event(event: &Event) -> Self {
        Target::Event {
            entity: event.entity.name.clone(),
            check: event.check.name.clone(),
            silenced_by: event.check.silenced_by.clone(),
        }
    }

    pub fn silence(silence: &Silence) -> Self {
        Target::Silence(silence.name.clone())
    }

    /// Subscription a new silence for this target uses.
    pub fn subscription(&self) -> Option<String> {
        match self {
            Target::Entity { name, .. } | Target::Event { entity: name, .. } => {
                Some(entity_subscription(name))
            }
            Target::Silence(_) => None,
        }
    }

    pub fn check(&self) -> Option<String> {
        match self {
            Target::Event { check, .. } => Some(check.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Silence,
    ClearSilence,
    Delete,
}

impl Mutation {
    pub fn past_tense(&self) -> &'static str {
        match self {
            Mutation::Silence => "Silenced",
            Mutation::ClearSilence => "Cleared silences on",
            Mutation::Delete => "Deleted",
        }
    }
}

/// A silence entry as entered in the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSilence {
    pub subscription: Option<String>,
    pub check: Option<String>,
    pub reason: Option<String>,
    pub expire_on_resolve: bool,
}

impl NewSilence {
    pub fn for_target(target: &Target) -> Self {
        Self {
            subscription: target.subscription(),
            check: target.check(),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.subscription.is_some() || self.check.is_some()
    }

    /// `subscription:check`, with `*` standing in for an unset side.
    pub fn name(&self) -> String {
        silence_name(self.subscription.as_deref(), self.check.as_deref())
    }

    pub fn into_silence(self, namespace: &str, creator: &str) -> Silence {
        Silence {
            name: self.name(),
            namespace: namespace.to_string(),
            subscription: self.subscription,
            check: self.check,
            creator: creator.to_string(),
            reason: self.reason,
            begin: Some(Utc::now()),
            expire_on_resolve: self.expire_on_resolve,
        }
    }
}

/// Work handed from the event loop to a spawned task.
#[derive(Debug, Clone)]
pub enum Request {
    Fetch {
        view: View,
        query: String,
    },
    Mutate {
        view: View,
        op: Mutation,
        ids: Vec<ResourceId>,
        targets: Vec<Target>,
        bulk: bool,
    },
    CreateSilence(NewSilence),
}

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_entities(&self, query: &str) -> Result<Vec<Entity>, SourceError>;
    async fn list_events(&self, query: &str) -> Result<Vec<Event>, SourceError>;
    async fn list_silences(&self, query: &str) -> Result<Vec<Silence>, SourceError>;
    async fn create_silence(&self, silence: NewSilence) -> Result<(), SourceError>;
    async fn delete_silence(&self, name: &str) -> Result<(), SourceError>;
    async fn delete_entity(&self, name: &str) -> Result<(), SourceError>;
    async fn delete_event(&self, entity: &str, check: &str) -> Result<(), SourceError>;

    /// Silence a target for all of its checks (entities) or one check (events).
    async fn silence(&self, target: &Target) -> Result<(), SourceError> {
        match target {
            Target::Silence(name) => Err(SourceError::InvalidResponse(format!(
                "silence {} cannot be silenced",
                name
            ))),
            other => self.create_silence(NewSilence::for_target(other)).await,
        }
    }

    /// Remove the silences muting the target. Events name theirs; entity
    /// silences are looked up. Silences already gone are skipped.
    async fn clear_silence(&self, target: &Target) -> Result<(), SourceError> {
        let names: Vec<String> = match target {
            Target::Event { silenced_by, .. } => silenced_by.clone(),
            Target::Entity {
                name,
                subscriptions,
            } => self
                .list_silences("")
                .await?
                .into_iter()
                .filter(|s| silences_entity(s, name, subscriptions))
                .map(|s| s.name)
                .collect(),
            Target::Silence(_) => Vec::new(),
        };
        for name in names {
            match self.delete_silence(&name).await {
                Ok(()) | Err(SourceError::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    async fn delete(&self, target: &Target) -> Result<(), SourceError> {
        match target {
            Target::Entity { name, .. } => self.delete_entity(name).await,
            Target::Event { entity, check, .. } => self.delete_event(entity, check).await,
            Target::Silence(name) => self.delete_silence(name).await,
        }
    }
}

/// Case-insensitive substring match on a record name. Empty queries match.
pub fn matches_query(name: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn entity_subscription(entity: &str) -> String {
    format!("entity:{}", entity)
}

pub fn silence_name(subscription: Option<&str>, check: Option<&str>) -> String {
    format!("{}:{}", subscription.unwrap_or("*"), check.unwrap_or("*"))
}

fn is_wildcard(value: Option<&str>) -> bool {
    matches!(value, None | Some("*"))
}

fn subscribed(subscription: &str, entity: &str, subscriptions: &[String]) -> bool {
    subscription == entity_subscription(entity) || subscriptions.iter().any(|s| s == subscription)
}

/// Whether a silence applies to a check on an entity. Entity-level
/// silences (no check) apply to every check.
pub fn silences_check(silence: &Silence, entity: &str, subscriptions: &[String], check: &str) -> bool {
    let subscription_matches = match silence.subscription.as_deref() {
        None | Some("*") => true,
        Some(sub) => subscribed(sub, entity, subscriptions),
    };
    let check_matches = is_wildcard(silence.check.as_deref()) || silence.check.as_deref() == Some(check);
    subscription_matches && check_matches
}

/// Whether a silence mutes an entity as a whole: every check, on the
/// entity's own subscription or one it listens on.
pub fn silences_entity(silence: &Silence, entity: &str, subscriptions: &[String]) -> bool {
    let subscription_matches = silence
        .subscription
        .as_deref()
        .is_some_and(|sub| sub != "*" && subscribed(sub, entity, subscriptions));
    subscription_matches && is_wildcard(silence.check.as_deref())
}

/// Mark entities and events silenced according to the current silences.
pub fn apply_silences(entities: &mut [Entity], events: &mut [Event], silences: &[Silence]) {
    for entity in entities.iter_mut() {
        entity.is_silenced = silences
            .iter()
            .any(|s| silences_entity(s, &entity.name, &entity.subscriptions));
    }
    for event in events.iter_mut() {
        event.check.silenced_by = silences
            .iter()
            .filter(|s| {
                silences_check(
                    s,
                    &event.entity.name,
                    &event.entity.subscriptions,
                    &event.check.name,
                )
            })
            .map(|s| s.name.clone())
            .collect();
        event.is_silenced = !event.check.silenced_by.is_empty();
    }
}

/// Set each entity's status to the worst check status among its events.
/// Entities without events are OK.
pub fn apply_statuses(entities: &mut [Entity], events: &[Event]) {
    for entity in entities.iter_mut() {
        entity.status = events
            .iter()
            .filter(|e| e.entity.name == entity.name)
            .map(|e| e.check.status)
            .max()
            .unwrap_or(CheckStatus::OK);
    }
}

/// Run one request and report the outcome on `sender`.
pub async fn execute(source: Arc<dyn DataSource>, request: Request, sender: mpsc::UnboundedSender<TuiEvent>) {
    let event = match request {
        Request::Fetch { view, query } => match fetch(source.as_ref(), view, &query).await {
            Ok(loaded) => TuiEvent::Loaded(loaded),
            Err(err) => {
                tracing::warn!(view = view.title(), error = %err, "fetch failed");
                TuiEvent::SourceError(format!("Loading {} failed: {}", view.title(), err))
            }
        },
        Request::Mutate {
            view,
            op,
            ids,
            targets,
            bulk,
        } => match mutate(source.as_ref(), op, &targets).await {
            Ok(()) => TuiEvent::Completed(Completion { view, op, ids, bulk }),
            Err(err) => {
                tracing::warn!(view = view.title(), ?op, error = %err, "mutation failed");
                TuiEvent::SourceError(format!("{} failed: {}", op.past_tense(), err))
            }
        },
        Request::CreateSilence(silence) => {
            let name = silence.name();
            match source.create_silence(silence).await {
                Ok(()) => TuiEvent::Completed(Completion {
                    view: View::Silences,
                    op: Mutation::Silence,
                    ids: vec![ResourceId::new(name)],
                    bulk: false,
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "silence creation failed");
                    TuiEvent::SourceError(format!("Creating silence failed: {}", err))
                }
            }
        }
    };
    if sender.send(event).is_err() {
        tracing::debug!("event loop closed before request finished");
    }
}

async fn fetch(source: &dyn DataSource, view: View, query: &str) -> Result<Loaded, SourceError> {
    let query = query.to_string();
    match view {
        View::Entities => Ok(Loaded::Entities {
            records: source.list_entities(&query).await?,
            query,
        }),
        View::Events | View::EventDetail => Ok(Loaded::Events {
            records: source.list_events(&query).await?,
            query,
        }),
        View::Silences => Ok(Loaded::Silences {
            records: source.list_silences(&query).await?,
            query,
        }),
    }
}

async fn mutate(source: &dyn DataSource, op: Mutation, targets: &[Target]) -> Result<(), SourceError> {
    for target in targets {
        match op {
            Mutation::Silence => source.silence(target).await?,
            Mutation::ClearSilence => source.clear_silence(target).await?,
            Mutation::Delete => source.delete(target).await?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silence(subscription: Option<&str>, check: Option<&str>) -> Silence {
        Silence {
            name: silence_name(subscription, check),
            namespace: "default".to_string(),
            subscription: subscription.map(str::to_string),
            check: check.map(str::to_string),
            creator: "admin".to_string(),
            reason: None,
            begin: None,
            expire_on_resolve: false,
        }
    }

    #[test]
    fn query_matching_is_case_insensitive() {
        assert!(matches_query("web-01", ""));
        assert!(matches_query("web-01", "WEB"));
        assert!(matches_query("web-01", "  eb-0 "));
        assert!(!matches_query("web-01", "db"));
    }

    #[test]
    fn entity_silence_covers_every_check() {
        let entry = silence(Some("entity:web-01"), None);
        assert!(silences_entity(&entry, "web-01", &[]));
        assert!(silences_check(&entry, "web-01", &[], "check-cpu"));
        assert!(!silences_check(&entry, "web-02", &[], "check-cpu"));
    }

    #[test]
    fn check_silence_covers_all_entities() {
        let entry = silence(None, Some("check-cpu"));
        assert!(silences_check(&entry, "web-01", &[], "check-cpu"));
        assert!(!silences_check(&entry, "web-01", &[], "check-disk"));
        assert!(!silences_entity(&entry, "web-01", &[]));
    }

    #[test]
    fn subscription_silence_needs_membership() {
        let entry = silence(Some("linux"), Some("check-cpu"));
        let subscriptions = vec!["linux".to_string()];
        assert!(silences_check(&entry, "web-01", &subscriptions, "check-cpu"));
        assert!(!silences_check(&entry, "web-01", &[], "check-cpu"));
    }

    #[test]
    fn subscription_wide_silence_mutes_member_entities() {
        let entry = silence(Some("linux"), None);
        let subscriptions = vec!["linux".to_string()];
        assert!(silences_entity(&entry, "web-01", &subscriptions));
        assert!(!silences_entity(&entry, "web-01", &[]));
        assert!(!silences_entity(&silence(Some("linux"), Some("check-cpu")), "web-01", &subscriptions));
    }

    #[test]
    fn entity_status_is_worst_event_status() {
        let mut entities = vec![
            vigil_test_utils::fixtures::entity("web-01"),
            vigil_test_utils::fixtures::entity("db-01"),
        ];
        let events = vec![
            vigil_test_utils::fixtures::event("web-01", "check-cpu", CheckStatus::WARNING),
            vigil_test_utils::fixtures::event("web-01", "check-disk", CheckStatus::CRITICAL),
            vigil_test_utils::fixtures::event("db-01", "check-disk", CheckStatus::OK),
        ];
        apply_statuses(&mut entities, &events);
        assert_eq!(entities[0].status, CheckStatus::CRITICAL);
        assert_eq!(entities[1].status, CheckStatus::OK);
    }

    #[test]
    fn silence_names_use_wildcards() {
        assert_eq!(silence_name(Some("entity:web-01"), None), "entity:web-01:*");
        assert_eq!(silence_name(None, Some("check-cpu")), "*:check-cpu");
    }

    #[test]
    fn new_silence_for_event_targets_one_check() {
        let target = Target::Event {
            entity: "web-01".to_string(),
            check: "check-cpu".to_string(),
            silenced_by: Vec::new(),
        };
        let silence = NewSilence::for_target(&target);
        assert_eq!(silence.name(), "entity:web-01:check-cpu");
        assert!(silence.is_valid());
        assert!(!NewSilence::default().is_valid());
    }
}
