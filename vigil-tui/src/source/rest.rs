//! REST data source for a Sensu-style core API.
//!
//! Resources live under `/api/core/v2/namespaces/{namespace}`. The API has
//! no name filter, so listings are fetched whole and filtered here.

use super::{apply_silences, apply_statuses, matches_query, DataSource, NewSilence, SourceError};
use crate::config::{AuthConfig, TuiConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_core::{
    CheckStatus, Entity, EntityRef, EntitySystem, Event, EventCheck, Silence, Timestamp,
};

#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
    namespace: String,
    auth_header: HeaderMap,
}

impl RestSource {
    pub fn new(config: &TuiConfig) -> Result<Self, SourceError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(&config.auth)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            auth_header,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/api/core/v2/namespaces/{}{}",
            self.base_url, self.namespace, path
        )
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(self.url(path))
            .headers(self.auth_header.clone())
            .send()
            .await?;
        let response = check_response(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<(), SourceError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.url(path))
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    async fn delete_path(&self, path: &str) -> Result<(), SourceError> {
        let response = self
            .client
            .delete(self.url(path))
            .headers(self.auth_header.clone())
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    async fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        let wire: Vec<WireEvent> = self.get_json("/events").await?;
        Ok(wire.into_iter().map(WireEvent::into_event).collect())
    }

    async fn fetch_silences(&self) -> Result<Vec<Silence>, SourceError> {
        let wire: Vec<WireSilence> = self.get_json("/silenced").await?;
        Ok(wire.into_iter().map(WireSilence::into_silence).collect())
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn list_entities(&self, query: &str) -> Result<Vec<Entity>, SourceError> {
        let wire: Vec<WireEntity> = self.get_json("/entities").await?;
        let events = self.fetch_events().await?;
        let silences = self.fetch_silences().await?;
        let mut entities: Vec<Entity> = wire
            .into_iter()
            .map(WireEntity::into_entity)
            .filter(|e| matches_query(&e.name, query))
            .collect();
        apply_statuses(&mut entities, &events);
        apply_silences(&mut entities, &mut [], &silences);
        Ok(entities)
    }

    async fn list_events(&self, query: &str) -> Result<Vec<Event>, SourceError> {
        let mut events = self.fetch_events().await?;
        events.retain(|e| matches_query(&e.check.name, query));
        Ok(events)
    }

    async fn list_silences(&self, query: &str) -> Result<Vec<Silence>, SourceError> {
        let mut silences = self.fetch_silences().await?;
        silences.retain(|s| matches_query(&s.name, query));
        Ok(silences)
    }

    async fn create_silence(&self, silence: NewSilence) -> Result<(), SourceError> {
        if !silence.is_valid() {
            return Err(SourceError::InvalidResponse(
                "a silence needs a subscription or a check".to_string(),
            ));
        }
        let body = WireSilenceBody::new(&silence, &self.namespace);
        self.post_json("/silenced", &body).await
    }

    async fn delete_silence(&self, name: &str) -> Result<(), SourceError> {
        self.delete_path(&format!("/silenced/{}", name)).await
    }

    async fn delete_entity(&self, name: &str) -> Result<(), SourceError> {
        self.delete_path(&format!("/entities/{}", name)).await
    }

    async fn delete_event(&self, entity: &str, check: &str) -> Result<(), SourceError> {
        self.delete_path(&format!("/events/{}/{}", entity, check)).await
    }
}

async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().path().to_string();
    let text = response.text().await?;
    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(url));
    }
    if let Ok(api_error) = serde_json::from_str::<WireError>(&text) {
        return Err(SourceError::InvalidResponse(format!(
            "HTTP {}: {}",
            status.as_u16(),
            api_error.message
        )));
    }
    Err(SourceError::InvalidResponse(format!(
        "HTTP {}: {}",
        status.as_u16(),
        text
    )))
}

fn build_auth_headers(auth: &AuthConfig) -> Result<HeaderMap, SourceError> {
    let mut headers = HeaderMap::new();
    let value = match (&auth.access_token, &auth.api_key) {
        (Some(token), _) => Some(format!("Bearer {}", token)),
        (None, Some(key)) => Some(format!("Key {}", key)),
        (None, None) => None,
    };
    if let Some(value) = value {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(|e| SourceError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}

fn from_unix(seconds: i64) -> Option<Timestamp> {
    if seconds <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

// ============================================================================
// Wire formats
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ObjectMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireSystem {
    #[serde(default)]
    platform: String,
    #[serde(default)]
    platform_version: String,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    metadata: ObjectMeta,
    #[serde(default)]
    entity_class: String,
    #[serde(default)]
    last_seen: i64,
    #[serde(default)]
    system: WireSystem,
    #[serde(default)]
    subscriptions: Vec<String>,
}

impl WireEntity {
    fn into_entity(self) -> Entity {
        Entity {
            name: self.metadata.name,
            namespace: self.metadata.namespace,
            class: self.entity_class,
            status: CheckStatus::OK,
            is_silenced: false,
            last_seen: from_unix(self.last_seen),
            system: EntitySystem {
                platform: self.system.platform,
                platform_version: self.system.platform_version,
            },
            subscriptions: self.subscriptions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireCheck {
    metadata: ObjectMeta,
    #[serde(default)]
    status: u32,
    #[serde(default)]
    output: String,
    #[serde(default)]
    silenced: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    timestamp: i64,
    entity: WireEntity,
    check: WireCheck,
}

impl WireEvent {
    fn into_event(self) -> Event {
        let is_silenced = !self.check.silenced.is_empty();
        let namespace = if self.metadata.namespace.is_empty() {
            self.entity.metadata.namespace.clone()
        } else {
            self.metadata.namespace
        };
        Event {
            namespace,
            timestamp: from_unix(self.timestamp).unwrap_or_else(Utc::now),
            entity: EntityRef {
                name: self.entity.metadata.name,
                class: self.entity.entity_class,
                last_seen: from_unix(self.entity.last_seen),
                subscriptions: self.entity.subscriptions,
            },
            check: EventCheck {
                name: self.check.metadata.name,
                status: CheckStatus(self.check.status),
                output: self.check.output,
                silenced_by: self.check.silenced,
            },
            is_silenced,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireSilence {
    metadata: ObjectMeta,
    #[serde(default)]
    subscription: Option<String>,
    #[serde(default)]
    check: Option<String>,
    #[serde(default)]
    creator: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    begin: i64,
    #[serde(default)]
    expire_on_resolve: bool,
}

impl WireSilence {
    fn into_silence(self) -> Silence {
        Silence {
            name: self.metadata.name,
            namespace: self.metadata.namespace,
            subscription: self.subscription.filter(|s| !s.is_empty()),
            check: self.check.filter(|c| !c.is_empty()),
            creator: self.creator,
            reason: self.reason.filter(|r| !r.is_empty()),
            begin: from_unix(self.begin),
            expire_on_resolve: self.expire_on_resolve,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireSilenceBody {
    metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    expire_on_resolve: bool,
}

impl WireSilenceBody {
    fn new(silence: &NewSilence, namespace: &str) -> Self {
        Self {
            metadata: ObjectMeta {
                name: silence.name(),
                namespace: namespace.to_string(),
            },
            subscription: silence.subscription.clone(),
            check: silence.check.clone(),
            reason: silence.reason.clone(),
            expire_on_resolve: silence.expire_on_resolve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_wire_format_converts() {
        let json = r#"{
            "metadata": {"name": "web-01", "namespace": "default"},
            "entity_class": "agent",
            "last_seen": 1700000000,
            "system": {"platform": "ubuntu", "platform_version": "22.04"},
            "subscriptions": ["linux", "entity:web-01"]
        }"#;
        let wire: WireEntity = serde_json::from_str(json).expect("valid entity json");
        let entity = wire.into_entity();
        assert_eq!(entity.name, "web-01");
        assert_eq!(entity.class, "agent");
        assert!(entity.last_seen.is_some());
        assert_eq!(entity.system.platform, "ubuntu");
        assert_eq!(entity.subscriptions, vec!["linux", "entity:web-01"]);
    }

    #[test]
    fn entity_status_follows_its_worst_event() {
        let entity: WireEntity = serde_json::from_str(
            r#"{"metadata": {"name": "web-01", "namespace": "default"}, "entity_class": "agent"}"#,
        )
        .expect("valid entity json");
        let events: Vec<WireEvent> = serde_json::from_str(
            r#"[
                {"entity": {"metadata": {"name": "web-01"}}, "check": {"metadata": {"name": "check-cpu"}, "status": 1}},
                {"entity": {"metadata": {"name": "web-01"}}, "check": {"metadata": {"name": "check-disk"}, "status": 2}},
                {"entity": {"metadata": {"name": "db-01"}}, "check": {"metadata": {"name": "check-disk"}, "status": 0}}
            ]"#,
        )
        .expect("valid events json");
        let events: Vec<Event> = events.into_iter().map(WireEvent::into_event).collect();
        let mut entities = vec![entity.into_entity()];
        apply_statuses(&mut entities, &events);
        assert_eq!(entities[0].status, CheckStatus::CRITICAL);
    }

    #[test]
    fn never_seen_entity_has_no_timestamp() {
        let json = r#"{"metadata": {"name": "switch-7"}, "entity_class": "proxy"}"#;
        let wire: WireEntity = serde_json::from_str(json).expect("valid entity json");
        assert!(wire.into_entity().last_seen.is_none());
    }

    #[test]
    fn event_silenced_flag_follows_check() {
        let json = r#"{
            "timestamp": 1700000000,
            "entity": {"metadata": {"name": "web-01", "namespace": "default"}, "entity_class": "agent"},
            "check": {"metadata": {"name": "check-cpu"}, "status": 2, "output": "CPU 99%", "silenced": ["entity:web-01:*"]}
        }"#;
        let wire: WireEvent = serde_json::from_str(json).expect("valid event json");
        let event = wire.into_event();
        assert_eq!(event.namespace, "default");
        assert_eq!(event.check.status, CheckStatus::CRITICAL);
        assert!(event.is_silenced);
    }

    #[test]
    fn silence_body_uses_wildcard_name() {
        let silence = NewSilence {
            subscription: Some("entity:web-01".to_string()),
            ..NewSilence::default()
        };
        let body = serde_json::to_value(WireSilenceBody::new(&silence, "default"))
            .expect("serializable body");
        assert_eq!(body["metadata"]["name"], "entity:web-01:*");
        assert!(body.get("check").is_none());
    }

    #[test]
    fn bearer_token_wins_over_api_key() {
        let headers = build_auth_headers(&AuthConfig {
            api_key: Some("key".to_string()),
            access_token: Some("token".to_string()),
        })
        .expect("valid header");
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer token")
        );
    }
}
