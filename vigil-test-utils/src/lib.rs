//! VIGIL Test Utilities
//!
//! Shared test infrastructure for the VIGIL workspace:
//! - Proptest generators for action lists and resource records
//! - Record fixtures for common scenarios
//! - Recorders that count callback invocations

pub use vigil_core::{
    ActionItem, Callback, CheckStatus, Entity, EntityRef, EntitySystem, Event, EventCheck,
    ResourceId, Silence, Timestamp, VisibilityPolicy,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for toolbar and selection properties.

    use super::*;
    use proptest::prelude::*;

    pub fn arb_policy() -> impl Strategy<Value = VisibilityPolicy> {
        prop_oneof![
            Just(VisibilityPolicy::Always),
            Just(VisibilityPolicy::Never),
            Just(VisibilityPolicy::IfRoom),
        ]
    }

    /// Labels between 1 and 24 characters, some with an ellipsis.
    pub fn arb_label() -> impl Strategy<Value = String> {
        ("[A-Za-z][A-Za-z ]{0,22}", any::<bool>())
            .prop_map(|(label, ellipsis)| if ellipsis { format!("{}…", label) } else { label })
    }

    /// Up to `max` actions with unique ids `a0, a1, …` and random policies.
    pub fn arb_actions(max: usize) -> impl Strategy<Value = Vec<ActionItem<()>>> {
        prop::collection::vec((arb_label(), arb_policy(), any::<bool>()), 0..=max).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(idx, (label, policy, destructive))| {
                        let item = ActionItem::new(format!("a{}", idx), label).visibility(policy);
                        if destructive {
                            item.destructive()
                        } else {
                            item
                        }
                    })
                    .collect()
            },
        )
    }

    /// Terminal widths from degenerate to very wide.
    pub fn arb_width() -> impl Strategy<Value = u16> {
        prop_oneof![0u16..16, 16u16..120, 120u16..400]
    }

    pub fn arb_resource_id() -> impl Strategy<Value = ResourceId> {
        "r[0-9]{1,2}".prop_map(ResourceId::from)
    }

    pub fn arb_entity() -> impl Strategy<Value = Entity> {
        ("[a-z]{3,8}-[0-9]{2}", any::<bool>(), 0u32..4).prop_map(|(name, silenced, status)| {
            let mut entity = fixtures::entity(&name);
            entity.is_silenced = silenced;
            entity.status = CheckStatus(status);
            entity
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records for common scenarios.

    use super::*;
    use chrono::TimeZone;

    pub fn timestamp() -> Timestamp {
        chrono::Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(chrono::Utc::now)
    }

    pub fn entity(name: &str) -> Entity {
        Entity {
            name: name.to_string(),
            namespace: "default".to_string(),
            class: "agent".to_string(),
            status: CheckStatus::OK,
            is_silenced: false,
            last_seen: Some(timestamp()),
            system: EntitySystem {
                platform: "linux".to_string(),
                platform_version: "6.1".to_string(),
            },
            subscriptions: vec!["linux".to_string()],
        }
    }

    pub fn silenced_entity(name: &str) -> Entity {
        Entity {
            is_silenced: true,
            ..entity(name)
        }
    }

    pub fn event(entity: &str, check: &str, status: CheckStatus) -> Event {
        Event {
            namespace: "default".to_string(),
            timestamp: timestamp(),
            entity: EntityRef {
                name: entity.to_string(),
                class: "agent".to_string(),
                last_seen: Some(timestamp()),
                subscriptions: vec!["linux".to_string()],
            },
            check: EventCheck {
                name: check.to_string(),
                status,
                output: format!("{} {}", check, status.label()),
                silenced_by: Vec::new(),
            },
            is_silenced: false,
        }
    }

    pub fn silence(subscription: &str, check: &str) -> Silence {
        Silence {
            name: format!("{}:{}", subscription, check),
            namespace: "default".to_string(),
            subscription: Some(subscription.to_string()),
            check: Some(check.to_string()),
            creator: "admin".to_string(),
            reason: None,
            begin: Some(timestamp()),
            expire_on_resolve: false,
        }
    }
}

// ============================================================================
// RECORDERS
// ============================================================================

pub mod recorders {
    //! Callbacks that remember what they were called with.

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every argument a callback receives.
    #[derive(Debug)]
    pub struct Recorder<A> {
        calls: Rc<RefCell<Vec<A>>>,
    }

    impl<A> Default for Recorder<A> {
        fn default() -> Self {
            Self {
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl<A: Clone + 'static> Recorder<A> {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn callback(&self) -> Callback<A> {
            let calls = self.calls.clone();
            Callback::new(move |arg: &A| calls.borrow_mut().push(arg.clone()))
        }

        pub fn calls(&self) -> Vec<A> {
            self.calls.borrow().clone()
        }

        pub fn count(&self) -> usize {
            self.calls.borrow().len()
        }
    }
}
