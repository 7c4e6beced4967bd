//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Linode API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Event, Instance, InstanceStatus, Volume, VolumeStatus};

/// Why a state transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    NotFound,
    Conflict(String),
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Instances indexed by ID.
    pub instances: HashMap<u64, Instance>,

    /// Volumes indexed by ID.
    pub volumes: HashMap<u64, Volume>,

    /// Account events indexed by ID.
    pub events: HashMap<u64, Event>,

    /// Optional authentication token. If set, requests must carry it as a bearer token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.insert(instance.id, instance);
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volumes.insert(volume.id, volume);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.insert(event.id, event);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Whether an `Authorization` header value is acceptable.
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        match &self.required_token {
            None => true,
            Some(token) => header.and_then(|h| h.strip_prefix("Bearer ")) == Some(token.as_str()),
        }
    }

    pub fn get_instance(&self, id: u64) -> Option<&Instance> {
        self.instances.get(&id)
    }

    pub fn get_volume(&self, id: u64) -> Option<&Volume> {
        self.volumes.get(&id)
    }

    pub fn get_event(&self, id: u64) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Instances ordered by ID and narrowed by an optional `X-Filter`.
    pub fn list_instances(&self, filter: Option<&Value>) -> Vec<Instance> {
        sorted_matching(&self.instances, filter)
    }

    /// Volumes ordered by ID and narrowed by an optional `X-Filter`.
    pub fn list_volumes(&self, filter: Option<&Value>) -> Vec<Volume> {
        sorted_matching(&self.volumes, filter)
    }

    /// Volumes attached to one instance.
    pub fn list_instance_volumes(&self, linode_id: u64) -> Vec<Volume> {
        let mut volumes: Vec<Volume> = self
            .volumes
            .values()
            .filter(|v| v.linode_id == Some(linode_id))
            .cloned()
            .collect();
        volumes.sort_by_key(|v| v.id);
        volumes
    }

    /// Events newest first, the way the API orders them.
    pub fn list_events(&self, filter: Option<&Value>) -> Vec<Event> {
        let mut events = sorted_matching(&self.events, filter);
        events.reverse();
        events
    }

    /// Apply label and tag changes to an instance.
    pub fn update_instance(
        &mut self,
        id: u64,
        label: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Option<&Instance> {
        let instance = self.instances.get_mut(&id)?;
        if let Some(l) = label {
            instance.label = l;
        }
        if let Some(t) = tags {
            instance.tags = t;
        }
        Some(&*instance)
    }

    /// Move an instance to a new status and record the matching event.
    pub fn set_instance_status(
        &mut self,
        id: u64,
        status: InstanceStatus,
        action: &str,
    ) -> Result<(), StateError> {
        let instance = self.instances.get_mut(&id).ok_or(StateError::NotFound)?;
        instance.status = status;
        let label = instance.label.clone();
        self.record_event(action, id, "linode", &label);
        Ok(())
    }

    pub fn delete_instance(&mut self, id: u64) -> Result<(), StateError> {
        self.instances.remove(&id).ok_or(StateError::NotFound)?;
        for volume in self.volumes.values_mut() {
            if volume.linode_id == Some(id) {
                volume.linode_id = None;
                volume.linode_label = None;
            }
        }
        Ok(())
    }

    /// Attach a volume to an instance in the same region.
    pub fn attach_volume(&mut self, id: u64, linode_id: u64) -> Result<&Volume, StateError> {
        let instance = self.instances.get(&linode_id).ok_or_else(|| {
            StateError::Conflict(format!("Linode {linode_id} not found"))
        })?;
        let (instance_label, instance_region) = (instance.label.clone(), instance.region.clone());

        let volume = self.volumes.get_mut(&id).ok_or(StateError::NotFound)?;
        if volume.linode_id.is_some() {
            return Err(StateError::Conflict("Volume is already attached".to_string()));
        }
        if volume.region != instance_region {
            return Err(StateError::Conflict(
                "Volume and Linode must be in the same region".to_string(),
            ));
        }
        volume.linode_id = Some(linode_id);
        volume.linode_label = Some(instance_label);
        volume.filesystem_path = format!("/dev/disk/by-id/scsi-0Linode_Volume_{}", volume.label);
        let label = volume.label.clone();

        self.record_event("volume_attach", id, "volume", &label);
        self.volumes.get(&id).ok_or(StateError::NotFound)
    }

    pub fn detach_volume(&mut self, id: u64) -> Result<(), StateError> {
        let volume = self.volumes.get_mut(&id).ok_or(StateError::NotFound)?;
        volume.linode_id = None;
        volume.linode_label = None;
        let label = volume.label.clone();
        self.record_event("volume_detach", id, "volume", &label);
        Ok(())
    }

    pub fn delete_volume(&mut self, id: u64) -> Result<(), StateError> {
        let volume = self.volumes.get(&id).ok_or(StateError::NotFound)?;
        if volume.linode_id.is_some() {
            return Err(StateError::Conflict(
                "Volume must be detached before it can be deleted".to_string(),
            ));
        }
        self.volumes.remove(&id);
        Ok(())
    }

    pub fn set_volume_status(&mut self, id: u64, status: VolumeStatus) -> Option<&Volume> {
        let volume = self.volumes.get_mut(&id)?;
        volume.status = status;
        Some(&*volume)
    }

    pub fn mark_event_seen(&mut self, id: u64) -> Result<(), StateError> {
        let event = self.events.get_mut(&id).ok_or(StateError::NotFound)?;
        event.seen = true;
        Ok(())
    }

    /// Append a finished event for a completed action.
    fn record_event(&mut self, action: &str, entity_id: u64, entity_type: &str, label: &str) {
        let id = self.events.keys().max().copied().unwrap_or(0) + 1;
        let event = super::Fixtures::finished_event(id, action, entity_id, entity_type, label);
        self.events.insert(id, event);
    }
}

fn sorted_matching<T: Clone + Serialize>(items: &HashMap<u64, T>, filter: Option<&Value>) -> Vec<T> {
    let ordered: BTreeMap<_, _> = items.iter().collect();
    ordered
        .into_values()
        .filter(|item| match filter {
            None => true,
            Some(f) => serde_json::to_value(item)
                .map(|v| matches_filter(&v, f))
                .unwrap_or(false),
        })
        .cloned()
        .collect()
}

/// Evaluate the subset of `X-Filter` the mock understands: plain equality,
/// `+and`/`+or` groups and `+contains` on strings. Ordering keys are ignored.
pub fn matches_filter(item: &Value, filter: &Value) -> bool {
    let Some(clauses) = filter.as_object() else {
        return true;
    };

    clauses.iter().all(|(key, expected)| match key.as_str() {
        "+and" => expected
            .as_array()
            .is_some_and(|children| children.iter().all(|c| matches_filter(item, c))),
        "+or" => expected
            .as_array()
            .is_some_and(|children| children.iter().any(|c| matches_filter(item, c))),
        "+order_by" | "+order" => true,
        field => matches_field(item.get(field), expected),
    })
}

fn matches_field(actual: Option<&Value>, expected: &Value) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    match expected.as_object() {
        Some(ops) => ops.iter().all(|(op, operand)| match op.as_str() {
            "+eq" => actual == operand,
            "+neq" => actual != operand,
            "+contains" => match (actual, operand.as_str()) {
                (Value::String(s), Some(needle)) => s.contains(needle),
                (Value::Array(list), _) => list.contains(operand),
                _ => false,
            },
            _ => false,
        }),
        // Tags match when the list contains the value.
        None => match actual {
            Value::Array(list) => list.contains(expected),
            _ => actual == expected,
        },
    }
}
