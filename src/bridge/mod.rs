//! Schema-editor bridge: fetch a schema, then swap the mounted editor.
//!
//! Loads are fire-and-forget. Each [`EditorBridge::load_editor`] call takes
//! the next [`RequestId`] and spawns the fetch; the result comes back through
//! the app event channel as a [`SchemaResponse`]. Only the response carrying
//! the most recently issued id is applied, so a slow early request can never
//! overwrite the editor a later request mounted.

pub mod editor;
pub mod error;
pub mod source;

use crate::app::event::AppEvent;
use crate::gdb::GlobalDataBindings;
use editor::{EditorInstance, EditorOptions};
use error::LoadError;
use serde_json::Value;
use source::DataSource;
use std::sync::Arc;
use tokio::sync::mpsc;

pub type RequestId = u64;

/// Outcome of a schema fetch, tagged with the request that issued it.
#[derive(Debug)]
pub struct SchemaResponse {
    pub request_id: RequestId,
    pub data_type: String,
    pub item: Value,
    pub result: Result<Value, LoadError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Absent,
    Loading,
    Mounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Mounted(RequestId),
    Stale(RequestId),
    Failed(RequestId),
}

/// Holds the single live editor. Replacing it always releases the old one
/// before the new one goes in.
#[derive(Debug, Default)]
pub struct EditorSlot {
    instance: Option<EditorInstance>,
    mounted: usize,
    released: usize,
}

impl EditorSlot {
    pub fn instance(&self) -> Option<&EditorInstance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut EditorInstance> {
        self.instance.as_mut()
    }

    /// Editors mounted and not yet released. Never more than one.
    pub fn live(&self) -> usize {
        self.mounted - self.released
    }

    fn replace(&mut self, next: EditorInstance) {
        if let Some(previous) = self.instance.take() {
            previous.destroy();
            self.released += 1;
        }
        self.instance = Some(next);
        self.mounted += 1;
    }
}

#[derive(Debug)]
struct PendingLoad {
    id: RequestId,
    data_type: String,
}

pub struct EditorBridge {
    source: Arc<dyn DataSource>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    options: EditorOptions,
    latest: RequestId,
    pending: Option<PendingLoad>,
    slot: EditorSlot,
}

impl EditorBridge {
    pub fn new(
        source: Arc<dyn DataSource>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        options: EditorOptions,
    ) -> Self {
        Self {
            source,
            event_tx,
            options,
            latest: 0,
            pending: None,
            slot: EditorSlot::default(),
        }
    }

    /// Start loading an editor for `data_type` seeded with `item`. Returns
    /// the id the eventual [`SchemaResponse`] will carry.
    pub fn load_editor(&mut self, data_type: &str, item: Value) -> RequestId {
        self.latest += 1;
        let request_id = self.latest;
        self.pending = Some(PendingLoad {
            id: request_id,
            data_type: data_type.to_string(),
        });
        tracing::info!(request_id, data_type, "loading editor");

        let source = Arc::clone(&self.source);
        let tx = self.event_tx.clone();
        let data_type = data_type.to_string();
        tokio::spawn(async move {
            let result = fetch_schema(source.as_ref(), &data_type).await;
            let _ = tx.send(AppEvent::SchemaLoaded(SchemaResponse {
                request_id,
                data_type,
                item,
                result,
            }));
        });

        request_id
    }

    /// Apply a finished fetch. Stale responses are dropped without touching
    /// anything; failures are logged and leave the current editor mounted.
    pub fn complete_load(&mut self, response: SchemaResponse) -> LoadOutcome {
        let SchemaResponse {
            request_id,
            data_type,
            item,
            result,
        } = response;

        if request_id != self.latest {
            tracing::debug!(
                request_id,
                latest = self.latest,
                %data_type,
                "discarding stale schema response"
            );
            return LoadOutcome::Stale(request_id);
        }
        self.pending = None;

        let built = result.and_then(|schema| {
            EditorInstance::new(&data_type, self.options.clone(), schema, item)
        });
        match built {
            Ok(instance) => {
                self.slot.replace(instance);
                tracing::info!(request_id, %data_type, live = self.slot.live(), "editor mounted");
                LoadOutcome::Mounted(request_id)
            }
            Err(e) => {
                let report = anyhow::Error::new(e);
                tracing::error!(request_id, %data_type, "Error loading editor: {report:#}");
                LoadOutcome::Failed(request_id)
            }
        }
    }

    pub fn state(&self) -> SlotState {
        if self.pending.is_some() {
            SlotState::Loading
        } else if self.slot.instance.is_some() {
            SlotState::Mounted
        } else {
            SlotState::Absent
        }
    }

    /// Id and data type of the load still in flight, if any.
    pub fn pending(&self) -> Option<(RequestId, &str)> {
        self.pending.as_ref().map(|p| (p.id, p.data_type.as_str()))
    }

    #[cfg(test)]
    pub fn slot(&self) -> &EditorSlot {
        &self.slot
    }

    pub fn editor(&self) -> Option<&EditorInstance> {
        self.slot.instance()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorInstance> {
        self.slot.instance_mut()
    }

    /// Fetch the game database once in the background; the result arrives as
    /// [`AppEvent::GdbLoaded`].
    pub fn load_gdb(&self) {
        let source = Arc::clone(&self.source);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match source.fetch_gdb().await {
                Ok(body) => GlobalDataBindings::from_json(&body),
                Err(e) => Err(e),
            };
            let _ = tx.send(AppEvent::GdbLoaded(result));
        });
    }
}

async fn fetch_schema(source: &dyn DataSource, data_type: &str) -> Result<Value, LoadError> {
    let body = source.fetch_schema(data_type).await?;
    Ok(serde_json::from_str(&body)?)
}
