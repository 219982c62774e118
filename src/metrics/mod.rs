//! Counters for drag-and-drop activity, snapshotted into log events.

use std::time::Duration;

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

#[derive(Debug, Default, Clone)]
pub struct PanelMetrics {
    drags: u64,
    drops: u64,
    cancels: u64,
    removals: u64,
    relayouts: u64,
    rejected: u64,
}

impl PanelMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_drag(&mut self) {
        self.drags = self.drags.saturating_add(1);
    }

    pub fn record_drop(&mut self) {
        self.drops = self.drops.saturating_add(1);
    }

    pub fn record_cancel(&mut self) {
        self.cancels = self.cancels.saturating_add(1);
    }

    pub fn record_removal(&mut self) {
        self.removals = self.removals.saturating_add(1);
    }

    pub fn record_relayout(&mut self) {
        self.relayouts = self.relayouts.saturating_add(1);
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            drags: self.drags,
            drops: self.drops,
            cancels: self.cancels,
            removals: self.removals,
            relayouts: self.relayouts,
            rejected: self.rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub drags: u64,
    pub drops: u64,
    pub cancels: u64,
    pub removals: u64,
    pub relayouts: u64,
    pub rejected: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("drags".to_string(), json!(self.drags));
        fields.insert("drops".to_string(), json!(self.drops));
        fields.insert("cancels".to_string(), json!(self.cancels));
        fields.insert("removals".to_string(), json!(self.removals));
        fields.insert("relayouts".to_string(), json!(self.relayouts));
        fields.insert("rejected".to_string(), json!(self.rejected));
        LogEvent::with_fields(LogLevel::Info, target, "panel_metrics", fields)
    }
}
