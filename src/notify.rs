// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use futures_util::lock::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// How long a notification stays visible unless the caller asks otherwise.
pub(crate) const DEFAULT_EXPIRY: Duration = Duration::from_millis(5000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Success,
    Error,
    Info,
    Warning,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Notification {
    pub(crate) id: Uuid,
    pub(crate) text: String,
    pub(crate) kind: Kind,
    pub(crate) created_at: DateTime<Utc>,
}

struct Entry {
    notification: Notification,
    expiry: Option<AbortHandle>,
}

/// Ordered, multi-producer list of transient user-facing messages.
/// Insertion order is display order. Every entry with a non-zero lifetime
/// owns an expiry timer; the timer is aborted when the entry is removed by
/// hand, and a timer that fires for an already-removed id is a no-op.
pub(crate) struct Queue {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Queue {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) async fn push(&self, text: impl Into<String>, kind: Kind) -> Uuid {
        self.push_with_expiry(text, kind, DEFAULT_EXPIRY).await
    }

    /// Appends a notification. A zero `ttl` means it never expires on its
    /// own.
    pub(crate) async fn push_with_expiry(
        &self,
        text: impl Into<String>,
        kind: Kind,
        ttl: Duration,
    ) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            created_at: Utc::now(),
        };
        let id = notification.id;

        let expiry = (ttl > Duration::ZERO).then(|| {
            let entries = Arc::clone(&self.entries);
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                remove(&entries, id).await;
            })
            .abort_handle()
        });

        self.entries.lock().await.push(Entry {
            notification,
            expiry,
        });
        id
    }

    /// Removes one notification by id. Removing an id that is already gone
    /// (dismissed by hand or expired) does nothing.
    pub(crate) async fn dismiss(&self, id: Uuid) {
        remove(&self.entries, id).await;
    }

    pub(crate) async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        for entry in entries.iter() {
            if let Some(expiry) = &entry.expiry {
                expiry.abort();
            }
        }
        entries.clear();
    }

    pub(crate) async fn snapshot(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Takes everything currently queued, cancelling the associated timers.
    pub(crate) async fn drain(&self) -> Vec<Notification> {
        let mut entries = self.entries.lock().await;
        entries
            .drain(..)
            .map(|entry| {
                if let Some(expiry) = &entry.expiry {
                    expiry.abort();
                }
                entry.notification
            })
            .collect()
    }
}

async fn remove(entries: &Mutex<Vec<Entry>>, id: Uuid) {
    let mut entries = entries.lock().await;
    if let Some(index) = entries.iter().position(|entry| entry.notification.id == id) {
        let entry = entries.remove(index);
        if let Some(expiry) = entry.expiry {
            expiry.abort();
        }
    }
}
