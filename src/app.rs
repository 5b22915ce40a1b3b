// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use crate::{analysis, gateway::Gateway, notify, password, session};

/// Everything a command needs, constructed once per invocation and handed
/// around by reference. Dependencies between the parts are explicit: the
/// orchestrator holds the session store it consults, and nothing reaches
/// for ambient state.
pub(crate) struct App<G> {
    pub(crate) session: Arc<session::Store<G>>,
    pub(crate) analysis: Arc<analysis::Orchestrator<G>>,
    pub(crate) notices: notify::Queue,
    pub(crate) prompt: Arc<Vec<Box<dyn password::Prompt>>>,
}

impl<G: Gateway + 'static> App<G> {
    /// Copies an operation's settled outcome from the status registry into
    /// the notification queue, error first; at most one of the two is set.
    pub(crate) async fn report(&self, op: analysis::Operation) {
        let status = self.analysis.status(op).await;
        if let Some(error) = status.error {
            let _ = self.notices.push(error, notify::Kind::Error).await;
        } else if let Some(message) = status.message {
            let _ = self.notices.push(message, notify::Kind::Success).await;
        }
    }

    /// Renders and empties the notification queue: errors and warnings to
    /// stderr, everything else to stdout, in insertion order.
    pub(crate) async fn flush_notices(&self) {
        for notice in self.notices.drain().await {
            match notice.kind {
                notify::Kind::Error | notify::Kind::Warning => {
                    eprintln!("{}: {}", notice.kind, notice.text);
                }
                notify::Kind::Success | notify::Kind::Info => println!("{}", notice.text),
            }
        }
    }
}
