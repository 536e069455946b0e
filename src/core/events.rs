//! "Data changed" notifications.
//!
//! The record store emits a [`DataChange`] after every committed write or
//! delete. Anything that shows entries (the session cache, CLI notices)
//! subscribes and refreshes itself instead of being refreshed from outside.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DataChange {
    /// A sheet was imported in one transaction.
    Imported {
        source_file: String,
        sheet_name: String,
        rows: usize,
    },
    /// Entries were removed by id or by source.
    Deleted { rows: usize },
}

impl fmt::Display for DataChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataChange::Imported {
                source_file,
                sheet_name,
                rows,
            } => write!(f, "{rows} row(s) imported from {source_file} | {sheet_name}"),
            DataChange::Deleted { rows } => write!(f, "{rows} row(s) deleted"),
        }
    }
}

type Listener = Box<dyn FnMut(&DataChange)>;

/// Ordered list of subscribers; each one sees every event once.
#[derive(Default)]
pub struct ChangeBus {
    listeners: Vec<Listener>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&DataChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, change: &DataChange) {
        tracing::debug!(%change, "data changed");
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}
