//! Save/load between the graph model and file storage.
//!
//! Saving is synchronous: snapshot, encode, hand the bytes to whatever
//! download or write mechanism the host provides. Loading is split around the
//! asynchronous file read: `begin_load` admits one operation at a time,
//! `complete_load` parses, validates and commits, `abort_load` gives up. A
//! failed parse or validation never touches the current graph.

use crate::editor::{Error, Result};
use floe_core::{FlowsheetGraph, snapshot};

/// Marks saved documents apart from generic JSON files.
pub const FILE_EXTENSION: &str = "floe.vis";

/// A snapshot encoded and named, ready to offer to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoadPhase {
    #[default]
    Idle,
    AwaitingFileRead,
}

/// Proof that a load was admitted. Must be redeemed through `complete_load`
/// or `abort_load`; it cannot be duplicated, so two loads cannot commit
/// against one admission.
#[derive(Debug)]
pub struct LoadTicket {
    _admitted: (),
}

#[derive(Debug, Default)]
pub struct FileAdapter {
    phase: LoadPhase,
}

impl FileAdapter {
    pub fn save(&self, title: &str, graph: &FlowsheetGraph) -> Result<SaveFile> {
        let bytes = snapshot::encode(&graph.to_snapshot())?;
        let file_name = format!("{}.{FILE_EXTENSION}", file_stem(title));
        tracing::debug!(file = %file_name, bytes = bytes.len(), "flowsheet saved");
        Ok(SaveFile { file_name, bytes })
    }

    /// Admits a load operation, or rejects it while another is still awaiting
    /// its file read. One file operation runs to completion at a time; two
    /// reads can never interleave their commits.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        match self.phase {
            LoadPhase::Idle => {
                self.phase = LoadPhase::AwaitingFileRead;
                tracing::debug!("load admitted, awaiting file read");
                Ok(LoadTicket { _admitted: () })
            }
            LoadPhase::AwaitingFileRead => Err(Error::LoadInProgress),
        }
    }

    /// Parses and validates `bytes`, then commits them over `graph`
    /// wholesale. On any error the graph keeps its pre-load state and the
    /// adapter returns to idle; the user re-initiates, there is no retry.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: &[u8],
        graph: &mut FlowsheetGraph,
    ) -> Result<()> {
        drop(ticket);
        self.phase = LoadPhase::Idle;
        let snapshot = snapshot::parse(bytes)?;
        graph.from_snapshot(&snapshot)?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "flowsheet loaded"
        );
        Ok(())
    }

    /// Gives up an admitted load whose file read failed or was cancelled.
    pub fn abort_load(&mut self, ticket: LoadTicket) {
        drop(ticket);
        self.phase = LoadPhase::Idle;
        tracing::debug!("load aborted before its file read completed");
    }

    pub fn load_pending(&self) -> bool {
        self.phase == LoadPhase::AwaitingFileRead
    }
}

/// Conservative file-name stem: whitespace and path-hostile characters
/// collapse to `-`.
fn file_stem(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() {
        return "flowsheet".to_string();
    }
    out.to_string()
}
