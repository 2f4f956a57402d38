pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate node id: {id}")]
    DuplicateId { id: String },

    #[error("unknown node id: {id}")]
    UnknownNode { id: String },

    #[error("unknown edge id: {id}")]
    UnknownEdge { id: String },

    #[error("invalid flowsheet document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported flowsheet document version {found} (this reader expects {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("snapshot contains duplicate node id {id}")]
    SnapshotDuplicateNode { id: String },

    #[error("snapshot contains duplicate edge id {id}")]
    SnapshotDuplicateEdge { id: String },

    #[error("snapshot edge {edge} references missing node {node}")]
    SnapshotEdgeEndpoint { edge: String, node: String },
}
