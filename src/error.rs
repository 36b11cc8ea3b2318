use core::fmt;

/// Result alias for `hierel`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by hierarchy construction and relation algebra.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Boolean matrices of different sizes were combined.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Shape mismatch (string description).
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// An edge connects a node to itself.
    SelfLoop {
        /// Debug rendering of the node.
        node: String,
    },

    /// A node was reached from more than one parent while orienting from the root.
    MultipleParents {
        /// Debug rendering of the node.
        node: String,
        /// Parent that claimed the node first.
        first: String,
        /// Parent that reached it again.
        second: String,
    },

    /// Nodes named by the edges cannot be reached from the root.
    UnreachableNodes {
        /// How many nodes are unreachable.
        count: usize,
        /// Debug rendering of the first few.
        sample: String,
    },

    /// An edge line could not be split into two identifiers.
    MalformedEdge {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl Error {
    /// True for errors meaning the edges do not form a tree under the root.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::SelfLoop { .. } | Error::MultipleParents { .. } | Error::UnreachableNodes { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::SelfLoop { node } => write!(f, "edge connects {node} to itself"),
            Error::MultipleParents {
                node,
                first,
                second,
            } => {
                write!(f, "{node} has more than one parent ({first} and {second})")
            }
            Error::UnreachableNodes { count, sample } => {
                write!(f, "{count} nodes not reachable from root (first few: {sample})")
            }
            Error::MalformedEdge { line, content } => {
                write!(f, "malformed edge on line {line}: {content:?}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
