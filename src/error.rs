//! Errors reported by the graph containers.

use crate::property::PropertyError;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// What kind of element an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Atom,
    Bond,
    Component,
}
impl ElementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Bond => "bond",
            Self::Component => "component",
        }
    }
}
impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("{kind} index {index} is out of range (length is {len})")]
    IndexOutOfRange {
        kind: ElementKind,
        index: usize,
        len: usize,
    },
    #[error("{kind} cursor at {position} is not dereferenceable here (length is {len})")]
    InvalidCursor {
        kind: ElementKind,
        position: usize,
        len: usize,
    },
    #[error("{0} is not part of this container")]
    NotFound(ElementKind),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}
