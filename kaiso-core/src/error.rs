//! Error types for the kaiso core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors produced by [`crate::HnswGraph`] and its neighbour lists.
///
/// A full neighbour list is not an error: [`crate::NeighbourList::add_if_absent`]
/// reports it by returning `false`.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A constructor received a parameter outside its valid domain.
    #[error("invalid graph parameter: {reason}")]
    InvalidParameters {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
    /// A node identifier lies outside the allocated node capacity.
    #[error("node {node} is outside the allocated capacity {capacity}")]
    NodeOutOfRange {
        /// The requested node identifier.
        node: usize,
        /// Node capacity at the time of the request.
        capacity: usize,
    },
    /// A level index lies outside the allocated level count.
    #[error("level {level} is outside the allocated level count {level_count}")]
    LevelOutOfRange {
        /// The requested level.
        level: usize,
        /// Level count at the time of the request.
        level_count: usize,
    },
    /// A node was assigned a top level more than once.
    #[error("node {node} already has top level {level}")]
    LevelAlreadyAssigned {
        /// Node whose level was already recorded.
        node: usize,
        /// Level recorded for the node.
        level: usize,
    },
    /// A lock guarding shared graph state was poisoned by a panicking writer.
    #[error("lock poisoned: {resource}")]
    LockPoisoned {
        /// Name of the guarded resource.
        resource: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A constructor received a parameter outside its valid domain.
        InvalidParameters => InvalidParameters { .. } => "INVALID_PARAMETERS",
        /// A node identifier lies outside the allocated node capacity.
        NodeOutOfRange => NodeOutOfRange { .. } => "NODE_OUT_OF_RANGE",
        /// A level index lies outside the allocated level count.
        LevelOutOfRange => LevelOutOfRange { .. } => "LEVEL_OUT_OF_RANGE",
        /// A node was assigned a top level more than once.
        LevelAlreadyAssigned => LevelAlreadyAssigned { .. } => "LEVEL_ALREADY_ASSIGNED",
        /// A lock guarding shared graph state was poisoned.
        LockPoisoned => LockPoisoned { .. } => "LOCK_POISONED",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
