//! Error types for the treehunt core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

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
            #[must_use]
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
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while building forests, binding hunters, or running
/// benchmarks.
///
/// A hunter giving up is *not* an error: it is reported as
/// [`crate::Shot::GiveUp`] and recorded as a failed trial.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HuntError {
    /// Forests and degree sequences need at least two trees.
    #[error("a forest needs at least 2 trees (got {got})")]
    TooFewTrees {
        /// The rejected tree count.
        got: usize,
    },
    /// A degree sequence contained an entry outside `1..trees`.
    #[error("degree {degree} at position {position} is outside 1..{trees}")]
    InvalidDegree {
        /// Offending position in the sequence.
        position: usize,
        /// The rejected degree.
        degree: usize,
        /// Number of trees the sequence describes.
        trees: usize,
    },
    /// No graphic degree sequence was drawn within the draw budget.
    #[error("no graphic degree sequence for {trees} trees after {draws} draws")]
    SequenceExhausted {
        /// Number of trees requested.
        trees: usize,
        /// Number of sequences drawn before giving up.
        draws: usize,
    },
    /// No forest without isolated trees was built within the attempt budget.
    #[error("failed to generate a forest with {trees} trees after {attempts} attempts")]
    GenerationExhausted {
        /// Number of trees requested.
        trees: usize,
        /// Number of full generation attempts made.
        attempts: usize,
    },
    /// A tree index fell outside the forest.
    #[error("tree {tree} is out of range for a forest of {trees} trees")]
    TreeOutOfRange {
        /// The offending tree index.
        tree: usize,
        /// Number of trees in the forest.
        trees: usize,
    },
    /// An edge joined a tree to itself.
    #[error("edge ({tree}, {tree}) is a self-loop")]
    SelfLoop {
        /// Tree at both ends of the edge.
        tree: usize,
    },
    /// The same undirected edge was supplied twice.
    #[error("edge ({left}, {right}) appears more than once")]
    DuplicateEdge {
        /// Smaller endpoint.
        left: usize,
        /// Larger endpoint.
        right: usize,
    },
    /// A tree ended up with no neighbours.
    #[error("tree {tree} has no neighbours")]
    IsolatedTree {
        /// The isolated tree.
        tree: usize,
    },
    /// The forest is too large for a bitmask representation.
    #[error("forest has {trees} trees but the bitmask limit is {limit}")]
    TooManyTrees {
        /// Number of trees in the forest.
        trees: usize,
        /// Largest supported tree count.
        limit: usize,
    },
    /// A hunter was bound to a forest that has not been generated.
    #[error("cannot bind a hunter to an empty forest")]
    EmptyForest,
    /// A hunter was restarted or asked to shoot before being bound.
    #[error("hunter `{hunter}` has not been bound to a forest")]
    Unbound {
        /// Name of the offending hunter.
        hunter: &'static str,
    },
    /// A configuration value was rejected.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the rejected value.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`HuntError`] variants.
    enum HuntErrorCode for HuntError {
        /// Forests and degree sequences need at least two trees.
        TooFewTrees => TooFewTrees { .. } => "HUNT_TOO_FEW_TREES",
        /// A degree sequence contained an entry outside `1..trees`.
        InvalidDegree => InvalidDegree { .. } => "HUNT_INVALID_DEGREE",
        /// No graphic degree sequence was drawn within the draw budget.
        SequenceExhausted => SequenceExhausted { .. } => "HUNT_SEQUENCE_EXHAUSTED",
        /// No valid forest was built within the attempt budget.
        GenerationExhausted => GenerationExhausted { .. } => "HUNT_GENERATION_EXHAUSTED",
        /// A tree index fell outside the forest.
        TreeOutOfRange => TreeOutOfRange { .. } => "HUNT_TREE_OUT_OF_RANGE",
        /// An edge joined a tree to itself.
        SelfLoop => SelfLoop { .. } => "HUNT_SELF_LOOP",
        /// The same undirected edge was supplied twice.
        DuplicateEdge => DuplicateEdge { .. } => "HUNT_DUPLICATE_EDGE",
        /// A tree ended up with no neighbours.
        IsolatedTree => IsolatedTree { .. } => "HUNT_ISOLATED_TREE",
        /// The forest is too large for a bitmask representation.
        TooManyTrees => TooManyTrees { .. } => "HUNT_TOO_MANY_TREES",
        /// A hunter was bound to an empty forest.
        EmptyForest => EmptyForest => "HUNT_EMPTY_FOREST",
        /// A hunter was used before being bound.
        Unbound => Unbound { .. } => "HUNT_UNBOUND",
        /// A configuration value was rejected.
        InvalidConfig => InvalidConfig { .. } => "HUNT_INVALID_CONFIG",
    }
}

impl HuntError {
    /// Returns `true` for errors caused by misuse of the API rather than by
    /// an unlucky random draw.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::HuntError;
    ///
    /// assert!(HuntError::Unbound { hunter: "tracker" }.is_precondition());
    /// assert!(!HuntError::GenerationExhausted { trees: 6, attempts: 3 }.is_precondition());
    /// ```
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyForest | Self::Unbound { .. } | Self::TreeOutOfRange { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HuntError>;
