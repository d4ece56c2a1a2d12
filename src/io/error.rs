//! Error types and context management for tiling generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TilingError {
    /// A rule table has no production for the tile's prototype
    UnknownPrototype {
        /// Prototype name of the offending tile
        prototype: &'static str,
        /// Name of the rule table that was consulted
        table: String,
    },

    /// A tile was built with the wrong number of vertices for its prototype
    VertexCount {
        /// Prototype name of the offending tile
        prototype: &'static str,
        /// Vertex count fixed by the prototype
        expected: usize,
        /// Vertex count actually supplied
        found: usize,
    },

    /// A tile vertex is not a finite coordinate
    ///
    /// Exact fields report overflow this way.
    NonFiniteVertex {
        /// Prototype name of the offending tile
        prototype: &'static str,
        /// Position of the vertex within the tile
        index: usize,
    },

    /// Circle pair has no well-defined intersection
    DegenerateCircles {
        /// First anchor (x, y)
        anchor_a: (f64, f64),
        /// Second anchor (x, y)
        anchor_b: (f64, f64),
        /// What makes the pair degenerate
        reason: &'static str,
    },

    /// Circles are too far apart or nested
    NoIntersection {
        /// First anchor (x, y)
        anchor_a: (f64, f64),
        /// Radius around the first anchor
        radius_a: f64,
        /// Second anchor (x, y)
        anchor_b: (f64, f64),
        /// Radius around the second anchor
        radius_b: f64,
    },

    /// A square root has no representation in the coordinate field
    InexactRoot {
        /// Name of the computation that needed the root
        operation: &'static str,
        /// The radicand, rendered as text
        value: String,
    },

    /// No circle intersection satisfies the selection constraint
    NoSolution {
        /// First anchor (x, y)
        anchor_a: (f64, f64),
        /// Radius around the first anchor
        radius_a: f64,
        /// Second anchor (x, y)
        anchor_b: (f64, f64),
        /// Radius around the second anchor
        radius_b: f64,
        /// Human-readable form of the constraint
        constraint: String,
        /// Every candidate that was rejected
        candidates: Vec<(f64, f64)>,
    },

    /// A generation or statistic would exceed its configured budget
    ResourceExhausted {
        /// Generation that was being built or analysed
        step: usize,
        /// What ran out, such as tiles or pair distances
        resource: &'static str,
        /// Items needed
        requested: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Requested tiling is not in the catalog
    UnknownTiling {
        /// Name that failed to resolve
        name: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Plot-range file could not be parsed
    Config {
        /// Path of the configuration file
        path: PathBuf,
        /// 1-based line number of the bad line
        line: usize,
        /// What is wrong with the line
        reason: String,
    },

    /// Plot-range file has no entry for a tiling and statistic
    MissingRange {
        /// Tiling name that was looked up
        tiling: String,
        /// Statistic key that was looked up
        statistic: &'static str,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPrototype { prototype, table } => {
                write!(f, "Rule table '{table}' has no production for prototype {prototype}")
            }
            Self::VertexCount {
                prototype,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Prototype {prototype} takes {expected} vertices but {found} were given"
                )
            }
            Self::NonFiniteVertex { prototype, index } => {
                write!(f, "Vertex {index} of a {prototype} tile is not finite")
            }
            Self::DegenerateCircles {
                anchor_a,
                anchor_b,
                reason,
            } => {
                write!(
                    f,
                    "Degenerate circle pair at ({}, {}) and ({}, {}): {reason}",
                    anchor_a.0, anchor_a.1, anchor_b.0, anchor_b.1
                )
            }
            Self::NoIntersection {
                anchor_a,
                radius_a,
                anchor_b,
                radius_b,
            } => {
                write!(
                    f,
                    "Circles ({}, {}) r={radius_a} and ({}, {}) r={radius_b} do not intersect",
                    anchor_a.0, anchor_a.1, anchor_b.0, anchor_b.1
                )
            }
            Self::InexactRoot { operation, value } => {
                write!(f, "No exact square root of {value} in {operation}")
            }
            Self::NoSolution {
                anchor_a,
                radius_a,
                anchor_b,
                radius_b,
                constraint,
                candidates,
            } => {
                write!(
                    f,
                    "No intersection of circles ({}, {}) r={radius_a} and ({}, {}) r={radius_b} \
                     satisfies {constraint} (candidates: {candidates:?})",
                    anchor_a.0, anchor_a.1, anchor_b.0, anchor_b.1
                )
            }
            Self::ResourceExhausted {
                step,
                resource,
                requested,
                limit,
            } => {
                write!(
                    f,
                    "Generation {step} needs {requested} {resource}, exceeding the limit of {limit}"
                )
            }
            Self::UnknownTiling { name } => {
                write!(f, "Unknown tiling '{name}'")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Config { path, line, reason } => {
                write!(f, "{}:{line}: {reason}", path.display())
            }
            Self::MissingRange { tiling, statistic } => {
                write!(f, "No plot range for tiling '{tiling}' and statistic {statistic}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Generation being built or analysed when the error occurred
    pub step: Option<usize>,
}

/// Enriches error messages with engine state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the generation step
    ///
    /// # Errors
    ///
    /// Propagates the original error with the step applied
    fn at_step(self, step: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<TilingError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let (TilingError::ResourceExhausted { step, .. }, Some(s)) =
                (&mut error, context.step)
            {
                *step = s;
            }
            error
        })
    }

    fn at_step(self, step: usize) -> Result<T> {
        self.with_context(ErrorContext { step: Some(step) })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> TilingError {
    TilingError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
