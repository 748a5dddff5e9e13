//! Paths to leaf errors inside a nested [`Errors`](crate::Errors) aggregate.
//!
//! A schema reports failures keyed by field name, and a slice binding nests
//! its per-element failures under decimal indexes. [`FieldPath`] joins those
//! keys into a single location such as `favourite_numbers[3]`.

use std::fmt::{self, Display};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (e.g. `email`).
    Field(String),
    /// A sequence element (e.g. `[3]`).
    Index(usize),
}

/// The location of an error within an aggregate.
///
/// # Example
///
/// ```rust
/// use vetting::FieldPath;
///
/// let path = FieldPath::from_field("favourite_numbers").push_index(3);
/// assert_eq!(path.to_string(), "favourite_numbers[3]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path holding a single field.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the outermost field inward.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None for the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
