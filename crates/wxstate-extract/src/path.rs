//! Key-path resolution inside a raw provider document.
//!
//! The provider's JSON is known to be inconsistent: keys go missing, objects
//! arrive wrapped in single-element lists, and scalars appear where subtrees
//! were expected. Resolution therefore never fails hard — an absent node is
//! [`Resolution::NotFound`] and a mid-path type mismatch is
//! [`Resolution::WrongShape`], so the coercion stage can treat the two
//! differently.

use serde_json::Value;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A mapping key.
    Key(String),
    /// A sequence index.
    Index(usize),
}

/// A parsed dotted path such as `observations.0.imperial.temp`.
///
/// All-digit segments are indices; everything else is a key. An empty path
/// resolves to the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .map_or_else(|_| Segment::Key(s.to_string()), Segment::Index)
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match seg {
                Segment::Key(k) => write!(f, "{k}")?,
                Segment::Index(n) => write!(f, "{n}")?,
            }
        }
        Ok(())
    }
}

/// Outcome of resolving a path against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Value),
    /// The path walks off the document: an absent key or an out-of-range
    /// index.
    NotFound,
    /// The path hits a node of the wrong kind: a key applied to a scalar, or
    /// an index applied to a non-sequence.
    WrongShape,
}

/// Walks `path` through `doc`.
///
/// A key applied to a sequence scans the sequence's mapping elements for that
/// key and takes the first hit — the provider sometimes wraps an object in a
/// single-element list.
#[must_use]
pub fn resolve<'a>(doc: &'a Value, path: &KeyPath) -> Resolution<'a> {
    let mut current = doc;
    for segment in path.segments() {
        match segment {
            Segment::Key(key) => match current {
                Value::Object(map) => match map.get(key) {
                    Some(next) => current = next,
                    None => return Resolution::NotFound,
                },
                Value::Array(items) => {
                    let hit = items
                        .iter()
                        .find_map(|item| item.as_object().and_then(|m| m.get(key)));
                    match hit {
                        Some(next) => current = next,
                        None => return Resolution::NotFound,
                    }
                }
                _ => return Resolution::WrongShape,
            },
            Segment::Index(idx) => match current {
                Value::Array(items) => match items.get(*idx) {
                    Some(next) => current = next,
                    None => return Resolution::NotFound,
                },
                _ => return Resolution::WrongShape,
            },
        }
    }
    Resolution::Found(current)
}
