//! Edge sources.
//!
//! The hierarchy builder only needs `(a, b)` pairs. Where they come from is up
//! to the caller: anything implementing [`EdgeSource`] can feed
//! [`HierarchyBuilder::build_from`](crate::HierarchyBuilder::build_from).
//! [`DelimitedEdges`] covers the common "one `a,b` pair per line" text form.

use crate::error::{Error, Result};

/// Something that yields undirected edges.
pub trait EdgeSource {
    /// Node identifier type.
    type Id;

    /// All edges, in source order.
    fn edges(&self) -> Result<Vec<(Self::Id, Self::Id)>>;
}

impl<N: Clone> EdgeSource for [(N, N)] {
    type Id = N;

    fn edges(&self) -> Result<Vec<(N, N)>> {
        Ok(self.to_vec())
    }
}

impl<N: Clone> EdgeSource for Vec<(N, N)> {
    type Id = N;

    fn edges(&self) -> Result<Vec<(N, N)>> {
        Ok(self.clone())
    }
}

/// Edges written one pair per line, fields separated by a delimiter.
///
/// Fields are trimmed and blank lines are skipped. A line without exactly two
/// non-empty fields is an error.
///
/// ```rust
/// use hierel::{DelimitedEdges, EdgeSource};
///
/// let edges = DelimitedEdges::new("1,2\n1,3\n").edges().unwrap();
/// assert_eq!(edges, vec![("1".to_string(), "2".to_string()), ("1".to_string(), "3".to_string())]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DelimitedEdges<'a> {
    text: &'a str,
    delimiter: char,
}

impl<'a> DelimitedEdges<'a> {
    /// Comma-delimited edges.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            delimiter: ',',
        }
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The field delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn parse_line(&self, line_no: usize, line: &str) -> Result<(String, String)> {
        let malformed = || Error::MalformedEdge {
            line: line_no,
            content: line.to_string(),
        };

        let mut fields = line.split(self.delimiter).map(str::trim);
        let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };
        if a.is_empty() || b.is_empty() {
            return Err(malformed());
        }
        Ok((a.to_string(), b.to_string()))
    }
}

impl EdgeSource for DelimitedEdges<'_> {
    type Id = String;

    fn edges(&self) -> Result<Vec<(String, String)>> {
        self.text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| self.parse_line(i + 1, line))
            .collect()
    }
}
