//! Input parsing and validation
//!
//! Every structure the visualizer runs on is built here, from plain text:
//! comma-separated values for arrays and tree keys, comma-separated names
//! for graph nodes, and `(A,B)` / `(A,B,2.5)` tuples for edges. All
//! validation happens before any trace is generated, so the algorithm
//! layer can assume well-formed structures.

use crate::bst::Bst;
use crate::graph::Graph;
use rustc_hash::FxHashSet;
use std::error::Error;
use std::fmt;

/// Errors produced while parsing user input into structures.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input contained no usable tokens.
    EmptyInput,
    /// A token could not be read as an integer.
    InvalidNumber { token: String },
    /// An edge weight could not be read as a number.
    InvalidWeight { token: String },
    /// A node name appeared more than once.
    DuplicateNode { name: String },
    /// An edge referenced a node that was never declared.
    UnknownNode { name: String },
    /// An edge tuple was not of the form `(A,B)` or `(A,B,w)`.
    MalformedEdge { token: String },
    /// A graph was declared with nodes but no edges.
    NoEdges,
    /// The start node for a traversal was not declared.
    UnknownStartNode { name: String },
    /// A tree key appeared more than once.
    DuplicateKey { key: i64 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "input is empty"),
            ParseError::InvalidNumber { token } => {
                write!(f, "'{}' is not a valid integer", token)
            }
            ParseError::InvalidWeight { token } => {
                write!(f, "'{}' is not a valid edge weight", token)
            }
            ParseError::DuplicateNode { name } => {
                write!(f, "node '{}' is declared more than once", name)
            }
            ParseError::UnknownNode { name } => {
                write!(f, "edge references undeclared node '{}'", name)
            }
            ParseError::MalformedEdge { token } => {
                write!(f, "'{}' is not an edge of the form (A,B) or (A,B,w)", token)
            }
            ParseError::NoEdges => write!(f, "graph has no edges"),
            ParseError::UnknownStartNode { name } => {
                write!(f, "start node '{}' is not in the graph", name)
            }
            ParseError::DuplicateKey { key } => {
                write!(f, "key {} appears more than once", key)
            }
        }
    }
}

impl Error for ParseError {}

/// Parse a comma-separated list of integers, e.g. `"5, 3, 8"`.
pub fn parse_values(text: &str) -> Result<Vec<i64>, ParseError> {
    let mut values = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = token
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidNumber { token: token.to_string() })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(values)
}

/// Parse comma-separated tree keys, rejecting duplicates.
pub fn parse_keys(text: &str) -> Result<Vec<i64>, ParseError> {
    let values = parse_values(text)?;
    let mut seen = FxHashSet::default();
    for &key in &values {
        if !seen.insert(key) {
            return Err(ParseError::DuplicateKey { key });
        }
    }
    Ok(values)
}

/// Parse comma-separated node names, rejecting duplicates.
pub fn parse_nodes(text: &str) -> Result<Vec<String>, ParseError> {
    let mut names = Vec::new();
    let mut seen = FxHashSet::default();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if !seen.insert(token.to_string()) {
            return Err(ParseError::DuplicateNode { name: token.to_string() });
        }
        names.push(token.to_string());
    }
    if names.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(names)
}

/// One parsed edge tuple, by node name. Weight defaults to 1 when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Parse a list of edge tuples like `(A,B) (B,C,2.5)`. Tuples may be
/// separated by whitespace or commas.
pub fn parse_edges(text: &str) -> Result<Vec<EdgeSpec>, ParseError> {
    let mut edges = Vec::new();
    let mut rest = text;
    loop {
        let open = match rest.find('(') {
            Some(i) => i,
            None => break,
        };
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| ParseError::MalformedEdge { token: rest[open..].trim().to_string() })?;
        let inner = &rest[open + 1..close];
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let spec = match parts.as_slice() {
            [from, to] if !from.is_empty() && !to.is_empty() => EdgeSpec {
                from: from.to_string(),
                to: to.to_string(),
                weight: 1.0,
            },
            [from, to, w] if !from.is_empty() && !to.is_empty() => {
                let weight = w
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidWeight { token: w.to_string() })?;
                EdgeSpec { from: from.to_string(), to: to.to_string(), weight }
            }
            _ => {
                return Err(ParseError::MalformedEdge {
                    token: rest[open..=close].to_string(),
                })
            }
        };
        edges.push(spec);
        rest = &rest[close + 1..];
    }
    if edges.is_empty() {
        return Err(ParseError::NoEdges);
    }
    Ok(edges)
}

/// Build a graph from parsed node names and edge tuples, validating that
/// every edge endpoint was declared.
pub fn build_graph(
    names: Vec<String>,
    edges: Vec<EdgeSpec>,
    directed: bool,
    weighted: bool,
) -> Result<Graph, ParseError> {
    let mut graph = Graph::new(names, directed, weighted);
    for spec in edges {
        let from = graph
            .node(&spec.from)
            .ok_or_else(|| ParseError::UnknownNode { name: spec.from.clone() })?;
        let to = graph
            .node(&spec.to)
            .ok_or_else(|| ParseError::UnknownNode { name: spec.to.clone() })?;
        graph.add_edge(from, to, spec.weight);
    }
    Ok(graph)
}

/// Build a search tree from unique keys, inserting them in input order.
pub fn build_bst(keys: &[i64]) -> Result<Bst, ParseError> {
    Bst::from_keys(keys).map_err(|key| ParseError::DuplicateKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_with_whitespace() {
        assert_eq!(parse_values(" 5, 3 ,8,").unwrap(), vec![5, 3, 8]);
    }

    #[test]
    fn rejects_bad_number() {
        assert_eq!(
            parse_values("1, two, 3"),
            Err(ParseError::InvalidNumber { token: "two".to_string() })
        );
        assert_eq!(parse_values("  ,  "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn parses_edges_with_and_without_weights() {
        let edges = parse_edges("(A,B) (B,C,2.5)").unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].weight, 1.0);
        assert_eq!(edges[1].weight, 2.5);
        assert_eq!(edges[1].from, "B");
    }

    #[test]
    fn rejects_malformed_edges() {
        assert!(matches!(parse_edges("(A)"), Err(ParseError::MalformedEdge { .. })));
        assert!(matches!(parse_edges("(A,B"), Err(ParseError::MalformedEdge { .. })));
        assert_eq!(parse_edges("no tuples here"), Err(ParseError::NoEdges));
    }

    #[test]
    fn build_graph_rejects_unknown_endpoint() {
        let names = parse_nodes("A,B").unwrap();
        let edges = parse_edges("(A,C)").unwrap();
        assert_eq!(
            build_graph(names, edges, false, false).unwrap_err(),
            ParseError::UnknownNode { name: "C".to_string() }
        );
    }

    #[test]
    fn duplicate_nodes_and_keys_rejected() {
        assert!(matches!(
            parse_nodes("A,B,A"),
            Err(ParseError::DuplicateNode { .. })
        ));
        assert_eq!(
            parse_keys("3,5,3"),
            Err(ParseError::DuplicateKey { key: 3 })
        );
    }
}
