//! Graph description parser
//!
//! ```text
//! <vertices> <edges> <U|D>
//! <from> <to> <weight>      repeated <edges> times
//! [<source>]
//! ```
//!
//! Vertices are given by label (`A`, `B`, ... `AA`), decoded with the run's
//! [`LabelCodec`]. Blank lines are ignored everywhere.

use thiserror::Error;
use waypoint_core::data_structures::LabelError;
use waypoint_core::prelude::*;

/// Errors raised while reading a graph description; `line` is 1-based
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input is empty")]
    Empty,

    #[error("line {line}: malformed header: {reason}")]
    Header { line: usize, reason: String },

    #[error("line {line}: edge class must be U or D, found {found:?}")]
    EdgeClass { line: usize, found: String },

    #[error("expected {expected} edges but input ends after {found}")]
    MissingEdges { expected: usize, found: usize },

    #[error("line {line}: malformed edge: {reason}")]
    Edge { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Label {
        line: usize,
        #[source]
        source: LabelError,
    },

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: AlgorithmError,
    },

    #[error("line {line}: unexpected trailing input {found:?}")]
    Trailing { line: usize, found: String },
}

/// Graph description as read from input
#[derive(Debug)]
pub struct ParsedInput {
    pub graph: Graph,
    pub edge_class: EdgeClass,
    pub source: Option<NodeId>,
}

/// Decodes `label` and checks it addresses one of `vertex_count` vertices
pub fn resolve_vertex(
    codec: &LabelCodec,
    label: &str,
    vertex_count: usize,
    line: usize,
) -> Result<NodeId, InputError> {
    let node = codec
        .decode(label)
        .map_err(|source| InputError::Label { line, source })?;
    if node.0 >= vertex_count {
        return Err(InputError::Graph {
            line,
            source: AlgorithmError::InvalidNode { node, vertex_count },
        });
    }
    Ok(node)
}

fn parse_edge_class(token: &str, line: usize) -> Result<EdgeClass, InputError> {
    match token {
        "U" | "u" => Ok(EdgeClass::Undirected),
        "D" | "d" => Ok(EdgeClass::Directed),
        other => Err(InputError::EdgeClass {
            line,
            found: other.to_string(),
        }),
    }
}

fn parse_count(token: Option<&str>, what: &str, line: usize) -> Result<usize, InputError> {
    let token = token.ok_or_else(|| InputError::Header {
        line,
        reason: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| InputError::Header {
        line,
        reason: format!("{what} {token:?} is not a non-negative integer"),
    })
}

pub fn parse_input(text: &str, codec: &LabelCodec) -> Result<ParsedInput, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines.next().ok_or(InputError::Empty)?;
    let mut tokens = header.split_whitespace();
    let vertex_count = parse_count(tokens.next(), "vertex count", line)?;
    let edge_count = parse_count(tokens.next(), "edge count", line)?;
    let edge_class = match tokens.next() {
        Some(token) => parse_edge_class(token, line)?,
        None => {
            return Err(InputError::Header {
                line,
                reason: "missing edge class".into(),
            })
        }
    };
    if let Some(extra) = tokens.next() {
        return Err(InputError::Trailing {
            line,
            found: extra.to_string(),
        });
    }
    if vertex_count == 0 {
        return Err(InputError::Header {
            line,
            reason: "graph needs at least one vertex".into(),
        });
    }

    let mut graph = Graph::new(vertex_count);
    for found in 0..edge_count {
        let (line, text) = lines.next().ok_or(InputError::MissingEdges {
            expected: edge_count,
            found,
        })?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [from, to, weight] = fields[..] else {
            return Err(InputError::Edge {
                line,
                reason: format!("expected `<from> <to> <weight>`, found {} fields", fields.len()),
            });
        };

        let from = resolve_vertex(codec, from, vertex_count, line)?;
        let to = resolve_vertex(codec, to, vertex_count, line)?;
        let weight: Weight = weight.parse().map_err(|_| InputError::Edge {
            line,
            reason: format!("weight {weight:?} is not an integer"),
        })?;
        graph
            .add_edge(from, to, weight, edge_class)
            .map_err(|source| InputError::Graph { line, source })?;
    }

    let source = match lines.next() {
        Some((line, text)) => {
            let mut tokens = text.split_whitespace();
            let label = tokens.next().unwrap_or_default();
            if let Some(extra) = tokens.next() {
                return Err(InputError::Trailing {
                    line,
                    found: extra.to_string(),
                });
            }
            Some(resolve_vertex(codec, label, vertex_count, line)?)
        }
        None => None,
    };
    if let Some((line, text)) = lines.next() {
        return Err(InputError::Trailing {
            line,
            found: text.to_string(),
        });
    }

    Ok(ParsedInput {
        graph,
        edge_class,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ParsedInput, InputError> {
        parse_input(text, &LabelCodec::default())
    }

    #[test]
    fn test_parse_undirected_with_source() {
        let parsed = parse("4 4 U\nA B 1\nB C 2\nA C 4\nC D 1\nB\n").unwrap();
        assert_eq!(parsed.edge_class, EdgeClass::Undirected);
        assert_eq!(parsed.graph.vertex_count(), 4);
        assert_eq!(parsed.graph.edge_count(EdgeClass::Undirected), 4);
        assert_eq!(parsed.source, Some(NodeId(1)));
    }

    #[test]
    fn test_parse_directed_without_source() {
        let parsed = parse("3 2 D\nA B 5\nB C 3\n\n").unwrap();
        assert_eq!(parsed.edge_class, EdgeClass::Directed);
        assert_eq!(parsed.graph.edge_count(EdgeClass::Directed), 2);
        assert_eq!(parsed.source, None);
    }

    #[test]
    fn test_negative_weight_accepted() {
        let parsed = parse("2 1 D\nA B -4\nA").unwrap();
        assert!(parsed.graph.has_negative_weights(EdgeClass::Directed));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse("  \n\n"), Err(InputError::Empty)));
    }

    #[test]
    fn test_bad_edge_class() {
        assert!(matches!(
            parse("2 1 X\nA B 1"),
            Err(InputError::EdgeClass { line: 1, .. })
        ));
    }

    #[test]
    fn test_zero_vertices_rejected() {
        assert!(matches!(parse("0 0 U"), Err(InputError::Header { line: 1, .. })));
    }

    #[test]
    fn test_missing_edges() {
        assert!(matches!(
            parse("3 3 U\nA B 1\nB C 1"),
            Err(InputError::MissingEdges { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_edge_line_numbers_skip_blank_lines() {
        let err = parse("3 2 U\n\nA B 1\nB C x\n").unwrap_err();
        assert!(matches!(err, InputError::Edge { line: 4, .. }));
        assert!(err.to_string().starts_with("line 4:"));
    }

    #[test]
    fn test_vertex_out_of_range() {
        assert!(matches!(
            parse("2 1 U\nA C 1"),
            Err(InputError::Graph { line: 2, .. })
        ));
    }

    #[test]
    fn test_weight_sum_overflow_reported_with_line() {
        let err = parse("3 2 U\nA B 5000000000000000000\nB C 5000000000000000000\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::Graph {
                line: 3,
                source: AlgorithmError::InvalidGraph(_)
            }
        ));
    }

    #[test]
    fn test_unknown_label_character() {
        assert!(matches!(
            parse("2 1 U\nA b 1"),
            Err(InputError::Label { line: 2, .. })
        ));
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert!(matches!(
            parse("2 1 U\nA B 1\nA\nB"),
            Err(InputError::Trailing { line: 4, .. })
        ));
    }

    #[test]
    fn test_multi_letter_labels() {
        let parsed = parse("28 1 U\nA AB 2\nAB\n").unwrap();
        assert_eq!(parsed.source, Some(NodeId(27)));
    }
}
