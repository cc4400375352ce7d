//! Graph storage, frontier and vertex labels

pub mod graph;
pub mod labels;
pub mod priority_queue;

pub use self::graph::{Adjacency, Distance, Edge, EdgeClass, Graph, Weight, MAX_TOTAL_WEIGHT};
pub use self::labels::{LabelCodec, LabelConfig, LabelError};
pub use self::priority_queue::{Frontier, FrontierEntry};
