//! Waypoint Algorithm Framework
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod state;
pub mod path_finding;
pub mod graph;

pub use self::traits::*;
pub use self::path_finding::*;
pub use self::graph::*;
