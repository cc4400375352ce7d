//! Shortest-path search and path reconstruction
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dijkstra;
pub mod reconstruct;

pub use self::dijkstra::{CertificateError, Dijkstra, PathEntry, ShortestPathTree};
pub use self::reconstruct::{reconstruct_path, PathReconstructor};
