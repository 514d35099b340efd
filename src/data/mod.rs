//! Data layer: run naming, file discovery, and series loading.
//!
//! Architecture:
//! ```text
//!   RunId + SeriesKind
//!        │  file_name()
//!        ▼
//!   ┌──────────────┐
//!   │ PathResolver  │  ./name  →  ./data/name  →  None
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ SeriesLoader  │  two-column text → Option<Series>
//!   └──────────────┘
//! ```

pub mod loader;
pub mod model;
pub mod resolver;
pub mod storage;
