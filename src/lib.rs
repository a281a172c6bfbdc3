// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod persistence;
pub mod selection;

pub use crate::config::EngineConfig;
pub use crate::core::dictionary::Dictionary;
pub use crate::core::engine::{EngineView, WordEngine};
pub use crate::core::grid::{make_grid, Grid, GridCaps};
pub use crate::core::sentence::Sentence;
pub use crate::core::speller::Speller;
pub use crate::core::types::{Cell, DisplayMode, LetterOrder};
pub use crate::error::{SelectionError, SpellerError};
pub use crate::selection::{PointCursor, SelectionMethod};
