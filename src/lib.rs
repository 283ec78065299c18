pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::cli::LocalStorage;

pub use core::filter::{dedup_by_name, filter_catalog, lens_matches, FilterContext, SortKey};
pub use core::{engine::MatchEngine, pipeline::MatchPipeline};
pub use domain::model::{
    AddRange, EyePower, FrameType, LensProduct, LensType, MatchResult, PowerRange, Prescription,
};
pub use utils::error::{LensError, Result};
