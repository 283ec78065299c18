pub mod compat;
pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod power;

pub use crate::domain::model::{
    EyePower, FrameType, LensProduct, LensType, MatchResult, PowerRange, Prescription,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
