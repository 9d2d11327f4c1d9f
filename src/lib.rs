#![doc = include_str!("../README.md")]


mod bounds;
pub use bounds::{map_to_bounded, map_to_unconstrained, UNBOUNDED};

mod error;
pub use error::FitModelError;

pub mod models;
pub use models::{
    BasicModel, DistributionModel, GrowthModel, ModelCategory, ModelDescriptor,
    ModelFunctionTrait, ModelId, PeakModel, ALL_MODELS,
};

mod special;

mod weight;
pub use weight::WeightType;
