use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Statistical weighting scheme applied per data point before fitting.
///
/// The scheme is resolved to a scalar weight upstream; model derivative
/// evaluation only consumes the resulting value and is linear in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
pub enum WeightType {
    None,
    Instrumental,
    Direct,
    Inverse,
    StatisticalY,
    StatisticalFit,
    RelativeY,
    RelativeFit,
}

impl WeightType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No",
            Self::Instrumental => "Instrumental (1/s^2)",
            Self::Direct => "Direct (s)",
            Self::Inverse => "Inverse (1/s)",
            Self::StatisticalY => "Statistical (1/y)",
            Self::StatisticalFit => "Statistical (Fit)",
            Self::RelativeY => "Relative (1/y^2)",
            Self::RelativeFit => "Relative (Fit)",
        }
    }
}
