//! Fit model catalogue: value functions, analytic parameter derivatives and
//! registry data.
//!
//! Every model is identified by a [ModelId] pairing a category with a model
//! tag. The checked entry points [ModelId::evaluate] and
//! [ModelId::derivative] validate the parameter vector length and the
//! parameter index once, then dispatch to the self-contained per-model math
//! in the category modules.

mod basic;
pub use basic::BasicModel;

mod peak;
pub use peak::PeakModel;

mod growth;
pub use growth::GrowthModel;

mod distribution;
pub use distribution::DistributionModel;

use crate::error::FitModelError;

use enum_dispatch::enum_dispatch;
use lazy_static::lazy_static;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Registry row describing one fit model
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub struct ModelDescriptor {
    /// Human-readable model name
    pub name: &'static str,
    /// Canonical equation string for formula previews
    pub equation: &'static str,
    /// Identifier of the illustrative bitmap
    pub pic_name: &'static str,
    /// Number of fit parameters
    pub parameter_count: usize,
}

/// Model category, selected once per fit configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
pub enum ModelCategory {
    Basic,
    Peak,
    Growth,
    Distribution,
    /// Free-text expression models; parameter lists are derived by an
    /// external expression parser, so this category has no [ModelId] variant
    Custom,
}

impl ModelCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic functions",
            Self::Peak => "Peak functions",
            Self::Growth => "Growth (sigmoidal)",
            Self::Distribution => "Statistics (distributions)",
            Self::Custom => "Custom",
        }
    }
}

/// Registry data and math of one fit model.
///
/// `value` and `partial` assume a parameter slice of the declared length and
/// a parameter index inside it; [ModelId::evaluate] and [ModelId::derivative]
/// check both before dispatching here.
#[enum_dispatch]
pub trait ModelFunctionTrait {
    /// Registry row of this model
    fn descriptor(&self) -> ModelDescriptor;

    /// Parameter names in evaluation order, matching the equation string
    fn parameter_names(&self) -> Vec<String>;

    /// Model value at `x`
    fn value(&self, x: f64, p: &[f64]) -> f64;

    /// Unweighted partial derivative of the model with respect to `p[index]`
    fn partial(&self, index: usize, x: f64, p: &[f64]) -> f64;
}

/// One concrete fit model, the unit of dispatch
#[enum_dispatch(ModelFunctionTrait)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[non_exhaustive]
pub enum ModelId {
    Basic(BasicModel),
    Peak(PeakModel),
    Growth(GrowthModel),
    Distribution(DistributionModel),
}

impl ModelId {
    pub fn category(&self) -> ModelCategory {
        match self {
            Self::Basic(_) => ModelCategory::Basic,
            Self::Peak(_) => ModelCategory::Peak,
            Self::Growth(_) => ModelCategory::Growth,
            Self::Distribution(_) => ModelCategory::Distribution,
        }
    }

    /// Model value at `x` for the given parameter vector
    pub fn evaluate(&self, x: f64, params: &[f64]) -> Result<f64, FitModelError> {
        self.check_params(params)?;
        Ok(self.value(x, params))
    }

    /// One Jacobian entry: `weight * d f(x; params) / d params[index]`.
    ///
    /// The weight is factored in here, never inside the per-model formulas,
    /// so the result is linear in it for every model and index.
    pub fn derivative(
        &self,
        index: usize,
        x: f64,
        params: &[f64],
        weight: f64,
    ) -> Result<f64, FitModelError> {
        self.check_params(params)?;
        let count = self.descriptor().parameter_count;
        if index >= count {
            return Err(FitModelError::ParameterIndexOutOfRange {
                model: self.descriptor().name,
                index,
                count,
            });
        }
        Ok(weight * self.partial(index, x, params))
    }

    fn check_params(&self, params: &[f64]) -> Result<(), FitModelError> {
        let expected = self.descriptor().parameter_count;
        if params.len() != expected {
            return Err(FitModelError::ParameterCountMismatch {
                model: self.descriptor().name,
                expected,
                actual: params.len(),
            });
        }
        Ok(())
    }
}

lazy_static! {
    /// Every registered model, for enumeration and UI population.
    ///
    /// Degree-parameterised basic models are listed at degree one.
    pub static ref ALL_MODELS: Vec<ModelId> = {
        let mut models: Vec<ModelId> = vec![
            BasicModel::Polynomial { degree: 1 }.into(),
            BasicModel::Power { degree: 1 }.into(),
            BasicModel::Exponential { degree: 1 }.into(),
            BasicModel::InverseExponential.into(),
            BasicModel::Fourier { degree: 1 }.into(),
        ];
        models.extend(PeakModel::iter().map(ModelId::from));
        models.extend(GrowthModel::iter().map(ModelId::from));
        models.extend(DistributionModel::iter().map(ModelId::from));
        models
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;

    use approx::assert_relative_eq;

    #[test]
    fn registry_is_coherent() {
        for model in ALL_MODELS.iter() {
            let descriptor = model.descriptor();
            assert!(descriptor.parameter_count > 0, "{}", descriptor.name);
            assert!(!descriptor.equation.is_empty(), "{}", descriptor.name);
            assert!(!descriptor.pic_name.is_empty(), "{}", descriptor.name);
            assert_eq!(
                model.parameter_names().len(),
                descriptor.parameter_count,
                "parameter names of {} do not match the declared count",
                descriptor.name,
            );
        }
    }

    #[test]
    fn all_models_count() {
        assert_eq!(ALL_MODELS.len(), 49);
    }

    #[test]
    fn derivatives_are_linear_in_weight() {
        for fixture in fixtures() {
            let name = fixture.model.descriptor().name;
            for index in 0..fixture.model.descriptor().parameter_count {
                let w1 = fixture
                    .model
                    .derivative(index, fixture.x, &fixture.params, 0.7)
                    .unwrap();
                let w2 = fixture
                    .model
                    .derivative(index, fixture.x, &fixture.params, 1.4)
                    .unwrap();
                assert_relative_eq!(2.0 * w1, w2, max_relative = 1e-12, epsilon = 1e-300);
                assert_eq!(
                    fixture
                        .model
                        .derivative(index, fixture.x, &fixture.params, 0.0)
                        .unwrap(),
                    0.0,
                    "zero weight must zero the {name} derivative",
                );
            }
        }
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let model = ModelId::from(PeakModel::Gaussian);
        assert_eq!(
            model.evaluate(0.0, &[1.0, 2.0]),
            Err(FitModelError::ParameterCountMismatch {
                model: "Gaussian (normal)",
                expected: 3,
                actual: 2,
            })
        );
        assert!(model.derivative(0, 0.0, &[1.0; 4], 1.0).is_err());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let model = ModelId::from(PeakModel::Gaussian);
        assert_eq!(
            model.derivative(3, 0.0, &[1.0, 0.0, 2.0], 1.0),
            Err(FitModelError::ParameterIndexOutOfRange {
                model: "Gaussian (normal)",
                index: 3,
                count: 3,
            })
        );
    }

    #[test]
    fn model_id_serializes_round_trip() {
        for model in [
            ModelId::from(BasicModel::Fourier { degree: 2 }),
            ModelId::from(PeakModel::CauchyLorentz),
            ModelId::from(GrowthModel::Gompertz),
            ModelId::from(DistributionModel::Weibull),
        ] {
            let json = serde_json::to_string(&model).unwrap();
            let back: ModelId = serde_json::from_str(&json).unwrap();
            assert_eq!(model, back);
        }
    }

    #[test]
    fn categories_have_names() {
        use strum::IntoEnumIterator;
        for category in ModelCategory::iter() {
            assert!(!category.name().is_empty());
        }
        assert_eq!(ModelCategory::Distribution.name(), "Statistics (distributions)");
    }

    #[test]
    fn models_report_their_category() {
        assert_eq!(
            ModelId::from(PeakModel::Gaussian).category(),
            ModelCategory::Peak,
        );
        assert_eq!(
            ModelId::from(DistributionModel::Weibull).category(),
            ModelCategory::Distribution,
        );
    }

    #[test]
    fn weight_types_have_labels() {
        use crate::weight::WeightType;
        use strum::IntoEnumIterator;
        assert_eq!(WeightType::Instrumental.label(), "Instrumental (1/s^2)");
        for weight in WeightType::iter() {
            assert!(!weight.label().is_empty());
        }
    }
}
