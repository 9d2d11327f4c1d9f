use crate::models::{ModelDescriptor, ModelFunctionTrait};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use strum_macros::EnumIter;

/// Peak-shaped models, all parameterised as (width, center, amplitude)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
#[non_exhaustive]
pub enum PeakModel {
    Gaussian,
    CauchyLorentz,
    Sech,
    Logistic,
}

impl ModelFunctionTrait for PeakModel {
    fn descriptor(&self) -> ModelDescriptor {
        match self {
            Self::Gaussian => ModelDescriptor {
                name: "Gaussian (normal)",
                equation: "a/sqrt(2*pi)/s * exp(-((x-mu)/s)^2/2)",
                pic_name: "gaussian",
                parameter_count: 3,
            },
            Self::CauchyLorentz => ModelDescriptor {
                name: "Cauchy-Lorentz",
                equation: "a/pi * g/(g^2+(x-mu)^2)",
                pic_name: "cauchy_lorentz",
                parameter_count: 3,
            },
            Self::Sech => ModelDescriptor {
                name: "Hyperbolic secant (sech)",
                equation: "a/pi/s * sech((x-mu)/s)",
                pic_name: "sech",
                parameter_count: 3,
            },
            Self::Logistic => ModelDescriptor {
                name: "Logistic (sech squared)",
                equation: "a/4/s * sech((x-mu)/2/s)**2",
                pic_name: "logistic",
                parameter_count: 3,
            },
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Gaussian => &["s", "mu", "a"],
            Self::CauchyLorentz => &["g", "mu", "a"],
            Self::Sech => &["s", "mu", "a"],
            Self::Logistic => &["s", "mu", "a"],
        };
        names.iter().map(|&name| name.into()).collect()
    }

    fn value(&self, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Gaussian => gaussian_value(x, p),
            Self::CauchyLorentz => lorentz_value(x, p),
            Self::Sech => sech_value(x, p),
            Self::Logistic => logistic_value(x, p),
        }
    }

    fn partial(&self, index: usize, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Gaussian => gaussian_partial(index, x, p),
            Self::CauchyLorentz => lorentz_partial(index, x, p),
            Self::Sech => sech_partial(index, x, p),
            Self::Logistic => logistic_partial(index, x, p),
        }
    }
}

pub(super) fn sech(x: f64) -> f64 {
    x.cosh().recip()
}

pub(super) fn gaussian_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    a / (TAU.sqrt() * s) * f64::exp(-y * y / 2.0)
}

pub(super) fn gaussian_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    let base = f64::exp(-y * y / 2.0) / (TAU.sqrt() * s);
    match index {
        0 => a * base * (y * y - 1.0) / s,
        1 => a * base * y / s,
        2 => base,
        _ => unreachable!(),
    }
}

pub(super) fn lorentz_value(x: f64, p: &[f64]) -> f64 {
    let &[g, mu, a] = p else { unreachable!() };
    a / PI * g / (g * g + (x - mu) * (x - mu))
}

pub(super) fn lorentz_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[g, mu, a] = p else { unreachable!() };
    let dx = x - mu;
    let denom = g * g + dx * dx;
    match index {
        0 => a / PI * (dx * dx - g * g) / (denom * denom),
        1 => a / PI * 2.0 * g * dx / (denom * denom),
        2 => g / (PI * denom),
        _ => unreachable!(),
    }
}

fn sech_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a / (PI * s) * sech((x - mu) / s)
}

fn sech_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    match index {
        0 => a / (PI * s * s) * (y * y.tanh() - 1.0) * sech(y),
        1 => a / (PI * s * s) * y.tanh() * sech(y),
        2 => sech(y) / (PI * s),
        _ => unreachable!(),
    }
}

pub(super) fn logistic_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / (2.0 * s);
    a / (4.0 * s) * sech(y) * sech(y)
}

pub(super) fn logistic_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / (2.0 * s);
    let sech2 = sech(y) * sech(y);
    match index {
        0 => a / (4.0 * s * s) * sech2 * (2.0 * y * y.tanh() - 1.0),
        1 => a / (4.0 * s * s) * sech2 * y.tanh(),
        2 => sech2 / (4.0 * s),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelId;
    use crate::tests::{check_jacobian, fixtures};

    use approx::assert_relative_eq;

    #[test]
    fn jacobian_matches_central_differences() {
        for fixture in fixtures()
            .into_iter()
            .filter(|f| matches!(f.model, ModelId::Peak(_)))
        {
            check_jacobian(&fixture);
        }
    }

    #[test]
    fn gaussian_amplitude_derivative_at_center() {
        let model = ModelId::from(PeakModel::Gaussian);
        // unit width, centered at zero: d f / d a at the peak is 1/sqrt(2 pi)
        let derivative = model.derivative(2, 0.0, &[1.0, 0.0, 2.0], 1.0).unwrap();
        assert_relative_eq!(derivative, TAU.sqrt().recip(), max_relative = 1e-12);
    }

    #[test]
    fn gaussian_center_derivative_vanishes_at_peak() {
        let model = ModelId::from(PeakModel::Gaussian);
        assert_eq!(model.derivative(1, 0.5, &[1.2, 0.5, 2.0], 1.0).unwrap(), 0.0);
    }

    #[test]
    fn lorentz_value_at_center() {
        let model = ModelId::from(PeakModel::CauchyLorentz);
        let value = model.evaluate(0.2, &[0.8, 0.2, 1.5]).unwrap();
        assert_relative_eq!(value, 1.5 / (PI * 0.8), max_relative = 1e-12);
    }
}
