use crate::models::{ModelDescriptor, ModelFunctionTrait};
use crate::special::erf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2, TAU};
use strum_macros::EnumIter;

use super::peak::sech;

/// Growth (sigmoidal) models: saturation curves from an amplitude, a
/// rate-or-width parameter and a shift
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
#[non_exhaustive]
pub enum GrowthModel {
    Atan,
    Tanh,
    AlgebraicSigmoid,
    Sigmoid,
    Erf,
    Hill,
    Gompertz,
    Gudermann,
}

impl ModelFunctionTrait for GrowthModel {
    fn descriptor(&self) -> ModelDescriptor {
        match self {
            Self::Atan => ModelDescriptor {
                name: "Inverse tangent",
                equation: "a * atan((x-mu)/s)",
                pic_name: "atan",
                parameter_count: 3,
            },
            Self::Tanh => ModelDescriptor {
                name: "Hyperbolic tangent",
                equation: "a * tanh((x-mu)/s)",
                pic_name: "tanh",
                parameter_count: 3,
            },
            Self::AlgebraicSigmoid => ModelDescriptor {
                name: "Algebraic sigmoid",
                equation: "a * (x-mu)/s/sqrt(1+((x-mu)/s)^2)",
                pic_name: "alg_sigmoid",
                parameter_count: 3,
            },
            Self::Sigmoid => ModelDescriptor {
                name: "Logistic function",
                equation: "a/(1+exp(-k*(x-mu)))",
                pic_name: "logistic_function",
                parameter_count: 3,
            },
            Self::Erf => ModelDescriptor {
                name: "Error function (erf)",
                equation: "a/2 * erf((x-mu)/s/sqrt(2))",
                pic_name: "erf",
                parameter_count: 3,
            },
            Self::Hill => ModelDescriptor {
                name: "Hill",
                equation: "a * x^n/(s^n + x^n)",
                pic_name: "hill",
                parameter_count: 3,
            },
            Self::Gompertz => ModelDescriptor {
                name: "Gompertz",
                equation: "a*exp(-b*exp(-c*x))",
                pic_name: "gompertz",
                parameter_count: 3,
            },
            Self::Gudermann => ModelDescriptor {
                name: "Gudermann (gd)",
                equation: "a * asin(tanh((x-mu)/s))",
                pic_name: "gd",
                parameter_count: 3,
            },
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Sigmoid => &["k", "mu", "a"],
            Self::Hill => &["s", "n", "a"],
            Self::Gompertz => &["a", "b", "c"],
            _ => &["s", "mu", "a"],
        };
        names.iter().map(|&name| name.into()).collect()
    }

    fn value(&self, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Atan => atan_value(x, p),
            Self::Tanh => tanh_value(x, p),
            Self::AlgebraicSigmoid => algebraic_sigmoid_value(x, p),
            Self::Sigmoid => sigmoid_value(x, p),
            Self::Erf => erf_value(x, p),
            Self::Hill => hill_value(x, p),
            Self::Gompertz => gompertz_value(x, p),
            Self::Gudermann => gudermann_value(x, p),
        }
    }

    fn partial(&self, index: usize, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Atan => atan_partial(index, x, p),
            Self::Tanh => tanh_partial(index, x, p),
            Self::AlgebraicSigmoid => algebraic_sigmoid_partial(index, x, p),
            Self::Sigmoid => sigmoid_partial(index, x, p),
            Self::Erf => erf_partial(index, x, p),
            Self::Hill => hill_partial(index, x, p),
            Self::Gompertz => gompertz_partial(index, x, p),
            Self::Gudermann => gudermann_partial(index, x, p),
        }
    }
}

fn atan_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a * ((x - mu) / s).atan()
}

fn atan_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    match index {
        0 => -a / s * y / (1.0 + y * y),
        1 => -a / s / (1.0 + y * y),
        2 => y.atan(),
        _ => unreachable!(),
    }
}

fn tanh_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a * ((x - mu) / s).tanh()
}

fn tanh_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    let sech2 = sech(y) * sech(y);
    match index {
        0 => -a / s * y * sech2,
        1 => -a / s * sech2,
        2 => y.tanh(),
        _ => unreachable!(),
    }
}

fn algebraic_sigmoid_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    a * y / (1.0 + y * y).sqrt()
}

fn algebraic_sigmoid_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    let y2 = y * y;
    match index {
        0 => -a / s * y / (1.0 + y2).powf(1.5),
        1 => -a / s / (1.0 + y2).powf(1.5),
        2 => y / (1.0 + y2).sqrt(),
        _ => unreachable!(),
    }
}

fn sigmoid_value(x: f64, p: &[f64]) -> f64 {
    let &[k, mu, a] = p else { unreachable!() };
    a / (1.0 + f64::exp(-k * (x - mu)))
}

fn sigmoid_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[k, mu, a] = p else { unreachable!() };
    let e = f64::exp(-k * (x - mu));
    let denom = (1.0 + e) * (1.0 + e);
    match index {
        0 => a * (x - mu) * e / denom,
        1 => -a * k * e / denom,
        2 => (1.0 + e).recip(),
        _ => unreachable!(),
    }
}

fn erf_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a / 2.0 * erf((x - mu) / (SQRT_2 * s))
}

fn erf_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / (SQRT_2 * s);
    let e = f64::exp(-y * y);
    match index {
        0 => -a * y * e / (PI.sqrt() * s),
        1 => -a * e / (TAU.sqrt() * s),
        2 => erf(y) / 2.0,
        _ => unreachable!(),
    }
}

fn hill_value(x: f64, p: &[f64]) -> f64 {
    let &[s, n, a] = p else { unreachable!() };
    let z = (x / s).powf(n);
    a * z / (1.0 + z)
}

fn hill_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, n, a] = p else { unreachable!() };
    let y = x / s;
    let z = y.powf(n);
    let denom = (1.0 + z) * (1.0 + z);
    match index {
        0 => -a * n / s * z / denom,
        1 => a * y.ln() * z / denom,
        2 => z / (1.0 + z),
        _ => unreachable!(),
    }
}

fn gompertz_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, c] = p else { unreachable!() };
    a * f64::exp(-b * f64::exp(-c * x))
}

fn gompertz_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, c] = p else { unreachable!() };
    match index {
        0 => f64::exp(-b * f64::exp(-c * x)),
        1 => -a * f64::exp(-c * x - b * f64::exp(-c * x)),
        2 => a * b * x * f64::exp(-c * x - b * f64::exp(-c * x)),
        _ => unreachable!(),
    }
}

fn gudermann_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a * ((x - mu) / s).tanh().asin()
}

fn gudermann_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    match index {
        0 => -a / s * y * sech(y),
        1 => -a / s * sech(y),
        2 => y.tanh().asin(),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::ModelId;
    use crate::tests::{check_jacobian, fixtures};

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn jacobian_matches_central_differences() {
        for fixture in fixtures()
            .into_iter()
            .filter(|f| matches!(f.model, ModelId::Growth(_)))
        {
            check_jacobian(&fixture);
        }
    }

    #[test]
    fn sigmoid_saturates_to_amplitude() {
        let model = ModelId::from(GrowthModel::Sigmoid);
        let p = [1.3, 0.4, 2.0];
        assert_relative_eq!(model.evaluate(100.0, &p).unwrap(), 2.0, max_relative = 1e-9);
        assert_relative_eq!(model.evaluate(-100.0, &p).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn gudermann_amplitude_derivative_is_gd() {
        let model = ModelId::from(GrowthModel::Gudermann);
        let p = [0.9, -0.1, 1.3];
        let x = 0.8;
        let y: f64 = (x - p[1]) / p[0];
        assert_relative_eq!(
            model.derivative(2, x, &p, 1.0).unwrap(),
            y.tanh().asin(),
            max_relative = 1e-12,
        );
    }
}
