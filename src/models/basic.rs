use crate::models::{ModelDescriptor, ModelFunctionTrait};

use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Basic function models.
///
/// `Polynomial`, `Exponential` and `Fourier` carry their degree in the tag:
/// the degree fixes the parameter count, so the registry mapping stays total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[non_exhaustive]
pub enum BasicModel {
    /// c0 + c1*x + ... + cd*x^d
    Polynomial { degree: usize },
    /// Degree 1: a*x^b; degree 2: a + b*x^c
    Power { degree: usize },
    /// Sum of `degree` terms a_i*exp(b_i*x)
    Exponential { degree: usize },
    /// a*(1 - exp(b*x)) + c
    InverseExponential,
    /// a0 plus `degree` harmonics a_i*cos(i*w*x) + b_i*sin(i*w*x)
    Fourier { degree: usize },
}

impl ModelFunctionTrait for BasicModel {
    fn descriptor(&self) -> ModelDescriptor {
        match *self {
            Self::Polynomial { degree } => ModelDescriptor {
                name: "Polynomial",
                equation: "c0 + c1*x",
                pic_name: "polynom",
                parameter_count: degree + 1,
            },
            Self::Power { degree } => ModelDescriptor {
                name: "Power",
                equation: "a*x^b",
                pic_name: "power",
                parameter_count: if degree == 1 { 2 } else { 3 },
            },
            Self::Exponential { degree } => ModelDescriptor {
                name: "Exponential",
                equation: "a*exp(b*x)",
                pic_name: "exponential",
                parameter_count: 2 * degree,
            },
            Self::InverseExponential => ModelDescriptor {
                name: "Inverse exponential",
                equation: "a*(1-exp(b*x)) + c",
                pic_name: "inv_exponential",
                parameter_count: 3,
            },
            Self::Fourier { degree } => ModelDescriptor {
                name: "Fourier",
                equation: "a0 + (a1*cos(w*x) + b1*sin(w*x))",
                pic_name: "fourier",
                parameter_count: 2 + 2 * degree,
            },
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        match *self {
            Self::Polynomial { degree } => (0..=degree).map(|i| format!("c{i}")).collect(),
            Self::Power { degree } => {
                if degree == 1 {
                    vec!["a".into(), "b".into()]
                } else {
                    vec!["a".into(), "b".into(), "c".into()]
                }
            }
            Self::Exponential { degree } => {
                if degree == 1 {
                    vec!["a".into(), "b".into()]
                } else {
                    (1..=degree)
                        .flat_map(|i| [format!("a{i}"), format!("b{i}")])
                        .collect()
                }
            }
            Self::InverseExponential => vec!["a".into(), "b".into(), "c".into()],
            Self::Fourier { degree } => std::iter::once("w".into())
                .chain(std::iter::once("a0".into()))
                .chain((1..=degree).flat_map(|i| [format!("a{i}"), format!("b{i}")]))
                .collect(),
        }
    }

    fn value(&self, x: f64, p: &[f64]) -> f64 {
        match *self {
            Self::Polynomial { .. } => polynomial_value(x, p),
            Self::Power { degree } => power_value(degree, x, p),
            Self::Exponential { .. } => exponential_value(x, p),
            Self::InverseExponential => inverse_exponential_value(x, p),
            Self::Fourier { .. } => fourier_value(x, p),
        }
    }

    fn partial(&self, index: usize, x: f64, p: &[f64]) -> f64 {
        match *self {
            Self::Polynomial { .. } => x.powi(index as i32),
            Self::Power { degree } => power_partial(degree, index, x, p),
            Self::Exponential { .. } => exponential_partial(index, x, p),
            Self::InverseExponential => inverse_exponential_partial(index, x, p),
            Self::Fourier { .. } => fourier_partial(index, x, p),
        }
    }
}

fn polynomial_value(x: f64, p: &[f64]) -> f64 {
    p.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

fn power_value(degree: usize, x: f64, p: &[f64]) -> f64 {
    if degree == 1 {
        p[0] * x.powf(p[1])
    } else {
        p[0] + p[1] * x.powf(p[2])
    }
}

fn power_partial(degree: usize, index: usize, x: f64, p: &[f64]) -> f64 {
    if degree == 1 {
        match index {
            0 => x.powf(p[1]),
            1 => p[0] * x.powf(p[1]) * x.ln(),
            _ => unreachable!(),
        }
    } else {
        match index {
            0 => 1.0,
            1 => x.powf(p[2]),
            2 => p[1] * x.powf(p[2]) * x.ln(),
            _ => unreachable!(),
        }
    }
}

fn exponential_value(x: f64, p: &[f64]) -> f64 {
    p.iter().tuples().map(|(&a, &b)| a * f64::exp(b * x)).sum()
}

fn exponential_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    // parameters interleave as amplitude/rate pairs
    if index % 2 == 0 {
        f64::exp(p[index + 1] * x)
    } else {
        p[index - 1] * x * f64::exp(p[index] * x)
    }
}

fn inverse_exponential_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, c] = p else { unreachable!() };
    a * (1.0 - f64::exp(b * x)) + c
}

fn inverse_exponential_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, _c] = p else { unreachable!() };
    match index {
        0 => 1.0 - f64::exp(b * x),
        1 => -a * x * f64::exp(b * x),
        2 => 1.0,
        _ => unreachable!(),
    }
}

fn fourier_value(x: f64, p: &[f64]) -> f64 {
    let w = p[0];
    p[1] + p[2..]
        .iter()
        .tuples()
        .enumerate()
        .map(|(i, (&a, &b))| {
            let k = (i + 1) as f64;
            a * (k * w * x).cos() + b * (k * w * x).sin()
        })
        .sum::<f64>()
}

fn fourier_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let w = p[0];
    match index {
        0 => p[2..]
            .iter()
            .tuples()
            .enumerate()
            .map(|(i, (&a, &b))| {
                let k = (i + 1) as f64;
                k * x * (b * (k * w * x).cos() - a * (k * w * x).sin())
            })
            .sum::<f64>(),
        1 => 1.0,
        _ => {
            let k = ((index - 2) / 2 + 1) as f64;
            if index % 2 == 0 {
                (k * w * x).cos()
            } else {
                (k * w * x).sin()
            }
        }
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
            .filter(|f| matches!(f.model, ModelId::Basic(_)))
        {
            check_jacobian(&fixture);
        }
    }

    #[test]
    fn polynomial_evaluates_by_horner() {
        let model = ModelId::from(BasicModel::Polynomial { degree: 3 });
        let p = [1.0, -2.0, 0.5, 3.0];
        let x = 1.5;
        let desired = 1.0 - 2.0 * x + 0.5 * x * x + 3.0 * x * x * x;
        assert_relative_eq!(model.evaluate(x, &p).unwrap(), desired, max_relative = 1e-12);
    }

    #[test]
    fn exponential_sum_splits_even_and_odd_indices() {
        let model = ModelId::from(BasicModel::Exponential { degree: 2 });
        let p = [2.0, -1.1, 0.7, 0.4];
        let x = 0.9;
        assert_relative_eq!(
            model.derivative(2, x, &p, 1.0).unwrap(),
            f64::exp(0.4 * x),
            max_relative = 1e-12,
        );
        assert_relative_eq!(
            model.derivative(1, x, &p, 1.0).unwrap(),
            2.0 * x * f64::exp(-1.1 * x),
            max_relative = 1e-12,
        );
    }

    #[test]
    fn fourier_constant_term_has_unit_derivative() {
        let model = ModelId::from(BasicModel::Fourier { degree: 2 });
        let p = [1.1, 0.4, 0.7, -0.3, 0.2, 0.5];
        assert_eq!(model.derivative(1, 0.8, &p, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn degree_drives_parameter_names() {
        assert_eq!(
            BasicModel::Polynomial { degree: 2 }.parameter_names(),
            ["c0", "c1", "c2"],
        );
        assert_eq!(
            BasicModel::Fourier { degree: 2 }.parameter_names(),
            ["w", "a0", "a1", "b1", "a2", "b2"],
        );
        assert_eq!(
            BasicModel::Exponential { degree: 2 }.parameter_names(),
            ["a1", "b1", "a2", "b2"],
        );
        assert_eq!(BasicModel::Power { degree: 1 }.parameter_names(), ["a", "b"]);
    }
}
