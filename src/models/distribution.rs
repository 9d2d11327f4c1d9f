use crate::models::{ModelDescriptor, ModelFunctionTrait};
use crate::special::{
    beta_pdf, binomial_pmf, choose, digamma, erfc, fisher_f_pdf, gamma, geometric_pmf,
    gumbel2_pdf, hypergeometric_pmf, landau_pdf, ln_gamma, logarithmic_pmf,
    negative_binomial_pmf, pareto_pdf, students_t_pdf,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2, TAU};
use strum_macros::EnumIter;

use super::peak::{
    gaussian_partial, gaussian_value, logistic_partial, logistic_value, lorentz_partial,
    lorentz_value, sech,
};

/// Probability-distribution models, each scaled by an amplitude parameter.
///
/// Distributions with restricted support evaluate to zero outside of it,
/// for the value and every partial derivative alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, EnumIter)]
#[non_exhaustive]
pub enum DistributionModel {
    Gaussian,
    GaussianTail,
    Exponential,
    Laplace,
    ExponentialPower,
    CauchyLorentz,
    Rayleigh,
    RayleighTail,
    Landau,
    Gamma,
    Flat,
    LogNormal,
    ChiSquared,
    FisherF,
    StudentsT,
    Beta,
    Logistic,
    Pareto,
    Weibull,
    Frechet,
    Gumbel1,
    Gumbel2,
    Poisson,
    Binomial,
    NegativeBinomial,
    Pascal,
    Geometric,
    Hypergeometric,
    Logarithmic,
    Maxwell,
    Sech,
    Levy,
}

impl ModelFunctionTrait for DistributionModel {
    fn descriptor(&self) -> ModelDescriptor {
        match self {
            Self::Gaussian => ModelDescriptor {
                name: "Gaussian (Normal)",
                equation: "a/sqrt(2*pi)/s * exp(-((x-mu)/s)^2/2)",
                pic_name: "gaussian",
                parameter_count: 3,
            },
            Self::GaussianTail => ModelDescriptor {
                name: "Gaussian Tail",
                equation: "2*A/sqrt(2*pi)/s/erfc(a/sqrt(2)/s) * exp(-((x-mu)/s)^2/2) * theta(x-a)",
                pic_name: "gaussian_tail",
                parameter_count: 4,
            },
            Self::Exponential => ModelDescriptor {
                name: "Exponential",
                equation: "a*l*exp(-l*(x-mu))",
                pic_name: "exponential",
                parameter_count: 3,
            },
            Self::Laplace => ModelDescriptor {
                name: "Laplace",
                equation: "a/(2*s) * exp(-fabs((x-mu)/s))",
                pic_name: "laplace",
                parameter_count: 3,
            },
            Self::ExponentialPower => ModelDescriptor {
                name: "Exponential Power",
                equation: "a/(2*s*gamma(1+1/b)) * exp(-fabs((x-mu)/s)^b)",
                pic_name: "exponential_power",
                parameter_count: 4,
            },
            Self::CauchyLorentz => ModelDescriptor {
                name: "Cauchy-Lorentz (Breit-Wigner)",
                equation: "a/pi * g/(g^2 + (x-mu)^2)",
                pic_name: "cauchy_lorentz",
                parameter_count: 3,
            },
            Self::Rayleigh => ModelDescriptor {
                name: "Rayleigh",
                equation: "a * x/s^2 * exp(-(x/s)^2/2)",
                pic_name: "rayleigh",
                parameter_count: 2,
            },
            Self::RayleighTail => ModelDescriptor {
                name: "Rayleigh Tail",
                equation: "a*x/s^2 * exp((mu^2-x^2)/2/s^2)",
                pic_name: "rayleigh_tail",
                parameter_count: 3,
            },
            Self::Landau => ModelDescriptor {
                name: "Landau",
                equation: "a*landau(x)",
                pic_name: "landau",
                parameter_count: 1,
            },
            Self::Gamma => ModelDescriptor {
                name: "Gamma",
                equation: "a/gamma(k)/t^k * x^(k-1)*exp(-x/t)",
                pic_name: "gamma",
                parameter_count: 3,
            },
            Self::Flat => ModelDescriptor {
                name: "Flat (uniform)",
                equation: "A/(b-a)*theta(b-x)*theta(x-a)",
                pic_name: "flat",
                parameter_count: 3,
            },
            Self::LogNormal => ModelDescriptor {
                name: "Log-normal (Galton)",
                equation: "a/sqrt(2*pi)/x/s * exp(-((log(x)-mu)/s)^2/2)",
                pic_name: "lognormal",
                parameter_count: 3,
            },
            Self::ChiSquared => ModelDescriptor {
                name: "Chi-squared",
                equation: "a * x^(n/2-1)/2^(n/2)/gamma(n/2) * exp(-x/2)",
                pic_name: "chi_squared",
                parameter_count: 2,
            },
            Self::FisherF => ModelDescriptor {
                name: "F (Fisher-Snedecor)",
                equation: "a * gamma((n1+n2)/2)/gamma(n1/2)/gamma(n2/2) * n1^(n1/2)*n2^(n2/2) \
                    * x^(n1/2-1) * (n2+n1*x)^(-(n1+n2)/2)",
                pic_name: "F",
                parameter_count: 3,
            },
            Self::StudentsT => ModelDescriptor {
                name: "Student's t",
                equation: "a*gamma((n+1)/2)/sqrt(pi*n)/gamma(n/2) * (1+x^2/n)^(-(n+1)/2)",
                pic_name: "students_t",
                parameter_count: 2,
            },
            Self::Beta => ModelDescriptor {
                name: "Beta",
                equation: "A*gamma(a+b)/gamma(a)/gamma(b) * x^(a-1) * (1-x)^(b-1)",
                pic_name: "beta",
                parameter_count: 3,
            },
            Self::Logistic => ModelDescriptor {
                name: "Logistic (sech-squared)",
                equation: "a/4/s * sech((x-mu)/2/s)**2",
                pic_name: "logistic",
                parameter_count: 3,
            },
            Self::Pareto => ModelDescriptor {
                name: "Pareto",
                equation: "A * a*b^a/x^(a+1)",
                pic_name: "pareto",
                parameter_count: 3,
            },
            Self::Weibull => ModelDescriptor {
                name: "Weibull",
                equation: "a * k/l * ((x-mu)/l)^(k-1) * exp(-((x-mu)/l)^k)",
                pic_name: "weibull",
                parameter_count: 4,
            },
            Self::Frechet => ModelDescriptor {
                name: "Frechet (inverse Weibull)",
                equation: "a * g/s*((x-mu)/s)^(-g-1) * exp(-((x-mu)/s)^(-g))",
                pic_name: "frechet",
                parameter_count: 4,
            },
            Self::Gumbel1 => ModelDescriptor {
                name: "Gumbel Type-1 (maximum value; log-Weibull)",
                equation: "a/s * exp(-(x-mu)/s - b*exp(-(x-mu)/s))",
                pic_name: "gumbel1",
                parameter_count: 4,
            },
            Self::Gumbel2 => ModelDescriptor {
                name: "Type-2 Gumbel",
                equation: "A * a*b * (x-mu)^(-a-1) * exp(-b*(x-mu)^(-a))",
                pic_name: "gumbel2",
                parameter_count: 4,
            },
            Self::Poisson => ModelDescriptor {
                name: "Poisson",
                equation: "a * l^x/gamma(x+1) * exp(-l)",
                pic_name: "poisson",
                parameter_count: 2,
            },
            Self::Binomial => ModelDescriptor {
                name: "Binomial",
                equation: "A * n!/(k!*(n-k)!) * p^k * (1-p)^(n-k), k = round(x)",
                pic_name: "binomial",
                parameter_count: 3,
            },
            Self::NegativeBinomial => ModelDescriptor {
                name: "Negative binomial",
                equation: "A * gamma(n+k)/gamma(k+1)/gamma(n) * p^n * (1-p)^k",
                pic_name: "binomial_negative",
                parameter_count: 3,
            },
            Self::Pascal => ModelDescriptor {
                name: "Pascal",
                equation: "A * gamma(n+k)/gamma(k+1)/gamma(n) * p^n * (1-p)^k, n = round(n)",
                pic_name: "pascal",
                parameter_count: 3,
            },
            Self::Geometric => ModelDescriptor {
                name: "Geometric",
                equation: "a * p*(1-p)^(k-1), k = round(x)",
                pic_name: "geometric",
                parameter_count: 2,
            },
            Self::Hypergeometric => ModelDescriptor {
                name: "Hypergeometric",
                equation: "a * C(n1,k)*C(n2,t-k)/C(n1+n2,t), k = round(x)",
                pic_name: "hypergeometric",
                parameter_count: 4,
            },
            Self::Logarithmic => ModelDescriptor {
                name: "Logarithmic",
                equation: "-a/log(1-p) * p^k/k, k = round(x)",
                pic_name: "logarithmic",
                parameter_count: 2,
            },
            Self::Maxwell => ModelDescriptor {
                name: "Maxwell-Boltzmann",
                equation: "c*sqrt(2/pi) * x^2/a^3 * exp(-(x/a)^2/2)",
                pic_name: "maxwell_boltzmann",
                parameter_count: 2,
            },
            Self::Sech => ModelDescriptor {
                name: "Hyperbolic secant (sech)",
                equation: "a/2/s * sech(pi/2*(x-mu)/s)",
                pic_name: "sech",
                parameter_count: 3,
            },
            Self::Levy => ModelDescriptor {
                name: "Levy",
                equation: "a * sqrt(g/(2*pi)) * (x-mu)^(-3/2) * exp(-g/2/(x-mu))",
                pic_name: "levy",
                parameter_count: 3,
            },
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Gaussian | Self::Laplace | Self::LogNormal | Self::Logistic | Self::Sech => {
                &["s", "mu", "a"]
            }
            Self::GaussianTail => &["s", "mu", "A", "a"],
            Self::Exponential => &["l", "mu", "a"],
            Self::ExponentialPower => &["s", "mu", "b", "a"],
            Self::CauchyLorentz | Self::Levy => &["g", "mu", "a"],
            Self::Rayleigh => &["s", "a"],
            Self::RayleighTail => &["s", "mu", "a"],
            Self::Landau => &["a"],
            Self::Gamma => &["t", "k", "a"],
            Self::Flat => &["a", "b", "A"],
            Self::ChiSquared | Self::StudentsT => &["n", "a"],
            Self::FisherF => &["n1", "n2", "a"],
            Self::Beta | Self::Pareto => &["a", "b", "A"],
            Self::Weibull => &["k", "l", "mu", "a"],
            Self::Frechet => &["g", "mu", "s", "a"],
            Self::Gumbel1 => &["s", "b", "mu", "a"],
            Self::Gumbel2 => &["a", "b", "mu", "A"],
            Self::Poisson => &["l", "a"],
            Self::Binomial | Self::NegativeBinomial | Self::Pascal => &["p", "n", "A"],
            Self::Geometric | Self::Logarithmic => &["p", "a"],
            Self::Hypergeometric => &["n1", "n2", "t", "a"],
            Self::Maxwell => &["a", "c"],
        };
        names.iter().map(|&name| name.into()).collect()
    }

    fn value(&self, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Gaussian => gaussian_value(x, p),
            Self::GaussianTail => gaussian_tail_value(x, p),
            Self::Exponential => exponential_value(x, p),
            Self::Laplace => laplace_value(x, p),
            Self::ExponentialPower => exp_power_value(x, p),
            Self::CauchyLorentz => lorentz_value(x, p),
            Self::Rayleigh => rayleigh_value(x, p),
            Self::RayleighTail => rayleigh_tail_value(x, p),
            Self::Landau => landau_value(x, p),
            Self::Gamma => gamma_value(x, p),
            Self::Flat => flat_value(x, p),
            Self::LogNormal => lognormal_value(x, p),
            Self::ChiSquared => chi_squared_value(x, p),
            Self::FisherF => fisher_f_value(x, p),
            Self::StudentsT => students_t_value(x, p),
            Self::Beta => beta_value(x, p),
            Self::Logistic => logistic_value(x, p),
            Self::Pareto => pareto_value(x, p),
            Self::Weibull => weibull_value(x, p),
            Self::Frechet => frechet_value(x, p),
            Self::Gumbel1 => gumbel1_value(x, p),
            Self::Gumbel2 => gumbel2_value(x, p),
            Self::Poisson => poisson_value(x, p),
            Self::Binomial => binomial_value(x, p),
            Self::NegativeBinomial => negative_binomial_value(x, p),
            Self::Pascal => pascal_value(x, p),
            Self::Geometric => geometric_value(x, p),
            Self::Hypergeometric => hypergeometric_value(x, p),
            Self::Logarithmic => logarithmic_value(x, p),
            Self::Maxwell => maxwell_value(x, p),
            Self::Sech => sech_dist_value(x, p),
            Self::Levy => levy_value(x, p),
        }
    }

    fn partial(&self, index: usize, x: f64, p: &[f64]) -> f64 {
        match self {
            Self::Gaussian => gaussian_partial(index, x, p),
            Self::GaussianTail => gaussian_tail_partial(index, x, p),
            Self::Exponential => exponential_partial(index, x, p),
            Self::Laplace => laplace_partial(index, x, p),
            Self::ExponentialPower => exp_power_partial(index, x, p),
            Self::CauchyLorentz => lorentz_partial(index, x, p),
            Self::Rayleigh => rayleigh_partial(index, x, p),
            Self::RayleighTail => rayleigh_tail_partial(index, x, p),
            Self::Landau => landau_partial(index, x, p),
            Self::Gamma => gamma_partial(index, x, p),
            Self::Flat => flat_partial(index, x, p),
            Self::LogNormal => lognormal_partial(index, x, p),
            Self::ChiSquared => chi_squared_partial(index, x, p),
            Self::FisherF => fisher_f_partial(index, x, p),
            Self::StudentsT => students_t_partial(index, x, p),
            Self::Beta => beta_partial(index, x, p),
            Self::Logistic => logistic_partial(index, x, p),
            Self::Pareto => pareto_partial(index, x, p),
            Self::Weibull => weibull_partial(index, x, p),
            Self::Frechet => frechet_partial(index, x, p),
            Self::Gumbel1 => gumbel1_partial(index, x, p),
            Self::Gumbel2 => gumbel2_partial(index, x, p),
            Self::Poisson => poisson_partial(index, x, p),
            Self::Binomial => binomial_partial(index, x, p),
            Self::NegativeBinomial => negative_binomial_partial(index, x, p),
            Self::Pascal => pascal_partial(index, x, p),
            Self::Geometric => geometric_partial(index, x, p),
            Self::Hypergeometric => hypergeometric_partial(index, x, p),
            Self::Logarithmic => logarithmic_partial(index, x, p),
            Self::Maxwell => maxwell_partial(index, x, p),
            Self::Sech => sech_dist_partial(index, x, p),
            Self::Levy => levy_partial(index, x, p),
        }
    }
}

fn gaussian_tail_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, big_a, a] = p else { unreachable!() };
    if x < a {
        return 0.0;
    }
    let y = (x - mu) / s;
    let norm = erfc(a / (SQRT_2 * s)) / 2.0;
    big_a * f64::exp(-y * y / 2.0) / (TAU.sqrt() * s * norm)
}

fn gaussian_tail_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, big_a, a] = p else { unreachable!() };
    if x < a {
        return 0.0;
    }
    let y = (x - mu) / s;
    let norm = erfc(a / (SQRT_2 * s)) / 2.0;
    let base = f64::exp(-y * y / 2.0) / (TAU.sqrt() * s * norm);
    // the truncated-normal normalisation depends on s and a as well
    let ea = f64::exp(-a * a / (2.0 * s * s));
    match index {
        0 => big_a * base * ((y * y - 1.0) / s - a * ea / (TAU.sqrt() * s * s * norm)),
        1 => big_a * base * y / s,
        2 => base,
        3 => big_a * base * ea / (TAU.sqrt() * s * norm),
        _ => unreachable!(),
    }
}

fn exponential_value(x: f64, p: &[f64]) -> f64 {
    let &[l, mu, a] = p else { unreachable!() };
    if x < mu {
        return 0.0;
    }
    a * l * f64::exp(-l * (x - mu))
}

fn exponential_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[l, mu, a] = p else { unreachable!() };
    if x < mu {
        return 0.0;
    }
    let y = l * (x - mu);
    let e = f64::exp(-y);
    match index {
        0 => a * (1.0 - y) * e,
        1 => a * l * l * e,
        2 => l * e,
        _ => unreachable!(),
    }
}

fn laplace_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    a / (2.0 * s) * f64::exp(-((x - mu) / s).abs())
}

fn laplace_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = ((x - mu) / s).abs();
    let e = f64::exp(-y);
    match index {
        0 => a / (2.0 * s * s) * (y - 1.0) * e,
        1 => a / (2.0 * s * s) * (x - mu).signum() * e,
        2 => e / (2.0 * s),
        _ => unreachable!(),
    }
}

fn exp_power_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, b, a] = p else { unreachable!() };
    let ya = ((x - mu) / s).abs();
    a / (2.0 * s * gamma(1.0 + 1.0 / b)) * f64::exp(-ya.powf(b))
}

fn exp_power_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, b, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    let ya = y.abs();
    let norm = 1.0 / (2.0 * s * gamma(1.0 + 1.0 / b));
    let e = f64::exp(-ya.powf(b));
    match index {
        0 => a * norm / s * (b * ya.powf(b) - 1.0) * e,
        1 => a * norm * b / s * ya.powf(b - 1.0) * y.signum() * e,
        2 => {
            let tail = if y == 0.0 { 0.0 } else { ya.powf(b) * ya.ln() };
            a * norm * e * (digamma(1.0 + 1.0 / b) / (b * b) - tail)
        }
        3 => norm * e,
        _ => unreachable!(),
    }
}

fn rayleigh_value(x: f64, p: &[f64]) -> f64 {
    let &[s, a] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    let y = x / s;
    a * y / s * f64::exp(-y * y / 2.0)
}

fn rayleigh_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, a] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    let y = x / s;
    let e = f64::exp(-y * y / 2.0);
    match index {
        0 => a * y / (s * s) * (y * y - 2.0) * e,
        1 => y / s * e,
        _ => unreachable!(),
    }
}

fn rayleigh_tail_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    if x < mu {
        return 0.0;
    }
    a * x / (s * s) * f64::exp((mu * mu - x * x) / (2.0 * s * s))
}

fn rayleigh_tail_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    if x < mu {
        return 0.0;
    }
    let y = (mu * mu - x * x) / (2.0 * s * s);
    let e = f64::exp(y);
    match index {
        0 => -2.0 * a * x / (s * s * s) * (1.0 + y) * e,
        1 => a * mu * x / (s * s * s * s) * e,
        2 => x / (s * s) * e,
        _ => unreachable!(),
    }
}

fn landau_value(x: f64, p: &[f64]) -> f64 {
    let &[a] = p else { unreachable!() };
    a * landau_pdf(x)
}

fn landau_partial(index: usize, x: f64, _p: &[f64]) -> f64 {
    match index {
        0 => landau_pdf(x),
        _ => unreachable!(),
    }
}

fn gamma_value(x: f64, p: &[f64]) -> f64 {
    let &[t, k, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    a * x.powf(k - 1.0) / (t.powf(k) * gamma(k)) * f64::exp(-x / t)
}

fn gamma_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[t, k, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    let factor = x.powf(k - 1.0) / (t.powf(k) * gamma(k));
    let e = f64::exp(-x / t);
    match index {
        0 => a * factor / t * (x / t - k) * e,
        1 => a * factor * ((x / t).ln() - digamma(k)) * e,
        2 => factor * e,
        _ => unreachable!(),
    }
}

fn flat_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x < a || x > b {
        return 0.0;
    }
    big_a / (b - a)
}

fn flat_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x < a || x > b {
        return 0.0;
    }
    match index {
        0 => big_a / ((a - b) * (a - b)),
        1 => -big_a / ((a - b) * (a - b)),
        2 => (b - a).recip(),
        _ => unreachable!(),
    }
}

fn lognormal_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    let y = x.ln() - mu;
    a / (TAU.sqrt() * x * s) * f64::exp(-(y / s) * (y / s) / 2.0)
}

fn lognormal_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    let y = x.ln() - mu;
    let base = f64::exp(-(y / s) * (y / s) / 2.0) / (TAU.sqrt() * x * s);
    match index {
        0 => a * base * (y * y - s * s) / (s * s * s),
        1 => a * base * y / (s * s),
        2 => base,
        _ => unreachable!(),
    }
}

fn chi_squared_value(x: f64, p: &[f64]) -> f64 {
    let &[n, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    let h = n / 2.0;
    a * x.powf(h - 1.0) / (2f64.powf(h) * gamma(h)) * f64::exp(-x / 2.0)
}

fn chi_squared_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[n, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    let h = n / 2.0;
    let norm = x.powf(h - 1.0) / (2f64.powf(h) * gamma(h));
    let e = f64::exp(-x / 2.0);
    match index {
        0 => a / 2.0 * norm * ((x / 2.0).ln() - digamma(h)) * e,
        1 => norm * e,
        _ => unreachable!(),
    }
}

fn fisher_f_value(x: f64, p: &[f64]) -> f64 {
    let &[n1, n2, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    a * fisher_f_pdf(x, n1, n2)
}

fn fisher_f_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[n1, n2, a] = p else { unreachable!() };
    if x <= 0.0 {
        return 0.0;
    }
    if index == 2 {
        return fisher_f_pdf(x, n1, n2);
    }
    let nu = (n1 + n2) / 2.0;
    let norm = f64::exp(
        ln_gamma(nu) - ln_gamma(n1 / 2.0) - ln_gamma(n2 / 2.0)
            + n1 / 2.0 * n1.ln()
            + n2 / 2.0 * n2.ln()
            + (n1 / 2.0 - 1.0) * x.ln(),
    );
    let y = n2 + n1 * x;
    let tail = norm * y.powf(-(n1 + n2 + 2.0) / 2.0);
    match index {
        0 => {
            a / 2.0
                * tail
                * (n2 * (1.0 - x)
                    + y * (n1.ln() + x.ln() - y.ln() + digamma(nu) - digamma(n1 / 2.0)))
        }
        1 => a / 2.0 * tail * (n1 * (x - 1.0) + y * (n2.ln() - y.ln() + digamma(nu) - digamma(n2 / 2.0))),
        _ => unreachable!(),
    }
}

fn students_t_value(x: f64, p: &[f64]) -> f64 {
    let &[n, a] = p else { unreachable!() };
    a * students_t_pdf(x, n)
}

fn students_t_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[n, a] = p else { unreachable!() };
    match index {
        0 => {
            let x2 = x * x;
            a * gamma((n + 1.0) / 2.0) / (2.0 * n.powf(1.5) * PI.sqrt() * gamma(n / 2.0))
                * (1.0 + x2 / n).powf(-(n + 3.0) / 2.0)
                * (x2 - 1.0 - (n + x2) * (1.0 + x2 / n).ln()
                    + (n + x2) * (digamma((n + 1.0) / 2.0) - digamma(n / 2.0)))
        }
        1 => students_t_pdf(x, n),
        _ => unreachable!(),
    }
}

fn beta_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    big_a * beta_pdf(x, a, b)
}

fn beta_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    let pdf = beta_pdf(x, a, b);
    match index {
        0 => big_a * pdf * (x.ln() - digamma(a) + digamma(a + b)),
        1 => big_a * pdf * ((1.0 - x).ln() - digamma(b) + digamma(a + b)),
        2 => pdf,
        _ => unreachable!(),
    }
}

fn pareto_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x < b {
        return 0.0;
    }
    big_a * pareto_pdf(x, a, b)
}

fn pareto_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, big_a] = p else { unreachable!() };
    if x < b {
        return 0.0;
    }
    match index {
        0 => big_a * (b / x).powf(a) * (1.0 + a * (b / x).ln()) / x,
        1 => big_a * a * a * (b / x).powf(a - 1.0) / (x * x),
        2 => pareto_pdf(x, a, b),
        _ => unreachable!(),
    }
}

fn weibull_value(x: f64, p: &[f64]) -> f64 {
    let &[k, l, mu, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = (x - mu) / l;
    let z = y.powf(k);
    a * k / l * z / y * f64::exp(-z)
}

fn weibull_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[k, l, mu, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = (x - mu) / l;
    let z = y.powf(k);
    let e = f64::exp(-z);
    match index {
        0 => a / l * z / y * (k * y.ln() * (1.0 - z) + 1.0) * e,
        1 => a * k * k / (l * l) * z / y * (z - 1.0) * e,
        2 => a * k / (l * l) * z / (y * y) * (k * z + 1.0 - k) * e,
        3 => k / l * z / y * e,
        _ => unreachable!(),
    }
}

fn frechet_value(x: f64, p: &[f64]) -> f64 {
    let &[g, mu, s, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = (x - mu) / s;
    a * g / s * y.powf(-g - 1.0) * f64::exp(-y.powf(-g))
}

fn frechet_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[g, mu, s, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = (x - mu) / s;
    let e = f64::exp(-y.powf(-g));
    match index {
        0 => a / s * y.powf(-2.0 * g - 1.0) * (g * y.ln() * (1.0 - y.powf(g)) + y.powf(g)) * e,
        1 => a * g / (s * s) * y.powf(-g - 2.0) * (g + 1.0 - g * y.powf(-g)) * e,
        2 => a * (g / s) * (g / s) * y.powf(-2.0 * g - 1.0) * (y.powf(g) - 1.0) * e,
        3 => g / s * y.powf(-g - 1.0) * e,
        _ => unreachable!(),
    }
}

fn gumbel1_value(x: f64, p: &[f64]) -> f64 {
    let &[s, b, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    a / s * f64::exp(-y - b * f64::exp(-y))
}

fn gumbel1_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, b, mu, a] = p else { unreachable!() };
    let y = (x - mu) / s;
    let e = f64::exp(-y - b * f64::exp(-y));
    match index {
        0 => a / (s * s) * (y - 1.0 - y * b * f64::exp(-y)) * e,
        1 => -a / s * f64::exp(-y) * e,
        2 => a / (s * s) * (1.0 - b * f64::exp(-y)) * e,
        3 => e / s,
        _ => unreachable!(),
    }
}

fn gumbel2_value(x: f64, p: &[f64]) -> f64 {
    let &[a, b, mu, big_a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    big_a * gumbel2_pdf(x - mu, a, b)
}

fn gumbel2_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, b, mu, big_a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = x - mu;
    let ebf = f64::exp(-b * y.powf(-a));
    match index {
        0 => big_a * ebf * b * y.powf(-1.0 - 2.0 * a) * (y.powf(a) - a * (y.powf(a) - b) * y.ln()),
        1 => big_a * ebf * a * y.powf(-1.0 - 2.0 * a) * (y.powf(a) - b),
        2 => big_a * ebf * a * b * y.powf(-2.0 * (a + 1.0)) * ((1.0 + a) * y.powf(a) - a * b),
        3 => gumbel2_pdf(y, a, b),
        _ => unreachable!(),
    }
}

fn poisson_value(x: f64, p: &[f64]) -> f64 {
    let &[l, a] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    a * l.powf(x) / gamma(x + 1.0) * f64::exp(-l)
}

fn poisson_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[l, a] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    let norm = l.powf(x) / gamma(x + 1.0);
    let e = f64::exp(-l);
    match index {
        0 => a / l * norm * (x - l) * e,
        1 => norm * e,
        _ => unreachable!(),
    }
}

fn binomial_value(x: f64, p: &[f64]) -> f64 {
    let &[prob, n, big_a] = p else { unreachable!() };
    let k = x.round();
    if k < 0.0 || k > n || n < 0.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    big_a * binomial_pmf(k, prob, n)
}

fn binomial_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[prob, n, big_a] = p else { unreachable!() };
    let k = x.round();
    if k < 0.0 || k > n || n < 0.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    let c = choose(n, k);
    match index {
        0 => big_a * c * prob.powf(k - 1.0) * (1.0 - prob).powf(n - k - 1.0) * (k - n * prob),
        1 => {
            big_a
                * binomial_pmf(k, prob, n)
                * ((1.0 - prob).ln() + digamma(n + 1.0) - digamma(n - k + 1.0))
        }
        2 => binomial_pmf(k, prob, n),
        _ => unreachable!(),
    }
}

fn negative_binomial_value(x: f64, p: &[f64]) -> f64 {
    let &[prob, n, big_a] = p else { unreachable!() };
    if x < 0.0 || n <= 0.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    big_a * negative_binomial_pmf(x, prob, n)
}

fn negative_binomial_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[prob, n, big_a] = p else { unreachable!() };
    if x < 0.0 || n <= 0.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    let k = x;
    let norm = f64::exp(ln_gamma(n + k) - ln_gamma(k + 1.0) - ln_gamma(n));
    match index {
        0 => {
            -big_a
                * norm
                * prob.powf(n - 1.0)
                * (1.0 - prob).powf(k - 1.0)
                * (n * (prob - 1.0) + k * prob)
        }
        1 => {
            big_a
                * negative_binomial_pmf(k, prob, n)
                * (prob.ln() - digamma(n) + digamma(n + k))
        }
        2 => negative_binomial_pmf(k, prob, n),
        _ => unreachable!(),
    }
}

fn pascal_value(x: f64, p: &[f64]) -> f64 {
    negative_binomial_value(x, &[p[0], p[1].round(), p[2]])
}

fn pascal_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    negative_binomial_partial(index, x, &[p[0], p[1].round(), p[2]])
}

fn geometric_value(x: f64, p: &[f64]) -> f64 {
    let &[prob, a] = p else { unreachable!() };
    let k = x.round();
    if k < 1.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    a * geometric_pmf(k, prob)
}

fn geometric_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[prob, a] = p else { unreachable!() };
    let k = x.round();
    if k < 1.0 || !(0.0..=1.0).contains(&prob) {
        return 0.0;
    }
    match index {
        0 => a * (1.0 - prob).powf(k - 2.0) * (1.0 - k * prob),
        1 => geometric_pmf(k, prob),
        _ => unreachable!(),
    }
}

fn hypergeometric_value(x: f64, p: &[f64]) -> f64 {
    let &[n1, n2, t, a] = p else { unreachable!() };
    let k = x.round();
    if t > n1 + n2 || k < 0.0 || k > t || k > n1 || t - k > n2 {
        return 0.0;
    }
    a * hypergeometric_pmf(k, n1, n2, t)
}

fn hypergeometric_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[n1, n2, t, a] = p else { unreachable!() };
    let k = x.round();
    if t > n1 + n2 || k < 0.0 || k > t || k > n1 || t - k > n2 {
        return 0.0;
    }
    let pmf = hypergeometric_pmf(k, n1, n2, t);
    match index {
        0 => {
            a * pmf
                * (digamma(n1 + 1.0) - digamma(n1 - k + 1.0) - digamma(n1 + n2 + 1.0)
                    + digamma(n1 + n2 - t + 1.0))
        }
        1 => {
            a * pmf
                * (digamma(n2 + 1.0) - digamma(n2 + k - t + 1.0) - digamma(n1 + n2 + 1.0)
                    + digamma(n1 + n2 - t + 1.0))
        }
        2 => {
            a * pmf
                * (digamma(n2 + k - t + 1.0) - digamma(n1 + n2 - t + 1.0) - digamma(t - k + 1.0)
                    + digamma(t + 1.0))
        }
        3 => pmf,
        _ => unreachable!(),
    }
}

fn logarithmic_value(x: f64, p: &[f64]) -> f64 {
    let &[prob, a] = p else { unreachable!() };
    let k = x.round();
    if k < 1.0 || prob <= 0.0 || prob >= 1.0 {
        return 0.0;
    }
    a * logarithmic_pmf(k, prob)
}

fn logarithmic_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[prob, a] = p else { unreachable!() };
    let k = x.round();
    if k < 1.0 || prob <= 0.0 || prob >= 1.0 {
        return 0.0;
    }
    let pmf = logarithmic_pmf(k, prob);
    match index {
        0 => a * pmf * (k / prob + 1.0 / ((1.0 - prob) * f64::ln_1p(-prob))),
        1 => pmf,
        _ => unreachable!(),
    }
}

fn maxwell_value(x: f64, p: &[f64]) -> f64 {
    let &[a, c] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    c * (2.0 / PI).sqrt() * x * x / (a * a * a) * f64::exp(-x * x / (2.0 * a * a))
}

fn maxwell_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[a, c] = p else { unreachable!() };
    if x < 0.0 {
        return 0.0;
    }
    let norm = (2.0 / PI).sqrt() / (a * a * a);
    let e = f64::exp(-x * x / (2.0 * a * a));
    match index {
        0 => c * norm * x * x * (x * x - 3.0 * a * a) / (a * a * a) * e,
        1 => norm * x * x * e,
        _ => unreachable!(),
    }
}

fn sech_dist_value(x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = PI / 2.0 * (x - mu) / s;
    a / (2.0 * s) * sech(y)
}

fn sech_dist_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[s, mu, a] = p else { unreachable!() };
    let y = PI / 2.0 * (x - mu) / s;
    match index {
        0 => a / (2.0 * s * s) * sech(y) * (y * y.tanh() - 1.0),
        1 => a * PI / (4.0 * s * s) * sech(y) * y.tanh(),
        2 => sech(y) / (2.0 * s),
        _ => unreachable!(),
    }
}

fn levy_value(x: f64, p: &[f64]) -> f64 {
    let &[g, mu, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = x - mu;
    a * (g / TAU).sqrt() / y.powf(1.5) * f64::exp(-g / (2.0 * y))
}

fn levy_partial(index: usize, x: f64, p: &[f64]) -> f64 {
    let &[g, mu, a] = p else { unreachable!() };
    if x <= mu {
        return 0.0;
    }
    let y = x - mu;
    let norm = (g / TAU).sqrt() / y.powf(1.5);
    let e = f64::exp(-g / (2.0 * y));
    match index {
        0 => a / 2.0 * norm / (g * y) * (y - g) * e,
        1 => a / 2.0 * norm / (y * y) * (3.0 * y - g) * e,
        2 => norm * e,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelId;
    use crate::tests::{check_jacobian, check_truncated, fixtures};

    use approx::assert_relative_eq;

    #[test]
    fn jacobian_matches_central_differences() {
        for fixture in fixtures()
            .into_iter()
            .filter(|f| matches!(f.model, ModelId::Distribution(_)))
        {
            check_jacobian(&fixture);
        }
    }

    #[test]
    fn exponential_is_zero_below_location() {
        // location parameter mu = 0.3 truncates everything to its left
        check_truncated(DistributionModel::Exponential.into(), 0.0, &[1.1, 0.3, 1.7]);
        check_truncated(
            DistributionModel::Exponential.into(),
            0.299,
            &[5.0, 0.3, -2.0],
        );
    }

    #[test]
    fn truncated_distributions_are_zero_outside_support() {
        check_truncated(
            DistributionModel::GaussianTail.into(),
            0.4,
            &[1.0, 0.2, 2.0, 0.5],
        );
        check_truncated(DistributionModel::Rayleigh.into(), -0.1, &[0.9, 1.5]);
        check_truncated(DistributionModel::RayleighTail.into(), 0.4, &[0.8, 0.5, 1.2]);
        check_truncated(DistributionModel::Levy.into(), 0.3, &[0.9, 0.3, 1.5]);
        check_truncated(DistributionModel::Gamma.into(), -1.0, &[0.9, 2.2, 1.6]);
        check_truncated(DistributionModel::Flat.into(), 1.5, &[-0.4, 1.2, 1.5]);
        check_truncated(DistributionModel::LogNormal.into(), -0.5, &[0.7, 0.2, 1.8]);
        check_truncated(DistributionModel::Beta.into(), 1.2, &[2.5, 3.5, 1.3]);
        check_truncated(DistributionModel::Pareto.into(), 1.0, &[2.5, 1.1, 1.4]);
        check_truncated(
            DistributionModel::Weibull.into(),
            0.3,
            &[1.8, 1.2, 0.3, 1.5],
        );
        check_truncated(
            DistributionModel::Frechet.into(),
            0.2,
            &[2.2, 0.4, 1.1, 1.3],
        );
        check_truncated(
            DistributionModel::Gumbel2.into(),
            0.5,
            &[2.1, 1.4, 0.5, 1.2],
        );
        check_truncated(DistributionModel::Maxwell.into(), -0.2, &[0.9, 1.5]);
        check_truncated(DistributionModel::Poisson.into(), -1.0, &[2.4, 1.5]);
        check_truncated(DistributionModel::Geometric.into(), 0.0, &[0.35, 1.4]);
    }

    #[test]
    fn landau_amplitude_derivative_is_the_density() {
        let model = ModelId::from(DistributionModel::Landau);
        let x = 0.7;
        assert_relative_eq!(
            model.derivative(0, x, &[1.4], 1.0).unwrap(),
            landau_pdf(x),
            max_relative = 1e-12,
        );
        assert_relative_eq!(
            model.evaluate(x, &[1.4]).unwrap(),
            1.4 * landau_pdf(x),
            max_relative = 1e-12,
        );
    }

    #[test]
    fn distribution_gaussian_matches_peak_gaussian() {
        let dist = ModelId::from(DistributionModel::Gaussian);
        let peak = ModelId::from(crate::models::PeakModel::Gaussian);
        let p = [1.2, 0.3, 2.0];
        let x = 0.7;
        assert_eq!(dist.evaluate(x, &p).unwrap(), peak.evaluate(x, &p).unwrap());
        for index in 0..3 {
            assert_eq!(
                dist.derivative(index, x, &p, 1.0).unwrap(),
                peak.derivative(index, x, &p, 1.0).unwrap(),
            );
        }
    }

    #[test]
    fn pascal_rounds_the_number_of_successes() {
        let pascal = ModelId::from(DistributionModel::Pascal);
        let negative_binomial = ModelId::from(DistributionModel::NegativeBinomial);
        let x = 4.0;
        assert_eq!(
            pascal.evaluate(x, &[0.45, 6.4, 1.3]).unwrap(),
            negative_binomial.evaluate(x, &[0.45, 6.0, 1.3]).unwrap(),
        );
    }

    #[test]
    fn flat_value_is_the_inverse_width() {
        let model = ModelId::from(DistributionModel::Flat);
        let p = [-0.4, 1.2, 1.5];
        assert_relative_eq!(
            model.evaluate(0.5, &p).unwrap(),
            1.5 / 1.6,
            max_relative = 1e-12,
        );
    }
}
