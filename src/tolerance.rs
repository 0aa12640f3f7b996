//! Floating point equality policy for geometry comparison.
//!
//! `Exact` reproduces plain `==` on every component and is the right choice when
//! both scenes went through the same code path. Data that went through a lossy
//! round trip (serialization, quantization) should use one of the approximate
//! policies, which delegate to the `approx` traits cgmath implements for its
//! vector types.

use std::{fmt, str::FromStr};

use anyhow::{Context, anyhow, bail};
use cgmath::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::data_structures::mesh::{Color4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Tolerance {
    /// Component-wise `==`.
    #[default]
    Exact,
    /// Byte-wise equality: identical NaNs match, `0.0` and `-0.0` don't.
    Bitwise,
    /// Every component differs by at most `epsilon`.
    Absolute(f32),
    Relative { epsilon: f32, max_relative: f32 },
    Ulps { epsilon: f32, max_ulps: u32 },
}

impl Tolerance {
    pub fn vectors_match(&self, expected: &Vec3, actual: &Vec3) -> bool {
        self.matches::<Vec3, cgmath::Vector3<f32>>(expected, actual)
    }

    pub fn colors_match(&self, expected: &Color4, actual: &Color4) -> bool {
        self.matches::<Color4, cgmath::Vector4<f32>>(expected, actual)
    }

    fn matches<P, V>(&self, expected: &P, actual: &P) -> bool
    where
        P: bytemuck::Pod + PartialEq + Into<V>,
        V: AbsDiffEq<Epsilon = f32> + RelativeEq + UlpsEq,
    {
        let approx = |expected: &P, actual: &P| -> (V, V) { ((*expected).into(), (*actual).into()) };
        match *self {
            Tolerance::Exact => expected == actual,
            Tolerance::Bitwise => bytemuck::bytes_of(expected) == bytemuck::bytes_of(actual),
            Tolerance::Absolute(epsilon) => {
                let (e, a) = approx(expected, actual);
                e.abs_diff_eq(&a, epsilon)
            }
            Tolerance::Relative {
                epsilon,
                max_relative,
            } => {
                let (e, a) = approx(expected, actual);
                e.relative_eq(&a, epsilon, max_relative)
            }
            Tolerance::Ulps { epsilon, max_ulps } => {
                let (e, a) = approx(expected, actual);
                e.ulps_eq(&a, epsilon, max_ulps)
            }
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Exact => write!(f, "exact"),
            Tolerance::Bitwise => write!(f, "bitwise"),
            Tolerance::Absolute(epsilon) => write!(f, "abs:{epsilon}"),
            Tolerance::Relative {
                epsilon,
                max_relative,
            } => write!(f, "rel:{epsilon}:{max_relative}"),
            Tolerance::Ulps { epsilon, max_ulps } => write!(f, "ulps:{epsilon}:{max_ulps}"),
        }
    }
}

/**
 * Parses the textual form used in configuration:
 *
 * `exact`, `bitwise`, `abs:<eps>`, `rel:<eps>:<max_relative>`, `ulps:<eps>:<max_ulps>`
 */
impl FromStr for Tolerance {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let kind = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();
        let float = |idx: usize| -> anyhow::Result<f32> {
            let raw = args
                .get(idx)
                .ok_or_else(|| anyhow!("tolerance `{s}` is missing argument {}", idx + 1))?;
            let value: f32 = raw
                .parse()
                .with_context(|| format!("invalid number `{raw}` in tolerance `{s}`"))?;
            if !value.is_finite() || value < 0.0 {
                bail!("tolerance `{s}` needs a finite, non-negative bound, got {value}");
            }
            Ok(value)
        };
        let expect_args = |n: usize| -> anyhow::Result<()> {
            if args.len() != n {
                bail!("tolerance `{s}` takes {n} argument(s), got {}", args.len());
            }
            Ok(())
        };

        match kind.as_str() {
            "exact" => {
                expect_args(0)?;
                Ok(Tolerance::Exact)
            }
            "bitwise" => {
                expect_args(0)?;
                Ok(Tolerance::Bitwise)
            }
            "abs" => {
                expect_args(1)?;
                Ok(Tolerance::Absolute(float(0)?))
            }
            "rel" => {
                expect_args(2)?;
                Ok(Tolerance::Relative {
                    epsilon: float(0)?,
                    max_relative: float(1)?,
                })
            }
            "ulps" => {
                expect_args(2)?;
                let max_ulps = args[1]
                    .parse()
                    .with_context(|| format!("invalid ulps count `{}` in tolerance `{s}`", args[1]))?;
                Ok(Tolerance::Ulps {
                    epsilon: float(0)?,
                    max_ulps,
                })
            }
            other => bail!("unknown tolerance kind `{other}`"),
        }
    }
}
