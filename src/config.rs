//! Differ configuration.
//!
//! The defaults reproduce the strict behaviour: exact float equality and every
//! channel slot a mesh can carry. Test harnesses comparing lossy round trips
//! can loosen the tolerance either in code or through the environment.

use std::env;

use anyhow::{Context, bail};

use crate::{
    data_structures::mesh::{MAX_COLOR_SETS, MAX_TEXTURE_COORDS},
    tolerance::Tolerance,
};

pub const TOLERANCE_VAR: &str = "SCENE_DIFF_TOLERANCE";
pub const COLOR_CHANNELS_VAR: &str = "SCENE_DIFF_COLOR_CHANNELS";
pub const TEXCOORD_CHANNELS_VAR: &str = "SCENE_DIFF_TEXCOORD_CHANNELS";

#[derive(Clone, Debug, PartialEq)]
pub struct DifferConfig {
    /// Equality policy for positions, normals, colors, texture coordinates and tangents.
    pub tolerance: Tolerance,
    /// Number of vertex color slots checked per mesh, starting at slot 0. Capped at `MAX_COLOR_SETS`.
    pub color_channels: usize,
    /// Number of texture coordinate slots checked per mesh, starting at slot 0. Capped at `MAX_TEXTURE_COORDS`.
    pub texture_coord_channels: usize,
}

impl Default for DifferConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::Exact,
            color_channels: MAX_COLOR_SETS,
            texture_coord_channels: MAX_TEXTURE_COORDS,
        }
    }
}

impl DifferConfig {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Defaults overridden by the `SCENE_DIFF_*` environment variables that are set.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /**
     * Same as `from_env` but reads values through `lookup`, so callers (and tests)
     * don't have to touch the process environment.
     */
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(TOLERANCE_VAR) {
            config.tolerance = raw
                .parse()
                .with_context(|| format!("{TOLERANCE_VAR} is not a valid tolerance"))?;
        }
        if let Some(raw) = lookup(COLOR_CHANNELS_VAR) {
            config.color_channels = channel_count(COLOR_CHANNELS_VAR, &raw, MAX_COLOR_SETS)?;
        }
        if let Some(raw) = lookup(TEXCOORD_CHANNELS_VAR) {
            config.texture_coord_channels =
                channel_count(TEXCOORD_CHANNELS_VAR, &raw, MAX_TEXTURE_COORDS)?;
        }
        log::debug!(
            "differ config: tolerance={}, color channels={}, texture coord channels={}",
            config.tolerance,
            config.color_channels,
            config.texture_coord_channels
        );
        Ok(config)
    }
}

fn channel_count(var: &str, raw: &str, max: usize) -> anyhow::Result<usize> {
    let count: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{var} must be a channel count, got `{raw}`"))?;
    if count > max {
        bail!("{var} must be at most {max}, got {count}");
    }
    Ok(count)
}
