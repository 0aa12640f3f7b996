//! Structural comparison of two scenes.
//!
//! The [`Differ`] walks an expected and an actual scene side by side (scene,
//! then mesh by mesh, then attribute by attribute) and records a human readable
//! message for every mismatch it finds. Messages are accumulated in traversal
//! order, so the resulting [`Report`] is stable across runs.
//!
//! # Comparison rules
//!
//! - Scene level problems never stop the traversal. If the mesh counts differ
//!   the overlapping mesh slots are still compared pairwise.
//! - Inside a mesh some mismatches are fatal. A different vertex count, or an
//!   attribute that is present on one side only, ends the comparison of that
//!   mesh pair because the remaining arrays can't be lined up.
//! - Per-vertex arrays are always scanned to the end so every mismatching vertex
//!   is reported; only then does a mismatch stop the comparison of later
//!   attributes.
//!
//! # Return values
//!
//! `compare_scenes` and `compare_meshes` return `true` iff the call added no
//! entry to the report. Entries recorded by earlier calls don't affect the
//! result, use [`Differ::has_diffs`] for the accumulated state.

use std::fmt::Display;

use crate::{
    config::DifferConfig,
    data_structures::{
        mesh::{Color4, MAX_COLOR_SETS, MAX_TEXTURE_COORDS, Mesh, Vec3},
        scene::Scene,
    },
    report::{Report, ReportSink, WriterSink},
};

/// Outcome of a single pipeline stage of the mesh comparison.
enum Stage {
    Continue,
    Abort,
}

#[derive(Debug, Default)]
pub struct Differ {
    config: DifferConfig,
    report: Report,
}

impl Differ {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DifferConfig) -> Self {
        Self {
            config,
            report: Report::new(),
        }
    }

    pub fn config(&self) -> &DifferConfig {
        &self.config
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn has_diffs(&self) -> bool {
        !self.report.is_empty()
    }

    /// Record a diff message. Empty messages are ignored.
    pub fn add_diff(&mut self, diff: impl Into<String>) {
        self.report.push(diff);
    }

    /// Drop every recorded message.
    pub fn reset(&mut self) {
        self.report.clear();
    }

    /// Hand the recorded messages to `sink`. The report is kept.
    pub fn emit_report(&self, sink: &mut dyn ReportSink) -> anyhow::Result<()> {
        self.report.emit(sink)
    }

    /// Print the report to stderr. Write failures are logged, not returned.
    pub fn show_report(&self) {
        let mut sink = WriterSink::new(std::io::stderr().lock());
        if let Err(e) = self.emit_report(&mut sink) {
            log::error!("Could not print diff report: {e:#}");
        }
    }

    pub fn compare_scenes(&mut self, expected: Option<&Scene>, actual: Option<&Scene>) -> bool {
        let before = self.report.len();
        let (expected, actual) = match (expected, actual) {
            (None, None) => return true,
            (Some(e), Some(a)) if std::ptr::eq(e, a) => return true,
            (Some(_), None) => {
                log::warn!("Actual scene is missing");
                self.add_diff("Scene not equal ( expected: present, found: absent )");
                return false;
            }
            (None, Some(_)) => {
                log::warn!("Expected scene is missing");
                self.add_diff("Scene not equal ( expected: absent, found: present )");
                return false;
            }
            (Some(e), Some(a)) => (e, a),
        };

        if expected.num_meshes() != actual.num_meshes() {
            self.add_diff(not_equal(
                "Number of meshes",
                expected.num_meshes(),
                actual.num_meshes(),
            ));
        }

        let shared = expected.num_meshes().min(actual.num_meshes());
        for i in 0..shared {
            log::debug!("Comparing mesh {} of {}", i + 1, shared);
            self.compare_meshes(expected.mesh(i), actual.mesh(i));
        }

        self.report.len() == before
    }

    pub fn compare_meshes(&mut self, expected: Option<&Mesh>, actual: Option<&Mesh>) -> bool {
        let before = self.report.len();
        match (expected, actual) {
            (None, None) => true,
            (Some(e), Some(a)) if std::ptr::eq(e, a) => true,
            (Some(e), None) => {
                log::warn!("Mesh {} is missing from the actual scene", e.name);
                self.add_diff(format!(
                    "Mesh not equal ( expected: {}, found: absent )",
                    e.name
                ));
                false
            }
            (None, Some(a)) => {
                log::warn!("Mesh {} is not part of the expected scene", a.name);
                self.add_diff(format!(
                    "Mesh not equal ( expected: absent, found: {} )",
                    a.name
                ));
                false
            }
            (Some(e), Some(a)) => {
                if let Stage::Abort = self.compare_mesh_contents(e, a) {
                    log::debug!("Stopped comparing mesh {} early", e.name);
                }
                self.report.len() == before
            }
        }
    }

    fn compare_mesh_contents(&mut self, expected: &Mesh, actual: &Mesh) -> Stage {
        if expected.name != actual.name {
            self.add_diff(not_equal("Mesh name", &expected.name, &actual.name));
        }

        if expected.num_vertices != actual.num_vertices {
            self.add_diff(not_equal(
                "Number of vertices",
                expected.num_vertices,
                actual.num_vertices,
            ));
            return Stage::Abort;
        }

        let tolerance = self.config.tolerance;
        let vectors = |e: &Vec3, a: &Vec3| tolerance.vectors_match(e, a);
        let colors = |e: &Color4, a: &Color4| tolerance.colors_match(e, a);

        if let Stage::Abort = self.compare_attribute(
            "Vertex",
            "Vertices",
            expected.positions.as_deref(),
            actual.positions.as_deref(),
            vectors,
        ) {
            return Stage::Abort;
        }

        if let Stage::Abort = self.compare_attribute(
            "Normal",
            "Normals",
            expected.normals.as_deref(),
            actual.normals.as_deref(),
            vectors,
        ) {
            return Stage::Abort;
        }

        self.check_channel_limit("Vertex colors", MAX_COLOR_SETS, &expected.colors, &actual.colors);
        self.check_channel_limit(
            "Texture coords",
            MAX_TEXTURE_COORDS,
            &expected.texture_coords,
            &actual.texture_coords,
        );

        for channel in 0..self.config.color_channels.min(MAX_COLOR_SETS) {
            if let Stage::Abort = self.compare_attribute(
                &format!("Vertex color in channel {channel}"),
                &format!("Vertex colors in channel {channel}"),
                expected.color_channel(channel),
                actual.color_channel(channel),
                colors,
            ) {
                return Stage::Abort;
            }
        }

        for channel in 0..self.config.texture_coord_channels.min(MAX_TEXTURE_COORDS) {
            if let Stage::Abort = self.compare_attribute(
                &format!("Texture coords in channel {channel}"),
                &format!("Texture coords in channel {channel}"),
                expected.texture_coord_channel(channel),
                actual.texture_coord_channel(channel),
                vectors,
            ) {
                return Stage::Abort;
            }
        }

        self.compare_tangent_frames(expected, actual)
    }

    /// Populated slots at or past `limit` are never compared, so each one is recorded.
    fn check_channel_limit<T>(
        &mut self,
        attribute: &str,
        limit: usize,
        expected: &[Option<Vec<T>>],
        actual: &[Option<Vec<T>>],
    ) {
        for (side, slots) in [("expected", expected), ("compared", actual)] {
            let populated = slots.iter().enumerate().skip(limit).filter(|(_, slot)| slot.is_some());
            for (channel, _) in populated {
                self.add_diff(format!(
                    "{attribute} in channel {channel} of the {side} mesh exceed the limit of {limit} channels"
                ));
            }
        }
    }

    /**
     * Presence check followed by a full per-vertex scan.
     *
     * A presence mismatch aborts right away. Otherwise every vertex is compared
     * and each mismatch is recorded before the stage reports an abort.
     */
    fn compare_attribute<T: Display>(
        &mut self,
        element: &str,
        attribute: &str,
        expected: Option<&[T]>,
        actual: Option<&[T]>,
        same: impl Fn(&T, &T) -> bool,
    ) -> Stage {
        match (expected, actual) {
            (None, None) => Stage::Continue,
            (Some(_), None) | (None, Some(_)) => {
                self.add_diff(presence_not_equal(attribute, expected.is_some()));
                Stage::Abort
            }
            (Some(expected), Some(actual)) => {
                let mut equal = true;
                for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
                    if !same(e, a) {
                        self.add_diff(vertex_not_equal(element, i, e, a));
                        equal = false;
                    }
                }
                if equal { Stage::Continue } else { Stage::Abort }
            }
        }
    }

    /// Tangents and bitangents share one presence flag and one scan.
    fn compare_tangent_frames(&mut self, expected: &Mesh, actual: &Mesh) -> Stage {
        let has_frames = expected.has_tangents_and_bitangents();
        if has_frames != actual.has_tangents_and_bitangents() {
            self.add_diff(presence_not_equal("Tangents and bitangents", has_frames));
            return Stage::Abort;
        }
        let (
            Some(exp_tangents),
            Some(exp_bitangents),
            Some(act_tangents),
            Some(act_bitangents),
        ) = (
            expected.tangents.as_deref(),
            expected.bitangents.as_deref(),
            actual.tangents.as_deref(),
            actual.bitangents.as_deref(),
        )
        else {
            return Stage::Continue;
        };

        let tolerance = self.config.tolerance;
        let mut equal = true;
        let expected_frames = exp_tangents.iter().zip(exp_bitangents);
        let actual_frames = act_tangents.iter().zip(act_bitangents);
        for (i, ((exp_t, exp_b), (act_t, act_b))) in expected_frames.zip(actual_frames).enumerate() {
            if !tolerance.vectors_match(exp_t, act_t) {
                self.add_diff(vertex_not_equal("Tangent", i, exp_t, act_t));
                equal = false;
            }
            if !tolerance.vectors_match(exp_b, act_b) {
                self.add_diff(vertex_not_equal("Bitangent", i, exp_b, act_b));
                equal = false;
            }
        }
        if equal { Stage::Continue } else { Stage::Abort }
    }
}

fn not_equal(what: &str, expected: impl Display, actual: impl Display) -> String {
    format!("{what} not equal ( expected: {expected}, found: {actual} )")
}

fn presence_not_equal(attribute: &str, expected_present: bool) -> String {
    if expected_present {
        format!("{attribute} expected, but the compared mesh has none")
    } else {
        format!("{attribute} not expected, but the compared mesh has some")
    }
}

fn vertex_not_equal(element: &str, index: usize, expected: impl Display, actual: impl Display) -> String {
    format!("{element} not equal at vertex {index} ( expected: {expected}, found: {actual} )")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_helpers() {
        assert_eq!(
            not_equal("Number of meshes", 1, 2),
            "Number of meshes not equal ( expected: 1, found: 2 )"
        );
        assert_eq!(
            vertex_not_equal("Vertex", 1, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)),
            "Vertex not equal at vertex 1 ( expected: (1, 0, 0), found: (1, 0, 1) )"
        );
        assert_eq!(
            presence_not_equal("Normals", true),
            "Normals expected, but the compared mesh has none"
        );
    }

    #[test]
    fn empty_diffs_are_ignored() {
        let mut differ = Differ::new();
        differ.add_diff("");
        assert!(!differ.has_diffs());
        differ.add_diff("something");
        assert_eq!(differ.report().len(), 1);
    }
}
