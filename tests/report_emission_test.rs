use scene_differ::{Differ, DifferConfig, LogSink, Tolerance, WriterSink};

use crate::common::test_utils::{init_logger, scene_of, segment};

mod common;

fn differ_with_two_diffs() -> Differ {
    let expected = scene_of([
        segment("a", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        segment("b", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
    ]);
    let actual = scene_of([segment("a", [0.0, 0.0, 0.0], [1.0, 0.5, 0.0])]);
    let mut differ = Differ::new();
    differ.compare_scenes(Some(&expected), Some(&actual));
    differ
}

#[test]
fn should_write_entries_in_traversal_order_with_blank_terminator() {
    init_logger();
    let differ = differ_with_two_diffs();
    let mut sink = WriterSink::new(Vec::new());
    differ.emit_report(&mut sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        text,
        "Number of meshes not equal ( expected: 2, found: 1 )\n\
         Vertex not equal at vertex 1 ( expected: (1, 0, 0), found: (1, 0.5, 0) )\n\
         \n"
    );
}

#[test]
fn should_keep_the_report_after_emitting() {
    init_logger();
    let differ = differ_with_two_diffs();
    let mut first: Vec<String> = Vec::new();
    let mut second: Vec<String> = Vec::new();
    differ.emit_report(&mut first).unwrap();
    differ.emit_report(&mut second).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(differ.report().len(), 2);

    let kept: Vec<&String> = differ.report().iter().collect();
    assert_eq!(kept, first.iter().collect::<Vec<_>>());
    for (entry, emitted) in differ.report().into_iter().zip(&second) {
        assert_eq!(entry, emitted);
    }
}

#[test]
fn should_emit_through_log_and_stderr_without_failing() {
    init_logger();
    let differ = differ_with_two_diffs();
    differ.emit_report(&mut LogSink::default()).unwrap();
    differ.show_report();
    Differ::new().show_report();
}

#[test]
fn should_build_a_differ_from_environment_style_config() {
    init_logger();
    let config = DifferConfig::from_lookup(|key| match key {
        "SCENE_DIFF_TOLERANCE" => Some("abs:0.75".to_string()),
        _ => None,
    })
    .unwrap();
    let differ = Differ::with_config(config);
    assert_eq!(differ.config().tolerance, Tolerance::Absolute(0.75));

    let expected = scene_of([segment("a", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0])]);
    let actual = scene_of([segment("a", [0.0, 0.0, 0.0], [1.0, 0.5, 0.0])]);
    let mut differ = differ;
    assert!(differ.compare_scenes(Some(&expected), Some(&actual)));
}
