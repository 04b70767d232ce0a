use combinator_framework::{
    ArrayChunk, ArrayStream, ErrorItem, ParseError, PositionConfig, State, Stream,
};
use pretty_assertions::assert_eq;

type CharStream = ArrayStream<char>;
type CharState = State<CharStream, String>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn state(name: &str, text: &str) -> CharState {
    State::new(ArrayChunk::from(text), &PositionConfig::new(name))
}

fn label(s: &str) -> ErrorItem<char> {
    ErrorItem::label(s).unwrap()
}

#[test]
fn test_alternatives_merge_expected_labels() {
    init_tracing();
    let stream = CharStream::natural();
    let s0 = state("demo", "0x");

    let letter = s0
        .satisfy(&stream, |c: &char| c.is_alphabetic(), [label("letter")])
        .unwrap_err();
    assert_eq!(
        letter,
        ParseError::trivial(0, Some(ErrorItem::token('0')), [label("letter")])
    );

    let underscore = s0
        .satisfy(&stream, |c: &char| *c == '_', [label("underscore")])
        .unwrap_err();
    let merged = letter.merge(underscore);
    assert_eq!(
        merged,
        ParseError::trivial(
            0,
            Some(ErrorItem::token('0')),
            [label("letter"), label("underscore")]
        )
    );

    assert_eq!(
        s0.render_error(&stream, &merged),
        "demo:1:1:\n  |\n1 | 0x\n  | ^\nunexpected '0'\nexpecting letter or underscore"
    );
}

#[test]
fn test_success_threads_new_state() {
    let stream = CharStream::natural();
    let s0 = state("demo", "12ab");
    let (digits, s1) = s0.take_while(&stream, |c| c.is_ascii_digit());
    assert_eq!(digits, ['1', '2']);
    assert_eq!(s1.offset(), 2);
    let (ch, s2) = s1
        .satisfy(&stream, |c: &char| c.is_alphabetic(), [label("letter")])
        .unwrap();
    assert_eq!(ch, 'a');
    assert_eq!(s2.offset(), 3);
    // the parent states are untouched
    assert_eq!(s0.offset(), 0);
    assert_eq!(s1.offset(), 2);
    assert_eq!(s0.input(), &ArrayChunk::from("12ab"));
}

#[test]
fn test_failure_does_not_advance() {
    let stream = CharStream::natural();
    let s0 = state("demo", "x");
    let (_, s1) = s0.take1(&stream).unwrap();
    let err = s1
        .satisfy(&stream, |_: &char| true, [label("anything")])
        .unwrap_err();
    assert_eq!(err.offset(), 1);
    assert_eq!(
        err,
        ParseError::trivial(1, Some(ErrorItem::EndOfInput), [label("anything")])
    );
    assert!(s1.take_n(&stream, 2).is_none());
    let (nothing, same) = s1.take_n(&stream, 0).unwrap();
    assert!(nothing.is_empty());
    assert_eq!(same, s1);
}

#[test]
fn test_deferred_errors_and_backtracking() {
    init_tracing();
    let stream = CharStream::natural();
    let parent = state("demo", "abc");
    let (_, branch) = parent.take_n(&stream, 2).unwrap();
    let branch = branch
        .defer_error(ParseError::fail(1, "first"))
        .defer_error(ParseError::fail(2, "second"));

    let newest_first: Vec<usize> = branch.errors().map(ParseError::offset).collect();
    assert_eq!(newest_first, vec![2, 1]);
    assert_eq!(branch.merged_errors(), Some(ParseError::fail(2, "second")));

    // backtracking is just going back to the parent value
    assert_eq!(parent.error_count(), 0);
    assert_eq!(parent.merged_errors(), None);
}

#[test]
fn test_source_position_of_offset() {
    let stream = CharStream::natural();
    let s = state("lib.src", "one\n\ttwo\n");
    assert_eq!(s.source_position(&stream, 0).to_string(), "lib.src:1:1");
    assert_eq!(s.source_position(&stream, 5).to_string(), "lib.src:2:9");
}

#[test]
fn test_render_after_sync_and_tabs() {
    let stream = CharStream::natural();
    let config = PositionConfig::new("tabs").with_tab_width(4).unwrap();
    let s0: CharState = State::new(ArrayChunk::from("\tx = ?"), &config);
    let (_, s1) = s0.take_n(&stream, 5).unwrap();
    let s1 = s1.sync_position(&stream);
    assert_eq!(s1.position().offset, 5);

    let err = ParseError::trivial(5, Some(ErrorItem::token('?')), [label("expression")]);
    assert_eq!(
        s1.render_error(&stream, &err),
        "tabs:1:9:\n  |\n1 |     x = ?\n  |         ^\nunexpected '?'\nexpecting expression"
    );
}

#[test]
fn test_render_errors_in_offset_order() {
    let stream = CharStream::natural();
    let s = state("demo", "ab\ncd")
        .defer_error(ParseError::fail(3, "late"))
        .defer_error(ParseError::fail(0, "early"))
        .defer_error(ParseError::fail(3, "late again"));
    let rendered = s.render_errors(&stream);
    assert_eq!(rendered.len(), 3);
    assert!(rendered[0].starts_with("demo:1:1:"));
    assert!(rendered[0].ends_with("early"));
    assert!(rendered[1].starts_with("demo:2:1:"));
    assert!(rendered[1].ends_with("late"));
    assert!(rendered[2].starts_with("demo:2:1:"));
    assert!(rendered[2].ends_with("late again"));
}

#[test]
fn test_positions_behind_sync_point_are_replayed() {
    let stream = CharStream::natural();
    let fresh = state("f", "ab\ncd\nef");
    let s1 = fresh.defer_error(ParseError::fail(1, "early"));
    let (_, s2) = s1.take_n(&stream, 7).unwrap();
    let s2 = s2.sync_position(&stream);
    assert_eq!(s2.position().offset, 7);

    assert_eq!(
        s2.source_position(&stream, 1),
        fresh.source_position(&stream, 1)
    );
    assert_eq!(s2.source_position(&stream, 1).to_string(), "f:1:2");
    assert_eq!(s2.source_position(&stream, 7).to_string(), "f:3:2");

    let deferred = s2.errors().next().unwrap();
    assert_eq!(
        s2.render_error(&stream, deferred),
        "f:1:2:\n  |\n1 | ab\n  |  ^\nearly"
    );
    assert_eq!(s2.render_errors(&stream), vec!["f:1:2:\n  |\n1 | ab\n  |  ^\nearly"]);
}

#[test]
fn test_render_with_configured_line_prefix() {
    let stream = CharStream::natural();
    let config = PositionConfig::new("demo")
        .with_tab_width(4)
        .unwrap()
        .with_line_prefix("> ");

    let s: CharState = State::new(ArrayChunk::from("0x"), &config);
    let err = ParseError::trivial(0, Some(ErrorItem::token('0')), [label("letter")]);
    assert_eq!(
        s.render_error(&stream, &err),
        "demo:1:1:\n  |\n1 | > 0x\n  |   ^\nunexpected '0'\nexpecting letter"
    );

    let s: CharState = State::new(ArrayChunk::from("\tx"), &config);
    let err = ParseError::trivial(1, Some(ErrorItem::token('x')), [label("digit")]);
    assert_eq!(
        s.render_error(&stream, &err),
        "demo:1:5:\n  |\n1 | >     x\n  |       ^\nunexpected 'x'\nexpecting digit"
    );

    // the prefix belongs to the first line only
    let s: CharState = State::new(ArrayChunk::from("a\nbc"), &config);
    let err = ParseError::fail(3, "bad");
    assert_eq!(
        s.render_error(&stream, &err),
        "demo:2:2:\n  |\n2 | bc\n  |  ^\nbad"
    );
}

#[test]
fn test_advance_by_after_external_split() {
    let stream = CharStream::natural();
    let s0 = state("demo", "let x");
    let (keyword, rest) = stream.take_while(|c| c.is_alphabetic(), s0.input());
    let s1 = s0.advance_by(stream.chunk_length(&keyword), rest);
    assert_eq!(keyword, ['l', 'e', 't']);
    assert_eq!(s1.offset(), 3);
    assert_eq!(s1.input(), &ArrayChunk::from(" x"));
    assert_eq!(s1.source_position(&stream, s1.offset()).to_string(), "demo:1:4");
    assert_eq!(s0.offset(), 0);
}
