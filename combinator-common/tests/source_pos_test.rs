use combinator_common::{PositionConfig, SourcePosition, TabWidth};

#[test]
fn test_rendered_form() {
    let pos = SourcePosition::at("lib.src", 12, 4);
    assert_eq!(pos.to_string(), "lib.src:12:4");
}

#[test]
fn test_tab_then_char_columns() {
    let width = TabWidth::new(4).unwrap();
    let mut pos = SourcePosition::default();
    pos.step(); // 'a'
    assert_eq!(pos.column, 2);
    pos.tab(width);
    assert_eq!(pos.column, 5);
    pos.step(); // 'b'
    assert_eq!(pos.column, 6);
}

#[test]
fn test_start_position_uses_source_name() {
    let config = PositionConfig::new("stdin");
    assert_eq!(config.start_position(), SourcePosition::new("stdin"));
}
