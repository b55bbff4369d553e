use crate::common::fixtures::TestFixture;
use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

fn open_long(lines: usize) -> (TestFixture, EditorTestHarness) {
    let fixture = TestFixture::numbered_lines("long.txt", lines).unwrap();
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&fixture.path).unwrap();
    (fixture, harness)
}

/// Moving below the window scrolls one row at a time
#[test]
fn test_scroll_down_one_row() {
    let (_fixture, mut harness) = open_long(100);
    for _ in 0..22 {
        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }

    assert_eq!(harness.cursor_position(), (0, 22));
    assert_eq!(harness.screen_row(0), "line 1");
    assert_eq!(harness.screen_row(21), "line 22");
    assert_eq!(harness.screen_cursor_position(), (0, 21));
}

/// Page Down / Page Up move a screenful
#[test]
fn test_page_down_and_up() {
    let (_fixture, mut harness) = open_long(100);

    harness
        .send_key(KeyCode::PageDown, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(harness.cursor_position().1, 43);
    assert_eq!(harness.screen_row(0), "line 22");

    harness.send_key(KeyCode::PageUp, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position().1, 0);
    assert_eq!(harness.screen_row(0), "line 0");
}

/// The cursor can sit one row past the end, but no further
#[test]
fn test_cursor_stops_past_last_row() {
    let (_fixture, mut harness) = open_long(3);
    for _ in 0..10 {
        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }
    assert_eq!(harness.cursor_position(), (0, 3));
    assert!(harness.screen_row(22).ends_with("no ft | 4/3"));
}

/// Long lines scroll horizontally by rendered column
#[test]
fn test_horizontal_scroll() {
    let mut harness = EditorTestHarness::new(20, 10).unwrap();
    harness.type_text("\t\tabcdefghij").unwrap();

    // Two tabs plus 10 letters put the cursor at rendered column 26
    assert_eq!(harness.screen_row(0), format!("{}abcdefghij", " ".repeat(9)));
    assert_eq!(harness.screen_cursor_position(), (19, 0));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.screen_cursor_position(), (0, 0));
    assert_eq!(harness.screen_row(0), format!("{}abcd", " ".repeat(16)));
}

/// Vertical movement clamps the column to the shorter row
#[test]
fn test_column_snaps_to_row_end() {
    let fixture = TestFixture::new("snap.txt", "a long line\nab\n").unwrap();
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&fixture.path).unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), (2, 1));
}

/// Resizing the terminal keeps the cursor on screen
#[test]
fn test_resize_keeps_cursor_visible() {
    let (_fixture, mut harness) = open_long(100);
    for _ in 0..20 {
        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }
    harness.resize(80, 12).unwrap();

    assert_eq!(harness.editor().screen_rows(), 10);
    assert_eq!(harness.screen_row(0), "line 11");
    assert_eq!(harness.screen_cursor_position(), (0, 9));
    assert!(harness.screen_row(10).contains(" - 100 lines"));
}
