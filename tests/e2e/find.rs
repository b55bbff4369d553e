use crate::common::fixtures::TestFixture;
use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;

fn open_sample() -> (TestFixture, EditorTestHarness) {
    let fixture = TestFixture::new("notes.txt", "one\ntwo\nthree two\n").unwrap();
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&fixture.path).unwrap();
    (fixture, harness)
}

fn ctrl_f(harness: &mut EditorTestHarness) {
    harness
        .send_key(KeyCode::Char('f'), KeyModifiers::CONTROL)
        .unwrap();
}

/// Ctrl-F opens the search prompt in the message line
#[test]
fn test_find_prompt_shown() {
    let (_fixture, mut harness) = open_sample();
    ctrl_f(&mut harness);

    assert!(harness.editor().is_prompting());
    assert_eq!(harness.screen_row(23), "Search:  (ESC/Arrows/Enter)");

    harness.type_text("tw").unwrap();
    assert_eq!(harness.screen_row(23), "Search: tw (ESC/Arrows/Enter)");
}

/// Each keystroke searches again and the match scrolls to the top
#[test]
fn test_incremental_search() {
    let (_fixture, mut harness) = open_sample();
    ctrl_f(&mut harness);

    harness.type_text("two").unwrap();
    assert_eq!(harness.cursor_position(), (0, 1));
    assert_eq!(harness.screen_row(0), "two");
    assert_eq!(harness.screen_cursor_position(), (0, 0));

    // The match is painted with the match color
    let style = harness.get_cell_style(0, 0).unwrap();
    assert_eq!(style.fg, Some(Color::Blue));
}

/// Down/Right go to the next match, Up/Left to the previous, wrapping
#[test]
fn test_find_next_and_previous() {
    let (_fixture, mut harness) = open_sample();
    ctrl_f(&mut harness);
    harness.type_text("two").unwrap();

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), (6, 2));
    assert_eq!(harness.screen_row(0), "three two");
    assert_eq!(harness.get_cell_style(6, 0).unwrap().fg, Some(Color::Blue));
    assert_eq!(harness.get_cell_style(0, 0).unwrap().fg, Some(Color::Reset));

    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), (0, 1));

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_position(), (6, 2));
}

/// Enter keeps the cursor on the match and clears the overlay
#[test]
fn test_find_accept() {
    let (_fixture, mut harness) = open_sample();
    ctrl_f(&mut harness);
    harness.type_text("three").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert!(!harness.editor().is_prompting());
    assert_eq!(harness.cursor_position(), (0, 2));
    let (x, y) = harness.screen_cursor_position();
    assert_ne!(harness.get_cell_style(x, y).unwrap().fg, Some(Color::Blue));

    // Typing edits the document again
    harness.type_text("X").unwrap();
    harness.assert_buffer_content("one\ntwo\nXthree two");
}

/// Escape puts the cursor and view back where find started
#[test]
fn test_find_cancel_restores() {
    let fixture = TestFixture::numbered_lines("long.txt", 100).unwrap();
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&fixture.path).unwrap();
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();

    ctrl_f(&mut harness);
    harness.type_text("line 77").unwrap();
    assert_eq!(harness.cursor_position(), (0, 77));
    assert_eq!(harness.screen_row(0), "line 77");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(!harness.editor().is_prompting());
    assert_eq!(harness.cursor_position(), (6, 1));
    assert_eq!(harness.screen_row(0), "line 0");
    harness.assert_buffer_content(
        &(0..100)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n"),
    );
}

/// A query with no match leaves the cursor where it was
#[test]
fn test_find_no_match() {
    let (_fixture, mut harness) = open_sample();
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    ctrl_f(&mut harness);
    harness.type_text("zzz").unwrap();
    assert_eq!(harness.cursor_position(), (0, 1));
}
