use crate::common::fixtures::TestFixture;
use crate::common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Modifier;

/// Typed text shows up in the buffer and on screen
#[test]
fn test_typing_renders_text() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();

    harness.type_text("hello\nworld").unwrap();
    harness.assert_buffer_content("hello\nworld");

    assert_eq!(harness.screen_row(0), "hello");
    assert_eq!(harness.screen_row(1), "world");
    assert_eq!(harness.screen_row(2), "~");
    assert_eq!(harness.screen_cursor_position(), (5, 1));
}

/// An empty document shows the version banner a third of the way down
#[test]
fn test_welcome_banner() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    let banner = harness.screen_row(22 / 3);
    assert!(banner.starts_with('~'), "banner row: {:?}", banner);
    assert!(banner.contains("Kite editor -- version"));
    assert_eq!(harness.screen_row(0), "~");

    harness.type_text("x").unwrap();
    harness.assert_screen_not_contains("Kite editor -- version");
}

/// Status line shows name, line count, dirty flag, filetype and position
#[test]
fn test_status_line() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();
    assert!(harness.screen_row(22).starts_with("[No Name] - 0 lines"));
    assert!(harness.screen_row(22).ends_with("no ft | 1/0"));

    harness.type_text("a\nb").unwrap();
    let status = harness.screen_row(22);
    assert!(status.starts_with("[No Name] - 2 lines (modified)"));
    assert!(status.ends_with("no ft | 2/2"));
}

/// The help message is shown on startup in the message line
#[test]
fn test_help_message() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();
    assert_eq!(
        harness.screen_row(23),
        "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find"
    );
}

/// Backspace at the start of a line joins it to the previous one
#[test]
fn test_backspace_joins_lines() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("ab\ncd").unwrap();

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Backspace, KeyModifiers::NONE)
        .unwrap();

    harness.assert_buffer_content("abcd");
    assert_eq!(harness.cursor_position(), (2, 0));
}

/// Ctrl-H erases like Backspace
#[test]
fn test_ctrl_h_erases() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("abc").unwrap();
    harness
        .send_key(KeyCode::Char('h'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_buffer_content("ab");
}

/// Delete removes the character under the cursor
#[test]
fn test_delete_key() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("abc\ndef").unwrap();

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Delete, KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("abcdef");
    assert_eq!(harness.cursor_position(), (3, 0));
}

/// Enter in the middle of a line splits it
#[test]
fn test_enter_splits_line() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("helloworld").unwrap();
    for _ in 0..5 {
        harness.send_key(KeyCode::Left, KeyModifiers::NONE).unwrap();
    }
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("hello\nworld");
    assert_eq!(harness.cursor_position(), (0, 1));
}

/// Tabs expand to the next multiple of eight on screen
#[test]
fn test_tab_rendering() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("\tx\nab\ty").unwrap();

    assert_eq!(harness.screen_row(0), "        x");
    assert_eq!(harness.screen_row(1), "ab      y");
    assert_eq!(harness.screen_cursor_position(), (9, 1));
}

/// Control bytes are drawn as reversed letters
#[test]
fn test_control_bytes_reversed() {
    let fixture = TestFixture::new("ctrl.txt", "a\u{1}b\n").unwrap();
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.open_file(&fixture.path).unwrap();

    assert_eq!(harness.screen_row(0), "aAb");
    let style = harness.get_cell_style(1, 0).unwrap();
    assert!(style.add_modifier.contains(Modifier::REVERSED));
    let plain = harness.get_cell_style(0, 0).unwrap();
    assert!(!plain.add_modifier.contains(Modifier::REVERSED));
}

/// Quitting a dirty document needs repeated Ctrl-Q
#[test]
fn test_quit_confirmation() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("unsaved").unwrap();

    for remaining in [3, 2, 1] {
        harness
            .send_key(KeyCode::Char('q'), KeyModifiers::CONTROL)
            .unwrap();
        assert!(!harness.editor().should_quit());
        harness.assert_screen_contains(&format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
            remaining
        ));
    }

    harness
        .send_key(KeyCode::Char('q'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.editor().should_quit());
}

/// Keys with no binding leave the document alone
#[test]
fn test_unbound_keys_ignored() {
    let mut harness = EditorTestHarness::new(80, 24).unwrap();
    harness.type_text("abc").unwrap();
    let dirty = harness.editor().document().dirty();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Char('l'), KeyModifiers::CONTROL)
        .unwrap();
    harness.send_key(KeyCode::F(1), KeyModifiers::NONE).unwrap();

    harness.assert_buffer_content("abc");
    assert_eq!(harness.editor().document().dirty(), dirty);
}
