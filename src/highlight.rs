//! Incremental syntax highlighting.
//!
//! Each row is rescanned from column 0 whenever its rendered text changes.
//! The only state carried between rows is whether the previous row ended
//! inside a multi-line comment. When a rescan flips that state, the next row
//! is rescanned too, and so on until a row's state comes out unchanged.

use crate::row::Row;
use crate::syntax::Syntax;

/// Classification of one rendered column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightClass {
    #[default]
    Normal,
    Comment,
    MlComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Transient search match overlay
    Match,
}

/// Separators delimit keywords and numbers
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace()
        || byte == b'\x0b'
        || byte == b'\0'
        || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Rehighlight `rows[at]` and keep going down the document while the
/// multi-line comment state at the end of each row keeps changing.
///
/// Out of range `at` is a no-op.
pub fn update_from(rows: &mut [Row], at: usize, syntax: Option<&Syntax>) {
    let mut idx = at;
    while idx < rows.len() {
        let starts_in_comment = idx > 0 && rows[idx - 1].comment_open;
        let ends_in_comment = scan_row(&mut rows[idx], starts_in_comment, syntax);

        let changed = rows[idx].comment_open != ends_in_comment;
        rows[idx].comment_open = ends_in_comment;
        if !changed {
            break;
        }
        idx += 1;
    }
}

/// Rehighlight every row from scratch, e.g. after the language changed
pub fn update_all(rows: &mut [Row], syntax: Option<&Syntax>) {
    for idx in 0..rows.len() {
        let starts_in_comment = idx > 0 && rows[idx - 1].comment_open;
        let ends_in_comment = scan_row(&mut rows[idx], starts_in_comment, syntax);
        rows[idx].comment_open = ends_in_comment;
    }
}

/// Classify every rendered column of `row`. Returns whether the row ends
/// inside a multi-line comment.
fn scan_row(row: &mut Row, starts_in_comment: bool, syntax: Option<&Syntax>) -> bool {
    let mut hl = vec![HighlightClass::Normal; row.rendered().len()];

    let Some(syntax) = syntax else {
        row.highlight = hl;
        return false;
    };

    let render = row.rendered();
    let scs = syntax.singleline_marker();
    let ml = syntax.multiline_markers();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { HighlightClass::Normal };

        if let Some(scs) = scs {
            if in_string.is_none() && !in_comment && render[i..].starts_with(scs) {
                hl[i..].fill(HighlightClass::Comment);
                break;
            }
        }

        if let Some((mcs, mce)) = ml {
            if in_string.is_none() {
                if in_comment {
                    hl[i] = HighlightClass::MlComment;
                    if render[i..].starts_with(mce) {
                        hl[i..i + mce.len()].fill(HighlightClass::MlComment);
                        i += mce.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if render[i..].starts_with(mcs) {
                    hl[i..i + mcs.len()].fill(HighlightClass::MlComment);
                    i += mcs.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if syntax.highlight_strings {
            if let Some(quote) = in_string {
                hl[i] = HighlightClass::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = HighlightClass::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = HighlightClass::String;
                i += 1;
                continue;
            }
        }

        if syntax.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == HighlightClass::Number))
                || (c == b'.' && prev_hl == HighlightClass::Number))
        {
            hl[i] = HighlightClass::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            let matched = syntax.keyword_table().find(|(keyword, _)| {
                render[i..].starts_with(keyword)
                    && is_separator(render.get(i + keyword.len()).copied().unwrap_or(b'\0'))
            });
            if let Some((keyword, secondary)) = matched {
                let class = if secondary {
                    HighlightClass::Keyword2
                } else {
                    HighlightClass::Keyword1
                };
                hl[i..i + keyword.len()].fill(class);
                i += keyword.len();
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    row.highlight = hl;
    in_comment
}
