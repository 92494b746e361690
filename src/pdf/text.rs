//! Text measurement: word wrapping at a fixed width and the resulting block
//! size. Pure functions over the standard font metrics.

use crate::fonts::FontFace;

pub struct TextLine {
    pub text: String,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub height: f32,
    pub lines: usize,
}

/// Break `text` into lines no wider than `max_width`. Explicit newlines start a
/// new line; a word longer than the whole width is split by character.
pub fn wrap_text(text: &str, face: FontFace, font_size: f32, max_width: f32) -> Vec<TextLine> {
    let space_w = face.space_width(font_size);
    let mut lines: Vec<TextLine> = Vec::new();

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    for paragraph in normalized.split('\n') {
        let mut current = String::new();
        let mut current_w: f32 = 0.0;

        for word in paragraph.split_whitespace() {
            let ww = face.text_width(word, font_size);
            let proposed = if current.is_empty() {
                ww
            } else {
                current_w + space_w + ww
            };

            if proposed <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_w = proposed;
                continue;
            }

            if !current.is_empty() {
                lines.push(TextLine {
                    text: std::mem::take(&mut current),
                    width: current_w,
                });
                current_w = 0.0;
            }

            if ww <= max_width {
                current.push_str(word);
                current_w = ww;
            } else {
                // Hard-break an over-long token (part numbers, URLs).
                for ch in word.chars() {
                    let cw = face.char_width_1000(ch) * font_size / 1000.0;
                    if !current.is_empty() && current_w + cw > max_width {
                        lines.push(TextLine {
                            text: std::mem::take(&mut current),
                            width: current_w,
                        });
                        current_w = 0.0;
                    }
                    current.push(ch);
                    current_w += cw;
                }
            }
        }

        if !current.is_empty() {
            lines.push(TextLine {
                text: current,
                width: current_w,
            });
        }
    }

    lines
}

/// Height and line count of `text` wrapped at `max_width`. Empty text
/// measures zero.
pub fn measure(text: &str, face: FontFace, font_size: f32, max_width: f32) -> Measurement {
    let lines = wrap_text(text, face, font_size, max_width);
    Measurement {
        height: lines.len() as f32 * face.line_height(font_size),
        lines: lines.len(),
    }
}

const ELLIPSIS: char = '\u{2026}';

/// Single-line version of `text` that fits `max_width`, cut with an ellipsis
/// when it does not.
pub fn ellipsize(text: &str, face: FontFace, font_size: f32, max_width: f32) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if face.text_width(&flat, font_size) <= max_width {
        return flat;
    }
    let budget = max_width - face.char_width_1000(ELLIPSIS) * font_size / 1000.0;
    let mut out = String::new();
    let mut w = 0.0f32;
    for ch in flat.chars() {
        let cw = face.char_width_1000(ch) * font_size / 1000.0;
        if w + cw > budget {
            break;
        }
        out.push(ch);
        w += cw;
    }
    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// At most `max_lines` wrapped lines; the last kept line is ellipsized when
/// text was dropped.
pub fn wrap_clamped(
    text: &str,
    face: FontFace,
    font_size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let lines = wrap_text(text, face, font_size, max_width);
    if lines.len() <= max_lines {
        return lines.into_iter().map(|l| l.text).collect();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    let mut kept: Vec<String> = lines[..max_lines].iter().map(|l| l.text.clone()).collect();
    if let Some(last) = kept.last_mut() {
        let overflowing = format!("{last} {}", lines[max_lines].text);
        *last = ellipsize(&overflowing, face, font_size, max_width);
    }
    kept
}
