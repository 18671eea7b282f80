use crate::{
    convert::FrameText,
    player::{self, Pacing},
    types::frame_delay::FrameDelay,
};
use std::fmt::Write;

/// A complete C translation unit for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub text: String,
    pub frame_count: usize,
}

/// Escapes `text` for use between the quotes of a C string literal.
///
/// Control characters, the ESC of colour sequences included, become octal
/// escapes so the compiled program prints exactly the converter's bytes.
/// Octal escapes always use three digits so a following digit is never
/// absorbed into them.
pub fn escape_c_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut previous = None;

    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            // "??x" could be read as a trigraph
            '?' if previous == Some('?') => escaped.push_str("\\?"),
            c if c.is_ascii_control() => {
                let _ = write!(escaped, "\\{:03o}", c as u32);
            }
            c => escaped.push(c),
        }
        previous = Some(c);
    }

    escaped
}

pub fn frame_name(index: usize) -> String {
    format!("frame_{index}")
}

/// `static const char frame_N[]`, one literal piece per row.
fn write_frame(out: &mut String, frame: &FrameText) {
    let _ = writeln!(out, "static const char {}[] =", frame_name(frame.index));
    if frame.text.is_empty() {
        out.push_str("    \"\"");
    }
    for (i, row) in frame.text.split_inclusive('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "    \"{}\"", escape_c_string(row));
    }
    out.push_str(";\n\n");
}

fn write_frame_table(out: &mut String, count: usize) {
    out.push_str("static const char *const frames[] = {\n");
    for index in 0..count {
        let _ = writeln!(out, "    {},", frame_name(index));
    }
    out.push_str("};\n");
}

/// Assembles the player program around `frames`.
///
/// Frames are renumbered by position so the constants are always
/// `frame_0..frame_{n-1}` in array order.
pub fn generate(frames: &[FrameText], delay: FrameDelay, pacing: Pacing) -> GeneratedSource {
    let mut text = String::from(player::PROLOGUE);

    for (index, frame) in frames.iter().enumerate() {
        let frame = FrameText {
            index,
            text: frame.text.clone(),
        };
        write_frame(&mut text, &frame);
    }
    write_frame_table(&mut text, frames.len());
    text.push_str(&player::render_program(delay, pacing));

    GeneratedSource {
        text,
        frame_count: frames.len(),
    }
}
