//! Sanitizing, measuring and wrapping text for the standard Helvetica fonts.

/// Font face used for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
}

/// Remove control characters and collapse whitespace runs to single spaces.
///
/// Must run before any measuring or wrapping.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if ch.is_control() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

/// Helvetica advance widths for printable ASCII, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for anything outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica-Bold runs roughly this much wider than the regular face.
const BOLD_FACTOR: f32 = 1.06;

/// Advance width of one character at 1pt, in points.
pub fn char_width(ch: char, face: Face) -> f32 {
    let code = ch as u32;
    let units = if (0x20..=0x7e).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    };
    let width = f32::from(units) / 1000.0;
    match face {
        Face::Regular => width,
        Face::Bold => width * BOLD_FACTOR,
    }
}

/// Width of `text` at `size` points.
pub fn text_width(text: &str, size: f32, face: Face) -> f32 {
    text.chars().map(|c| char_width(c, face)).sum::<f32>() * size
}

/// Greedy word wrap. Words longer than a line are broken between characters.
///
/// Always returns at least one line; an empty input yields one empty line.
pub fn wrap(text: &str, size: f32, face: Face, max_width: f32) -> Vec<String> {
    let text = sanitize(text);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    let space = char_width(' ', face) * size;

    for word in text.split(' ') {
        let word_width = text_width(word, size, face);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for ch in word.chars() {
                let w = char_width(ch, face) * size;
                if !current.is_empty() && current_width + w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += w;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    lines.push(current);
    lines
}

/// Encode for a WinAnsiEncoding font. Unmappable characters become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_strips_controls_and_collapses() {
        assert_eq!(
            sanitize("  Goal:\tunify\r\n\n reporting \u{7}now "),
            "Goal: unify reporting now"
        );
        assert_eq!(sanitize("\u{0}\u{1b}[31m"), "[31m");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_widths() {
        assert!((text_width("Hello", 10.0, Face::Regular) - 22.78).abs() < 0.01);
        assert!(text_width("Hello", 10.0, Face::Bold) > text_width("Hello", 10.0, Face::Regular));
        assert_eq!(char_width('€', Face::Regular), 0.556);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(6);
        let lines = wrap(&text, 10.0, Face::Regular, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, Face::Regular) <= 120.01, "{line}");
        }
        assert_eq!(lines.join(" "), sanitize(&text));
    }

    #[test]
    fn test_wrap_breaks_overlong_words() {
        let word = "x".repeat(200);
        let lines = wrap(&word, 10.0, Face::Regular, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 10.0, Face::Regular) <= 50.01);
        }
    }

    #[test]
    fn test_wrap_sanitizes_first() {
        let lines = wrap("line one\nline\ttwo", 10.0, Face::Regular, 500.0);
        assert_eq!(lines, vec!["line one line two".to_string()]);
        assert_eq!(wrap("", 10.0, Face::Regular, 100.0), vec![String::new()]);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi("€ 1,890"), vec![0x80, b' ', b'1', b',', b'8', b'9', b'0']);
        assert_eq!(to_win_ansi("Müller"), vec![b'M', 0xfc, b'l', b'l', b'e', b'r']);
        assert_eq!(to_win_ansi("数据"), b"??".to_vec());
    }
}
