//! Chat formatting helpers

/// Section sign that introduces a two-character formatting code
const FORMAT_MARKER: char = '§';

/// Remove `§x` formatting codes from a line.
///
/// A trailing lone marker is dropped as well.
pub fn strip_formatting(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == FORMAT_MARKER {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// Prepare a raw chat line for classification: strip formatting codes and
/// trailing whitespace.
pub fn normalize_line(line: &str) -> String {
    let mut stripped = strip_formatting(line);
    let trimmed_len = stripped.trim_end().len();
    stripped.truncate(trimmed_len);
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_codes() {
        assert_eq!(
            strip_formatting("§c[BOSS] Goldor§r: §cWho dares trespass into my domain?"),
            "[BOSS] Goldor: Who dares trespass into my domain?"
        );
    }

    #[test]
    fn dangling_marker_is_dropped() {
        assert_eq!(strip_formatting("abc§"), "abc");
    }

    #[test]
    fn normalize_trims_trailing_whitespace_only() {
        assert_eq!(normalize_line("  hello§r  \n"), "  hello");
    }
}
