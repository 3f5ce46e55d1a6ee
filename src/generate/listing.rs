//! Post-processing of raw model output into a constrained BASIC listing.
//!
//! A deterministic, pure text transform: strip code fences, expand tabs,
//! keep only line-numbered lines, cap the line count, wrap unnumbered
//! output, lower-case everything and clamp the total length. The target
//! display environment expects lowercase.

/// Maximum retained lines.
pub const MAX_LINES: usize = 120;

/// Hard clamp on the final listing length, in chars.
pub const MAX_CHARS: usize = 15000;

/// Wrapper prepended when the model output does not start at line 10.
const WRAPPER_HEADER: &str = "10 REM GENERATED C64 BASIC PROGRAM";

/// Normalise raw model output into the final listing.
pub fn postprocess(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);

    let kept: Vec<String> = unfenced
        .lines()
        .map(|line| line.replace('\t', "  "))
        .filter(|line| is_numbered_line(line))
        .take(MAX_LINES)
        .collect();

    let mut code = kept.join("\n").trim().to_string();

    if !code.starts_with("10 ") {
        code = format!("{WRAPPER_HEADER}\n20 {code}");
    }

    let mut code = code.to_lowercase();
    clamp_chars(&mut code, MAX_CHARS);
    code
}

/// Remove triple-backtick fence markers and any language tag glued to them.
fn strip_code_fences(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        if let Some(stripped) = rest.strip_prefix('\n') {
            rest = stripped;
        }
    }
    out.push_str(rest);
    out
}

/// A line counts as numbered when, after optional leading spaces, it starts
/// with digits followed by whitespace or end of line. Number-only lines are
/// kept as-is.
fn is_numbered_line(line: &str) -> bool {
    let rest = line.trim_start_matches(' ');
    let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == rest.len() {
        return false;
    }
    match after_digits.chars().next() {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}

/// Truncate in place to at most `max` chars, respecting char boundaries.
fn clamp_chars(s: &mut String, max: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_with_language_tag_are_stripped() {
        let out = postprocess("```basic\n10 PRINT \"HI\"\n20 GOTO 10\n```");
        assert_eq!(out, "10 print \"hi\"\n20 goto 10");
    }

    #[test]
    fn tabs_become_two_spaces() {
        let out = postprocess("10\tPRINT \"HI\"");
        assert_eq!(out, "10  print \"hi\"");
    }

    #[test]
    fn prose_lines_are_dropped() {
        let raw = "Here is your program:\n10 PRINT \"HI\"\nEnjoy!\n20 END";
        assert_eq!(postprocess(raw), "10 print \"hi\"\n20 end");
    }

    #[test]
    fn number_only_lines_are_kept() {
        let out = postprocess("10 PRINT \"A\"\n20\n30 END");
        assert_eq!(out, "10 print \"a\"\n20\n30 end");
    }

    #[test]
    fn leading_spaces_before_number_are_allowed() {
        let out = postprocess("10 PRINT \"A\"\n   20 END");
        assert!(out.contains("20 end"));
    }

    #[test]
    fn digits_glued_to_text_are_not_line_numbers() {
        assert!(!is_numbered_line("10print"));
        assert!(!is_numbered_line("print 10 things"));
        assert!(is_numbered_line("10 print"));
        assert!(is_numbered_line("10"));
        assert!(!is_numbered_line(""));
    }

    #[test]
    fn output_is_capped_at_max_lines() {
        let raw: String = (1..=200).map(|n| format!("{} PRINT\n", n * 10)).collect();
        let out = postprocess(&raw);
        assert_eq!(out.lines().count(), MAX_LINES);
        assert!(out.starts_with("10 print"));
    }

    #[test]
    fn unnumbered_output_gets_wrapper() {
        let out = postprocess("PRINT \"HI\"\nGOTO 10");
        assert_eq!(out, "10 rem generated c64 basic program\n20 ");
    }

    #[test]
    fn output_not_starting_at_10_gets_wrapper() {
        let out = postprocess("100 PRINT \"HI\"");
        assert_eq!(out, "10 rem generated c64 basic program\n20 100 print \"hi\"");
    }

    #[test]
    fn output_is_lowercased() {
        let out = postprocess("10 PRINT \"MIXED Case\"");
        assert_eq!(out, out.to_lowercase());
    }

    #[test]
    fn length_is_clamped_without_ellipsis() {
        let long_line = format!("10 rem {}", "a".repeat(20000));
        let out = postprocess(&long_line);
        assert_eq!(out.chars().count(), MAX_CHARS);
        assert!(!out.ends_with('…'));
    }

    #[test]
    fn postprocess_is_pure_and_deterministic() {
        let raw = "```\n10 PRINT \"X\"\n```";
        assert_eq!(postprocess(raw), postprocess(raw));
    }
}
