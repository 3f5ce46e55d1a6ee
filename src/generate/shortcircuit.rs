//! Short-circuit table — keyword patterns mapped to canned programs.
//!
//! A static, ordered rule list consulted before any upstream call. Order
//! matters: the first rule with a matching keyword wins when a prompt
//! matches several. The table is injected into [`super::Generator`] so
//! tests can swap in alternates; [`default_rules`] is the shipped set.

/// One pattern → canned-program mapping.
#[derive(Debug, Clone)]
pub struct ShortCircuitRule {
    /// Lowercase substrings — any one matching selects this rule.
    pub keywords: &'static [&'static str],
    /// Canned C64 BASIC program, returned lower-cased.
    pub code: &'static str,
}

const RAINBOW: &str = "\
10 REM RAINBOW BARS
20 FOR C=0 TO 15
30 POKE 53280,C
40 POKE 53281,C
50 FOR D=1 TO 200:NEXT D
60 NEXT C
70 GOTO 20";

const HELLO_MOVING: &str = "\
10 REM MOVING HELLO
20 PRINT CHR$(147)
30 X=0
40 PRINT CHR$(19)
50 PRINT TAB(X);\"HELLO!\"
60 X=X+1
70 IF X>30 THEN X=0
80 FOR D=1 TO 100:NEXT D
90 GOTO 40";

const CHECKERBOARD: &str = "\
10 REM CHECKERBOARD PATTERN
20 PRINT CHR$(147)
30 FOR R=0 TO 23
40 FOR C=0 TO 39
50 IF (R+C) AND 1 THEN PRINT CHR$(18);\" \";CHR$(146);:GOTO 70
60 PRINT \" \";
70 NEXT C
80 NEXT R
90 GOTO 90";

const GUESS_GAME: &str = "\
10 REM NUMBER GUESSING GAME
20 N=INT(RND(1)*100)+1
30 T=0
40 PRINT \"GUESS A NUMBER FROM 1 TO 100\"
50 INPUT G
60 T=T+1
70 IF G<N THEN PRINT \"TOO LOW\":GOTO 50
80 IF G>N THEN PRINT \"TOO HIGH\":GOTO 50
90 PRINT \"CORRECT IN\";T;\"TRIES!\"
100 GOTO 20";

/// The shipped rule table, in precedence order.
pub fn default_rules() -> Vec<ShortCircuitRule> {
    vec![
        ShortCircuitRule { keywords: &["rainbow", "color"], code: RAINBOW },
        ShortCircuitRule { keywords: &["hello", "moving"], code: HELLO_MOVING },
        ShortCircuitRule { keywords: &["pattern", "checkerboard"], code: CHECKERBOARD },
        ShortCircuitRule { keywords: &["guess", "game"], code: GUESS_GAME },
    ]
}

/// Test `prompt` against the rules in table order; the first match returns
/// its canned program lower-cased. Pure and side-effect free.
pub fn lookup(rules: &[ShortCircuitRule], prompt: &str) -> Option<String> {
    let prompt = prompt.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| prompt.contains(kw)))
        .map(|rule| rule.code.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_prompt_matches_first_rule() {
        let code = lookup(&default_rules(), "draw a rainbow").unwrap();
        assert_eq!(code, RAINBOW.to_lowercase());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let code = lookup(&default_rules(), "Please DRAW A RAINBOW now").unwrap();
        assert!(code.starts_with("10 rem rainbow"));
    }

    #[test]
    fn table_order_breaks_ties() {
        // "a colorful guessing game" matches both the rainbow rule ("color")
        // and the game rule ("guess", "game"); the earlier rule wins.
        let code = lookup(&default_rules(), "a colorful guessing game").unwrap();
        assert!(code.starts_with("10 rem rainbow"));
    }

    #[test]
    fn unmatched_prompt_returns_none() {
        assert!(lookup(&default_rules(), "simulate a lunar lander").is_none());
    }

    #[test]
    fn canned_output_is_lowercase() {
        for rule in default_rules() {
            let code = lookup(&default_rules(), rule.keywords[0]).unwrap();
            assert_eq!(code, code.to_lowercase());
        }
    }

    #[test]
    fn canned_programs_are_line_numbered_from_10() {
        for rule in default_rules() {
            assert!(rule.code.starts_with("10 "), "rule {:?}", rule.keywords);
            for line in rule.code.lines() {
                assert!(
                    line.chars().next().is_some_and(|c| c.is_ascii_digit()),
                    "unnumbered line in {:?}: {line}",
                    rule.keywords
                );
            }
        }
    }

    #[test]
    fn alternate_table_is_honored() {
        let rules = vec![ShortCircuitRule { keywords: &["maze"], code: "10 REM MAZE" }];
        assert_eq!(lookup(&rules, "a maze please").unwrap(), "10 rem maze");
        assert!(lookup(&rules, "draw a rainbow").is_none());
    }
}
