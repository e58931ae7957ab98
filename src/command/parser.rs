// Passbook — Command Parser
//
// Splits the raw token stream into invocations on the literal `\` token and
// unescapes `\n` sequences in free-text arguments.

/// Token that separates chained invocations.
pub const SEPARATOR: &str = "\\";

/// One command invocation: `[letter, args...]`.
pub type Invocation = Vec<String>;

/// Raw input, either flat program arguments or already grouped invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Flat(Vec<String>),
    Grouped(Vec<Invocation>),
}

impl From<Vec<String>> for RawInput {
    fn from(tokens: Vec<String>) -> Self {
        RawInput::Flat(tokens)
    }
}

impl From<Vec<Invocation>> for RawInput {
    fn from(groups: Vec<Invocation>) -> Self {
        RawInput::Grouped(groups)
    }
}

/// Produce the ordered invocations for a session. Empty input yields exactly
/// one empty invocation so the dispatcher reports usage.
pub fn split_invocations(input: impl Into<RawInput>) -> Vec<Invocation> {
    let invocations: Vec<Invocation> = match input.into() {
        RawInput::Grouped(groups) => groups,
        RawInput::Flat(tokens) => {
            let mut invocations = Vec::new();
            let mut current = Vec::new();
            for token in tokens {
                if token == SEPARATOR {
                    if !current.is_empty() {
                        invocations.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(token);
                }
            }
            if !current.is_empty() {
                invocations.push(current);
            }
            invocations
        }
    };

    if invocations.is_empty() {
        vec![Vec::new()]
    } else {
        invocations
    }
}

/// Replace every two-character `\n` sequence with a newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Unescape every argument in place.
pub fn unescape_all(args: &mut [String]) {
    for arg in args.iter_mut() {
        if arg.contains("\\n") {
            *arg = unescape_newlines(arg);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_separator_yields_single_invocation() {
        let input = tokens(&["a", "github", "-f"]);
        assert_eq!(split_invocations(input.clone()), vec![input]);
    }

    #[test]
    fn test_three_way_split_preserves_order() {
        let input = tokens(&["a", "x", "\\", "d", "y", "\\", "l"]);
        assert_eq!(
            split_invocations(input),
            vec![tokens(&["a", "x"]), tokens(&["d", "y"]), tokens(&["l"])]
        );
    }

    #[test]
    fn test_adjacent_and_edge_separators_drop_empty_runs() {
        let input = tokens(&["\\", "l", "\\", "\\", "L", "\\"]);
        assert_eq!(split_invocations(input), vec![tokens(&["l"]), tokens(&["L"])]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_invocation() {
        assert_eq!(split_invocations(Vec::<String>::new()), vec![Vec::<String>::new()]);
        assert_eq!(split_invocations(tokens(&["\\"])), vec![Vec::<String>::new()]);
        assert_eq!(
            split_invocations(RawInput::Grouped(vec![])),
            vec![Vec::<String>::new()]
        );
    }

    #[test]
    fn test_grouped_input_passes_through() {
        let groups = vec![tokens(&["l"]), tokens(&["a", "\\"])];
        assert_eq!(split_invocations(groups.clone()), groups);
    }

    #[test]
    fn test_unescape_replaces_backslash_n() {
        assert_eq!(unescape_newlines("line1\\nline2"), "line1\nline2");
        assert_eq!(unescape_newlines("\\n\\n"), "\n\n");
    }

    #[test]
    fn test_unescape_is_identity_without_escapes() {
        for s in ["", "plain", "back\\slash", "already\nnewline", "n\\"] {
            assert_eq!(unescape_newlines(s), s);
            assert_eq!(unescape_newlines(&unescape_newlines(s)), unescape_newlines(s));
        }
    }

    #[test]
    fn test_unescape_all_in_place() {
        let mut args = tokens(&["a\\nb", "c"]);
        unescape_all(&mut args);
        assert_eq!(args, tokens(&["a\nb", "c"]));
    }
}
