//! Separator splitting shared by line framing and field parsing.

/// Splits `input` at every occurrence of `sep`.
///
/// The separator is dropped and nothing is trimmed. Empty pieces are
/// kept, so `n` separators always yield `n + 1` pieces:
///
/// ```
/// use ptrk_protocol::split_on;
///
/// assert_eq!(split_on(" Many   spaces ", ' '), ["", "Many", "", "", "spaces", ""]);
/// assert_eq!(split_on("", ';'), [""]);
/// ```
pub fn split_on(input: &str, sep: char) -> Vec<&str> {
    input.split(sep).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(split_on("", ' '), vec![""]);
    }

    #[test]
    fn test_separator_does_not_exist() {
        assert_eq!(split_on("XXXXX", 'x'), vec!["XXXXX"]);
    }

    #[test]
    fn test_words() {
        assert_eq!(split_on("These are words", ' '), vec!["These", "are", "words"]);
        assert_eq!(
            split_on("I-sure-love-hyphens", '-'),
            vec!["I", "sure", "love", "hyphens"]
        );
    }

    #[test]
    fn test_consecutive_separators() {
        assert_eq!(split_on("head xxx tail", 'x'), vec!["head ", "", "", " tail"]);
    }

    #[test]
    fn test_split_at_start_and_end() {
        assert_eq!(
            split_on("split me immediately please!", 's'),
            vec!["", "plit me immediately plea", "e!"]
        );
        assert_eq!(
            split_on("Now, do it at the end", 'd'),
            vec!["Now, ", "o it at the en", ""]
        );
    }

    #[test]
    fn test_count_and_rejoin_invariants() {
        let inputs = [
            "",
            ";",
            ";;",
            "a;b;c",
            ";leading",
            "trailing;",
            "ID=1;X=2;Y=3;TYPE=1",
            "no separators at all",
            "\n\n mixed ;\t; ",
        ];

        for input in inputs {
            for sep in [';', '\n', ' '] {
                let pieces = split_on(input, sep);
                let occurrences = input.matches(sep).count();
                assert_eq!(pieces.len(), occurrences + 1, "count for {input:?} / {sep:?}");
                assert_eq!(pieces.join(&sep.to_string()), input, "rejoin for {input:?}");
            }
        }
    }

    #[test]
    fn test_multibyte_separator() {
        assert_eq!(split_on("a→b→", '→'), vec!["a", "b", ""]);
    }
}
