use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Rejected selection input. The message is shown to the user before the
/// prompt is repeated.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidSelection(String);

/// Parse a single 1-based choice against a collection of `len` entries.
///
/// Returns the matching 0-based index. Empty, non-numeric and out-of-range
/// input is rejected.
pub fn parse_choice(raw: &str, len: usize) -> Result<usize, InvalidSelection> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| InvalidSelection(format!("Please enter a number between 1 and {len}!")))?;
    if n < 1 || n > len {
        return Err(InvalidSelection(format!(
            "Please enter a number between 1 and {len}!"
        )));
    }
    Ok(n - 1)
}

/// Parse a multi-selection line against a collection of `len` entries.
///
/// Accepts the literal `all` (case-insensitive) for every index in collection
/// order, or a comma-separated list of 1-based numbers. Whitespace around
/// tokens is tolerated. Validation is all-or-nothing: one bad token rejects
/// the whole line. Duplicates are kept and the output follows the order the
/// numbers were typed.
pub fn parse_choices(raw: &str, len: usize) -> Result<Vec<usize>, InvalidSelection> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") {
        return Ok((0..len).collect());
    }
    raw.split(',')
        .map(|token| {
            parse_choice(token, len).map_err(|_| {
                InvalidSelection(
                    "Please enter valid numbers separated by commas or 'all'!".to_string(),
                )
            })
        })
        .collect()
}

/// Prompt on stdout and read lines from `reader` until `validate` accepts one.
///
/// Rejected lines print their validation message and re-prompt; there is no
/// attempt cap and no silent default. The input source is injectable so the
/// loop can be driven without a terminal. End of input is an error, since the
/// prompt can never be answered.
pub fn prompt_until_valid<R, T, F>(reader: &mut R, prompt: &str, validate: F) -> io::Result<T>
where
    R: BufRead,
    F: Fn(&str) -> Result<T, InvalidSelection>,
{
    loop {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a valid selection was made",
            ));
        }
        match validate(&line) {
            Ok(value) => return Ok(value),
            Err(e) => println!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn single_choice_accepts_the_whole_valid_range() {
        for n in 1..=5 {
            assert_eq!(parse_choice(&n.to_string(), 5), Ok(n - 1));
        }
    }

    #[test]
    fn single_choice_rejects_invalid_input() {
        for raw in ["0", "-1", "abc", "", "6"] {
            assert!(parse_choice(raw, 5).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn single_choice_tolerates_whitespace() {
        assert_eq!(parse_choice("  3 \n", 5), Ok(2));
    }

    #[test]
    fn all_selects_everything_in_collection_order() {
        assert_eq!(parse_choices("all", 3), Ok(vec![0, 1, 2]));
        assert_eq!(parse_choices(" ALL ", 3), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn choices_follow_typed_order_and_keep_duplicates() {
        assert_eq!(parse_choices("2,1", 3), Ok(vec![1, 0]));
        assert_eq!(parse_choices("2, 2 ,1", 3), Ok(vec![1, 1, 0]));
    }

    #[test]
    fn one_bad_token_rejects_the_whole_line() {
        assert!(parse_choices("1,99", 5).is_err());
        assert!(parse_choices("1,abc,3", 5).is_err());
        assert!(parse_choices("", 5).is_err());
    }

    #[test]
    fn prompt_loops_until_a_line_validates() {
        let mut input = Cursor::new("zero\n0\n2\n");
        let choice =
            prompt_until_valid(&mut input, "pick: ", |raw| parse_choice(raw, 3)).unwrap();
        assert_eq!(choice, 1);
    }

    #[test]
    fn prompt_fails_on_end_of_input() {
        let mut input = Cursor::new("nope\n");
        let err = prompt_until_valid(&mut input, "pick: ", |raw| parse_choice(raw, 3))
            .expect_err("ran out of input");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
