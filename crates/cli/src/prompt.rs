//! Line-based prompts for the interactive `run` command.

use std::io::{self, BufRead, Write};

/// Print `question` and read one trimmed line.
///
/// End of input is an `UnexpectedEof` error.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("no answer to {:?}", question.trim_end()),
        ));
    }
    Ok(line.trim().to_string())
}

/// Like [`ask`], but repeats the question until the answer is not blank.
pub fn ask_non_empty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    loop {
        let answer = ask(input, output, question)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Use `given` if present, otherwise prompt on stdin.
pub fn value_or_ask(given: Option<String>, question: &str) -> io::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => ask_non_empty(&mut io::stdin().lock(), &mut io::stdout(), question),
    }
}
