use std::io::{self, BufRead, Write};

use crate::utils::error::{AppError, AppResult};

/// Print `prompt` and read one trimmed line from stdin.
///
/// Returns `None` at end of input.
pub fn prompt_input(prompt: &str) -> AppResult<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

pub fn read_trimmed_line(reader: &mut impl BufRead) -> AppResult<Option<String>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let Some(input) = prompt_input(&format!("{} [y/N]: ", prompt))? else {
            return Ok(false);
        };
        match parse_yes_no(&input) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter 'y' or 'n'"),
        }
    }
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Parse a finite real number typed by the user
pub fn parse_number(field: &str, input: &str) -> AppResult<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("{} must be a number, got '{}'", field, input.trim())))?;

    if !value.is_finite() {
        return Err(AppError::InvalidInput(format!("{} must be a finite number", field)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_trimmed_line_and_eof() {
        let mut input = Cursor::new("  Revenue Growth \n");
        assert_eq!(read_trimmed_line(&mut input).unwrap(), Some("Revenue Growth".to_string()));
        assert_eq!(read_trimmed_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("yes"), Some(true));
        assert_eq!(parse_yes_no(""), Some(false));
        assert_eq!(parse_yes_no("No"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("Target", "100").unwrap(), 100.0);
        assert_eq!(parse_number("Target", " -2.5 ").unwrap(), -2.5);
        assert!(matches!(parse_number("Target", "abc"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_number("Actual", "inf"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_number("Actual", "NaN"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_number("Actual", ""), Err(AppError::InvalidInput(_))));
    }
}
