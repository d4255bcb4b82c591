//! Interactive prompts for estimate inputs which weren't given on the command line.
use anyhow::{Context, Result, ensure};
use std::io::{BufRead, Write};

const BILL_PROMPT: &str = "Enter your Average Monthly Bill: ";
const POSTAL_CODE_PROMPT: &str = "Enter your Pincode: ";
const SUBSIDY_PROMPT: &str = "Do you want subsidy? Y/N: ";

/// Write a prompt and read a single line of input, without the line ending
fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    let bytes_read = input
        .read_line(&mut line)
        .context("Failed to read from input")?;
    ensure!(bytes_read > 0, "Unexpected end of input");

    Ok(line.trim().to_string())
}

/// Ask for the average monthly bill.
///
/// Text which isn't a number is an error. Range checks happen later, along with bills given on the
/// command line.
pub fn prompt_monthly_bill<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64> {
    let line = read_line(input, output, BILL_PROMPT)?;
    line.parse()
        .with_context(|| format!("Invalid monthly bill: {line}"))
}

/// Ask for the postal code
pub fn prompt_postal_code<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    read_line(input, output, POSTAL_CODE_PROMPT)
}

/// Ask whether the user wants the government subsidy
pub fn prompt_subsidy<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    let line = read_line(input, output, SUBSIDY_PROMPT)?;
    Ok(parse_yes_no(&line))
}

/// Interpret an answer to a yes/no question.
///
/// Only "y" and "yes" (in any case) count as yes. Anything else is no.
pub fn parse_yes_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
