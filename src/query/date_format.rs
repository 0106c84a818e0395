//! .NET-style custom date patterns (`yyyy-MM-dd'T'HH:mm:ss'Z'`).
//!
//! The search index stores dates as strings rendered with such a pattern,
//! so range bounds must be rendered the same way before they are compared.
//!
//! A one-character pattern is a standard format. The sortable (`s`),
//! universal sortable (`u`) and round-trip (`o`/`O`) formats are expanded
//! to their invariant-culture custom equivalents; any other single letter
//! is read as a custom specifier.

use chrono::{DateTime, Datelike, Timelike, Utc};
use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{anychar, char, satisfy};
use nom::combinator::map;
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::IResult;

const SPECIFIERS: &str = "yMdHhmsfFtKz";

/// Maximum fractional-second digits a pattern can request.
const MAX_FRACTION_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A run of one specifier letter, e.g. `yyyy` is `('y', 4)`.
    Field(char, usize),
    Literal(String),
}

fn field(input: &str) -> IResult<&str, Token> {
    let (_, c) = satisfy(|c| SPECIFIERS.contains(c))(input)?;
    let (rest, run) = take_while1(move |x: char| x == c)(input)?;
    Ok((rest, Token::Field(c, run.chars().count())))
}

fn quoted(input: &str) -> IResult<&str, Token> {
    map(
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
        |s: &str| Token::Literal(s.to_string()),
    )(input)
}

fn escaped(input: &str) -> IResult<&str, Token> {
    map(preceded(char('\\'), anychar), |c| Token::Literal(c.to_string()))(input)
}

fn literal(input: &str) -> IResult<&str, Token> {
    map(anychar, |c| Token::Literal(c.to_string()))(input)
}

fn tokenize(pattern: &str) -> Vec<Token> {
    match many0(alt((field, quoted, escaped, literal)))(pattern) {
        Ok((_, tokens)) => tokens,
        Err(_) => vec![Token::Literal(pattern.to_string())],
    }
}

/// A tokenized date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    tokens: Vec<Token>,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Self {
        DateFormat {
            tokens: tokenize(standard_pattern(pattern).unwrap_or(pattern)),
        }
    }

    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Field(c, n) => write_field(&mut out, dt, *c, *n),
            }
        }
        out
    }
}

fn standard_pattern(pattern: &str) -> Option<&'static str> {
    match pattern {
        "s" => Some("yyyy'-'MM'-'dd'T'HH':'mm':'ss"),
        "u" => Some("yyyy'-'MM'-'dd HH':'mm':'ss'Z'"),
        "o" | "O" => Some("yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK"),
        _ => None,
    }
}

/// Render `dt` with a .NET-style pattern.
pub fn format_date(dt: &DateTime<Utc>, pattern: &str) -> String {
    DateFormat::parse(pattern).format(dt)
}

fn write_field(out: &mut String, dt: &DateTime<Utc>, c: char, n: usize) {
    match c {
        'y' => match n {
            1 => out.push_str(&(dt.year() % 100).to_string()),
            2 => out.push_str(&format!("{:02}", dt.year() % 100)),
            _ => out.push_str(&format!("{:0width$}", dt.year(), width = n)),
        },
        'M' => match n {
            1 => out.push_str(&dt.month().to_string()),
            2 => out.push_str(&format!("{:02}", dt.month())),
            3 => out.push_str(&dt.format("%b").to_string()),
            _ => out.push_str(&dt.format("%B").to_string()),
        },
        'd' => match n {
            1 => out.push_str(&dt.day().to_string()),
            2 => out.push_str(&format!("{:02}", dt.day())),
            3 => out.push_str(&dt.format("%a").to_string()),
            _ => out.push_str(&dt.format("%A").to_string()),
        },
        'H' => pad(out, dt.hour(), n),
        'h' => pad(out, dt.hour12().1, n),
        'm' => pad(out, dt.minute(), n),
        's' => pad(out, dt.second(), n),
        'f' | 'F' => {
            // Ticks are 100ns; leap-second nanos are clamped into range.
            let ticks = dt.nanosecond().min(999_999_999) / 100;
            let digits = format!("{:07}", ticks);
            let fraction = &digits[..n.min(MAX_FRACTION_DIGITS)];
            if c == 'f' {
                out.push_str(fraction);
            } else {
                let trimmed = fraction.trim_end_matches('0');
                if trimmed.is_empty() && out.ends_with('.') {
                    out.pop();
                }
                out.push_str(trimmed);
            }
        }
        't' => {
            let pm = dt.hour12().0;
            let designator = if pm { "PM" } else { "AM" };
            if n == 1 {
                out.push_str(&designator[..1]);
            } else {
                out.push_str(designator);
            }
        }
        'K' => out.push('Z'),
        'z' => match n {
            1 => out.push_str("+0"),
            2 => out.push_str("+00"),
            _ => out.push_str("+00:00"),
        },
        _ => {
            for _ in 0..n {
                out.push(c);
            }
        }
    }
}

fn pad(out: &mut String, value: u32, n: usize) {
    if n == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{:02}", value));
    }
}
