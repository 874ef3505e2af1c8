//! Reader for the line-oriented MK landscape format.
//!
//! ```text
//! c comment
//! p MK 4
//! m 0 1
//! 0 1 1 0
//! m 2 3
//! 2 0 0 2
//! ```

use std::io::BufRead;

use tracing::{info, warn};

use super::{Fitness, Landscape, ProblemKind, Subfunction};
use crate::error::LoadError;

/// Parses a landscape description.
///
/// Lines starting with `c` and blank lines are skipped. The `p` line gives the
/// problem tag and the length; every `m` line lists a subfunction's variables
/// and the line directly after it holds the 2^k table values.
///
/// # Errors
///
/// Any malformed input is fatal; see [`LoadError`].
pub fn parse_landscape<R: BufRead>(reader: R) -> Result<Landscape, LoadError> {
    let mut lines = reader.lines().enumerate();
    let mut header: Option<(ProblemKind, usize)> = None;
    let mut subfunctions = Vec::new();

    while let Some((index, line)) = lines.next() {
        let line = line?;
        let number = index + 1;
        let trimmed = line.trim();
        let Some(head) = trimmed.chars().next() else {
            continue;
        };
        let rest = &trimmed[head.len_utf8()..];

        match head {
            'c' => continue,
            'p' => {
                if header.is_some() {
                    return Err(LoadError::DuplicateProblem { line: number });
                }
                header = Some(parse_problem(rest, number)?);
            }
            'm' => {
                let variables = rest
                    .split_whitespace()
                    .map(|token| parse_index(token, number))
                    .collect::<Result<Vec<_>, _>>()?;
                let Some((values_index, values_line)) = lines.next() else {
                    return Err(LoadError::MissingValues {
                        subfunction: subfunctions.len(),
                    });
                };
                let values_line = values_line?;
                let values = values_line
                    .split_whitespace()
                    .map(|token| parse_value(token, values_index + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                subfunctions.push(Subfunction::new(variables, values));
            }
            other => {
                warn!(line = number, header = %other, "Unexpected line header");
            }
        }
    }

    let (kind, length) = header.ok_or(LoadError::MissingLength)?;
    let landscape = Landscape::new(kind, length, subfunctions)?;
    info!(
        event = "landscape_loaded",
        length = landscape.length() as u64,
        subfunctions = landscape.subfunctions().len() as u64,
    );
    Ok(landscape)
}

fn parse_problem(rest: &str, line: usize) -> Result<(ProblemKind, usize), LoadError> {
    let mut tokens = rest.split_whitespace();
    let kind = match tokens.next() {
        Some("MK") => ProblemKind::Mk,
        Some("NK") => ProblemKind::Nk,
        Some(problem) => {
            return Err(LoadError::UnknownProblem {
                line,
                problem: problem.to_string(),
            })
        }
        None => {
            return Err(LoadError::UnknownProblem {
                line,
                problem: String::new(),
            })
        }
    };
    // Anything after the length is ignored.
    let length = match tokens.next() {
        Some(token) => parse_index(token, line)?,
        None => return Err(LoadError::MissingLength),
    };
    Ok((kind, length))
}

fn parse_index(token: &str, line: usize) -> Result<usize, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

// Integral decimals such as `3.0` are accepted; anything with a fraction is not.
fn parse_value(token: &str, line: usize) -> Result<Fitness, LoadError> {
    if let Ok(value) = token.parse::<Fitness>() {
        return Ok(value);
    }
    match token.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value.abs() <= Fitness::MAX as f64 =>
        {
            Ok(value as Fitness)
        }
        _ => Err(LoadError::InvalidNumber {
            line,
            token: token.to_string(),
        }),
    }
}
