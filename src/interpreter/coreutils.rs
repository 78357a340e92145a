// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Text filters allowed after the first pipeline segment.

use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};
use regex::RegexBuilder;

const DEFAULT_LINES: usize = 10;

/// Runs `input` through one filter segment.
pub fn apply_filter(input: &str, tokens: &[String]) -> Result<String> {
    let Some((command, args)) = tokens.split_first() else {
        return Err(SimError::invalid(
            "bash: syntax error near unexpected token `|'",
        ));
    };

    match command.as_str() {
        "grep" => grep(input, args),
        "head" => Ok(take_lines(input, line_count(args)?, false)),
        "tail" => Ok(take_lines(input, line_count(args)?, true)),
        "wc" => wc(input, args),
        other => Err(SimError::invalid(format!("bash: {}: command not found", other))),
    }
}

fn grep(input: &str, args: &[String]) -> Result<String> {
    let mut invert = false;
    let mut ignore_case = false;
    let mut pattern = None;

    for arg in args {
        match arg.as_str() {
            "-v" => invert = true,
            "-i" => ignore_case = true,
            "-vi" | "-iv" => {
                invert = true;
                ignore_case = true;
            }
            "-E" => {}
            other if pattern.is_none() => pattern = Some(other),
            _ => {}
        }
    }

    let pattern = pattern.ok_or_else(|| {
        SimError::invalid("Usage: grep [OPTION]... PATTERNS [FILE]...")
    })?;
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(ignore_case)
                .build()
        })
        .map_err(|e| SimError::invalid(format!("grep: {}", e)))?;

    Ok(input
        .lines()
        .filter(|line| regex.is_match(line) != invert)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `-n N`, `-nN` or `-N`
fn line_count(args: &[String]) -> Result<usize> {
    let flags = Flags::parse(args);
    let raw = flags
        .value(&["n", "lines"])
        .map(str::to_string)
        .or_else(|| {
            args.iter().find_map(|a| {
                a.strip_prefix("-n")
                    .or_else(|| a.strip_prefix('-'))
                    .filter(|rest| !rest.is_empty())
                    .map(str::to_string)
            })
        });

    match raw {
        None => Ok(DEFAULT_LINES),
        Some(raw) => raw
            .parse()
            .map_err(|_| SimError::invalid(format!("invalid number of lines: '{}'", raw))),
    }
}

fn take_lines(input: &str, count: usize, from_end: bool) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let selected = if from_end {
        &lines[lines.len().saturating_sub(count)..]
    } else {
        &lines[..count.min(lines.len())]
    };
    selected.join("\n")
}

fn wc(input: &str, args: &[String]) -> Result<String> {
    match args.first().map(String::as_str) {
        Some("-l") => Ok(input.lines().count().to_string()),
        Some("-w") => Ok(input.split_whitespace().count().to_string()),
        Some("-c") => Ok(input.len().to_string()),
        _ => Ok(format!(
            "{} {} {}",
            input.lines().count(),
            input.split_whitespace().count(),
            input.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "NAME   READY\nweb-1  1/1\nweb-2  1/1\napi-1  0/1";

    fn run(input: &str, segment: &str) -> Result<String> {
        let tokens: Vec<String> = segment.split_whitespace().map(str::to_string).collect();
        apply_filter(input, &tokens)
    }

    #[test]
    fn test_grep_variants() {
        assert_eq!(run(TEXT, "grep web").unwrap(), "web-1  1/1\nweb-2  1/1");
        assert_eq!(run(TEXT, "grep -v web").unwrap(), "NAME   READY\napi-1  0/1");
        assert_eq!(run(TEXT, "grep -i name").unwrap(), "NAME   READY");
        assert_eq!(run(TEXT, "grep 0/1").unwrap(), "api-1  0/1");
        assert_eq!(run(TEXT, "grep (").unwrap(), "");
    }

    #[test]
    fn test_head_and_tail() {
        assert_eq!(run(TEXT, "head -n 1").unwrap(), "NAME   READY");
        assert_eq!(run(TEXT, "tail -2").unwrap(), "web-2  1/1\napi-1  0/1");
        assert_eq!(run(TEXT, "head").unwrap(), TEXT);
        assert!(run(TEXT, "head -n x").is_err());
    }

    #[test]
    fn test_wc_lines() {
        assert_eq!(run(TEXT, "wc -l").unwrap(), "4");
        assert_eq!(run("", "wc -l").unwrap(), "0");
    }

    #[test]
    fn test_unknown_filter() {
        let err = run(TEXT, "awk {print}").unwrap_err();
        assert_eq!(err.to_string(), "bash: awk: command not found");
    }
}
