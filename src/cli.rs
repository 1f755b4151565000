//! Argument-parsing helpers for clap-based callers
//!
//! Small custom value parsers, usable as `#[arg(value_parser = ...)]`.

/// Parse a permissive boolean
///
/// Accepts `1`/`0`, `true`/`false`, `t`/`f`, `yes`/`no`, and `y`/`n`,
/// case-insensitively.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "false" | "f" | "no" | "n" => Ok(false),
        other => Err(format!(
            "invalid boolean '{}': expected true/false, yes/no, or 1/0",
            other
        )),
    }
}

/// Parse a KEY=VALUE pair
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid argument '{}': expected KEY=VALUE format", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const TRUTHY: [&str; 9] = ["1", "true", "True", "t", "T", "yes", "Yes", "y", "Y"];
    const FALSY: [&str; 9] = ["0", "false", "False", "f", "F", "no", "No", "n", "N"];

    #[test]
    fn test_parse_bool_truthy() {
        for input in TRUTHY {
            assert_eq!(parse_bool(input), Ok(true), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_bool_falsy() {
        for input in FALSY {
            assert_eq!(parse_bool(input), Ok(false), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
        assert!(parse_bool("2").is_err());
    }

    #[derive(Parser, Debug)]
    struct TestCli {
        #[arg(long, action = clap::ArgAction::Set, value_parser = parse_bool)]
        flag: bool,

        #[arg(long = "env", value_parser = parse_key_value)]
        env: Vec<(String, String)>,
    }

    #[test]
    fn test_parse_bool_with_clap() {
        for input in TRUTHY {
            let cli = TestCli::parse_from(["test", "--flag", input]);
            assert!(cli.flag, "input: {}", input);
        }
        for input in FALSY {
            let cli = TestCli::parse_from(["test", "--flag", input]);
            assert!(!cli.flag, "input: {}", input);
        }
    }

    #[test]
    fn test_parse_key_value_valid() {
        assert_eq!(
            parse_key_value("FOO=bar"),
            Ok(("FOO".to_string(), "bar".to_string()))
        );
        assert_eq!(
            parse_key_value("FOO="),
            Ok(("FOO".to_string(), "".to_string()))
        );
        assert_eq!(
            parse_key_value("FOO=bar=baz"),
            Ok(("FOO".to_string(), "bar=baz".to_string()))
        );
    }

    #[test]
    fn test_parse_key_value_invalid() {
        assert!(parse_key_value("INVALID").is_err());
    }

    #[test]
    fn test_parse_key_value_with_clap() {
        let cli = TestCli::parse_from(["test", "--flag", "y", "--env", "A=1", "--env", "B=2"]);

        assert_eq!(
            cli.env,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }
}
