use std::path::PathBuf;

pub const USAGE: &str = "Usage: pconsole [--url <base-url>] [--config <file>] [<prompt-path>]";

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Overrides the configured service URL
    pub url: Option<String>,
    pub config: Option<PathBuf>,
    /// Prompt to open in the invoke view at startup
    pub path: Option<String>,
    pub help: bool,
}

/// Parse arguments after the program name
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => parsed.help = true,
            "--url" => {
                let value = args.get(i + 1).ok_or("--url needs a value")?;
                parsed.url = Some(value.clone());
                i += 1;
            }
            "--config" => {
                let value = args.get(i + 1).ok_or("--config needs a value")?;
                parsed.config = Some(PathBuf::from(value));
                i += 1;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown argument: {}", flag)),
            path => {
                if parsed.path.is_some() {
                    return Err(format!("Unexpected argument: {}", path));
                }
                parsed.path = Some(path.to_string());
            }
        }
        i += 1;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_line() {
        assert_eq!(parse_args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn flags_and_path() {
        let parsed = parse_args(&args(&["--url", "http://api:9000", "summaries/daily", "--config", "c.yaml"])).unwrap();
        assert_eq!(parsed.url.as_deref(), Some("http://api:9000"));
        assert_eq!(parsed.config, Some(PathBuf::from("c.yaml")));
        assert_eq!(parsed.path.as_deref(), Some("summaries/daily"));
    }

    #[test]
    fn missing_flag_value() {
        assert_eq!(parse_args(&args(&["--url"])).unwrap_err(), "--url needs a value");
    }

    #[test]
    fn unknown_flag_and_second_path_rejected() {
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
    }
}
