use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wa")]
#[command(about = "Ask Wolfram|Alpha from the command line.")]
#[command(version)]
pub struct Cli {
    /// Wolfram|Alpha appid (overrides the config file)
    #[arg(long, env = "WOLFRAM_APP_ID")]
    pub app_id: Option<String>,

    /// Print the parsed response tree as JSON
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,

    /// Print the XML body as received
    #[arg(long)]
    pub raw: bool,

    /// Print only the first textual answer
    #[arg(short = 's', long)]
    pub short: bool,

    /// Extra query parameter, repeatable (e.g. -p format=plaintext)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Query text
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("format=plaintext").unwrap(),
            ("format".to_string(), "plaintext".to_string())
        );
        assert_eq!(
            parse_param("assumption=*C.pi-_*NamedConstant-").unwrap().1,
            "*C.pi-_*NamedConstant-"
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_cli_collects_query_and_params() {
        let cli = Cli::try_parse_from([
            "wa", "-p", "format=plaintext", "-p", "units=metric", "speed", "of", "light",
        ])
        .unwrap();
        assert_eq!(cli.query.join(" "), "speed of light");
        assert_eq!(cli.params.len(), 2);
        assert_eq!(cli.params[1].0, "units");
    }

    #[test]
    fn test_json_and_raw_conflict() {
        assert!(Cli::try_parse_from(["wa", "--json", "--raw", "pi"]).is_err());
    }
}
