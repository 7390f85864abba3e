use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seo-checker")]
#[command(author = "Ibrahim")]
#[command(about = "Scores the on-page SEO of a single HTML snapshot")]
#[command(version)]
pub struct Args {
    /// HTML file to analyze, or `-` to read stdin
    pub input: PathBuf,

    /// URL the snapshot was served from (drives HTTPS, canonical and link checks)
    #[arg(short, long)]
    pub url: String,

    /// JSON settings file (keyword tokens, thresholds, timeouts)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also check that /robots.txt exists on the page's origin
    #[arg(long)]
    pub check_robots: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Debug logging for the checker
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let args = Args::try_parse_from(["seo-checker", "page.html", "--url", "https://example.com/"])
            .unwrap();
        assert_eq!(args.input, PathBuf::from("page.html"));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.check_robots);
        assert!(!args.reads_stdin());
    }

    #[test]
    fn parses_full_invocation() {
        let args = Args::try_parse_from([
            "seo-checker",
            "-",
            "-u",
            "https://example.com/",
            "--config",
            "settings.json",
            "--check-robots",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(args.reads_stdin());
        assert!(args.check_robots);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("settings.json")));
    }

    #[test]
    fn url_is_required() {
        assert!(Args::try_parse_from(["seo-checker", "page.html"]).is_err());
    }
}
