use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};

use revparse::Origin;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Text between two reviews; escapes such as `\n` are expanded
    #[arg(long, global = true, value_name = "SEP")]
    pub separator: Option<String>,

    /// Log every parsed and appended block
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse review exports and print the reviews as JSON
    Parse {
        #[arg(value_name = "FILE", required = true)]
        from: Vec<Source>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Count reviews and average their scores per workplace location
    Locations {
        #[arg(value_name = "FILE", required = true)]
        from: Vec<Source>,
        /// Only consider reviews from this site
        #[arg(long)]
        origin: Option<Origin>,
        /// State assumed for locations that name none
        #[arg(long, value_name = "STATE")]
        state: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A review export on disk.
///
/// The file stem names the site it was scraped from (`glassdoor.txt`, `Indeed.txt`), which is
/// how the dispatcher picks an extractor for it.
pub struct Source {
    pub name: String,
    pub path: PathBuf,
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = PathBuf::from(s);
        // NOTE: Whether the stem is a known site is decided later, so that one unknown file
        // does not stop the others from being parsed.
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| format!("cannot tell the source of {s:?} from its file name"))?
            .to_lowercase();
        Ok(Source { name, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_uses_lowercased_stem() {
        let src = Source::from_str("data/Glassdoor.txt").expect("parse");
        assert_eq!(src.name, "glassdoor");
        assert_eq!(src.path, PathBuf::from("data/Glassdoor.txt"));
    }

    #[test]
    fn from_str_rejects_nameless_paths() {
        assert!(Source::from_str("").is_err());
        assert!(Source::from_str("/").is_err());
    }

    #[test]
    fn from_str_keeps_any_stem() {
        proptest::proptest!(|(stem in "[A-Za-z0-9_-]{1,32}", ext in "(txt|csv|log)")| {
            let src = Source::from_str(&format!("{stem}.{ext}")).expect("parse");
            proptest::prop_assert_eq!(src.name, stem.to_lowercase());
        })
    }

    #[test]
    fn origin_filter_parses() {
        let cli = Cli::try_parse_from(["revparse", "locations", "--origin", "indeed", "indeed.txt"])
            .expect("valid args");
        match cli.command {
            Command::Locations { origin, from, .. } => {
                assert_eq!(origin, Some(Origin::Indeed));
                assert_eq!(from[0].name, "indeed");
            }
            _ => panic!("expected locations command"),
        }
    }
}
