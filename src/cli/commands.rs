use crate::config::ColorMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Decode, score and render file permission mode words
#[derive(Parser, Debug)]
#[command(
    name = "permscope",
    about = "Decode, score and render file permission mode words",
    version,
    author,
    long_about = "permscope decodes packed file mode words into entry kind, special flags \
                  and owner/group/world permission triads, scores how much access they grant, \
                  and renders them as aligned listing lines or JSON/YAML reports."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "WHEN",
        help = "Colorize output (overrides PERMSCOPE_COLOR)"
    )]
    pub color: Option<ColorMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List entries with decoded permissions",
        long_about = "Prints one line per entry. Directories list their immediate children \
                      unless --directory is given.\n\n\
                      Examples:\n  \
                      permscope ls\n  \
                      permscope ls /etc /tmp\n  \
                      permscope ls -d /var/log --format json"
    )]
    Ls(LsArgs),

    #[command(
        about = "Decode mode words given on the command line",
        long_about = "Decodes POSIX st_mode values (octal by default; 0x, 0b and 0o prefixes \
                      accepted) or, with --raw, packed mode words.\n\n\
                      Examples:\n  \
                      permscope decode 755 4755 1777\n  \
                      permscope decode 0x80000124 --raw"
    )]
    Decode(DecodeArgs),

    #[command(
        about = "Report entries whose risk reaches a threshold",
        long_about = "Scores every entry and reports those at or above the threshold. \
                      Exits with status 3 when anything is reported.\n\n\
                      Examples:\n  \
                      permscope audit /srv\n  \
                      permscope audit --min-risk 0.8 /home"
    )]
    Audit(AuditArgs),

    #[command(
        about = "Adjust read, write or execute access on a path",
        long_about = "Grants the named access to the listed subjects (any of u, g, o) and \
                      revokes it from the rest. 'none' revokes it from everyone.\n\n\
                      Examples:\n  \
                      permscope grant script.sh --exec u\n  \
                      permscope grant shared.txt --read ugo --write ug"
    )]
    Grant(GrantArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LsArgs {
    #[arg(value_name = "PATH", help = "Paths to list (defaults to current directory)")]
    pub paths: Vec<PathBuf>,

    #[arg(
        short = 'd',
        long,
        help = "List directories themselves, not their contents"
    )]
    pub directory: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    #[arg(value_name = "MODE", required = true, help = "Mode values to decode")]
    pub modes: Vec<String>,

    #[arg(long, help = "Treat values as packed mode words instead of POSIX modes")]
    pub raw: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[arg(value_name = "PATH", help = "Paths to audit (defaults to current directory)")]
    pub paths: Vec<PathBuf>,

    #[arg(
        long,
        value_name = "SCORE",
        value_parser = parse_risk,
        help = "Minimum risk score in [0, 1] (defaults to PERMSCOPE_RISK_THRESHOLD)"
    )]
    pub min_risk: Option<f64>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct GrantArgs {
    #[arg(value_name = "PATH", help = "Path to adjust")]
    pub path: PathBuf,

    #[arg(long, value_name = "WHO", value_parser = parse_subjects, help = "Subjects granted read")]
    pub read: Option<Subjects>,

    #[arg(long, value_name = "WHO", value_parser = parse_subjects, help = "Subjects granted write")]
    pub write: Option<Subjects>,

    #[arg(long, value_name = "WHO", value_parser = parse_subjects, help = "Subjects granted execute")]
    pub exec: Option<Subjects>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

impl GrantArgs {
    pub fn is_empty(&self) -> bool {
        self.read.is_none() && self.write.is_none() && self.exec.is_none()
    }
}

/// Owner/group/world selection parsed from `ugo` letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subjects {
    pub owner: bool,
    pub group: bool,
    pub world: bool,
}

impl Subjects {
    pub fn all() -> Self {
        Self {
            owner: true,
            group: true,
            world: true,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_subjects(s: &str) -> Result<Subjects, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(Subjects::default());
    }
    if s.is_empty() {
        return Err("Empty subject list. Use any of u, g, o, a or 'none'".to_string());
    }

    let mut subjects = Subjects::default();
    for c in s.chars() {
        match c {
            'u' => subjects.owner = true,
            'g' => subjects.group = true,
            'o' => subjects.world = true,
            'a' => subjects = Subjects::all(),
            _ => {
                return Err(format!(
                    "Invalid subject '{}' in '{}'. Valid letters: u, g, o, a",
                    c, s
                ))
            }
        }
    }
    Ok(subjects)
}

fn parse_risk(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("Invalid risk score: {}", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Risk score must lie in [0, 1], got {}", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_ls_args() {
        let args = CliArgs::parse_from(["permscope", "ls"]);
        match args.command {
            Commands::Ls(ls_args) => {
                assert!(ls_args.paths.is_empty());
                assert!(!ls_args.directory);
                assert_eq!(ls_args.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Ls command"),
        }
        assert!(args.color.is_none());
    }

    #[test]
    fn test_ls_with_options() {
        let args = CliArgs::parse_from(["permscope", "ls", "-d", "-f", "yaml", "/etc", "/tmp"]);
        match args.command {
            Commands::Ls(ls_args) => {
                assert!(ls_args.directory);
                assert_eq!(ls_args.format, OutputFormatArg::Yaml);
                assert_eq!(
                    ls_args.paths,
                    vec![PathBuf::from("/etc"), PathBuf::from("/tmp")]
                );
            }
            _ => panic!("Expected Ls command"),
        }
    }

    #[test]
    fn test_decode_requires_mode() {
        assert!(CliArgs::try_parse_from(["permscope", "decode"]).is_err());

        let args = CliArgs::parse_from(["permscope", "decode", "755", "0x1ff", "--raw"]);
        match args.command {
            Commands::Decode(decode_args) => {
                assert_eq!(decode_args.modes, vec!["755", "0x1ff"]);
                assert!(decode_args.raw);
            }
            _ => panic!("Expected Decode command"),
        }
    }

    #[test]
    fn test_audit_min_risk() {
        let args = CliArgs::parse_from(["permscope", "audit", "--min-risk", "0.8", "/srv"]);
        match args.command {
            Commands::Audit(audit_args) => {
                assert_eq!(audit_args.min_risk, Some(0.8));
                assert_eq!(audit_args.paths, vec![PathBuf::from("/srv")]);
            }
            _ => panic!("Expected Audit command"),
        }

        assert!(CliArgs::try_parse_from(["permscope", "audit", "--min-risk", "2"]).is_err());
        assert!(CliArgs::try_parse_from(["permscope", "audit", "--min-risk", "x"]).is_err());
    }

    #[test]
    fn test_grant_subjects() {
        let args = CliArgs::parse_from([
            "permscope", "grant", "f.txt", "--read", "ugo", "--write", "u", "--exec", "none",
        ]);
        match args.command {
            Commands::Grant(grant_args) => {
                assert_eq!(grant_args.read, Some(Subjects::all()));
                assert_eq!(
                    grant_args.write,
                    Some(Subjects {
                        owner: true,
                        group: false,
                        world: false
                    })
                );
                assert_eq!(grant_args.exec, Some(Subjects::default()));
                assert!(!grant_args.is_empty());
            }
            _ => panic!("Expected Grant command"),
        }
    }

    #[test]
    fn test_parse_subjects() {
        assert_eq!(parse_subjects("a"), Ok(Subjects::all()));
        assert_eq!(parse_subjects("NONE"), Ok(Subjects::default()));
        assert_eq!(
            parse_subjects("go"),
            Ok(Subjects {
                owner: false,
                group: true,
                world: true
            })
        );
        assert!(parse_subjects("").is_err());
        assert!(parse_subjects("ux").is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["permscope", "-v", "--color", "never", "ls"]);
        assert!(args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.color, Some(ColorMode::Never));

        let args = CliArgs::parse_from(["permscope", "ls", "-q"]);
        assert!(args.quiet);

        assert!(CliArgs::try_parse_from(["permscope", "-v", "-q", "ls"]).is_err());
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(["permscope", "--log-level", "debug", "ls"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }
}
