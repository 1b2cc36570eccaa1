use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use markdown_scribe_config::Config;
use markdown_scribe_engine::{ListItemIndent, Options, Settings, from_markdown, to_markdown};
use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};

#[derive(Parser, Debug, Default)]
#[command(name = "markdown-scribe")]
#[command(version, about = "Reads Markdown and prints it in normalised form", long_about = None)]
#[command(after_help = "EXAMPLES:
    markdown-scribe notes.md               Print notes.md normalised
    markdown-scribe --write notes.md       Normalise notes.md in place
    markdown-scribe --check notes.md       Exit with status 1 unless normalised
    cat notes.md | markdown-scribe -       Normalise stdin")]
struct Cli {
    /// Markdown file, or `-` for stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Rewrite FILE in place
    #[arg(short, long, requires = "file", conflicts_with = "check")]
    write: bool,

    /// Exit with status 1 if FILE is not normalised
    #[arg(long, requires = "file")]
    check: bool,

    /// Config file (default ~/.config/markdown-scribe/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging (repeat for debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Unordered list marker: `*`, `+` or `-`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    bullet: Option<char>,

    /// Marker for lists that would merge with their neighbour
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    bullet_other: Option<char>,

    /// Ordered list delimiter: `.` or `)`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    bullet_ordered: Option<char>,

    /// `*` or `_`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    emphasis: Option<char>,

    /// `*` or `_`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    strong: Option<char>,

    /// Code fence character: `` ` `` or `~`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    fence: Option<char>,

    /// Title delimiter: `"` or `'`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    quote: Option<char>,

    /// Thematic break character: `*`, `-` or `_`
    #[arg(long, value_name = "CHAR", value_parser = single_char)]
    rule: Option<char>,

    /// Thematic break length, 3 or more
    #[arg(long, value_name = "N")]
    rule_repetition: Option<usize>,

    /// List item indent: tab, one or mixed
    #[arg(long, value_name = "KIND")]
    list_item_indent: Option<ListItemIndent>,

    /// Always fence code
    #[arg(long)]
    fences: bool,

    /// Separate rule characters with spaces
    #[arg(long)]
    rule_spaces: bool,

    /// Close ATX headings
    #[arg(long)]
    close_atx: bool,

    /// Underline rank 1 and 2 headings
    #[arg(long)]
    setext: bool,

    /// Never use autolinks
    #[arg(long)]
    resource_link: bool,

    /// No blank line between definitions
    #[arg(long)]
    tight_definitions: bool,

    /// Repeat the first ordered list number
    #[arg(long)]
    no_increment: bool,
}

fn single_char(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => Ok(character),
        _ => Err(format!("expected a single character, got `{value}`")),
    }
}

impl Cli {
    /// The settings given on the command line; unset flags stay `None`.
    fn style(&self) -> Settings {
        let on = |flag: bool| flag.then_some(true);
        Settings {
            bullet: self.bullet,
            bullet_other: self.bullet_other,
            bullet_ordered: self.bullet_ordered,
            emphasis: self.emphasis,
            strong: self.strong,
            fence: self.fence,
            quote: self.quote,
            rule: self.rule,
            rule_repetition: self.rule_repetition,
            list_item_indent: self.list_item_indent,
            fences: on(self.fences),
            rule_spaces: on(self.rule_spaces),
            close_atx: on(self.close_atx),
            setext: on(self.setext),
            resource_link: on(self.resource_link),
            tight_definitions: on(self.tight_definitions),
            increment_list_marker: self.no_increment.then_some(false),
            ..Settings::default()
        }
    }

    /// FILE, unless it is missing or `-`.
    fn input(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

/// Config file settings with command-line flags laid over them.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let config = match &cli.config {
        Some(path) => {
            let path = Config::expand_path(path);
            Config::load_from_path(&path)?
                .ok_or_else(|| anyhow!("Config file not found at {}", path.display()))?
        }
        None => Config::load()?.unwrap_or_default(),
    };

    let mut settings = config.style;
    settings.overlay(&cli.style());
    Ok(settings)
}

fn normalise(markdown: &str, settings: &Settings) -> Result<String> {
    let tree = from_markdown(markdown);
    log::debug!("parsed {} top-level nodes", tree.children().len());
    let options = Options::new().with_settings(settings.clone());
    Ok(to_markdown(&tree, &options)?)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Returns whether the input was already normalised.
fn run(cli: &Cli) -> Result<bool> {
    let settings = resolve_settings(cli)?;
    let input = read_input(cli.input())?;
    let output = normalise(&input, &settings)?;
    let unchanged = output == input;

    match cli.input() {
        Some(path) if cli.check => {
            if !unchanged {
                log::info!("{} is not normalised", path.display());
            }
        }
        Some(path) if cli.write => {
            if unchanged {
                log::info!("{} already normalised", path.display());
            } else {
                std::fs::write(path, &output)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("rewrote {}", path.display());
            }
        }
        _ => io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write stdout")?,
    }

    Ok(unchanged)
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&cli) {
        Ok(unchanged) => {
            if cli.check && !unchanged {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("markdown-scribe").chain(args.iter().copied()))
    }

    fn with_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_style_flags() {
        let cli = parse(&[
            "--bullet",
            "-",
            "--emphasis",
            "_",
            "--list-item-indent",
            "one",
            "--setext",
            "--no-increment",
            "notes.md",
        ])
        .unwrap();
        let style = cli.style();

        assert_eq!(cli.input(), Some(Path::new("notes.md")));
        assert_eq!(style.bullet, Some('-'));
        assert_eq!(style.emphasis, Some('_'));
        assert_eq!(style.list_item_indent, Some(ListItemIndent::One));
        assert_eq!(style.setext, Some(true));
        assert_eq!(style.increment_list_marker, Some(false));
        assert_eq!(style.close_atx, None);
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["-vv"]).unwrap().verbose, 2);
        assert_eq!(parse(&["-v", "--verbose"]).unwrap().verbose, 2);
        assert_eq!(parse(&[]).unwrap().verbose, 0);
    }

    #[test]
    fn test_dash_means_stdin() {
        let cli = parse(&["-"]).unwrap();
        assert_eq!(cli.input(), None);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(&["--bullet"]).is_err());
        assert!(parse(&["--bullet", "ab"]).is_err());
        assert!(parse(&["--list-item-indent", "wide"]).is_err());
        assert!(parse(&["--rule-repetition", "many"]).is_err());
        assert!(parse(&["--nope"]).is_err());
        assert!(parse(&["a.md", "b.md"]).is_err());
        assert!(parse(&["--write"]).is_err());
        assert!(parse(&["--check", "--write", "a.md"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let config = with_config(&dir, "[style]\nbullet = \"+\"\nemphasis = \"_\"\n");
        let cli = Cli {
            config: Some(config),
            bullet: Some('-'),
            ..Cli::default()
        };

        let settings = resolve_settings(&cli).unwrap();

        assert_eq!(settings.bullet, Some('-'));
        assert_eq!(settings.emphasis, Some('_'));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            config: Some(dir.path().join("missing.toml")),
            ..Cli::default()
        };

        let err = resolve_settings(&cli).unwrap_err();

        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_normalise_markdown() {
        let output = normalise("Title\n=====\n\n- a\n- b\n", &Settings::default()).unwrap();
        assert_eq!(output, "# Title\n\n*   a\n*   b\n");
    }

    #[test]
    fn test_write_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let config = with_config(&dir, "");
        let file = dir.path().join("doc.md");
        std::fs::write(&file, "__a__\n").unwrap();
        let cli = Cli {
            file: Some(file.clone()),
            config: Some(config),
            write: true,
            ..Cli::default()
        };

        let unchanged = run(&cli).unwrap();

        assert!(!unchanged);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "**a**\n");
        assert!(run(&cli).unwrap());
    }

    #[test]
    fn test_check_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let config = with_config(&dir, "");
        let file = dir.path().join("doc.md");
        std::fs::write(&file, "* a\n").unwrap();
        let cli = Cli {
            file: Some(file.clone()),
            config: Some(config),
            check: true,
            ..Cli::default()
        };

        assert!(!run(&cli).unwrap());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "* a\n");
    }

    #[test]
    fn test_invalid_setting_fails() {
        let dir = TempDir::new().unwrap();
        let config = with_config(&dir, "");
        let file = dir.path().join("doc.md");
        std::fs::write(&file, "a\n").unwrap();
        let cli = Cli {
            file: Some(file),
            config: Some(config),
            check: true,
            fence: Some('#'),
            ..Cli::default()
        };

        let err = run(&cli).unwrap_err();

        assert!(err.to_string().contains("options.fence"));
    }
}
