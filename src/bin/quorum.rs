//! Command-line interface for quorum
//! This binary runs the Quorum lexer over files, mostly to inspect what an editor would see.
//!
//! Usage:
//!   quorum tokens `<path>` [--format `<format>`]   - List the tokens of every line
//!   quorum indent `<path>`                       - Print the file re-indented
//!   quorum electric `<text>`                     - Tell whether a line is electric
//!
//! Settings are layered: embedded defaults, then `quorum.toml` in the working directory if
//! present, then the file given with --config `<file>`, then --indent-unit `<n>`.

use clap::{Arg, ArgMatches, Command};
use quorum::quorum::config::{ConfigError, Loader, QuorumConfig};
use quorum::quorum::highlight::{highlight, reindent, render_listing};
use quorum::quorum::mode::QuorumMode;
use std::path::Path;

/// Project settings picked up from the working directory when present.
const PROJECT_CONFIG: &str = "quorum.toml";

fn main() {
    env_logger::Builder::from_default_env().init();

    let matches = cli().get_matches();

    let config = load_config(&matches, Path::new(PROJECT_CONFIG)).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let mode = QuorumMode::new(config);

    // Handle subcommands
    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(&mode, path, format);
        }
        Some(("indent", indent_matches)) => {
            let path = indent_matches.get_one::<String>("path").unwrap();
            handle_indent_command(&mode, path);
        }
        Some(("electric", electric_matches)) => {
            let text = electric_matches.get_one::<String>("text").unwrap();
            handle_electric_command(text);
        }
        _ => unreachable!(),
    }
}

fn cli() -> Command {
    Command::new("quorum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for lexing and indenting Quorum source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default settings")
                .global(true),
        )
        .arg(
            Arg::new("indent-unit")
                .long("indent-unit")
                .help("Columns per nesting level")
                .value_parser(clap::value_parser!(i64))
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the tokens of every line")
                .arg(
                    Arg::new("path")
                        .help("Path to the Quorum file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("indent")
                .about("Print the file with every line re-indented")
                .arg(
                    Arg::new("path")
                        .help("Path to the Quorum file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("electric")
                .about("Tell whether typing this line should re-indent it immediately")
                .arg(
                    Arg::new("text")
                        .help("The line as typed")
                        .required(true)
                        .index(1),
                ),
        )
}

/// Build the settings from the defaults, the project file, `--config` and `--indent-unit`
fn load_config(matches: &ArgMatches, project_file: &Path) -> Result<QuorumConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(project_file);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(unit) = matches.get_one::<i64>("indent-unit") {
        loader = loader.set_override("indent_unit", *unit)?;
    }
    loader.build()
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Render the per-line tokens of `source` in the requested format
fn format_tokens(mode: &QuorumMode, source: &str, format: &str) -> Result<String, String> {
    let lines = highlight(mode, source);
    match format {
        "text" => Ok(render_listing(&lines)),
        "json" => serde_json::to_string_pretty(&lines)
            .map_err(|e| format!("Error formatting tokens: {}", e)),
        other => Err(format!(
            "Format '{}' not supported\nAvailable formats: text, json",
            other
        )),
    }
}

/// Handle the tokens command
fn handle_tokens_command(mode: &QuorumMode, path: &str, format: &str) {
    let source = read_source(path);
    match format_tokens(mode, &source, format) {
        Ok(formatted) => print!("{}", formatted),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the indent command
fn handle_indent_command(mode: &QuorumMode, path: &str) {
    let source = read_source(path);
    print!("{}", reindent(mode, &source));
}

/// Handle the electric command
fn handle_electric_command(text: &str) {
    if QuorumMode::is_electric(text) {
        println!("electric");
    } else {
        println!("not electric");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn matches(args: &[&str]) -> ArgMatches {
        cli()
            .try_get_matches_from(std::iter::once("quorum").chain(args.iter().copied()))
            .expect("arguments to parse")
    }

    fn missing_project_file() -> PathBuf {
        PathBuf::from("does/not/exist/quorum.toml")
    }

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let file_name = format!("quorum-{}-{}.toml", name, std::process::id());
        let path = std::env::temp_dir().join(file_name);
        fs::write(&path, contents).expect("temp config to be written");
        path
    }

    #[test]
    fn defaults_apply_without_any_file() {
        let config = load_config(&matches(&["electric", "end"]), &missing_project_file())
            .expect("defaults to load");
        assert_eq!(config, QuorumConfig::default());
    }

    #[test]
    fn indent_unit_flag_overrides_defaults() {
        let config = load_config(
            &matches(&["--indent-unit", "2", "indent", "a.quorum"]),
            &missing_project_file(),
        )
        .expect("override to load");
        assert_eq!(config.indent_unit, 2);
    }

    #[test]
    fn zero_indent_unit_is_rejected() {
        let err = load_config(
            &matches(&["indent", "a.quorum", "--indent-unit", "0"]),
            &missing_project_file(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIndentUnit(0)));
    }

    #[test]
    fn project_file_is_layered_under_flags() {
        let project = write_temp_config("project", "indent_unit = 3\ntab_size = 8\n");

        let config = load_config(&matches(&["electric", "end"]), &project).expect("project file");
        assert_eq!(config.indent_unit, 3);
        assert_eq!(config.tab_size, 8);

        let config = load_config(&matches(&["--indent-unit", "2", "electric", "end"]), &project)
            .expect("project file with override");
        assert_eq!(config.indent_unit, 2);
        assert_eq!(config.tab_size, 8);

        fs::remove_file(project).ok();
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let err = load_config(
            &matches(&["--config", "does/not/exist.toml", "electric", "end"]),
            &missing_project_file(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn tokens_render_as_text_and_json() {
        let mode = QuorumMode::default();
        let source = "if a\nend\n";

        let text = format_tokens(&mode, source, "text").expect("text listing");
        assert!(text.starts_with("1 [2] if:keyword/indent"));

        let json = format_tokens(&mode, source, "json").expect("json listing");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["spans"][0]["text"], "if");
        assert_eq!(value[0]["spans"][0]["style"], "keyword");
        assert_eq!(value[1]["depth"], 1);
    }

    #[test]
    fn unknown_token_format_is_an_error() {
        let err = format_tokens(&QuorumMode::default(), "say x", "yaml").unwrap_err();
        assert!(err.contains("Format 'yaml' not supported"));
    }
}
