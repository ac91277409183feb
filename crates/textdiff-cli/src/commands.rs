use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use textdiff_engine::{canonicalize_str, CompareOptions};
use textdiff_types::Side;
use tracing::{info, warn};

use crate::cli::*;
use crate::render::{self, Report};
use crate::state::{AppState, NoticeVariant};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, format),
        Command::Canonicalize(args) => cmd_canonicalize(args),
        Command::Config(args) => cmd_config(args, format),
    }
}

/// Read a file, or standard input for `-`.
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

fn load_options(config: Option<&Path>) -> anyhow::Result<CompareOptions> {
    match config {
        Some(path) => {
            let options = CompareOptions::load(path)?;
            info!(path = %path.display(), "loaded settings");
            Ok(options)
        }
        None => Ok(CompareOptions::default()),
    }
}

/// Settings file first, then flags on top.
fn compare_options(args: &CompareArgs) -> anyhow::Result<CompareOptions> {
    let mut options = load_options(args.config.as_deref())?;
    if args.json {
        options.json_mode = true;
    }
    if let Some(cleanup) = args.cleanup {
        options.cleanup = cleanup;
    }
    if let Some(edit_cost) = args.edit_cost {
        options.edit_cost = edit_cost;
    }
    if let Some(context) = args.context {
        options.context_size = context;
    }
    Ok(options)
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    if args.original == "-" && args.modified == "-" {
        bail!("only one side can be read from standard input");
    }
    let options = compare_options(&args)?;
    let original = read_input(&args.original)?;
    let modified = read_input(&args.modified)?;

    let mut state = AppState::new(options).with_texts(original, modified).toggle_mode();

    if let Some(notice) = &state.notice {
        if notice.variant == NoticeVariant::Error {
            bail!("{}\n{}", notice.title, notice.message);
        }
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&Report::identical())?);
            }
            OutputFormat::Text => {
                println!("{} {}", "ℹ".blue().bold(), notice.title.bold());
                println!("  {}", notice.message);
            }
        }
        return Ok(());
    }

    for key in args.expand {
        if state.expanded.is_expanded(key) {
            continue;
        }
        if !state.sections().iter().any(|s| !s.is_visible() && s.key() == key) {
            warn!(%key, "no collapsed section covers these rows");
        }
        state = state.toggle_section(key);
    }
    if args.full {
        state = state.expand_all();
    }

    let sections = state.sections();
    let Some(result) = state.result.as_ref() else {
        return Ok(());
    };
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Report::changed(result, sections))?);
        }
        OutputFormat::Text => {
            println!("{}  {}", "Original".bold(), "Modified".bold());
            print!("{}", render::format_rows(&render::rows(result, &sections)));
            println!("\n{}", render::summary(result).dimmed());
        }
    }
    Ok(())
}

fn cmd_canonicalize(args: CanonicalizeArgs) -> anyhow::Result<()> {
    let text = read_input(&args.path)?;
    println!("{}", canonicalize_str(&text, Side::Original)?);
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: OutputFormat) -> anyhow::Result<()> {
    let options = load_options(args.config.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Text => print!("{}", options.to_toml_string()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use textdiff_types::CleanupMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, text: &str) -> String {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap().write_all(text.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "settings.toml", "cleanup = \"none\"\ncontext_size = 7\n");
        let cli = parse(&[
            "textdiff", "compare", "a", "b", "--config", &config, "-C", "1", "--json",
        ]);
        let Command::Compare(args) = cli.command else {
            panic!("wrong command");
        };
        let options = compare_options(&args).unwrap();
        assert_eq!(options.cleanup, CleanupMode::None);
        assert_eq!(options.context_size, 1);
        assert!(options.json_mode);
        assert_eq!(options.edit_cost, 4);
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_options(Some(&missing)).is_err());
    }

    #[test]
    fn compare_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.txt", "one\ntwo\n");
        let b = write_file(&dir, "b.txt", "one\n2\n");
        assert!(run_command(parse(&["textdiff", "compare", &a, &b])).is_ok());
        let cli = parse(&["textdiff", "--format", "json", "compare", &a, &b, "--full"]);
        assert!(run_command(cli).is_ok());
    }

    #[test]
    fn identical_files_are_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.json", r#"{"x":1,"y":2}"#);
        let b = write_file(&dir, "b.json", "{\"y\": 2, \"x\": 1}\n");
        assert!(run_command(parse(&["textdiff", "compare", &a, &b, "--json"])).is_ok());
    }

    #[test]
    fn json_parse_error_names_side() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.json", "{}");
        let b = write_file(&dir, "b.json", "{oops");
        let err = run_command(parse(&["textdiff", "compare", &a, &b, "--json"])).unwrap_err();
        assert!(err.to_string().starts_with("JSON Parse Error - Modified Text"));
    }

    #[test]
    fn both_sides_from_stdin_rejected() {
        assert!(run_command(parse(&["textdiff", "compare", "-", "-"])).is_err());
    }

    #[test]
    fn missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.txt", "x");
        let missing = dir.path().join("missing.txt");
        let missing = missing.to_string_lossy();
        let err = read_input(&missing).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
        assert!(run_command(parse(&["textdiff", "compare", &a, &missing])).is_err());
    }

    #[test]
    fn canonicalize_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.json", r#"{"b":1,"a":[true,null]}"#);
        let bad = write_file(&dir, "bad.json", "[1,");
        assert!(run_command(parse(&["textdiff", "canonicalize", &good])).is_ok());
        assert!(run_command(parse(&["textdiff", "canonicalize", &bad])).is_err());
    }

    #[test]
    fn config_command() {
        assert!(run_command(parse(&["textdiff", "config"])).is_ok());
        assert!(run_command(parse(&["textdiff", "--format", "json", "config"])).is_ok());
    }
}
