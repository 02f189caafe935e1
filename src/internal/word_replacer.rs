#![allow(clippy::missing_docs_in_private_items)]

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordmap::{Backend, MapError, ResolveError, parse_rules, replace_words, resolve_rules};

#[derive(Parser, Debug)]
#[clap(
    name = "word_replacer",
    about = "Replaces words in a text file following a file of `old -> new` rules."
)]
struct Args {
    /// Text file whose words are replaced.
    #[clap(value_name = "INPUT_TEXT_FILE")]
    input: PathBuf,

    /// File of replacement rules, one `old -> new` per line.
    #[clap(value_name = "WORD_REPLACEMENTS_FILE")]
    rules: PathBuf,

    /// Structure storing the rules: bst, rbt or hash.
    #[clap(value_name = "bst|rbt|hash")]
    backend: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Cannot open file '{}' for input.", .0.display())]
    Unreadable(PathBuf),

    #[error(transparent)]
    Backend(#[from] MapError),

    #[error(transparent)]
    Rules(#[from] ResolveError),
}

/// Reads `path` as text. Bytes that are not valid UTF-8 become U+FFFD.
fn read(path: &Path) -> Result<String, CliError> {
    let bytes = fs::read(path).map_err(|err| {
        tracing::debug!(path = %path.display(), %err, "read failed");
        CliError::Unreadable(path.to_owned())
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(args: &Args) -> Result<String, CliError> {
    // Every argument is validated before any rule is read
    let text = read(&args.input)?;
    let rules = read(&args.rules)?;
    let backend: Backend = args.backend.parse()?;

    let rules = resolve_rules(parse_rules(&rules)?, backend)?;
    Ok(replace_words(&text, &rules))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Usage errors exit with status 1 like every other failure
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.use_stderr() => {
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            print!("{err}");
            return ExitCode::SUCCESS;
        }
    };

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &Path, rules: &Path, backend: &str) -> Args {
        Args { input: input.to_owned(), rules: rules.to_owned(), backend: backend.to_owned() }
    }

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("word_replacer_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_message() {
        let missing = Path::new("no/such/input.txt");
        let err = run(&args(missing, missing, "hash")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot open file 'no/such/input.txt' for input.");
    }

    #[test]
    fn test_checks_input_then_rules_then_backend() {
        let existing = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let missing_input = Path::new("missing_input.txt");
        let missing_rules = Path::new("missing_rules.txt");

        let err = run(&args(missing_input, missing_rules, "avl")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot open file 'missing_input.txt' for input.");

        let err = run(&args(&existing, missing_rules, "avl")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot open file 'missing_rules.txt' for input.");

        let err = run(&args(&existing, &existing, "avl")).unwrap_err();
        assert!(matches!(err, CliError::Backend(MapError::UnknownBackend(_))));
    }

    #[test]
    fn test_invalid_utf8_input_is_replaced_lossily() {
        let input = scratch_file("latin1.txt", b"\xff\xfe big\n");
        let rules = scratch_file("latin1_rules.txt", b"big -> large\n");

        let output = run(&args(&input, &rules, "hash")).unwrap();
        assert_eq!(output, "\u{fffd}\u{fffd} large");

        fs::remove_file(input).ok();
        fs::remove_file(rules).ok();
    }

    #[test]
    fn test_cycle_reported_once_as_error() {
        let input = scratch_file("cycle.txt", b"a\n");
        let rules = scratch_file("cycle_rules.txt", b"a -> b\nb -> a\n");

        let err = run(&args(&input, &rules, "rbt")).unwrap_err();
        assert_eq!(err.to_string(), "Cycle detected when trying to add replacement rule: b -> a");

        fs::remove_file(input).ok();
        fs::remove_file(rules).ok();
    }
}
