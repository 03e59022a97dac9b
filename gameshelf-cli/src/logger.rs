//! Console logging on top of `env_logger`.
//!
//! Info lines are the CLI's normal output and print bare. Warnings and errors
//! get a coloured tag. With `--verbose` every line is timestamped and tagged.
//! `--logfile` receives a copy of every line with ANSI escapes stripped.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let tee = match logfile {
        Some(path) => Some(Mutex::new(File::create(path)?)),
        None => None,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            let timestamp = verbose.then(|| buf.timestamp().to_string());
            let line = render(
                record.level(),
                &record.args().to_string(),
                timestamp.as_deref(),
                verbose,
            );
            writeln!(buf, "{line}")?;

            if let Some(file) = &tee {
                if let Ok(mut file) = file.lock() {
                    let plain = strip_ansi_escapes::strip(line.as_bytes());
                    file.write_all(&plain)?;
                    file.write_all(b"\n")?;
                }
            }
            Ok(())
        })
        .try_init()
        .map_err(|e| CliError::runtime(e.to_string()))
}

fn render(level: Level, message: &str, timestamp: Option<&str>, tag_all: bool) -> String {
    let tag = match level {
        Level::Error => Some(format!(
            "{}",
            "error:".if_supports_color(Stdout, |t| t.red())
        )),
        Level::Warn => Some(format!(
            "{}",
            "warning:".if_supports_color(Stdout, |t| t.yellow())
        )),
        Level::Info if !tag_all => None,
        Level::Info => Some("info:".to_string()),
        Level::Debug | Level::Trace => Some(format!(
            "{}",
            format!("{}:", level.as_str().to_lowercase()).if_supports_color(Stdout, |t| t.dimmed())
        )),
    };

    let mut line = String::new();
    if let Some(ts) = timestamp {
        line.push_str(ts);
        line.push(' ');
    }
    if let Some(tag) = tag {
        line.push_str(&tag);
        line.push(' ');
    }
    line.push_str(message);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(line.as_bytes())).unwrap()
    }

    #[test]
    fn info_prints_bare() {
        assert_eq!(render(Level::Info, "3 games", None, false), "3 games");
    }

    #[test]
    fn warnings_and_errors_are_tagged() {
        assert_eq!(
            plain(&render(Level::Warn, "skipped a.json", None, false)),
            "warning: skipped a.json"
        );
        assert_eq!(
            plain(&render(Level::Error, "catalog unavailable", None, false)),
            "error: catalog unavailable"
        );
    }

    #[test]
    fn verbose_lines_carry_timestamp_and_tag() {
        let line = render(Level::Info, "loaded", Some("2026-10-14T08:00:00Z"), true);
        assert_eq!(plain(&line), "2026-10-14T08:00:00Z info: loaded");
        let line = render(Level::Debug, "walk", None, true);
        assert_eq!(plain(&line), "debug: walk");
    }
}
