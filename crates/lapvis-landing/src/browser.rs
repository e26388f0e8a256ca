//! Hands the dashboard URL to the desktop's default browser.

use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("refusing to open {0:?}: only http and https urls are supported")]
    UnsupportedScheme(String),

    #[error("failed to launch `{program}`")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Something that can show a URL to the user.
pub trait Opener {
    fn open(&mut self, url: &str) -> Result<(), OpenError>;
}

/// Opens URLs with the platform launcher (`xdg-open`, `open`, `cmd /C start`).
#[derive(Debug, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<(), OpenError> {
        check_scheme(url)?;

        let (program, args) = launcher(url);
        log::debug!("launching {program} {args:?}");

        // The launcher is fire-and-forget; the child is not waited on.
        Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| OpenError::Spawn { program, source })
    }
}

fn check_scheme(url: &str) -> Result<(), OpenError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(OpenError::UnsupportedScheme(url.to_string()))
    }
}

#[cfg(target_os = "windows")]
fn launcher(url: &str) -> (&'static str, Vec<String>) {
    // `start` treats the first quoted argument as a window title.
    ("cmd", vec!["/C".into(), "start".into(), String::new(), url.into()])
}

#[cfg(target_os = "macos")]
fn launcher(url: &str) -> (&'static str, Vec<String>) {
    ("open", vec![url.into()])
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher(url: &str) -> (&'static str, Vec<String>) {
    ("xdg-open", vec![url.into()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_passes_url_last() {
        let (program, args) = launcher("http://localhost:8501");
        assert!(!program.is_empty());
        assert_eq!(args.last().map(String::as_str), Some("http://localhost:8501"));
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    #[test]
    fn unix_desktops_use_xdg_open() {
        assert_eq!(launcher("http://x").0, "xdg-open");
    }

    #[test]
    fn non_http_urls_are_refused_before_spawning() {
        let err = SystemOpener.open("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, OpenError::UnsupportedScheme(u) if u == "file:///etc/passwd"));
    }

    #[test]
    fn spawn_error_names_program() {
        let err = OpenError::Spawn {
            program: "xdg-open",
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "failed to launch `xdg-open`");
        assert!(std::error::Error::source(&err).is_some());
    }
}
