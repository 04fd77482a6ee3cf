//! Turning assembled HTML into a paginated PDF.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Command,
};

use crate::{Error, geometry::PageGeometry};

/// Environment variable naming the browser executable.
pub const CHROME_ENV: &str = "MD2LAB_CHROME";

/// Executable names searched for on `PATH`, in order.
const CANDIDATES: [&str; 5] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Renders an HTML document to PDF bytes.
pub trait Rasterizer {
    /// # Errors
    ///
    /// Fails when the renderer cannot run or produces no document.
    fn rasterize(&self, html: &str, geometry: &PageGeometry) -> Result<Vec<u8>, Error>;
}

/// Inserts the print rules for `geometry` at the end of the document head.
#[must_use]
pub fn with_print_css(html: &str, geometry: &PageGeometry) -> String {
    let style = format!("<style>\n{}</style>\n", geometry.print_css());
    match html.find("</head>") {
        Some(at) => {
            let (head, rest) = html.split_at(at);
            format!("{head}{style}{rest}")
        }
        None => format!("{style}{html}"),
    }
}

/// Prints with a headless Chrome or Chromium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeRasterizer {
    executable: PathBuf,
}

impl ChromeRasterizer {
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Finds the browser: `explicit` first, then [`CHROME_ENV`], then the
    /// well-known executable names on `PATH`.
    ///
    /// # Errors
    ///
    /// Fails when none of them yields an executable.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, Error> {
        let found = resolve_executable(
            explicit,
            std::env::var_os(CHROME_ENV).as_deref(),
            std::env::var_os("PATH").as_deref(),
        )
        .ok_or(Error::BrowserNotFound)?;
        tracing::debug!(executable = %found.display(), "using browser");
        Ok(Self::new(found))
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

fn resolve_executable(
    explicit: Option<&Path>,
    env: Option<&OsStr>,
    path: Option<&OsStr>,
) -> Option<PathBuf> {
    if let Some(explicit) = explicit {
        return Some(explicit.to_path_buf());
    }
    if let Some(env) = env.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(env));
    }
    let dirs: Vec<PathBuf> = path.map(|p| std::env::split_paths(p).collect())?;
    CANDIDATES.iter().find_map(|name| {
        dirs.iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

impl Rasterizer for ChromeRasterizer {
    #[tracing::instrument(skip_all, fields(executable = %self.executable.display()))]
    fn rasterize(&self, html: &str, geometry: &PageGeometry) -> Result<Vec<u8>, Error> {
        let workdir = tempfile::tempdir().map_err(|e| Error::io(std::env::temp_dir(), e))?;
        let input = workdir.path().join("guide.html");
        let output = workdir.path().join("guide.pdf");
        std::fs::write(&input, with_print_css(html, geometry)).map_err(|e| Error::io(&input, e))?;

        let mut print_to = OsString::from("--print-to-pdf=");
        print_to.push(&output);
        let mut profile = OsString::from("--user-data-dir=");
        profile.push(workdir.path().join("profile"));
        let mut url = OsString::from("file://");
        url.push(&input);

        let mut command = Command::new(&self.executable);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--no-pdf-header-footer")
            .arg(profile)
            .arg(print_to)
            .arg(url);
        tracing::debug!(?command, "launching browser");

        let result = command.output().map_err(|source| Error::BrowserLaunch {
            executable: self.executable.clone(),
            source,
        })?;
        if !result.status.success() {
            return Err(Error::BrowserFailed {
                executable: self.executable.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        if let Ok(bytes) = std::fs::read(&output)
            && !bytes.is_empty()
        {
            tracing::debug!(bytes = bytes.len(), "rasterized document");
            return Ok(bytes);
        }
        Err(Error::NoOutput {
            executable: self.executable.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_print_css_goes_into_head() {
        let html = with_print_css(
            "<html><head><title>T</title></head><body></body></html>",
            &PageGeometry::letter(),
        );
        assert!(html.starts_with("<html><head><title>T</title><style>\n@page {"));
        assert!(html.ends_with("</style>\n</head><body></body></html>"));
    }

    #[test]
    fn test_print_css_without_head() {
        let html = with_print_css("<p>x</p>", &PageGeometry::letter());
        assert!(html.starts_with("<style>\n@page"));
        assert!(html.ends_with("<p>x</p>"));
    }

    #[test]
    fn test_executable_resolution_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chromium"), b"").unwrap();
        let path = std::env::join_paths([dir.path()]).unwrap();

        assert_eq!(
            resolve_executable(
                Some(Path::new("/opt/chrome")),
                Some(OsStr::new("/env/chrome")),
                Some(path.as_os_str())
            ),
            Some(PathBuf::from("/opt/chrome"))
        );
        assert_eq!(
            resolve_executable(None, Some(OsStr::new("/env/chrome")), Some(path.as_os_str())),
            Some(PathBuf::from("/env/chrome"))
        );
        assert_eq!(
            resolve_executable(None, Some(OsStr::new("")), Some(path.as_os_str())),
            Some(dir.path().join("chromium"))
        );
        assert_eq!(resolve_executable(None, None, None), None);
    }

    #[test]
    fn test_missing_executable_fails_to_launch() {
        let rasterizer = ChromeRasterizer::new("/nonexistent/md2lab-chrome");
        let result = rasterizer.rasterize("<p>x</p>", &PageGeometry::letter());
        assert!(matches!(result, Err(Error::BrowserLaunch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_browser_reports_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-chrome");
        std::fs::write(&script, "#!/bin/sh\necho 'no display' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = ChromeRasterizer::new(&script).rasterize("<p>x</p>", &PageGeometry::letter());
        let Err(Error::BrowserFailed { stderr, .. }) = result else {
            panic!("expected BrowserFailed, got {result:?}");
        };
        assert_eq!(stderr, "no display");
    }

    #[cfg(unix)]
    #[test]
    fn test_browser_without_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-chrome");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = ChromeRasterizer::new(&script).rasterize("<p>x</p>", &PageGeometry::letter());
        assert!(matches!(result, Err(Error::NoOutput { .. })));
    }
}
