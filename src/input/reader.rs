use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

/// Largest input accepted in one request.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Reads the text to translate or proofread.
pub struct InputReader;

impl InputReader {
    /// Reads `file_path`, or stdin when no path is given.
    ///
    /// A leading byte order mark is removed.
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        let text = match file_path {
            Some(path) => Self::read_file(path)?,
            None => Self::read_stdin()?,
        };
        Ok(text.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(text))
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        check_size(metadata.len() as usize, "file")?;

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        if io::stdin().is_terminal() {
            bail!(
                "No input provided\n\n\
                 Pass a file or pipe text into deepyami:\n  \
                 deepyami notes.txt\n  \
                 echo 'こんにちは' | deepyami"
            );
        }

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            check_size(buffer.len(), "input")?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn check_size(size: usize, what: &str) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input size ({:.1} MB) exceeds maximum allowed size (1 MB)\n\n\
             Consider splitting the {what} into smaller parts.",
            size as f64 / 1024.0 / 1024.0
        );
    }
    Ok(())
}
