use anyhow::Result;

use super::translate::RequestFailed;
use crate::config::{ResolveOptions, load_resolved};
use crate::translation::Translator;
use crate::ui::{Spinner, Style};

/// Sends a one-word translation to verify the key and connectivity.
pub async fn run_check(model: Option<String>) -> Result<()> {
    let resolved = load_resolved(&ResolveOptions {
        model,
        ..ResolveOptions::default()
    })?;
    let translator = Translator::from_settings(resolved.settings)?;

    let spinner = Spinner::new(&format!("Connecting to {}...", translator.describe()));
    let check = translator.test_connection().await;
    spinner.stop();

    if check.success {
        println!("{} {}", Style::success("✓"), check.message);
        Ok(())
    } else {
        Err(RequestFailed {
            task: "Connection test",
            cause: check.message,
        }
        .into())
    }
}
