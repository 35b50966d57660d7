//! Fetch, strip and optionally save a document.

use std::path::Path;

use folio_core::{Fetcher, FolioResult};
use folio_text::BoilerplateStripper;

/// Fetch `url`, strip its boilerplate and optionally save the result.
///
/// Returns `Ok(None)` when the fetch fails. Only the save step can error.
pub async fn fetch_and_clean(
    fetcher: &dyn Fetcher,
    stripper: &BoilerplateStripper,
    url: &str,
    save_path: Option<&Path>,
) -> FolioResult<Option<String>> {
    let Some(raw) = fetcher.fetch(url).await else {
        return Ok(None);
    };

    let cleaned = stripper.strip(&raw);

    if let Some(path) = save_path {
        save_text_to_file(&cleaned, path).await?;
    }

    Ok(Some(cleaned))
}

/// Write `text` to `path`, creating parent directories as needed.
pub async fn save_text_to_file(text: &str, path: &Path) -> FolioResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, text).await?;

    tracing::info!(path = %path.display(), bytes = text.len(), "Saved text");
    Ok(())
}
