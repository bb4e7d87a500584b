//! Static generation: every office page written to disk along with the public assets.

use std::{
    io,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use futures::{TryStreamExt, stream};
use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::office::{OFFICES_PATH, OfficePageError, OfficePageService};
use crate::infra::assets::{PUBLIC_ASSETS_PREFIX, write_public_assets};
use crate::infra::telemetry::PAGES_RENDERED_TOTAL;
use crate::presentation::views::LayoutChrome;

pub const MAX_CONCURRENCY: usize = 32;
const PAGE_FILE: &str = "index.html";

pub fn clamp_concurrency(requested: usize) -> usize {
    requested.clamp(1, MAX_CONCURRENCY)
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to enumerate office pages: {0}")]
    Paths(#[source] OfficePageError),
    #[error("failed to render office `{filename}`: {source}")]
    Page {
        filename: String,
        #[source]
        source: OfficePageError,
    },
    #[error("office filename `{0}` cannot be used as an output path")]
    InvalidFilename(String),
    #[error("failed to write `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub assets: usize,
    pub out_dir: PathBuf,
}

#[derive(Clone)]
pub struct SiteGenerator {
    offices: Arc<OfficePageService>,
    chrome: LayoutChrome,
}

impl SiteGenerator {
    pub fn new(offices: Arc<OfficePageService>, chrome: LayoutChrome) -> Self {
        Self { offices, chrome }
    }

    /// Render every page in the static path set. The first failure aborts generation.
    pub async fn generate(
        &self,
        out_dir: &Path,
        concurrency: usize,
    ) -> Result<GenerateReport, GenerateError> {
        let paths = self
            .offices
            .static_paths()
            .await
            .map_err(GenerateError::Paths)?;
        for filename in paths.filenames() {
            validate_filename(filename)?;
        }

        let written = AtomicUsize::new(0);
        let concurrency = clamp_concurrency(concurrency);

        stream::iter(paths.paths.into_iter().map(Ok::<_, GenerateError>))
            .try_for_each_concurrent(Some(concurrency), |path| {
                let written = &written;
                async move {
                    self.write_page(out_dir, &path.filename).await?;
                    written.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                }
            })
            .await?;

        let assets_dir = out_dir.join(PUBLIC_ASSETS_PREFIX);
        let assets = write_public_assets(&assets_dir)
            .await
            .map_err(|err| GenerateError::io(&assets_dir, err))?;

        let pages = written.load(Ordering::Relaxed);
        info!(
            target = "vitrine::build",
            pages,
            assets,
            out_dir = %out_dir.display(),
            "Generated static site"
        );

        Ok(GenerateReport {
            pages,
            assets,
            out_dir: out_dir.to_path_buf(),
        })
    }

    async fn write_page(&self, out_dir: &Path, filename: &str) -> Result<(), GenerateError> {
        let html = self
            .offices
            .render(self.chrome.clone(), filename)
            .await
            .map_err(|source| GenerateError::Page {
                filename: filename.to_string(),
                source,
            })?;

        let page_dir = out_dir.join(OFFICES_PATH).join(filename);
        tokio::fs::create_dir_all(&page_dir)
            .await
            .map_err(|err| GenerateError::io(&page_dir, err))?;
        let page_path = page_dir.join(PAGE_FILE);
        tokio::fs::write(&page_path, html)
            .await
            .map_err(|err| GenerateError::io(&page_path, err))?;

        counter!(PAGES_RENDERED_TOTAL).increment(1);
        info!(
            target = "vitrine::build",
            filename,
            path = %page_path.display(),
            "Wrote office page"
        );
        Ok(())
    }
}

fn validate_filename(filename: &str) -> Result<(), GenerateError> {
    let invalid = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..");
    if invalid {
        return Err(GenerateError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrency_is_clamped() {
        assert_eq!(clamp_concurrency(0), 1);
        assert_eq!(clamp_concurrency(8), 8);
        assert_eq!(clamp_concurrency(500), MAX_CONCURRENCY);
    }

    #[test]
    fn traversal_filenames_are_rejected() {
        for filename in ["", "../etc", "a/b", "a\\b"] {
            assert!(matches!(
                validate_filename(filename),
                Err(GenerateError::InvalidFilename(_))
            ));
        }
        assert!(validate_filename("gold-coast").is_ok());
    }
}
