use crate::{
    error::ExtractError,
    ucd::{expand_blocks, parse_unicode_data, CharacterRecord},
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the latest `UnicodeData.txt` is published.
pub const UNICODE_DATA_URL: &str = "https://www.unicode.org/Public/UNIDATA/UnicodeData.txt";

/// Where to get the character database from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataSource {
    /// A local copy of `UnicodeData.txt`.
    File(PathBuf),
    /// A remote copy, kept in a local cache after the first download.
    Download {
        url: String,
        /// Overrides the default per-user cache directory.
        cache_dir: Option<PathBuf>,
    },
}
impl Default for DataSource {
    fn default() -> Self {
        DataSource::Download { url: UNICODE_DATA_URL.to_string(), cache_dir: None }
    }
}
impl DataSource {
    fn location(&self) -> String {
        match self {
            DataSource::File(path) => format!("'{}'", path.display()),
            DataSource::Download { url, .. } => format!("'{url}'"),
        }
    }

    fn unavailable(
        &self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> ExtractError {
        ExtractError::DataUnavailable { location: self.location(), source: source.into() }
    }

    fn load_bytes(&self) -> Result<Vec<u8>, ExtractError> {
        match self {
            DataSource::File(path) => {
                info!("Reading Unicode data from '{}'...", path.display());
                std::fs::read(path).map_err(|e| self.unavailable(e))
            }
            DataSource::Download { url, cache_dir } => {
                download(url, cache_dir.as_ref()).map_err(|e| self.unavailable(e))
            }
        }
    }

    /// Returns the raw text of the database.
    pub fn load_text(&self) -> Result<String, ExtractError> {
        let data = self.load_bytes()?;
        debug!("Loaded {} bytes of Unicode data.", data.len());
        String::from_utf8(data).map_err(|e| self.unavailable(e))
    }

    /// Loads and parses the database.
    pub fn load(&self, expand: bool) -> Result<Vec<CharacterRecord>, ExtractError> {
        let records = parse_unicode_data(&self.load_text()?)?;
        if expand {
            expand_blocks(records)
        } else {
            Ok(records)
        }
    }
}

#[cfg(feature = "download-data")]
fn download(url: &str, cache_dir: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    use ucdranges_common::download_cache::DownloadInfo;

    let info = match cache_dir {
        Some(dir) => DownloadInfo::for_url_in(url, dir)?,
        None => DownloadInfo::for_url(url)?,
    };
    Ok(info.load()?.to_vec())
}

#[cfg(not(feature = "download-data"))]
fn download(_url: &str, _cache_dir: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    anyhow::bail!("ucdranges was built without download support; pass a local file instead")
}
