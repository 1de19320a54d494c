use crate::hashing::hash_fragment;
use anyhow::{bail, Context, Result};
use std::{
    fmt::{Debug, Formatter},
    io::Read,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};
use tracing::{debug, info, warn};

/// Upper bound on the size of a single download. `UnicodeData.txt` is around 2 MiB.
const MAX_DOWNLOAD_SIZE: u64 = 64 << 20;

static CACHE_DIR_OVERRIDE: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| std::env::var_os("UCDRANGES_CACHE_DIR").map(PathBuf::from));

/// Returns the default cache directory.
///
/// This is `UCDRANGES_CACHE_DIR` if set, the user's cache directory otherwise, or the system
/// temporary directory if the platform has no notion of a home directory.
pub fn default_cache_dir() -> PathBuf {
    if let Some(dir) = &*CACHE_DIR_OVERRIDE {
        return dir.clone();
    }
    match directories::ProjectDirs::from("", "", "ucdranges") {
        Some(project_dirs) => {
            let mut cache_dir = project_dirs.cache_dir().to_path_buf();
            cache_dir.push("dl_cache");
            cache_dir
        }
        None => {
            let mut cache_dir = std::env::temp_dir();
            cache_dir.push("ucdranges");
            cache_dir
        }
    }
}

/// A file that is downloaded on first use and read from a local cache afterwards.
#[derive(Clone)]
pub struct DownloadInfo {
    filename_prefix: String,
    filename_suffix: String,
    url: String,
    cache_dir: PathBuf,
}
impl DownloadInfo {
    pub fn for_url(url: &str) -> Result<DownloadInfo> {
        Self::for_url_in(url, &default_cache_dir())
    }

    pub fn for_url_in(url: &str, cache_dir: &Path) -> Result<DownloadInfo> {
        let filename = match url.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => bail!("Download URL has no file name: '{url}'"),
        };
        let (filename_prefix, filename_suffix) = match filename.rsplit_once('.') {
            Some((prefix, suffix)) if !prefix.is_empty() => {
                (prefix.to_string(), format!(".{suffix}"))
            }
            _ => (filename.to_string(), String::from(".dat")),
        };
        Ok(DownloadInfo {
            filename_prefix,
            filename_suffix,
            url: url.to_string(),
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The location this download is cached at.
    pub fn cache_path(&self) -> PathBuf {
        let filename = format!(
            "{}.{}{}",
            self.filename_prefix,
            hash_fragment(self.url.as_bytes()),
            self.filename_suffix
        );
        let mut cache_path = self.cache_dir.clone();
        cache_path.push(filename);
        cache_path
    }

    fn read_cached(&self, cache_path: &Path) -> Result<Option<Arc<[u8]>>> {
        if !cache_path.exists() {
            return Ok(None);
        }
        if !cache_path.is_file() {
            bail!("Cache path '{}' is not a file!? Just giving up.", cache_path.display());
        }

        let data = std::fs::read(cache_path)
            .with_context(|| format!("Could not read '{}'", cache_path.display()))?;
        if data.is_empty() {
            warn!("Corrupted cache file: {}", cache_path.display());
            std::fs::remove_file(cache_path)?;
            Ok(None)
        } else {
            Ok(Some(data.into()))
        }
    }

    fn download(&self) -> Result<Vec<u8>> {
        info!("Downloading '{}'...", self.url);
        let req = ureq::get(&self.url)
            .call()
            .with_context(|| format!("Could not download '{}'", self.url))?;
        let mut file_data = Vec::new();
        req.into_reader()
            .take(MAX_DOWNLOAD_SIZE)
            .read_to_end(&mut file_data)?;
        if file_data.is_empty() {
            bail!("Download of '{}' returned no data.", self.url);
        }
        debug!("Downloaded {} bytes.", file_data.len());
        Ok(file_data)
    }

    /// Returns the contents of the file, downloading it if no usable cached copy exists.
    pub fn load(&self) -> Result<Arc<[u8]>> {
        let cache_path = self.cache_path();
        debug!("Cached path: '{}'", cache_path.display());

        if let Some(data) = self.read_cached(&cache_path)? {
            return Ok(data);
        }

        let file_data = self.download()?;

        if !self.cache_dir.exists() {
            std::fs::create_dir_all(&self.cache_dir).with_context(|| {
                format!("Could not create cache directory '{}'", self.cache_dir.display())
            })?;
        } else if !self.cache_dir.is_dir() {
            bail!("Cache directory '{}' is not a directory.", self.cache_dir.display());
        }

        let mut cache_tmp_path = cache_path.clone();
        cache_tmp_path.pop();
        cache_tmp_path.push(format!(
            "{}{}.download-tmp-{}",
            self.filename_prefix,
            self.filename_suffix,
            std::process::id()
        ));

        // Never leave a partially written file at the cache path.
        std::fs::write(&cache_tmp_path, &file_data)?;
        std::fs::rename(&cache_tmp_path, &cache_path)?;

        Ok(file_data.into())
    }
}
impl Debug for DownloadInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadInfo")
            .field("filename_prefix", &self.filename_prefix)
            .field("filename_suffix", &self.filename_suffix)
            .field("url", &self.url)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}
