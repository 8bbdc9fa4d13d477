// crates/admdiv-core/src/loader/cache.rs

//! Parsed-input cache.
//!
//! Parsing the full GNS administrative table takes a while, so the parsed
//! [`LoadedDataset`] is written next to the names file as a bincode snapshot
//! and reused while it is newer than every source file and was produced from
//! the same source files with the same [`LoaderOptions`].

use super::{common_io, load_dataset, LoadedDataset};
use crate::config::LoaderOptions;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

pub use codec::CACHE_SUFFIX;

/// Snapshot framing: gzip with `compact`, plain bincode otherwise.
#[cfg(feature = "compact")]
mod codec {
    use flate2::{read::GzDecoder, write::GzEncoder, Compression};
    use std::io::{self, Read, Write};

    pub const CACHE_SUFFIX: &str = "comp.parsed.bin";

    pub(super) fn reader<R: Read>(inner: R) -> GzDecoder<R> {
        GzDecoder::new(inner)
    }

    pub(super) fn writer<W: Write>(inner: W) -> GzEncoder<W> {
        GzEncoder::new(inner, Compression::default())
    }

    pub(super) fn finish<W: Write>(writer: GzEncoder<W>) -> io::Result<W> {
        writer.finish()
    }
}

#[cfg(not(feature = "compact"))]
mod codec {
    use std::io::{self, Read, Write};

    pub const CACHE_SUFFIX: &str = "parsed.bin";

    pub(super) fn reader<R: Read>(inner: R) -> R {
        inner
    }

    pub(super) fn writer<W: Write>(inner: W) -> W {
        inner
    }

    pub(super) fn finish<W: Write>(writer: W) -> io::Result<W> {
        Ok(writer)
    }
}

/// Identity of a source file at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SourceStamp {
    path: PathBuf,
    len: u64,
    modified_nanos: u128,
}

impl SourceStamp {
    fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        let modified_nanos = meta.modified().ok()?.duration_since(UNIX_EPOCH).ok()?.as_nanos();
        Some(Self {
            path: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            len: meta.len(),
            modified_nanos,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct CachedDataset {
    options: LoaderOptions,
    names: Option<SourceStamp>,
    coordinates: Option<SourceStamp>,
    dataset: LoadedDataset,
}

impl CachedDataset {
    fn matches(&self, options: &LoaderOptions, names: &Option<SourceStamp>, coordinates: &Option<SourceStamp>) -> bool {
        self.options == *options && self.names == *names && self.coordinates == *coordinates
    }
}

/// **Smart Load:** checks the cache, loads the snapshot or parses the sources.
///
/// A snapshot is reused only for the same loader options and the same
/// source files (path, size and modification time).
pub fn load_dataset_cached(
    names: &Path,
    coordinates: Option<&Path>,
    options: &LoaderOptions,
) -> Result<LoadedDataset> {
    let cache_path = common_io::get_cache_path(names, CACHE_SUFFIX);
    let names_stamp = SourceStamp::of(names);
    let coordinates_stamp = coordinates.and_then(SourceStamp::of);

    // 1. Check Cache
    if is_cache_fresh(&cache_path, names, coordinates) {
        match read_snapshot(&cache_path) {
            Ok(cached) if cached.matches(options, &names_stamp, &coordinates_stamp) => {
                log::info!("Using parsed cache {}", cache_path.display());
                return Ok(cached.dataset);
            }
            Ok(_) => log::debug!("Cache {} was built from other inputs or options", cache_path.display()),
            Err(e) => log::debug!("Ignoring unreadable cache {}: {e}", cache_path.display()),
        }
    }

    // 2. Parse
    let dataset = load_dataset(names, coordinates, options)?;

    // 3. Cache (best effort)
    let snapshot = CachedDataset {
        options: options.clone(),
        names: names_stamp,
        coordinates: coordinates_stamp,
        dataset,
    };
    if let Err(e) = write_snapshot(&cache_path, &snapshot) {
        log::debug!("Could not write cache {}: {e}", cache_path.display());
    }

    Ok(snapshot.dataset)
}

fn is_cache_fresh(cache_path: &Path, names: &Path, coordinates: Option<&Path>) -> bool {
    let cache_time = match fs::metadata(cache_path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    std::iter::once(names).chain(coordinates).all(|source| {
        fs::metadata(source)
            .and_then(|m| m.modified())
            .is_ok_and(|source_time| source_time <= cache_time)
    })
}

fn read_snapshot(path: &Path) -> Result<CachedDataset> {
    let reader = codec::reader(BufReader::new(File::open(path)?));
    Ok(bincode::deserialize_from(reader)?)
}

fn write_snapshot(path: &Path, snapshot: &CachedDataset) -> Result<()> {
    let mut writer = codec::writer(BufWriter::new(File::create(path)?));
    bincode::serialize_into(&mut writer, snapshot)?;
    codec::finish(writer)?.flush()?;
    Ok(())
}
