use super::cache_lock::acquire_cache_lock;
use crate::Result;
use crate::facts::RepoSpec;
use crate::scoring::ScoreResult;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     cache";
const CACHE_FILENAME: &str = "scores.json";

/// A cached score and when it was computed.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CachedScore {
    data: ScoreResult,
    timestamp: DateTime<Utc>,
}

/// On-disk document, keyed by `owner/repo`.
type CacheDocument = BTreeMap<String, CachedScore>;

/// Summary of what the cache currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of entries, fresh or not.
    pub count: usize,

    /// Size of the serialized document in bytes.
    pub size: usize,
}

/// A TTL-aware score cache backed by one JSON file.
#[derive(Debug, Clone)]
pub struct ScoreCache {
    dir: PathBuf,
    ttl: Duration,
    max_entries: usize,
    now: DateTime<Utc>,
    ignore: bool,
}

impl ScoreCache {
    /// Create a new cache.
    ///
    /// `now` is used both to judge freshness and to stamp new entries. When
    /// `ignore_cache` is set, lookups always miss but new scores are still stored.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>, ttl: Duration, max_entries: usize, now: DateTime<Utc>, ignore_cache: bool) -> Self {
        Self {
            dir: cache_dir.into(),
            ttl,
            max_entries,
            now,
            ignore: ignore_cache,
        }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the cache document.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(CACHE_FILENAME)
    }

    /// Look up a fresh score for a repository.
    #[must_use]
    pub fn get(&self, repo_spec: &RepoSpec) -> Option<ScoreResult> {
        if self.ignore {
            return None;
        }

        let key = repo_spec.cache_key();
        let mut document = self.read_document()?;

        let Some(entry) = document.remove(&key) else {
            log::debug!(target: LOG_TARGET, "Cache miss for {key}");
            return None;
        };

        // Future timestamps (clock skew) count as fresh
        let age = self.now.signed_duration_since(entry.timestamp);
        if age < chrono::TimeDelta::zero() {
            log::debug!(target: LOG_TARGET, "Cache timestamp is in the future for {key} (clock skew detected), treating as fresh");
            return Some(entry.data);
        }

        let age_duration = age.to_std().unwrap_or(Duration::MAX);
        if age_duration >= self.ttl {
            log::debug!(
                target: LOG_TARGET,
                "Cache expired for {key} (age: {:.1} hours, TTL: {:.1} hours)",
                age_duration.as_secs_f64() / 3600.0,
                self.ttl.as_secs_f64() / 3600.0
            );
            return None;
        }

        log::debug!(target: LOG_TARGET, "Cache hit for {key} (age: {:.1} hours)", age_duration.as_secs_f64() / 3600.0);
        Some(entry.data)
    }

    /// Store a score, then trim the document to the newest `max_entries` entries.
    pub async fn put(&self, repo_spec: &RepoSpec, result: &ScoreResult) -> Result<()> {
        fs::create_dir_all(&self.dir).into_app_err_with(|| format!("creating cache directory '{}'", self.dir.display()))?;
        let _lock = acquire_cache_lock(&self.dir).await?;

        let mut document = self.read_document().unwrap_or_default();
        let _ = document.insert(
            repo_spec.cache_key(),
            CachedScore {
                data: result.clone(),
                timestamp: self.now,
            },
        );

        evict_oldest(&mut document, self.max_entries);
        self.write_document(&document)
    }

    /// Remove every cached score.
    pub async fn clear(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let _lock = acquire_cache_lock(&self.dir).await?;
        let path = self.path();

        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!(target: LOG_TARGET, "Removed score cache '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).into_app_err_with(|| format!("removing cache file '{}'", path.display())),
        }
    }

    /// Count the cached entries and measure the document.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let Some(document) = self.read_document() else {
            return CacheStats::default();
        };

        CacheStats {
            count: document.len(),
            size: serde_json::to_vec(&document).map_or(0, |bytes| bytes.len()),
        }
    }

    /// Read the document, treating a missing or corrupt file as absent.
    fn read_document(&self) -> Option<CacheDocument> {
        let path = self.path();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "No usable score cache at '{}': {e:#}", path.display());
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(document) => Some(document),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Ignoring corrupt score cache '{}': {e:#}", path.display());
                None
            }
        }
    }

    fn write_document(&self, document: &CacheDocument) -> Result<()> {
        let path = self.path();

        let file = File::create(&path).into_app_err_with(|| format!("creating cache file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        #[cfg(debug_assertions)]
        let result = serde_json::to_writer_pretty(&mut writer, document);
        #[cfg(not(debug_assertions))]
        let result = serde_json::to_writer(&mut writer, document);

        result.into_app_err_with(|| format!("writing cache file '{}'", path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing cache file '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Wrote {} entries to '{}'", document.len(), path.display());
        Ok(())
    }
}

/// Keep only the `max_entries` most recently stamped entries.
fn evict_oldest(document: &mut CacheDocument, max_entries: usize) {
    if document.len() <= max_entries {
        return;
    }

    let mut by_age: Vec<(DateTime<Utc>, String)> = document.iter().map(|(key, entry)| (entry.timestamp, key.clone())).collect();
    by_age.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    for (_, key) in by_age.into_iter().skip(max_entries) {
        log::debug!(target: LOG_TARGET, "Evicting {key} from score cache");
        let _ = document.remove(&key);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::scoring::{RepoMetrics, calculate_score};
    use chrono::TimeZone;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn spec(text: &str) -> RepoSpec {
        RepoSpec::parse(text).unwrap()
    }

    fn sample_result(stars: u64) -> ScoreResult {
        let metrics = RepoMetrics {
            stars,
            forks: 10,
            has_readme: true,
            ..RepoMetrics::default()
        };
        calculate_score(&metrics, base_time())
    }

    fn cache_at(dir: &Path, now: DateTime<Utc>) -> ScoreCache {
        ScoreCache::new(dir, DAY, 50, now, false)
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_put_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cache_at(tmp.path(), base_time());
        let result = sample_result(100);

        cache.put(&spec("octo/widget"), &result).await.unwrap();

        assert_eq!(cache.get(&spec("octo/widget")), Some(result));
        assert_eq!(cache.get(&spec("octo/other")), None);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_put_creates_cache_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("nested").join("scores");
        let cache = cache_at(&nested, base_time());

        cache.put(&spec("octo/widget"), &sample_result(1)).await.unwrap();

        assert!(cache.path().exists());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_entry_expires_after_ttl() {
        let tmp = tempfile::tempdir().unwrap();
        cache_at(tmp.path(), base_time())
            .put(&spec("octo/widget"), &sample_result(100))
            .await
            .unwrap();

        let just_before = base_time() + chrono::Duration::hours(23) + chrono::Duration::minutes(59);
        assert!(cache_at(tmp.path(), just_before).get(&spec("octo/widget")).is_some());

        let at_ttl = base_time() + chrono::Duration::hours(24);
        assert!(cache_at(tmp.path(), at_ttl).get(&spec("octo/widget")).is_none());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_future_timestamp_treated_as_fresh() {
        let tmp = tempfile::tempdir().unwrap();
        cache_at(tmp.path(), base_time() + chrono::Duration::hours(5))
            .put(&spec("octo/widget"), &sample_result(100))
            .await
            .unwrap();

        assert!(cache_at(tmp.path(), base_time()).get(&spec("octo/widget")).is_some());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_sub_second_future_timestamp_treated_as_fresh() {
        let tmp = tempfile::tempdir().unwrap();
        cache_at(tmp.path(), base_time() + chrono::Duration::milliseconds(500))
            .put(&spec("octo/widget"), &sample_result(100))
            .await
            .unwrap();

        assert!(cache_at(tmp.path(), base_time()).get(&spec("octo/widget")).is_some());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_ignore_cache_skips_reads_but_still_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let ignoring = ScoreCache::new(tmp.path(), DAY, 50, base_time(), true);

        ignoring.put(&spec("octo/widget"), &sample_result(100)).await.unwrap();

        assert!(ignoring.get(&spec("octo/widget")).is_none());
        assert!(cache_at(tmp.path(), base_time()).get(&spec("octo/widget")).is_some());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_oldest_entries_are_evicted() {
        let tmp = tempfile::tempdir().unwrap();

        for i in 0..5_i64 {
            let cache = ScoreCache::new(tmp.path(), DAY, 3, base_time() + chrono::Duration::minutes(i), false);
            cache.put(&spec(&format!("octo/repo{i}")), &sample_result(10)).await.unwrap();
        }

        let cache = ScoreCache::new(tmp.path(), DAY, 3, base_time() + chrono::Duration::minutes(10), false);
        assert_eq!(cache.stats().count, 3);
        assert!(cache.get(&spec("octo/repo0")).is_none());
        assert!(cache.get(&spec("octo/repo1")).is_none());
        assert!(cache.get(&spec("octo/repo2")).is_some());
        assert!(cache.get(&spec("octo/repo3")).is_some());
        assert!(cache.get(&spec("octo/repo4")).is_some());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_put_replaces_existing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cache_at(tmp.path(), base_time());

        cache.put(&spec("octo/widget"), &sample_result(1)).await.unwrap();
        cache.put(&spec("octo/widget"), &sample_result(5_000)).await.unwrap();

        assert_eq!(cache.stats().count, 1);
        assert_eq!(cache.get(&spec("octo/widget")), Some(sample_result(5_000)));
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_corrupt_document_is_a_miss_and_gets_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cache_at(tmp.path(), base_time());
        fs::write(cache.path(), "not valid json").unwrap();

        assert!(cache.get(&spec("octo/widget")).is_none());
        assert_eq!(cache.stats(), CacheStats::default());

        cache.put(&spec("octo/widget"), &sample_result(1)).await.unwrap();
        assert!(cache.get(&spec("octo/widget")).is_some());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_stats_and_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cache_at(tmp.path(), base_time());

        assert_eq!(cache.stats(), CacheStats::default());

        cache.put(&spec("octo/one"), &sample_result(1)).await.unwrap();
        cache.put(&spec("octo/two"), &sample_result(2)).await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.count, 2);
        assert!(stats.size > 0);

        cache.clear().await.unwrap();
        assert_eq!(cache.stats(), CacheStats::default());
        assert!(!cache.path().exists());

        // Clearing twice is fine
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_clear_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cache_at(&tmp.path().join("never-created"), base_time());
        cache.clear().await.unwrap();
    }

    #[test]
    fn test_document_format() {
        let mut document = CacheDocument::new();
        let _ = document.insert(
            "octo/widget".into(),
            CachedScore {
                data: sample_result(3),
                timestamp: base_time(),
            },
        );

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["octo/widget"]["timestamp"], "2024-06-01T12:00:00Z");
        assert!(value["octo/widget"]["data"]["rawMetrics"]["stars"] == 3);
        assert_eq!(value["octo/widget"]["data"]["breakdown"].as_array().unwrap().len(), 6);
    }
}
