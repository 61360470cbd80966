use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rocksdb::{DB, Direction, IteratorMode, Options, WriteBatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use wt_api_types::{Prediction, Timestamp, Wish, WishColor};

#[async_trait]
pub trait WishStore: Send + Sync {
    /// Store an already validated wish under a random palette color.
    async fn add_wish(&self, text: &str) -> Result<Wish>;
    /// Newest first, at most `limit` entries.
    async fn recent_wishes(&self, limit: usize) -> Result<Vec<Wish>>;
    async fn wish_count(&self) -> Result<u64>;
    async fn random_prediction(&self) -> Result<Option<Prediction>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishRecord {
    pub id: i64,
    pub text: String,
    pub color: WishColor,
    pub created_at_epoch_ms: i64,
}

impl WishRecord {
    fn to_wish(&self) -> Wish {
        Wish {
            id: Some(self.id),
            text: self.text.clone(),
            color: self.color.clone(),
            created_at: Timestamp::EpochMillis(self.created_at_epoch_ms),
        }
    }
}

/// Predictions every fresh store starts with.
pub fn default_predictions() -> Vec<Prediction> {
    [
        ("The New Year will bring unexpected joy!", WishColor::Red),
        ("A meeting with an old friend awaits you", WishColor::Blue),
        ("Your most cherished wish will come true", WishColor::Gold),
        ("The year will be full of travel", WishColor::Green),
        ("You will find what you have long been looking for", WishColor::Silver),
        ("Expect pleasant financial news", WishColor::Gold),
        ("A creative surge is coming your way", WishColor::Purple),
        ("Health and energy will be at their peak", WishColor::Blue),
        ("You will learn something completely new", WishColor::Green),
        ("Love and harmony will enter your home", WishColor::Red),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (text, color))| Prediction {
        id: Some(index as i64 + 1),
        text: text.to_owned(),
        color,
    })
    .collect()
}

fn random_color() -> WishColor {
    WishColor::PALETTE
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or(WishColor::Red)
}

fn choose_prediction(predictions: &[Prediction]) -> Option<Prediction> {
    predictions.choose(&mut rand::thread_rng()).cloned()
}

fn epoch_ms() -> Result<i64> {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    i64::try_from(millis).map_err(|_| anyhow!("system clock out of range"))
}

fn newest_first(records: &mut [WishRecord]) {
    records.sort_by(|a, b| {
        b.created_at_epoch_ms
            .cmp(&a.created_at_epoch_ms)
            .then(b.id.cmp(&a.id))
    });
}

pub struct InMemoryWishStore {
    wishes: RwLock<Vec<WishRecord>>,
    predictions: Vec<Prediction>,
}

impl Default for InMemoryWishStore {
    fn default() -> Self {
        Self::with_predictions(default_predictions())
    }
}

impl InMemoryWishStore {
    pub fn with_predictions(predictions: Vec<Prediction>) -> Self {
        Self {
            wishes: RwLock::new(Vec::new()),
            predictions,
        }
    }
}

#[async_trait]
impl WishStore for InMemoryWishStore {
    async fn add_wish(&self, text: &str) -> Result<Wish> {
        let created_at_epoch_ms = epoch_ms()?;
        let color = random_color();
        let mut guard = self.wishes.write().await;
        let id = guard.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = WishRecord {
            id,
            text: text.to_owned(),
            color,
            created_at_epoch_ms,
        };
        let wish = record.to_wish();
        guard.push(record);
        Ok(wish)
    }

    async fn recent_wishes(&self, limit: usize) -> Result<Vec<Wish>> {
        let mut records = self.wishes.read().await.clone();
        newest_first(&mut records);
        Ok(records.iter().take(limit).map(WishRecord::to_wish).collect())
    }

    async fn wish_count(&self) -> Result<u64> {
        Ok(self.wishes.read().await.len() as u64)
    }

    async fn random_prediction(&self) -> Result<Option<Prediction>> {
        Ok(choose_prediction(&self.predictions))
    }
}

const WISH_PREFIX: &str = "wish:";
const PREDICTION_PREFIX: &str = "prediction:";
const NEXT_WISH_ID_KEY: &str = "meta:next-wish-id";
/// First key past every `wish:` key; reverse scans start here.
const WISH_PREFIX_END: &str = "wish;";

pub struct RocksDbWishStore {
    db: Arc<DB>,
    id_lock: Mutex<()>,
}

impl RocksDbWishStore {
    pub fn open_default(path: &str) -> Result<Self> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path)?;
        let store = Self {
            db: Arc::new(db),
            id_lock: Mutex::new(()),
        };
        store.seed_predictions_if_empty()?;
        Ok(store)
    }

    fn key_for_wish(id: i64) -> String {
        format!("{WISH_PREFIX}{id:020}")
    }

    fn key_for_prediction(id: i64) -> String {
        format!("{PREDICTION_PREFIX}{id:04}")
    }

    fn seed_predictions_if_empty(&self) -> Result<usize> {
        if !self.predictions()?.is_empty() {
            return Ok(0);
        }
        let seeded = default_predictions();
        for (index, prediction) in seeded.iter().enumerate() {
            let id = prediction.id.unwrap_or(index as i64 + 1);
            let value = serde_json::to_vec(prediction)?;
            self.db.put(Self::key_for_prediction(id).as_bytes(), value)?;
        }
        Ok(seeded.len())
    }

    fn scan<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>> {
        let mut out = Vec::new();
        let mode = IteratorMode::From(prefix.as_bytes(), Direction::Forward);
        for item in self.db.iterator(mode) {
            let (key, value) = item?;
            if !key.as_ref().starts_with(prefix.as_bytes()) {
                break;
            }
            out.push(serde_json::from_slice::<T>(&value)?);
        }
        Ok(out)
    }

    fn next_wish_id(&self) -> Result<i64> {
        match self.db.get(NEXT_WISH_ID_KEY.as_bytes())? {
            Some(raw) => Ok(std::str::from_utf8(&raw)?.parse::<i64>()?),
            None => Ok(1),
        }
    }

    /// Writes the record and bumps the id counter in one batch, so the
    /// counter always equals the number of stored wishes plus one.
    fn insert_wish(&self, text: &str) -> Result<WishRecord> {
        let _guard = self
            .id_lock
            .lock()
            .map_err(|_| anyhow!("wish id allocator poisoned"))?;
        let record = WishRecord {
            id: self.next_wish_id()?,
            text: text.to_owned(),
            color: random_color(),
            created_at_epoch_ms: epoch_ms()?,
        };

        let mut batch = WriteBatch::default();
        batch.put(
            Self::key_for_wish(record.id).as_bytes(),
            serde_json::to_vec(&record)?,
        );
        batch.put(
            NEXT_WISH_ID_KEY.as_bytes(),
            (record.id + 1).to_string().as_bytes(),
        );
        self.db.write(batch)?;
        Ok(record)
    }

    pub fn predictions(&self) -> Result<Vec<Prediction>> {
        self.scan(PREDICTION_PREFIX)
    }

    /// Ids are zero-padded and only grow, so walking `wish:` keys backwards
    /// yields newest first and stops after `limit` decodes.
    fn newest_records(&self, limit: usize) -> Result<Vec<WishRecord>> {
        let mut out = Vec::with_capacity(limit.min(128));
        let mode = IteratorMode::From(WISH_PREFIX_END.as_bytes(), Direction::Reverse);
        for item in self.db.iterator(mode) {
            if out.len() >= limit {
                break;
            }
            let (key, value) = item?;
            if !key.as_ref().starts_with(WISH_PREFIX.as_bytes()) {
                break;
            }
            out.push(serde_json::from_slice::<WishRecord>(&value)?);
        }
        Ok(out)
    }
}

#[async_trait]
impl WishStore for RocksDbWishStore {
    async fn add_wish(&self, text: &str) -> Result<Wish> {
        Ok(self.insert_wish(text)?.to_wish())
    }

    async fn recent_wishes(&self, limit: usize) -> Result<Vec<Wish>> {
        Ok(self
            .newest_records(limit)?
            .iter()
            .map(WishRecord::to_wish)
            .collect())
    }

    async fn wish_count(&self) -> Result<u64> {
        let stored = self.next_wish_id()? - 1;
        Ok(u64::try_from(stored)?)
    }

    async fn random_prediction(&self) -> Result<Option<Prediction>> {
        Ok(choose_prediction(&self.predictions()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_lists_newest_first_with_limit() -> Result<()> {
        let store = InMemoryWishStore::default();
        for text in ["first", "second", "third"] {
            store.add_wish(text).await?;
        }

        let recent = store.recent_wishes(2).await?;
        let texts: Vec<&str> = recent.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["third", "second"]);
        assert_eq!(recent[0].id, Some(3));
        assert_eq!(store.wish_count().await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn added_wishes_take_a_palette_color() -> Result<()> {
        let store = InMemoryWishStore::default();
        let wish = store.add_wish("Peace").await?;
        assert!(WishColor::PALETTE.contains(&wish.color));
        assert!(matches!(wish.created_at, Timestamp::EpochMillis(ms) if ms > 0));
        Ok(())
    }

    #[tokio::test]
    async fn random_prediction_comes_from_seeded_set() -> Result<()> {
        let store = InMemoryWishStore::default();
        let seeded = default_predictions();
        for _ in 0..20 {
            let drawn = store.random_prediction().await?.expect("seeded predictions");
            assert!(seeded.contains(&drawn));
        }

        let empty = InMemoryWishStore::with_predictions(Vec::new());
        assert!(empty.random_prediction().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn rocksdb_persists_wishes_across_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().to_str().expect("utf-8 temp path").to_owned();

        {
            let store = RocksDbWishStore::open_default(&path)?;
            assert_eq!(store.wish_count().await?, 0);
            assert!(store.recent_wishes(20).await?.is_empty());
            store.add_wish("one").await?;
            store.add_wish("two").await?;
            assert_eq!(store.predictions()?.len(), 10);
        }

        let store = RocksDbWishStore::open_default(&path)?;
        assert_eq!(store.predictions()?.len(), 10, "seeding must not repeat");
        assert_eq!(store.wish_count().await?, 2);
        let latest = store.recent_wishes(1).await?;
        assert_eq!(latest[0].text, "two");

        let third = store.add_wish("three").await?;
        assert_eq!(third.id, Some(3));

        assert_eq!(store.wish_count().await?, 3);

        let recent = store.recent_wishes(20).await?;
        let texts: Vec<&str> = recent.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["three", "two", "one"]);

        let newest = store.recent_wishes(2).await?;
        let ids: Vec<Option<i64>> = newest.iter().map(|w| w.id).collect();
        assert_eq!(ids, [Some(3), Some(2)]);
        assert!(store.recent_wishes(0).await?.is_empty());

        let drawn = store.random_prediction().await?;
        assert!(drawn.is_some());
        Ok(())
    }
}
