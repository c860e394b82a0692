//! Generic CRUD + ordering over one watchlist collection.
//!
//! One repository instance serves one entity kind. Table and column names
//! are interpolated from the kind's static descriptor only; every runtime
//! value is bound.

use chrono::Utc;

use crate::db::WatchlistDb;
use crate::error::StoreError;
use crate::kind::{DeleteMode, TickerKind, UniquenessScope};
use crate::models::{NewTicker, Ticker, TickerRef, TickerUpdate};

/// Stored timestamp format, UTC (matches the schema's CURRENT_TIMESTAMP).
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_str() -> String {
    Utc::now().format(TS_FORMAT).to_string()
}

pub struct TickerRepository {
    db: WatchlistDb,
    kind: &'static TickerKind,
}

impl TickerRepository {
    pub fn new(db: WatchlistDb, kind: &'static TickerKind) -> Self {
        Self { db, kind }
    }

    pub fn kind(&self) -> &'static TickerKind {
        self.kind
    }

    /// SELECT list with kind columns aliased onto the unified `Ticker`
    /// shape. Kinds without a metadata column alias a NULL in its place.
    fn select_columns(&self) -> String {
        let extra = match self.kind.extra_column {
            Some(col) => format!("{} AS extra", col),
            None => "NULL AS extra".to_string(),
        };
        format!(
            "id, {} AS \"key\", {} AS name, {}, is_active, display_order, created_at, updated_at",
            self.kind.key_column, self.kind.name_column, extra
        )
    }

    fn normalize_key(&self, key: &str) -> String {
        let key = key.trim();
        if self.kind.uppercase_keys {
            key.to_uppercase()
        } else {
            key.to_string()
        }
    }

    fn normalize_ref(&self, target: &TickerRef) -> TickerRef {
        match target {
            TickerRef::Id(id) => TickerRef::Id(*id),
            TickerRef::Key(key) => TickerRef::Key(self.normalize_key(key)),
        }
    }

    /// All active rows in display order. Ties in `display_order` are broken
    /// by id so the listing stays stable when orders collide.
    pub async fn list(&self) -> Result<Vec<Ticker>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE is_active = 1 ORDER BY display_order ASC, id ASC",
            self.select_columns(),
            self.kind.table
        );

        let rows = sqlx::query_as::<_, Ticker>(&sql)
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows)
    }

    /// Direct lookup regardless of active state. A key that matches several
    /// rows (reused after soft delete) resolves to the active row first,
    /// then the newest.
    pub async fn get(&self, target: TickerRef) -> Result<Option<Ticker>, StoreError> {
        let target = self.normalize_ref(&target);
        let sql = match &target {
            TickerRef::Id(_) => format!(
                "SELECT {} FROM {} WHERE id = ?",
                self.select_columns(),
                self.kind.table
            ),
            TickerRef::Key(_) => format!(
                "SELECT {} FROM {} WHERE {} = ? ORDER BY is_active DESC, id DESC LIMIT 1",
                self.select_columns(),
                self.kind.table,
                self.kind.key_column
            ),
        };

        let query = sqlx::query_as::<_, Ticker>(&sql);
        let query = match &target {
            TickerRef::Id(id) => query.bind(*id),
            TickerRef::Key(key) => query.bind(key.clone()),
        };

        Ok(query.fetch_optional(self.db.pool()).await?)
    }

    /// Lookup restricted to active rows.
    async fn find_active(&self, target: &TickerRef) -> Result<Option<Ticker>, StoreError> {
        let sql = match target {
            TickerRef::Id(_) => format!(
                "SELECT {} FROM {} WHERE id = ? AND is_active = 1",
                self.select_columns(),
                self.kind.table
            ),
            TickerRef::Key(_) => format!(
                "SELECT {} FROM {} WHERE {} = ? AND is_active = 1 LIMIT 1",
                self.select_columns(),
                self.kind.table,
                self.kind.key_column
            ),
        };

        let query = sqlx::query_as::<_, Ticker>(&sql);
        let query = match target {
            TickerRef::Id(id) => query.bind(*id),
            TickerRef::Key(key) => query.bind(key.clone()),
        };

        Ok(query.fetch_optional(self.db.pool()).await?)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Ticker, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            self.select_columns(),
            self.kind.table
        );
        Ok(sqlx::query_as::<_, Ticker>(&sql)
            .bind(id)
            .fetch_one(self.db.pool())
            .await?)
    }

    /// Insert a new active row at the end of the display order.
    ///
    /// The duplicate check runs within the kind's uniqueness scope: active
    /// rows only for soft-delete kinds (a deactivated key can be re-added),
    /// all rows otherwise.
    pub async fn add(&self, input: NewTicker) -> Result<Ticker, StoreError> {
        let key = self.normalize_key(&input.key);
        let name = input.name.trim().to_string();
        let extra = input
            .extra
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        if key.is_empty() || name.is_empty() {
            return Err(StoreError::Validation(format!(
                "{} requires a key and a display name",
                self.kind.label
            )));
        }
        if self.kind.extra_required && extra.is_none() {
            return Err(StoreError::Validation(format!(
                "{} requires {}",
                self.kind.label,
                self.kind.extra_column.unwrap_or("extra")
            )));
        }

        let dup_sql = match self.kind.uniqueness {
            UniquenessScope::ActiveOnly => format!(
                "SELECT id FROM {} WHERE {} = ? AND is_active = 1",
                self.kind.table, self.kind.key_column
            ),
            UniquenessScope::AllRows => format!(
                "SELECT id FROM {} WHERE {} = ?",
                self.kind.table, self.kind.key_column
            ),
        };
        let existing: Option<(i64,)> = sqlx::query_as(&dup_sql)
            .bind(&key)
            .fetch_optional(self.db.pool())
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "{} '{}' already exists",
                self.kind.label, key
            )));
        }

        // Next display slot: one past the highest active order.
        let max_sql = format!(
            "SELECT COALESCE(MAX(display_order), 0) FROM {} WHERE is_active = 1",
            self.kind.table
        );
        let (max_order,): (i64,) = sqlx::query_as(&max_sql).fetch_one(self.db.pool()).await?;

        let now = now_str();
        let insert_sql = match self.kind.extra_column {
            Some(extra_col) => format!(
                "INSERT INTO {} ({}, {}, {}, is_active, display_order, created_at, updated_at) \
                 VALUES (?, ?, ?, 1, ?, ?, ?)",
                self.kind.table, self.kind.key_column, self.kind.name_column, extra_col
            ),
            None => format!(
                "INSERT INTO {} ({}, {}, is_active, display_order, created_at, updated_at) \
                 VALUES (?, ?, 1, ?, ?, ?)",
                self.kind.table, self.kind.key_column, self.kind.name_column
            ),
        };

        let mut query = sqlx::query(&insert_sql).bind(&key).bind(&name);
        if self.kind.extra_column.is_some() {
            query = query.bind(&extra);
        }
        let result = query
            .bind(max_order + 1)
            .bind(&now)
            .bind(&now)
            .execute(self.db.pool())
            .await?;

        self.fetch_by_id(result.last_insert_rowid()).await
    }

    /// Overwrite the mutable fields of one row. The display order is never
    /// touched here; a row keeps its slot while edited, even across
    /// deactivation and reactivation.
    pub async fn update(
        &self,
        target: TickerRef,
        changes: TickerUpdate,
    ) -> Result<Ticker, StoreError> {
        let name = changes.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation(format!(
                "{} requires a display name",
                self.kind.label
            )));
        }

        let current = self
            .get(target.clone())
            .await?
            .ok_or_else(|| self.not_found(&target))?;

        let extra = match (&changes.extra, self.kind.extra_column) {
            (Some(value), Some(col)) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    if self.kind.extra_required {
                        return Err(StoreError::Validation(format!(
                            "{} requires {}",
                            self.kind.label, col
                        )));
                    }
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            (None, Some(_)) => current.extra.clone(),
            (_, None) => None,
        };
        let is_active = changes.is_active.unwrap_or(current.is_active);

        let now = now_str();
        let result = match self.kind.extra_column {
            Some(extra_col) => {
                let sql = format!(
                    "UPDATE {} SET {} = ?, {} = ?, is_active = ?, updated_at = ? WHERE id = ?",
                    self.kind.table, self.kind.name_column, extra_col
                );
                sqlx::query(&sql)
                    .bind(&name)
                    .bind(&extra)
                    .bind(is_active)
                    .bind(&now)
                    .bind(current.id)
                    .execute(self.db.pool())
                    .await?
            }
            None => {
                let sql = format!(
                    "UPDATE {} SET {} = ?, is_active = ?, updated_at = ? WHERE id = ?",
                    self.kind.table, self.kind.name_column
                );
                sqlx::query(&sql)
                    .bind(&name)
                    .bind(is_active)
                    .bind(&now)
                    .bind(current.id)
                    .execute(self.db.pool())
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(self.not_found(&target));
        }

        self.fetch_by_id(current.id).await
    }

    /// Remove a row per the kind's delete mode and return its final state.
    ///
    /// Soft delete deactivates and reports the deactivated row; hard delete
    /// removes the row and reports it as it was. Zero matching rows is
    /// `NotFound` in both modes, never a silent success.
    pub async fn delete(&self, target: TickerRef) -> Result<Ticker, StoreError> {
        let target = self.normalize_ref(&target);
        match self.kind.delete_mode {
            DeleteMode::Soft => self.soft_delete(&target).await,
            DeleteMode::Hard => self.hard_delete(&target).await,
        }
    }

    async fn soft_delete(&self, target: &TickerRef) -> Result<Ticker, StoreError> {
        // Only an active row can be deactivated.
        let row = self
            .find_active(target)
            .await?
            .ok_or_else(|| self.not_found(target))?;

        let sql = format!(
            "UPDATE {} SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
            self.kind.table
        );
        let result = sqlx::query(&sql)
            .bind(now_str())
            .bind(row.id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(target));
        }

        self.fetch_by_id(row.id).await
    }

    async fn hard_delete(&self, target: &TickerRef) -> Result<Ticker, StoreError> {
        let row = self
            .get(target.clone())
            .await?
            .ok_or_else(|| self.not_found(target))?;

        let sql = format!("DELETE FROM {} WHERE id = ?", self.kind.table);
        let result = sqlx::query(&sql)
            .bind(row.id)
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(target));
        }

        Ok(row)
    }

    /// Rewrite display orders to match the given sequence: element `i` gets
    /// order `i + 1`. The whole batch runs in one transaction; an unknown or
    /// inactive target rolls everything back, so orders are never partially
    /// applied. A subset of the collection is a valid input. Returns the
    /// number of rows updated.
    pub async fn reorder(&self, ordered: &[TickerRef]) -> Result<u64, StoreError> {
        if ordered.is_empty() {
            return Err(StoreError::Validation(format!(
                "{} reorder list is empty",
                self.kind.label
            )));
        }

        let now = now_str();
        let id_sql = format!(
            "UPDATE {} SET display_order = ?, updated_at = ? WHERE id = ? AND is_active = 1",
            self.kind.table
        );
        let key_sql = format!(
            "UPDATE {} SET display_order = ?, updated_at = ? WHERE {} = ? AND is_active = 1",
            self.kind.table, self.kind.key_column
        );

        let mut tx = self.db.pool().begin().await?;
        let mut updated = 0u64;

        for (position, target) in ordered.iter().enumerate() {
            let order = (position + 1) as i64;
            let target = self.normalize_ref(target);
            let result = match &target {
                TickerRef::Id(id) => {
                    sqlx::query(&id_sql)
                        .bind(order)
                        .bind(&now)
                        .bind(*id)
                        .execute(&mut *tx)
                        .await?
                }
                TickerRef::Key(key) => {
                    sqlx::query(&key_sql)
                        .bind(order)
                        .bind(&now)
                        .bind(key.clone())
                        .execute(&mut *tx)
                        .await?
                }
            };

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back everything applied so
                // far in this batch.
                return Err(self.not_found(&target));
            }
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }

    fn not_found(&self, target: &TickerRef) -> StoreError {
        StoreError::NotFound(format!(
            "no active {} with {}",
            self.kind.label,
            target.describe()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{CRYPTO, KOREAN_STOCKS, STOCKS, WEATHER_CITIES};

    async fn repo(kind: &'static TickerKind) -> TickerRepository {
        let db = WatchlistDb::memory().await.unwrap();
        TickerRepository::new(db, kind)
    }

    fn entry(key: &str, name: &str) -> NewTicker {
        NewTicker {
            key: key.to_string(),
            name: name.to_string(),
            extra: None,
        }
    }

    fn entry_with(key: &str, name: &str, extra: &str) -> NewTicker {
        NewTicker {
            key: key.to_string(),
            name: name.to_string(),
            extra: Some(extra.to_string()),
        }
    }

    fn changes(name: &str) -> TickerUpdate {
        TickerUpdate {
            name: name.to_string(),
            extra: None,
            is_active: None,
        }
    }

    fn keys(rows: &[Ticker]) -> Vec<&str> {
        rows.iter().map(|t| t.key.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_display_orders() {
        let repo = repo(&STOCKS).await;

        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        let third = repo.add(entry("NVDA", "Nvidia")).await.unwrap();

        assert_eq!(third.display_order, 3);
        assert!(third.is_active);

        let listed = repo.list().await.unwrap();
        assert_eq!(keys(&listed), vec!["AAPL", "MSFT", "NVDA"]);
        let orders: Vec<i64> = listed.iter().map(|t| t.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_add_uppercases_and_trims_keys() {
        let repo = repo(&STOCKS).await;

        let added = repo.add(entry("  aapl ", "Apple")).await.unwrap();
        assert_eq!(added.key, "AAPL");

        let found = repo.get(TickerRef::Key("aapl".to_string())).await.unwrap();
        assert_eq!(found.unwrap().id, added.id);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_key_and_name() {
        let repo = repo(&STOCKS).await;

        let err = repo.add(entry("   ", "Apple")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = repo.add(entry("AAPL", "  ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_active_key() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();

        // Case-insensitive because keys are normalized before the check.
        let err = repo.add(entry("aapl", "Apple again")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_row_and_frees_key() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        repo.add(entry("NVDA", "Nvidia")).await.unwrap();

        let removed = repo.delete(TickerRef::Key("AAPL".to_string())).await.unwrap();
        assert!(!removed.is_active);

        let listed = repo.list().await.unwrap();
        assert_eq!(keys(&listed), vec!["MSFT", "NVDA"]);

        // The row survives for direct lookup.
        let kept = repo
            .get(TickerRef::Key("AAPL".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert!(!kept.is_active);

        // Re-adding lands after the remaining active rows.
        let readded = repo.add(entry("AAPL", "Apple")).await.unwrap();
        assert_eq!(readded.display_order, 4);
        assert_eq!(keys(&repo.list().await.unwrap()), vec!["MSFT", "NVDA", "AAPL"]);
    }

    #[tokio::test]
    async fn test_delete_without_active_match_is_not_found() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();

        repo.delete(TickerRef::Key("AAPL".to_string())).await.unwrap();

        // Already inactive, so a second delete has nothing to target.
        let err = repo
            .delete(TickerRef::Key("AAPL".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = repo.delete(TickerRef::Id(999)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_overwrites_name_and_extra() {
        let repo = repo(&STOCKS).await;
        let added = repo
            .add(entry_with("AAPL", "Apple", "Consumer Tech"))
            .await
            .unwrap();

        let updated = repo
            .update(
                TickerRef::Key("AAPL".to_string()),
                TickerUpdate {
                    name: "Apple Inc.".to_string(),
                    extra: Some("Technology".to_string()),
                    is_active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.name, "Apple Inc.");
        assert_eq!(updated.extra.as_deref(), Some("Technology"));
        assert_eq!(updated.display_order, added.display_order);

        // Omitted extra keeps the stored value; a blank one clears it.
        let kept = repo
            .update(TickerRef::Id(added.id), changes("Apple Inc."))
            .await
            .unwrap();
        assert_eq!(kept.extra.as_deref(), Some("Technology"));

        let cleared = repo
            .update(
                TickerRef::Id(added.id),
                TickerUpdate {
                    name: "Apple Inc.".to_string(),
                    extra: Some("  ".to_string()),
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.extra, None);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let repo = repo(&STOCKS).await;
        let added = repo.add(entry("AAPL", "Apple")).await.unwrap();

        // Backdate the stored timestamp so the refresh is observable
        // without waiting out the second granularity.
        sqlx::query("UPDATE stock_tickers SET updated_at = '2000-01-01 00:00:00' WHERE id = ?")
            .bind(added.id)
            .execute(repo.db.pool())
            .await
            .unwrap();

        let updated = repo
            .update(TickerRef::Id(added.id), changes("Apple Inc."))
            .await
            .unwrap();
        assert_ne!(updated.updated_at.as_deref(), Some("2000-01-01 00:00:00"));
        assert_eq!(updated.created_at, added.created_at);
    }

    #[tokio::test]
    async fn test_update_validates_name_and_target() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();

        let err = repo
            .update(TickerRef::Key("AAPL".to_string()), changes("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = repo
            .update(TickerRef::Key("MSFT".to_string()), changes("Microsoft"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_can_deactivate_and_reactivate() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();

        let off = repo
            .update(
                TickerRef::Key("AAPL".to_string()),
                TickerUpdate {
                    name: "Apple".to_string(),
                    extra: None,
                    is_active: Some(false),
                },
            )
            .await
            .unwrap();
        assert!(!off.is_active);
        assert!(repo.list().await.unwrap().is_empty());

        // Key lookup still resolves the inactive row, so it can come back.
        let on = repo
            .update(
                TickerRef::Key("AAPL".to_string()),
                TickerUpdate {
                    name: "Apple".to_string(),
                    extra: None,
                    is_active: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(on.is_active);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reorder_applies_positions() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        repo.add(entry("NVDA", "Nvidia")).await.unwrap();

        let refs = vec![
            TickerRef::Key("NVDA".to_string()),
            TickerRef::Key("AAPL".to_string()),
            TickerRef::Key("MSFT".to_string()),
        ];
        let updated = repo.reorder(&refs).await.unwrap();
        assert_eq!(updated, 3);
        assert_eq!(keys(&repo.list().await.unwrap()), vec!["NVDA", "AAPL", "MSFT"]);

        // Reordering to the same sequence changes nothing.
        repo.reorder(&refs).await.unwrap();
        assert_eq!(keys(&repo.list().await.unwrap()), vec!["NVDA", "AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_reorder_rolls_back_on_unknown_target() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        repo.add(entry("NVDA", "Nvidia")).await.unwrap();

        // MSFT would be moved to slot 1 before GHOST fails; the rollback
        // must undo that move.
        let refs = vec![
            TickerRef::Key("MSFT".to_string()),
            TickerRef::Key("GHOST".to_string()),
            TickerRef::Key("AAPL".to_string()),
        ];
        let err = repo.reorder(&refs).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let listed = repo.list().await.unwrap();
        assert_eq!(keys(&listed), vec!["AAPL", "MSFT", "NVDA"]);
        let orders: Vec<i64> = listed.iter().map(|t| t.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_inactive_target() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        repo.delete(TickerRef::Key("MSFT".to_string())).await.unwrap();

        let refs = vec![
            TickerRef::Key("MSFT".to_string()),
            TickerRef::Key("AAPL".to_string()),
        ];
        let err = repo.reorder(&refs).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reorder_rejects_empty_input() {
        let repo = repo(&STOCKS).await;
        let err = repo.reorder(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reorder_accepts_subset() {
        let repo = repo(&STOCKS).await;
        repo.add(entry("AAPL", "Apple")).await.unwrap();
        repo.add(entry("MSFT", "Microsoft")).await.unwrap();
        repo.add(entry("NVDA", "Nvidia")).await.unwrap();

        let updated = repo
            .reorder(&[TickerRef::Key("NVDA".to_string())])
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let nvda = repo
            .get(TickerRef::Key("NVDA".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(nvda.display_order, 1);
    }

    #[tokio::test]
    async fn test_crypto_stores_coin_id() {
        let repo = repo(&CRYPTO).await;
        let added = repo.add(entry_with("btc", "Bitcoin", "BTC")).await.unwrap();

        assert_eq!(added.key, "BTC");
        assert_eq!(added.extra.as_deref(), Some("BTC"));

        let err = repo
            .add(entry_with("BTC", "Bitcoin", "BTC"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_korean_hard_delete_removes_row() {
        let repo = repo(&KOREAN_STOCKS).await;
        let added = repo.add(entry("005930", "삼성전자")).await.unwrap();

        let removed = repo.delete(TickerRef::Id(added.id)).await.unwrap();
        assert_eq!(removed.key, "005930");

        assert!(repo.get(TickerRef::Id(added.id)).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());

        let err = repo.delete(TickerRef::Id(added.id)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Gone for real, so the code can be added again.
        repo.add(entry("005930", "삼성전자")).await.unwrap();
    }

    #[tokio::test]
    async fn test_korean_kind_has_no_extra() {
        let repo = repo(&KOREAN_STOCKS).await;
        let added = repo
            .add(entry_with("000660", "SK하이닉스", "ignored"))
            .await
            .unwrap();
        assert_eq!(added.extra, None);
    }

    #[tokio::test]
    async fn test_korean_reorder_by_id() {
        let repo = repo(&KOREAN_STOCKS).await;
        let first = repo.add(entry("005930", "삼성전자")).await.unwrap();
        let second = repo.add(entry("000660", "SK하이닉스")).await.unwrap();

        repo.reorder(&[TickerRef::Id(second.id), TickerRef::Id(first.id)])
            .await
            .unwrap();
        assert_eq!(keys(&repo.list().await.unwrap()), vec!["000660", "005930"]);
    }

    #[tokio::test]
    async fn test_weather_requires_english_name() {
        let repo = repo(&WEATHER_CITIES).await;

        let err = repo.add(entry("Seoul", "서울")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = repo.add(entry_with("Seoul", "서울", "  ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let added = repo.add(entry_with("Seoul", "서울", "Seoul")).await.unwrap();
        assert_eq!(added.extra.as_deref(), Some("Seoul"));
    }

    #[tokio::test]
    async fn test_weather_conflicts_across_all_rows() {
        let repo = repo(&WEATHER_CITIES).await;
        let added = repo.add(entry_with("Seoul", "서울", "Seoul")).await.unwrap();

        let err = repo
            .add(entry_with("Seoul", "서울", "Seoul"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Hard delete truly frees the code.
        repo.delete(TickerRef::Id(added.id)).await.unwrap();
        repo.add(entry_with("Seoul", "서울", "Seoul")).await.unwrap();
    }

    #[tokio::test]
    async fn test_weather_update_keeps_required_extra_when_omitted() {
        let repo = repo(&WEATHER_CITIES).await;
        let added = repo.add(entry_with("Busan", "부산", "Busan")).await.unwrap();

        let updated = repo
            .update(TickerRef::Id(added.id), changes("부산광역시"))
            .await
            .unwrap();
        assert_eq!(updated.name, "부산광역시");
        assert_eq!(updated.extra.as_deref(), Some("Busan"));

        // Blanking a required field is rejected.
        let err = repo
            .update(
                TickerRef::Id(added.id),
                TickerUpdate {
                    name: "부산".to_string(),
                    extra: Some("".to_string()),
                    is_active: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
