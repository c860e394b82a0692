//! Default watchlist contents, applied at startup.
//!
//! Mirrors the data the dashboard launched with: a small starter stock list
//! and the full crypto set. Seeding goes through the repository so rows get
//! proper display orders, and existing keys are skipped, so reseeding a
//! populated database never duplicates or reorders anything.

use anyhow::Result;

use crate::db::WatchlistDb;
use crate::error::StoreError;
use crate::kind::{CRYPTO, STOCKS};
use crate::models::{NewTicker, TickerRef};
use crate::repository::TickerRepository;

/// (symbol, company name)
const DEFAULT_STOCKS: &[(&str, &str)] = &[
    ("BMNR", "비트마인 이머전 테크놀로지스"),
    ("FIG", "피그마"),
    ("DRIV", "미래 모빌리티 ETF"),
];

/// (symbol, name, coin id)
const DEFAULT_CRYPTO: &[(&str, &str, &str)] = &[
    ("BTC", "비트코인", "BTC"),
    ("ETH", "이더리움", "ETH"),
    ("SOL", "솔라나", "SOL"),
    ("XRP", "XRP", "XRP4"),
    ("LINK", "체인링크", "LINK"),
    ("SUI", "수이", "SUI"),
    ("NEAR", "니어", "NEAR"),
    ("ONDO", "온도파이낸스", "ONDO"),
    ("SEI", "세이", "SEI"),
    ("STX", "스택스", "STX"),
    ("DOT", "폴카닷", "DOT"),
    ("AVAX", "아발란체", "AVAX"),
    ("HBAR", "헤데라", "HBAR"),
    ("DOGE", "도지코인", "DOGE"),
    ("BONK", "봉크", "BONK"),
    ("POL", "폴리곤에코시스템토큰", "POL"),
    ("ADA", "카르다노", "ADA"),
    ("RENDER", "랜더토큰", "RENDER"),
    ("ETC", "이더리움클래식", "ETC"),
    ("SHIB", "시바이누", "SHIB"),
    ("FLOKI", "플로키", "FLOKI"),
    ("GRT", "더그래프", "GRT"),
    ("BTT", "비트토렌트", "BTT"),
    ("ICP", "인터넷컴퓨터", "ICP"),
    ("ONG", "온톨로지가스", "ONG"),
];

/// Apply the default stock and crypto watchlists, skipping keys that
/// already exist in any state.
pub async fn seed_defaults(db: &WatchlistDb) -> Result<()> {
    let mut added = 0usize;

    let stocks = TickerRepository::new(db.clone(), &STOCKS);
    for (symbol, company_name) in DEFAULT_STOCKS {
        added += seed_one(
            &stocks,
            NewTicker {
                key: symbol.to_string(),
                name: company_name.to_string(),
                extra: None,
            },
        )
        .await?;
    }

    let crypto = TickerRepository::new(db.clone(), &CRYPTO);
    for (symbol, name, coin_id) in DEFAULT_CRYPTO {
        added += seed_one(
            &crypto,
            NewTicker {
                key: symbol.to_string(),
                name: name.to_string(),
                extra: Some(coin_id.to_string()),
            },
        )
        .await?;
    }

    if added > 0 {
        tracing::info!("Seeded {} default watchlist entries", added);
    }
    Ok(())
}

async fn seed_one(repo: &TickerRepository, input: NewTicker) -> Result<usize> {
    // A row in any state counts as present: a default the user soft-deleted
    // stays deleted instead of being resurrected by the next restart.
    if repo.get(TickerRef::Key(input.key.clone())).await?.is_some() {
        return Ok(0);
    }

    match repo.add(input).await {
        Ok(_) => Ok(1),
        Err(StoreError::Conflict(_)) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TickerKind;

    async fn counts(db: &WatchlistDb, kind: &'static TickerKind) -> usize {
        TickerRepository::new(db.clone(), kind)
            .list()
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_seed_populates_defaults() {
        let db = WatchlistDb::memory().await.unwrap();
        seed_defaults(&db).await.unwrap();

        assert_eq!(counts(&db, &STOCKS).await, DEFAULT_STOCKS.len());
        assert_eq!(counts(&db, &CRYPTO).await, DEFAULT_CRYPTO.len());

        let crypto = TickerRepository::new(db.clone(), &CRYPTO);
        let listed = crypto.list().await.unwrap();
        assert_eq!(listed[0].key, "BTC");
        assert_eq!(listed[0].display_order, 1);
        // XRP keeps its chart-site coin id, which differs from the symbol.
        let xrp = listed.iter().find(|t| t.key == "XRP").unwrap();
        assert_eq!(xrp.extra.as_deref(), Some("XRP4"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = WatchlistDb::memory().await.unwrap();
        seed_defaults(&db).await.unwrap();

        let crypto = TickerRepository::new(db.clone(), &CRYPTO);
        let before: Vec<(String, i64)> = crypto
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.key, t.display_order))
            .collect();

        seed_defaults(&db).await.unwrap();

        let after: Vec<(String, i64)> = crypto
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.key, t.display_order))
            .collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_seed_respects_user_deletions() {
        let db = WatchlistDb::memory().await.unwrap();
        seed_defaults(&db).await.unwrap();

        let crypto = TickerRepository::new(db.clone(), &CRYPTO);
        crypto
            .delete(TickerRef::Key("BTC".to_string()))
            .await
            .unwrap();

        seed_defaults(&db).await.unwrap();

        // The removed default stays removed.
        let listed = crypto.list().await.unwrap();
        assert!(listed.iter().all(|t| t.key != "BTC"));

        // And only the original (now inactive) row remains in storage.
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM crypto_tickers WHERE symbol = 'BTC'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_seed_skips_user_rows() {
        let db = WatchlistDb::memory().await.unwrap();
        let stocks = TickerRepository::new(db.clone(), &STOCKS);
        stocks
            .add(NewTicker {
                key: "BMNR".to_string(),
                name: "My own name".to_string(),
                extra: None,
            })
            .await
            .unwrap();

        seed_defaults(&db).await.unwrap();

        let bmnr = stocks
            .get(crate::models::TickerRef::Key("BMNR".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bmnr.name, "My own name");
    }
}
