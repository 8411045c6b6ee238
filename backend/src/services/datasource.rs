//! Data access for farms, crops and disease reports
//!
//! The store is reached once at startup. A successful connect yields the
//! `Connected` variant with a memoized load; a failed connect yields the
//! `Offline` variant carrying fixed sample data, in which reporting is
//! disabled. The variant is selected exactly once and passed explicitly to
//! the rest of the system.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Crop, DiseaseReport, Farm, ReportWithContext};

/// The result of one full load: all farms plus the joined report view.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub farms: Vec<Farm>,
    pub reports: Vec<ReportWithContext>,
}

/// Explicit memoization slot for the load result: the value, when it was
/// loaded, and how long it stays fresh. No ambient global state.
#[derive(Debug)]
pub struct LoadCache<T> {
    slot: Option<(T, Instant)>,
    ttl: Duration,
}

impl<T: Clone> LoadCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    /// The cached value, if one is present and younger than the TTL.
    pub fn get(&self) -> Option<T> {
        match &self.slot {
            Some((value, loaded_at)) if loaded_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put(&mut self, value: T) {
        self.slot = Some((value, Instant::now()));
    }

    /// Drop the cached value so the next load hits the store.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

/// Input for submitting a new disease report. The report timestamp is
/// assigned by the server at insert time.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SubmitReportInput {
    pub farm_id: i32,
    pub crop_id: i32,
    pub disease_name: String,
    pub severity: i32,
    pub description: String,
}

/// Where the data comes from, decided once at startup.
pub enum DataSource {
    /// Live store: queries go to Postgres, loads are memoized.
    Connected {
        pool: PgPool,
        cache: RwLock<LoadCache<Arc<Snapshot>>>,
    },
    /// The store was unreachable at startup: fixed sample data, read-only.
    Offline {
        farms: Vec<Farm>,
        crops: Vec<Crop>,
        reports: Vec<ReportWithContext>,
    },
}

/// Database row for a farm
#[derive(Debug, sqlx::FromRow)]
struct FarmRow {
    farm_id: i32,
    farm_name: String,
    latitude: f64,
    longitude: f64,
}

impl From<FarmRow> for Farm {
    fn from(row: FarmRow) -> Self {
        Farm {
            farm_id: row.farm_id,
            farm_name: row.farm_name,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Database row for a crop
#[derive(Debug, sqlx::FromRow)]
struct CropRow {
    crop_id: i32,
    crop_type: String,
    farm_id: i32,
}

impl From<CropRow> for Crop {
    fn from(row: CropRow) -> Self {
        Crop {
            crop_id: row.crop_id,
            crop_type: row.crop_type,
            farm_id: row.farm_id,
        }
    }
}

/// Database row for a report joined with its farm and crop
#[derive(Debug, sqlx::FromRow)]
struct ReportWithContextRow {
    report_id: i32,
    farm_id: i32,
    crop_id: i32,
    disease_name: String,
    report_date: chrono::DateTime<Utc>,
    severity: i32,
    description: String,
    latitude: f64,
    longitude: f64,
    crop_type: String,
}

impl From<ReportWithContextRow> for ReportWithContext {
    fn from(row: ReportWithContextRow) -> Self {
        ReportWithContext {
            report_id: row.report_id,
            farm_id: row.farm_id,
            crop_id: row.crop_id,
            disease_name: row.disease_name,
            report_date: row.report_date,
            severity: row.severity,
            description: row.description,
            latitude: row.latitude,
            longitude: row.longitude,
            crop_type: row.crop_type,
        }
    }
}

impl DataSource {
    /// Connected data source with a fresh (empty) load cache.
    pub fn connected(pool: PgPool, cache_ttl: Duration) -> Self {
        DataSource::Connected {
            pool,
            cache: RwLock::new(LoadCache::new(cache_ttl)),
        }
    }

    /// Offline data source backed by the fixed sample set.
    pub fn offline() -> Self {
        let (farms, crops, reports) = sample_data();
        DataSource::Offline {
            farms,
            crops,
            reports,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, DataSource::Offline { .. })
    }

    /// Load all farms and the joined report view. Connected loads are
    /// memoized; a query failure after a successful connect propagates.
    pub async fn load(&self) -> AppResult<Arc<Snapshot>> {
        match self {
            DataSource::Offline { farms, reports, .. } => Ok(Arc::new(Snapshot {
                farms: farms.clone(),
                reports: reports.clone(),
            })),
            DataSource::Connected { pool, cache } => {
                if let Some(snapshot) = cache.read().await.get() {
                    return Ok(snapshot);
                }

                tracing::debug!("Load cache miss, querying store");
                let snapshot = Arc::new(query_snapshot(pool).await?);

                cache.write().await.put(snapshot.clone());
                Ok(snapshot)
            }
        }
    }

    /// Drop the memoized load so the next request re-queries the store.
    pub async fn invalidate(&self) {
        if let DataSource::Connected { cache, .. } = self {
            cache.write().await.invalidate();
        }
    }

    /// Crops belonging to one farm, for the dependent crop selector.
    pub async fn crops_for_farm(&self, farm_id: i32) -> AppResult<Vec<Crop>> {
        match self {
            DataSource::Offline { farms, crops, .. } => {
                if !farms.iter().any(|f| f.farm_id == farm_id) {
                    return Err(AppError::NotFound("Farm".to_string()));
                }
                Ok(crops
                    .iter()
                    .filter(|c| c.farm_id == farm_id)
                    .cloned()
                    .collect())
            }
            DataSource::Connected { pool, .. } => {
                let rows = sqlx::query_as::<_, CropRow>(
                    "SELECT crop_id, crop_type, farm_id FROM crops WHERE farm_id = $1 ORDER BY crop_id",
                )
                .bind(farm_id)
                .fetch_all(pool)
                .await?;

                if rows.is_empty() {
                    let farm_exists = sqlx::query_scalar::<_, i32>(
                        "SELECT farm_id FROM farms WHERE farm_id = $1",
                    )
                    .bind(farm_id)
                    .fetch_optional(pool)
                    .await?;
                    if farm_exists.is_none() {
                        return Err(AppError::NotFound("Farm".to_string()));
                    }
                }

                Ok(rows.into_iter().map(Crop::from).collect())
            }
        }
    }

    /// Insert one report with a server-assigned timestamp, then invalidate
    /// the memoized load so the new row appears on the next load. Only
    /// available when connected.
    pub async fn submit(&self, input: SubmitReportInput) -> AppResult<DiseaseReport> {
        match self {
            DataSource::Offline { .. } => Err(AppError::ReportingDisabled),
            DataSource::Connected { pool, cache } => {
                let row = sqlx::query_as::<_, ReportRow>(
                    r#"
                    INSERT INTO disease_reports (farm_id, crop_id, disease_name, report_date, severity, description)
                    VALUES ($1, $2, $3, NOW(), $4, $5)
                    RETURNING report_id, farm_id, crop_id, disease_name, report_date, severity, description
                    "#,
                )
                .bind(input.farm_id)
                .bind(input.crop_id)
                .bind(&input.disease_name)
                .bind(input.severity)
                .bind(&input.description)
                .fetch_one(pool)
                .await?;

                cache.write().await.invalidate();
                tracing::info!(
                    report_id = row.report_id,
                    farm_id = row.farm_id,
                    disease = %row.disease_name,
                    "Report submitted, load cache invalidated"
                );

                Ok(row.into())
            }
        }
    }
}

/// Database row for a bare report
#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    report_id: i32,
    farm_id: i32,
    crop_id: i32,
    disease_name: String,
    report_date: chrono::DateTime<Utc>,
    severity: i32,
    description: String,
}

impl From<ReportRow> for DiseaseReport {
    fn from(row: ReportRow) -> Self {
        DiseaseReport {
            report_id: row.report_id,
            farm_id: row.farm_id,
            crop_id: row.crop_id,
            disease_name: row.disease_name,
            report_date: row.report_date,
            severity: row.severity,
            description: row.description,
        }
    }
}

async fn query_snapshot(pool: &PgPool) -> AppResult<Snapshot> {
    let farms = sqlx::query_as::<_, FarmRow>(
        "SELECT farm_id, farm_name, latitude, longitude FROM farms ORDER BY farm_id",
    )
    .fetch_all(pool)
    .await?;

    let reports = sqlx::query_as::<_, ReportWithContextRow>(
        r#"
        SELECT d.report_id, d.farm_id, d.crop_id, d.disease_name, d.report_date,
               d.severity, d.description, f.latitude, f.longitude, c.crop_type
        FROM disease_reports d
        JOIN farms f ON d.farm_id = f.farm_id
        JOIN crops c ON d.crop_id = c.crop_id
        ORDER BY d.report_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(Snapshot {
        farms: farms.into_iter().map(Farm::from).collect(),
        reports: reports.into_iter().map(ReportWithContext::from).collect(),
    })
}

/// The fixed demo set used when the store is unreachable: 3 farms, one crop
/// each, one report each.
pub fn sample_data() -> (Vec<Farm>, Vec<Crop>, Vec<ReportWithContext>) {
    let farms = vec![
        Farm {
            farm_id: 1,
            farm_name: "Farm_1".to_string(),
            latitude: 41.0,
            longitude: -99.0,
        },
        Farm {
            farm_id: 2,
            farm_name: "Farm_2".to_string(),
            latitude: 41.1,
            longitude: -98.9,
        },
        Farm {
            farm_id: 3,
            farm_name: "Farm_3".to_string(),
            latitude: 41.2,
            longitude: -98.8,
        },
    ];

    let crops = vec![
        Crop {
            crop_id: 1,
            crop_type: "Wheat".to_string(),
            farm_id: 1,
        },
        Crop {
            crop_id: 2,
            crop_type: "Corn".to_string(),
            farm_id: 2,
        },
        Crop {
            crop_id: 3,
            crop_type: "Soybean".to_string(),
            farm_id: 3,
        },
    ];

    let reports = vec![
        ReportWithContext {
            report_id: 1,
            farm_id: 1,
            crop_id: 1,
            disease_name: "Blight".to_string(),
            report_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            severity: 5,
            description: "Yellow spots".to_string(),
            latitude: 41.0,
            longitude: -99.0,
            crop_type: "Wheat".to_string(),
        },
        ReportWithContext {
            report_id: 2,
            farm_id: 2,
            crop_id: 2,
            disease_name: "Rust".to_string(),
            report_date: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            severity: 7,
            description: "Wilting".to_string(),
            latitude: 41.1,
            longitude: -98.9,
            crop_type: "Corn".to_string(),
        },
        ReportWithContext {
            report_id: 3,
            farm_id: 3,
            crop_id: 3,
            disease_name: "Mildew".to_string(),
            report_date: Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap(),
            severity: 3,
            description: "Gray patches".to_string(),
            latitude: 41.2,
            longitude: -98.8,
            crop_type: "Soybean".to_string(),
        },
    ];

    (farms, crops, reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_returns_fresh_value() {
        let mut cache: LoadCache<i32> = LoadCache::new(Duration::from_secs(300));
        assert_eq!(cache.get(), None);
        cache.put(42);
        assert_eq!(cache.get(), Some(42));
    }

    #[test]
    fn cache_expires_after_ttl() {
        let mut cache = LoadCache::new(Duration::from_millis(0));
        cache.put(42);
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn invalidate_drops_the_value() {
        let mut cache = LoadCache::new(Duration::from_secs(300));
        cache.put(42);
        cache.invalidate();
        assert_eq!(cache.get(), None);
    }

    #[tokio::test]
    async fn offline_load_returns_the_three_sample_reports() {
        let source = DataSource::offline();
        assert!(source.is_offline());

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.farms.len(), 3);
        assert_eq!(snapshot.reports.len(), 3);

        let diseases: Vec<&str> = snapshot
            .reports
            .iter()
            .map(|r| r.disease_name.as_str())
            .collect();
        assert_eq!(diseases, vec!["Blight", "Rust", "Mildew"]);
    }

    #[tokio::test]
    async fn offline_submit_is_disabled() {
        let source = DataSource::offline();
        let result = source
            .submit(SubmitReportInput {
                farm_id: 1,
                crop_id: 1,
                disease_name: "Blight".to_string(),
                severity: 5,
                description: String::new(),
            })
            .await;
        assert!(matches!(result, Err(AppError::ReportingDisabled)));
    }

    #[tokio::test]
    async fn offline_crops_follow_their_farm() {
        let source = DataSource::offline();
        let crops = source.crops_for_farm(2).await.unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].crop_type, "Corn");

        assert!(matches!(
            source.crops_for_farm(99).await,
            Err(AppError::NotFound(_))
        ));
    }
}
