//! Dashboard view-model assembly
//!
//! Composes everything one page render needs into a single response: map
//! markers for the filtered reports, the severity trend series, the selector
//! options and picker bounds, and the offline flag for the warning banner.

use std::sync::Arc;

use serde::Serialize;

use shared::chart::{MapMarker, TrendSeries, MAP_CENTER, MAP_ZOOM};
use shared::filter::{date_bounds, disease_options, severity_trend};
use shared::types::{DateRange, Theme};

use crate::error::AppResult;
use crate::services::datasource::DataSource;
use crate::services::report::{apply_query, ReportQuery};

/// Everything the page needs for one top-to-bottom render.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub markers: Vec<MapMarker>,
    pub trend: TrendSeries,
    /// Distinct disease names, "All" first (selector contents).
    pub disease_options: Vec<String>,
    /// Min/max report dates present, bounding the date picker.
    pub date_bounds: Option<DateRange>,
    pub map_center: (f64, f64),
    pub map_zoom: u8,
    pub map_tiles: String,
    pub offline: bool,
}

/// Dashboard service over the selected data source
#[derive(Clone)]
pub struct DashboardService {
    datasource: Arc<DataSource>,
}

impl DashboardService {
    pub fn new(datasource: Arc<DataSource>) -> Self {
        Self { datasource }
    }

    pub async fn render(&self, query: &ReportQuery, theme: Theme) -> AppResult<DashboardView> {
        let snapshot = self.datasource.load().await?;
        let filtered = apply_query(&snapshot.reports, query);

        let mut options = vec!["All".to_string()];
        options.extend(disease_options(&snapshot.reports));

        Ok(DashboardView {
            markers: filtered.iter().map(MapMarker::for_report).collect(),
            trend: TrendSeries::new(severity_trend(&filtered), theme),
            disease_options: options,
            date_bounds: date_bounds(&snapshot.reports),
            map_center: MAP_CENTER,
            map_zoom: MAP_ZOOM,
            map_tiles: theme.map_tiles().to_string(),
            offline: self.datasource.is_offline(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::chart::MarkerColor;

    #[tokio::test]
    async fn offline_dashboard_renders_from_sample_data() {
        let service = DashboardService::new(Arc::new(DataSource::offline()));
        let view = service
            .render(&ReportQuery::default(), Theme::Light)
            .await
            .unwrap();

        assert!(view.offline);
        assert_eq!(view.markers.len(), 3);
        assert_eq!(view.trend.points.len(), 3);
        assert_eq!(
            view.disease_options,
            vec!["All", "Blight", "Mildew", "Rust"]
        );
        assert_eq!(view.map_tiles, "CartoDB Positron");
    }

    #[tokio::test]
    async fn filtered_dashboard_keeps_only_the_selected_disease() {
        let service = DashboardService::new(Arc::new(DataSource::offline()));
        let query = ReportQuery {
            disease: Some("Rust".to_string()),
            ..Default::default()
        };
        let view = service.render(&query, Theme::Dark).await.unwrap();

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].radius, 14);
        assert_eq!(view.markers[0].color, MarkerColor::Red);
        assert_eq!(view.trend.points.len(), 1);
        assert_eq!(view.trend.points[0].mean_severity, 7.0);
        assert_eq!(view.map_tiles, "CartoDB Dark Matter");
        // Selector options always reflect the full snapshot, not the filter
        assert_eq!(view.disease_options.len(), 4);
    }

    #[tokio::test]
    async fn empty_filter_result_renders_an_empty_chart() {
        let service = DashboardService::new(Arc::new(DataSource::offline()));
        let query = ReportQuery {
            disease: Some("Scab".to_string()),
            ..Default::default()
        };
        let view = service.render(&query, Theme::Light).await.unwrap();
        assert!(view.markers.is_empty());
        assert!(view.trend.points.is_empty());
    }
}
