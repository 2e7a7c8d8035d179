use contracts::domain::a001_station::StationId;
use contracts::domain::a002_historical_record::HistoricalRecord;
use futures::future::LocalBoxFuture;

use crate::shared::api_utils::{path_segment, ApiClient};
use crate::shared::http::ApiError;

/// One closed billing period of a station
pub fn fetch_historical_record(
    client: &ApiClient,
    station_id: StationId,
    period_id: &str,
) -> LocalBoxFuture<'static, Result<Option<HistoricalRecord>, ApiError>> {
    client.get_optional(&format!(
        "/stations/{}/history/{}",
        station_id,
        path_segment(period_id.trim())
    ))
}
