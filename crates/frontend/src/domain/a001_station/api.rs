//! Station endpoints of the remote API

use contracts::domain::a001_station::{CreateStationDto, Station, StationId, StationSummaryDto};
use contracts::shared::validation::ValidationError;
use futures::future::LocalBoxFuture;

use crate::shared::api_utils::ApiClient;
use crate::shared::http::ApiError;

/// Full stations, content logs included
pub fn fetch_stations(client: &ApiClient) -> LocalBoxFuture<'static, Result<Vec<Station>, ApiError>> {
    client.get_list("/stations")
}

/// Lightweight list for search/autocomplete; content logs may be missing
pub fn fetch_stations_list(client: &ApiClient) -> LocalBoxFuture<'static, Result<Vec<Station>, ApiError>> {
    client.get_list("/stations/list")
}

pub fn fetch_station(
    client: &ApiClient,
    id: StationId,
) -> LocalBoxFuture<'static, Result<Option<Station>, ApiError>> {
    client.get_optional(&format!("/stations/{}", id))
}

/// Station record used to resolve display names
pub fn fetch_station_export(
    client: &ApiClient,
    id: StationId,
) -> LocalBoxFuture<'static, Result<Station, ApiError>> {
    client.get_json(&format!("/stations/{}/export", id))
}

pub fn fetch_dashboard_summary(
    client: &ApiClient,
) -> LocalBoxFuture<'static, Result<Vec<StationSummaryDto>, ApiError>> {
    client.get_list("/stations/dashboard/summary")
}

/// Validates the request first; an invalid one is never sent.
pub fn create_station(
    client: &ApiClient,
    dto: &CreateStationDto,
) -> Result<LocalBoxFuture<'static, Result<Station, ApiError>>, ValidationError> {
    dto.validate()?;
    Ok(client.post_json("/stations", dto))
}
