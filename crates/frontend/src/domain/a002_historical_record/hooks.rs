use contracts::domain::a001_station::StationId;
use contracts::domain::a002_historical_record::HistoricalRecord;
use leptos::prelude::*;

use super::api;
use crate::shared::app_context::AppContext;
use crate::shared::loader::Loader;

/// `(station id, period id)`; both must be known before anything is fetched.
pub type HistoryKey = (Option<StationId>, Option<String>);
pub type HistoricalRecordLoader = Loader<HistoryKey, Option<HistoricalRecord>>;

fn record_loader(ctx: &AppContext) -> HistoricalRecordLoader {
    let client = ctx.api.clone();
    Loader::new(
        "historical_record",
        ctx.runtime.clone(),
        ctx.min_visible_ms(),
        move |key: &HistoryKey| match key {
            (Some(station_id), Some(period_id)) => {
                api::fetch_historical_record(&client, *station_id, period_id)
            }
            _ => Box::pin(async { Ok(None) }),
        },
    )
}

pub fn use_historical_record(
    ctx: &AppContext,
    station_id: Option<StationId>,
    period_id: Option<String>,
) -> HistoricalRecordLoader {
    let loader = record_loader(ctx);
    loader.set_key((station_id, period_id));
    loader
}

/// Same, following route parameters.
pub fn use_historical_record_signal(ctx: &AppContext, key: Signal<HistoryKey>) -> HistoricalRecordLoader {
    let loader = record_loader(ctx);
    loader.watch_key(key);
    loader
}
