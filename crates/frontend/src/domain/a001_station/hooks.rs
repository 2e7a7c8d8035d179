//! Data hooks for stations

use contracts::domain::a001_station::{CreateStationDto, Station, StationId, StationSummaryDto};
use contracts::domain::common::AggregateId;
use contracts::shared::compliance::TaxPolicy;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use super::api;
use super::summary_view::MonthlyStationView;
use crate::shared::api_utils::ApiClient;
use crate::shared::app_context::AppContext;
use crate::shared::http::ApiError;
use crate::shared::loader::Loader;
use crate::shared::lookup_cache::LookupCache;
use crate::shared::mutation::Mutation;
use crate::system::auth::context::SessionContext;

pub type StationsLoader = Loader<(), Vec<Station>>;
pub type StationLoader = Loader<Option<StationId>, Option<Station>>;
pub type StationNames = LookupCache<StationId, String>;

/// All stations with their content logs; fetched on creation.
pub fn use_stations(ctx: &AppContext) -> StationsLoader {
    let client = ctx.api.clone();
    let loader = Loader::new("stations", ctx.runtime.clone(), ctx.min_visible_ms(), move |_: &()| {
        api::fetch_stations(&client)
    });
    loader.set_key(());
    loader
}

/// Lightweight station list for search boxes.
pub fn use_stations_list(ctx: &AppContext) -> StationsLoader {
    let client = ctx.api.clone();
    let loader = Loader::new("stations_list", ctx.runtime.clone(), ctx.min_visible_ms(), move |_: &()| {
        api::fetch_stations_list(&client)
    });
    loader.set_key(());
    loader
}

pub fn use_dashboard_summary(ctx: &AppContext) -> Loader<(), Vec<StationSummaryDto>> {
    let client = ctx.api.clone();
    let loader = Loader::new(
        "dashboard_summary",
        ctx.runtime.clone(),
        ctx.min_visible_ms(),
        move |_: &()| api::fetch_dashboard_summary(&client),
    );
    loader.set_key(());
    loader
}

fn station_loader(ctx: &AppContext) -> StationLoader {
    let client = ctx.api.clone();
    Loader::new("station", ctx.runtime.clone(), ctx.min_visible_ms(), move |id: &Option<StationId>| {
        match id {
            Some(id) => api::fetch_station(&client, *id),
            // Unresolved keys never reach the fetcher.
            None => Box::pin(async { Ok(None) }),
        }
    })
}

/// Route parameter → id; an unparseable value counts as "no id yet".
pub fn parse_station_param(raw: Option<&str>) -> Option<StationId> {
    raw.and_then(|value| StationId::from_string(value).ok())
}

/// Single station; no request while `id` is `None`.
pub fn use_station_by_id(ctx: &AppContext, id: Option<StationId>) -> StationLoader {
    let loader = station_loader(ctx);
    loader.set_key(id);
    loader
}

/// Single station following a reactive id (route parameter).
pub fn use_station_by_id_signal(ctx: &AppContext, id: Signal<Option<StationId>>) -> StationLoader {
    let loader = station_loader(ctx);
    loader.watch_key(id);
    loader
}

/// Station user's own dashboard: the station comes from the session scope.
#[derive(Clone)]
pub struct StationDashboard {
    pub station: StationLoader,
    session: SessionContext,
    policy: TaxPolicy,
}

impl StationDashboard {
    /// Re-read the scope after login/logout; returns whether a new request went out.
    pub fn sync_scope(&self) -> bool {
        let id = self.session.station_scope().station_id();
        self.station.set_key(id)
    }

    /// Figures for the given month, once the station is loaded.
    pub fn monthly(&self, month: (i32, u32)) -> Option<MonthlyStationView> {
        self.station
            .state()
            .with_untracked(|state| state.data.as_ref().map(|s| MonthlyStationView::new(s, month, &self.policy)))
    }
}

pub fn use_station_dashboard(ctx: &AppContext) -> StationDashboard {
    let dashboard = StationDashboard {
        station: station_loader(ctx),
        session: ctx.session,
        policy: ctx.config.tax,
    };
    dashboard.sync_scope();
    dashboard
}

/// id → station name, resolved through the export endpoint.
pub fn station_name_cache(ctx: &AppContext) -> StationNames {
    let client = ctx.api.clone();
    LookupCache::new("station_names", ctx.runtime.clone(), move |id: &StationId| {
        let request = api::fetch_station_export(&client, *id);
        Box::pin(async move { Ok(request.await?.name) })
    })
}

/// Station writes. A created station is appended to `stations` locally.
#[derive(Clone)]
pub struct StationActions {
    client: ApiClient,
    stations: Option<StationsLoader>,
    pub create: Mutation,
}

impl StationActions {
    pub fn new(ctx: &AppContext, stations: Option<StationsLoader>) -> Self {
        Self {
            client: ctx.api.clone(),
            stations,
            create: Mutation::new("create_station"),
        }
    }

    /// Create from raw form input. Invalid input is reported immediately and not sent.
    pub fn create_from_form(
        &self,
        name: &str,
        url: &str,
        base_tax: &str,
    ) -> LocalBoxFuture<'static, Result<Station, ApiError>> {
        let prepared = CreateStationDto::from_form(name, url, base_tax)
            .and_then(|dto| api::create_station(&self.client, &dto));
        let request = self.create.submit(prepared);
        let stations = self.stations.clone();
        Box::pin(async move {
            let station = request.await?;
            if let Some(stations) = &stations {
                let created = station.clone();
                stations.update_data(move |list| list.push(created));
            }
            Ok(station)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_context::testing::TestApp;
    use crate::shared::test_support::{run_effects, with_effects, with_owner};
    use crate::system::auth::context::SessionUser;
    use contracts::system::users::UserRole;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    const STATION: &str = r#"{"id":1,"name":"Peace FM","streamUrl":"http://s/peace","baseTax":1000,
        "contentLog":[{"timestamp":"2025-10-01T08:00:00Z","title":"A","artist":"X","origin":"Foreign"},
                      {"timestamp":"2025-10-01T09:00:00Z","title":"B","artist":"Y","origin":"Local"}]}"#;

    fn station_session(station: Option<i64>) -> SessionContext {
        SessionContext::with_user(SessionUser {
            username: "peace".into(),
            role: UserRole::Station,
            station: station.map(StationId),
            access_token: Some("tok".into()),
        })
    }

    #[test]
    fn test_use_stations_fetches_on_creation() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let stations = use_stations(&app.ctx);
            app.run();
            assert_eq!(app.transport.request_count(), 1);
            let request = app.transport.request(0);
            assert_eq!(request.url, "http://api/stations");
            assert!(request
                .headers()
                .contains(&("Accept", "application/json".to_string())));

            app.settle(0, 200, &format!("[{}]", STATION));
            let state = stations.snapshot();
            assert!(!state.loading);
            assert_eq!(state.data[0].content_log.len(), 2);
        });
    }

    #[test]
    fn test_dashboard_summary_endpoint() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let summary = use_dashboard_summary(&app.ctx);
            app.run();
            assert_eq!(app.transport.request(0).url, "http://api/stations/dashboard/summary");
            app.settle(
                0,
                200,
                r#"[{"id":1,"name":"Peace FM","base_tax":"1000","total_logs":10,"foreign_logs":4,"foreign_percentage":40,"surcharge":150,"total_tax":1150}]"#,
            );
            let rows = summary.snapshot().data;
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].base_tax, 1000.0);
        });
    }

    #[test]
    fn test_parse_station_param() {
        assert_eq!(parse_station_param(Some(" 7 ")), Some(StationId(7)));
        assert_eq!(parse_station_param(Some("new")), None);
        assert_eq!(parse_station_param(None), None);
    }

    #[test]
    fn test_station_by_missing_id_stays_idle() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let station = use_station_by_id(&app.ctx, None);
            app.run();
            assert_eq!(app.transport.request_count(), 0);
            assert!(!station.snapshot().loading);
            assert!(station.snapshot().data.is_none());

            station.set_key(Some(StationId(1)));
            app.run();
            assert_eq!(app.transport.request(0).url, "http://api/stations/1");
        });
    }

    #[test]
    fn test_station_dashboard_follows_session_scope() {
        with_owner(|| {
            let session = station_session(Some(1));
            let mut app = TestApp::new(session);
            let dashboard = use_station_dashboard(&app.ctx);
            app.run();
            let request = app.transport.request(0);
            assert_eq!(request.url, "http://api/stations/1");
            assert_eq!(request.bearer.as_deref(), Some("tok"));

            app.settle(0, 200, STATION);
            let monthly = dashboard.monthly((2025, 10)).unwrap();
            assert_eq!(monthly.view.foreign_percentage, "50.00%");
            assert!(dashboard.monthly((2025, 9)).unwrap().month_log.is_empty());

            session.sign_out();
            assert!(dashboard.sync_scope());
            app.run();
            assert_eq!(app.transport.request_count(), 1);
            assert!(dashboard.station.snapshot().data.is_none());
        });
    }

    #[test]
    fn test_station_names_resolve_through_export() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let names = station_name_cache(&app.ctx);
            let labels = app.ctx.config.lookup.clone();
            assert_eq!(names.display(&StationId(1), &labels), "Loading...");
            app.run();
            assert_eq!(app.transport.request(0).url, "http://api/stations/1/export");
            app.transport.respond(0, 200, STATION);
            app.run();
            assert_eq!(names.display(&StationId(1), &labels), "Peace FM");
        });
    }

    #[test]
    fn test_create_station_appends_to_list() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let stations = use_stations(&app.ctx);
            app.run();
            app.settle(0, 200, "[]");

            let actions = StationActions::new(&app.ctx, Some(stations.clone()));
            let outcome = Rc::new(RefCell::new(None));
            let slot = outcome.clone();
            let pending = actions.create_from_form("Joy FM", "http://s/joy", "2500");
            app.pool
                .spawner()
                .spawn_local(async move {
                    *slot.borrow_mut() = Some(pending.await);
                })
                .unwrap();
            app.run();

            let request = app.transport.request(1);
            assert_eq!(request.url, "http://api/stations");
            let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
            assert_eq!(body["name"], "Joy FM");
            assert_eq!(body["base_tax"], 2500.0);
            assert!(request
                .headers()
                .contains(&("Content-Type", "application/json".to_string())));

            app.transport.respond(1, 200, r#"{"id":2,"name":"Joy FM","url":"http://s/joy","base_tax":2500}"#);
            app.run();
            assert!(outcome.borrow().as_ref().unwrap().is_ok());
            assert_eq!(stations.snapshot().data.len(), 1);
            assert_eq!(actions.create.snapshot().error, None);
        });
    }

    #[test]
    fn test_failed_create_keeps_loaded_list() {
        with_owner(|| {
            let mut app = TestApp::new(SessionContext::new());
            let stations = use_stations(&app.ctx);
            app.run();
            app.settle(0, 200, &format!("[{}]", STATION));

            let actions = StationActions::new(&app.ctx, Some(stations.clone()));
            let _ = actions.create_from_form("Joy FM", "http://s/joy", "-5");
            assert_eq!(
                actions.create.snapshot().error.as_deref(),
                Some("base tax must not be negative")
            );

            let pending = actions.create_from_form("Joy FM", "http://s/joy", "100");
            app.pool
                .spawner()
                .spawn_local(async move {
                    let _ = pending.await;
                })
                .unwrap();
            app.run();
            app.transport.respond(1, 400, r#"{"detail":"Station already exists"}"#);
            app.run();

            assert_eq!(app.transport.request_count(), 2);
            assert_eq!(
                actions.create.snapshot().error.as_deref(),
                Some("HTTP 400: Station already exists")
            );
            let state = stations.snapshot();
            assert_eq!(state.data.len(), 1);
            assert!(state.error.is_none());
        });
    }

    #[test]
    fn test_station_follows_route_param() {
        with_effects(|| {
            let mut app = TestApp::new(SessionContext::new());
            let id = RwSignal::new(None::<StationId>);
            let station = use_station_by_id_signal(&app.ctx, id.into());
            run_effects();
            app.run();
            assert_eq!(app.transport.request_count(), 0);
            assert!(!station.snapshot().loading);

            id.set(Some(StationId(1)));
            run_effects();
            app.run();
            assert_eq!(app.transport.request_count(), 1);
            assert!(station.snapshot().loading);

            id.set(Some(StationId(2)));
            run_effects();
            app.run();
            assert_eq!(app.transport.request_count(), 2);
            assert!(app.transport.is_aborted(0));
            assert_eq!(app.transport.request(1).url, "http://api/stations/2");

            app.settle(1, 200, r#"{"id":2,"name":"Citi FM"}"#);
            let state = station.snapshot();
            assert_eq!(state.data.map(|s| s.name), Some("Citi FM".to_string()));
            assert!(!state.loading);

            id.set(Some(StationId(2)));
            run_effects();
            app.run();
            assert_eq!(app.transport.request_count(), 2);
        });
    }
}
