//! Create/update/delete calls with their own error channel, so a failed
//! write never blanks out data a read hook already shows.

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use super::http::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub pending: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Mutation {
    label: &'static str,
    state: RwSignal<MutationState>,
    // Only the latest submit may commit its outcome.
    generation: StoredValue<u64>,
}

impl Mutation {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: RwSignal::new(MutationState::default()),
            generation: StoredValue::new(0),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.update_value(|g| *g += 1);
        self.generation.get_value()
    }

    pub fn state(&self) -> RwSignal<MutationState> {
        self.state
    }

    pub fn snapshot(&self) -> MutationState {
        self.state.get_untracked()
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// Track a prepared request.
    ///
    /// A request that could not be prepared (validation, missing session) is
    /// recorded right away and nothing is sent; the returned future then
    /// resolves immediately with that error.
    pub fn submit<T, E>(
        &self,
        prepared: Result<LocalBoxFuture<'static, Result<T, ApiError>>, E>,
    ) -> LocalBoxFuture<'static, Result<T, ApiError>>
    where
        T: 'static,
        E: Into<ApiError>,
    {
        let generation = self.next_generation();
        let request = match prepared {
            Ok(request) => request,
            Err(err) => {
                let err: ApiError = err.into();
                log::warn!("[{}] rejected: {}", self.label, err);
                self.state.set(MutationState {
                    pending: false,
                    error: Some(err.to_string()),
                });
                return Box::pin(async move { Err(err) });
            }
        };

        self.state.set(MutationState {
            pending: true,
            error: None,
        });
        let label = self.label;
        let state = self.state;
        let current = self.generation;
        Box::pin(async move {
            let result = request.await;
            if current.try_get_value() != Some(generation) {
                log::debug!("[{}] superseded, outcome not recorded", label);
                return result;
            }
            match &result {
                Ok(_) => {
                    log::info!("[{}] done", label);
                    state.set(MutationState::default());
                }
                Err(err) => {
                    log::warn!("[{}] failed: {}", label, err);
                    state.set(MutationState {
                        pending: false,
                        error: Some(err.to_string()),
                    });
                }
            }
            result
        })
    }
}
