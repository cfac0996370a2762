use crate::api::{ApiResult, SentimentApi};
use crate::models::{AnalysisRecord, Identity};
use leptos::prelude::*;

pub(crate) const MAX_INPUT_CHARS: usize = 1000;

/// View state of the analyzer page.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct AnalyzerModel {
    pub input: String,
    pub last_result: Option<AnalysisRecord>,
    pub history: Vec<AnalysisRecord>,
    pub pending: bool,
}

impl AnalyzerModel {
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Marks a submit as in flight and returns the text to send, if any.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.pending = true;
        Some(clamp_input(&self.input))
    }

    /// Applies the analyze outcome. Returns whether history should be refreshed.
    pub fn finish_submit(&mut self, outcome: ApiResult<AnalysisRecord>) -> bool {
        self.pending = false;
        match outcome {
            Ok(record) => {
                self.last_result = Some(record);
                self.input.clear();
                true
            }
            Err(e) => {
                log::error!("Analysis error: {e}");
                false
            }
        }
    }

    /// Replaces the whole history on success; keeps the old list on failure.
    pub fn apply_history(&mut self, outcome: ApiResult<Vec<AnalysisRecord>>) {
        match outcome {
            Ok(records) => self.history = records,
            Err(e) => log::error!("History fetch error: {e}"),
        }
    }
}

pub(crate) fn clamp_input(text: &str) -> String {
    text.chars().take(MAX_INPUT_CHARS).collect()
}

/// Whether the delete control is offered. Presentation only; the backend authorizes.
pub(crate) fn can_delete(identity: Option<&Identity>) -> bool {
    identity.is_some_and(Identity::is_admin)
}

/// Somewhere an `AnalyzerModel` lives and can be mutated in place.
pub(crate) trait ModelHandle {
    fn update_model<R>(&self, f: impl FnOnce(&mut AnalyzerModel) -> R) -> Option<R>;
}

impl ModelHandle for RwSignal<AnalyzerModel> {
    fn update_model<R>(&self, f: impl FnOnce(&mut AnalyzerModel) -> R) -> Option<R> {
        self.try_update(f)
    }
}

pub(crate) async fn submit<A, M>(api: &A, token: &str, model: &M)
where
    A: SentimentApi + ?Sized,
    M: ModelHandle + ?Sized,
{
    let Some(text) = model.update_model(AnalyzerModel::begin_submit).flatten() else {
        return;
    };

    let outcome = api.analyze(&text, token).await;
    if model.update_model(|m| m.finish_submit(outcome)) == Some(true) {
        refresh_history(api, token, model).await;
    }
}

pub(crate) async fn refresh_history<A, M>(api: &A, token: &str, model: &M)
where
    A: SentimentApi + ?Sized,
    M: ModelHandle + ?Sized,
{
    let outcome = api.list_history(token).await;
    model.update_model(|m| m.apply_history(outcome));
}

/// Deletes one record and refreshes on success. Confirmation happens in the view.
pub(crate) async fn delete_entry<A, M>(api: &A, token: &str, id: &str, model: &M)
where
    A: SentimentApi + ?Sized,
    M: ModelHandle + ?Sized,
{
    match api.delete(id, token).await {
        Ok(()) => refresh_history(api, token, model).await,
        Err(e) => log::error!("Delete error: {e}"),
    }
}
