//! Root component. Owns the session services and routes UI events through
//! the [`Orchestrator`].

use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;

use api::{ApiError, CalculationRequest, ResultModel, ServiceClient};

use crate::core::{
    config::AppConfig, platform::Platform, readiness::EngineReady, storage::LastRequestCache,
};
use crate::results::{
    build_report_payload, charts,
    orchestrator::RenderedResults,
    report::DeliveredReport,
    snapshot, submit_report, Orchestrator, ReportError, UiEvent, View,
};
use crate::views::input::{FormSnapshot, InputForm};
use crate::views::results::ResultsView;

/// Services shared by every handler for the lifetime of the app.
#[derive(Clone)]
pub struct Session {
    config: AppConfig,
    client: Result<ServiceClient, String>,
    cache: Rc<LastRequestCache>,
    engine: EngineReady,
}

impl Session {
    pub fn new(config: AppConfig, cache: LastRequestCache, engine: EngineReady) -> Self {
        let client = config.endpoints().map(ServiceClient::new).map_err(|err| {
            tracing::warn!(%err, "service endpoints unusable; calculations will fail");
            err.to_string()
        });
        Self {
            config,
            client,
            cache: Rc::new(cache),
            engine,
        }
    }

    /// Session for the running platform: detected config, platform storage,
    /// and a freshly started chart engine.
    pub fn detect() -> Self {
        let config = AppConfig::detect();
        let cache = LastRequestCache::local(config.cache_key.clone());
        tracing::info!(
            platform = Platform::current().label(),
            api_base = %config.api_base,
            "starting session"
        );
        Self::new(config, cache, charts::start_engine())
    }

    pub fn engine(&self) -> &EngineReady {
        &self.engine
    }

    pub fn cache(&self) -> &LastRequestCache {
        &self.cache
    }

    /// Form contents to start from: the last request if one was cached.
    pub fn initial_form(&self) -> FormSnapshot {
        self.cache
            .load()
            .map(|request| FormSnapshot::from_request(&request))
            .unwrap_or_default()
    }

    fn client(&self) -> Result<&ServiceClient, ApiError> {
        self.client
            .as_ref()
            .map_err(|err| ApiError::InvalidUrl(err.clone()))
    }

    pub async fn calculate(&self, request: &CalculationRequest) -> Result<ResultModel, ApiError> {
        self.client()?.calculate(request).await
    }

    pub async fn generate_report(
        &self,
        rendered: &RenderedResults,
    ) -> Result<DeliveredReport, ReportError> {
        let chart_png = snapshot::chart_data_url(&rendered.chart, &self.engine).await;
        let payload = build_report_payload(self.cache.load(), &rendered.model, chart_png);
        submit_report(
            self.client()?,
            &payload,
            &self.config.fallback_report_filename,
        )
        .await
    }
}

fn handle_event(event: UiEvent, session: &Session, mut state: Signal<Orchestrator>) {
    match event {
        UiEvent::Submit(form) => {
            let request = form.to_request();
            // Cached at submission, whatever the response turns out to be.
            session.cache().store(&request);
            let ticket = state.write().begin_calculation();
            let session = session.clone();
            spawn(async move {
                let outcome = session.calculate(&request).await;
                state.write().finish_calculation(ticket, outcome);
            });
        }
        UiEvent::ShowInput => state.write().show_input(),
        UiEvent::GenerateReport => {
            let Some(rendered) = state.write().begin_report() else {
                return;
            };
            let session = session.clone();
            spawn(async move {
                let outcome = session.generate_report(&rendered).await;
                state.write().finish_report(outcome);
            });
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let session = use_hook(Session::detect);
    use_context_provider(|| session.engine().clone());

    let state = use_signal(Orchestrator::new);
    let mut last_form = use_signal(|| session.initial_form());

    let events = use_coroutine(move |mut rx: UnboundedReceiver<UiEvent>| {
        let session = session.clone();
        async move {
            while let Some(event) = rx.next().await {
                handle_event(event, &session, state);
            }
        }
    });

    let (view, busy, results, report) = {
        let current = state.read();
        (
            current.view(),
            current.is_calculating(),
            current.results().clone(),
            current.report().clone(),
        )
    };

    rsx! {
        main { class: "app-shell",
            {match view {
                View::Input => rsx! {
                    InputForm {
                        initial: last_form(),
                        busy,
                        on_submit: move |form: FormSnapshot| {
                            last_form.set(form.clone());
                            events.send(UiEvent::Submit(form));
                        },
                    }
                },
                View::Results => rsx! {
                    ResultsView {
                        results,
                        report,
                        on_back: move |_| events.send(UiEvent::ShowInput),
                        on_report: move |_| events.send(UiEvent::GenerateReport),
                    }
                },
            }}
        }
    }
}
