//! Dashboard HTTP handler and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{Kpi, compute_kpi},
        cards::summary_cards_view,
        charts::{
            DashboardChart, branch_revenue_chart, charts_script, charts_view, daily_trend_chart,
            payment_mode_chart,
        },
    },
    endpoints,
    html::{HeadElement, base, link},
    insights::insights_panel,
    navigation::NavBar,
    transaction::{Transaction, TransactionStore},
};

const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The shared transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display a page with an overview of the transaction data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .map_err(|_| Error::StoreLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let transactions = store.list();
    let kpi = compute_kpi(transactions);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar, &kpi).into_response());
    }

    let charts = build_dashboard_charts(transactions);

    Ok(dashboard_view(nav_bar, &kpi, &charts).into_response())
}

/// Creates the array of dashboard charts from transaction data.
///
/// Generates three charts: revenue per branch, payment mode share and the
/// daily revenue trend. The chart options are serialized to JSON for ECharts
/// consumption.
fn build_dashboard_charts(transactions: &[Transaction]) -> [DashboardChart; 3] {
    [
        DashboardChart {
            id: "branch-revenue-chart",
            options: branch_revenue_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "payment-mode-chart",
            options: payment_mode_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "daily-trend-chart",
            options: daily_trend_chart(transactions).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
///
/// The summary cards still render with their zero values so the page layout
/// stays stable.
fn dashboard_no_data_view(nav_bar: NavBar, kpi: &Kpi) -> Markup {
    let nav_bar = nav_bar.into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(kpi))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once some transactions are recorded.
                You can add them on the " (transactions_link) "."
            }
        }

        (insights_panel())
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards and charts.
fn dashboard_view(nav_bar: NavBar, kpi: &Kpi, charts: &[DashboardChart]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(kpi))
            (charts_view(charts))
        }

        (insights_panel())
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};

    use crate::{persist::MemoryBlobStore, transaction::TransactionStore};

    use super::{DashboardState, get_dashboard_page};

    fn get_test_state() -> DashboardState {
        DashboardState {
            store: Arc::new(Mutex::new(TransactionStore::load_or_seed(Box::new(
                MemoryBlobStore::new(),
            )))),
        }
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "branch-revenue-chart");
        assert_chart_exists(&html, "payment-mode-chart");
        assert_chart_exists(&html, "daily-trend-chart");

        assert_summary_card_exists(&html, "Total Revenue");
        assert_summary_card_exists(&html, "Total Transactions");
        assert_summary_card_exists(&html, "Avg. Transaction");
        assert_summary_card_exists(&html, "Top Branch");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();
        {
            let mut store = state.store.lock().unwrap();
            let ids: Vec<_> = store.list().iter().map(|t| t.id).collect();
            for id in ids {
                store.remove(id);
            }
        }

        let response = get_dashboard_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let selector = Selector::parse("#charts").unwrap();
        assert!(
            html.select(&selector).next().is_none(),
            "No charts should render without data"
        );
        assert_summary_card_exists(&html, "Top Branch");
        assert!(html.html().contains("N/A"));
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }

    #[track_caller]
    fn assert_summary_card_exists(html: &Html, label: &str) {
        let selector = Selector::parse(&format!("div[data-summary-card='{label}']")).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Summary card '{}' not found",
            label
        );
    }
}
