//! The question endpoint and the floating analyst panel.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, alert::AlertTemplate, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    insights::{InsightsClient, prompt::build_prompt},
    transaction::TransactionStore,
};

const SUGGESTED_QUESTIONS: [&str; 3] = [
    "Which branch performs best?",
    "What is the payment mode trend?",
    "Summarize sales for this week",
];

/// The state needed to answer a question about the data.
#[derive(Clone)]
pub struct InsightsState {
    /// The shared transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The client for the generative-text service.
    pub insights: Arc<InsightsClient>,
}

impl FromRef<AppState> for InsightsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            insights: state.insights.clone(),
        }
    }
}

/// The form data for asking a question.
#[derive(Debug, Deserialize)]
pub struct InsightsForm {
    /// The natural-language question about the data.
    pub query: String,
}

/// A route handler that forwards a question to the analyst model and renders
/// the answer as a partial for the panel's response area.
pub async fn post_insights_endpoint(
    State(state): State<InsightsState>,
    Form(form): Form<InsightsForm>,
) -> Response {
    let query = form.query.trim().to_owned();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            AlertTemplate::error_simple("Enter a question to ask the analyst.").into_html(),
        )
            .into_response();
    }

    // The prompt only needs a snapshot, so the lock is released before the
    // request to the service is awaited.
    let prompt = {
        let store = match state.store.lock() {
            Ok(store) => store,
            Err(_) => return Error::StoreLockError.into_response(),
        };
        build_prompt(store.list(), &query)
    };

    let answer = state.insights.ask(&prompt).await;

    insight_response_view(&query, &answer).into_response()
}

/// Renders the question and its answer for the panel's response area.
fn insight_response_view(query: &str, answer: &str) -> Markup {
    html! {
        div class="flex flex-col gap-3"
        {
            p class="self-end max-w-[85%] px-3 py-2 rounded-xl text-sm \
                bg-blue-600 text-white"
            {
                (query)
            }

            div class="max-w-[90%] px-3 py-2 rounded-xl text-sm whitespace-pre-line \
                bg-white dark:bg-gray-700 text-gray-800 dark:text-gray-200 \
                border border-gray-200 dark:border-gray-600 shadow-sm"
            {
                (answer)
            }
        }
    }
}

/// Renders the floating analyst panel shared by every page.
///
/// The panel opens from a fixed button in the bottom-right corner. Submitting
/// the form posts to the question endpoint and swaps the answer into the
/// response area without a page reload.
pub(crate) fn insights_panel() -> Markup {
    html! {
        details class="fixed bottom-6 right-6 z-50"
        {
            summary
                class="list-none [&::-webkit-details-marker]:hidden cursor-pointer \
                    flex items-center gap-2 px-4 py-3 \
                    rounded-full shadow-lg text-white font-semibold \
                    bg-gradient-to-r from-blue-600 to-indigo-600 hover:shadow-xl"
            {
                "✨ Ask AI"
            }

            div class="absolute bottom-full right-0 mb-3 w-96 max-w-[90vw] \
                bg-white dark:bg-gray-800 rounded-2xl \
                shadow-2xl border border-gray-200 dark:border-gray-700 \
                flex flex-col overflow-hidden"
            {
                div class="bg-gradient-to-r from-blue-600 to-indigo-600 p-4 \
                    flex justify-between items-center text-white"
                {
                    h3 class="font-semibold" { "Business AI Analyst" }
                }

                div
                    id="insight-response"
                    class="flex-grow p-4 min-h-[200px] max-h-[400px] overflow-y-auto \
                        bg-gray-50 dark:bg-gray-900"
                {
                    div class="text-center text-gray-500 dark:text-gray-400 text-sm space-y-2"
                    {
                        p { "Ask me about your data!" }
                        @for question in SUGGESTED_QUESTIONS {
                            p class="text-xs italic" { "\"" (question) "\"" }
                        }
                    }
                }

                form
                    hx-post=(endpoints::INSIGHTS_API)
                    hx-target="#insight-response"
                    hx-swap="innerHTML"
                    hx-indicator="#indicator"
                    hx-disabled-elt="find input, find button"
                    hx-target-error="#alert-container"
                    class="p-3 border-t border-gray-200 dark:border-gray-700 flex gap-2"
                {
                    input
                        type="text"
                        name="query"
                        placeholder="Ask about your sales data..."
                        class=(FORM_TEXT_INPUT_STYLE);

                    button type="submit" class=(BUTTON_PRIMARY_STYLE)
                    {
                        (loading_spinner())
                        "Ask"
                    }
                }
            }
        }
    }
}
