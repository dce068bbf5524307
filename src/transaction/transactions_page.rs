//! Defines the route handler for the page that displays transactions as a
//! searchable table with a quick-add form.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, base, format_currency,
    },
    insights::insights_panel,
    navigation::NavBar,
    transaction::{Branch, PaymentMode, Transaction, TransactionStore},
};

/// The search box contents, if any.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// The text to match transactions against.
    pub search: Option<String>,
}

/// The state needed for the transactions page.
#[derive(Clone)]
pub struct TransactionsViewState {
    /// The shared transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render an overview of the recorded transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query_params): Query<SearchQuery>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .map_err(|_| Error::StoreLockError)?;

    let search = query_params.search.unwrap_or_default();
    let transactions = filter_transactions(store.list(), &search);

    Ok(transactions_view(&transactions, &search))
}

/// Keep the transactions whose description, branch or payment mode contains
/// `search`, ignoring case. An empty `search` keeps everything.
fn filter_transactions<'a>(transactions: &'a [Transaction], search: &str) -> Vec<&'a Transaction> {
    let needle = search.trim().to_lowercase();

    transactions
        .iter()
        .filter(|transaction| {
            needle.is_empty()
                || transaction.description.to_lowercase().contains(&needle)
                || transaction.branch.as_str().to_lowercase().contains(&needle)
                || transaction
                    .payment_mode
                    .as_str()
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

fn transactions_view(transactions: &[&Transaction], search: &str) -> Response {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();

    let content = html! {
        (nav_bar)

        main class="max-w-7xl mx-auto px-4 py-6 flex flex-col gap-6"
        {
            (toolbar_view(transactions.len(), search))
            (quick_add_form(today))
            (transaction_table(transactions))
        }

        (insights_panel())
    };

    base("Transactions", &[share_script()], &content).into_response()
}

fn toolbar_view(record_count: usize, search: &str) -> Markup {
    html! {
        div class="flex flex-wrap items-center justify-between gap-4"
        {
            div class="flex items-center gap-3"
            {
                h1 class="text-xl font-bold text-gray-900 dark:text-white" { "Transaction Log" }
                span
                    class="px-2 py-0.5 rounded-full text-xs font-medium bg-blue-100 \
                        text-blue-800 dark:bg-blue-900 dark:text-blue-200"
                {
                    (record_count) " records"
                }
            }

            div class="flex items-center gap-2"
            {
                form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex items-center gap-2"
                {
                    input
                        type="search"
                        name="search"
                        value=(search)
                        placeholder="Search transactions..."
                        class=(FORM_TEXT_INPUT_STYLE);
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Search" }
                }

                button type="button" id="share-button" class=(BUTTON_SECONDARY_STYLE)
                {
                    "Share"
                }

                button type="button" disabled class=(BUTTON_SECONDARY_STYLE) title="Coming soon"
                {
                    "Export"
                }
            }
        }
    }
}

/// Generates the click handler for the toolbar's share button.
///
/// Uses the Web Share API where the browser offers it and falls back to
/// copying the page URL to the clipboard with brief feedback on the button.
/// Failures only go to the console, either way.
fn share_script() -> HeadElement {
    let script = r#"document.addEventListener('DOMContentLoaded', function() {
        const button = document.getElementById('share-button');

        button.addEventListener('click', async () => {
            const url = window.location.href;

            if (navigator.share) {
                try {
                    await navigator.share({
                        title: 'BizDash',
                        text: 'Check out my business dashboard!',
                        url: url,
                    });
                } catch (err) {
                    console.log('Error sharing:', err);
                }
            } else {
                try {
                    await navigator.clipboard.writeText(url);
                    const label = button.textContent;
                    button.textContent = 'Link Copied!';
                    setTimeout(() => { button.textContent = label; }, 2000);
                } catch (err) {
                    console.error('Failed to copy', err);
                }
            }
        });
    });"#;

    HeadElement::ScriptSource(PreEscaped(script.to_owned()))
}

fn quick_add_form(today: time::Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class=(CARD_STYLE)
        {
            h2 class="text-sm font-semibold text-gray-900 dark:text-white mb-4" { "Add Transaction" }

            div class="grid grid-cols-2 md:grid-cols-6 gap-3 items-end"
            {
                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        type="date"
                        id="date"
                        name="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="branch" class=(FORM_LABEL_STYLE) { "Branch" }
                    select id="branch" name="branch" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for branch in Branch::ALL {
                            option value=(branch) { (branch) }
                        }
                    }
                }

                div
                {
                    label for="payment_mode" class=(FORM_LABEL_STYLE) { "Payment Mode" }
                    select id="payment_mode" name="payment_mode" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for payment_mode in PaymentMode::ALL {
                            option value=(payment_mode) { (payment_mode) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount ($)" }
                    input
                        type="number"
                        id="amount"
                        name="amount"
                        min="0.01"
                        step="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        type="text"
                        id="description"
                        name="description"
                        placeholder="e.g. Consultation"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Record" }
            }
        }
    }
}

fn transaction_table(transactions: &[&Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-xl border border-gray-200 dark:border-gray-700 \
            bg-white dark:bg-gray-800 shadow-sm"
        {
            table class="w-full text-left"
            {
                thead
                {
                    tr
                    {
                        th class=(TABLE_HEADER_STYLE) { "Date" }
                        th class=(TABLE_HEADER_STYLE) { "Branch" }
                        th class=(TABLE_HEADER_STYLE) { "Mode" }
                        th class=(TABLE_HEADER_STYLE) { "Description" }
                        th class=(TABLE_HEADER_STYLE) { "Amount" }
                        th class=(TABLE_HEADER_STYLE) { "Action" }
                    }
                }

                tbody
                {
                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                data-empty-state="true"
                                class="px-4 py-8 text-center text-sm text-gray-500 dark:text-gray-400"
                            {
                                "No transactions found matching your search."
                            }
                        }
                    }

                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html! {
        tr
            data-transaction-row="true"
            class="border-b border-gray-100 dark:border-gray-700/50 \
                hover:bg-gray-50 dark:hover:bg-gray-700/30"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(branch_badge_style(transaction.branch)) { (transaction.branch) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.payment_mode) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class={(TABLE_CELL_STYLE) " font-medium"} { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    aria-label="Delete transaction"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "✕"
                }
            }
        }
    }
}

fn branch_badge_style(branch: Branch) -> &'static str {
    match branch {
        Branch::Headquarters => {
            "px-2 py-0.5 rounded-full text-xs font-medium \
            bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-200"
        }
        Branch::NorthBranch => {
            "px-2 py-0.5 rounded-full text-xs font-medium \
            bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200"
        }
        Branch::SouthBranch => {
            "px-2 py-0.5 rounded-full text-xs font-medium \
            bg-purple-100 text-purple-800 dark:bg-purple-900 dark:text-purple-200"
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        persist::MemoryBlobStore,
        transaction::{Branch, PaymentMode, Transaction, TransactionStore},
    };

    use super::{SearchQuery, TransactionsViewState, filter_transactions, get_transactions_page};

    fn test_transaction(branch: Branch, payment_mode: PaymentMode, description: &str) -> Transaction {
        Transaction::build(date!(2025 - 08 - 01), branch, payment_mode, 42.0, description)
    }

    fn get_test_state(transactions: Vec<Transaction>) -> TransactionsViewState {
        let mut store = TransactionStore::load_or_seed(Box::new(MemoryBlobStore::new()));
        let seeded: Vec<_> = store.list().iter().map(|t| t.id).collect();
        for id in seeded {
            store.remove(id);
        }
        for transaction in transactions {
            store.add(transaction);
        }

        TransactionsViewState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[test]
    fn filter_matches_description_branch_and_mode_case_insensitively() {
        let transactions = vec![
            test_transaction(Branch::Headquarters, PaymentMode::Cash, "Morning sale"),
            test_transaction(Branch::NorthBranch, PaymentMode::Card, "Repair"),
            test_transaction(Branch::SouthBranch, PaymentMode::Insurance, "Claim payout"),
        ];

        assert_eq!(filter_transactions(&transactions, "MORNING").len(), 1);
        assert_eq!(filter_transactions(&transactions, "north").len(), 1);
        assert_eq!(filter_transactions(&transactions, "insur").len(), 1);
        assert_eq!(filter_transactions(&transactions, "").len(), 3);
        assert_eq!(filter_transactions(&transactions, "zzz").len(), 0);
    }

    #[tokio::test]
    async fn transactions_page_displays_all_records() {
        let state = get_test_state(vec![
            test_transaction(Branch::Headquarters, PaymentMode::Cash, "First"),
            test_transaction(Branch::NorthBranch, PaymentMode::Card, "Second"),
        ]);

        let response = get_transactions_page(State(state), Query(SearchQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_eq!(count_transaction_rows(&html), 2);

        let badge = html
            .select(&Selector::parse("span.px-2").unwrap())
            .map(|e| e.text().collect::<String>())
            .find(|text| text.contains("2 records"));
        assert!(badge.is_some(), "Expected a '2 records' badge");
    }

    #[tokio::test]
    async fn transactions_page_applies_search_filter() {
        let state = get_test_state(vec![
            test_transaction(Branch::Headquarters, PaymentMode::Cash, "Coffee"),
            test_transaction(Branch::NorthBranch, PaymentMode::Card, "Laptop"),
        ]);

        let response = get_transactions_page(
            State(state),
            Query(SearchQuery {
                search: Some("coffee".to_owned()),
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_eq!(count_transaction_rows(&html), 1);

        let search_input = must_select_one(&html, "input[type='search'][name='search']");
        assert_eq!(search_input.value().attr("value"), Some("coffee"));
    }

    #[tokio::test]
    async fn transactions_page_shows_empty_state_when_nothing_matches() {
        let state = get_test_state(vec![test_transaction(
            Branch::Headquarters,
            PaymentMode::Cash,
            "Only record",
        )]);

        let response = get_transactions_page(
            State(state),
            Query(SearchQuery {
                search: Some("no such thing".to_owned()),
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_eq!(count_transaction_rows(&html), 0);

        let empty_cell = must_select_one(&html, "tbody td[data-empty-state='true']");
        assert_eq!(empty_cell.value().attr("colspan"), Some("6"));
    }

    #[tokio::test]
    async fn transactions_page_has_quick_add_form_and_delete_buttons() {
        let transaction = test_transaction(Branch::SouthBranch, PaymentMode::Mobile, "Deletable");
        let id = transaction.id;
        let state = get_test_state(vec![transaction]);

        let response = get_transactions_page(State(state), Query(SearchQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let form = must_select_one(&html, "form[hx-post='/api/transactions']");
        let amount_input_selector = Selector::parse("input[name='amount']").unwrap();
        let amount_input = form
            .select(&amount_input_selector)
            .next()
            .expect("Quick-add form should have an amount input");
        assert_eq!(amount_input.value().attr("min"), Some("0.01"));

        let branch_options = form
            .select(&Selector::parse("select[name='branch'] option").unwrap())
            .count();
        assert_eq!(branch_options, Branch::ALL.len());

        let delete_button = must_select_one(&html, "button[hx-target='closest tr']");
        assert_eq!(
            delete_button.value().attr("hx-delete"),
            Some(format!("/api/transactions/{id}").as_str())
        );
    }

    #[tokio::test]
    async fn transactions_page_has_a_working_share_button() {
        let state = get_test_state(vec![test_transaction(
            Branch::Headquarters,
            PaymentMode::Cash,
            "Only record",
        )]);

        let response = get_transactions_page(State(state), Query(SearchQuery::default()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        must_select_one(&html, "button#share-button");

        let script = html
            .select(&Selector::parse("head script:not([src])").unwrap())
            .map(|element| element.text().collect::<String>())
            .find(|text| text.contains("getElementById('share-button')"))
            .expect("Expected an inline script wiring up the share button");
        assert!(script.contains("navigator.share"));
        assert!(script.contains("navigator.clipboard.writeText"));
        assert!(script.contains("Link Copied!"));
    }

    #[track_caller]
    fn must_select_one<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element found for selector {selector}"))
    }

    fn count_transaction_rows(html: &Html) -> usize {
        html.select(&Selector::parse("tbody tr[data-transaction-row='true']").unwrap())
            .count()
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
