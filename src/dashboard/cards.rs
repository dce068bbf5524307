//! Summary card components for the dashboard's headline figures.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::Kpi,
    html::{CARD_STYLE, format_currency, format_currency_rounded},
};

/// Renders the four summary cards for the headline figures.
pub(super) fn summary_cards_view(kpi: &Kpi) -> Markup {
    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-4 gap-4" {
                (summary_card("Total Revenue", &format_currency(kpi.total_revenue)))
                (summary_card("Total Transactions", &kpi.transaction_count.to_string()))
                (summary_card("Avg. Transaction", &format_currency_rounded(kpi.average_value)))
                (summary_card("Top Branch", &kpi.top_branch))
            }
        }
    }
}

fn summary_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-summary-card=(label) {
            p class="text-sm text-gray-500 dark:text-gray-400 mb-1" { (label) }
            p class="text-2xl font-bold text-gray-900 dark:text-white truncate" title=(value) {
                (value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::aggregation::Kpi;

    use super::summary_cards_view;

    #[test]
    fn renders_all_four_headline_figures() {
        let kpi = Kpi {
            total_revenue: 700.0,
            transaction_count: 3,
            average_value: 233.33,
            top_branch: "Headquarters".to_owned(),
        };

        let html = summary_cards_view(&kpi).into_string();

        assert!(html.contains("$700.00"));
        assert!(html.contains(">3<"));
        assert!(html.contains("$233"));
        assert!(html.contains("Headquarters"));
    }

    #[test]
    fn renders_placeholder_top_branch_for_empty_data() {
        let kpi = Kpi {
            total_revenue: 0.0,
            transaction_count: 0,
            average_value: 0.0,
            top_branch: "N/A".to_owned(),
        };

        let html = summary_cards_view(&kpi).into_string();

        assert!(html.contains("$0.00"));
        assert!(html.contains("N/A"));
    }
}
