//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the transaction
//! data:
//! - **Branch Revenue Chart**: Total revenue per branch
//! - **Payment Mode Chart**: Revenue share per payment mode
//! - **Daily Trend Chart**: Daily revenue over the most recent active dates
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Label, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use time::{Date, Month};

use crate::{
    dashboard::aggregation::{daily_trend, group_by_branch, group_by_payment_mode},
    html::HeadElement,
    transaction::Transaction,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn branch_revenue_chart(transactions: &[Transaction]) -> Chart {
    let totals = group_by_branch(transactions);
    let labels: Vec<String> = totals
        .iter()
        .map(|(branch, _)| branch.as_str().to_owned())
        .collect();
    let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();

    Chart::new()
        .title(Title::new().text("Revenue by Branch"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Revenue").data(values))
}

pub(super) fn payment_mode_chart(transactions: &[Transaction]) -> Chart {
    let data: Vec<(f64, &str)> = group_by_payment_mode(transactions)
        .into_iter()
        .map(|(payment_mode, total)| (total, payment_mode.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Payment Mode Share"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .series(
            Pie::new()
                .name("Payment Mode")
                .radius("55%")
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}

pub(super) fn daily_trend_chart(transactions: &[Transaction]) -> Chart {
    let trend = daily_trend(transactions);
    let labels: Vec<String> = trend.iter().map(|(date, _)| format_date_label(*date)).collect();
    let values: Vec<f64> = trend.iter().map(|(_, total)| *total).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Daily Revenue")
                .subtext("Most recent fourteen active days"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Revenue").data(values))
}

/// Formats a date as a short axis label, e.g. "Aug 25".
fn format_date_label(date: Date) -> String {
    let month = match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {}", date.day())
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Branch, PaymentMode, Transaction};

    use super::{
        DashboardChart, branch_revenue_chart, charts_script, charts_view, format_date_label,
        payment_mode_chart,
    };

    fn create_test_transaction(amount: f64, branch: Branch, payment_mode: PaymentMode) -> Transaction {
        Transaction::build(date!(2024 - 08 - 25), branch, payment_mode, amount, "test")
    }

    #[test]
    fn format_date_label_uses_short_month_and_day() {
        assert_eq!(format_date_label(date!(2024 - 08 - 25)), "Aug 25");
        assert_eq!(format_date_label(date!(2024 - 01 - 02)), "Jan 2");
    }

    #[test]
    fn branch_chart_contains_branch_labels() {
        let transactions = vec![
            create_test_transaction(100.0, Branch::Headquarters, PaymentMode::Cash),
            create_test_transaction(50.0, Branch::NorthBranch, PaymentMode::Card),
        ];

        let options = branch_revenue_chart(&transactions).to_string();

        assert!(options.contains("Headquarters"));
        assert!(options.contains("North Branch"));
    }

    #[test]
    fn payment_mode_chart_contains_mode_labels() {
        let transactions = vec![
            create_test_transaction(100.0, Branch::Headquarters, PaymentMode::Insurance),
            create_test_transaction(50.0, Branch::Headquarters, PaymentMode::Mobile),
        ];

        let options = payment_mode_chart(&transactions).to_string();

        assert!(options.contains("Insurance"));
        assert!(options.contains("Mobile"));
    }

    #[test]
    fn charts_view_renders_container_per_chart() {
        let charts = vec![
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let html = charts_view(&charts).into_string();

        assert!(html.contains("id=\"first-chart\""));
        assert!(html.contains("id=\"second-chart\""));
    }

    #[test]
    fn charts_script_initializes_each_chart() {
        let charts = vec![DashboardChart {
            id: "only-chart",
            options: "{\"series\":[]}".to_owned(),
        }];

        let crate::html::HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("expected inline script source");
        };

        assert!(script.0.contains("getElementById(\"only-chart\")"));
        assert!(script.0.contains("echarts.init"));
    }
}
