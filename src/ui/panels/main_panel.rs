use crate::engines::metrics::{CustomerReport, OrderReport, OverviewReport, ProductReport, ViewReport};
use crate::types::{Frequency, MetricValue};
use crate::ui::state::AppState;
use crate::ui::widgets::card::{BLUE, GREEN, ORANGE, RED};
use crate::ui::widgets::{metric_text, BarChart, MetricCard, TablePreviewWidget};

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) {
        let Some(report) = &state.report else {
            ui.centered_and_justified(|ui| {
                ui.label("No data loaded. Select a data folder in the sidebar.");
            });
            return;
        };

        let decimals = state.config.dashboard.score_decimals;
        egui::ScrollArea::vertical().show(ui, |ui| match report {
            ViewReport::Overview(r) => Self::show_overview(ui, r, decimals),
            ViewReport::Customers(r) => Self::show_customers(ui, r),
            ViewReport::Orders(r) => Self::show_orders(ui, r),
            ViewReport::Products(r) => Self::show_products(ui, r),
        });
    }

    fn show_overview(ui: &mut egui::Ui, report: &OverviewReport, decimals: usize) {
        ui.heading("Overview");

        ui.columns(4, |cols| {
            MetricCard::show(&mut cols[0], "Total Customers", &report.total_customers, GREEN, |v| v.to_string());
            MetricCard::show(&mut cols[1], "Total Orders", &report.total_orders, BLUE, |v| v.to_string());
            MetricCard::show(&mut cols[2], "Total Products", &report.total_products, ORANGE, |v| v.to_string());
            MetricCard::show(&mut cols[3], "Average Review Score", &report.average_review_score, RED, |v| {
                format!("{:.*}", decimals, v)
            });
        });

        ui.add_space(12.0);
        ui.heading("Total Sales by Product Category");
        let sales = report.category_sales.as_ref().map(|rows| {
            rows.iter()
                .map(|row| (row.category.clone(), row.total_price))
                .collect()
        });
        BarChart::show(ui, "category_sales", "Total Sales (in currency)", &sales, |v| format!("{:.2}", v));

        ui.add_space(12.0);
        ui.heading("Average Ratings from Reviews");
        let ratings = report.review_distribution.as_ref().map(|f| frequency_bars(f, format_score));
        BarChart::show(ui, "review_distribution", "Distribution of Review Scores", &ratings, format_count);

        ui.add_space(12.0);
        TablePreviewWidget::show(ui, "sample_orders", "Sample Orders Data", &report.sample_orders);
    }

    fn show_customers(ui: &mut egui::Ui, report: &CustomerReport) {
        ui.heading("Customer Analysis");

        let states = report
            .customers_by_state
            .as_ref()
            .map(|f| frequency_bars(f, |state| state.clone()));
        BarChart::show(ui, "customers_by_state", "Customers by State", &states, format_count);

        ui.add_space(12.0);
        TablePreviewWidget::show(ui, "sample_customers", "Customer Data Sample", &report.sample_customers);
    }

    fn show_orders(ui: &mut egui::Ui, report: &OrderReport) {
        ui.heading("Order Analysis");

        ui.horizontal(|ui| {
            ui.label("Average Delivery Time (days):");
            let text = metric_text(&report.average_delivery_days, |v| format!("{:.2}", v));
            let label = ui.strong(text);
            if let MetricValue::Unavailable(reason) = &report.average_delivery_days {
                label.on_hover_text(reason);
            }
        });

        ui.add_space(12.0);
        let days = report
            .delivery_distribution
            .as_ref()
            .map(|f| frequency_bars(f, |day| day.to_string()));
        BarChart::show(ui, "delivery_distribution", "Delivery Time Distribution", &days, format_count);
    }

    fn show_products(ui: &mut egui::Ui, report: &ProductReport) {
        ui.heading("Product Analysis");

        let products = report.top_sold_products.as_ref().map(|rows| {
            rows.iter()
                .map(|p| (p.label().to_string(), p.sold_count as f64))
                .collect()
        });
        BarChart::show(ui, "top_sold_products", "Most Sold Products", &products, format_count);

        if !report.skipped_products.is_empty() {
            ui.weak(format!(
                "{} top product(s) missing from the product table were skipped",
                report.skipped_products.len()
            ))
            .on_hover_text(report.skipped_products.join("\n"));
        }

        ui.add_space(12.0);
        TablePreviewWidget::show(ui, "sample_products", "Product Data Sample", &report.sample_products);
    }
}

fn frequency_bars<K>(frequency: &Frequency<K>, label: impl Fn(&K) -> String) -> Vec<(String, f64)> {
    frequency
        .iter()
        .map(|(key, count)| (label(key), *count as f64))
        .collect()
}

fn format_score(score: &f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        score.to_string()
    }
}

fn format_count(value: f64) -> String {
    format!("{:.0}", value)
}
