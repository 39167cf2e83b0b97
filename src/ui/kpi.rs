use eframe::egui::{self, RichText, Ui};

use crate::data::stats::Kpis;

/// Four metric cards in one row.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Total Startups", &kpis.count_label());
        metric_card(&mut cols[1], "Avg Funding (M$)", &kpis.funding_label());
        metric_card(&mut cols[2], "Avg Revenue (M$)", &kpis.revenue_label());
        metric_card(&mut cols[3], "Innovation Index", &kpis.innovation_label());
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}
