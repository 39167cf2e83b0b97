use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, kpi, panels, table};

pub const TITLE: &str = "MSH Startup Innovation Dashboard";

const DESCRIPTION: &str =
    "Gain insights into startup performance, funding, and innovation trends across India.";

const INSIGHT: &str = "Startups in 2025 show record innovation and funding growth, especially \
in programs under MSH Ignite and MSH Accelerator initiatives.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(TITLE);
    ui.label(DESCRIPTION);
    ui.add_space(8.0);

    ui.label(RichText::new(format!("Year: {}", state.selection.year)).size(20.0).strong());
    kpi::kpi_row(ui, &state.kpis);
    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        charts::funding_bar_chart(&mut cols[0], state);
        charts::funding_revenue_scatter(&mut cols[1], state);
    });
    ui.add_space(12.0);

    charts::trend_chart(ui, state);
    ui.add_space(12.0);

    ui.strong("Detailed Data");
    table::data_table(ui, state);
    ui.add_space(12.0);

    ui.strong("Insights");
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(0x1c, 0x3d, 0x5a))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(INSIGHT).color(Color32::from_rgb(0xd6, 0xea, 0xf8)));
        });
}
