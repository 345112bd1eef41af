use eframe::egui;

use crate::state::{AppState, ChartKind};
use crate::ui::{charts, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HrPandaApp {
    pub state: AppState,
}

impl HrPandaApp {
    /// Start with an already loaded dataset, if any.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn chart_windows(&mut self, ctx: &egui::Context) {
        // Held outside the state while the windows borrow their open flags.
        let Some(summary) = self.state.summary.take() else {
            return;
        };
        let color_map = self.state.color_map.take();

        for (i, kind) in ChartKind::ALL.into_iter().enumerate() {
            let offset = 24.0 * i as f32;
            egui::Window::new(kind.title())
                .open(self.state.window_flag(kind))
                .default_size([520.0, 340.0])
                .default_pos([260.0 + offset, 60.0 + offset])
                .show(ctx, |ui| match kind {
                    ChartKind::GenderCount => charts::gender_count_chart(ui, &summary, color_map.as_ref()),
                    ChartKind::SalaryByDepartment => charts::salary_by_department_chart(ui, &summary),
                    ChartKind::PayGapByDepartment => charts::pay_gap_chart(ui, &summary),
                    ChartKind::GenderHeatmap => charts::gender_heatmap(ui, &summary.gender_distribution),
                    ChartKind::SummaryTables => tables::summary_tables(ui, &summary),
                });
        }

        self.state.summary = Some(summary);
        self.state.color_map = color_map;
    }
}

impl eframe::App for HrPandaApp {
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

        // ---- Central panel: placeholder behind the chart windows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a file to analyse  (File → Open…)");
                });
            }
        });

        self.chart_windows(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_reader;

    #[test]
    fn chart_windows_keep_summary_across_frames() {
        let csv = "Name,Gender,Department,Location,Salary,Rating\n\
                   Ana,Female,IT,Berlin,\"$52,000\",Good\n\
                   Ben,Male,IT,Berlin,\"$48,000\",Fair\n";
        let mut state = AppState::default();
        state.set_dataset(load_csv_reader(csv.as_bytes()).unwrap());
        let before = state.summary.clone();
        let mut app = HrPandaApp::new(state);

        let ctx = egui::Context::default();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| app.chart_windows(ctx));
        }

        assert!(app.state.summary.is_some());
        assert_eq!(app.state.summary, before);
        assert!(app.state.color_map.is_some());
    }
}
