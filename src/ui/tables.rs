use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::Summary;

const ROW_HEIGHT: f32 = 18.0;

fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Two-column table of `(label, value)` rows.
fn simple_table(ui: &mut Ui, id: &str, headers: [&str; 2], rows: &[(String, String)]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in headers {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (label, value) in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(value);
                        });
                    });
                }
            });
    });
}

/// The aggregates behind the charts, as tables.
pub fn summary_tables(ui: &mut Ui, summary: &Summary) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            match summary.avg_rating {
                Some(avg) => ui.heading(format!("Average Rating: {avg:.2}")),
                None => ui.heading("Average Rating: n/a"),
            };
            ui.separator();

            let gender: Vec<(String, String)> = summary
                .gender_counts
                .iter()
                .map(|c| (c.value.clone(), c.count.to_string()))
                .collect();
            egui::CollapsingHeader::new("Gender count")
                .default_open(true)
                .show(ui, |ui: &mut Ui| simple_table(ui, "gender", ["Gender", "Count"], &gender));

            let grouped = [
                ("Gender by department", &summary.gender_by_department),
                ("Gender by location", &summary.gender_by_location),
            ];
            for (title, groups) in grouped {
                let rows: Vec<(String, String)> = groups
                    .iter()
                    .flat_map(|g| {
                        g.counts
                            .iter()
                            .map(move |c| (format!("{} / {}", g.group, c.value), c.count.to_string()))
                    })
                    .collect();
                egui::CollapsingHeader::new(title)
                    .show(ui, |ui: &mut Ui| simple_table(ui, title, ["Group / Gender", "Count"], &rows));
            }

            let valued = [
                ("Average salary by department", &summary.avg_salary_by_department),
                ("Average salary by location", &summary.avg_salary_by_location),
                ("Gender pay gap by department", &summary.pay_gap_by_department),
                ("Gender pay gap by location", &summary.pay_gap_by_location),
            ];
            for (title, values) in valued {
                let rows: Vec<(String, String)> = values
                    .iter()
                    .map(|v| (v.group.clone(), fmt_value(v.value)))
                    .collect();
                egui::CollapsingHeader::new(title)
                    .show(ui, |ui: &mut Ui| simple_table(ui, title, ["Group", "Value"], &rows));
            }

            let ratings: Vec<(String, String)> = summary
                .rating_distribution
                .iter()
                .map(|s| (s.value.clone(), format!("{:.1} %", s.percent)))
                .collect();
            egui::CollapsingHeader::new("Rating frequency")
                .show(ui, |ui: &mut Ui| simple_table(ui, "ratings", ["Rating", "Share"], &ratings));
        });
}
