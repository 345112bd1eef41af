use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::analysis::{GroupValue, Pivot, Summary};
use crate::color::{ColorMap, heat_color, heat_text_color};

const BAR_WIDTH: f64 = 0.6;
const HEAT_CELL: [f32; 2] = [72.0, 30.0];

// ---------------------------------------------------------------------------
// Shared bar plot
// ---------------------------------------------------------------------------

/// Names the category under each integer tick; other ticks stay blank.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn bar_plot(ui: &mut Ui, id: &str, x_label: &str, y_label: &str, labels: Vec<String>, chart: BarChart) {
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(category_formatter(labels))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Split group values into plottable bars and groups with an undefined value.
pub fn plottable(values: &[GroupValue]) -> (Vec<&GroupValue>, Vec<&str>) {
    let (finite, undefined): (Vec<&GroupValue>, Vec<&GroupValue>) =
        values.iter().partition(|v| !v.value.is_nan());
    (finite, undefined.into_iter().map(|v| v.group.as_str()).collect())
}

fn value_chart(ui: &mut Ui, id: &str, x_label: &str, y_label: &str, values: &[GroupValue], color: Color32) {
    let (bars, undefined) = plottable(values);
    let labels = bars.iter().map(|v| v.group.clone()).collect();
    let chart = BarChart::new(
        bars.iter()
            .enumerate()
            .map(|(i, v)| Bar::new(i as f64, v.value).name(&v.group).width(BAR_WIDTH))
            .collect(),
    )
    .name(y_label)
    .color(color);

    if !undefined.is_empty() {
        ui.label(
            RichText::new(format!("No data: {}", undefined.join(", ")))
                .italics()
                .color(Color32::GRAY),
        );
    }
    bar_plot(ui, id, x_label, y_label, labels, chart);
}

// ---------------------------------------------------------------------------
// The four charts
// ---------------------------------------------------------------------------

/// Number of employees per gender, one coloured bar each, in the order the
/// genders first appear in the data.
pub fn gender_count_chart(ui: &mut Ui, summary: &Summary, color_map: Option<&ColorMap>) {
    let counts = &summary.gender_counts_by_appearance;
    let labels = counts.iter().map(|c| c.value.clone()).collect();
    let bars = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = color_map
                .map(|cm| cm.color_for(&c.value))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, c.count as f64)
                .name(&c.value)
                .fill(color)
                .width(BAR_WIDTH)
        })
        .collect();

    bar_plot(ui, "gender_count", "Gender", "Count", labels, BarChart::new(bars).name("Count"));
}

/// Department means, already sorted highest first.
pub fn salary_by_department_chart(ui: &mut Ui, summary: &Summary) {
    value_chart(
        ui,
        "salary_by_department",
        "Department",
        "Average Salary",
        &summary.avg_salary_by_department,
        Color32::LIGHT_BLUE,
    );
}

/// Male minus female mean salary; departments lacking either gender are
/// listed above the plot instead of drawn as zero.
pub fn pay_gap_chart(ui: &mut Ui, summary: &Summary) {
    value_chart(
        ui,
        "pay_gap_by_department",
        "Department",
        "Pay Gap",
        &summary.pay_gap_by_department,
        Color32::from_rgb(230, 140, 60),
    );
}

/// Annotated Department × Gender count grid.
pub fn gender_heatmap(ui: &mut Ui, pivot: &Pivot) {
    if pivot.is_empty() {
        ui.label("No department/gender data for the current selection.");
        return;
    }
    let max = pivot.max().max(1) as f32;

    egui::Grid::new("gender_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in &pivot.columns {
                ui.strong(col);
            }
            ui.end_row();

            for (row, counts) in pivot.rows.iter().zip(&pivot.counts) {
                ui.label(row);
                for &count in counts {
                    let t = count as f32 / max;
                    let (rect, response) = ui.allocate_exact_size(HEAT_CELL.into(), Sense::hover());
                    let painter = ui.painter();
                    painter.rect_filled(rect, 2.0, heat_color(t));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        count.to_string(),
                        FontId::monospace(14.0),
                        heat_text_color(t),
                    );
                    response.on_hover_text(format!("{row}: {count}"));
                }
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gv(group: &str, value: f64) -> GroupValue {
        GroupValue {
            group: group.to_string(),
            value,
        }
    }

    #[test]
    fn undefined_values_are_not_drawn() {
        let values = vec![gv("IT", 1500.0), gv("Ops", f64::NAN), gv("Sales", -200.0)];
        let (bars, undefined) = plottable(&values);
        let drawn: Vec<&str> = bars.iter().map(|v| v.group.as_str()).collect();
        assert_eq!(drawn, vec!["IT", "Sales"]);
        assert_eq!(undefined, vec!["Ops"]);
    }

    #[test]
    fn formatter_labels_integer_ticks_only() {
        let fmt = category_formatter(vec!["IT".into(), "Sales".into()]);
        let mark = |value: f64| GridMark { value, step_size: 1.0 };
        let range = 0.0..=1.0;
        assert_eq!(fmt(mark(0.0), &range), "IT");
        assert_eq!(fmt(mark(1.0), &range), "Sales");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(2.0), &range), "");
        assert_eq!(fmt(mark(-1.0), &range), "");
    }
}
