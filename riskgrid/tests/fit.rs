use riskgrid::fit::{fit_columns, min_width};
use riskgrid::{CellMeasure, FilterAffordance, FitMetrics, HeaderCell, HeaderFont, TextMeasure};

/// Proportional stand-in for a browser font: 0.6em per character, scaled by
/// weight.
struct ProportionalMeasure;

impl TextMeasure for ProportionalMeasure {
    fn measure(&self, text: &str, font: &HeaderFont) -> f32 {
        let weight = if font.weight >= 600 { 1.05 } else { 1.0 };
        text.chars().count() as f32 * font.size * 0.6 * weight
    }
}

fn header(label: &str, filterable: bool) -> HeaderCell {
    HeaderCell {
        key: label.to_lowercase(),
        label: label.to_string(),
        filter: filterable.then(FilterAffordance::default),
    }
}

#[test]
fn test_pixel_widths_match_formula() {
    let font = HeaderFont::default();
    // "Severity": 8 * 13 * 0.6 * 1.05 = 65.52 -> 66
    let width = min_width("Severity", true, &font, &FitMetrics::PIXELS, &ProportionalMeasure);
    assert_eq!(width, 66 + 20 + 28 + 6);

    let width = min_width("Severity", false, &font, &FitMetrics::PIXELS, &ProportionalMeasure);
    assert_eq!(width, 66 + 20 + 6);
}

#[test]
fn test_never_narrower_than_label() {
    let font = HeaderFont::default();
    let labels = ["", "ID", "Responsible Department", "Likelihood of occurrence", "日本語"];
    for label in labels {
        for filterable in [false, true] {
            for measure in [&ProportionalMeasure as &dyn TextMeasure, &CellMeasure] {
                let measured = measure.measure(label, &font);
                let width = min_width(label, filterable, &font, &FitMetrics::PIXELS, measure);
                assert!(f32::from(width) >= measured, "{label:?}");
            }
        }
    }
}

#[test]
fn test_cell_widths_use_display_width() {
    let font = HeaderFont::default();
    let width = min_width("日本語", false, &font, &FitMetrics::CELLS, &CellMeasure);
    assert_eq!(width, 6 + 2 + 1);
}

#[test]
fn test_fit_columns_in_header_order() {
    let headers = vec![
        header("Risk Type", true),
        header("Description", false),
        header("Severity", true),
    ];
    let widths = fit_columns(
        &headers,
        &HeaderFont::default(),
        &FitMetrics::CELLS,
        &CellMeasure,
    );
    assert_eq!(widths, vec![9 + 5, 11 + 3, 8 + 5]);
}
