use riskgrid::widget::Dropdown;
use riskgrid::{
    unique_values, CellValue, Dataset, Floating, FloatingContent, HeaderFont, Rect, Row, Size,
    Surface, TextMeasure, Widget, WidgetConfig, WidgetEvent,
};
use serde_json::json;

/// A fixed-size surface: one unit per character, menus one line per entry.
struct TestSurface {
    viewport: Size,
}

impl TestSurface {
    fn new(width: u16, height: u16) -> Self {
        Self {
            viewport: Size::new(width, height),
        }
    }
}

impl TextMeasure for TestSurface {
    fn measure(&self, text: &str, _font: &HeaderFont) -> f32 {
        text.chars().count() as f32
    }
}

impl Surface for TestSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn floating_size(&self, content: FloatingContent<'_>, _config: &WidgetConfig) -> Size {
        match content {
            FloatingContent::Menu(menu) => Size::new(12, menu.entries.len() as u16 + 2),
            FloatingContent::Tooltip(text) => Size::new(text.len().min(30) as u16 + 2, 3),
        }
    }
}

fn severity_payload() -> serde_json::Value {
    json!({
        "type": "ui_component_render",
        "source": "agentos",
        "payload": {
            "columns": [{"key": "severity", "label": "Severity"}],
            "rows": [{"severity": "4"}, {"severity": "low"}, {"severity": 2}]
        }
    })
}

fn register_payload() -> serde_json::Value {
    json!({
        "type": "ui_component_render",
        "source": "agentos",
        "payload": {
            "columns": [
                {"key": "risk_type", "label": "Risk Type"},
                {"key": "description", "label": "Description"},
                {"key": "severity", "label": "Severity"}
            ],
            "rows": [
                {"risk_type": "Operational", "description": "Single supplier for a critical component with long lead times", "severity": "High"},
                {"risk_type": "Financial", "description": "FX exposure", "severity": 3}
            ]
        }
    })
}

fn loaded(payload: serde_json::Value, surface: &TestSurface) -> Widget {
    let mut widget = Widget::new(WidgetConfig::default(), surface);
    assert!(widget.handle(WidgetEvent::Payload(payload), surface));
    widget
}

fn open_dropdown(widget: &Widget) -> &Dropdown {
    match widget.floating() {
        Some(Floating::Dropdown(dropdown)) => dropdown,
        other => panic!("expected dropdown, got {other:?}"),
    }
}

#[test]
fn test_starts_with_fallback() {
    let surface = TestSurface::new(80, 24);
    let widget = Widget::new(WidgetConfig::default(), &surface);
    assert_eq!(widget.tree().header[0].label, "Status");
    assert_eq!(widget.tree().rows[0].cells[0].text, "UI loaded correctly");
}

#[test]
fn test_loading_dataset_without_columns_stores_fallback() {
    let surface = TestSurface::new(80, 24);
    let mut widget = Widget::new(WidgetConfig::default(), &surface);
    widget.load(
        Dataset::new(
            vec![],
            vec![
                Row::new().with("risk_type", "Operational"),
                Row::new().with("risk_type", "Financial"),
            ],
        ),
        &surface,
    );

    assert_eq!(widget.dataset(), &Dataset::fallback());
    assert_eq!(widget.visible_rows().len(), widget.tree().rows.len());
    assert_eq!(widget.tree().total_rows, 1);
    assert_eq!(
        widget.visible_rows()[0].get("status"),
        &CellValue::from("UI loaded correctly")
    );
}

#[test]
fn test_severity_end_to_end() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(severity_payload(), &surface);

    assert_eq!(unique_values(widget.dataset(), "severity"), vec!["High", "Low"]);

    widget.handle(
        WidgetEvent::FilterOptionSelected {
            column: "severity".into(),
            value: Some("High".into()),
        },
        &surface,
    );

    let rows = widget.visible_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("severity"), &CellValue::from("4"));
    assert_eq!(widget.tree().rows.len(), 1);
    assert_eq!(widget.tree().rows[0].cells[0].text, "4");
}

#[test]
fn test_malformed_envelopes_are_ignored() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(severity_payload(), &surface);
    widget.handle(
        WidgetEvent::FilterOptionSelected {
            column: "severity".into(),
            value: Some("Low".into()),
        },
        &surface,
    );
    let before = widget.tree().clone();

    let rejected = [
        json!({"type": "other", "source": "agentos", "payload": {"columns": [{"key": "a", "label": "A"}], "rows": []}}),
        json!({"type": "ui_component_render", "source": "agentos"}),
        json!({"type": "ui_component_render", "source": "agentos", "payload": {"columns": [], "rows": []}}),
        json!("ui_component_render"),
    ];
    for message in rejected {
        assert!(!widget.handle(WidgetEvent::Payload(message), &surface));
    }

    assert_eq!(widget.tree(), &before);
    assert_eq!(widget.filters().get("severity"), Some("Low"));
}

#[test]
fn test_new_payload_clears_filters_and_floating() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    widget.handle(
        WidgetEvent::FilterOptionSelected {
            column: "risk_type".into(),
            value: Some("Financial".into()),
        },
        &surface,
    );
    widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "severity".into(),
            anchor: Rect::new(30, 0, 1, 1),
        },
        &surface,
    );
    assert!(widget.floating().is_some());

    widget.handle(WidgetEvent::Payload(register_payload()), &surface);
    assert!(widget.filters().is_empty());
    assert!(widget.floating().is_none());
    assert_eq!(widget.tree().rows.len(), 2);
}

#[test]
fn test_dropdown_lists_all_then_values() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    assert!(widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "severity".into(),
            anchor: Rect::new(30, 0, 1, 1),
        },
        &surface,
    ));

    let dropdown = open_dropdown(&widget);
    let labels: Vec<&str> = dropdown
        .menu
        .entries
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels, vec!["All", "High", "Medium"]);
    assert_eq!(dropdown.highlighted, 0);
    assert_eq!(dropdown.placement.size, Size::new(12, 5));
    assert_eq!(dropdown.placement.top, 1);
}

#[test]
fn test_non_filterable_icon_is_ignored() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    assert!(!widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "description".into(),
            anchor: Rect::new(10, 0, 1, 1),
        },
        &surface,
    ));
    assert!(widget.floating().is_none());
}

#[test]
fn test_keyboard_selection_and_all_entry() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    let activate = WidgetEvent::FilterIconActivated {
        column: "severity".into(),
        anchor: Rect::new(30, 0, 1, 1),
    };

    widget.handle(activate.clone(), &surface);
    widget.handle(WidgetEvent::MenuMove { delta: 2 }, &surface);
    assert!(widget.handle(WidgetEvent::MenuChoose, &surface));
    assert_eq!(widget.filters().get("severity"), Some("Medium"));
    assert!(widget.floating().is_none());
    assert_eq!(widget.tree().rows.len(), 1);

    // Reopening highlights the active entry; wrapping back lands on "All"
    widget.handle(activate, &surface);
    assert_eq!(open_dropdown(&widget).highlighted, 2);
    widget.handle(WidgetEvent::MenuMove { delta: 1 }, &surface);
    widget.handle(WidgetEvent::MenuChoose, &surface);
    assert!(widget.filters().is_empty());
    assert_eq!(widget.tree().rows.len(), 2);
}

#[test]
fn test_tooltip_lifecycle() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    let cell = widget.tree().rows[0].cells[1].clone();
    let text = cell.tooltip().expect("description is truncated").to_string();
    let anchor = Rect::new(15, 2, 20, 1);

    assert!(widget.handle(
        WidgetEvent::HoverEnter {
            text: text.clone(),
            anchor,
        },
        &surface,
    ));
    match widget.floating() {
        Some(Floating::Tooltip(tooltip)) => {
            assert_eq!(tooltip.text, text);
            assert_eq!(tooltip.placement.top, 4);
            assert!(tooltip.placement.arrow_left.is_some());
        }
        other => panic!("expected tooltip, got {other:?}"),
    }

    // Same position: nothing to repaint
    assert!(!widget.handle(WidgetEvent::HoverMove { text, anchor }, &surface));

    assert!(widget.handle(WidgetEvent::HoverLeave, &surface));
    assert!(widget.floating().is_none());
    assert!(!widget.handle(WidgetEvent::HoverLeave, &surface));
}

#[test]
fn test_opening_one_floating_element_closes_the_other() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    widget.handle(
        WidgetEvent::HoverEnter {
            text: "long text".into(),
            anchor: Rect::new(15, 2, 20, 1),
        },
        &surface,
    );
    widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "risk_type".into(),
            anchor: Rect::new(8, 0, 1, 1),
        },
        &surface,
    );
    open_dropdown(&widget);

    // Hover leave only hides tooltips
    assert!(!widget.handle(WidgetEvent::HoverLeave, &surface));
    open_dropdown(&widget);

    assert!(widget.handle(
        WidgetEvent::HoverEnter {
            text: "long text".into(),
            anchor: Rect::new(15, 2, 20, 1),
        },
        &surface,
    ));
    assert!(matches!(widget.floating(), Some(Floating::Tooltip(_))));
}

#[test]
fn test_outside_click_scroll_and_resize_close_floating() {
    let surface = TestSurface::new(80, 24);
    let mut widget = loaded(register_payload(), &surface);
    let open = WidgetEvent::FilterIconActivated {
        column: "risk_type".into(),
        anchor: Rect::new(8, 0, 1, 1),
    };

    for closer in [
        WidgetEvent::OutsideClick,
        WidgetEvent::Scroll,
        WidgetEvent::Resize {
            width: 100,
            height: 30,
        },
    ] {
        widget.handle(open.clone(), &surface);
        assert!(widget.floating().is_some());
        assert!(widget.handle(closer, &surface));
        assert!(widget.floating().is_none());
    }

    assert!(!widget.handle(WidgetEvent::OutsideClick, &surface));
}

#[test]
fn test_placement_uses_fresh_viewport() {
    let small = TestSurface::new(40, 6);
    let mut widget = loaded(register_payload(), &small);
    widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "severity".into(),
            anchor: Rect::new(30, 4, 1, 1),
        },
        &small,
    );
    assert!(open_dropdown(&widget).placement.flipped);

    let tall = TestSurface::new(40, 40);
    widget.handle(
        WidgetEvent::FilterIconActivated {
            column: "severity".into(),
            anchor: Rect::new(30, 4, 1, 1),
        },
        &tall,
    );
    assert!(!open_dropdown(&widget).placement.flipped);
}
