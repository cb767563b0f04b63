use riskgrid::{classify, severity_label, CellValue, RiskTier};

#[test]
fn test_numeric_scale() {
    let expected = [
        (1, RiskTier::Low),
        (2, RiskTier::Low),
        (3, RiskTier::Medium),
        (4, RiskTier::High),
        (5, RiskTier::High),
    ];
    for (n, tier) in expected {
        assert_eq!(classify(&CellValue::from(n)), Some(tier), "number {n}");
        assert_eq!(
            classify(&CellValue::from(n.to_string())),
            Some(tier),
            "string {n}"
        );
    }
}

#[test]
fn test_numbers_outside_scale() {
    assert_eq!(classify(&CellValue::from(0)), Some(RiskTier::Low));
    assert_eq!(classify(&CellValue::from(-7)), Some(RiskTier::Low));
    assert_eq!(classify(&CellValue::from(2.5)), Some(RiskTier::High));
    assert_eq!(classify(&CellValue::from(99)), Some(RiskTier::High));
    assert_eq!(classify(&CellValue::from("3.0")), Some(RiskTier::Medium));
}

#[test]
fn test_keywords_ignore_case_and_padding() {
    for raw in ["High", "high", " High ", "HIGH", "\tHigh\n"] {
        assert_eq!(classify(&CellValue::from(raw)), Some(RiskTier::High), "{raw:?}");
    }
    assert_eq!(classify(&CellValue::from("medium")), Some(RiskTier::Medium));
    assert_eq!(classify(&CellValue::from(" LOW")), Some(RiskTier::Low));
}

#[test]
fn test_unclassifiable() {
    let value = CellValue::from("n/a");
    assert_eq!(classify(&value), None);
    assert_eq!(severity_label(&value), "n/a");

    let padded = CellValue::from("  critical ");
    assert_eq!(classify(&padded), None);
    assert_eq!(severity_label(&padded), "critical");

    assert_eq!(classify(&CellValue::Null), None);
    assert_eq!(classify(&CellValue::Bool(true)), None);
}

#[test]
fn test_labels_are_canonical() {
    assert_eq!(severity_label(&CellValue::from("hIgH")), "High");
    assert_eq!(severity_label(&CellValue::from(3)), "Medium");
    assert_eq!(severity_label(&CellValue::from("1")), "Low");
}

#[test]
fn test_style_classes() {
    assert_eq!(RiskTier::Low.style_class(), "td-risk-low");
    assert_eq!(RiskTier::Medium.style_class(), "td-risk-medium");
    assert_eq!(RiskTier::High.style_class(), "td-risk-high");
}
