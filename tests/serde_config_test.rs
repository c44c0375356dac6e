//! Serde Configuration Tests
//!
//! Option and style structs survive a JSON round trip, so plot settings can
//! live in config files.
//!
//! Run: cargo test --features serde --test serde_config_test

#![cfg(feature = "serde")]
#![allow(clippy::unwrap_used)]

use evalviz::chart::{AxesStyle, HeatmapStyle, ValueFormat};
use evalviz::eval::{ConfusionStyle, CurveOptions};
use evalviz::metrics::Normalization;
use evalviz::scale::ColorMap;

/// Claim: curve options keep their name, label and flags
#[test]
fn claim_curve_options_round_trip() {
    let options = CurveOptions::new().name("Model A").label("baseline").annotate(false).reference_line(true);

    let json = serde_json::to_string(&options).unwrap();
    let back: CurveOptions = serde_json::from_str(&json).unwrap();

    assert_eq!(back, options);
}

/// Claim: confusion styles keep normalization and heatmap settings
#[test]
fn claim_confusion_style_round_trip() {
    let style = ConfusionStyle::new()
        .normalization(Normalization::Column)
        .heatmap(HeatmapStyle::default().color_map(ColorMap::Greens).format(ValueFormat::Fixed(3)));

    let json = serde_json::to_string(&style).unwrap();
    let back: ConfusionStyle = serde_json::from_str(&json).unwrap();

    assert_eq!(back, style);
    assert_eq!(back.normalization, Normalization::Column);
}

/// Claim: axes style presets serialize field by field
#[test]
fn claim_axes_style_round_trip() {
    let style = AxesStyle::dark().grid(true);

    let value = serde_json::to_value(&style).unwrap();
    assert!(value.get("face").is_some());

    let back: AxesStyle = serde_json::from_value(value).unwrap();
    assert_eq!(back, style);
}
