//! SVG bar chart of the disease probability distribution.

use crate::models::prediction::{DiseaseClass, CLASS_COUNT};

const CHART_WIDTH: u32 = 560;
const CHART_HEIGHT: u32 = 320;
const BAR_WIDTH: u32 = 72;
const BAR_GAP: u32 = 32;
const BASELINE_Y: u32 = 260;
const MAX_BAR_HEIGHT: f64 = 220.0;
const LEFT_MARGIN: u32 = 36;

/// Render the 5-category distribution as a standalone SVG element.
///
/// One `<rect class="bar">` per category, scaled against the baseline, with
/// the probability printed above each bar.
#[must_use]
pub fn probability_chart(probabilities: &[f64; CLASS_COUNT]) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg class=\"probability-chart\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" \
         role=\"img\" aria-label=\"Probability of different diseases\">\n"
    ));
    svg.push_str(&format!(
        "  <line x1=\"{LEFT_MARGIN}\" y1=\"{BASELINE_Y}\" x2=\"{}\" y2=\"{BASELINE_Y}\" \
         class=\"axis\"/>\n",
        CHART_WIDTH - 8
    ));

    for (idx, (class, probability)) in DiseaseClass::ALL
        .iter()
        .zip(probabilities.iter())
        .enumerate()
    {
        let clamped = probability.clamp(0.0, 1.0);
        let bar_height = (clamped * MAX_BAR_HEIGHT).round() as u32;
        let x = LEFT_MARGIN + idx as u32 * (BAR_WIDTH + BAR_GAP);
        let y = BASELINE_Y - bar_height;
        let label_x = x + BAR_WIDTH / 2;

        svg.push_str(&format!(
            "  <rect class=\"bar\" x=\"{x}\" y=\"{y}\" width=\"{BAR_WIDTH}\" \
             height=\"{bar_height}\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text class=\"bar-value\" x=\"{label_x}\" y=\"{}\" text-anchor=\"middle\">{:.1}%</text>\n",
            y.saturating_sub(6),
            clamped * 100.0
        ));
        svg.push_str(&format!(
            "  <text class=\"bar-label\" x=\"{label_x}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
            BASELINE_Y + 20,
            class.label()
        ));
    }

    svg.push_str(&format!(
        "  <text class=\"axis-label\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">Disease Type</text>\n",
        CHART_WIDTH / 2,
        CHART_HEIGHT - 12
    ));
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_has_one_bar_per_category() {
        let svg = probability_chart(&[0.05, 0.1, 0.45, 0.25, 0.15]);
        assert_eq!(svg.matches("class=\"bar\"").count(), CLASS_COUNT);
        assert!(svg.contains("Hepatitis"));
        assert!(svg.contains("Cirrhosis"));
    }

    #[test]
    fn bar_heights_follow_probabilities() {
        let svg = probability_chart(&[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(svg.contains("height=\"220\""));
        assert!(svg.contains("height=\"0\""));
        assert!(svg.contains(">100.0%<"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let svg = probability_chart(&[1.5, -0.2, 0.0, 0.0, 0.0]);
        assert!(svg.contains("height=\"220\""));
        assert!(!svg.contains("height=\"-"));
        assert!(svg.contains(">0.0%<"));
    }
}
