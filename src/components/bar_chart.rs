//! Bar Chart Component
//!
//! Horizontal bars scaled to the largest value, drawn with plain divs.

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    /// CSS color of the bar
    pub color: &'static str,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: usize, color: &'static str) -> Self {
        Self { label: label.into(), value, color }
    }
}

/// Width of a bar in percent of the widest one
pub(crate) fn bar_width(value: usize, max: usize) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (value as f64 / max as f64 * 100.0).round()
}

#[component]
pub fn BarChart(#[prop(into)] title: String, #[prop(into)] bars: Signal<Vec<Bar>>) -> impl IntoView {
    view! {
        <div class="chart">
            <h4>{title}</h4>
            {move || {
                let bars = bars.get();
                let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
                bars.into_iter().map(|bar| {
                    let style = format!("width: {}%; background: {}", bar_width(bar.value, max), bar.color);
                    view! {
                        <div class="chart-row">
                            <span class="chart-label">{bar.label}</span>
                            <div class="chart-track">
                                <div class="chart-bar" style=style></div>
                            </div>
                            <span class="chart-value">{bar.value}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(0, 0), 0.0);
        assert_eq!(bar_width(5, 10), 50.0);
        assert_eq!(bar_width(10, 10), 100.0);
        assert_eq!(bar_width(1, 3), 33.0);
    }
}
