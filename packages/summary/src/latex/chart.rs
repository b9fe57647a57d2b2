//! Bar charts drawn with pgfplots.

use super::document::Element;
use super::text::escape;

/// A vertical bar chart with one labelled bar per value.
///
/// Bars sit at integer x positions so labels never have to be valid
/// pgfplots symbolic coordinates; the labels are attached as tick labels.
pub fn bar_chart(bars: &[(String, u64)], xlabel: &str, ylabel: &str) -> Element {
    let ticks = (1..=bars.len())
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let labels = bars
        .iter()
        .map(|(label, _)| format!("{{{}}}", escape(label)))
        .collect::<Vec<_>>()
        .join(",");
    let coordinates = bars
        .iter()
        .enumerate()
        .map(|(i, (_, value))| format!("({},{value})", i + 1))
        .collect::<Vec<_>>()
        .join(" ");

    let axis = Element::Environment {
        name: "axis".to_string(),
        options: vec![
            "ybar".to_string(),
            r"width=1\textwidth".to_string(),
            format!("xlabel={{{}}}", escape(xlabel)),
            format!("ylabel={{{}}}", escape(ylabel)),
            format!("xtick={{{ticks}}}"),
            format!("xticklabels={{{labels}}}"),
            "x tick label style={rotate=45,anchor=east}".to_string(),
            "ymin=0".to_string(),
        ],
        arguments: Vec::new(),
        content: vec![Element::raw(format!(r"\addplot coordinates {{{coordinates}}};"))],
    };

    Element::Environment {
        name: "tikzpicture".to_string(),
        options: Vec::new(),
        arguments: Vec::new(),
        content: vec![axis],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_markup() {
        let bars = vec![("Rust".to_string(), 900), ("C#".to_string(), 40)];
        let Element::Environment { name, content, .. } = bar_chart(&bars, "Language", "Code in bytes")
        else {
            panic!("expected environment");
        };
        assert_eq!(name, "tikzpicture");

        let Some(Element::Environment { options, content, .. }) = content.first() else {
            panic!("expected axis");
        };
        assert!(options.contains(&"xtick={1,2}".to_string()));
        assert!(options.contains(&r"xticklabels={{Rust},{C\#}}".to_string()));
        assert!(options.contains(&"ylabel={Code in bytes}".to_string()));
        assert_eq!(
            content,
            &vec![Element::raw(r"\addplot coordinates {(1,900) (2,40)};")]
        );
    }
}
