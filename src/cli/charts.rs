use crate::analyzers::{GroupMean, MonthlyMean, WeatherEffect};
use std::collections::BTreeMap;
use textplots::{Chart, Plot, Shape};

#[derive(Clone, Copy)]
enum Style {
    Lines,
    Bars,
}

/// ASCII renderings of the dashboard's grouped series.
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn hourly(&self, hourly: &[GroupMean<u32>]) -> String {
        let points: Vec<(f32, f32)> = hourly
            .iter()
            .map(|g| (g.key as f32, g.mean as f32))
            .collect();
        self.render("Mean Rentals by Hour", 0.0, 23.0, &[points], Style::Lines)
    }

    /// One line per year, x = month.
    pub fn monthly(&self, monthly: &[MonthlyMean]) -> String {
        let mut by_year: BTreeMap<i32, Vec<(f32, f32)>> = BTreeMap::new();
        for m in monthly {
            by_year
                .entry(m.year)
                .or_default()
                .push((m.month as f32, m.mean as f32));
        }

        let years: Vec<String> = by_year.keys().map(|y| y.to_string()).collect();
        let series: Vec<Vec<(f32, f32)>> = by_year.into_values().collect();
        let title = format!("Monthly Trend by Year ({})", years.join(", "));
        self.render(&title, 1.0, 12.0, &series, Style::Lines)
    }

    pub fn working_day(&self, groups: &[GroupMean<bool>]) -> String {
        let points: Vec<(f32, f32)> = groups
            .iter()
            .map(|g| (if g.key { 1.0 } else { 0.0 }, g.mean as f32))
            .collect();
        let mut out = self.render(
            "Working vs Non-working Mean Rentals (0 = non-working, 1 = working)",
            -0.5,
            1.5,
            &[points],
            Style::Bars,
        );
        for g in groups {
            let label = if g.key { "working" } else { "non-working" };
            out.push_str(&format!("  {:<12} {:>8.1}\n", label, g.mean));
        }
        out
    }

    pub fn weather(&self, effects: &[WeatherEffect]) -> String {
        let points: Vec<(f32, f32)> = effects
            .iter()
            .map(|e| (e.weather_code as f32, e.mean as f32))
            .collect();
        let (lo, hi) = match (effects.first(), effects.last()) {
            (Some(first), Some(last)) => (first.weather_code as f32, last.weather_code as f32),
            _ => (0.0, 1.0),
        };

        let mut out = self.render("Weather Effect (95% CI)", lo - 0.5, hi + 0.5, &[points], Style::Bars);
        for e in effects {
            out.push_str(&format!(
                "  weather {}  {:>8.1} ± {:.1}  (n={})\n",
                e.weather_code, e.mean, e.ci, e.n
            ));
        }
        out
    }

    fn render(
        &self,
        title: &str,
        xmin: f32,
        xmax: f32,
        series: &[Vec<(f32, f32)>],
        style: Style,
    ) -> String {
        if series.iter().all(|points| points.is_empty()) {
            return format!("{}\nNo data for the current filters\n", title);
        }

        let shapes: Vec<Shape> = series
            .iter()
            .filter(|points| !points.is_empty())
            .map(|points| match style {
                Style::Lines => Shape::Lines(points),
                Style::Bars => Shape::Bars(points),
            })
            .collect();

        let mut chart = Chart::new(self.width, self.height, xmin, xmax);
        let mut canvas = &mut chart;
        for shape in &shapes {
            canvas = canvas.lineplot(shape);
        }
        canvas.axis();
        canvas.figures();

        format!("{}\n{}\n", title, canvas)
    }
}
