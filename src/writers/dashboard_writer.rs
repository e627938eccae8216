use crate::error::Result;
use crate::models::{
    Dashboard, Description, Histogram, MonthSummary, MonthlyCondition, SeasonSummary,
    TopMonthDetail, TopMonthStats, TopSeasonDetail, UsageTotals,
};
use crate::utils::constants::{BAR_CHART_WIDTH, HIGHLIGHT_BAR, PLAIN_BAR};
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn bar(value: f64, peak: f64, width: usize, fill: char) -> String {
    if peak <= 0.0 {
        return String::new();
    }
    let len = ((value / peak) * width as f64).round() as usize;
    std::iter::repeat(fill).take(len.min(width)).collect()
}

/// Renders a [`Dashboard`] as plain-text tables and charts, or as JSON.
pub struct DashboardWriter {
    chart_width: usize,
}

impl DashboardWriter {
    pub fn new() -> Self {
        Self {
            chart_width: BAR_CHART_WIDTH,
        }
    }

    pub fn with_chart_width(mut self, chart_width: usize) -> Self {
        self.chart_width = chart_width.max(1);
        self
    }

    pub fn render_text(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();

        // Header and dataset totals
        let _ = writeln!(out, "Bike Sharing Dashboard");
        let _ = writeln!(out, "======================");
        let _ = writeln!(out);
        out.push_str(&self.render_totals(&dashboard.totals));

        // Seasons
        let _ = writeln!(out);
        let _ = writeln!(out, "Daily Usage by Season");
        let _ = writeln!(out, "---------------------");
        out.push_str(&self.render_season_table(&dashboard.season_summary));
        let _ = writeln!(out);
        out.push_str(&self.render_top_season(&dashboard.top_season));
        let _ = writeln!(out);
        out.push_str(&self.render_season_chart(&dashboard.season_summary));

        // Months
        let _ = writeln!(out);
        let _ = writeln!(out, "Daily Usage by Month");
        let _ = writeln!(out, "--------------------");
        out.push_str(&self.render_month_table(&dashboard.month_summary));
        let _ = writeln!(out);
        out.push_str(&self.render_top_month(&dashboard.top_month, &dashboard.top_month_stats));

        // Conditions during the busiest month
        let _ = writeln!(out);
        let _ = writeln!(out, "Conditions in {}", dashboard.top_month.month);
        let _ = writeln!(out, "-------------------------");
        out.push_str(&self.render_description(&dashboard.top_month_description));
        for histogram in &dashboard.top_month_histograms {
            let _ = writeln!(out);
            out.push_str(&self.render_histogram(histogram));
        }

        // Year overview in calendar order
        let _ = writeln!(out);
        let _ = writeln!(out, "Conditions January - December");
        let _ = writeln!(out, "-----------------------------");
        out.push_str(&self.render_monthly_conditions(&dashboard.monthly_conditions));

        out
    }

    pub fn render_totals(&self, totals: &UsageTotals) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Days:                {}", totals.days);
        let _ = writeln!(out, "Total Riders:        {}", totals.cnt);
        let _ = writeln!(out, "Casual Riders:       {}", totals.casual);
        let _ = writeln!(out, "Registered Riders:   {}", totals.registered);
        out
    }

    pub fn render_season_table(&self, summary: &SeasonSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>11}",
            "season", "cnt", "casual", "registered"
        );
        for row in &summary.rows {
            let _ = writeln!(
                out,
                "{:<10} {:>10} {:>10} {:>11}",
                row.season.to_string(),
                row.cnt,
                row.casual,
                row.registered
            );
        }
        out
    }

    pub fn render_top_season(&self, top: &TopSeasonDetail) -> String {
        format!(
            "Busiest season:      {}\n\
            Riders:              {}\n\
            Casual riders:       {}\n\
            Registered riders:   {}\n",
            top.season, top.cnt, top.casual, top.registered
        )
    }

    /// Horizontal bar chart of `cnt` per season with the busiest bar highlighted.
    pub fn render_season_chart(&self, summary: &SeasonSummary) -> String {
        let mut out = String::new();
        let peak = summary.rows.iter().map(|r| r.cnt).max().unwrap_or(0) as f64;

        for (i, row) in summary.rows.iter().enumerate() {
            let fill = if i == 0 { HIGHLIGHT_BAR } else { PLAIN_BAR };
            let _ = writeln!(
                out,
                "{:<10} |{:<width$}| {}",
                row.season.to_string(),
                bar(row.cnt as f64, peak, self.chart_width, fill),
                row.cnt,
                width = self.chart_width
            );
        }
        out
    }

    pub fn render_month_table(&self, summary: &MonthSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>9} {:>9} {:>11} {:>10} {:>6} {:>6} {:>9}",
            "month", "cnt", "casual", "registered", "weathersit", "temp", "hum", "windspeed"
        );
        for row in &summary.rows {
            let _ = writeln!(
                out,
                "{:<10} {:>9} {:>9} {:>11} {:>10.3} {:>6.3} {:>6.3} {:>9.3}",
                row.month.to_string(),
                row.cnt,
                row.casual,
                row.registered,
                row.weathersit,
                row.temp,
                row.hum,
                row.windspeed
            );
        }
        out
    }

    pub fn render_top_month(&self, top: &TopMonthDetail, stats: &TopMonthStats) -> String {
        format!(
            "Busiest month:       {}\n\
            Riders:              {}\n\
            Casual riders:       {}\n\
            Registered riders:   {}\n\
            Mean weathersit:     {:.2}\n\
            Mean temperature:    {:.1}°C\n\
            Mean humidity:       {:.3}\n\
            Mean windspeed:      {:.3}\n",
            top.month,
            top.cnt,
            top.casual,
            top.registered,
            stats.weathersit,
            stats.temp,
            stats.hum,
            stats.windspeed
        )
    }

    pub fn render_description(&self, description: &Description) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12} {:>9} {:>9} {:>9}",
            "column", "mean", "max", "min"
        );
        for stats in &description.columns {
            let _ = writeln!(
                out,
                "{:<12} {:>9.4} {:>9.4} {:>9.4}",
                stats.column.name(),
                stats.mean,
                stats.max,
                stats.min
            );
        }
        out
    }

    pub fn render_histogram(&self, histogram: &Histogram) -> String {
        let mut out = String::new();
        let peak = histogram.peak() as f64;

        let _ = writeln!(out, "{} ({} days)", histogram.column.title(), histogram.total());
        for bin in &histogram.bins {
            let _ = writeln!(
                out,
                "  [{:>7.3}, {:>7.3}] {:>4} {}",
                bin.lower,
                bin.upper,
                bin.count,
                bar(bin.count as f64, peak, self.chart_width, HIGHLIGHT_BAR)
            );
        }
        out
    }

    pub fn render_monthly_conditions(&self, conditions: &[MonthlyCondition]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>10} {:>6} {:>6} {:>9}",
            "month", "weathersit", "temp", "hum", "windspeed"
        );
        for condition in conditions {
            let _ = writeln!(
                out,
                "{:<10} {:>10.3} {:>6.3} {:>6.3} {:>9.3}",
                condition.month.to_string(),
                condition.weathersit,
                condition.temp,
                condition.hum,
                condition.windspeed
            );
        }
        out
    }

    pub fn to_json(&self, dashboard: &Dashboard) -> Result<String> {
        Ok(serde_json::to_string_pretty(dashboard)?)
    }

    pub fn write_text(&self, dashboard: &Dashboard, path: &Path) -> Result<()> {
        create_parent_dir(path)?;
        std::fs::write(path, self.render_text(dashboard))?;
        info!("Dashboard written to {}", path.display());

        Ok(())
    }

    pub fn write_json(&self, dashboard: &Dashboard, path: &Path) -> Result<()> {
        create_parent_dir(path)?;

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, dashboard)?;
        info!("Dashboard written to {}", path.display());

        Ok(())
    }
}

impl Default for DashboardWriter {
    fn default() -> Self {
        Self::new()
    }
}
