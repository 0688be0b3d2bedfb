use crate::domain::model::{FigureSpec, PanelSpec, SeriesSpec};
use crate::domain::ports::ChartBackend;
use crate::utils::error::{ReportError, Result};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::collections::HashMap;
use std::path::Path;

const POINTS_PER_INCH: f64 = 72.0;

/// Raster backend drawing with `plotters` into a PNG file.
///
/// Series are buffered and the whole figure is drawn on `save`, because the
/// bitmap is bound to its output path when it is created.
#[derive(Debug, Default)]
pub struct PlottersBackend {
    figure: Option<FigureSpec>,
    series: Vec<Vec<SeriesSpec>>,
}

impl PlottersBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn chart_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::ChartError {
        message: e.to_string(),
    }
}

/// Converts inches and points to device pixels at the figure's DPI.
struct Scale {
    dpi: f64,
}

impl Scale {
    fn inches(&self, inches: f64) -> u32 {
        (inches * self.dpi).round().max(1.0) as u32
    }

    fn points(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    fn points_px(&self, points: f64) -> u32 {
        self.points(points).round().max(1.0) as u32
    }

    fn font(&self, points: f64, style: FontStyle) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.points(points), style)
    }
}

fn y_range(series: &[SeriesSpec]) -> (f64, f64) {
    let values = series.iter().flat_map(|s| s.points.iter().map(|&(_, y)| y));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min {
        (max - min) * 0.05
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    (min - pad, max + pad)
}

impl ChartBackend for PlottersBackend {
    fn create_figure(&mut self, figure: &FigureSpec) -> Result<()> {
        if figure.panels.is_empty() {
            return Err(chart_error("figure needs at least one panel"));
        }
        self.series = vec![Vec::new(); figure.panels.len()];
        self.figure = Some(figure.clone());
        Ok(())
    }

    fn plot_series(&mut self, panel: usize, series: &SeriesSpec) -> Result<()> {
        let panels = self.series.len();
        let slot = self
            .series
            .get_mut(panel)
            .ok_or_else(|| chart_error(format!("panel {} out of range ({} panels)", panel, panels)))?;
        slot.push(series.clone());
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let figure = self
            .figure
            .as_ref()
            .ok_or_else(|| chart_error("save called before create_figure"))?;
        let scale = Scale {
            dpi: f64::from(figure.dpi),
        };
        let size = (scale.inches(figure.width_in), scale.inches(figure.height_in));
        tracing::debug!(width = size.0, height = size.1, "Drawing bitmap");

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;
        let body = root
            .titled(&figure.title, scale.font(16.0, FontStyle::Bold))
            .map_err(chart_error)?;

        let areas = body.split_evenly((figure.panels.len(), 1));
        for ((area, panel), series) in areas.iter().zip(&figure.panels).zip(&self.series) {
            draw_panel(area, panel, series, &scale)?;
        }

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    panel: &PanelSpec,
    series: &[SeriesSpec],
    scale: &Scale,
) -> Result<()> {
    let (x_min, x_max) = panel.x_limits;
    let (y_min, y_max) = y_range(series);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, scale.font(12.0, FontStyle::Bold))
        .margin(scale.points_px(8.0))
        .x_label_area_size(scale.points_px(48.0))
        .y_label_area_size(scale.points_px(60.0))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_error)?;

    // Only the configured tick positions get a label.
    let tick_labels: HashMap<i32, &str> = panel
        .ticks
        .iter()
        .map(|tick| (tick.position, tick.label.as_str()))
        .collect();
    let format_tick = |year: &i32| tick_labels.get(year).map(|l| l.to_string()).unwrap_or_default();

    let mut tick_font = scale.font(10.0, FontStyle::Normal);
    // Only quarter turns are available for bitmap text.
    if panel.tick_rotation_deg != 0.0 {
        tick_font = tick_font.transform(FontTransform::Rotate90);
    }

    chart
        .configure_mesh()
        .x_labels((x_max - x_min + 1).max(1) as usize)
        .x_label_formatter(&format_tick)
        .x_label_style(tick_font)
        .y_label_style(scale.font(10.0, FontStyle::Normal))
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .axis_desc_style(scale.font(10.0, FontStyle::Normal))
        .bold_line_style(BLACK.mix(panel.grid_alpha))
        .light_line_style(WHITE.mix(0.0))
        .draw()
        .map_err(chart_error)?;

    for spec in series {
        let color = RGBColor(spec.color.0, spec.color.1, spec.color.2);
        let stroke = scale.points_px(f64::from(spec.line_width));
        let marker = scale.points_px(f64::from(spec.marker_size)) / 2;
        let legend_len = scale.points_px(20.0) as i32;

        chart
            .draw_series(LineSeries::new(spec.points.iter().copied(), color.stroke_width(stroke)))
            .map_err(chart_error)?
            .label(spec.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(stroke))
            });

        chart
            .draw_series(
                spec.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), marker.max(1), color.filled())),
            )
            .map_err(chart_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(scale.font(10.0, FontStyle::Normal))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_error)?;

    Ok(())
}
