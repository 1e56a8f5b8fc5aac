use std::collections::BTreeMap;

use crate::core::{ChartKind, MetricSeries};
use crate::error::ChartResult;
use crate::layout::{ChartAxes, ChartGeometry};
use crate::render::{CanvasLayerKind, TextHAlign, TextPrimitive, TextVAlign};

use super::canvas::{
    ScrolledCanvas, SeriesPoint, paint_point_series, paint_run_frame, paint_x_title, paint_y_title,
};
use super::{ChartPainter, ChartStyle};

/// Line chart of the gaps between consecutive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeChart;

impl ChartPainter for TimeChart {
    fn kind(&self) -> ChartKind {
        ChartKind::TimeBetweenRuns
    }

    fn empty_message(&self, _series: &MetricSeries) -> &'static str {
        "No recorded runs (plays) found in the selected tables."
    }

    fn paint(
        &self,
        canvas: &mut ScrolledCanvas<'_>,
        geometry: &ChartGeometry,
        series: &MetricSeries,
        style: &ChartStyle,
    ) -> ChartResult<()> {
        let (ChartAxes::Runs(axes), MetricSeries::TimeDeltas(tables)) = (&geometry.axes, series)
        else {
            return Ok(());
        };

        paint_run_frame(canvas, geometry, axes, style, 1);

        // One label per pair start; a skipped timestamp widens the pair.
        let mut pairs: BTreeMap<u32, u32> = BTreeMap::new();
        for point in tables.iter().flat_map(|table| table.points.iter()) {
            pairs
                .entry(point.from_run)
                .and_modify(|to_run| *to_run = (*to_run).min(point.to_run))
                .or_insert(point.to_run);
        }
        for (from_run, to_run) in pairs {
            let x = axes.x.to_pixel(f64::from(from_run))?;
            canvas.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    format!("Runs {from_run}-{to_run}"),
                    x,
                    geometry.plot.bottom + 10.0,
                    style.tick_font_px,
                    style.text_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }

        for table in tables {
            let mut points = Vec::with_capacity(table.points.len());
            for point in &table.points {
                points.push(SeriesPoint {
                    x: axes.x.to_pixel(f64::from(point.from_run))?,
                    y: axes.y.to_pixel(point.time_diff)?,
                    label: format!("{:.1}", point.time_diff),
                });
            }
            paint_point_series(canvas, &points, style.series_color(table.color_index), style);
        }

        paint_x_title(
            canvas,
            geometry,
            style,
            "Run #",
            geometry.content_height - geometry.padding.bottom / 2.0,
        );
        paint_y_title(canvas, geometry, style, "Time Between Runs (s)");
        Ok(())
    }
}
