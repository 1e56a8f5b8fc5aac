use crate::core::{ChartKind, MetricSeries};
use crate::error::ChartResult;
use crate::layout::{ChartAxes, ChartGeometry};
use crate::render::{CanvasLayerKind, TextHAlign, TextPrimitive, TextVAlign};

use super::canvas::{
    ScrolledCanvas, SeriesPoint, paint_point_series, paint_run_frame, paint_x_title, paint_y_title,
};
use super::{ChartPainter, ChartStyle};

/// Line chart of per-run similarity to the reference code.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreChart;

impl ChartPainter for ScoreChart {
    fn kind(&self) -> ChartKind {
        ChartKind::SimilarityToReference
    }

    fn empty_message(&self, series: &MetricSeries) -> &'static str {
        match series {
            MetricSeries::ReferenceUnavailable => {
                "Please submit an ideal code to see similarity scores."
            }
            _ => "No runs found in the selected tables.",
        }
    }

    fn paint(
        &self,
        canvas: &mut ScrolledCanvas<'_>,
        geometry: &ChartGeometry,
        series: &MetricSeries,
        style: &ChartStyle,
    ) -> ChartResult<()> {
        let (ChartAxes::Runs(axes), MetricSeries::Scores(tables)) = (&geometry.axes, series) else {
            return Ok(());
        };

        paint_run_frame(canvas, geometry, axes, style, 0);

        for run in 1..=axes.max_run {
            let x = axes.x.to_pixel(f64::from(run))?;
            canvas.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    format!("Run {run}"),
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
                    x: axes.x.to_pixel(f64::from(point.run_number))?,
                    y: axes.y.to_pixel(point.score)?,
                    label: format!("{:.0}", point.score),
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
        paint_y_title(canvas, geometry, style, "Score (%)");
        Ok(())
    }
}
