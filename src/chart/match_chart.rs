use crate::core::{ChartKind, MetricSeries};
use crate::error::ChartResult;
use crate::layout::{ChartAxes, ChartGeometry, MATCH_LABEL_FONT_PX};
use crate::render::{
    CanvasLayerKind, FontStyle, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

use super::canvas::{ScrolledCanvas, paint_plot_axes, paint_x_title};
use super::{ChartPainter, ChartStyle};

pub const NO_MATCH_LABEL: &str = "No successful runs...";

/// Horizontal bars marking each table's first exact reproduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchChart;

impl ChartPainter for MatchChart {
    fn kind(&self) -> ChartKind {
        ChartKind::FirstMatch
    }

    fn empty_message(&self, series: &MetricSeries) -> &'static str {
        match series {
            MetricSeries::ReferenceUnavailable => {
                "Please submit an ideal code to see matching runs."
            }
            _ => "No data found in the selected tables.",
        }
    }

    fn paint(
        &self,
        canvas: &mut ScrolledCanvas<'_>,
        geometry: &ChartGeometry,
        series: &MetricSeries,
        style: &ChartStyle,
    ) -> ChartResult<()> {
        let (ChartAxes::Match(axes), MetricSeries::Matches(results)) = (&geometry.axes, series)
        else {
            return Ok(());
        };
        let plot = geometry.plot;
        let divisions = axes.grid_divisions.max(1);

        for i in 0..=divisions {
            let fraction = f64::from(i) / f64::from(divisions);
            let x = plot.left + plot.width() * fraction;
            canvas.line(
                CanvasLayerKind::Grid,
                x,
                plot.top,
                x,
                plot.bottom,
                style.grid_line_width,
                style.grid_color,
            );
            let tick = (f64::from(axes.axis_max) * fraction).round();
            canvas.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    format!("{tick:.0}"),
                    x,
                    plot.bottom + 10.0,
                    style.tick_font_px,
                    style.text_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }

        for (index, result) in results.iter().enumerate() {
            let slot_top = axes.slot_top(plot, index);
            let center = slot_top + axes.bar_height / 2.0;
            canvas.line(
                CanvasLayerKind::Grid,
                plot.left,
                center,
                plot.right,
                center,
                style.grid_line_width,
                style.grid_color,
            );
            canvas.text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    result.table_title.clone(),
                    plot.left - 10.0,
                    center,
                    MATCH_LABEL_FONT_PX,
                    style.text_color,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Middle),
            );

            let (label, font_style) = match result.match_run {
                Some(run) => {
                    let bar_end = axes.x.to_pixel(f64::from(run))?;
                    canvas.rect(
                        CanvasLayerKind::Series,
                        RectPrimitive::new(
                            plot.left,
                            slot_top,
                            (bar_end - plot.left).max(0.0),
                            axes.bar_height,
                            style.series_color(result.color_index),
                        ),
                    );
                    (format!("Run {run}"), FontStyle::Bold)
                }
                None => (NO_MATCH_LABEL.to_owned(), FontStyle::Italic),
            };
            canvas.text(
                CanvasLayerKind::Labels,
                TextPrimitive::new(
                    label,
                    plot.left + 5.0,
                    center,
                    style.value_font_px,
                    style.text_color,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle)
                .with_font_style(font_style),
            );
        }

        paint_plot_axes(canvas, geometry, style);
        paint_x_title(
            canvas,
            geometry,
            style,
            "Successful Run #",
            geometry.content_height - geometry.padding.bottom / 4.0,
        );
        canvas.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                "Student",
                geometry.padding.left / 2.0,
                geometry.padding.top / 2.0,
                style.title_font_px,
                style.text_color,
                TextHAlign::Center,
            )
            .with_font_style(FontStyle::Bold),
        );
        Ok(())
    }
}
