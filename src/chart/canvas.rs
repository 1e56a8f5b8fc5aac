use crate::layout::{ChartGeometry, RunAxes};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, FontStyle, LinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, TextVAlign,
};

use super::ChartStyle;

/// Frame writer that converts content coordinates to viewport coordinates.
///
/// Every primitive pushed through it is moved up by the scroll offset, so the
/// whole chart scrolls as one piece.
pub struct ScrolledCanvas<'a> {
    frame: &'a mut RenderFrame,
    scroll_offset: f64,
}

impl<'a> ScrolledCanvas<'a> {
    pub fn new(frame: &'a mut RenderFrame, scroll_offset: f64) -> Self {
        Self {
            frame,
            scroll_offset,
        }
    }

    fn offset_for(&self, layer: CanvasLayerKind) -> f64 {
        if layer.scrolls_with_content() {
            self.scroll_offset
        } else {
            0.0
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn line(
        &mut self,
        layer: CanvasLayerKind,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    ) {
        let offset = self.offset_for(layer);
        self.frame.push_line(
            layer,
            LinePrimitive::new(x1, y1 - offset, x2, y2 - offset, width, color),
        );
    }

    pub fn rect(&mut self, layer: CanvasLayerKind, mut rect: RectPrimitive) {
        rect.y -= self.offset_for(layer);
        self.frame.push_rect(layer, rect);
    }

    pub fn circle(&mut self, layer: CanvasLayerKind, mut circle: CirclePrimitive) {
        circle.cy -= self.offset_for(layer);
        self.frame.push_circle(layer, circle);
    }

    /// Empty labels draw nothing.
    pub fn text(&mut self, layer: CanvasLayerKind, mut text: TextPrimitive) {
        if text.text.is_empty() {
            return;
        }
        text.y -= self.offset_for(layer);
        self.frame.push_text(layer, text);
    }
}

/// Horizontal grid rows, plot axes, and y tick labels of a run chart.
pub(crate) fn paint_run_frame(
    canvas: &mut ScrolledCanvas<'_>,
    geometry: &ChartGeometry,
    axes: &RunAxes,
    style: &ChartStyle,
    y_label_decimals: usize,
) {
    let plot = geometry.plot;
    let divisions = axes.grid_divisions.max(1);

    for i in 0..=divisions {
        let fraction = f64::from(i) / f64::from(divisions);
        let y = plot.top + plot.height() * fraction;
        canvas.line(
            CanvasLayerKind::Grid,
            plot.left,
            y,
            plot.right,
            y,
            style.grid_line_width,
            style.grid_color,
        );

        let value = axes.y_max - axes.y_max * fraction;
        canvas.text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format!("{value:.y_label_decimals$}"),
                plot.left - 10.0,
                y,
                style.tick_font_px,
                style.text_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }

    for run in 0..=axes.max_run {
        if let Ok(x) = axes.x.to_pixel(f64::from(run) + 1.0) {
            canvas.line(
                CanvasLayerKind::Grid,
                x,
                plot.top,
                x,
                plot.bottom,
                style.grid_line_width,
                style.grid_color,
            );
        }
    }

    paint_plot_axes(canvas, geometry, style);
}

pub(crate) fn paint_plot_axes(
    canvas: &mut ScrolledCanvas<'_>,
    geometry: &ChartGeometry,
    style: &ChartStyle,
) {
    let plot = geometry.plot;
    canvas.line(
        CanvasLayerKind::Axis,
        plot.left,
        plot.bottom,
        plot.right,
        plot.bottom,
        style.axis_line_width,
        style.axis_color,
    );
    canvas.line(
        CanvasLayerKind::Axis,
        plot.left,
        plot.top,
        plot.left,
        plot.bottom,
        style.axis_line_width,
        style.axis_color,
    );
}

/// One projected point of a line series, in content coordinates.
pub(crate) struct SeriesPoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) label: String,
}

/// Polyline plus ringed markers and value labels for one table.
pub(crate) fn paint_point_series(
    canvas: &mut ScrolledCanvas<'_>,
    points: &[SeriesPoint],
    color: Color,
    style: &ChartStyle,
) {
    for pair in points.windows(2) {
        canvas.line(
            CanvasLayerKind::Series,
            pair[0].x,
            pair[0].y,
            pair[1].x,
            pair[1].y,
            style.series_line_width,
            color,
        );
    }

    for point in points {
        canvas.circle(
            CanvasLayerKind::Series,
            CirclePrimitive::ring(
                point.x,
                point.y,
                style.marker_outer_radius,
                style.background_color,
                style.series_line_width,
                color,
            ),
        );
        canvas.circle(
            CanvasLayerKind::Series,
            CirclePrimitive::filled(point.x, point.y, style.marker_inner_radius, color),
        );
        canvas.text(
            CanvasLayerKind::Labels,
            TextPrimitive::new(
                point.label.clone(),
                point.x,
                point.y - style.value_label_offset,
                style.value_font_px,
                style.text_color,
                TextHAlign::Center,
            ),
        );
    }
}

/// Bold horizontal axis title centered under the plot.
pub(crate) fn paint_x_title(
    canvas: &mut ScrolledCanvas<'_>,
    geometry: &ChartGeometry,
    style: &ChartStyle,
    title: &str,
    y: f64,
) {
    canvas.text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            title,
            geometry.width / 2.0,
            y,
            style.title_font_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_font_style(FontStyle::Bold),
    );
}

/// Rotated vertical axis title along the left padding.
pub(crate) fn paint_y_title(
    canvas: &mut ScrolledCanvas<'_>,
    geometry: &ChartGeometry,
    style: &ChartStyle,
    title: &str,
) {
    canvas.text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            title,
            geometry.padding.left / 4.0,
            geometry.content_height / 2.0,
            style.title_font_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Middle)
        .with_font_style(FontStyle::Bold)
        .rotated(-std::f64::consts::FRAC_PI_2),
    );
}
