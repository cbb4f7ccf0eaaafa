//! Size-history chart: the recent window on a line, the all-time maximum
//! as a horizontal reference.

use crate::error::AppError;
use crate::service::InvocationOutcome;
use crate::storage::history::SizeSample;
use crate::utils::state::AppState;
use chrono::Utc;
use plotters::prelude::*;
use std::path::Path;

/// History rows for the configured entity inside the plot window
/// (inclusive on both bounds).
pub async fn query_size_history(state: &AppState) -> Result<Vec<SizeSample>, AppError> {
    let now = Utc::now().timestamp();
    state
        .history
        .query_window(&state.config.bucket, now - state.config.window_secs, now)
        .await
}

/// All-time maximum across the full history, deliberately wider than the
/// plotted window so drift stays visible on the chart.
pub async fn get_max_size(state: &AppState) -> Result<i64, AppError> {
    state.history.max_total_size(&state.config.bucket).await
}

fn chart_err(e: impl std::fmt::Display) -> AppError {
    AppError::Chart(e.to_string())
}

/// Render the chart to `path`: one marker per sample, timestamp strings on
/// the x axis, and a reference line at `max_size`. An empty window still
/// produces a valid chart.
pub fn render_chart(samples: &[SizeSample], max_size: i64, path: &Path) -> Result<(), AppError> {
    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let upper = samples
        .iter()
        .map(|s| s.total_size)
        .chain([max_size])
        .max()
        .unwrap_or(0)
        .max(1);
    let x_max = samples.len().saturating_sub(1).max(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Bucket Size Over Time", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(90)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max, 0..upper + upper / 5 + 1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(samples.len().max(2))
        .x_label_formatter(&|idx| {
            samples
                .get(*idx as usize)
                .map(|s| s.timestamp_string.clone())
                .unwrap_or_default()
        })
        .x_desc("Timestamp")
        .y_desc("Size (Bytes)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .enumerate()
                .map(|(i, s)| (i as i32, s.total_size)),
            &BLUE,
        ))
        .map_err(chart_err)?
        .label("Bucket Size")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 16, y)], BLUE));

    chart
        .draw_series(
            samples
                .iter()
                .enumerate()
                .map(|(i, s)| Circle::new((i as i32, s.total_size), 4, BLUE.filled())),
        )
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new([(0, max_size), (x_max, max_size)], &RED))
        .map_err(chart_err)?
        .label("Max Size")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 16, y)], RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Upload the rendered chart to the plot bucket, replacing any prior
/// artifact under the same key.
pub async fn upload_chart(state: &AppState) -> Result<(), AppError> {
    let bytes = tokio::fs::read(&state.config.chart_path).await?;
    state
        .object_store
        .put_object(&state.config.plot_bucket, &state.config.plot_key, &bytes)
        .await?;
    tracing::info!(
        bucket = %state.config.plot_bucket,
        key = %state.config.plot_key,
        "chart uploaded"
    );
    Ok(())
}

pub async fn run(state: &AppState) -> Result<InvocationOutcome, AppError> {
    let samples = query_size_history(state).await?;
    let max_size = get_max_size(state).await?;
    render_chart(&samples, max_size, Path::new(&state.config.chart_path))?;
    upload_chart(state).await?;
    Ok(InvocationOutcome::ok(format!(
        "chart rendered from {} samples and uploaded",
        samples.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: i64, size: i64) -> SizeSample {
        SizeSample {
            entity_name: "data".to_string(),
            timestamp: ts,
            timestamp_string: format!("2026-01-01 00:00:{ts:02}"),
            total_size: size,
            object_count: 1,
        }
    }

    #[test]
    fn renders_svg_with_caption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let samples = vec![sample(1, 10), sample(2, 50), sample(3, 30)];
        render_chart(&samples, 50, &path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("<svg"));
        assert!(body.contains("Bucket Size Over Time"));
    }

    #[test]
    fn renders_empty_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        render_chart(&[], 0, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
