use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::GenreColors;
use crate::data::analysis::{self, TOP_N};
use crate::data::model::{format_rating, Dataset};
use crate::error::ExportError;
use crate::theme::ThemePalette;

/// Pixel size of exported charts.
pub const CHART_SIZE: (u32, u32) = (2000, 1200);

/// At most this many genres are drawn in the genre chart.
pub const GENRE_CHART_LIMIT: usize = 15;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the filtered rows with the dataset's original header.
pub fn write_csv<W: Write>(dataset: &Dataset, view: &[usize], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&dataset.headers)?;
    for &i in view {
        wtr.write_record(dataset.row_fields(&dataset.movies[i]))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the top-rated movies of the view as title/year/rating/genre rows.
pub fn write_top_csv<W: Write>(dataset: &Dataset, view: &[usize], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        dataset.title_header(),
        dataset.year_header(),
        dataset.rating_header(),
        dataset.genre_header(),
    ])?;
    for i in analysis::top_rated(dataset, view, TOP_N) {
        let movie = &dataset.movies[i];
        wtr.write_record([
            movie.title.clone(),
            movie.year.to_string(),
            format_rating(movie.rating),
            movie.genre_text(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn export_csv(dataset: &Dataset, view: &[usize], path: &Path) -> Result<(), ExportError> {
    let file = create_file(path)?;
    write_csv(dataset, view, file).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

pub fn export_top_csv(dataset: &Dataset, view: &[usize], path: &Path) -> Result<(), ExportError> {
    let file = create_file(path)?;
    write_top_csv(dataset, view, file).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported top {TOP_N} to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Chart export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    YearTrend,
    GenreAverage,
    TopRated,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::YearTrend,
        ChartKind::GenreAverage,
        ChartKind::TopRated,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::YearTrend => "Average Ratings Over Time",
            ChartKind::GenreAverage => "Average Rating by Genre",
            ChartKind::TopRated => "Top 10 Movies by Rating",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::YearTrend => "year_trends",
            ChartKind::GenreAverage => "genre_analysis",
            ChartKind::TopRated => "top_10_movies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    #[default]
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartFormat::Png => "PNG image",
            ChartFormat::Svg => "SVG document",
        }
    }
}

/// Everything a chart renderer needs, borrowed from the app state.
pub struct ChartInput<'a> {
    pub dataset: &'a Dataset,
    pub view: &'a [usize],
    pub palette: ThemePalette,
    pub genre_colors: &'a GenreColors,
}

/// Render one chart to `path` as PNG or SVG.
pub fn export_chart(
    kind: ChartKind,
    input: &ChartInput<'_>,
    format: ChartFormat,
    path: &Path,
) -> Result<(), ExportError> {
    render(Figure::Chart(kind), input, format, path)?;
    log::info!("Exported {:?} chart to {}", kind, path.display());
    Ok(())
}

/// Render all three charts into `dir`, returning the written paths.
///
/// All or nothing: when one chart fails, the files already written by this
/// call are removed again before the error is returned.
pub fn export_all_charts(
    input: &ChartInput<'_>,
    format: ChartFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = dir.join(format!("{}.{}", kind.file_stem(), format.extension()));
        if let Err(e) = export_chart(kind, input, format, &path) {
            log::warn!(
                "{:?} chart failed, removing {} charts already written",
                kind,
                written.len()
            );
            for done in &written {
                remove_partial(done);
            }
            return Err(e);
        }
        written.push(path);
    }
    Ok(written)
}

/// Write the summary report: the dataset overview followed by all three
/// charts, on one tall canvas.
pub fn export_summary_report(
    input: &ChartInput<'_>,
    format: ChartFormat,
    path: &Path,
) -> Result<(), ExportError> {
    render(Figure::Report, input, format, path)?;
    log::info!("Exported summary report to {}", path.display());
    Ok(())
}

/// Canvas of the summary report: overview text above three stacked charts.
pub const REPORT_SIZE: (u32, u32) = (2000, 3200);
const REPORT_HEADER_HEIGHT: u32 = 560;
const REPORT_TITLE: &str = "CineMatic Analyzer - Dataset Summary Report";
pub const REPORT_FILE_STEM: &str = "summary_report";

#[derive(Debug, Clone, Copy)]
enum Figure {
    Chart(ChartKind),
    Report,
}

impl Figure {
    fn size(self) -> (u32, u32) {
        match self {
            Figure::Chart(_) => CHART_SIZE,
            Figure::Report => REPORT_SIZE,
        }
    }
}

fn render(
    figure: Figure,
    input: &ChartInput<'_>,
    format: ChartFormat,
    path: &Path,
) -> Result<(), ExportError> {
    if input.view.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    // Surface unwritable destinations as I/O errors before plotting.
    drop(create_file(path)?);

    // Backends flush on drop, so each root is gone before the result is checked.
    let result = match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
            draw_figure(&root, figure, input).map_err(|e| e.to_string())
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, figure.size()).into_drawing_area();
            draw_figure(&root, figure, input).map_err(|e| e.to_string())
        }
    };
    result.map_err(|message| {
        remove_partial(path);
        ExportError::Render(message)
    })
}

fn remove_partial(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Could not remove {}: {e}", path.display());
    }
}

// -- plotters drawing --

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn rgb(c: Color32) -> RGBColor {
    RGBColor(c.r(), c.g(), c.b())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: Figure,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    root.fill(&rgb(input.palette.bg))?;
    match figure {
        Figure::Chart(kind) => draw_chart(root, kind, input)?,
        Figure::Report => draw_report(root, input)?,
    }
    root.present()?;
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    kind: ChartKind,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    match kind {
        ChartKind::YearTrend => draw_year_trend(area, input),
        ChartKind::GenreAverage => draw_genre_average(area, input),
        ChartKind::TopRated => draw_top_rated(area, input),
    }
}

fn draw_report<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    let text = rgb(input.palette.text);
    let muted = rgb(input.palette.muted);
    let (header, body) = root.split_vertically(REPORT_HEADER_HEIGHT);

    header.draw(&Text::new(
        REPORT_TITLE,
        (80, 60),
        ("sans-serif", 60).into_font().color(&text),
    ))?;
    header.draw(&Text::new(
        "Dataset Overview",
        (80, 170),
        ("sans-serif", 40).into_font().color(&muted),
    ))?;

    let summary = analysis::summary(input.dataset, input.view);
    for (row, (label, value)) in summary.fields().iter().enumerate() {
        let y = 240 + 65 * row as i32;
        header.draw(&Text::new(
            format!("{label}:"),
            (120, y),
            ("sans-serif", 36).into_font().color(&muted),
        ))?;
        header.draw(&Text::new(
            value.clone(),
            (520, y),
            ("sans-serif", 36).into_font().color(&text),
        ))?;
    }

    let (width, _) = REPORT_SIZE;
    header.draw(&PathElement::new(
        vec![
            (80, REPORT_HEADER_HEIGHT as i32 - 20),
            (width as i32 - 80, REPORT_HEADER_HEIGHT as i32 - 20),
        ],
        rgb(input.palette.border).stroke_width(2),
    ))?;

    for (area, kind) in body.split_evenly((ChartKind::ALL.len(), 1)).iter().zip(ChartKind::ALL) {
        draw_chart(area, kind, input)?;
    }
    Ok(())
}

/// Padded y range around `values`, clamped to the rating scale.
fn rating_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        return 0.0..10.0;
    }
    let pad = ((hi - lo) * 0.1).max(0.25);
    (lo - pad).max(0.0)..(hi + pad).min(10.0)
}

fn draw_year_trend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    let trend = analysis::year_trend(input.dataset, input.view);
    let text = rgb(input.palette.text);
    let accent = rgb(input.palette.accent);

    let first = trend.first().map_or(0, |p| p.year);
    let last = trend.last().map_or(0, |p| p.year);
    let y_range = rating_range(trend.iter().map(|p| p.mean_rating));

    let mut chart = ChartBuilder::on(root)
        .caption(
            ChartKind::YearTrend.title(),
            ("sans-serif", 48).into_font().color(&text),
        )
        .margin(40)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(first..last + 1, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Average Rating")
        .axis_desc_style(("sans-serif", 28).into_font().color(&text))
        .label_style(("sans-serif", 22).into_font().color(&text))
        .axis_style(text)
        .light_line_style(rgb(input.palette.border))
        .bold_line_style(rgb(input.palette.border))
        .draw()?;

    let points: Vec<(i32, f64)> = trend.iter().map(|p| (p.year, p.mean_rating)).collect();
    chart.draw_series(LineSeries::new(points.iter().copied(), accent.stroke_width(3)))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 6, accent.filled())),
    )?;
    Ok(())
}

fn draw_genre_average<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    let mut genres = analysis::genre_averages(input.dataset, input.view);
    genres.truncate(GENRE_CHART_LIMIT);
    let text = rgb(input.palette.text);
    let n = genres.len() as u32;
    let names: Vec<String> = genres.iter().map(|g| g.genre.clone()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(
            ChartKind::GenreAverage.title(),
            ("sans-serif", 48).into_font().color(&text),
        )
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(100)
        .build_cartesian_2d((0u32..n).into_segmented(), 0.0..10.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Genre")
        .y_desc("Average Rating")
        .axis_desc_style(("sans-serif", 28).into_font().color(&text))
        .label_style(("sans-serif", 20).into_font().color(&text))
        .axis_style(text)
        .bold_line_style(rgb(input.palette.border))
        .light_line_style(rgb(input.palette.border))
        .draw()?;

    chart.draw_series(genres.iter().enumerate().map(|(i, g)| {
        let i = i as u32;
        let color = rgb(input.genre_colors.color_for(&g.genre));
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), g.mean_rating),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    chart.draw_series(genres.iter().enumerate().map(|(i, g)| {
        Text::new(
            format!("{:.2}", g.mean_rating),
            (SegmentValue::CenterOf(i as u32), g.mean_rating + 0.15),
            ("sans-serif", 20).into_font().color(&text),
        )
    }))?;
    Ok(())
}

/// Shorten long titles for axis labels.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

fn draw_top_rated<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    input: &ChartInput<'_>,
) -> DrawResult<DB> {
    let top = analysis::top_rated(input.dataset, input.view, TOP_N);
    let text = rgb(input.palette.text);
    let accent = rgb(input.palette.accent);
    let n = top.len() as u32;

    // Segment 0 sits at the bottom, so the best movie goes into the last one.
    let slot = |rank: usize| n - 1 - rank as u32;
    let labels: Vec<String> = top
        .iter()
        .rev()
        .map(|&i| truncate_title(&input.dataset.movies[i].title, 30))
        .collect();

    let mut chart = ChartBuilder::on(root)
        .caption(
            ChartKind::TopRated.title(),
            ("sans-serif", 48).into_font().color(&text),
        )
        .margin(40)
        .x_label_area_size(80)
        .y_label_area_size(420)
        .build_cartesian_2d(0.0..10.0, (0u32..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Rating")
        .axis_desc_style(("sans-serif", 28).into_font().color(&text))
        .label_style(("sans-serif", 22).into_font().color(&text))
        .axis_style(text)
        .bold_line_style(rgb(input.palette.border))
        .light_line_style(rgb(input.palette.border))
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(rank, &i)| {
        let rating = input.dataset.movies[i].rating;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot(rank))),
                (rating, SegmentValue::Exact(slot(rank) + 1)),
            ],
            accent.filled(),
        );
        bar.set_margin(6, 6, 0, 0);
        bar
    }))?;

    chart.draw_series(top.iter().enumerate().map(|(rank, &i)| {
        let rating = input.dataset.movies[i].rating;
        Text::new(
            format!("{rating:.1}"),
            ((rating + 0.1).min(9.6), SegmentValue::CenterOf(slot(rank))),
            ("sans-serif", 20).into_font().color(&text),
        )
    }))?;
    Ok(())
}
