use egui::{pos2, vec2, Color32, Pos2, Vec2};
use streamchart::renderer::{backing_size_for, bucket_x, build_geometry, value_range};
use streamchart::{
    Bucket, Canvas2d, ChartStyle, FrameOutcome, FrameRenderer, PixmapCanvas, Sample,
    SampleBuffer, Viewport, ViewportController,
};

/// Canvas that records calls instead of rasterizing.
#[derive(Default)]
struct RecordingCanvas {
    display: Vec2,
    dpr: f32,
    backing: Option<[u32; 2]>,
    scale: f32,
    resizes: usize,
    clears: usize,
    fills: Vec<Vec<Pos2>>,
    strokes: Vec<(Vec<Pos2>, f32)>,
}

impl RecordingCanvas {
    fn new(display: Vec2, dpr: f32) -> Self {
        Self {
            display,
            dpr,
            ..Self::default()
        }
    }
}

impl Canvas2d for RecordingCanvas {
    fn display_size(&self) -> Vec2 {
        self.display
    }
    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }
    fn backing_size(&self) -> Option<[u32; 2]> {
        self.backing
    }
    fn backing_scale(&self) -> f32 {
        self.scale
    }
    fn resize_backing(&mut self, width: u32, height: u32, scale: f32) -> bool {
        self.resizes += 1;
        self.backing = Some([width, height]);
        self.scale = scale;
        true
    }
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn fill_path(&mut self, points: &[Pos2], _color: Color32) {
        self.fills.push(points.to_vec());
    }
    fn stroke_polyline(&mut self, points: &[Pos2], _color: Color32, width: f32) {
        self.strokes.push((points.to_vec(), width));
    }
}

fn wave_buffer(count: usize) -> SampleBuffer {
    let samples = (0..count).map(|i| Sample::new(i as i64 * 50, (i as f64 / 40.0).sin()));
    SampleBuffer::with_initial(count, samples)
}

fn latest_viewport(buffer: &SampleBuffer) -> Viewport {
    let mut c = ViewportController::new();
    c.sync_to_data(buffer.bounds());
    *c.viewport()
}

#[test]
fn backing_store_tracks_display_times_ratio() {
    let buffer = wave_buffer(1_000);
    let vp = latest_viewport(&buffer);
    let mut canvas = RecordingCanvas::new(vec2(400.0, 200.0), 2.0);
    let mut renderer = FrameRenderer::default();

    renderer.render_frame(&mut canvas, &buffer, &vp);
    assert_eq!(canvas.backing, Some([800, 400]));
    renderer.render_frame(&mut canvas, &buffer, &vp);
    assert_eq!(canvas.resizes, 1, "unchanged size must not reallocate");

    canvas.display = vec2(500.0, 200.0);
    renderer.render_frame(&mut canvas, &buffer, &vp);
    assert_eq!(canvas.backing, Some([1000, 400]));
    assert_eq!(canvas.resizes, 2);
}

#[test]
fn pixel_ratio_change_with_same_backing_size_rescales() {
    let buffer = wave_buffer(1_000);
    let vp = latest_viewport(&buffer);
    let mut canvas = RecordingCanvas::new(vec2(100.0, 100.0), 2.0);
    let mut renderer = FrameRenderer::default();

    renderer.render_frame(&mut canvas, &buffer, &vp);
    canvas.display = vec2(200.0, 200.0);
    canvas.dpr = 1.0;
    renderer.render_frame(&mut canvas, &buffer, &vp);

    assert_eq!(canvas.backing, Some([200, 200]));
    assert_eq!(canvas.resizes, 2);
    assert_eq!(canvas.scale, 1.0);
}

#[test]
fn pixmap_after_ratio_change_matches_fresh_canvas() {
    let buffer = wave_buffer(1_000);
    let vp = latest_viewport(&buffer);
    let mut renderer = FrameRenderer::default();

    let mut reused = PixmapCanvas::new();
    reused.set_display(vec2(100.0, 100.0), 2.0);
    renderer.render_frame(&mut reused, &buffer, &vp);
    reused.set_display(vec2(200.0, 200.0), 1.0);
    renderer.render_frame(&mut reused, &buffer, &vp);

    let mut fresh = PixmapCanvas::new();
    fresh.set_display(vec2(200.0, 200.0), 1.0);
    renderer.render_frame(&mut fresh, &buffer, &vp);

    let reused = reused.pixmap().unwrap();
    let fresh = fresh.pixmap().unwrap();
    assert_eq!((reused.width(), reused.height()), (200, 200));
    assert!(reused.data() == fresh.data(), "stale 2x transform after ratio change");
}

#[test]
fn backing_size_rounds_fractional_pixels() {
    assert_eq!(backing_size_for(vec2(333.3, 10.0), 1.5), [500, 15]);
    assert_eq!(backing_size_for(vec2(0.0, 10.0), 2.0), [0, 20]);
}

#[test]
fn zero_sized_surface_is_skipped() {
    let buffer = wave_buffer(100);
    let mut canvas = RecordingCanvas::new(vec2(0.0, 300.0), 1.0);
    let mut renderer = FrameRenderer::default();
    let outcome = renderer.render_frame(&mut canvas, &buffer, &latest_viewport(&buffer));
    assert_eq!(outcome, FrameOutcome::NoSurface);
    assert_eq!(canvas.clears, 0);
    assert_eq!(renderer.frames_skipped(), 1);
}

#[test]
fn empty_buffer_clears_and_draws_nothing() {
    let buffer = SampleBuffer::new(10);
    let mut canvas = RecordingCanvas::new(vec2(800.0, 300.0), 1.0);
    let mut renderer = FrameRenderer::default();
    let outcome = renderer.render_frame(&mut canvas, &buffer, &Viewport::default());
    assert_eq!(outcome, FrameOutcome::Empty);
    assert_eq!(canvas.clears, 1);
    assert!(canvas.fills.is_empty() && canvas.strokes.is_empty());
}

#[test]
fn flat_values_are_a_degenerate_range() {
    let samples = (0..50).map(|i| Sample::new(i * 10, 3.0));
    let buffer = SampleBuffer::with_initial(100, samples);
    let mut canvas = RecordingCanvas::new(vec2(800.0, 300.0), 1.0);
    let mut renderer = FrameRenderer::default();
    let outcome = renderer.render_frame(&mut canvas, &buffer, &latest_viewport(&buffer));
    assert_eq!(outcome, FrameOutcome::DegenerateRange);
    assert_eq!(canvas.clears, 1);
    assert!(canvas.fills.is_empty());
    assert_eq!(renderer.last_outcome(), Some(FrameOutcome::DegenerateRange));
}

#[test]
fn drawn_frame_has_area_and_midline() {
    let buffer = wave_buffer(2_000);
    let style = ChartStyle {
        line_width: 2.5,
        ..ChartStyle::default()
    };
    let mut canvas = RecordingCanvas::new(vec2(800.0, 300.0), 1.0);
    let mut renderer = FrameRenderer::new(style);
    let outcome = renderer.render_frame(&mut canvas, &buffer, &latest_viewport(&buffer));

    let FrameOutcome::Drawn { buckets } = outcome else {
        panic!("expected a drawn frame, got {outcome:?}");
    };
    assert!(buckets > 0 && buckets <= 801);
    assert_eq!(renderer.frames_drawn(), 1);

    assert_eq!(canvas.fills.len(), 1);
    let area = &canvas.fills[0];
    assert_eq!(area.len(), buckets + 2);
    assert_eq!(area[buckets], pos2(800.0, 300.0));
    assert_eq!(area[buckets + 1], pos2(0.0, 300.0));

    assert_eq!(canvas.strokes.len(), 1);
    let (midline, width) = &canvas.strokes[0];
    assert_eq!(midline.len(), buckets);
    assert_eq!(*width, 2.5);
    for p in midline {
        assert!((0.0..=800.0).contains(&p.x));
        assert!((0.0..=300.0).contains(&p.y));
    }
    assert_eq!(midline[0].x, 0.0);
    assert!((midline[buckets - 1].x - 800.0).abs() < 1e-3);
}

#[test]
fn geometry_maps_values_to_surface() {
    let buckets = [
        Bucket {
            t: 0.0,
            min: 0.0,
            max: 10.0,
        },
        Bucket {
            t: 1.0,
            min: 5.0,
            max: 20.0,
        },
    ];
    let g = build_geometry(&buckets, vec2(100.0, 100.0)).unwrap();
    assert_eq!((g.v_min, g.v_max), (0.0, 20.0));
    assert_eq!(g.area[0], pos2(0.0, 50.0));
    assert_eq!(g.area[1], pos2(100.0, 0.0));
    assert_eq!(g.midline[0], pos2(0.0, 75.0));
    assert_eq!(g.midline[1], pos2(100.0, 37.5));
}

#[test]
fn non_finite_values_have_no_range() {
    let nan = Bucket {
        t: 0.0,
        min: f64::NAN,
        max: f64::NAN,
    };
    assert_eq!(value_range(&[nan]), None);
    let inf = Bucket {
        t: 0.0,
        min: 0.0,
        max: f64::INFINITY,
    };
    assert_eq!(value_range(&[inf]), None);
    assert_eq!(value_range(&[]), None);
}

#[test]
fn buckets_spread_evenly_by_index() {
    assert_eq!(bucket_x(0, 1, 100.0), 0.0);
    assert_eq!(bucket_x(0, 5, 100.0), 0.0);
    assert_eq!(bucket_x(2, 5, 100.0), 50.0);
    assert_eq!(bucket_x(4, 5, 100.0), 100.0);
}

#[test]
fn pixmap_canvas_rasterizes_at_device_resolution() {
    let buffer = wave_buffer(1_500);
    let mut canvas = PixmapCanvas::new();
    canvas.set_display(vec2(120.0, 60.0), 2.0);
    let mut renderer = FrameRenderer::default();
    let outcome = renderer.render_frame(&mut canvas, &buffer, &latest_viewport(&buffer));
    assert!(matches!(outcome, FrameOutcome::Drawn { .. }));

    let pixmap = canvas.pixmap().expect("backing store allocated");
    assert_eq!((pixmap.width(), pixmap.height()), (240, 120));
    assert!(pixmap.data().chunks_exact(4).any(|px| px[3] > 0));

    let image = canvas.to_color_image().unwrap();
    assert_eq!(image.size, [240, 120]);
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    let mut canvas = PixmapCanvas::new();
    canvas.set_display(vec2(10.0, 10.0), f32::NAN);
    assert_eq!(canvas.device_pixel_ratio(), 1.0);
    canvas.set_display(vec2(10.0, 10.0), 0.0);
    assert_eq!(canvas.device_pixel_ratio(), 1.0);
}
