mod common;

use common::{config, preloading, ready, FakeImage, Op, RecordingSurface};
use hero_sequence::{
    HeroSequence, LoadState, Phase, PreloadProgress, ScrollRegion, SequenceError,
};

#[test]
fn completing_preload_sizes_surface_and_draws_first_frame() {
    let mut seq = preloading(config(4), (1920.0, 1080.0));
    assert_eq!(seq.phase(), Phase::Preloading);

    for index in [3, 1, 2] {
        assert!(matches!(
            seq.frame_loaded(index, 2.0).unwrap(),
            PreloadProgress::Pending { .. }
        ));
        assert!(seq.surface().ops.is_empty());
    }
    assert_eq!(seq.frame_loaded(0, 2.0).unwrap(), PreloadProgress::Complete);
    assert_eq!(seq.phase(), Phase::Ready);

    let layout = *seq.layout().expect("layout applied");
    assert_eq!(layout.css_height, 800.0);
    assert!((layout.css_width - 1422.222).abs() < 1e-3);
    assert_eq!((layout.pixel_width, layout.pixel_height), (2844, 1600));
    assert_eq!(layout.scale, 2.0);

    let ops = &seq.surface().ops;
    assert_eq!(ops.first(), Some(&Op::Layout(layout)));
    assert!(ops.contains(&Op::Clear(2844.0, 1600.0)));
    let draws = seq.surface().draws();
    assert!(!draws.is_empty());
    assert!(draws.iter().all(|(frame, _)| *frame == 0));
    assert_eq!(seq.current_frame(), 0);
}

#[test]
fn completion_draws_the_first_frame_once() {
    let mut seq = preloading(config(3), (1600.0, 900.0));
    seq.frame_loaded(1, 1.0).unwrap();
    seq.frame_loaded(2, 1.0).unwrap();
    seq.frame_loaded(0, 1.0).unwrap();

    let ops = &seq.surface().ops;
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::Clear(..))).count(), 1);
    assert_eq!(seq.surface().draws().len(), 1);
    assert_eq!(seq.surface().last_draw().map(|(frame, _)| frame), Some(0));
}

#[test]
fn reattached_frame_must_load_again_before_completion() {
    let mut seq = preloading(config(2), (100.0, 100.0));
    seq.frame_loaded(0, 1.0).unwrap();
    seq.attach_frame(
        0,
        FakeImage {
            id: 0,
            size: Some((100.0, 100.0)),
        },
    )
    .unwrap();

    assert_eq!(
        seq.frame_loaded(0, 1.0).unwrap(),
        PreloadProgress::Pending {
            loaded: 1,
            total: 2
        }
    );
    assert_eq!(seq.phase(), Phase::Preloading);
    assert_eq!(seq.frame_loaded(1, 1.0).unwrap(), PreloadProgress::Complete);
    assert_eq!(seq.store().loaded_count(), 2);
}

#[test]
fn notifications_before_preload_are_rejected() {
    let mut seq = HeroSequence::new(config(2), RecordingSurface::default()).unwrap();
    assert_eq!(
        seq.frame_loaded(0, 1.0),
        Err(SequenceError::InvalidPhase {
            op: "record a frame load",
            phase: Phase::Uninitialized,
        })
    );
    assert!(matches!(
        seq.frame_failed(1),
        Err(SequenceError::InvalidPhase {
            phase: Phase::Uninitialized,
            ..
        })
    ));
    assert!(seq.frame_loaded(1, 1.0).is_err());
    assert_eq!(seq.phase(), Phase::Uninitialized);
    assert_eq!(seq.store().loaded_count(), 0);
    assert!(seq.surface().ops.is_empty());
}

#[test]
fn single_failed_frame_prevents_completion() {
    let mut seq = preloading(config(8), (640.0, 360.0));
    for index in 0..8 {
        if index == 5 {
            seq.frame_failed(index).unwrap();
        } else {
            seq.frame_loaded(index, 1.0).unwrap();
        }
    }
    assert_eq!(seq.phase(), Phase::Preloading);
    assert_eq!(seq.store().loaded_count(), 7);
    assert_eq!(seq.store().failed_count(), 1);
    assert_eq!(seq.store().state(5).unwrap(), LoadState::Failed);
    assert!(seq.layout().is_none());
    assert!(seq.surface().ops.is_empty());
}

#[test]
fn resize_redraws_the_active_frame() {
    let mut seq = ready(config(43), (1600.0, 900.0), 1.0);
    assert!(seq.render(17));
    assert_eq!(seq.current_frame(), 17);

    let before = seq.surface().ops.len();
    seq.resize(3.0);
    let after = &seq.surface().ops[before..];
    assert!(matches!(after.first(), Some(Op::Layout(l)) if l.scale == 3.0));
    assert_eq!(seq.surface().last_draw().map(|(frame, _)| frame), Some(17));
    assert_eq!(seq.current_frame(), 17);
}

#[test]
fn render_clamps_index_and_skips_unloaded_frames() {
    let mut seq = ready(config(5), (100.0, 100.0), 1.0);
    assert!(seq.render(99));
    assert_eq!(seq.current_frame(), 4);

    let mut partial = preloading(config(3), (100.0, 100.0));
    partial.frame_loaded(0, 1.0).unwrap();
    partial.resize(1.0);
    assert!(!partial.render(1));
    assert!(partial.render(0));
    assert_eq!(partial.current_frame(), 0);
}

#[test]
fn contain_placement_centers_narrower_frames() {
    // First frame is 16:9 so a 450px tall surface is 800 wide; frame 1 is 4:3.
    let mut cfg = config(2);
    cfg.target_height = 450.0;
    let mut seq = HeroSequence::new(cfg, RecordingSurface::default()).unwrap();
    seq.begin_preload().unwrap();
    seq.attach_frame(
        0,
        FakeImage {
            id: 0,
            size: Some((1600.0, 900.0)),
        },
    )
    .unwrap();
    seq.attach_frame(
        1,
        FakeImage {
            id: 1,
            size: Some((1024.0, 768.0)),
        },
    )
    .unwrap();
    seq.frame_loaded(0, 1.0).unwrap();
    seq.frame_loaded(1, 1.0).unwrap();

    assert!(seq.render(1));
    let (frame, rect) = seq.surface().last_draw().unwrap();
    assert_eq!(frame, 1);
    assert!((rect.width - 600.0).abs() < 1e-9);
    assert!((rect.height - 450.0).abs() < 1e-9);
    assert!((rect.x - 100.0).abs() < 1e-9);
    assert!(rect.y.abs() < 1e-9);
}

#[test]
fn missing_intrinsic_size_falls_back_to_sixteen_by_nine() {
    let mut seq = HeroSequence::new(config(2), RecordingSurface::default()).unwrap();
    let layout = seq.resize(1.0);
    assert!((layout.css_width - 800.0 * 16.0 / 9.0).abs() < 1e-9);
    assert_eq!(seq.phase(), Phase::Uninitialized);
    assert!(seq.surface().draws().is_empty());
}

#[test]
fn scroll_schedules_one_redraw_and_latest_index_wins() {
    let mut seq = ready(config(43), (1600.0, 900.0), 1.0);
    let region = Some(ScrollRegion::new(200.0, 3000.0));

    assert!(seq.on_scroll(700.0, 1000.0, region));
    assert!(!seq.on_scroll(1200.0, 1000.0, region));
    assert!(seq.redraw_pending());

    assert_eq!(seq.on_animation_frame(), Some(21));
    assert_eq!(seq.current_frame(), 21);
    assert!(!seq.redraw_pending());
    assert_eq!(seq.on_animation_frame(), None);

    assert!(seq.on_scroll(99_999.0, 1000.0, region));
    assert_eq!(seq.on_animation_frame(), Some(42));

    assert!(seq.on_scroll(0.0, 1000.0, region));
    assert_eq!(seq.on_animation_frame(), Some(0));
}

#[test]
fn scroll_without_region_or_before_ready_is_ignored() {
    let mut seq = ready(config(10), (100.0, 100.0), 1.0);
    assert!(!seq.on_scroll(500.0, 800.0, None));
    assert!(!seq.redraw_pending());

    let mut loading = preloading(config(10), (100.0, 100.0));
    assert!(!loading.on_scroll(500.0, 800.0, Some(ScrollRegion::new(0.0, 5000.0))));
    assert_eq!(loading.on_animation_frame(), None);
}

#[test]
fn short_region_holds_first_frame() {
    let mut seq = ready(config(43), (100.0, 100.0), 1.0);
    let region = ScrollRegion::new(300.0, 700.0);
    for scroll in [0.0, 300.0, 650.0, 10_000.0] {
        assert_eq!(seq.frame_for_scroll(scroll, 900.0, region), 0);
        assert!(seq.on_scroll(scroll, 900.0, Some(region)));
        assert_eq!(seq.on_animation_frame(), Some(0));
    }
}

#[test]
fn cancelled_redraw_is_dropped() {
    let mut seq = ready(config(43), (100.0, 100.0), 1.0);
    assert!(seq.on_scroll(2000.0, 1000.0, Some(ScrollRegion::new(0.0, 3000.0))));
    seq.cancel_scheduled_redraw();
    assert_eq!(seq.on_animation_frame(), None);
    assert_eq!(seq.current_frame(), 0);
}

#[test]
fn lifecycle_operations_require_the_right_phase() {
    let mut seq = HeroSequence::new(config(2), RecordingSurface::default()).unwrap();
    let image = FakeImage { id: 0, size: None };
    assert_eq!(
        seq.attach_frame(0, image),
        Err(SequenceError::InvalidPhase {
            op: "attach a frame",
            phase: Phase::Uninitialized,
        })
    );
    seq.begin_preload().unwrap();
    assert!(matches!(
        seq.begin_preload(),
        Err(SequenceError::InvalidPhase {
            phase: Phase::Preloading,
            ..
        })
    ));
    assert_eq!(seq.attach_frame(1, image), Ok("frames/f_00001.png"));
    assert!(matches!(
        seq.attach_frame(2, image),
        Err(SequenceError::FrameOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let result = HeroSequence::new(config(0), RecordingSurface::default());
    assert!(matches!(result, Err(SequenceError::EmptySequence)));
}

#[test]
fn frame_src_uses_configured_folder() {
    let seq = HeroSequence::new(config(43), RecordingSurface::default()).unwrap();
    assert_eq!(seq.frame_src(7), "frames/f_00007.png");
    assert_eq!(seq.frame_src(42), "frames/f_00042.png");
    assert_eq!(seq.store().src(42).unwrap(), "frames/f_00042.png");
}
