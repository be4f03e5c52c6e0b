#![allow(dead_code)]

use hero_sequence::{DrawRect, FrameImage, HeroSequence, SequenceConfig, Surface, SurfaceLayout};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeImage {
    pub id: usize,
    pub size: Option<(f64, f64)>,
}

impl FrameImage for FakeImage {
    fn natural_size(&self) -> Option<(f64, f64)> {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Layout(SurfaceLayout),
    Clear(f64, f64),
    Draw { frame: usize, rect: DrawRect },
}

/// Records every call; the CSS box follows the applied layout like a canvas
/// with no stylesheet overrides.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub css: (f64, f64),
    pub pixels: (u32, u32),
}

impl RecordingSurface {
    pub fn draws(&self) -> Vec<(usize, DrawRect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Draw { frame, rect } => Some((*frame, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn last_draw(&self) -> Option<(usize, DrawRect)> {
        self.draws().last().copied()
    }
}

impl Surface for RecordingSurface {
    type Image = FakeImage;

    fn apply_layout(&mut self, layout: &SurfaceLayout) -> hero_sequence::Result<()> {
        self.css = (layout.css_width, layout.css_height);
        self.pixels = (layout.pixel_width, layout.pixel_height);
        self.ops.push(Op::Layout(*layout));
        Ok(())
    }

    fn css_size(&self) -> (f64, f64) {
        self.css
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.pixels
    }

    fn clear(&mut self, width: f64, height: f64) -> hero_sequence::Result<()> {
        self.ops.push(Op::Clear(width, height));
        Ok(())
    }

    fn draw_image(&mut self, image: &FakeImage, rect: DrawRect) -> hero_sequence::Result<()> {
        self.ops.push(Op::Draw {
            frame: image.id,
            rect,
        });
        Ok(())
    }
}

pub fn config(frame_count: usize) -> SequenceConfig {
    SequenceConfig {
        frame_count,
        frame_folder: "frames".to_owned(),
        frame_basename: "f_".to_owned(),
        ..Default::default()
    }
}

/// Starts a preload with every frame sized `size`.
pub fn preloading(config: SequenceConfig, size: (f64, f64)) -> HeroSequence<RecordingSurface> {
    let mut seq = HeroSequence::new(config, RecordingSurface::default()).expect("valid config");
    seq.begin_preload().expect("begin preload");
    for id in 0..seq.frame_count() {
        seq.attach_frame(
            id,
            FakeImage {
                id,
                size: Some(size),
            },
        )
        .expect("attach frame");
    }
    seq
}

pub fn ready(config: SequenceConfig, size: (f64, f64), dpr: f64) -> HeroSequence<RecordingSurface> {
    let mut seq = preloading(config, size);
    for index in 0..seq.frame_count() {
        seq.frame_loaded(index, dpr).expect("frame loaded");
    }
    assert!(seq.is_ready());
    seq
}
