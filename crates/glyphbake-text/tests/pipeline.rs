//! Integration tests - bake → layout → composite
//!
//! Uses the bundled DejaVu Sans Mono fixture font.

use glyphbake_text::{
    BakeConfig, BakedFont, Color, Compositor, Cursor, FontAtlasBaker, FontFace, GlyphLayoutEngine,
    PixelFormat, Surface, TextError,
};

const FONT: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");

fn bake_default() -> BakedFont {
    FontAtlasBaker::new(BakeConfig::default())
        .bake(FontFace::from_bytes(FONT))
        .expect("printable ASCII fits a 512x512 atlas at 32px")
}

// ============================================================================
// BAKING
// ============================================================================

#[test]
fn test_bake_ascii_32px_512() {
    let config = BakeConfig::new()
        .with_pixel_height(32)
        .with_range(32, 96)
        .with_atlas_size(512, 512);
    let baked = FontAtlasBaker::new(config).bake(FontFace::from_bytes(FONT)).unwrap();

    assert_eq!(baked.metrics().len(), 96);
    assert!(baked.metrics().iter().all(|m| m.xadvance >= 0.0));
}

#[test]
fn test_bake_200px_into_64_overflows() {
    let config = BakeConfig::new()
        .with_pixel_height(200)
        .with_range(32, 96)
        .with_atlas_size(64, 64);
    let result = FontAtlasBaker::new(config).bake(FontFace::from_bytes(FONT));

    match result {
        Err(TextError::AtlasOverflow { atlas_width, atlas_height, codepoint }) => {
            assert_eq!((atlas_width, atlas_height), (64, 64));
            assert!((32..128).contains(&codepoint));
        }
        other => panic!("expected AtlasOverflow, got {other:?}"),
    }
}

#[test]
fn test_bake_rejects_non_font() {
    let result = FontAtlasBaker::new(BakeConfig::default()).bake(FontFace::from_bytes(b"not a font".to_vec()));
    assert!(matches!(result, Err(TextError::FontParsing(_))));
}

#[test]
fn test_larger_height_uses_more_rows() {
    let small = bake_default();
    let large = FontAtlasBaker::new(BakeConfig::new().with_pixel_height(64))
        .bake(FontFace::from_bytes(FONT))
        .unwrap();
    assert!(large.atlas().used_height() > small.atlas().used_height());
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_hello_layout() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);
    let (commands, end) = engine.layout_str("Hello", Cursor::new(0.0, 0.0)).unwrap();

    assert_eq!(commands.len(), 5);
    assert!(commands.windows(2).all(|w| w[0].dst.x <= w[1].dst.x));

    let mut expected = 0.0_f32;
    for c in "Hello".chars() {
        expected += baked.glyph(c as u32).unwrap().xadvance;
    }
    assert_eq!(end.x, expected);
    assert_eq!(end.y, 0.0);
}

#[test]
fn test_layout_is_deterministic() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);
    let start = Cursor::new(12.5, 40.0);

    let first = engine.layout_str("The quick brown fox", start).unwrap();
    let second = engine.layout_str("The quick brown fox", start).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_layout_resumes_from_end_cursor() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);
    let start = Cursor::new(3.0, 30.0);

    let (whole, whole_end) = engine.layout_str("Hello", start).unwrap();
    let (head, mid) = engine.layout_str("He", start).unwrap();
    let (tail, end) = engine.layout_str("llo", mid).unwrap();

    let joined: Vec<_> = head.into_iter().chain(tail).collect();
    assert_eq!(joined, whole);
    assert_eq!(end, whole_end);
}

#[test]
fn test_layout_out_of_range() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);

    let result = engine.layout([1u32], Cursor::default());
    assert!(matches!(
        result,
        Err(TextError::GlyphRange { codepoint: 1, first: 32, count: 96 })
    ));

    // Cursor is left where the bad codepoint was found
    let mut cursor = Cursor::new(5.0, 5.0);
    assert!(engine.place(1, &mut cursor).is_err());
    assert_eq!(cursor, Cursor::new(5.0, 5.0));
}

#[test]
fn test_source_rects_inside_atlas() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);
    let (w, h) = baked.atlas().size();

    let all: Vec<u32> = (32..128).collect();
    let (commands, _) = engine.layout(all, Cursor::default()).unwrap();
    assert_eq!(commands.len(), 96);
    for cmd in &commands {
        assert!(cmd.src.fits_within(w, h), "{cmd:?} escapes the atlas");
        assert_eq!((cmd.src.width, cmd.src.height), (cmd.dst.width, cmd.dst.height));
    }
}

#[test]
fn test_measure_matches_layout() {
    let baked = bake_default();
    let engine = GlyphLayoutEngine::new(&baked);
    let text = "Hello, world!";

    let width = engine.measure(text.chars().map(u32::from)).unwrap();
    let (_, end) = engine.layout_str(text, Cursor::default()).unwrap();
    assert_eq!(width, end.x);
}

// ============================================================================
// COMPOSITING
// ============================================================================

#[test]
fn test_composite_idempotent_on_fresh_surfaces() {
    let baked = bake_default();
    let (commands, _) = GlyphLayoutEngine::new(&baked)
        .layout_str("Hello", Cursor::new(0.0, 32.0))
        .unwrap();

    let fresh = Surface::filled(640, 480, PixelFormat::Rgba8888, Color::RED);
    let mut a = fresh.clone();
    let mut b = fresh.clone();
    Compositor::new().composite(baked.atlas(), &commands, &mut a);
    Compositor::new().composite(baked.atlas(), &commands, &mut b);

    assert_eq!(a, b);
    assert_ne!(a, fresh);
}

#[test]
fn test_composite_partially_off_surface() {
    let baked = bake_default();
    // Baseline at y = 0: most of each glyph is above the surface
    let (commands, _) = GlyphLayoutEngine::new(&baked)
        .layout_str("Hello", Cursor::new(-8.0, 0.0))
        .unwrap();

    let mut surface = Surface::filled(64, 16, PixelFormat::Bgra8888, Color::BLACK);
    Compositor::new().composite(baked.atlas(), &commands, &mut surface);
    assert_eq!(surface.as_bytes().len(), 64 * 16 * 4);
}

#[test]
fn test_composite_entirely_off_surface_is_noop() {
    let baked = bake_default();
    let (commands, _) = GlyphLayoutEngine::new(&baked)
        .layout_str("Hello", Cursor::new(1000.0, 1000.0))
        .unwrap();

    let fresh = Surface::filled(64, 64, PixelFormat::Rgba8888, Color::RED);
    let mut surface = fresh.clone();
    let written = Compositor::new().composite(baked.atlas(), &commands, &mut surface);
    assert_eq!(written, 0);
    assert_eq!(surface, fresh);
}
