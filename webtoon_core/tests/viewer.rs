use std::path::Path;

use webtoon_core::prelude::*;

fn write_png(path: &Path, w: u32, h: u32) {
    image::RgbaImage::from_pixel(w, h, image::Rgba([0, 128, 255, 255]))
        .save(path)
        .unwrap();
}

fn small_limits() -> ViewerConfig {
    ViewerConfig {
        max_texture_height: 1000,
        split_tile_height: 200,
        ..ViewerConfig::default()
    }
}

fn wheel(notches: f32) -> FrameInput {
    FrameInput {
        wheel: notches,
        ..FrameInput::default()
    }
}

#[test]
fn tall_book_is_split_on_open() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 10, 300);

    let mut viewer = Viewer::new(small_limits(), runtime.handle().clone());
    viewer.resize(10, 100).unwrap();
    viewer
        .set_book(Book::open(dir.path(), SortType::NumericAsc).unwrap())
        .unwrap();

    assert!(dir.path().join(OPTIMIZE_DIRECTORY).is_dir());
    assert_eq!(viewer.page_count(), 2);
    assert_eq!(viewer.resize(10, 100).unwrap(), Some(1.0));
    assert_eq!(viewer.current().unwrap().height(), 200);
}

#[test]
fn scrolling_through_a_book_on_disk() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 20, 400);
    write_png(&dir.path().join("2.png"), 20, 400);
    write_png(&dir.path().join("3.png"), 20, 400);

    let mut viewer = Viewer::new(ViewerConfig::default(), runtime.handle().clone());
    viewer.resize(10, 100).unwrap();
    viewer
        .set_book(Book::open(dir.path(), SortType::NumericAsc).unwrap())
        .unwrap();
    viewer.resize(10, 100).unwrap();
    assert_eq!(viewer.current().unwrap().height(), 200);

    viewer.tick(&FrameInput::default());
    viewer.finish_pending_loads();
    let placements = viewer.draw();
    assert!(placements
        .iter()
        .any(|p| p.kind == SlotKind::Next && p.y == 200 && p.page.index == 1));

    // Three notches down is 240 px: past the first page's 200.
    viewer.tick(&wheel(-3.0));
    viewer.draw();
    assert_eq!(viewer.index(), 1);
    assert_eq!(viewer.pos(), 40);

    // The old current page became the previous neighbor.
    let placements = viewer.draw();
    assert!(placements
        .iter()
        .any(|p| p.kind == SlotKind::Previous && p.page.index == 0 && p.y == -240));
}

#[test]
fn reversed_sort_starts_from_the_last_file() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 10, 10);
    write_png(&dir.path().join("2.png"), 10, 20);

    let mut viewer = Viewer::new(ViewerConfig::default(), runtime.handle().clone());
    viewer.resize(10, 100).unwrap();
    viewer
        .set_book(Book::open(dir.path(), SortType::NumericDesc).unwrap())
        .unwrap();
    viewer.resize(10, 100).unwrap();
    assert_eq!(viewer.current().unwrap().height(), 20);
}
