use std::fs;
use std::path::Path;

use webtoon_core::prelude::*;

fn write_png(path: &Path, w: u32, h: u32) {
    image::RgbaImage::from_pixel(w, h, image::Rgba([30, 60, 90, 255]))
        .save(path)
        .unwrap();
}

fn names(book: &Book) -> Vec<String> {
    book.files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn tile_heights(book: &Book) -> Vec<u32> {
    book.files()
        .iter()
        .map(|p| image::image_dimensions(p).unwrap().1)
        .collect()
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn split_writes_budget_sized_tiles() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 100, 5000);
    write_png(&dir.path().join("2.png"), 100, 300);

    let book = Book::open(dir.path(), SortType::NumericAsc).unwrap();
    let split = book.split(100, 2048).unwrap();

    assert!(split.is_split());
    assert_eq!(split.dir(), dir.path().join(OPTIMIZE_DIRECTORY));
    assert_eq!(names(&split), ["1_00.jpg", "1_01.jpg", "1_02.jpg", "2_00.jpg"]);
    assert_eq!(tile_heights(&split), [2048, 2048, 904, 300]);
    assert_eq!(entries(dir.path()), [".wtv_optimize", "1.png", "2.png"]);
}

#[test]
fn tiles_keep_source_resolution() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 100, 5000);

    // Shown at half width the page is 2500 rows tall: two tiles.
    let split = Book::open(dir.path(), SortType::NumericAsc)
        .unwrap()
        .split(50, 2048)
        .unwrap();
    assert_eq!(tile_heights(&split), [4096, 904]);
    for path in split.files() {
        assert_eq!(image::image_dimensions(path).unwrap().0, 100);
    }
}

#[test]
fn splitting_twice_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 10, 30);
    let book = Book::open(dir.path(), SortType::NumericAsc).unwrap();
    book.split(10, 20).unwrap();

    let err = book.split(10, 20).unwrap_err();
    assert!(matches!(err, BookError::AlreadyOptimized(_)));
}

#[test]
fn failed_split_leaves_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 10, 30);
    fs::write(dir.path().join("2.png"), b"not a png").unwrap();

    let book = Book::open(dir.path(), SortType::NumericAsc).unwrap();
    let err = book.split(10, 20).unwrap_err();
    assert!(matches!(err, BookError::Unreadable { .. }));
    assert_eq!(entries(dir.path()), ["1.png", "2.png"]);
}

#[test]
fn reopening_reuses_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 100, 5000);
    write_png(&dir.path().join("2.png"), 100, 300);
    write_png(&dir.path().join("10.png"), 100, 300);
    Book::open(dir.path(), SortType::NumericAsc)
        .unwrap()
        .split(100, 2048)
        .unwrap();

    let book = Book::open(dir.path(), SortType::NumericAsc).unwrap();
    assert!(book.is_split());
    assert!(!book.needs_splitting(100, 1000));
    assert_eq!(
        names(&book),
        ["1_00.jpg", "1_01.jpg", "1_02.jpg", "2_00.jpg", "10_00.jpg"]
    );

    // Pages reverse; tiles within a page stay top to bottom.
    let book = Book::open(dir.path(), SortType::NumericDesc).unwrap();
    assert_eq!(
        names(&book),
        ["10_00.jpg", "2_00.jpg", "1_00.jpg", "1_01.jpg", "1_02.jpg"]
    );
}

#[test]
fn stale_staging_directories_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("1.png"), 10, 10);
    let staging = dir.path().join(".wtv_optimize-abc123");
    fs::create_dir(&staging).unwrap();
    write_png(&staging.join("1_00.jpg"), 10, 10);

    let book = Book::open(dir.path(), SortType::NumericAsc).unwrap();
    assert_eq!(names(&book), ["1.png"]);
    assert!(!book.is_split());
}
