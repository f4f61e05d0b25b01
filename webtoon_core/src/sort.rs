//! Page ordering policies.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortType {
    #[default]
    NumericAsc,
    NumericDesc,
    AlphamericAsc,
    AlphamericDesc,
    ModTimeAsc,
    ModTimeDesc,
    DoNotSort,
}

impl SortType {
    pub fn is_ascending(&self) -> bool {
        matches!(
            self,
            SortType::NumericAsc | SortType::AlphamericAsc | SortType::ModTimeAsc
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SortType::NumericAsc | SortType::NumericDesc)
    }

    pub fn is_alphameric(&self) -> bool {
        matches!(self, SortType::AlphamericAsc | SortType::AlphamericDesc)
    }

    pub fn is_mod_time(&self) -> bool {
        matches!(self, SortType::ModTimeAsc | SortType::ModTimeDesc)
    }

    /// Same policy, opposite direction. `DoNotSort` has no direction.
    pub fn reverse(&self) -> SortType {
        match self {
            SortType::NumericAsc => SortType::NumericDesc,
            SortType::NumericDesc => SortType::NumericAsc,
            SortType::AlphamericAsc => SortType::AlphamericDesc,
            SortType::AlphamericDesc => SortType::AlphamericAsc,
            SortType::ModTimeAsc => SortType::ModTimeDesc,
            SortType::ModTimeDesc => SortType::ModTimeAsc,
            SortType::DoNotSort => SortType::DoNotSort,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortType::NumericAsc | SortType::NumericDesc => "Numeric",
            SortType::AlphamericAsc | SortType::AlphamericDesc => "Alphanumeric",
            SortType::ModTimeAsc | SortType::ModTimeDesc => "Modtime",
            SortType::DoNotSort => "Unsorted",
        }
    }

    fn order(&self, ord: Ordering) -> Ordering {
        if self.is_ascending() { ord } else { ord.reverse() }
    }

    /// Orders `paths` in place. `DoNotSort` keeps discovery order.
    pub fn sort(&self, paths: &mut Vec<PathBuf>) {
        if self.is_mod_time() {
            self.sort_by_mod_time(paths);
            return;
        }
        if *self == SortType::DoNotSort {
            return;
        }
        let mut keyed: Vec<(String, PathBuf)> = paths
            .drain(..)
            .map(|p| (p.to_string_lossy().into_owned(), p))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare_names(a, b));
        paths.extend(keyed.into_iter().map(|(_, p)| p));
    }

    /// Orders split tiles (`<stem>_<NN>.<ext>`) by their original stem under this
    /// policy, then by tile index.
    pub fn sort_tiles(&self, paths: &mut Vec<PathBuf>) {
        if !self.is_numeric() && !self.is_alphameric() {
            self.sort(paths);
            return;
        }
        let mut keyed: Vec<((String, u32), PathBuf)> = paths
            .drain(..)
            .map(|p| (split_tile_name(&p), p))
            .collect();
        keyed.sort_by(|((sa, ta), _), ((sb, tb), _)| {
            self.compare_names(sa, sb).then_with(|| ta.cmp(tb))
        });
        paths.extend(keyed.into_iter().map(|(_, p)| p));
    }

    fn compare_names(&self, a: &str, b: &str) -> Ordering {
        if self.is_numeric() {
            self.compare_numeric(a, b)
        } else {
            self.order(a.cmp(b))
        }
    }

    // Unparsable names go last whichever the direction.
    fn compare_numeric(&self, a: &str, b: &str) -> Ordering {
        match (parse_number(a), parse_number(b)) {
            (Some(x), Some(y)) => self.order(x.cmp(&y).then_with(|| a.cmp(b))),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.order(a.cmp(b)),
        }
    }

    // Entries that cannot be stat'ed go last. Equal times keep discovery order.
    fn sort_by_mod_time(&self, paths: &mut Vec<PathBuf>) {
        let mut keyed: Vec<(Option<SystemTime>, PathBuf)> = paths
            .drain(..)
            .map(|p| (fs::metadata(&p).and_then(|m| m.modified()).ok(), p))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => self.order(a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        paths.extend(keyed.into_iter().map(|(_, p)| p));
    }
}

/// Parses the file name up to its first `.` as an integer.
pub fn parse_number(path: &str) -> Option<i64> {
    let name = Path::new(path).file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    stem.parse().ok()
}

fn split_tile_name(path: &Path) -> (String, u32) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.rsplit_once('_') {
        Some((base, tile)) => match tile.parse() {
            Ok(tile) => (base.to_string(), tile),
            Err(_) => (stem.clone(), 0),
        },
        None => (stem, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/book").join(n)).collect()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn numeric_ascending_is_non_decreasing() {
        let mut files = paths(&["10.jpg", "2.jpg", "1.png", "33.jpg", "03.jpg", "7.webp"]);
        SortType::NumericAsc.sort(&mut files);
        let parsed: Vec<i64> = files
            .iter()
            .map(|p| parse_number(&p.to_string_lossy()).unwrap())
            .collect();
        assert!(parsed.windows(2).all(|w| w[0] <= w[1]), "{parsed:?}");
    }

    #[test]
    fn unparsable_names_sort_last_in_both_directions() {
        let mut asc = paths(&["cover.jpg", "2.jpg", "b.jpg", "1.jpg", "a.jpg"]);
        SortType::NumericAsc.sort(&mut asc);
        assert_eq!(names(&asc), ["1.jpg", "2.jpg", "a.jpg", "b.jpg", "cover.jpg"]);

        let mut desc = paths(&["cover.jpg", "2.jpg", "b.jpg", "1.jpg", "a.jpg"]);
        SortType::NumericDesc.sort(&mut desc);
        assert_eq!(names(&desc), ["2.jpg", "1.jpg", "cover.jpg", "b.jpg", "a.jpg"]);
    }

    #[test]
    fn number_is_taken_before_first_dot() {
        assert_eq!(parse_number("/x/12.5.jpg"), Some(12));
        assert_eq!(parse_number("/x/012.png"), Some(12));
        assert_eq!(parse_number("/x/p12.png"), None);
    }

    #[test]
    fn alphameric_orders_lexically() {
        let mut files = paths(&["b.jpg", "a10.jpg", "a2.jpg"]);
        SortType::AlphamericAsc.sort(&mut files);
        assert_eq!(names(&files), ["a10.jpg", "a2.jpg", "b.jpg"]);
        SortType::AlphamericDesc.sort(&mut files);
        assert_eq!(names(&files), ["b.jpg", "a2.jpg", "a10.jpg"]);
    }

    #[test]
    fn do_not_sort_keeps_discovery_order() {
        let mut files = paths(&["3.jpg", "1.jpg", "2.jpg"]);
        SortType::DoNotSort.sort(&mut files);
        assert_eq!(names(&files), ["3.jpg", "1.jpg", "2.jpg"]);
    }

    #[test]
    fn missing_files_sort_after_stat_able_ones() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.jpg");
        let new = dir.path().join("new.jpg");
        std::fs::write(&old, b"x").unwrap();
        std::fs::write(&new, b"x").unwrap();
        let base = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(base)
            .unwrap();
        std::fs::File::options()
            .write(true)
            .open(&new)
            .unwrap()
            .set_modified(base + std::time::Duration::from_secs(60))
            .unwrap();
        let gone = dir.path().join("gone.jpg");

        let mut files = vec![gone.clone(), new.clone(), old.clone()];
        SortType::ModTimeAsc.sort(&mut files);
        assert_eq!(files, vec![old.clone(), new.clone(), gone.clone()]);

        let mut files = vec![gone.clone(), old.clone(), new.clone()];
        SortType::ModTimeDesc.sort(&mut files);
        assert_eq!(files, vec![new, old, gone]);
    }

    #[test]
    fn tiles_follow_original_numeric_order() {
        let mut files = paths(&["10_00.jpg", "9_01.jpg", "9_00.jpg", "10_01.jpg", "x_00.jpg"]);
        SortType::NumericAsc.sort_tiles(&mut files);
        assert_eq!(
            names(&files),
            ["9_00.jpg", "9_01.jpg", "10_00.jpg", "10_01.jpg", "x_00.jpg"]
        );
    }

    #[test]
    fn reverse_flips_direction_only() {
        assert_eq!(SortType::NumericAsc.reverse(), SortType::NumericDesc);
        assert_eq!(SortType::ModTimeDesc.reverse(), SortType::ModTimeAsc);
        assert_eq!(SortType::DoNotSort.reverse(), SortType::DoNotSort);
        assert_eq!(SortType::AlphamericDesc.label(), "Alphanumeric");
    }
}
