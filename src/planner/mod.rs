// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Operation planning: classify collected paths into move operations

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Category assigned when classification metadata is unavailable
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A planned move. Pure data; nothing here touches the filesystem beyond
/// metadata reads during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: String,
}

/// Ordered sequence of planned moves; order follows input path order
pub type OperationPlan = Vec<FileOperation>;

/// How files are grouped into categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizeMode {
    Date,
    Type,
}

impl OrganizeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(Self::Date),
            "type" => Some(Self::Type),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Type => "type",
        }
    }
}

/// Plan moves for `paths` into `destination_root` under the given mode
pub fn plan(mode: OrganizeMode, paths: &[PathBuf], destination_root: &Path) -> OperationPlan {
    match mode {
        OrganizeMode::Date => plan_by_date(paths, destination_root),
        OrganizeMode::Type => plan_by_type(paths, destination_root),
    }
}

/// Group files by last-modified month (`YYYY-MM`).
///
/// Total over the input: a file whose timestamp cannot be read lands in the
/// `unknown` bucket instead of failing the batch.
pub fn plan_by_date(paths: &[PathBuf], destination_root: &Path) -> OperationPlan {
    paths
        .iter()
        .map(|path| operation(path, destination_root, &date_category(path)))
        .collect()
}

/// Group files by coarse type class derived from the extension.
///
/// Total over the input: files with no or unrecognized extensions land in
/// the `unknown` bucket.
pub fn plan_by_type(paths: &[PathBuf], destination_root: &Path) -> OperationPlan {
    paths
        .iter()
        .map(|path| operation(path, destination_root, type_category(path)))
        .collect()
}

fn operation(source: &Path, destination_root: &Path, category: &str) -> FileOperation {
    let filename = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "unnamed".into());

    FileOperation {
        source: source.to_path_buf(),
        destination: destination_root.join(category).join(filename),
        category: category.to_string(),
    }
}

fn date_category(path: &Path) -> String {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => {
            let local: DateTime<Local> = mtime.into();
            local.format("%Y-%m").to_string()
        }
        Err(e) => {
            debug!("No modification time for {:?}: {}", path, e);
            UNKNOWN_CATEGORY.to_string()
        }
    }
}

/// Map a file extension to its coarse type class
pub fn type_category(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_lowercase(),
        None => return UNKNOWN_CATEGORY,
    };

    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tiff" | "tif" | "heic" | "svg" => {
            "images"
        }
        "pdf" | "doc" | "docx" | "odt" | "rtf" | "txt" | "md" => "documents",
        "xls" | "xlsx" | "ods" | "csv" => "spreadsheets",
        "ppt" | "pptx" | "odp" => "presentations",
        "mp3" | "wav" | "flac" | "ogg" | "m4a" => "audio",
        "mp4" | "mkv" | "webm" | "avi" | "mov" => "videos",
        "zip" | "tar" | "gz" | "7z" | "rar" => "archives",
        "rs" | "py" | "js" | "ts" | "go" | "java" | "c" | "cpp" | "h" => "code",
        _ => UNKNOWN_CATEGORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn type_plan_matches_known_extensions() {
        let paths = vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b.pdf"),
            PathBuf::from("c.unknownext"),
        ];
        let plan = plan_by_type(&paths, Path::new("/out"));

        let categories: Vec<_> = plan.iter().map(|op| op.category.as_str()).collect();
        assert_eq!(categories, vec!["images", "documents", "unknown"]);

        assert_eq!(plan[0].destination, PathBuf::from("/out/images/a.jpg"));
        assert_eq!(plan[1].destination, PathBuf::from("/out/documents/b.pdf"));
        assert_eq!(plan[2].destination, PathBuf::from("/out/unknown/c.unknownext"));
    }

    #[test]
    fn extension_case_is_ignored() {
        assert_eq!(type_category(Path::new("photo.JPG")), "images");
        assert_eq!(type_category(Path::new("deck.PpTx")), "presentations");
    }

    #[test]
    fn no_extension_is_unknown() {
        assert_eq!(type_category(Path::new("Makefile")), UNKNOWN_CATEGORY);
    }

    #[test]
    fn empty_input_yields_empty_plan() {
        assert!(plan_by_type(&[], Path::new("/out")).is_empty());
        assert!(plan_by_date(&[], Path::new("/out")).is_empty());
    }

    #[test]
    fn plan_length_equals_input_length() {
        let paths: Vec<PathBuf> = (0..10).map(|i| PathBuf::from(format!("f{}.txt", i))).collect();
        assert_eq!(plan_by_type(&paths, Path::new("/out")).len(), paths.len());
        assert_eq!(plan_by_date(&paths, Path::new("/out")).len(), paths.len());
    }

    #[test]
    fn type_planning_is_idempotent() {
        let paths = vec![PathBuf::from("a.jpg"), PathBuf::from("b.csv")];
        let first = plan_by_type(&paths, Path::new("/out"));
        let second = plan_by_type(&paths, Path::new("/out"));
        assert_eq!(first, second);
    }

    #[test]
    fn date_plan_buckets_by_modified_month() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"one").unwrap();
        fs::write(&b, b"two").unwrap();

        let expected: DateTime<Local> = fs::metadata(&a).unwrap().modified().unwrap().into();
        let label = expected.format("%Y-%m").to_string();

        let plan = plan_by_date(&[a.clone(), b.clone()], Path::new("/out"));
        assert_eq!(plan[0].category, label);
        assert_eq!(plan[1].category, label);

        // Same bucket, distinct destinations
        assert_eq!(plan[0].destination, Path::new("/out").join(&label).join("a.txt"));
        assert_eq!(plan[1].destination, Path::new("/out").join(&label).join("b.txt"));
        assert_ne!(plan[0].destination, plan[1].destination);
    }

    #[test]
    fn unreadable_metadata_falls_back_to_unknown() {
        let paths = vec![PathBuf::from("/no/such/file.txt")];
        let plan = plan_by_date(&paths, Path::new("/out"));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].category, UNKNOWN_CATEGORY);
        assert_eq!(plan[0].destination, PathBuf::from("/out/unknown/file.txt"));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(OrganizeMode::parse("date"), Some(OrganizeMode::Date));
        assert_eq!(OrganizeMode::parse("type"), Some(OrganizeMode::Type));
        assert_eq!(OrganizeMode::parse("size"), None);
        assert_eq!(OrganizeMode::Date.as_str(), "date");
    }
}
