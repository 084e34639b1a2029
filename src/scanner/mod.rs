use crate::error::{Result, SockMatchError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub file_name: String,
}

const INPUT_EXTENSIONS: &[&str] = &["json", "JSON"];

/// 入力パスを解決（ファイルならそれ1件、フォルダなら直下のJSON）
pub fn collect_inputs(path: &Path) -> Result<Vec<InputFile>> {
    if path.is_file() {
        return Ok(vec![input_file(path)]);
    }
    if !path.exists() {
        return Err(SockMatchError::FileNotFound(path.display().to_string()));
    }
    scan_folder(path)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<InputFile>> {
    if !folder.is_dir() {
        return Err(SockMatchError::FolderNotFound(folder.display().to_string()));
    }

    let mut inputs = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if is_input_extension(&ext_str) {
                inputs.push(input_file(path));
            }
        }
    }

    // ファイル名でソート
    inputs.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(folder = %folder.display(), count = inputs.len(), "入力ファイルをスキャン");

    Ok(inputs)
}

fn input_file(path: &Path) -> InputFile {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    InputFile {
        path: path.to_path_buf(),
        file_name,
    }
}

fn is_input_extension(ext: &str) -> bool {
    INPUT_EXTENSIONS.contains(&ext)
}
