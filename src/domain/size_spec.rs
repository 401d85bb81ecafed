// use宣言：重複チェックのために HashSet を利用
use std::collections::HashSet;
use thiserror::Error;

// --- 構造体定義 ---

/// 1つのピクセルサイズと、そのサイズで書き出すファイル名の組。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSize {
    pixels: u32,
    file_names: Vec<String>,
}

/// 出力するアイコンサイズの一覧（宣言順を保持する）。
///
/// 同じピクセルサイズが複数のエントリに現れることがあります
/// （例: 40px は `icon-20@2x` と `icon-40` の両方で使われる）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec {
    entries: Vec<IconSize>,
}

// --- エラー定義 ---

/// `SizeSpec` の検証時に発生するエラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeSpecError {
    #[error("エントリ {index} のピクセルサイズが 0 です")]
    ZeroSize { index: usize },

    #[error("エントリ {index} ({pixels}px) にファイル名がありません")]
    NoFileNames { index: usize, pixels: u32 },

    #[error("ファイル名 '{0}' は出力ディレクトリ直下のファイル名として使えません")]
    InvalidFileName(String),

    #[error("ファイル名 '{0}' が重複しています")]
    DuplicateFileName(String),
}

// --- 組み込みテーブル ---

/// iPhone / iPad / Mac / App Store 向けのアイコンスロット。
const DEFAULT_SIZES: &[(u32, &[&str])] = &[
    (20, &["icon-20.png"]),
    (40, &["icon-20@2x.png", "icon-20@2x-ipad.png"]),
    (60, &["icon-20@3x.png"]),
    (29, &["icon-29.png"]),
    (58, &["icon-29@2x.png", "icon-29@2x-ipad.png"]),
    (87, &["icon-29@3x.png"]),
    (40, &["icon-40.png"]),
    (80, &["icon-40@2x.png", "icon-40@2x-ipad.png"]),
    (120, &["icon-40@3x.png"]),
    (120, &["icon-60@2x.png"]),
    (180, &["icon-60@3x.png"]),
    (76, &["icon-76.png"]),
    (152, &["icon-76@2x.png"]),
    (167, &["icon-83.5@2x.png"]),
    (1024, &["icon-1024.png"]),
    (16, &["icon-mac-16.png"]),
    (32, &["icon-mac-16@2x.png", "icon-mac-32.png"]),
    (64, &["icon-mac-32@2x.png"]),
    (128, &["icon-mac-128.png"]),
    (256, &["icon-mac-128@2x.png", "icon-mac-256.png"]),
    (512, &["icon-mac-256@2x.png", "icon-mac-512.png"]),
    (1024, &["icon-mac-512@2x.png"]),
];

// --- 実装ブロック ---

impl IconSize {
    pub fn new<I, S>(pixels: u32, file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pixels,
            file_names: file_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pixels(&self) -> u32 {
        self.pixels
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }
}

impl SizeSpec {
    /// 新しい `SizeSpec` を作成します。
    ///
    /// I/O を始める前に設定ミスを検出するため、ここで全エントリを検証します。
    ///
    /// # 戻り値
    /// * `Ok(SizeSpec)`: すべてのエントリが有効な場合。
    /// * `Err(SizeSpecError)`: 0px、ファイル名なし、不正なファイル名、重複がある場合。
    pub fn new(entries: Vec<IconSize>) -> Result<Self, SizeSpecError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.pixels == 0 {
                return Err(SizeSpecError::ZeroSize { index });
            }
            if entry.file_names.is_empty() {
                return Err(SizeSpecError::NoFileNames {
                    index,
                    pixels: entry.pixels,
                });
            }
            for name in &entry.file_names {
                if !is_plain_file_name(name) {
                    return Err(SizeSpecError::InvalidFileName(name.clone()));
                }
                if !seen.insert(name.as_str()) {
                    return Err(SizeSpecError::DuplicateFileName(name.clone()));
                }
            }
        }

        Ok(Self { entries })
    }

    /// 宣言順のエントリ一覧。
    pub fn entries(&self) -> &[IconSize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全エントリのファイル名の総数。
    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|e| e.file_names.len()).sum()
    }

    /// 初出順に並べた、重複のないピクセルサイズ。
    pub fn distinct_pixels(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.pixels)
            .filter(|px| seen.insert(*px))
            .collect()
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        // 組み込みテーブルは検証済みの定数なので、検証を通さずに構築する
        Self {
            entries: DEFAULT_SIZES
                .iter()
                .map(|(px, names)| IconSize::new(*px, names.iter().copied()))
                .collect(),
        }
    }
}

/// ディレクトリ成分を含まない単純なファイル名か判定します。
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

// --- テストモジュール ---
