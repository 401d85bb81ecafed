//! パイプラインの設定を1か所にまとめるモジュール。
//!
//! 既定値はこれまで固定値として埋め込んでいたものと同じで、
//! 必要な項目だけを上書きして使います。

use crate::domain::size_spec::SizeSpec;
use crate::domain::transparency::DEFAULT_THRESHOLD;
use std::path::{Path, PathBuf};

/// 元画像の既定パス（クレートのルートからの相対位置）。
const DEFAULT_SOURCE_FILE: &str = "assets/app-icon-source.png";

/// 出力先 appiconset の既定パス（クレートのルートからの相対位置）。
const DEFAULT_OUTPUT_DIR: &str = "Shared/Assets.xcassets/AppIcon.appiconset";

/// アイコン生成パイプラインの設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// 元画像のパス
    pub source_path: PathBuf,
    /// アイコンの書き出し先ディレクトリ
    pub output_dir: PathBuf,
    /// 生成するサイズとファイル名の一覧
    pub size_spec: SizeSpec,
    /// R, G, B がすべてこの値以上のピクセルを透過にする
    pub transparency_threshold: u8,
}

impl PipelineConfig {
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_size_spec(mut self, size_spec: SizeSpec) -> Self {
        self.size_spec = size_spec;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.transparency_threshold = threshold;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // CARGO_MANIFEST_DIR は絶対パスなので、既定のパスもすべて絶対パスになる
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        Self {
            source_path: root.join(DEFAULT_SOURCE_FILE),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            size_spec: SizeSpec::default(),
            transparency_threshold: DEFAULT_THRESHOLD,
        }
    }
}
