use crate::domain::output_dir::OutputError;
use crate::domain::size_spec::SizeSpecError;
use crate::domain::source_image::SourceImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("元画像の読み込みエラー: {0}")]
    Source(#[from] SourceImageError),

    #[error("サイズ定義エラー: {0}")]
    SizeSpec(#[from] SizeSpecError),

    #[error("出力エラー: {0}")]
    Output(#[from] OutputError),
}
