//! アイコン生成のメインワークフローを定義するモジュール。
//!
//! 読み込み → 正方形に切り抜き → 背景の透過 → サイズごとにリサイズして書き出し、
//! という一直線の処理を、渡された `PipelineConfig` に従って実行します。

use crate::config::PipelineConfig;
use crate::domain::output_dir::OutputDirectory;
use crate::domain::source_image::SourceImage;
use crate::domain::transparency::make_background_transparent;
use crate::domain::variant_cache::VariantCache;
use crate::error::AppError;
use log::info;
use std::path::PathBuf;

/// 1回の実行結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// 書き込んだファイルのパス（書き込み順）
    pub written: Vec<PathBuf>,
    /// 実際に行ったリサイズの回数
    pub resize_count: usize,
}

/// パイプラインを実行します。
///
/// # 引数
/// * `config`: 元画像・出力先・サイズ定義・しきい値をまとめた設定。
///
/// # 戻り値
/// * `Ok(RunReport)`: すべてのファイルを書き込めた場合。
/// * `Err(AppError)`: 元画像が読めない、または出力先に書き込めない場合。
///   途中で失敗したときは、それまでに書いたファイルはそのまま残る。
pub fn run(config: &PipelineConfig) -> Result<RunReport, AppError> {
    // 1. 元画像の読み込み
    // 出力ディレクトリに触れる前に読み込むことで、失敗時に何も作られないようにする。
    let source = SourceImage::open(&config.source_path)?;
    info!("元画像を読み込みました: {}", source);

    // 2. 中央を正方形に切り抜き、3. 白っぽい背景を透過にする
    let square = source.into_square();
    let normalized = make_background_transparent(square, config.transparency_threshold);

    // 4. 出力ディレクトリの準備
    let output_dir = OutputDirectory::prepare(&config.output_dir)?;
    info!(
        "出力先: {} ({} ファイル、{} サイズ)",
        output_dir,
        config.size_spec.file_count(),
        config.size_spec.distinct_pixels().len()
    );

    // 5. 宣言順にリサイズ（サイズごとに1回だけ）して書き出す
    let mut cache = VariantCache::new(&normalized);
    let mut written = Vec::with_capacity(config.size_spec.file_count());
    for entry in config.size_spec.entries() {
        let variant = cache.get_or_resize(entry.pixels());
        for name in entry.file_names() {
            let path = output_dir.write_png(name, variant)?;
            println!("{}", path.display());
            written.push(path);
        }
    }

    info!(
        "{} 個のファイルを書き出しました（{} サイズ、リサイズ {} 回）",
        written.len(),
        cache.variant_count(),
        cache.resize_count()
    );

    Ok(RunReport {
        written,
        resize_count: cache.resize_count(),
    })
}
