use appicon_gen::config::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;

/// 1枚の正方形画像から、iOS / macOS 向けのアプリアイコン一式を生成するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 元画像のパス (オプション: デフォルトはクレート内の assets/app-icon-source.png)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// アイコンの出力先フォルダのパス (オプション: デフォルトは Shared/Assets.xcassets/AppIcon.appiconset)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 背景として透過にする明るさのしきい値 0-255 (オプション: デフォルトは 235)
    #[arg(short, long)]
    pub threshold: Option<u8>,
}

impl Args {
    /// 指定された項目だけを既定の設定に上書きします。
    pub fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        if let Some(source) = self.source {
            config = config.with_source(source);
        }
        if let Some(output_dir) = self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        config
    }
}
