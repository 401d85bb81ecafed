mod cli;

use clap::Parser;
use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 標準出力は書き出したパスの一覧専用にし、ログは標準エラーへ出す
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // コマンドライン引数を解析し、既定の設定に反映します
    let config = Args::parse().into_config();

    // エラーはそのまま返し、ランタイムに表示と非ゼロ終了を任せる
    appicon_gen::workflow::run(&config)?;
    Ok(())
}
