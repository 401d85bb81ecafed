use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 出力ディレクトリの作成やファイル書き込みで発生するエラー。
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("出力ディレクトリ '{}' を作成できません", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' に書き込めません", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' をPNGとしてエンコードできません", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// アイコンの書き出し先ディレクトリ。存在することが保証されている。
#[derive(Debug)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    /// ディレクトリを（親も含めて）作成し、絶対パスで保持します。
    ///
    /// シンボリックリンクは解決せず、相対パスは作業ディレクトリを基準に絶対パスにします。
    ///
    /// すでに存在する場合はそのまま使います。
    pub fn prepare<P: AsRef<Path>>(path: P) -> Result<Self, OutputError> {
        let path = path.as_ref();
        let create_err = |source| OutputError::CreateDir {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(path).map_err(create_err)?;
        // 進捗表示で絶対パスを出す
        let path = std::path::absolute(path).map_err(create_err)?;

        Ok(Self { path })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// 画像を PNG（RGBA8、既定の圧縮）として `file_name` に書き出し、書き込んだパスを返します。
    ///
    /// 既存のファイルは上書きされます。
    pub fn write_png(&self, file_name: &str, image: &RgbaImage) -> Result<PathBuf, OutputError> {
        let path = self.path.join(file_name);
        let write_err = |source| OutputError::Write {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        PngEncoder::new(&mut writer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| OutputError::Encode {
                path: path.clone(),
                source,
            })?;
        writer.flush().map_err(write_err)?;

        Ok(path)
    }
}

impl fmt::Display for OutputDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
