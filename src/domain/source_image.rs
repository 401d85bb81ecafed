use image::imageops;
use image::{ImageReader, RgbImage};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 元画像の読み込み時に発生するエラー。
#[derive(Debug, Error)]
pub enum SourceImageError {
    #[error("元画像 '{}' は存在しないか、ファイルではありません", .0.display())]
    NotFound(PathBuf),

    #[error("元画像 '{}' を読み込めません", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("元画像 '{}' を画像としてデコードできません", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 正方形に切り抜く範囲（左上の座標と一辺の長さ）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl CropRegion {
    /// 幅と高さから、中央寄せの正方形の切り抜き範囲を計算します。
    ///
    /// 長辺側のオフセットは `(長辺 - 短辺) / 2`（切り捨て）、短辺側は 0 です。
    pub fn centered(width: u32, height: u32) -> Self {
        let side = width.min(height);
        Self {
            x: (width - side) / 2,
            y: (height - side) / 2,
            side,
        }
    }
}

/// 読み込み済みの元画像（3チャンネル RGB）。
#[derive(Debug)]
pub struct SourceImage {
    path: PathBuf,
    pixels: RgbImage,
}

impl SourceImage {
    /// 指定されたパスから画像を読み込み、RGB に変換します。
    ///
    /// 既存のアルファチャンネルはここで破棄されます。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceImageError> {
        let path = path.as_ref();

        // パスが存在し、かつファイルであることを検証
        if !path.is_file() {
            return Err(SourceImageError::NotFound(path.to_path_buf()));
        }

        // 拡張子ではなくファイルの中身からフォーマットを判定する
        let read_err = |source| SourceImageError::Read {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(read_err)?
            .with_guessed_format()
            .map_err(read_err)?;
        let decoded = reader.decode().map_err(|source| SourceImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let pixels = decoded.to_rgb8();

        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_rgb(path: impl Into<PathBuf>, pixels: RgbImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// 中央の正方形に切り抜いた画像を返します。すでに正方形ならそのまま返します。
    pub fn into_square(self) -> RgbImage {
        let (w, h) = self.pixels.dimensions();
        if w == h {
            return self.pixels;
        }

        let region = CropRegion::centered(w, h);
        debug!(
            "中央を切り抜きます: offset=({}, {}), side={}",
            region.x, region.y, region.side
        );
        imageops::crop_imm(&self.pixels, region.x, region.y, region.side, region.side).to_image()
    }
}

impl fmt::Display for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{} ({}x{})", self.path.display(), w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, GenericImageView, ImageEncoder, Rgb, Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    // x 座標ごとに色が変わる画像。切り抜き位置の確認に使う
    fn column_gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn centered_region_for_landscape() {
        assert_eq!(
            CropRegion::centered(2000, 1500),
            CropRegion {
                x: 250,
                y: 0,
                side: 1500
            }
        );
    }

    #[test]
    fn centered_region_for_portrait_uses_floor_division() {
        // (15 - 10) / 2 = 2 (切り捨て)
        assert_eq!(
            CropRegion::centered(10, 15),
            CropRegion {
                x: 0,
                y: 2,
                side: 10
            }
        );
    }

    #[test]
    fn centered_region_for_square_is_whole_image() {
        assert_eq!(
            CropRegion::centered(64, 64),
            CropRegion {
                x: 0,
                y: 0,
                side: 64
            }
        );
    }

    #[test]
    fn into_square_crops_center_of_landscape() {
        let src = SourceImage::from_rgb("mem.png", column_gradient(9, 4));
        let square = src.into_square();
        assert_eq!(square.dimensions(), (4, 4));
        // オフセットは (9 - 4) / 2 = 2
        assert_eq!(*square.get_pixel(0, 0), Rgb([2, 0, 0]));
        assert_eq!(*square.get_pixel(3, 3), Rgb([5, 3, 0]));
    }

    #[test]
    fn into_square_crops_center_of_portrait() {
        let src = SourceImage::from_rgb("mem.png", column_gradient(3, 8));
        let square = src.into_square();
        assert_eq!(square.dimensions(), (3, 3));
        assert_eq!(*square.get_pixel(0, 0), Rgb([0, 2, 0]));
    }

    #[test]
    fn into_square_keeps_square_image_untouched() {
        let original = column_gradient(5, 5);
        let src = SourceImage::from_rgb("mem.png", original.clone());
        assert_eq!(src.into_square(), original);
    }

    #[test]
    fn open_missing_file_returns_not_found() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("missing.png");
        let err = SourceImage::open(&path).unwrap_err();
        match err {
            SourceImageError::NotFound(p) => assert_eq!(p, path),
            other => panic!("予期せぬエラーが返されました: {:?}", other),
        }
    }

    #[test]
    fn open_directory_returns_not_found() {
        let dir = tempdir().expect("Failed to create temp directory");
        assert!(matches!(
            SourceImage::open(dir.path()),
            Err(SourceImageError::NotFound(_))
        ));
    }

    #[test]
    fn open_non_image_returns_decode_error() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"this is not an image").expect("Failed to create file");
        assert!(matches!(
            SourceImage::open(&path),
            Err(SourceImageError::Decode { .. })
        ));
    }

    /// アルファ付きの PNG でも RGB として読み込まれることを確認
    #[test]
    fn open_drops_existing_alpha() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("rgba.png");
        let rgba = RgbaImage::from_pixel(6, 4, Rgba([10, 20, 30, 0]));
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(rgba.as_raw(), 6, 4, ExtendedColorType::Rgba8)
            .expect("PNGのエンコードに失敗");
        fs::write(&path, bytes).expect("Failed to write png");

        let src = SourceImage::open(&path).expect("open should succeed");
        assert_eq!(src.dimensions(), (6, 4));
        assert_eq!(src.as_path(), path.as_path());
        let square = src.into_square();
        assert_eq!(*square.get_pixel(0, 0), Rgb([10, 20, 30]));
    }

    /// 拡張子のないファイルでも、中身から PNG と判定して読み込める
    #[test]
    fn open_detects_format_from_content_without_extension() {
        let dir = tempdir().expect("Failed to create temp directory");
        let named = dir.path().join("source.png");
        column_gradient(7, 5).save(&named).expect("Failed to save png");
        let bare = dir.path().join("source");
        fs::rename(&named, &bare).expect("Failed to rename file");

        let src = SourceImage::open(&bare).expect("open should succeed");
        assert_eq!(src.dimensions(), (7, 5));
    }

    /// PNG 以外のフォーマットも読み込める
    #[test]
    fn open_accepts_bmp_source() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("logo.bmp");
        column_gradient(4, 6).save(&path).expect("Failed to save bmp");

        let src = SourceImage::open(&path).expect("open should succeed");
        assert_eq!(src.dimensions(), (4, 6));
        assert_eq!(src.into_square(), column_gradient(4, 6).view(0, 1, 4, 4).to_image());
    }

    #[test]
    fn display_shows_path_and_dimensions() {
        let src = SourceImage::from_rgb("logo.png", column_gradient(3, 2));
        assert_eq!(src.to_string(), "logo.png (3x2)");
    }
}
