//! 白っぽい背景を透過に置き換えるモジュール。
//!
//! 判定はピクセル単位で独立しており、塗りつぶし（flood fill）や
//! 境界のアンチエイリアスは行いません。

use image::{DynamicImage, RgbImage, RgbaImage};
use log::debug;

/// 既定のしきい値。R, G, B がすべてこの値以上なら背景とみなす。
pub const DEFAULT_THRESHOLD: u8 = 235;

/// RGB 画像を RGBA に変換し、R, G, B がすべて `threshold` 以上のピクセルの
/// アルファを 0 にします。RGB の値はそのまま残します。
///
/// それ以外のピクセルは不透明（アルファ 255）のままです。
pub fn make_background_transparent(image: RgbImage, threshold: u8) -> RgbaImage {
    let mut rgba = DynamicImage::ImageRgb8(image).into_rgba8();
    let mut cleared = 0usize;

    for pixel in rgba.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r >= threshold && g >= threshold && b >= threshold {
            pixel.0[3] = 0;
            cleared += 1;
        }
    }

    debug!(
        "背景として透過にしたピクセル数: {} / {} (しきい値 {})",
        cleared,
        rgba.width() as usize * rgba.height() as usize,
        threshold
    );
    rgba
}
