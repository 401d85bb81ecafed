use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;
use std::collections::HashMap;

/// ピクセルサイズごとのリサイズ結果を保持するキャッシュ。
///
/// パイプラインの1回の実行ごとに新しく作られ、実行をまたいで共有されることはありません。
/// 同じサイズを要求するファイル名が複数あっても、リサイズは1度だけ行われます。
pub struct VariantCache {
    // 乗算済みアルファに変換した元画像
    premultiplied: RgbaImage,
    variants: HashMap<u32, RgbaImage>,
    resize_count: usize,
}

impl VariantCache {
    /// 正方形に整えた元画像からキャッシュを作成します。
    pub fn new(source: &RgbaImage) -> Self {
        let mut premultiplied = source.clone();
        premultiply(&mut premultiplied);
        Self {
            premultiplied,
            variants: HashMap::new(),
            resize_count: 0,
        }
    }

    /// `pixels` × `pixels` の画像を返します。未計算ならここで Lanczos3 でリサイズします。
    ///
    /// リサンプリングは乗算済みアルファで行うため、透過部分の RGB が縁に滲みません。
    pub fn get_or_resize(&mut self, pixels: u32) -> &RgbaImage {
        let premultiplied = &self.premultiplied;
        let resize_count = &mut self.resize_count;
        self.variants.entry(pixels).or_insert_with(|| {
            debug!("{}px にリサイズします", pixels);
            *resize_count += 1;
            let mut resized = imageops::resize(premultiplied, pixels, pixels, FilterType::Lanczos3);
            unpremultiply(&mut resized);
            resized
        })
    }

    /// これまでに実際に行ったリサイズの回数。
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    /// キャッシュしているサイズの数。
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// RGB にアルファを掛け合わせます。
fn premultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let a = pixel[3] as u32;
        for c in &mut pixel.0[..3] {
            *c = ((*c as u32 * a + 127) / 255) as u8;
        }
    }
}

/// 乗算済みの RGB をアルファで割り戻します。アルファ 0 の RGB は 0 になる。
fn unpremultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let a = pixel[3] as u32;
        for c in &mut pixel.0[..3] {
            *c = if a == 0 {
                0
            } else {
                ((*c as u32 * 255 + a / 2) / a).min(255) as u8
            };
        }
    }
}
