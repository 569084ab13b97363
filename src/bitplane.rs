//! # 位平面操作
//!
//! 所有高层隐写操作都建立在这里的单像素原语之上：清除每个通道的最低两位、
//! 把一个颜色的最高两位写入这两位，以及把最低两位放大回可见范围。

use crate::constants::{HIGH_BITS_MASK, LOW_BITS_MASK, SECRET_SHIFT};
use crate::picture::{Color, Picture, Pixel};
use log::debug;

/// 将像素三个通道的最低两位清零。结果为 [0, 252] 内 4 的倍数，重复调用结果不变。
pub fn clear_low(pixel: &mut Pixel) {
    for channel in pixel.0.iter_mut() {
        *channel &= HIGH_BITS_MASK;
    }
}

/// 把 `color` 每个通道的最高两位写入 `pixel` 对应通道的最低两位。
///
/// 像素的最高六位保持不变。
pub fn set_low(pixel: &mut Pixel, color: Color) {
    clear_low(pixel);
    for (channel, &hidden) in pixel.0.iter_mut().zip(color.0.iter()) {
        *channel += hidden >> SECRET_SHIFT;
    }
}

/// 把每个通道的最低两位移到最高两位，并保留原来的低六位。
///
/// 只有最高两位是被隐藏图像的真实数据，其余位是载体自身的噪声，
/// 因此结果是一张可辨认但并非逐位还原的图像。
pub fn reveal_pixel(pixel: Pixel) -> Pixel {
    Pixel::from(pixel.0.map(|channel| {
        ((channel & LOW_BITS_MASK) << SECRET_SHIFT) + (channel % 64)
    }))
}

/// 对整张图像执行 [`reveal_pixel`]，返回新图像，输入保持不变。
pub fn reveal_picture(hidden: &Picture) -> Picture {
    let mut revealed = hidden.clone();
    for pixel in revealed.pixels_mut() {
        *pixel = reveal_pixel(*pixel);
    }
    debug!(
        "Revealed low bits of a {}x{} picture",
        hidden.width(),
        hidden.height()
    );
    revealed
}

/// 原地清除整张图像所有像素的最低两位，并返回同一图像。
pub fn clear_low_all(picture: &mut Picture) -> &mut Picture {
    picture.pixels_mut().for_each(clear_low);
    picture
}

/// 原地把 `color` 的最高两位写入整张图像的每个像素，并返回同一图像。
pub fn set_low_all(picture: &mut Picture, color: Color) -> &mut Picture {
    picture.pixels_mut().for_each(|pixel| set_low(pixel, color));
    picture
}
