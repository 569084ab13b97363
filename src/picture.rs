//! # 像素缓冲区
//!
//! `Picture` 是核心算法操作的二维 RGB 像素网格，内部存储为 `image::RgbImage`，
//! 因此可以直接与 `image` 库的解码/编码器互换。
//!
//! 所有访问都按 (行, 列) 寻址：行对应图像高度方向 (y)，列对应宽度方向 (x)。
//! 调用者不应交换两者。

use image::{Rgb, RgbImage};

/// 单个像素：红、绿、蓝三个 8 位通道。
pub type Pixel = Rgb<u8>;

/// 颜色值，与像素使用同一表示。
pub type Color = Rgb<u8>;

/// 图像中的一个坐标，以具名的行/列表示，避免 x/y 混淆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl From<(u32, u32)> for Position {
    fn from((row, column): (u32, u32)) -> Self {
        Self::new(row, column)
    }
}

/// 宽 × 高固定的 RGB 像素网格，按行优先存储。
///
/// `Clone` 即复制整个缓冲区。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pixels: RgbImage,
}

impl Picture {
    /// 创建一张全黑图像。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
        }
    }

    /// 创建一张所有像素均为 `color` 的图像。
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, color),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// (宽, 高)
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// 返回 (row, column) 处的像素；越界时返回 `None`。
    pub fn pixel(&self, row: u32, column: u32) -> Option<&Pixel> {
        self.pixels.get_pixel_checked(column, row)
    }

    /// 返回 (row, column) 处像素的可变引用；越界时返回 `None`。
    pub fn pixel_mut(&mut self, row: u32, column: u32) -> Option<&mut Pixel> {
        self.pixels.get_pixel_mut_checked(column, row)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height() && position.column < self.width()
    }

    /// 按行优先顺序 (自上而下、自左而右) 遍历所有坐标。
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = self.dimensions();
        (0..height).flat_map(move |row| (0..width).map(move |column| Position::new(row, column)))
    }

    /// 按行优先顺序遍历所有像素及其坐标。
    pub fn pixels(&self) -> impl Iterator<Item = (Position, &Pixel)> {
        self.pixels
            .enumerate_pixels()
            .map(|(x, y, pixel)| (Position::new(y, x), pixel))
    }

    /// 按行优先顺序可变地遍历所有像素。
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Pixel> {
        self.pixels.pixels_mut()
    }

    /// 取出底层的 `RgbImage`，供保存到文件。
    pub fn into_image(self) -> RgbImage {
        self.pixels
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.pixels
    }
}

impl From<RgbImage> for Picture {
    fn from(pixels: RgbImage) -> Self {
        Self { pixels }
    }
}
