//! # pixel_stego 库
//!
//! 本库包含图像 LSB 隐写的核心逻辑：
//!
//! * [`bitplane`]：单像素的最低两位读写原语。
//! * [`embed`]：把一张图像藏入另一张图像。
//! * [`text`]：在图像第一行隐藏只含字母和空格的短文本。
//! * [`diff`]：找出两张图像之间的差异并标出差异区域。
//!
//! 核心模块不做任何文件 I/O，图像的读写由 [`handler`] 借助 `image` 库完成。

// 声明库包含的所有模块。

pub mod bitplane;
pub mod cli;
pub mod constants;
pub mod diff;
pub mod embed;
pub mod error;
pub mod handler;
pub mod picture;
pub mod text;

pub use error::{Result, StegoError};
pub use picture::{Color, Picture, Pixel, Position};
