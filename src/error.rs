//! # 错误类型
//!
//! 核心隐写算法可能返回的全部错误。所有检查都在写入任何像素之前完成，
//! 因此出错时缓冲区保持原样。

use thiserror::Error;

/// 核心操作的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 隐写与差异分析过程中可能出现的错误。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 两张图像尺寸不兼容：秘密图像大于载体，或比较的两张图像大小不同。
    #[error("Picture dimensions do not match: expected {expected:?} (width, height), got {actual:?}")]
    DimensionMismatch {
        /// 要求的 (宽, 高)。
        expected: (u32, u32),
        /// 实际的 (宽, 高)。
        actual: (u32, u32),
    },

    /// 文本中含有 A–Z 与空格以外的字符。
    #[error("Invalid character {character:?} at index {index}: only letters A-Z and spaces can be hidden")]
    InvalidCharacter {
        /// 出错的字符。
        character: char,
        /// 字符在输入中的位置 (按字符计)。
        index: usize,
    },

    /// 要写入或读取的坐标落在图像之外。
    #[error("Position (row {row}, column {column}) lies outside the {width}x{height} picture")]
    IndexOutOfRange {
        /// 行 (0 起)。
        row: u64,
        /// 列 (0 起)。
        column: u64,
        /// 图像宽度。
        width: u32,
        /// 图像高度。
        height: u32,
    },

    /// 解码时遇到 1..=27 以外的符号。
    #[error("Malformed symbol {symbol}: expected a value between 1 and 27")]
    MalformedSymbol {
        /// 无法解码的符号值。
        symbol: u8,
    },
}

impl StegoError {
    /// 构造尺寸不匹配错误。
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// 构造越界错误。
    pub fn out_of_range(row: u64, column: u64, (width, height): (u32, u32)) -> Self {
        Self::IndexOutOfRange {
            row,
            column,
            width,
            height,
        }
    }
}
