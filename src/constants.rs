use image::Rgb;

/// 清除每个通道最低两位所用的掩码。
/// 与 `value / 4 * 4` 等价，结果总是 4 的倍数，范围为 [0, 252]。
pub const HIGH_BITS_MASK: u8 = 0xFC;

/// 取出最低两位所用的掩码。
pub const LOW_BITS_MASK: u8 = 0x03;

/// 秘密图像每个通道只保留最高两位，需右移 6 位才能落入载体的最低两位。
pub const SECRET_SHIFT: u32 = 6;

/// 每个字符编码拆分成的 2 位组数量 (红、蓝、绿各一组)。
/// 3 组共 6 位，可表示 0..=63，足以容纳 0..=27 的符号。
pub const BIT_PAIRS_PER_SYMBOL: usize = 3;

/// 字符串结束标记。隐写时写成最低位全为 0 的像素。
pub const END_OF_TEXT: u8 = 0;

/// 空格对应的编码。字母 A–Z 依次为 1–26。
pub const SPACE_CODE: u8 = 27;

/// 标出差异区域时使用的纯红色。
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
