//! # 文本隐写
//!
//! 只支持大写字母与空格组成的短消息 (小写字母会先转为大写)。
//! 每个字符编码为 1..=27 的符号，拆成三组 2 位后写入第 0 行一个像素的
//! 红、蓝、绿通道最低两位：
//!
//! | 通道 | 内容          |
//! |------|---------------|
//! | 红   | 第 0 组 (×1)  |
//! | 蓝   | 第 1 组 (×4)  |
//! | 绿   | 第 2 组 (×16) |
//!
//! 消息之后紧跟一个最低位全为 0 的像素作为结束标记，因此宽度为 `w` 的图像
//! 最多可以容纳 `w - 1` 个字符。

use crate::bitplane::clear_low;
use crate::constants::{BIT_PAIRS_PER_SYMBOL, END_OF_TEXT, LOW_BITS_MASK, SPACE_CODE};
use crate::error::{Result, StegoError};
use crate::picture::Picture;
use log::{debug, trace};

const RED: usize = 0;
const GREEN: usize = 1;
const BLUE: usize = 2;

/// 将字符串编码为符号序列：A–Z 为 1–26，空格为 27，末尾附加结束标记 0。
///
/// # Errors
///
/// 出现字母和空格以外的字符时返回 [`StegoError::InvalidCharacter`]。
pub fn encode_string(s: &str) -> Result<Vec<u8>> {
    let mut symbols = s
        .chars()
        .enumerate()
        .map(|(index, character)| match character.to_ascii_uppercase() {
            upper @ 'A'..='Z' => Ok(upper as u8 - b'A' + 1),
            ' ' => Ok(SPACE_CODE),
            _ => Err(StegoError::InvalidCharacter { character, index }),
        })
        .collect::<Result<Vec<u8>>>()?;

    symbols.push(END_OF_TEXT);
    Ok(symbols)
}

/// 将符号序列解码为字符串。遇到结束标记 0 时停止。
///
/// # Errors
///
/// 遇到 27 以上的符号时返回 [`StegoError::MalformedSymbol`]。
pub fn decode_string(symbols: &[u8]) -> Result<String> {
    symbols
        .iter()
        .take_while(|&&symbol| symbol != END_OF_TEXT)
        .map(|&symbol| match symbol {
            1..=26 => Ok(char::from(b'A' + symbol - 1)),
            SPACE_CODE => Ok(' '),
            _ => Err(StegoError::MalformedSymbol { symbol }),
        })
        .collect()
}

/// 把 0..=63 的符号从低到高拆成三组 2 位：`[个位, 四位, 十六位]`。
pub fn bit_pairs(symbol: u8) -> [u8; BIT_PAIRS_PER_SYMBOL] {
    let mut code = symbol;
    std::array::from_fn(|_| {
        let pair = code & LOW_BITS_MASK;
        code >>= 2;
        pair
    })
}

/// 图像第 0 行最多能隐藏的字符数 (需预留一个像素存放结束标记)。
pub fn text_capacity(picture: &Picture) -> usize {
    if picture.height() == 0 {
        return 0;
    }
    (picture.width() as usize).saturating_sub(1)
}

/// 把消息 `s` 藏入 `source` 第 0 行，从第 0 列开始，每个像素一个字符，
/// 随后写入结束标记像素。
///
/// 原地修改 `source` 并返回同一引用。
///
/// # Errors
///
/// * [`StegoError::InvalidCharacter`]：消息含有字母和空格以外的字符。
/// * [`StegoError::IndexOutOfRange`]：消息 (含结束标记) 超出第 0 行的宽度。
///
/// 两种情况下都不会写入任何像素。
pub fn hide_text<'a>(source: &'a mut Picture, s: &str) -> Result<&'a mut Picture> {
    let symbols = encode_string(s)?;

    let last_column = symbols.len() - 1;
    if last_column >= source.width() as usize || source.height() == 0 {
        return Err(StegoError::out_of_range(
            0,
            last_column as u64,
            source.dimensions(),
        ));
    }

    let dimensions = source.dimensions();
    for (column, &symbol) in symbols.iter().enumerate() {
        let pixel = source
            .pixel_mut(0, column as u32)
            .ok_or_else(|| StegoError::out_of_range(0, column as u64, dimensions))?;
        let [units, fours, sixteens] = bit_pairs(symbol);

        clear_low(pixel);
        pixel[RED] += units;
        pixel[GREEN] += sixteens;
        pixel[BLUE] += fours;
    }

    debug!("Hid {} characters in row 0", symbols.len() - 1);
    Ok(source)
}

/// 从 `source` 第 0 行读出隐藏的消息，读到结束标记像素为止。
///
/// 若整行都没有结束标记，则解码整行读到的内容。
///
/// # Errors
///
/// 某个像素还原出的符号不在 1..=27 内时返回 [`StegoError::MalformedSymbol`]，
/// 通常说明这张图像并未隐藏文本。
pub fn reveal_text(source: &Picture) -> Result<String> {
    let mut symbols = Vec::new();

    for column in 0..source.width() {
        let Some(pixel) = source.pixel(0, column) else {
            break;
        };
        let [red, green, blue] = pixel.0.map(|channel| channel & LOW_BITS_MASK);
        if red == 0 && green == 0 && blue == 0 {
            trace!("End of text marker at column {column}");
            break;
        }
        symbols.push(red + 4 * blue + 16 * green);
    }

    decode_string(&symbols)
}
