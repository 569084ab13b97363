//! # 图像隐写
//!
//! 把一张秘密图像每个通道的最高两位写入载体图像对应区域的最低两位。

use crate::bitplane::set_low;
use crate::error::{Result, StegoError};
use crate::picture::{Picture, Position};
use log::debug;

/// 判断 `secret` 能否藏入 `source`：两个方向上秘密图像都不得大于载体。
pub fn can_hide(source: &Picture, secret: &Picture) -> bool {
    secret.width() <= source.width() && secret.height() <= source.height()
}

/// 把 `secret` 藏入 `source`，秘密图像的左上角对齐到 `start`。
///
/// 原地修改 `source` 并返回同一引用；若需保留原图，调用者应先 `clone`。
///
/// # Errors
///
/// * [`StegoError::DimensionMismatch`]：秘密图像在任一方向上大于载体。
/// * [`StegoError::IndexOutOfRange`]：从 `start` 开始放置会越出载体边界。
///
/// 两种情况下都不会写入任何像素。
pub fn hide_picture<'a>(
    source: &'a mut Picture,
    secret: &Picture,
    start: Position,
) -> Result<&'a mut Picture> {
    if !can_hide(source, secret) {
        return Err(StegoError::dimension_mismatch(
            source.dimensions(),
            secret.dimensions(),
        ));
    }

    let end_row = u64::from(start.row) + u64::from(secret.height());
    let end_column = u64::from(start.column) + u64::from(secret.width());
    if end_row > u64::from(source.height()) || end_column > u64::from(source.width()) {
        return Err(StegoError::out_of_range(
            end_row.saturating_sub(1),
            end_column.saturating_sub(1),
            source.dimensions(),
        ));
    }

    let dimensions = source.dimensions();
    for (offset, &color) in secret.pixels() {
        let (row, column) = (start.row + offset.row, start.column + offset.column);
        let target = source
            .pixel_mut(row, column)
            .ok_or_else(|| StegoError::out_of_range(row.into(), column.into(), dimensions))?;
        set_low(target, color);
    }

    debug!(
        "Hid a {}x{} picture at (row {}, column {})",
        secret.width(),
        secret.height(),
        start.row,
        start.column
    );
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitplane::reveal_picture;
    use image::Rgb;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_can_hide_compares_both_axes() {
        let source = Picture::new(4, 4);

        assert!(can_hide(&source, &Picture::new(4, 4)));
        assert!(can_hide(&source, &Picture::new(2, 3)));
        assert!(!can_hide(&source, &Picture::new(5, 1)));
        // 只有高度超出时同样拒绝
        assert!(!can_hide(&source, &Picture::new(1, 5)));
    }

    #[test]
    fn test_hide_white_square_in_black_picture() -> Result<()> {
        let mut source = Picture::filled(4, 4, BLACK);
        let secret = Picture::filled(2, 2, WHITE);

        hide_picture(&mut source, &secret, Position::new(0, 0))?;
        let revealed = reveal_picture(&source);

        for (position, pixel) in revealed.pixels() {
            if position.row < 2 && position.column < 2 {
                // 11 移到最高两位，再加上原有的低位 3
                assert_eq!(pixel.0.map(|c| c & 0xC0), [192, 192, 192]);
                assert_eq!(*pixel, Rgb([195, 195, 195]));
            } else {
                assert_eq!(*pixel, BLACK, "at {position:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_hide_at_offset_touches_only_the_region() -> Result<()> {
        let original = Picture::filled(6, 5, Rgb([100, 150, 200]));
        let mut source = original.clone();
        let secret = Picture::filled(2, 3, WHITE);

        hide_picture(&mut source, &secret, Position::new(2, 4))?;

        for (position, pixel) in source.pixels() {
            let inside = (2..5).contains(&position.row) && (4..6).contains(&position.column);
            if inside {
                assert_eq!(*pixel, Rgb([103, 151, 203]));
            } else {
                assert_eq!(Some(pixel), original.pixel(position.row, position.column));
            }
        }
        Ok(())
    }

    #[test]
    fn test_secret_too_large_is_rejected_without_writes() {
        let mut source = Picture::filled(2, 2, Rgb([1, 2, 3]));
        let before = source.clone();

        let err = hide_picture(&mut source, &Picture::new(2, 3), Position::new(0, 0)).unwrap_err();
        assert_eq!(err, StegoError::dimension_mismatch((2, 2), (2, 3)));
        assert_eq!(source, before);
    }

    #[test]
    fn test_offset_outside_source_is_rejected_without_writes() {
        let mut source = Picture::filled(4, 4, Rgb([1, 2, 3]));
        let before = source.clone();

        let err = hide_picture(&mut source, &Picture::filled(2, 2, WHITE), Position::new(3, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            StegoError::IndexOutOfRange { row: 4, column: 2, .. }
        ));
        assert_eq!(source, before);
    }
}
