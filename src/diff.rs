//! # 差异分析
//!
//! 比较两张同尺寸图像，找出颜色不同的像素，并在图像上用红框标出差异区域。
//! 常用于查看隐写操作实际改动了哪些像素。

use crate::constants::OUTLINE_COLOR;
use crate::error::{Result, StegoError};
use crate::picture::{Picture, Position};
use log::debug;

/// 由差异坐标序列得到的矩形。
///
/// 四条边直接取自序列的第一个和最后一个元素，而不是扫描最小/最大值。
/// 对 [`find_differences`] 的行优先结果而言，行范围总是正确的；
/// 列范围只在差异区域左上角和右下角恰好是首尾元素时才是真正的外接矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub first_row: u32,
    pub last_row: u32,
    pub first_column: u32,
    pub last_column: u32,
}

impl BoundingBox {
    /// 差异为空时返回 `None`。
    pub fn from_differences(differences: &[Position]) -> Option<Self> {
        let (first, last) = (differences.first()?, differences.last()?);
        Some(Self {
            first_row: first.row,
            last_row: last.row,
            first_column: first.column,
            last_column: last.column,
        })
    }
}

fn ensure_same_dimensions(p1: &Picture, p2: &Picture) -> Result<()> {
    if p1.dimensions() != p2.dimensions() {
        return Err(StegoError::dimension_mismatch(
            p1.dimensions(),
            p2.dimensions(),
        ));
    }
    Ok(())
}

/// 按行优先顺序列出两张图像颜色不同的所有坐标。
///
/// # Errors
///
/// 两张图像宽或高不同时返回 [`StegoError::DimensionMismatch`]。
pub fn find_differences(p1: &Picture, p2: &Picture) -> Result<Vec<Position>> {
    ensure_same_dimensions(p1, p2)?;

    let differences: Vec<Position> = p1
        .pixels()
        .zip(p2.pixels())
        .filter(|((_, a), (_, b))| a != b)
        .map(|((position, _), _)| position)
        .collect();

    debug!("Found {} differing pixels", differences.len());
    Ok(differences)
}

/// 两张图像每个像素颜色都相同时返回 `true`，遇到第一个差异即停止。
///
/// # Errors
///
/// 两张图像宽或高不同时返回 [`StegoError::DimensionMismatch`]。
pub fn is_same(p1: &Picture, p2: &Picture) -> Result<bool> {
    ensure_same_dimensions(p1, p2)?;
    Ok(p1.as_image().pixels().eq(p2.as_image().pixels()))
}

/// 在 `picture` 上用纯红色画出差异区域的矩形边框，原地修改并返回同一引用。
///
/// `differences` 为空时图像保持不变。矩形的取法见 [`BoundingBox`]；
/// 当首元素的行或列大于末元素时，对应方向的边不会被绘制。
///
/// # Errors
///
/// 矩形的任一边落在图像外时返回 [`StegoError::IndexOutOfRange`]，此时不绘制任何像素。
pub fn show_different_area<'a>(
    picture: &'a mut Picture,
    differences: &[Position],
) -> Result<&'a mut Picture> {
    let Some(area) = BoundingBox::from_differences(differences) else {
        return Ok(picture);
    };

    for corner in [
        Position::new(area.first_row, area.first_column),
        Position::new(area.last_row, area.last_column),
    ] {
        if !picture.contains(corner) {
            return Err(StegoError::out_of_range(
                corner.row.into(),
                corner.column.into(),
                picture.dimensions(),
            ));
        }
    }

    let mut paint = |row: u32, column: u32| {
        if let Some(pixel) = picture.pixel_mut(row, column) {
            *pixel = OUTLINE_COLOR;
        }
    };

    for row in area.first_row..=area.last_row {
        paint(row, area.first_column);
        paint(row, area.last_column);
    }
    for column in area.first_column..=area.last_column {
        paint(area.first_row, column);
        paint(area.last_row, column);
    }

    debug!("Outlined {area:?}");
    Ok(picture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::hide_picture;
    use crate::text::hide_text;
    use image::Rgb;

    const RED: Rgb<u8> = OUTLINE_COLOR;
    const GREY: Rgb<u8> = Rgb([128, 128, 128]);

    #[test]
    fn test_identical_pictures() -> Result<()> {
        let picture = Picture::filled(6, 4, GREY);
        assert!(find_differences(&picture, &picture)?.is_empty());
        assert!(is_same(&picture, &picture.clone())?);
        Ok(())
    }

    #[test]
    fn test_single_changed_pixel() -> Result<()> {
        let original = Picture::filled(6, 4, GREY);
        let mut changed = original.clone();
        *changed.pixel_mut(3, 1).unwrap() = Rgb([128, 128, 129]);

        assert_eq!(
            find_differences(&original, &changed)?,
            vec![Position::new(3, 1)]
        );
        assert!(!is_same(&original, &changed)?);
        Ok(())
    }

    #[test]
    fn test_differences_are_row_major() -> Result<()> {
        let original = Picture::filled(4, 4, GREY);
        let mut changed = original.clone();
        for (row, column) in [(2, 0), (0, 3), (2, 2), (1, 1)] {
            *changed.pixel_mut(row, column).unwrap() = RED;
        }

        assert_eq!(
            find_differences(&original, &changed)?,
            vec![
                Position::new(0, 3),
                Position::new(1, 1),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_size_mismatch_on_either_axis() {
        let picture = Picture::new(4, 4);
        for other in [Picture::new(4, 5), Picture::new(3, 4), Picture::new(2, 2)] {
            assert!(matches!(
                find_differences(&picture, &other),
                Err(StegoError::DimensionMismatch { .. })
            ));
            assert!(is_same(&picture, &other).is_err());
        }
    }

    #[test]
    fn test_empty_differences_leave_picture_unchanged() -> Result<()> {
        let mut picture = Picture::filled(3, 3, GREY);
        show_different_area(&mut picture, &[])?;
        assert_eq!(picture, Picture::filled(3, 3, GREY));
        Ok(())
    }

    #[test]
    fn test_outline_of_hidden_picture() -> Result<()> {
        let original = Picture::filled(8, 8, GREY);
        let mut hidden = original.clone();
        hide_picture(
            &mut hidden,
            &Picture::filled(3, 2, Rgb([255, 255, 255])),
            Position::new(2, 3),
        )?;

        let differences = find_differences(&original, &hidden)?;
        assert_eq!(differences.len(), 6);
        show_different_area(&mut hidden, &differences)?;

        let red: Vec<Position> = hidden
            .pixels()
            .filter(|(_, p)| **p == RED)
            .map(|(position, _)| position)
            .collect();
        // 2 行 × 3 列的矩形，边框覆盖全部 6 个像素
        assert_eq!(red, differences);
        Ok(())
    }

    #[test]
    fn test_outline_of_hidden_text() -> Result<()> {
        let original = Picture::filled(10, 3, Rgb([201, 202, 203]));
        let mut hidden = original.clone();
        hide_text(&mut hidden, "ABC")?;

        let differences = find_differences(&original, &hidden)?;
        show_different_area(&mut hidden, &differences)?;

        let first = differences[0];
        let last = *differences.last().unwrap();
        assert_eq!(first, Position::new(0, 0));
        for column in first.column..=last.column {
            assert_eq!(hidden.pixel(0, column), Some(&RED));
        }
        assert_eq!(hidden.pixel(1, 0), Some(&Rgb([201, 202, 203])));
        Ok(())
    }

    #[test]
    fn test_outline_uses_first_and_last_elements() -> Result<()> {
        let mut picture = Picture::filled(10, 10, GREY);
        let differences = [Position::new(5, 5), Position::new(2, 8)];

        assert_eq!(
            BoundingBox::from_differences(&differences),
            Some(BoundingBox {
                first_row: 5,
                last_row: 2,
                first_column: 5,
                last_column: 8,
            })
        );

        show_different_area(&mut picture, &differences)?;

        // 行范围 5..=2 为空，只画出第 5 行和第 2 行的横边
        for column in 5..=8 {
            assert_eq!(picture.pixel(5, column), Some(&RED));
            assert_eq!(picture.pixel(2, column), Some(&RED));
        }
        for row in [3, 4] {
            assert_eq!(picture.pixel(row, 5), Some(&GREY));
            assert_eq!(picture.pixel(row, 8), Some(&GREY));
        }
        let painted = picture.pixels().filter(|(_, p)| **p == RED).count();
        assert_eq!(painted, 8);
        Ok(())
    }

    #[test]
    fn test_outline_outside_picture_is_rejected() {
        let mut picture = Picture::filled(4, 4, GREY);
        let before = picture.clone();

        let err = show_different_area(&mut picture, &[Position::new(1, 1), Position::new(2, 9)])
            .unwrap_err();
        assert!(matches!(err, StegoError::IndexOutOfRange { row: 2, column: 9, .. }));
        assert_eq!(picture, before);
    }
}
