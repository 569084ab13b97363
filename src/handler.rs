//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O (借助 `image` 库读写图像)、调用核心隐写算法以及向用户报告结果。
//! 核心算法本身从不接触文件系统。

use crate::bitplane::{reveal_picture, set_low_all};
use crate::cli::{
    HidePictureArgs, HideTextArgs, OutlineArgs, RevealPictureArgs, RevealTextArgs,
    SimpleColorArgs,
};
use crate::diff::{find_differences, show_different_area};
use crate::embed::{can_hide, hide_picture};
use crate::picture::{Picture, Position};
use crate::text::{hide_text, reveal_text, text_capacity};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 读取任意 `image` 支持的格式，并转换为 RGB 像素缓冲区。
fn load_picture(path: &Path) -> Result<Picture> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Picture::from(image.to_rgb8()))
}

/// 总是以 PNG 保存，避免有损压缩破坏最低位中的数据。
fn save_picture(picture: &Picture, path: &Path) -> Result<()> {
    picture
        .as_image()
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
    info!("Saved {}", path.display());
    Ok(())
}

/// 未指定输出路径时，在输入文件旁生成 `<prefix>_<文件名>.<extension>`。
fn output_path(dest: Option<PathBuf>, input: &Path, prefix: &str, extension: &str) -> PathBuf {
    dest.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "picture".into());
        input.with_file_name(format!("{prefix}_{stem}.{extension}"))
    })
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'SimpleColor' 命令的执行逻辑。
///
/// 把 `color` 的最高两位写入图像每个像素的最低两位，再显现出来，
/// 得到的结果图像应当整体呈现该颜色的近似色。
pub fn handle_simple_color(args: SimpleColorArgs) -> Result<()> {
    let dest = output_path(args.dest, &args.image, "revealed", "png");
    ensure_writable(&dest, args.force)?;

    let mut picture = load_picture(&args.image)?;
    let revealed = reveal_picture(set_low_all(&mut picture, args.color));
    save_picture(&revealed, &dest)?;

    println!(
        "The color has been hidden and revealed: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'HidePicture' 命令的执行逻辑。
///
/// 负责读取载体与秘密图像、检查尺寸是否兼容、调用核心隐写函数，
/// 最后将结果写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取任一输入图像。
/// * 秘密图像大于载体图像，或从指定位置开始放置会越出载体边界。
/// * 无法写入到目标图像文件。
pub fn handle_hide_picture(args: HidePictureArgs) -> Result<()> {
    let dest = output_path(args.dest, &args.source, "doctored", "png");
    ensure_writable(&dest, args.force)?;

    let mut source = load_picture(&args.source)?;
    let secret = load_picture(&args.secret)?;

    anyhow::ensure!(
        can_hide(&source, &secret),
        "Not enough space in the source picture to hide the secret picture. \nSecret: {}, Source: {}",
        format!("{}x{}", secret.width(), secret.height()).red().bold(),
        format!("{}x{}", source.width(), source.height()).green().bold()
    );

    hide_picture(&mut source, &secret, Position::new(args.row, args.column)).with_context(|| {
        format!(
            "Failed to hide the secret picture at row {}, column {}.",
            args.row.to_string().red().bold(),
            args.column.to_string().red().bold()
        )
    })?;

    save_picture(&source, &dest)?;

    println!(
        "The picture has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'RevealPicture' 命令的执行逻辑。
pub fn handle_reveal_picture(args: RevealPictureArgs) -> Result<()> {
    let dest = output_path(args.dest, &args.image, "revealed", "png");
    ensure_writable(&dest, args.force)?;

    let hidden = load_picture(&args.image)?;
    save_picture(&reveal_picture(&hidden), &dest)?;

    println!(
        "The hidden picture has been revealed and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Outline' 命令的执行逻辑。
///
/// 比较原始图像与修改后的图像，报告不同像素的数量，
/// 并在修改后的图像上用红框标出差异区域。
pub fn handle_outline(args: OutlineArgs) -> Result<()> {
    let dest = output_path(args.dest, &args.modified, "outlined", "png");
    ensure_writable(&dest, args.force)?;

    let original = load_picture(&args.original)?;
    let mut modified = load_picture(&args.modified)?;

    let differences = find_differences(&original, &modified).with_context(|| {
        format!(
            "Unable to compare {} with {}.",
            args.original.to_string_lossy().red().bold(),
            args.modified.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The amount of pixels that are different: {}",
        differences.len().to_string().green().bold()
    );

    show_different_area(&mut modified, &differences)?;
    save_picture(&modified, &dest)?;

    println!(
        "The different area has been outlined and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'HideText' 命令的执行逻辑。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像。
/// * 文本含有字母和空格以外的字符。
/// * 图像第一行没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide_text(args: HideTextArgs) -> Result<()> {
    let dest = output_path(args.dest, &args.image, "doctored", "png");
    ensure_writable(&dest, args.force)?;

    let mut picture = load_picture(&args.image)?;

    let required_space = args.message.chars().count();
    let available_space = text_capacity(&picture);
    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    hide_text(&mut picture, &args.message).with_context(|| {
        format!(
            "Failed to hide the message {}. \nOnly letters A-Z and spaces are supported.",
            args.message.red().bold()
        )
    })?;

    save_picture(&picture, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'RevealText' 命令的执行逻辑。
///
/// 未指定输出文件时，恢复的文本直接打印到终端。
pub fn handle_reveal_text(args: RevealTextArgs) -> Result<()> {
    let picture = load_picture(&args.image)?;

    let text = reveal_text(&picture).with_context(|| {
        format!(
            "Failed to recover text from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match args.text {
        Some(path) => {
            ensure_writable(&path, args.force)?;
            fs::write(&path, &text).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The text has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => println!("{}", text.green().bold()),
    }
    Ok(())
}
