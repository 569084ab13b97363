//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use image::Rgb;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可以在图像像素的最低两位中隐藏另一张图像或一段短文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可以在图像像素的最低两位中隐藏另一张图像或一段短文本，\
并能标出两张图像之间的差异区域。结果总是以无损的 PNG 格式保存。"
)]
pub struct Cli {
    /// 输出更多日志 (-v 为 info，-vv 为 debug，-vvv 为 trace)。也可以使用 RUST_LOG 环境变量。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把一种颜色的最高两位写入图像的每个像素，再把它显现出来。
    SimpleColor(SimpleColorArgs),

    /// 把秘密图像藏入载体图像的指定位置。
    HidePicture(HidePictureArgs),

    /// 显现藏在图像最低两位中的图像。
    RevealPicture(RevealPictureArgs),

    /// 用红框标出两张同尺寸图像之间的差异区域。
    Outline(OutlineArgs),

    /// 在图像第一行中隐藏一段只含字母和空格的短文本。
    HideText(HideTextArgs),

    /// 从图像第一行恢复隐藏的文本。
    RevealText(RevealTextArgs),
}

/// 'simple-color' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct SimpleColorArgs {
    /// 输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的颜色，格式为 R,G,B (例如 255,175,175)。
    #[arg(short, long, value_parser = parse_color)]
    pub color: Rgb<u8>,

    /// 结果图像的输出路径。默认为 `revealed_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'hide-picture' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HidePictureArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub source: PathBuf,

    /// 要隐藏的秘密图像文件路径，宽和高都不得大于载体图像。
    #[arg(short = 'S', long)]
    pub secret: PathBuf,

    /// 秘密图像左上角在载体中的行号。
    #[arg(short, long, default_value_t = 0)]
    pub row: u32,

    /// 秘密图像左上角在载体中的列号。
    #[arg(short, long, default_value_t = 0)]
    pub column: u32,

    /// 隐写完成后，保存结果图像的输出路径。默认为 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'reveal-picture' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RevealPictureArgs {
    /// 已隐藏图像的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 显现结果的输出路径。默认为 `revealed_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'outline' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct OutlineArgs {
    /// 原始图像文件路径。
    #[arg(short, long)]
    pub original: PathBuf,

    /// 修改后的图像文件路径，边框画在这张图像上。
    #[arg(short, long)]
    pub modified: PathBuf,

    /// 带边框图像的输出路径。默认为 `outlined_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'hide-text' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideTextArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本，只能包含字母和空格，长度须小于图像宽度。
    #[arg(short, long)]
    pub message: String,

    /// 隐写完成后，保存结果图像的输出路径。默认为 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'reveal-text' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RevealTextArgs {
    /// 已隐藏文本的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本后，保存文本内容的输出路径。省略时直接打印到终端。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 解析 `R,G,B` 格式的颜色。
pub fn parse_color(value: &str) -> Result<Rgb<u8>, String> {
    let channels = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid channel '{}': {e}", part.trim()))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    match channels.as_slice() {
        &[red, green, blue] => Ok(Rgb([red, green, blue])),
        _ => Err(format!(
            "expected three comma-separated channels (R,G,B), got {}",
            channels.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("255,175, 175"), Ok(Rgb([255, 175, 175])));
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,256").is_err());
    }

    #[test]
    fn test_parse_hide_picture() {
        let cli = Cli::try_parse_from([
            "pixel_stego",
            "-vv",
            "hide-picture",
            "--source",
            "beach.png",
            "--secret",
            "robot.png",
            "--row",
            "65",
            "--column",
            "208",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::HidePicture(args) = cli.command else {
            panic!("expected hide-picture");
        };
        assert_eq!((args.row, args.column), (65, 208));
        assert_eq!(args.dest, None);
        assert!(!args.force);
    }
}
